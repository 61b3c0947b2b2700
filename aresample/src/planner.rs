//! Output position planning.
//!
//! With `M` input samples, input rate `isr`, output rate `osr` and the
//! delta `DS` carried from the previous call:
//!
//! ```text
//! N   = (M + DS) * osr / isr
//! P   = N - N % 2
//! DS' = M - P * isr / osr
//! ```
//!
//! `P` output positions are spread evenly over the input with step `M / P`.
//! Positions past the last input sample are dropped, so the realized `P`
//! may be one short of the planned even count; `DS'` is computed from the
//! realized count.

/// Output positions for one resample call, shared by every channel.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    /// Input samples per channel (`M`).
    pub input_samples: usize,
    /// Realized output samples per channel (`P`).
    pub output_samples: usize,
    /// Carry for the next call (`DS'`).
    pub carry: i64,
    /// Fractional input positions to sample, strictly increasing.
    pub positions: Vec<f64>,
}

/// Plans the output positions for `input_samples` samples per channel.
///
/// `rate_in` and `rate_out` must be non-zero.
pub fn plan(input_samples: usize, carry: i64, rate_in: u32, rate_out: u32) -> Plan {
    let m = input_samples as i64;
    let (isr, osr) = (rate_in as i64, rate_out as i64);

    let n = ((m + carry) * osr / isr).max(0);
    let planned = (n - n % 2) as usize;

    let positions: Vec<f64> = if planned == 0 || input_samples == 0 {
        Vec::new()
    } else {
        let step = input_samples as f64 / planned as f64;
        let last = (input_samples - 1) as f64;
        (0..planned)
            .map(|i| i as f64 * step)
            .take_while(|&x| x <= last)
            .collect()
    };

    let output_samples = positions.len();
    let carry = m - output_samples as i64 * isr / osr;

    Plan {
        input_samples,
        output_samples,
        carry,
        positions,
    }
}
