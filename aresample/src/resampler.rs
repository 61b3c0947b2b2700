//! Streaming s16le sample rate conversion.
//!
//! Each call deinterleaves the PCM, plans the output positions once for all
//! channels, then walks overlapping 4-sample windows over every channel and
//! evaluates a natural cubic spline at the positions that fall in each
//! window. The planner carry is kept between calls so that chunked input
//! converges to the exact rate ratio.

use tracing::{debug, error, trace};

use crate::codec;
use crate::error::{Error, Result};
use crate::format::Format;
use crate::planner::{self, Plan};
use crate::spline::NaturalSpline;

/// Samples per spline window.
pub const WINDOW: usize = 4;

/// Window start advance; adjacent windows share one sample.
const STRIDE: usize = WINDOW - 1;

/// Sample rate conversion of s16le PCM.
pub trait Resample {
    /// Resamples `pcm`, which holds whole frames of interleaved samples.
    fn resample(&mut self, pcm: &[u8]) -> Result<Vec<u8>>;
}

/// Cubic-spline resampler for mono or stereo s16le PCM.
///
/// One instance serves one stream: the carry it keeps between calls must
/// not be reset mid-stream.
#[derive(Debug, Clone)]
pub struct Resampler {
    channels: usize,
    sample_rate_in: u32,
    sample_rate_out: u32,
    /// Samples of the input clock not yet matched by output (`DS`).
    carry: i64,
    /// Bytes accepted by `push` that do not form a resamplable block yet.
    pending: Vec<u8>,
}

impl Resampler {
    /// Creates a resampler converting `channels` interleaved channels from
    /// `sample_rate_in` to `sample_rate_out`.
    pub fn new(channels: usize, sample_rate_in: u32, sample_rate_out: u32) -> Result<Self> {
        if !(1..=2).contains(&channels) {
            return Err(Error::InvalidConfiguration(format!("invalid channels={channels}")));
        }
        if sample_rate_in == 0 {
            return Err(Error::InvalidConfiguration(format!(
                "invalid sample_rate_in={sample_rate_in}"
            )));
        }
        if sample_rate_out == 0 {
            return Err(Error::InvalidConfiguration(format!(
                "invalid sample_rate_out={sample_rate_out}"
            )));
        }

        Ok(Self {
            channels,
            sample_rate_in,
            sample_rate_out,
            carry: 0,
            pending: Vec::new(),
        })
    }

    /// Creates a resampler for PCM in `src`, converting to `sample_rate_out`.
    pub fn with_format(src: Format, sample_rate_out: u32) -> Result<Self> {
        Self::new(src.channels(), src.sample_rate, sample_rate_out)
    }

    /// Returns the number of interleaved channels.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Returns the input sample rate in Hz.
    pub fn sample_rate_in(&self) -> u32 {
        self.sample_rate_in
    }

    /// Returns the output sample rate in Hz.
    pub fn sample_rate_out(&self) -> u32 {
        self.sample_rate_out
    }

    /// Returns the carry that the next call starts from.
    pub fn carry(&self) -> i64 {
        self.carry
    }

    /// Returns true if input and output rates match and PCM is copied as is.
    pub fn is_passthrough(&self) -> bool {
        self.sample_rate_in == self.sample_rate_out
    }

    /// Returns the number of bytes held back by [`Resampler::push`].
    pub fn pending_bytes(&self) -> usize {
        self.pending.len()
    }

    /// Drops the bytes held back by [`Resampler::push`], returning how many.
    pub fn discard_pending(&mut self) -> usize {
        let n = self.pending.len();
        self.pending.clear();
        n
    }

    fn frame_bytes(&self) -> usize {
        2 * self.channels
    }

    /// Resamples `pcm`.
    ///
    /// `pcm` must be non-empty, aligned to whole frames and, unless the
    /// rates match, hold at least 4 samples per channel. The output holds
    /// the same number of channels. On error the carry is unchanged.
    pub fn resample(&mut self, pcm: &[u8]) -> Result<Vec<u8>> {
        if pcm.is_empty() {
            return Err(Error::InvalidBuffer("empty pcm".into()));
        }
        if pcm.len() % self.frame_bytes() != 0 {
            return Err(Error::InvalidBuffer(format!(
                "size={} should mod({})",
                pcm.len(),
                self.frame_bytes()
            )));
        }

        if self.is_passthrough() {
            return Ok(pcm.to_vec());
        }

        let frames = pcm.len() / self.frame_bytes();
        if frames < WINDOW {
            return Err(Error::InsufficientSamples { got: frames });
        }

        let inputs: Vec<Vec<i16>> = (0..self.channels)
            .map(|ch| codec::deinterleave(pcm, self.channels, ch))
            .collect();

        let plan = planner::plan(frames, self.carry, self.sample_rate_in, self.sample_rate_out);
        debug!(
            ds = self.carry,
            m = plan.input_samples,
            p = plan.output_samples,
            nds = plan.carry,
            "resample"
        );

        let outputs = inputs
            .iter()
            .map(|samples| resample_channel(samples, &plan))
            .collect::<Result<Vec<_>>>()?;

        let right = outputs.get(1).map(Vec::as_slice);
        let npcm = codec::interleave(&outputs[0], right)?;

        self.carry = plan.carry;
        Ok(npcm)
    }

    /// Resamples whatever complete input is available, holding back the rest.
    ///
    /// Unlike [`Resampler::resample`], `pcm` may be empty, end in a partial
    /// frame or hold fewer than 4 frames. Held back bytes are prepended to
    /// the next push; an empty buffer is returned while there is not enough
    /// input for a window. On error neither the pending bytes nor the carry
    /// change.
    pub fn push(&mut self, pcm: &[u8]) -> Result<Vec<u8>> {
        let frame = self.frame_bytes();
        let frames = (self.pending.len() + pcm.len()) / frame;
        let min_frames = if self.is_passthrough() { 1 } else { WINDOW };

        if frames < min_frames {
            self.pending.extend_from_slice(pcm);
            return Ok(Vec::new());
        }

        let mut input = Vec::with_capacity(self.pending.len() + pcm.len());
        input.extend_from_slice(&self.pending);
        input.extend_from_slice(pcm);

        let aligned = frames * frame;
        let npcm = self.resample(&input[..aligned])?;

        input.drain(..aligned);
        self.pending = input;
        Ok(npcm)
    }
}

impl Resample for Resampler {
    fn resample(&mut self, pcm: &[u8]) -> Result<Vec<u8>> {
        Resampler::resample(self, pcm)
    }
}

/// Evaluates one channel at the planned positions.
///
/// `samples` must hold at least [`WINDOW`] values.
fn resample_channel(samples: &[i16], plan: &Plan) -> Result<Vec<i16>> {
    let x = &plan.positions;
    let len = samples.len();
    let mut out = Vec::with_capacity(x.len());

    // Cursor into x; positions are consumed by the first window reaching them.
    let mut p = 0;
    let mut i = 0;
    while i + 1 < len {
        // Pull the last window back so it always has 4 samples.
        if i + STRIDE >= len {
            i = len - WINDOW;
        }

        let xi = [i as f64, (i + 1) as f64, (i + 2) as f64, (i + 3) as f64];
        let yi = [
            samples[i] as f64,
            samples[i + 1] as f64,
            samples[i + 2] as f64,
            samples[i + 3] as f64,
        ];

        let start = p;
        while p < x.len() && x[p] >= xi[0] && x[p] <= xi[3] + 1.0 {
            p += 1;
        }

        if p > start {
            trace!(window = i, outputs = p - start, "spline window");
            let s = NaturalSpline::new(xi, yi);
            out.extend(x[start..p].iter().map(|&v| s.eval(v) as i16));
        }

        i += STRIDE;
    }

    if out.len() != x.len() {
        error!(
            planned = x.len(),
            produced = out.len(),
            m = plan.input_samples,
            "resample window walk mismatch"
        );
        return Err(Error::InternalInvariantViolation {
            planned: x.len(),
            produced: out.len(),
        });
    }

    Ok(out)
}
