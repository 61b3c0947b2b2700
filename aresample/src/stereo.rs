//! Energy-preserving mono to stereo conversion.
//!
//! A mono sample `v` carries energy `v*v`. Writing `v0` to both channels
//! keeps the energy when `2*v0*v0 = v*v`, that is `v0 = v * sqrt(1/2)`.

use std::f32::consts::FRAC_1_SQRT_2;

use crate::error::{Error, Result};

/// Converts mono s16le `pcm` to stereo in `out`, which must be exactly
/// twice as long as `pcm`.
pub fn mono_to_stereo(pcm: &[u8], out: &mut [u8]) -> Result<()> {
    if pcm.is_empty() {
        return Err(Error::InvalidBuffer("empty pcm".into()));
    }
    if pcm.len() % 2 != 0 {
        return Err(Error::InvalidBuffer(format!("pcm size={} not s16le", pcm.len())));
    }
    if out.len() != 2 * pcm.len() {
        return Err(Error::InvalidBuffer(format!(
            "output size={} should be {}",
            out.len(),
            2 * pcm.len()
        )));
    }

    for (sample, frame) in pcm.chunks_exact(2).zip(out.chunks_exact_mut(4)) {
        let v = i16::from_le_bytes([sample[0], sample[1]]);
        let v = (v as f32 * FRAC_1_SQRT_2).round() as i16;
        let b = v.to_le_bytes();
        frame[..2].copy_from_slice(&b);
        frame[2..].copy_from_slice(&b);
    }

    Ok(())
}

/// Like [`mono_to_stereo`], allocating the output buffer.
pub fn mono_to_stereo_vec(pcm: &[u8]) -> Result<Vec<u8>> {
    let mut out = vec![0u8; 2 * pcm.len()];
    mono_to_stereo(pcm, &mut out)?;
    Ok(out)
}
