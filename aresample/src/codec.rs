//! s16le sample packing.
//!
//! Splits an interleaved PCM buffer into per-channel sample sequences and
//! packs them back.

use crate::error::{Error, Result};

/// Extracts the samples of one channel from interleaved s16le PCM.
///
/// Returns an empty sequence when `channel >= channels`. A trailing
/// incomplete sample is ignored.
pub fn deinterleave(pcm: &[u8], channels: usize, channel: usize) -> Vec<i16> {
    if channel >= channels {
        return Vec::new();
    }

    pcm.chunks_exact(2 * channels)
        .map(|frame| {
            let off = 2 * channel;
            i16::from_le_bytes([frame[off], frame[off + 1]])
        })
        .collect()
}

/// Packs `left` (and optionally `right`) into interleaved s16le PCM.
pub fn interleave(left: &[i16], right: Option<&[i16]>) -> Result<Vec<u8>> {
    let Some(right) = right else {
        let mut pcm = Vec::with_capacity(left.len() * 2);
        for v in left {
            pcm.extend_from_slice(&v.to_le_bytes());
        }
        return Ok(pcm);
    };

    if right.len() != left.len() {
        return Err(Error::InvalidBuffer(format!(
            "channel length mismatch, L{}!=R{}",
            left.len(),
            right.len()
        )));
    }

    let mut pcm = Vec::with_capacity(left.len() * 4);
    for (l, r) in left.iter().zip(right) {
        pcm.extend_from_slice(&l.to_le_bytes());
        pcm.extend_from_slice(&r.to_le_bytes());
    }
    Ok(pcm)
}
