//! Streaming resampling over `io::Read`.

use std::io::{self, Read};

use tracing::debug;

use crate::error::{Error, Result};
use crate::format::Format;
use crate::resampler::{Resampler, WINDOW};
use crate::stereo;

/// Default number of source frames read per block.
pub const DEFAULT_CHUNK_FRAMES: usize = 1024;

/// Reads s16le PCM in `src_fmt` from an inner reader and yields it in
/// `dst_fmt`.
///
/// Supports rate conversion and mono to stereo conversion. Input that is
/// too short for a spline window when the source ends is discarded.
pub struct ResampleReader<R: Read> {
    /// Source reader.
    src: R,
    /// Source format.
    src_fmt: Format,
    /// Destination format.
    dst_fmt: Format,
    resampler: Resampler,
    /// Source frames per block.
    chunk_frames: usize,
    /// Read buffer for source data.
    read_buf: Vec<u8>,
    /// Converted output not yet returned.
    leftover: Vec<u8>,
    eof: bool,
}

impl<R: Read> ResampleReader<R> {
    /// Creates a reader converting `src` from `src_fmt` to `dst_fmt`.
    ///
    /// Stereo to mono conversion is not supported.
    pub fn new(src: R, src_fmt: Format, dst_fmt: Format) -> Result<Self> {
        if src_fmt.stereo && !dst_fmt.stereo {
            return Err(Error::InvalidConfiguration(
                "stereo to mono conversion not supported".into(),
            ));
        }

        let resampler = Resampler::with_format(src_fmt, dst_fmt.sample_rate)?;
        Ok(Self {
            src,
            src_fmt,
            dst_fmt,
            resampler,
            chunk_frames: DEFAULT_CHUNK_FRAMES,
            read_buf: Vec::new(),
            leftover: Vec::new(),
            eof: false,
        })
    }

    /// Sets the number of source frames read per block (at least 4).
    pub fn with_chunk_frames(mut self, chunk_frames: usize) -> Self {
        self.chunk_frames = chunk_frames.max(WINDOW);
        self
    }

    /// Gets the source format.
    pub fn src_format(&self) -> Format {
        self.src_fmt
    }

    /// Gets the destination format.
    pub fn dst_format(&self) -> Format {
        self.dst_fmt
    }

    /// Returns the inner reader.
    pub fn into_inner(self) -> R {
        self.src
    }

    /// Reads one full block from the source and converts it into `leftover`.
    ///
    /// Short reads are gathered until the block is full, so the output does
    /// not depend on how the source splits its data. Only the last block
    /// before EOF may be partial.
    fn fill(&mut self) -> io::Result<()> {
        let block = self.chunk_frames * self.src_fmt.sample_bytes();
        self.read_buf.resize(block, 0);

        let mut filled = 0;
        while filled < block {
            match self.src.read(&mut self.read_buf[filled..]) {
                Ok(0) => {
                    self.eof = true;
                    break;
                }
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }

        if filled > 0 {
            let pcm = self.resampler.push(&self.read_buf[..filled])?;
            if !pcm.is_empty() {
                if self.src_fmt.stereo == self.dst_fmt.stereo {
                    self.leftover.extend_from_slice(&pcm);
                } else {
                    self.leftover.extend(stereo::mono_to_stereo_vec(&pcm)?);
                }
            }
        }

        if self.eof {
            let dropped = self.resampler.discard_pending();
            if dropped > 0 {
                debug!(bytes = dropped, "resample reader: discarding incomplete tail");
            }
        }
        Ok(())
    }
}

impl<R: Read> Read for ResampleReader<R> {
    /// Reads converted PCM into `buf`, returning whole destination frames.
    /// Returns `io::ErrorKind::InvalidInput` if `buf` cannot hold one frame.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        let frame = self.dst_fmt.sample_bytes();
        if buf.len() < frame {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "buffer too small",
            ));
        }

        loop {
            if !self.leftover.is_empty() {
                let n = std::cmp::min(buf.len() / frame * frame, self.leftover.len());
                buf[..n].copy_from_slice(&self.leftover[..n]);
                self.leftover.drain(..n);
                return Ok(n);
            }

            if self.eof {
                return Ok(0);
            }

            self.fill()?;
        }
    }
}
