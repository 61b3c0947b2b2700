//! Sample rate conversion for s16le PCM.
//!
//! This crate converts 16-bit little-endian PCM between sample rates and
//! from mono to stereo:
//!
//! - [`Resampler`]: streaming cubic-spline resampler for mono or stereo PCM,
//!   keeping the output clock continuous across chunked input
//! - [`mono_to_stereo`]: energy-preserving mono to stereo duplication
//! - [`ResampleReader`]: `io::Read` adapter over both
//!
//! There is no anti-aliasing filter; this is a lightweight converter for
//! speech pipelines, not a mastering-grade resampler.
//!
//! # Example
//!
//! ```rust
//! use aresample::Resampler;
//!
//! let mut resampler = Resampler::new(1, 16000, 32000)?;
//!
//! // 4 samples of s16le mono
//! let pcm = [0x11, 0x00, 0x09, 0x00, 0x21, 0x00, 0x05, 0x00];
//! let npcm = resampler.resample(&pcm)?;
//! assert_eq!(npcm.len(), 2 * 7);
//! # Ok::<(), aresample::Error>(())
//! ```

pub mod codec;
mod error;
mod format;
pub mod planner;
mod reader;
mod resampler;
pub mod spline;
mod stereo;

pub use error::{Error, Result};
pub use format::Format;
pub use reader::{DEFAULT_CHUNK_FRAMES, ResampleReader};
pub use resampler::{Resample, Resampler, WINDOW};
pub use spline::{NaturalSpline, spline};
pub use stereo::{mono_to_stereo, mono_to_stereo_vec};
