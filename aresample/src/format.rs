//! PCM stream format.

/// Describes an s16le PCM stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Format {
    /// Sample rate in Hz (e.g., 16000, 44100).
    pub sample_rate: u32,
    /// True for stereo (2 channels), false for mono (1 channel).
    pub stereo: bool,
}

impl Format {
    /// Creates a mono format with the given sample rate.
    pub const fn mono(sample_rate: u32) -> Self {
        Self { sample_rate, stereo: false }
    }

    /// Creates a stereo format with the given sample rate.
    pub const fn stereo(sample_rate: u32) -> Self {
        Self { sample_rate, stereo: true }
    }

    /// Builds a format from a channel count, which must be 1 or 2.
    pub const fn with_channels(sample_rate: u32, channels: usize) -> Option<Self> {
        match channels {
            1 => Some(Self::mono(sample_rate)),
            2 => Some(Self::stereo(sample_rate)),
            _ => None,
        }
    }

    /// Returns the number of channels (1 for mono, 2 for stereo).
    pub fn channels(&self) -> usize {
        if self.stereo { 2 } else { 1 }
    }

    /// Returns the number of bytes per frame: 2 for mono, 4 for stereo.
    pub fn sample_bytes(&self) -> usize {
        2 * self.channels()
    }
}

// Common format presets
impl Format {
    /// 16kHz mono
    pub const MONO_16K: Format = Format::mono(16000);
    /// 44.1kHz stereo (CD quality)
    pub const STEREO_44K: Format = Format::stereo(44100);
    /// 48kHz stereo
    pub const STEREO_48K: Format = Format::stereo(48000);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_channels() {
        assert_eq!(Format::mono(16000).channels(), 1);
        assert_eq!(Format::stereo(48000).channels(), 2);
    }

    #[test]
    fn test_format_sample_bytes() {
        assert_eq!(Format::mono(16000).sample_bytes(), 2);
        assert_eq!(Format::stereo(48000).sample_bytes(), 4);
    }

    #[test]
    fn test_format_with_channels() {
        assert_eq!(Format::with_channels(8000, 1), Some(Format::mono(8000)));
        assert_eq!(Format::with_channels(8000, 2), Some(Format::stereo(8000)));
        assert_eq!(Format::with_channels(8000, 0), None);
        assert_eq!(Format::with_channels(8000, 3), None);
    }

    #[test]
    fn test_format_presets_match_constructors() {
        assert_eq!(Format::MONO_16K, Format::with_channels(16000, 1).unwrap());
        assert_eq!(Format::STEREO_44K, Format::with_channels(44100, 2).unwrap());
        assert_eq!(Format::STEREO_48K.sample_bytes(), 4);
    }
}
