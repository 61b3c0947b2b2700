//! Resampling settings from a YAML file and the command line.
//!
//! Every key is optional; command-line flags override the file.
//!
//! ```yaml
//! channels: 1
//! rate_in: 16000
//! rate_out: 48000
//! stereo: true
//! chunk_frames: 320
//! ```

use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use aresample::{DEFAULT_CHUNK_FRAMES, Format};
use serde::{Deserialize, Serialize};

/// Resampling configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Input channels, 1 or 2 (default 1).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channels: Option<usize>,

    /// Input sample rate in Hz.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_in: Option<u32>,

    /// Output sample rate in Hz.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_out: Option<u32>,

    /// Duplicate mono input into stereo output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stereo: Option<bool>,

    /// Input frames per resample call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_frames: Option<usize>,
}

/// Validated settings for one conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub src: Format,
    pub dst: Format,
    pub chunk_frames: usize,
}

impl Config {
    /// Parses a YAML document.
    pub fn from_yaml(s: &str) -> Result<Self> {
        serde_yaml::from_str(s).context("parse config")
    }

    /// Loads a YAML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        Self::from_yaml(&data).with_context(|| format!("load config {}", path.display()))
    }

    /// Returns `self` with every value set in `over` replaced.
    pub fn merge(self, over: Config) -> Config {
        Config {
            channels: over.channels.or(self.channels),
            rate_in: over.rate_in.or(self.rate_in),
            rate_out: over.rate_out.or(self.rate_out),
            stereo: over.stereo.or(self.stereo),
            chunk_frames: over.chunk_frames.or(self.chunk_frames),
        }
    }

    /// Validates the config into settings.
    pub fn resolve(&self) -> Result<Settings> {
        let channels = self.channels.unwrap_or(1);
        let rate_in = self
            .rate_in
            .ok_or_else(|| anyhow!("input sample rate is required (--rate-in)"))?;
        let rate_out = self
            .rate_out
            .ok_or_else(|| anyhow!("output sample rate is required (--rate-out)"))?;
        if rate_in == 0 || rate_out == 0 {
            bail!("sample rates must be positive, got {rate_in} -> {rate_out}");
        }

        let src = Format::with_channels(rate_in, channels)
            .ok_or_else(|| anyhow!("invalid channels={channels}, must be 1 or 2"))?;
        let dst = Format {
            sample_rate: rate_out,
            stereo: src.stereo || self.stereo.unwrap_or(false),
        };

        let chunk_frames = self.chunk_frames.unwrap_or(DEFAULT_CHUNK_FRAMES);
        if chunk_frames == 0 {
            bail!("chunk_frames must be positive");
        }

        Ok(Settings {
            src,
            dst,
            chunk_frames,
        })
    }
}
