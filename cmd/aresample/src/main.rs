//! aresample CLI - resample raw s16le PCM.
//!
//! Reads headerless PCM from a file or stdin and writes the converted PCM to
//! a file or stdout.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::PathBuf;

use anyhow::Context;
use aresample::ResampleReader;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod config;

use config::Config;

/// aresample CLI - resample raw s16le PCM.
///
/// Converts 16-bit little-endian PCM between sample rates with a streaming
/// cubic spline, and optionally duplicates mono into stereo.
///
/// Example:
///   aresample --rate-in 16000 --rate-out 48000 -i voice.pcm -o voice48k.pcm
#[derive(Parser)]
#[command(name = "aresample")]
#[command(about = "Resample raw s16le PCM")]
#[command(version)]
pub struct Cli {
    /// Config file (YAML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Input file (default: stdin)
    #[arg(short = 'i', long)]
    pub input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Input channels (1 or 2)
    #[arg(short = 'c', long)]
    pub channels: Option<usize>,

    /// Input sample rate in Hz
    #[arg(long)]
    pub rate_in: Option<u32>,

    /// Output sample rate in Hz
    #[arg(long)]
    pub rate_out: Option<u32>,

    /// Duplicate mono input into stereo output
    #[arg(long)]
    pub stereo: bool,

    /// Input frames per resample call
    #[arg(long)]
    pub chunk_frames: Option<usize>,

    /// Verbose output
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl Cli {
    /// Values given on the command line, as a config layer.
    fn overrides(&self) -> Config {
        Config {
            channels: self.channels,
            rate_in: self.rate_in,
            rate_out: self.rate_out,
            stereo: self.stereo.then_some(true),
            chunk_frames: self.chunk_frames,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging; stdout may carry PCM
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let file_config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let settings = file_config.merge(cli.overrides()).resolve()?;
    debug!(?settings, "resolved settings");

    let input: Box<dyn Read> = match &cli.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("open input {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };
    let mut output: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("create output {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    let mut reader = ResampleReader::new(input, settings.src, settings.dst)
        .context("create resampler")?
        .with_chunk_frames(settings.chunk_frames);

    let written = pump(&mut reader, &mut output)?;
    output.flush().context("flush output")?;

    info!(
        bytes = written,
        rate_in = settings.src.sample_rate,
        rate_out = settings.dst.sample_rate,
        "resample done"
    );
    Ok(())
}

/// Copies all converted PCM from `reader` to `w`, returning the byte count.
fn pump<R: Read, W: Write + ?Sized>(reader: &mut R, w: &mut W) -> anyhow::Result<u64> {
    let mut buf = [0u8; 8192];
    let mut written = 0u64;
    loop {
        let n = reader.read(&mut buf).context("resample input")?;
        if n == 0 {
            return Ok(written);
        }
        w.write_all(&buf[..n]).context("write output")?;
        written += n as u64;
    }
}
