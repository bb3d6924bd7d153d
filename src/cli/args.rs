//! Command-line arguments for `sdflate`.
//!
//! Parsing is done by `clap`; [`Args::codec_config`] then layers the
//! settings in order of precedence: built-in defaults, environment
//! variables, `-C key=value` settings, and finally the dedicated flags.

use std::path::PathBuf;

use anyhow::{anyhow, Context};
use clap::{ArgAction, Parser};

use crate::cli::constants::{DISPLAY_LEVEL_MAX, STDIN_MARK, STDOUT_MARK};
use crate::config::CodecConfig;
use crate::session::{CompressionLevel, ContainerFormat, FlushMode};

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(
    name = "sdflate",
    about = "Streaming DEFLATE / gzip / zlib filter over fixed-size buffers",
    version
)]
pub struct Args {
    /// Input file; stdin when absent or `-`
    pub input: Option<String>,

    /// Output file; stdout when absent or `-`
    pub output: Option<String>,

    /// Decompress instead of compressing
    #[arg(short, long)]
    pub decompress: bool,

    /// Compression level: 0-3, `min` or `max`
    #[arg(short = 'l', long)]
    pub level: Option<CompressionLevel>,

    /// Container format: deflate, gzip, gzip-no-header or zlib
    #[arg(long)]
    pub container: Option<ContainerFormat>,

    /// Flush mode applied after every step: none, sync or full
    #[arg(long)]
    pub flush: Option<FlushMode>,

    /// Staging buffer size in bytes
    #[arg(short = 'B', long = "buffer-size")]
    pub buffer_size: Option<usize>,

    /// Extra `key=value` setting (e.g. compress.level=2); may be repeated
    #[arg(short = 'C', long = "config", value_name = "KEY=VALUE")]
    pub settings: Vec<String>,

    /// Increase verbosity; may be repeated
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Decrease verbosity; may be repeated
    #[arg(short, long, action = ArgAction::Count)]
    pub quiet: u8,
}

impl Args {
    /// Display level after applying `-v` / `-q` to the default of 2.
    pub fn display_level(&self) -> u32 {
        (2 + u32::from(self.verbose))
            .saturating_sub(u32::from(self.quiet))
            .min(DISPLAY_LEVEL_MAX)
    }

    /// Resolve the codec configuration, starting from `base`.
    pub fn codec_config(&self, base: CodecConfig) -> anyhow::Result<CodecConfig> {
        let mut config = base;
        for setting in &self.settings {
            let (key, value) = setting
                .split_once('=')
                .ok_or_else(|| anyhow!("bad usage: expected KEY=VALUE, got '{setting}'"))?;
            config
                .set(key.trim(), value.trim())
                .with_context(|| format!("bad usage: -C {setting}"))?;
        }
        if let Some(level) = self.level {
            config.level = level;
        }
        if let Some(container) = self.container {
            config.container = container;
        }
        if let Some(flush) = self.flush {
            config.flush = flush;
        }
        if let Some(size) = self.buffer_size {
            if size == 0 {
                return Err(anyhow!("bad usage: buffer size must be positive"));
            }
            config.buffer_size = size;
        }
        Ok(config)
    }

    /// Input path, or `None` for stdin.
    pub fn input_path(&self) -> Option<PathBuf> {
        stream_path(self.input.as_deref(), STDIN_MARK)
    }

    /// Output path, or `None` for stdout.
    pub fn output_path(&self) -> Option<PathBuf> {
        stream_path(self.output.as_deref(), STDOUT_MARK)
    }
}

fn stream_path(name: Option<&str>, mark: &str) -> Option<PathBuf> {
    match name {
        None | Some("-") => None,
        Some(n) if n == mark => None,
        Some(n) => Some(PathBuf::from(n)),
    }
}
