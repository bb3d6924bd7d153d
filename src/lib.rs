// streamdeflate — streaming DEFLATE compressor/decompressor sessions

pub mod engine;
pub mod error;
pub mod session;
pub mod config;
pub mod io;
pub mod cli;

// ── Version constants ─────────────────────────────────────────────────────────
pub const VERSION_MAJOR: u32 = 0;
pub const VERSION_MINOR: u32 = 3;
pub const VERSION_RELEASE: u32 = 0;
pub const VERSION_NUMBER: u32 = VERSION_MAJOR * 100 * 100 + VERSION_MINOR * 100 + VERSION_RELEASE;
pub const VERSION_STRING: &str = env!("CARGO_PKG_VERSION");

pub fn version_number() -> u32 {
    VERSION_NUMBER
}

pub fn version_string() -> &'static str {
    VERSION_STRING
}

// ── Top-level re-exports ──────────────────────────────────────────────────────
pub use config::CodecConfig;
pub use error::{ConfigError, DataError, Error, ErrorCategory, Result, UsageError};
pub use io::{compress_to_vec, decompress_to_vec, CompressWriter, DecompressReader};
pub use session::{
    CompressionLevel, CompressorSession, ContainerFormat, DecompressorSession, FlushMode,
    InputWindow,
};
