//! Error taxonomy for compressor and decompressor sessions.
//!
//! Every failure a session can report falls in exactly one [`ErrorCategory`].
//! None of them is retried internally: configuration errors are fatal to the
//! session, data errors are fatal to the stream, usage errors are caller bugs.

use std::io;

use thiserror::Error;

// ─────────────────────────────────────────────────────────────────────────────
// Per-category error kinds
// ─────────────────────────────────────────────────────────────────────────────

/// Configuration rejected by the engine on the first step of a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid flush mode code {0}")]
    InvalidFlush(u32),
    #[error("invalid compression level {0}")]
    InvalidLevel(u32),
    #[error("level {level} needs a {need}-byte workspace, have {have}")]
    InvalidLevelBuf { level: u32, have: usize, need: usize },
    #[error("unsupported container format code {0}")]
    InvalidFormat(u32),
}

/// Malformed compressed stream or undersized output, reported by the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DataError {
    #[error("output buffer overflow")]
    OutputOverflow,
    #[error("invalid deflate block")]
    InvalidBlock,
    #[error("invalid huffman symbol")]
    InvalidSymbol,
    #[error("back-reference beyond decoded history")]
    InvalidLookback,
    #[error("invalid container wrapper")]
    InvalidWrapper,
    #[error("container checksum mismatch")]
    IncorrectChecksum,
}

/// Caller broke the session contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("step called on a finished session; reset it first")]
    StepAfterFinish,
    #[error("window offset {offset} + length {len} exceeds buffer capacity {capacity}")]
    WindowOutOfBounds {
        offset: usize,
        len: usize,
        capacity: usize,
    },
    #[error("engine state is inconsistent")]
    InvalidEngineState,
}

// ─────────────────────────────────────────────────────────────────────────────
// Crate error
// ─────────────────────────────────────────────────────────────────────────────

/// Coarse classification used by callers to pick a recovery policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad level / flush / container: discard and recreate the session.
    Configuration,
    /// Corrupt stream or undersized output: abandon this stream.
    StreamData,
    /// Workspace allocation failed at init: the session never existed.
    Resource,
    /// Programming error on the caller side.
    Usage,
    /// Failure of the reader/writer wrapped by a buffered adapter.
    Io,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("stream data error: {0}")]
    Data(#[from] DataError),
    #[error("failed to allocate {requested}-byte compression workspace")]
    ResourceExhausted { requested: usize },
    #[error("usage error: {0}")]
    Usage(#[from] UsageError),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Config(_) => ErrorCategory::Configuration,
            Error::Data(_) => ErrorCategory::StreamData,
            Error::ResourceExhausted { .. } => ErrorCategory::Resource,
            Error::Usage(_) => ErrorCategory::Usage,
            Error::Io(_) => ErrorCategory::Io,
        }
    }

    /// Nothing in this crate retries. Kept as an explicit query so callers
    /// building a retry policy on top have one place to ask.
    pub fn is_retryable(&self) -> bool {
        false
    }
}

impl From<Error> for io::Error {
    fn from(e: Error) -> Self {
        let kind = match &e {
            Error::Io(inner) => inner.kind(),
            Error::Data(_) => io::ErrorKind::InvalidData,
            Error::Config(_) => io::ErrorKind::InvalidInput,
            Error::ResourceExhausted { .. } => io::ErrorKind::OutOfMemory,
            Error::Usage(_) => io::ErrorKind::Other,
        };
        io::Error::new(kind, e)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
