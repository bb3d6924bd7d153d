//! Caller-facing session types: the input window and typed configuration.

use core::fmt;
use core::str::FromStr;

use crate::engine::state::{
    CONTAINER_DEFLATE, CONTAINER_GZIP, CONTAINER_GZIP_NO_HDR, CONTAINER_ZLIB, FLUSH_FULL,
    FLUSH_NONE, FLUSH_SYNC,
};
use crate::error::UsageError;

// ─────────────────────────────────────────────────────────────────────────────
// InputWindow
// ─────────────────────────────────────────────────────────────────────────────

/// A caller-owned input buffer plus the `offset`/`length` pair describing the
/// bytes not consumed yet.
///
/// Invariant: `offset + len <= buf.len()`. Steps only ever move `offset`
/// forward and shrink `len` by the same amount.
#[derive(Debug, Clone, Copy)]
pub struct InputWindow<'a> {
    buf: &'a [u8],
    offset: usize,
    len: usize,
}

impl<'a> InputWindow<'a> {
    /// Window over the whole of `buf`.
    pub fn new(buf: &'a [u8]) -> Self {
        InputWindow {
            buf,
            offset: 0,
            len: buf.len(),
        }
    }

    /// Window over `buf[offset..offset + len]`.
    pub fn with_bounds(buf: &'a [u8], offset: usize, len: usize) -> Result<Self, UsageError> {
        match offset.checked_add(len) {
            Some(end) if end <= buf.len() => Ok(InputWindow { buf, offset, len }),
            _ => Err(UsageError::WindowOutOfBounds {
                offset,
                len,
                capacity: buf.len(),
            }),
        }
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Bytes still valid starting at [`offset`](Self::offset).
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// The unconsumed bytes.
    #[inline]
    pub fn remaining(&self) -> &'a [u8] {
        &self.buf[self.offset..self.offset + self.len]
    }

    /// Mark `n` bytes as consumed. `n` is clamped to the current length.
    pub(crate) fn advance(&mut self, n: usize) {
        let n = n.min(self.len);
        self.offset += n;
        self.len -= n;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Typed configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Error returned when a configuration name cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNameError {
    pub kind: &'static str,
    pub value: String,
}

impl fmt::Display for ParseNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} '{}'", self.kind, self.value)
    }
}

impl std::error::Error for ParseNameError {}

/// Compression effort. Levels above 0 need an auxiliary workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, PartialOrd, Ord)]
pub enum CompressionLevel {
    Level0,
    #[default]
    Level1,
    Level2,
    Level3,
}

impl CompressionLevel {
    pub const MIN: CompressionLevel = CompressionLevel::Level0;
    pub const MAX: CompressionLevel = CompressionLevel::Level3;

    pub fn code(self) -> u32 {
        match self {
            CompressionLevel::Level0 => 0,
            CompressionLevel::Level1 => 1,
            CompressionLevel::Level2 => 2,
            CompressionLevel::Level3 => 3,
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(CompressionLevel::Level0),
            1 => Some(CompressionLevel::Level1),
            2 => Some(CompressionLevel::Level2),
            3 => Some(CompressionLevel::Level3),
            _ => None,
        }
    }
}

impl FromStr for CompressionLevel {
    type Err = ParseNameError;

    /// Accepts `0`..`3`, `min` and `max`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseNameError {
            kind: "compression level",
            value: s.to_owned(),
        };
        match s.trim().to_ascii_lowercase().as_str() {
            "min" => Ok(CompressionLevel::MIN),
            "max" => Ok(CompressionLevel::MAX),
            other => other
                .parse::<u32>()
                .ok()
                .and_then(CompressionLevel::from_code)
                .ok_or_else(err),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlushMode {
    /// Let the encoder buffer freely.
    #[default]
    None,
    /// Byte-align and emit everything so far after every step.
    Sync,
    /// As `Sync`, and also reset the match history.
    Full,
}

impl FlushMode {
    pub fn code(self) -> u32 {
        match self {
            FlushMode::None => FLUSH_NONE,
            FlushMode::Sync => FLUSH_SYNC,
            FlushMode::Full => FLUSH_FULL,
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            FLUSH_NONE => Some(FlushMode::None),
            FLUSH_SYNC => Some(FlushMode::Sync),
            FLUSH_FULL => Some(FlushMode::Full),
            _ => None,
        }
    }
}

impl FromStr for FlushMode {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "no" => Ok(FlushMode::None),
            "sync" => Ok(FlushMode::Sync),
            "full" => Ok(FlushMode::Full),
            _ => Err(ParseNameError {
                kind: "flush mode",
                value: s.to_owned(),
            }),
        }
    }
}

/// Framing around the DEFLATE body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContainerFormat {
    #[default]
    Deflate,
    Gzip,
    /// gzip body and trailer with the 10-byte header left out.
    GzipNoHeader,
    Zlib,
}

impl ContainerFormat {
    pub fn code(self) -> u32 {
        match self {
            ContainerFormat::Deflate => CONTAINER_DEFLATE,
            ContainerFormat::Gzip => CONTAINER_GZIP,
            ContainerFormat::GzipNoHeader => CONTAINER_GZIP_NO_HDR,
            ContainerFormat::Zlib => CONTAINER_ZLIB,
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            CONTAINER_DEFLATE => Some(ContainerFormat::Deflate),
            CONTAINER_GZIP => Some(ContainerFormat::Gzip),
            CONTAINER_GZIP_NO_HDR => Some(ContainerFormat::GzipNoHeader),
            CONTAINER_ZLIB => Some(ContainerFormat::Zlib),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ContainerFormat::Deflate => "deflate",
            ContainerFormat::Gzip => "gzip",
            ContainerFormat::GzipNoHeader => "gzip-no-header",
            ContainerFormat::Zlib => "zlib",
        }
    }
}

impl fmt::Display for ContainerFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ContainerFormat {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "deflate" | "raw" => Ok(ContainerFormat::Deflate),
            "gzip" | "gz" => Ok(ContainerFormat::Gzip),
            "gzip-no-header" | "gzip_no_hdr" => Ok(ContainerFormat::GzipNoHeader),
            "zlib" => Ok(ContainerFormat::Zlib),
            _ => Err(ParseNameError {
                kind: "container format",
                value: s.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_bounds_are_checked() {
        let buf = [0u8; 8];
        assert!(InputWindow::with_bounds(&buf, 2, 6).is_ok());
        assert_eq!(
            InputWindow::with_bounds(&buf, 4, 5).unwrap_err(),
            UsageError::WindowOutOfBounds {
                offset: 4,
                len: 5,
                capacity: 8
            }
        );
        assert!(InputWindow::with_bounds(&buf, usize::MAX, 2).is_err());
    }

    #[test]
    fn advance_moves_offset_and_shrinks_len() {
        let buf = *b"abcdef";
        let mut w = InputWindow::with_bounds(&buf, 1, 4).unwrap();
        assert_eq!(w.remaining(), b"bcde");
        w.advance(3);
        assert_eq!((w.offset(), w.len()), (4, 1));
        assert_eq!(w.remaining(), b"e");
        w.advance(10);
        assert!(w.is_empty());
        assert_eq!(w.offset(), 5);
    }

    #[test]
    fn level_names_parse() {
        assert_eq!("min".parse(), Ok(CompressionLevel::Level0));
        assert_eq!("MAX".parse(), Ok(CompressionLevel::Level3));
        assert_eq!("2".parse(), Ok(CompressionLevel::Level2));
        assert!("4".parse::<CompressionLevel>().is_err());
        assert_eq!(CompressionLevel::default().code(), 1);
    }

    #[test]
    fn codes_match_engine_constants() {
        for c in 0..4 {
            assert_eq!(ContainerFormat::from_code(c).map(ContainerFormat::code), Some(c));
        }
        for f in 0..3 {
            assert_eq!(FlushMode::from_code(f).map(FlushMode::code), Some(f));
        }
        assert!(ContainerFormat::from_code(4).is_none());
        assert_eq!("gzip-no-header".parse(), Ok(ContainerFormat::GzipNoHeader));
        assert_eq!(ContainerFormat::Zlib.to_string(), "zlib");
    }
}
