//! Engine-native status codes.
//!
//! The numeric values are stable and form part of the diagnostic surface:
//! they appear in log lines and can be round-tripped with `from_code`.

use core::fmt;

// ─────────────────────────────────────────────────────────────────────────────
// Compression status
// ─────────────────────────────────────────────────────────────────────────────

/// Result of one [`CompressEngine::step`](super::CompressEngine::step).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressStatus {
    /// Zero or more bytes consumed and/or produced.
    Ok,
    /// Flush code outside the supported set.
    InvalidFlush,
    /// Level outside `LEVEL_MIN..=LEVEL_MAX`.
    InvalidLevel,
    /// Level requires a larger workspace than the one supplied.
    InvalidLevelBuf,
    /// Container code outside the supported set.
    InvalidFormat,
    /// Engine-private state is inconsistent (engine bug or misuse).
    InvalidState,
}

impl CompressStatus {
    pub fn code(self) -> i32 {
        match self {
            CompressStatus::Ok => 0,
            CompressStatus::InvalidState => -3,
            CompressStatus::InvalidLevel => -4,
            CompressStatus::InvalidLevelBuf => -5,
            CompressStatus::InvalidFlush => -7,
            CompressStatus::InvalidFormat => -8,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(CompressStatus::Ok),
            -3 => Some(CompressStatus::InvalidState),
            -4 => Some(CompressStatus::InvalidLevel),
            -5 => Some(CompressStatus::InvalidLevelBuf),
            -7 => Some(CompressStatus::InvalidFlush),
            -8 => Some(CompressStatus::InvalidFormat),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CompressStatus::Ok => "COMP_OK",
            CompressStatus::InvalidFlush => "INVALID_FLUSH",
            CompressStatus::InvalidLevel => "INVALID_LEVEL",
            CompressStatus::InvalidLevelBuf => "INVALID_LEVEL_BUF",
            CompressStatus::InvalidFormat => "INVALID_FORMAT",
            CompressStatus::InvalidState => "INVALID_STATE",
        }
    }
}

impl fmt::Display for CompressStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.code())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Decompression status
// ─────────────────────────────────────────────────────────────────────────────

/// Result of one [`DecompressEngine::step`](super::DecompressEngine::step).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InflateStatus {
    /// Progress made; output space ran out or the stream finished.
    Ok,
    /// Every input byte was consumed and the stream is not finished yet.
    EndInput,
    /// Output window too small for a unit the decoder must emit whole.
    OutOverflow,
    InvalidBlock,
    InvalidSymbol,
    InvalidLookback,
    /// Bad container header (magic, method, reserved flags).
    InvalidWrapper,
    /// Container trailer or header checksum does not match.
    IncorrectChecksum,
}

impl InflateStatus {
    pub fn code(self) -> i32 {
        match self {
            InflateStatus::Ok => 0,
            InflateStatus::EndInput => 1,
            InflateStatus::OutOverflow => 2,
            InflateStatus::InvalidBlock => -1,
            InflateStatus::InvalidSymbol => -2,
            InflateStatus::InvalidLookback => -3,
            InflateStatus::InvalidWrapper => -4,
            InflateStatus::IncorrectChecksum => -6,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(InflateStatus::Ok),
            1 => Some(InflateStatus::EndInput),
            2 => Some(InflateStatus::OutOverflow),
            -1 => Some(InflateStatus::InvalidBlock),
            -2 => Some(InflateStatus::InvalidSymbol),
            -3 => Some(InflateStatus::InvalidLookback),
            -4 => Some(InflateStatus::InvalidWrapper),
            -6 => Some(InflateStatus::IncorrectChecksum),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            InflateStatus::Ok => "DECOMP_OK",
            InflateStatus::EndInput => "END_INPUT",
            InflateStatus::OutOverflow => "OUT_OVERFLOW",
            InflateStatus::InvalidBlock => "INVALID_BLOCK",
            InflateStatus::InvalidSymbol => "INVALID_SYMBOL",
            InflateStatus::InvalidLookback => "INVALID_LOOKBACK",
            InflateStatus::InvalidWrapper => "INVALID_WRAPPER",
            InflateStatus::IncorrectChecksum => "INCORRECT_CHECKSUM",
        }
    }

    /// `Ok` and `EndInput` both mean "advance the cursors".
    #[inline]
    pub fn is_progress(self) -> bool {
        matches!(self, InflateStatus::Ok | InflateStatus::EndInput)
    }
}

impl fmt::Display for InflateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.code())
    }
}
