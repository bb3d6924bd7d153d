//! Mapping from engine-native status codes onto the crate error type.
//!
//! `Ok(())` means progress: the caller reconciles cursors and counters.
//! Everything else is surfaced once, from the step that detected it.

use crate::engine::state::{workspace_size, DeflateState};
use crate::engine::status::{CompressStatus, InflateStatus};
use crate::error::{ConfigError, DataError, Error, Result, UsageError};

/// Translate a compression status. `state` supplies the offending
/// configuration value for the error message.
pub fn map_compress_status(
    status: CompressStatus,
    state: &DeflateState,
    workspace_len: usize,
) -> Result<()> {
    let err: Error = match status {
        CompressStatus::Ok => return Ok(()),
        CompressStatus::InvalidFlush => ConfigError::InvalidFlush(state.flush).into(),
        CompressStatus::InvalidLevel => ConfigError::InvalidLevel(state.level).into(),
        CompressStatus::InvalidLevelBuf => ConfigError::InvalidLevelBuf {
            level: state.level,
            have: workspace_len,
            need: workspace_size(state.level),
        }
        .into(),
        CompressStatus::InvalidFormat => ConfigError::InvalidFormat(state.container).into(),
        CompressStatus::InvalidState => UsageError::InvalidEngineState.into(),
    };
    Err(err)
}

/// Translate a decompression status. `EndInput` is progress, same as `Ok`.
pub fn map_inflate_status(status: InflateStatus) -> Result<()> {
    let err = match status {
        InflateStatus::Ok | InflateStatus::EndInput => return Ok(()),
        InflateStatus::OutOverflow => DataError::OutputOverflow,
        InflateStatus::InvalidBlock => DataError::InvalidBlock,
        InflateStatus::InvalidSymbol => DataError::InvalidSymbol,
        InflateStatus::InvalidLookback => DataError::InvalidLookback,
        InflateStatus::InvalidWrapper => DataError::InvalidWrapper,
        InflateStatus::IncorrectChecksum => DataError::IncorrectChecksum,
    };
    Err(err.into())
}
