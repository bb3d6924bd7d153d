//! Codec engine capability.
//!
//! A session never touches the bit-level codec directly. It fills the
//! cursor fields of a [`DeflateState`] / [`InflateState`], hands the engine
//! the input and output slices for one step, and reads the cursors and
//! counters back afterwards. The default engines are compile-time linked
//! against `flate2`; tests plug in scripted engines through the same traits.

pub mod deflate;
pub mod gzip;
pub mod inflate;
pub mod state;
pub mod status;

pub use deflate::DeflateEngine;
pub use inflate::InflateEngine;
pub use state::{
    workspace_size, BlockState, DeflateState, InflateState, ZState, CONTAINER_DEFLATE,
    CONTAINER_GZIP, CONTAINER_GZIP_NO_HDR, CONTAINER_ZLIB, FLUSH_FULL, FLUSH_NONE, FLUSH_SYNC,
    LEVEL_MAX, LEVEL_MIN, LVL1_WORKSPACE, LVL2_WORKSPACE, LVL3_WORKSPACE,
};
pub use status::{CompressStatus, InflateStatus};

/// Forward (encode) engine.
pub trait CompressEngine {
    /// Start a fresh stream: zero cursors, counters and machine state, keep
    /// the configuration codes already stored in `state`.
    fn init(&mut self, state: &mut DeflateState);

    /// Run one step.
    ///
    /// On entry `state.avail_in == next_in.len()`, `state.avail_out ==
    /// next_out.len()` and `state.end_of_stream` is set by the caller. On
    /// return the engine has written back `avail_in`/`avail_out` and added
    /// what it consumed and produced to `total_in`/`total_out`.
    ///
    /// `workspace` is scratch memory sized by level and owned by the session.
    /// Engines that keep no state outside `self` may ignore its contents, but
    /// must still reject a workspace shorter than the level requires.
    fn step(
        &mut self,
        state: &mut DeflateState,
        next_in: &[u8],
        next_out: &mut [u8],
        workspace: &mut [u8],
    ) -> CompressStatus;
}

/// Reverse (decode) engine.
pub trait DecompressEngine {
    fn init(&mut self, state: &mut InflateState);

    /// Run one step. Same cursor contract as [`CompressEngine::step`], except
    /// that only `total_out` is tracked.
    fn step(&mut self, state: &mut InflateState, next_in: &[u8], next_out: &mut [u8])
        -> InflateStatus;
}
