//! Decompressor session: the inverse of [`CompressorSession`](super::CompressorSession).

use log::{debug, trace, warn};

use crate::engine::state::InflateState;
use crate::engine::{DecompressEngine, InflateEngine};
use crate::error::{Result, UsageError};
use crate::session::taxonomy::map_inflate_status;
use crate::session::types::{ContainerFormat, InputWindow};

/// One decompression stream.
///
/// There is no end-of-stream flag on this side: the session is finished
/// exactly when the engine reaches its terminal block state.
#[derive(Debug)]
pub struct DecompressorSession<E: DecompressEngine = InflateEngine> {
    engine: E,
    state: InflateState,
    finished: bool,
}

impl DecompressorSession<InflateEngine> {
    pub fn init(container: ContainerFormat) -> Self {
        Self::init_raw(container.code())
    }

    /// Session for a raw container code; an unknown code is reported by the
    /// first step as an invalid wrapper.
    pub fn init_raw(container: u32) -> Self {
        DecompressorSession::with_engine(InflateEngine::new(), container)
    }
}

impl<E: DecompressEngine> DecompressorSession<E> {
    pub fn with_engine(mut engine: E, container: u32) -> Self {
        let mut state = InflateState::new(container);
        engine.init(&mut state);
        debug!("decompressor init: container={container}");
        DecompressorSession {
            engine,
            state,
            finished: false,
        }
    }

    /// Run one engine step, writing decoded bytes from the start of `output`.
    ///
    /// Returns the number of bytes written. The terminal block state is
    /// checked before the status, so a step that both finishes the stream and
    /// reports end of input still marks the session finished. End of input on
    /// its own never does.
    ///
    /// On error `input` is left untouched; counters stay readable.
    pub fn decompress_step(&mut self, input: &mut InputWindow<'_>, output: &mut [u8]) -> Result<usize> {
        if self.finished {
            return Err(UsageError::StepAfterFinish.into());
        }
        let next_in = input.remaining();
        self.state.avail_in = next_in.len();
        self.state.avail_out = output.len();

        let status = self.engine.step(&mut self.state, next_in, output);
        if self.state.is_terminal() {
            self.finished = true;
            debug!("decompressor finished: total_out={}", self.state.total_out);
        }
        if let Err(e) = map_inflate_status(status) {
            warn!("decompress step failed: {status}: {e}");
            self.state.avail_in = next_in.len();
            return Err(e);
        }
        if self.state.avail_in > next_in.len() || self.state.avail_out > output.len() {
            warn!(
                "engine cursors out of range: avail_in={} avail_out={}",
                self.state.avail_in, self.state.avail_out
            );
            self.state.avail_in = next_in.len();
            return Err(UsageError::InvalidEngineState.into());
        }

        let consumed = next_in.len() - self.state.avail_in;
        let produced = output.len() - self.state.avail_out;
        input.advance(consumed);
        trace!("decompress step: in={consumed} out={produced} status={status}");
        Ok(produced)
    }

    /// Input bytes the last step left unconsumed.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.state.avail_in
    }

    /// Decoded bytes produced since the last init or reset.
    #[inline]
    pub fn bytes_written(&self) -> u64 {
        self.state.total_out
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn reset(&mut self) {
        self.engine.init(&mut self.state);
        self.finished = false;
        debug!("decompressor reset");
    }

    pub fn end(self) {
        debug!(
            "decompressor end: total_out={} finished={}",
            self.state.total_out, self.finished
        );
    }

    pub fn container(&self) -> u32 {
        self.state.container
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }
}
