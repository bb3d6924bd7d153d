//! Compressor session: drives a [`CompressEngine`] one bounded step at a time.

use log::{debug, trace, warn};

use crate::engine::state::{workspace_size, DeflateState};
use crate::engine::{CompressEngine, DeflateEngine};
use crate::error::{Error, Result, UsageError};
use crate::session::taxonomy::map_compress_status;
use crate::session::types::{CompressionLevel, ContainerFormat, FlushMode, InputWindow};

/// Allocate a zeroed workspace, reporting failure instead of aborting.
fn alloc_workspace(size: usize) -> Result<Vec<u8>> {
    let mut ws = Vec::new();
    ws.try_reserve_exact(size)
        .map_err(|_| Error::ResourceExhausted { requested: size })?;
    ws.resize(size, 0);
    Ok(ws)
}

/// One compression stream over caller-owned input and output windows.
///
/// The session owns its engine state and auxiliary workspace exclusively.
/// Configuration is fixed at construction and checked by the engine on the
/// first step; a rejected configuration fails every step until the session
/// is dropped.
#[derive(Debug)]
pub struct CompressorSession<E: CompressEngine = DeflateEngine> {
    engine: E,
    state: DeflateState,
    /// Level-sized scratch space lent to the engine on every step. The
    /// default engine only checks its length.
    workspace: Vec<u8>,
    finished: bool,
}

impl CompressorSession<DeflateEngine> {
    /// Create a session backed by the default engine.
    pub fn init(level: CompressionLevel, flush: FlushMode, container: ContainerFormat) -> Result<Self> {
        Self::init_raw(level.code(), flush.code(), container.code())
    }

    /// Create a session from raw configuration codes. Unknown codes are
    /// accepted here and rejected by the engine on the first step.
    pub fn init_raw(level: u32, flush: u32, container: u32) -> Result<Self> {
        CompressorSession::with_engine(DeflateEngine::new(), level, flush, container)
    }
}

impl<E: CompressEngine> CompressorSession<E> {
    /// Create a session around `engine`, allocating the workspace `level` needs.
    pub fn with_engine(engine: E, level: u32, flush: u32, container: u32) -> Result<Self> {
        let workspace = alloc_workspace(workspace_size(level))?;
        Ok(Self::from_parts(engine, DeflateState::new(level, flush, container), workspace))
    }

    /// Create a session around `engine` with a caller-supplied workspace.
    pub fn from_parts(mut engine: E, mut state: DeflateState, workspace: Vec<u8>) -> Self {
        engine.init(&mut state);
        debug!(
            "compressor init: level={} flush={} container={} workspace={}",
            state.level,
            state.flush,
            state.container,
            workspace.len()
        );
        CompressorSession {
            engine,
            state,
            workspace,
            finished: false,
        }
    }

    /// Run one engine step.
    ///
    /// Consumes from `input` (advancing its offset by exactly what the engine
    /// took) and writes compressed bytes from the start of `output`. Returns
    /// the number of bytes written. `end_of_stream` must be set on the call
    /// carrying the last input chunk and on every call after it until
    /// [`is_finished`](Self::is_finished) turns true. An empty `input` is
    /// allowed and drains output the engine still holds.
    ///
    /// On error `input` is left untouched.
    pub fn compress_step(
        &mut self,
        input: &mut InputWindow<'_>,
        output: &mut [u8],
        end_of_stream: bool,
    ) -> Result<usize> {
        if self.finished {
            return Err(UsageError::StepAfterFinish.into());
        }
        let next_in = input.remaining();
        self.state.avail_in = next_in.len();
        self.state.avail_out = output.len();
        self.state.end_of_stream = end_of_stream;

        let status = self
            .engine
            .step(&mut self.state, next_in, output, &mut self.workspace);
        if let Err(e) = map_compress_status(status, &self.state, self.workspace.len()) {
            warn!("compress step rejected: {status}: {e}");
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
        trace!(
            "compress step: in={consumed} out={produced} eos={end_of_stream} state={:?}",
            self.state.state
        );

        if self.state.is_terminal() {
            self.finished = true;
            debug!(
                "compressor finished: total_in={} total_out={}",
                self.state.total_in, self.state.total_out
            );
        }
        Ok(produced)
    }

    /// Input bytes consumed since the last init or reset.
    #[inline]
    pub fn bytes_read(&self) -> u64 {
        self.state.total_in
    }

    /// Output bytes produced since the last init or reset, framing included.
    #[inline]
    pub fn bytes_written(&self) -> u64 {
        self.state.total_out
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Start a new independent stream with the same configuration and workspace.
    pub fn reset(&mut self) {
        self.engine.init(&mut self.state);
        self.finished = false;
        debug!("compressor reset");
    }

    /// Release the session and its workspace.
    pub fn end(self) {
        debug!(
            "compressor end: total_in={} total_out={} finished={}",
            self.state.total_in, self.state.total_out, self.finished
        );
    }

    pub fn level(&self) -> u32 {
        self.state.level
    }

    pub fn flush_mode(&self) -> u32 {
        self.state.flush
    }

    pub fn container(&self) -> u32 {
        self.state.container
    }

    pub fn workspace_len(&self) -> usize {
        self.workspace.len()
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }
}
