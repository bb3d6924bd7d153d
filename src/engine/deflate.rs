//! Compile-time-linked compression engine: `flate2` raw DEFLATE with
//! container framing layered on top.

use crc32fast::Hasher;
use flate2::{Compress, Compression, FlushCompress, Status};

use crate::engine::gzip::{self, Pending};
use crate::engine::state::{
    workspace_size, DeflateState, ZState, CONTAINER_DEFLATE, CONTAINER_GZIP,
    CONTAINER_GZIP_NO_HDR, CONTAINER_ZLIB, FLUSH_FULL, FLUSH_NONE, FLUSH_SYNC, LEVEL_MAX,
};
use crate::engine::status::CompressStatus;
use crate::engine::CompressEngine;

/// Encoder effort used for each session level.
fn effort(level: u32) -> Compression {
    match level {
        0 => Compression::new(1),
        1 => Compression::new(6),
        2 => Compression::new(8),
        _ => Compression::new(9),
    }
}

/// Validate the configuration carried by `state` against the supplied workspace.
pub fn validate(state: &DeflateState, workspace_len: usize) -> CompressStatus {
    if state.level > LEVEL_MAX {
        return CompressStatus::InvalidLevel;
    }
    if workspace_len < workspace_size(state.level) {
        return CompressStatus::InvalidLevelBuf;
    }
    if !matches!(state.flush, FLUSH_NONE | FLUSH_SYNC | FLUSH_FULL) {
        return CompressStatus::InvalidFlush;
    }
    if !matches!(
        state.container,
        CONTAINER_DEFLATE | CONTAINER_GZIP | CONTAINER_GZIP_NO_HDR | CONTAINER_ZLIB
    ) {
        return CompressStatus::InvalidFormat;
    }
    CompressStatus::Ok
}

/// Default [`CompressEngine`].
///
/// The `flate2` codec is created on the first valid step and reused by every
/// later stream after [`init`](CompressEngine::init), since the level cannot
/// change for the life of a session.
#[derive(Debug, Default)]
pub struct DeflateEngine {
    codec: Option<Compress>,
    crc: Hasher,
    framing: Pending,
}

impl DeflateEngine {
    pub fn new() -> Self {
        DeflateEngine::default()
    }

    fn has_gzip_trailer(container: u32) -> bool {
        matches!(container, CONTAINER_GZIP | CONTAINER_GZIP_NO_HDR)
    }

    /// Validate configuration and prime the codec for a fresh stream.
    fn start(&mut self, state: &mut DeflateState, workspace_len: usize) -> CompressStatus {
        let status = validate(state, workspace_len);
        if status != CompressStatus::Ok {
            return status;
        }
        if self.codec.is_none() {
            self.codec = Some(Compress::new(
                effort(state.level),
                state.container == CONTAINER_ZLIB,
            ));
        }
        if state.container == CONTAINER_GZIP {
            self.framing.load(&gzip::DEFAULT_HEADER);
            state.state = ZState::Header;
        } else {
            state.state = ZState::Body;
        }
        CompressStatus::Ok
    }

    fn flush_mode(state: &DeflateState) -> FlushCompress {
        if state.end_of_stream {
            return FlushCompress::Finish;
        }
        match state.flush {
            FLUSH_SYNC => FlushCompress::Sync,
            FLUSH_FULL => FlushCompress::Full,
            _ => FlushCompress::None,
        }
    }
}

impl CompressEngine for DeflateEngine {
    fn init(&mut self, state: &mut DeflateState) {
        state.clear();
        if let Some(codec) = self.codec.as_mut() {
            codec.reset();
        }
        self.crc.reset();
        self.framing.clear();
    }

    fn step(
        &mut self,
        state: &mut DeflateState,
        next_in: &[u8],
        next_out: &mut [u8],
        workspace: &mut [u8],
    ) -> CompressStatus {
        // flate2 keeps its own tables; only the workspace size is checked.
        if state.state == ZState::Init {
            let status = self.start(state, workspace.len());
            if status != CompressStatus::Ok {
                return status;
            }
        }

        let mut in_pos = 0;
        let mut out_pos = 0;

        if state.state == ZState::Header {
            out_pos += self.framing.drain_into(next_out);
            if self.framing.is_empty() {
                state.state = ZState::Body;
            }
        }

        if state.state == ZState::Body {
            let Some(codec) = self.codec.as_mut() else {
                return CompressStatus::InvalidState;
            };
            let before_in = codec.total_in();
            let before_out = codec.total_out();
            let res = codec.compress(
                &next_in[in_pos..],
                &mut next_out[out_pos..],
                Self::flush_mode(state),
            );
            let consumed = (codec.total_in() - before_in) as usize;
            let produced = (codec.total_out() - before_out) as usize;
            self.crc.update(&next_in[in_pos..in_pos + consumed]);
            in_pos += consumed;
            out_pos += produced;
            match res {
                Ok(Status::StreamEnd) => {
                    if Self::has_gzip_trailer(state.container) {
                        let size = (state.total_in + in_pos as u64) as u32;
                        let crc = std::mem::take(&mut self.crc).finalize();
                        self.framing.load(&gzip::trailer(crc, size));
                        state.state = ZState::Trailer;
                    } else {
                        state.state = ZState::End;
                    }
                }
                Ok(_) => {}
                Err(_) => return CompressStatus::InvalidState,
            }
        }

        if state.state == ZState::Trailer {
            out_pos += self.framing.drain_into(&mut next_out[out_pos..]);
            if self.framing.is_empty() {
                state.state = ZState::End;
            }
        }

        state.avail_in = next_in.len() - in_pos;
        state.avail_out = next_out.len() - out_pos;
        state.total_in += in_pos as u64;
        state.total_out += out_pos as u64;
        CompressStatus::Ok
    }
}
