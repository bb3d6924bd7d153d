//! Compile-time-linked decompression engine: `flate2` raw/zlib inflate with
//! gzip header and trailer handling on top.

use crc32fast::Hasher;
use flate2::{Decompress, DecompressError, FlushDecompress, Status};

use crate::engine::gzip::{HeaderParser, Parse, TrailerReader};
use crate::engine::state::{
    BlockState, InflateState, CONTAINER_DEFLATE, CONTAINER_GZIP, CONTAINER_GZIP_NO_HDR,
    CONTAINER_ZLIB,
};
use crate::engine::status::InflateStatus;
use crate::engine::DecompressEngine;

/// Map a decoder error message onto the native status set.
///
/// Backends differ in how much they say; anything unrecognised is reported
/// as a malformed block.
pub(crate) fn classify_message(msg: Option<&str>) -> InflateStatus {
    let Some(msg) = msg else {
        return InflateStatus::InvalidBlock;
    };
    let msg = msg.to_ascii_lowercase();
    if msg.contains("too far back") {
        InflateStatus::InvalidLookback
    } else if msg.contains("header")
        || msg.contains("compression method")
        || msg.contains("window size")
    {
        InflateStatus::InvalidWrapper
    } else if msg.contains("data check") || msg.contains("checksum") || msg.contains("adler") {
        InflateStatus::IncorrectChecksum
    } else if msg.contains("block") || msg.contains("too many") {
        InflateStatus::InvalidBlock
    } else if msg.contains("code") || msg.contains("symbol") {
        InflateStatus::InvalidSymbol
    } else {
        InflateStatus::InvalidBlock
    }
}

fn classify(err: &DecompressError) -> InflateStatus {
    classify_message(err.message())
}

/// Default [`DecompressEngine`].
#[derive(Debug, Default)]
pub struct InflateEngine {
    codec: Option<Decompress>,
    header: HeaderParser,
    trailer: TrailerReader,
    crc: Hasher,
    body_len: u64,
}

impl InflateEngine {
    pub fn new() -> Self {
        InflateEngine::default()
    }

    fn has_gzip_trailer(container: u32) -> bool {
        matches!(container, CONTAINER_GZIP | CONTAINER_GZIP_NO_HDR)
    }

    /// Advance the block machine as far as the windows allow.
    fn run(
        &mut self,
        state: &mut InflateState,
        next_in: &[u8],
        next_out: &mut [u8],
        in_pos: &mut usize,
        out_pos: &mut usize,
    ) -> InflateStatus {
        if state.block_state == BlockState::Header {
            if state.container == CONTAINER_GZIP {
                let (used, res) = self.header.feed(&next_in[*in_pos..]);
                *in_pos += used;
                match res {
                    Parse::Done => state.block_state = BlockState::Body,
                    Parse::NeedMore => return InflateStatus::EndInput,
                    Parse::Failed(status) => return status,
                }
            } else {
                state.block_state = BlockState::Body;
            }
        }

        if state.block_state == BlockState::Body {
            let zlib = state.container == CONTAINER_ZLIB;
            let codec = self.codec.get_or_insert_with(|| Decompress::new(zlib));
            let before_in = codec.total_in();
            let before_out = codec.total_out();
            let res = codec.decompress(
                &next_in[*in_pos..],
                &mut next_out[*out_pos..],
                FlushDecompress::None,
            );
            let consumed = (codec.total_in() - before_in) as usize;
            let produced = (codec.total_out() - before_out) as usize;
            self.crc.update(&next_out[*out_pos..*out_pos + produced]);
            self.body_len += produced as u64;
            *in_pos += consumed;
            *out_pos += produced;
            match res {
                Ok(Status::StreamEnd) => {
                    state.block_state = if Self::has_gzip_trailer(state.container) {
                        BlockState::Trailer
                    } else {
                        BlockState::Finish
                    };
                }
                Ok(_) => {}
                Err(e) => return classify(&e),
            }
        }

        if state.block_state == BlockState::Trailer {
            let crc = self.crc.clone().finalize();
            let (used, res) = self.trailer.feed(&next_in[*in_pos..], crc, self.body_len);
            *in_pos += used;
            match res {
                Parse::Done => state.block_state = BlockState::Finish,
                Parse::NeedMore => {}
                Parse::Failed(status) => return status,
            }
        }

        if state.block_state == BlockState::Finish {
            InflateStatus::Ok
        } else if *in_pos == next_in.len() {
            InflateStatus::EndInput
        } else {
            InflateStatus::Ok
        }
    }
}

impl DecompressEngine for InflateEngine {
    fn init(&mut self, state: &mut InflateState) {
        state.clear();
        let zlib = state.container == CONTAINER_ZLIB;
        match self.codec.as_mut() {
            Some(codec) => codec.reset(zlib),
            None => self.codec = Some(Decompress::new(zlib)),
        }
        self.header.reset();
        self.trailer.reset();
        self.crc.reset();
        self.body_len = 0;
    }

    fn step(
        &mut self,
        state: &mut InflateState,
        next_in: &[u8],
        next_out: &mut [u8],
    ) -> InflateStatus {
        if !matches!(
            state.container,
            CONTAINER_DEFLATE | CONTAINER_GZIP | CONTAINER_GZIP_NO_HDR | CONTAINER_ZLIB
        ) {
            return InflateStatus::InvalidWrapper;
        }
        let mut in_pos = 0;
        let mut out_pos = 0;
        let status = self.run(state, next_in, next_out, &mut in_pos, &mut out_pos);
        state.avail_in = next_in.len() - in_pos;
        state.avail_out = next_out.len() - out_pos;
        state.total_out += out_pos as u64;
        status
    }
}
