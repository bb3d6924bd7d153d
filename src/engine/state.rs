//! Engine-visible stream state, configuration codes and workspace sizing.
//!
//! A session fills the cursor fields before each step and reads them back
//! afterwards. Counters and the internal machine state belong to the engine.

// ─────────────────────────────────────────────────────────────────────────────
// Configuration codes
// ─────────────────────────────────────────────────────────────────────────────

pub const LEVEL_MIN: u32 = 0;
pub const LEVEL_MAX: u32 = 3;

pub const FLUSH_NONE: u32 = 0;
pub const FLUSH_SYNC: u32 = 1;
pub const FLUSH_FULL: u32 = 2;

/// Raw DEFLATE, no framing.
pub const CONTAINER_DEFLATE: u32 = 0;
/// gzip member: header, DEFLATE body, CRC-32 + ISIZE trailer.
pub const CONTAINER_GZIP: u32 = 1;
/// gzip body and trailer without the leading header.
pub const CONTAINER_GZIP_NO_HDR: u32 = 2;
/// zlib wrapper (2-byte header, Adler-32 trailer).
pub const CONTAINER_ZLIB: u32 = 3;

const KB: usize = 1 << 10;

/// Auxiliary workspace required by level 1.
pub const LVL1_WORKSPACE: usize = 128 * KB;
/// Auxiliary workspace required by level 2.
pub const LVL2_WORKSPACE: usize = 256 * KB;
/// Auxiliary workspace required by level 3.
pub const LVL3_WORKSPACE: usize = 512 * KB;

/// Workspace size a level needs, determined by the level alone.
///
/// Level 0 and unknown levels need none; an unknown level is rejected by the
/// engine at the first step instead.
pub fn workspace_size(level: u32) -> usize {
    match level {
        1 => LVL1_WORKSPACE,
        2 => LVL2_WORKSPACE,
        3 => LVL3_WORKSPACE,
        _ => 0,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Compression side
// ─────────────────────────────────────────────────────────────────────────────

/// Compressor machine state. `End` is the terminal marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZState {
    /// Nothing emitted yet; configuration not validated yet.
    #[default]
    Init,
    /// Emitting the container header.
    Header,
    /// Encoding input.
    Body,
    /// Emitting the container trailer.
    Trailer,
    /// Final output unit produced.
    End,
}

/// Cursor and counter block shared between a compressor session and its engine.
#[derive(Debug, Clone, Default)]
pub struct DeflateState {
    /// Unconsumed bytes of the input slice after a step.
    pub avail_in: usize,
    /// Unused bytes of the output slice after a step.
    pub avail_out: usize,
    /// Input bytes consumed since init.
    pub total_in: u64,
    /// Output bytes produced since init, framing included.
    pub total_out: u64,
    /// Set by the caller on the step carrying the final input chunk.
    pub end_of_stream: bool,
    pub level: u32,
    pub flush: u32,
    pub container: u32,
    pub state: ZState,
}

impl DeflateState {
    pub fn new(level: u32, flush: u32, container: u32) -> Self {
        DeflateState {
            level,
            flush,
            container,
            ..DeflateState::default()
        }
    }

    /// Clear cursors, counters and machine state; keep the configuration.
    pub fn clear(&mut self) {
        *self = DeflateState::new(self.level, self.flush, self.container);
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.state == ZState::End
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Decompression side
// ─────────────────────────────────────────────────────────────────────────────

/// Decoder block state. `Finish` is the terminal marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockState {
    /// Parsing the container header (or about to start the body).
    #[default]
    Header,
    /// Decoding DEFLATE blocks.
    Body,
    /// Reading the container trailer.
    Trailer,
    /// Final block decoded and trailer verified.
    Finish,
}

/// Cursor and counter block shared between a decompressor session and its engine.
///
/// There is no `total_in`: the decoder only tracks what it produced.
#[derive(Debug, Clone, Default)]
pub struct InflateState {
    pub avail_in: usize,
    pub avail_out: usize,
    /// Decoded bytes produced since init.
    pub total_out: u64,
    pub container: u32,
    pub block_state: BlockState,
}

impl InflateState {
    pub fn new(container: u32) -> Self {
        InflateState {
            container,
            ..InflateState::default()
        }
    }

    pub fn clear(&mut self) {
        *self = InflateState::new(self.container);
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.block_state == BlockState::Finish
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workspace_depends_only_on_level() {
        assert_eq!(workspace_size(0), 0);
        assert_eq!(workspace_size(1), LVL1_WORKSPACE);
        assert_eq!(workspace_size(3), LVL3_WORKSPACE);
        assert_eq!(workspace_size(LEVEL_MAX + 1), 0);
    }

    #[test]
    fn clear_keeps_configuration() {
        let mut st = DeflateState::new(2, FLUSH_SYNC, CONTAINER_GZIP);
        st.total_in = 10;
        st.total_out = 4;
        st.end_of_stream = true;
        st.state = ZState::End;
        st.clear();
        assert_eq!((st.level, st.flush, st.container), (2, FLUSH_SYNC, CONTAINER_GZIP));
        assert_eq!((st.total_in, st.total_out), (0, 0));
        assert!(!st.end_of_stream);
        assert_eq!(st.state, ZState::Init);
    }

    #[test]
    fn inflate_clear_resets_block_state() {
        let mut st = InflateState::new(CONTAINER_ZLIB);
        st.block_state = BlockState::Finish;
        st.total_out = 99;
        assert!(st.is_terminal());
        st.clear();
        assert!(!st.is_terminal());
        assert_eq!(st.total_out, 0);
        assert_eq!(st.container, CONTAINER_ZLIB);
    }
}
