//! gzip member framing: header emission, incremental header parsing and
//! trailer handling. The DEFLATE body itself is handled by the engines.

use crc32fast::Hasher;

use crate::engine::status::InflateStatus;

pub const MAGIC: [u8; 2] = [0x1f, 0x8b];
pub const CM_DEFLATE: u8 = 8;

pub const FTEXT: u8 = 0x01;
pub const FHCRC: u8 = 0x02;
pub const FEXTRA: u8 = 0x04;
pub const FNAME: u8 = 0x08;
pub const FCOMMENT: u8 = 0x10;
const FRESERVED: u8 = 0xe0;

pub const HEADER_SIZE: usize = 10;
pub const TRAILER_SIZE: usize = 8;

/// Header written by the compressor: no flags, no mtime, OS unknown.
pub const DEFAULT_HEADER: [u8; HEADER_SIZE] =
    [MAGIC[0], MAGIC[1], CM_DEFLATE, 0, 0, 0, 0, 0, 0, 0xff];

/// CRC-32 followed by the input size modulo 2^32, both little-endian.
pub fn trailer(crc: u32, isize: u32) -> [u8; TRAILER_SIZE] {
    let mut t = [0u8; TRAILER_SIZE];
    t[..4].copy_from_slice(&crc.to_le_bytes());
    t[4..].copy_from_slice(&isize.to_le_bytes());
    t
}

// ─────────────────────────────────────────────────────────────────────────────
// Pending framing bytes (compressor side)
// ─────────────────────────────────────────────────────────────────────────────

/// Small queue of framing bytes that may take several output windows to drain.
#[derive(Debug, Clone, Default)]
pub struct Pending {
    buf: [u8; HEADER_SIZE],
    len: usize,
    pos: usize,
}

impl Pending {
    pub fn load(&mut self, bytes: &[u8]) {
        debug_assert!(bytes.len() <= HEADER_SIZE);
        self.buf[..bytes.len()].copy_from_slice(bytes);
        self.len = bytes.len();
        self.pos = 0;
    }

    /// Copy as much as fits into `out`; returns bytes written.
    pub fn drain_into(&mut self, out: &mut [u8]) -> usize {
        let n = (self.len - self.pos).min(out.len());
        out[..n].copy_from_slice(&self.buf[self.pos..self.pos + n]);
        self.pos += n;
        n
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pos == self.len
    }

    pub fn clear(&mut self) {
        self.len = 0;
        self.pos = 0;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Incremental header parser (decompressor side)
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum HeaderStage {
    #[default]
    Fixed,
    ExtraLen,
    Extra,
    Name,
    Comment,
    HeaderCrc,
    Done,
}

/// Outcome of feeding bytes to a [`HeaderParser`] or [`TrailerReader`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parse {
    NeedMore,
    Done,
    Failed(InflateStatus),
}

/// Parses a gzip member header from input delivered in arbitrary pieces.
#[derive(Debug, Clone, Default)]
pub struct HeaderParser {
    stage: HeaderStage,
    scratch: [u8; HEADER_SIZE],
    have: usize,
    flags: u8,
    extra_left: usize,
    crc: Hasher,
}

impl HeaderParser {
    pub fn reset(&mut self) {
        *self = HeaderParser::default();
    }

    /// Flags byte of the parsed header (valid once past the fixed part).
    pub fn flags(&self) -> u8 {
        self.flags
    }

    /// Consume header bytes from `input`. Returns the number consumed and the
    /// parse outcome; bytes after the header are never consumed.
    pub fn feed(&mut self, input: &[u8]) -> (usize, Parse) {
        let mut pos = 0;
        loop {
            match self.stage {
                HeaderStage::Fixed => {
                    pos += self.collect(&input[pos..], HEADER_SIZE);
                    if self.have < HEADER_SIZE {
                        return (pos, Parse::NeedMore);
                    }
                    let fixed = self.scratch;
                    if fixed[..2] != MAGIC || fixed[2] != CM_DEFLATE || fixed[3] & FRESERVED != 0 {
                        return (pos, Parse::Failed(InflateStatus::InvalidWrapper));
                    }
                    self.flags = fixed[3];
                    self.have = 0;
                    self.stage = self.after(HeaderStage::Fixed);
                }
                HeaderStage::ExtraLen => {
                    pos += self.collect(&input[pos..], 2);
                    if self.have < 2 {
                        return (pos, Parse::NeedMore);
                    }
                    self.extra_left = u16::from_le_bytes([self.scratch[0], self.scratch[1]]) as usize;
                    self.have = 0;
                    self.stage = HeaderStage::Extra;
                }
                HeaderStage::Extra => {
                    let n = self.extra_left.min(input.len() - pos);
                    self.crc.update(&input[pos..pos + n]);
                    pos += n;
                    self.extra_left -= n;
                    if self.extra_left > 0 {
                        return (pos, Parse::NeedMore);
                    }
                    self.stage = self.after(HeaderStage::Extra);
                }
                HeaderStage::Name | HeaderStage::Comment => {
                    let rest = &input[pos..];
                    match rest.iter().position(|&b| b == 0) {
                        Some(nul) => {
                            self.crc.update(&rest[..=nul]);
                            pos += nul + 1;
                            self.stage = self.after(self.stage);
                        }
                        None => {
                            self.crc.update(rest);
                            return (input.len(), Parse::NeedMore);
                        }
                    }
                }
                HeaderStage::HeaderCrc => {
                    let expected = self.crc.clone().finalize() as u16;
                    let n = (2 - self.have).min(input.len() - pos);
                    self.scratch[self.have..self.have + n].copy_from_slice(&input[pos..pos + n]);
                    self.have += n;
                    pos += n;
                    if self.have < 2 {
                        return (pos, Parse::NeedMore);
                    }
                    if u16::from_le_bytes([self.scratch[0], self.scratch[1]]) != expected {
                        return (pos, Parse::Failed(InflateStatus::IncorrectChecksum));
                    }
                    self.stage = HeaderStage::Done;
                }
                HeaderStage::Done => return (pos, Parse::Done),
            }
        }
    }

    /// Gather bytes into `scratch` (and the header CRC) until `want` are held.
    fn collect(&mut self, input: &[u8], want: usize) -> usize {
        let n = (want - self.have).min(input.len());
        self.scratch[self.have..self.have + n].copy_from_slice(&input[..n]);
        self.crc.update(&input[..n]);
        self.have += n;
        n
    }

    /// Next optional field announced by the flags after `stage`.
    fn after(&self, stage: HeaderStage) -> HeaderStage {
        let order = [
            (HeaderStage::ExtraLen, FEXTRA),
            (HeaderStage::Name, FNAME),
            (HeaderStage::Comment, FCOMMENT),
            (HeaderStage::HeaderCrc, FHCRC),
        ];
        let start = match stage {
            HeaderStage::Fixed => 0,
            HeaderStage::ExtraLen | HeaderStage::Extra => 1,
            HeaderStage::Name => 2,
            HeaderStage::Comment => 3,
            HeaderStage::HeaderCrc | HeaderStage::Done => return HeaderStage::Done,
        };
        order[start..]
            .iter()
            .find(|(_, flag)| self.flags & flag != 0)
            .map(|(next, _)| *next)
            .unwrap_or(HeaderStage::Done)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Trailer reader (decompressor side)
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct TrailerReader {
    buf: [u8; TRAILER_SIZE],
    have: usize,
}

impl TrailerReader {
    pub fn reset(&mut self) {
        self.have = 0;
    }

    /// Consume trailer bytes and, once all 8 are present, check them against
    /// the CRC and length of the decoded body.
    pub fn feed(&mut self, input: &[u8], crc: u32, body_len: u64) -> (usize, Parse) {
        let n = (TRAILER_SIZE - self.have).min(input.len());
        self.buf[self.have..self.have + n].copy_from_slice(&input[..n]);
        self.have += n;
        if self.have < TRAILER_SIZE {
            return (n, Parse::NeedMore);
        }
        let want = trailer(crc, body_len as u32);
        if self.buf != want {
            return (n, Parse::Failed(InflateStatus::IncorrectChecksum));
        }
        (n, Parse::Done)
    }
}
