//! `Read` adapter that decompresses an inner reader.

use std::io::{self, Read};

use crate::config::BUFFER_SIZE_DEFAULT;
use crate::session::{ContainerFormat, DecompressorSession, InputWindow};

/// Decompresses one stream from an inner reader.
///
/// Decoded bytes are served from an output buffer; the compressed input
/// buffer is refilled only once the session has consumed all of it. After
/// the stream finishes, `read` returns 0 and any bytes past the end of the
/// stream stay in the input buffer (see [`remaining`](Self::remaining)).
#[derive(Debug)]
pub struct DecompressReader<R: Read> {
    inner: R,
    session: DecompressorSession,
    input: Vec<u8>,
    in_off: usize,
    in_len: usize,
    out: Vec<u8>,
    out_pos: usize,
    out_len: usize,
    eof: bool,
}

impl<R: Read> DecompressReader<R> {
    pub fn new(inner: R, container: ContainerFormat) -> Self {
        Self::with_buffer_size(inner, container, BUFFER_SIZE_DEFAULT)
    }

    pub fn with_buffer_size(inner: R, container: ContainerFormat, size: usize) -> Self {
        let size = size.max(1);
        DecompressReader {
            inner,
            session: DecompressorSession::init(container),
            input: vec![0u8; size],
            in_off: 0,
            in_len: 0,
            out: vec![0u8; size],
            out_pos: 0,
            out_len: 0,
            eof: false,
        }
    }

    /// Refill the input window from the inner reader.
    fn refill(&mut self) -> io::Result<()> {
        loop {
            match self.inner.read(&mut self.input) {
                Ok(0) => {
                    self.eof = true;
                    break;
                }
                Ok(n) => {
                    self.in_off = 0;
                    self.in_len = n;
                    break;
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    /// Run one step into the (empty) output buffer.
    fn step(&mut self) -> io::Result<()> {
        if self.in_len == 0 && !self.eof {
            self.refill()?;
        }
        let mut win = InputWindow::with_bounds(&self.input, self.in_off, self.in_len)
            .map_err(crate::Error::from)?;
        let produced = self.session.decompress_step(&mut win, &mut self.out)?;
        let consumed = win.offset() - self.in_off;
        self.in_off = win.offset();
        self.in_len = win.len();
        self.out_pos = 0;
        self.out_len = produced;

        if produced == 0 && !self.session.is_finished() {
            if self.eof && self.in_len == 0 {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "compressed stream ended before its final block",
                ));
            }
            if consumed == 0 && self.in_len > 0 {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    "decompressor made no progress",
                ));
            }
        }
        Ok(())
    }

    /// Bytes read from the inner reader but not consumed by the stream.
    pub fn remaining(&self) -> usize {
        self.in_len
    }

    pub fn bytes_written(&self) -> u64 {
        self.session.bytes_written()
    }

    pub fn is_finished(&self) -> bool {
        self.session.is_finished()
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Read for DecompressReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        loop {
            if self.out_pos < self.out_len {
                let n = (self.out_len - self.out_pos).min(buf.len());
                buf[..n].copy_from_slice(&self.out[self.out_pos..self.out_pos + n]);
                self.out_pos += n;
                return Ok(n);
            }
            if self.session.is_finished() {
                return Ok(0);
            }
            self.step()?;
        }
    }
}
