//! Whole-buffer helpers built on the sessions.

use std::io;

use crate::config::{CodecConfig, BUFFER_SIZE_DEFAULT};
use crate::error::{DataError, Error, Result};
use crate::session::{CompressorSession, ContainerFormat, DecompressorSession, InputWindow};

/// Compress `data` as one complete stream.
pub fn compress_to_vec(data: &[u8], config: &CodecConfig) -> Result<Vec<u8>> {
    let mut session = CompressorSession::init(config.level, config.flush, config.container)?;
    let mut buf = vec![0u8; config.buffer_size.max(1)];
    let mut out = Vec::with_capacity(data.len() / 2 + 64);
    let mut win = InputWindow::new(data);
    while !session.is_finished() {
        let n = session.compress_step(&mut win, &mut buf, true)?;
        out.extend_from_slice(&buf[..n]);
    }
    session.end();
    Ok(out)
}

/// Decompress one complete stream from `data`. Bytes after the end of the
/// stream are ignored.
pub fn decompress_to_vec(data: &[u8], container: ContainerFormat) -> Result<Vec<u8>> {
    let mut session = DecompressorSession::init(container);
    let mut buf = vec![0u8; BUFFER_SIZE_DEFAULT];
    let mut out = Vec::with_capacity(data.len().saturating_mul(2));
    let mut win = InputWindow::new(data);
    while !session.is_finished() {
        let before = win.len();
        let n = session.decompress_step(&mut win, &mut buf)?;
        out.extend_from_slice(&buf[..n]);
        if n == 0 && !session.is_finished() {
            if win.is_empty() {
                return Err(Error::Io(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "compressed stream is truncated",
                )));
            }
            if win.len() == before {
                return Err(DataError::InvalidBlock.into());
            }
        }
    }
    session.end();
    Ok(out)
}
