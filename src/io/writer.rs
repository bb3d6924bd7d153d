//! `Write` adapter that compresses everything written through it.

use std::io::{self, Write};

use log::debug;

use crate::config::CodecConfig;
use crate::error::Result;
use crate::session::{CompressorSession, InputWindow};

/// Compresses into an inner writer through fixed staging buffers.
///
/// Bytes written are staged until the input buffer is full, then pushed
/// through the session. [`finish`](Self::finish) ends the stream and returns
/// the inner writer; dropping an unfinished writer finishes it and ignores
/// any error.
#[derive(Debug)]
pub struct CompressWriter<W: Write> {
    inner: Option<W>,
    session: CompressorSession,
    config: CodecConfig,
    staged: Vec<u8>,
    out: Vec<u8>,
}

impl<W: Write> CompressWriter<W> {
    pub fn new(inner: W, config: CodecConfig) -> Result<Self> {
        let session = CompressorSession::init(config.level, config.flush, config.container)?;
        let size = config.buffer_size.max(1);
        Ok(CompressWriter {
            inner: Some(inner),
            session,
            config,
            staged: Vec::with_capacity(size),
            out: vec![0u8; size],
        })
    }

    /// Push the staged input through the session, writing whatever it
    /// produces. With `end_of_stream` the loop runs until the session finishes.
    fn drain_staged(&mut self, end_of_stream: bool) -> io::Result<()> {
        let inner = match self.inner.as_mut() {
            Some(w) => w,
            None => return Err(io::Error::new(io::ErrorKind::Other, "writer already finished")),
        };
        let mut win = InputWindow::new(&self.staged);
        loop {
            let before = win.len();
            let produced = self.session.compress_step(&mut win, &mut self.out, end_of_stream)?;
            inner.write_all(&self.out[..produced])?;
            if end_of_stream {
                if self.session.is_finished() {
                    break;
                }
            } else if win.is_empty() && produced < self.out.len() {
                break;
            }
            if produced == 0 && win.len() == before {
                return Err(io::Error::new(
                    io::ErrorKind::WriteZero,
                    "compressor made no progress",
                ));
            }
        }
        self.staged.clear();
        Ok(())
    }

    /// End the stream without giving up the inner writer.
    pub fn try_finish(&mut self) -> io::Result<()> {
        if self.session.is_finished() {
            return Ok(());
        }
        self.drain_staged(true)?;
        if let Some(w) = self.inner.as_mut() {
            w.flush()?;
        }
        Ok(())
    }

    /// End the stream and return the inner writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.try_finish()?;
        self.inner
            .take()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "writer already finished"))
    }

    /// Start a new stream with `config`, discarding any staged input.
    ///
    /// The session is reset in place when the codec settings are unchanged
    /// and rebuilt otherwise.
    pub fn reinit(&mut self, config: CodecConfig) -> Result<()> {
        let same_codec = config.level == self.config.level
            && config.flush == self.config.flush
            && config.container == self.config.container;
        if same_codec {
            self.session.reset();
        } else {
            self.session = CompressorSession::init(config.level, config.flush, config.container)?;
        }
        let size = config.buffer_size.max(1);
        self.staged = Vec::with_capacity(size);
        self.out.resize(size, 0);
        self.config = config;
        debug!("compress writer reinit: {:?}", self.config);
        Ok(())
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Bytes accepted by the session so far (staged bytes not included).
    pub fn bytes_read(&self) -> u64 {
        self.session.bytes_read()
    }

    pub fn bytes_written(&self) -> u64 {
        self.session.bytes_written()
    }

    pub fn is_finished(&self) -> bool {
        self.session.is_finished()
    }

    pub fn get_ref(&self) -> Option<&W> {
        self.inner.as_ref()
    }
}

impl<W: Write> Write for CompressWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.session.is_finished() {
            return Err(io::Error::new(io::ErrorKind::Other, "write after finish"));
        }
        if self.staged.len() == self.out.len() {
            self.drain_staged(false)?;
        }
        let n = (self.out.len() - self.staged.len()).min(buf.len());
        self.staged.extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.session.is_finished() && !self.staged.is_empty() {
            self.drain_staged(false)?;
        }
        match self.inner.as_mut() {
            Some(w) => w.flush(),
            None => Ok(()),
        }
    }
}

impl<W: Write> Drop for CompressWriter<W> {
    fn drop(&mut self) {
        if self.inner.is_some() {
            let _ = self.try_finish();
        }
    }
}
