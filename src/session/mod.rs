//! Streaming compressor and decompressor sessions.
//!
//! A session accepts one input window and one output window per call, runs
//! a single engine step and reconciles the engine cursors into the window
//! offset, the produced-byte count and the cumulative counters.
//!
//! ```
//! use streamdeflate::session::{
//!     CompressionLevel, CompressorSession, ContainerFormat, DecompressorSession, FlushMode,
//!     InputWindow,
//! };
//!
//! let data = b"hello, streaming world".repeat(10);
//! let mut c = CompressorSession::init(
//!     CompressionLevel::Level1,
//!     FlushMode::None,
//!     ContainerFormat::Gzip,
//! )?;
//! let mut out = [0u8; 4096];
//! let n = c.compress_step(&mut InputWindow::new(&data), &mut out, true)?;
//! assert!(c.is_finished());
//!
//! let mut d = DecompressorSession::init(ContainerFormat::Gzip);
//! let mut plain = [0u8; 4096];
//! let m = d.decompress_step(&mut InputWindow::new(&out[..n]), &mut plain)?;
//! assert!(d.is_finished());
//! assert_eq!(&plain[..m], &data[..]);
//! # Ok::<(), streamdeflate::Error>(())
//! ```

pub mod compress;
pub mod decompress;
pub mod taxonomy;
pub mod types;

pub use compress::CompressorSession;
pub use decompress::DecompressorSession;
pub use taxonomy::{map_compress_status, map_inflate_status};
pub use types::{CompressionLevel, ContainerFormat, FlushMode, InputWindow, ParseNameError};

pub use crate::engine::status::{CompressStatus, InflateStatus};
