//! Buffered stream adapters and one-shot helpers on top of the sessions.
//!
//! These are the callers the session protocol is designed for: fixed-size
//! reusable buffers, partial consumption, and explicit finishing.

pub mod oneshot;
pub mod reader;
pub mod writer;

pub use oneshot::{compress_to_vec, decompress_to_vec};
pub use reader::DecompressReader;
pub use writer::CompressWriter;
