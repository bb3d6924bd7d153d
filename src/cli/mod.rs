//! Command-line interface for the `sdflate` binary.
//!
//! | Submodule     | Responsibility |
//! |---------------|---------------|
//! | [`constants`] | Program identity, stdio marks, the `DISPLAY_LEVEL` atomic and its log filter mapping. |
//! | [`args`]      | `clap` argument definition and resolution into a [`CodecConfig`](crate::config::CodecConfig). |
//! | [`run`]       | Opens input/output and drives one compress or decompress pass through the stream adapters. |

pub mod args;
pub mod constants;
pub mod run;

// ── Display helpers ───────────────────────────────────────────────────────────

/// Print to stderr when the display level is at least `level`.
#[macro_export]
macro_rules! displaylevel {
    ($level:expr, $($arg:tt)*) => {
        if $crate::cli::constants::display_level() >= $level {
            eprint!($($arg)*);
        }
    };
}
