// cli/constants.rs — program identity and the display-level global.

use std::sync::atomic::{AtomicU32, Ordering};

pub const PROGRAM_NAME: &str = "sdflate";

/// Standard stream marks accepted in place of a file name.
pub const STDIN_MARK: &str = "stdin";
pub const STDOUT_MARK: &str = "stdout";

// ── Display level ─────────────────────────────────────────────────────────────
//
// 0 = no output; 1 = errors only; 2 = normal; 3 = verbose; 4 = debug
pub static DISPLAY_LEVEL: AtomicU32 = AtomicU32::new(2);

pub const DISPLAY_LEVEL_MAX: u32 = 4;

#[inline]
pub fn display_level() -> u32 {
    DISPLAY_LEVEL.load(Ordering::Relaxed)
}

#[inline]
pub fn set_display_level(level: u32) {
    DISPLAY_LEVEL.store(level.min(DISPLAY_LEVEL_MAX), Ordering::Relaxed);
}

/// Log filter matching a display level, used to initialise `env_logger`.
pub fn log_filter_for(level: u32) -> log::LevelFilter {
    match level {
        0 => log::LevelFilter::Off,
        1 => log::LevelFilter::Error,
        2 => log::LevelFilter::Warn,
        3 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}
