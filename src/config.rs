//! Defaults, environment overrides and key/value codec configuration.

use thiserror::Error;

use crate::session::types::{CompressionLevel, ContainerFormat, FlushMode};

/// Default compression level. Overridden by `SDFLATE_CLEVEL` or `-l`/`--level`.
pub const CLEVEL_DEFAULT: CompressionLevel = CompressionLevel::Level1;
pub const FLUSH_DEFAULT: FlushMode = FlushMode::None;
pub const CONTAINER_DEFAULT: ContainerFormat = ContainerFormat::Deflate;

/// Size of each staging buffer used by the stream adapters.
/// Overridden by `SDFLATE_BUFFER_SIZE` or `-B`.
pub const BUFFER_SIZE_DEFAULT: usize = 64 * 1024;

pub const ENV_CLEVEL: &str = "SDFLATE_CLEVEL";
pub const ENV_BUFFER_SIZE: &str = "SDFLATE_BUFFER_SIZE";

pub const KEY_LEVEL: &str = "compress.level";
pub const KEY_FLUSH: &str = "compress.flush";
pub const KEY_CONTAINER: &str = "compress.container";
pub const KEY_BUFFER_SIZE: &str = "compress.buffer_size";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigParseError {
    #[error("unknown configuration key '{0}'")]
    UnknownKey(String),
    #[error("invalid value '{value}' for '{key}'")]
    InvalidValue { key: String, value: String },
}

/// Everything needed to build a compressor session and its stream adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    pub level: CompressionLevel,
    pub flush: FlushMode,
    pub container: ContainerFormat,
    pub buffer_size: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        CodecConfig {
            level: CLEVEL_DEFAULT,
            flush: FLUSH_DEFAULT,
            container: CONTAINER_DEFAULT,
            buffer_size: BUFFER_SIZE_DEFAULT,
        }
    }
}

impl CodecConfig {
    /// Defaults with the environment overrides applied.
    pub fn from_env() -> Self {
        CodecConfig {
            level: init_c_level(),
            buffer_size: init_buffer_size(),
            ..CodecConfig::default()
        }
    }

    /// Apply one `key = value` setting.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigParseError> {
        let invalid = || ConfigParseError::InvalidValue {
            key: key.to_owned(),
            value: value.to_owned(),
        };
        match key {
            KEY_LEVEL => self.level = value.parse().map_err(|_| invalid())?,
            KEY_FLUSH => self.flush = value.parse().map_err(|_| invalid())?,
            KEY_CONTAINER => self.container = value.parse().map_err(|_| invalid())?,
            KEY_BUFFER_SIZE => {
                self.buffer_size = match value.trim().parse::<usize>() {
                    Ok(n) if n > 0 => n,
                    _ => return Err(invalid()),
                }
            }
            _ => return Err(ConfigParseError::UnknownKey(key.to_owned())),
        }
        Ok(())
    }

    /// Apply a sequence of settings, stopping at the first bad one.
    pub fn with_settings<'a, I>(mut self, settings: I) -> Result<Self, ConfigParseError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (k, v) in settings {
            self.set(k, v)?;
        }
        Ok(self)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Environment overrides
// ─────────────────────────────────────────────────────────────────────────────

/// Read the default level from `SDFLATE_CLEVEL`.
pub fn init_c_level() -> CompressionLevel {
    init_c_level_from(std::env::var(ENV_CLEVEL).ok().as_deref())
}

/// Testable core of [`init_c_level`]. A value that is not a valid level is
/// ignored with a warning and the default kept.
pub fn init_c_level_from(env_val: Option<&str>) -> CompressionLevel {
    if let Some(env) = env_val {
        match env.parse() {
            Ok(level) => return level,
            Err(_) => log::warn!(
                "Ignore environment variable setting {ENV_CLEVEL}={env}: not a valid level"
            ),
        }
    }
    CLEVEL_DEFAULT
}

pub fn init_buffer_size() -> usize {
    init_buffer_size_from(std::env::var(ENV_BUFFER_SIZE).ok().as_deref())
}

pub fn init_buffer_size_from(env_val: Option<&str>) -> usize {
    if let Some(env) = env_val {
        match env.trim().parse::<usize>() {
            Ok(n) if n > 0 => return n,
            _ => log::warn!(
                "Ignore environment variable setting {ENV_BUFFER_SIZE}={env}: not a valid size"
            ),
        }
    }
    BUFFER_SIZE_DEFAULT
}
