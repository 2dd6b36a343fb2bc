//! Error types for configuration operations.

use std::io;
use std::path::PathBuf;

use stundir_i18n::LocaleError;
use thiserror::Error;

/// Primary error type for configuration operations.
///
/// Every variant is startup-fatal: the process must not serve traffic with a
/// broken configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable carried an unparsable value.
    #[error("invalid environment value")]
    InvalidEnv {
        /// Name of the offending environment variable.
        name: &'static str,
        /// Value provided by the environment.
        value: String,
        /// Machine-readable reason for the failure.
        reason: &'static str,
    },
    /// A settings field failed validation.
    #[error("invalid configuration field")]
    InvalidField {
        /// Section that failed validation.
        section: &'static str,
        /// Field that failed validation.
        field: &'static str,
        /// Machine-readable reason for the failure.
        reason: &'static str,
    },
    /// Reading the settings file failed.
    #[error("failed to read settings file")]
    SettingsRead {
        /// File path that could not be read.
        path: PathBuf,
        /// Source IO error.
        source: io::Error,
    },
    /// Parsing the settings file failed.
    #[error("failed to parse settings file")]
    SettingsParse {
        /// File path that could not be parsed.
        path: PathBuf,
        /// Source serde error.
        source: serde_json::Error,
    },
    /// Locale registry construction failed.
    #[error("locale configuration invalid")]
    Locale {
        /// Source locale registry error.
        source: LocaleError,
    },
}

/// Convenience alias for configuration results.
pub type ConfigResult<T> = Result<T, ConfigError>;
