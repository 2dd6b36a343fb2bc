//! Environment and settings-file loading.
//!
//! # Design
//! - A settings file (JSON) provides the base document; individual
//!   environment variables override it.
//! - Loading happens once during bootstrap; the result is immutable.

use std::fs;
use std::net::IpAddr;
use std::path::Path;

use tracing::info;

use crate::error::{ConfigError, ConfigResult};
use crate::model::AppSettings;

/// Environment variable naming an optional JSON settings file.
pub const ENV_SETTINGS_FILE: &str = "STUNDIR_SETTINGS_FILE";
const ENV_INSTANCE_NAME: &str = "STUNDIR_INSTANCE_NAME";
const ENV_BIND_ADDR: &str = "STUNDIR_BIND_ADDR";
const ENV_HTTP_PORT: &str = "STUNDIR_HTTP_PORT";
const ENV_LOG_LEVEL: &str = "STUNDIR_LOG_LEVEL";
const ENV_LOG_FORMAT: &str = "STUNDIR_LOG_FORMAT";
const ENV_LOCALES: &str = "STUNDIR_LOCALES";
const ENV_DEFAULT_LOCALE: &str = "STUNDIR_DEFAULT_LOCALE";

/// Load settings from the process environment.
///
/// # Errors
///
/// Returns an error when the settings file cannot be read or parsed, an
/// environment override is unparsable, or validation fails.
pub fn load_settings() -> ConfigResult<AppSettings> {
    load_settings_with(|name| std::env::var(name).ok())
}

/// Load settings through an explicit lookup function.
///
/// The indirection keeps loading deterministic under test without mutating
/// the process environment.
///
/// # Errors
///
/// Same conditions as [`load_settings`].
pub fn load_settings_with(
    lookup: impl Fn(&'static str) -> Option<String>,
) -> ConfigResult<AppSettings> {
    let mut settings = match lookup(ENV_SETTINGS_FILE) {
        Some(path) => read_settings_file(Path::new(&path))?,
        None => AppSettings::default(),
    };

    if let Some(name) = lookup(ENV_INSTANCE_NAME) {
        settings.profile.instance_name = name;
    }
    if let Some(addr) = lookup(ENV_BIND_ADDR) {
        settings.profile.bind_addr =
            addr.parse::<IpAddr>()
                .map_err(|_| ConfigError::InvalidEnv {
                    name: ENV_BIND_ADDR,
                    value: addr,
                    reason: "not_an_ip_address",
                })?;
    }
    if let Some(port) = lookup(ENV_HTTP_PORT) {
        settings.profile.http_port =
            port.parse::<u16>().map_err(|_| ConfigError::InvalidEnv {
                name: ENV_HTTP_PORT,
                value: port,
                reason: "not_a_port",
            })?;
    }
    if let Some(level) = lookup(ENV_LOG_LEVEL) {
        settings.profile.log_level = level;
    }
    if let Some(format) = lookup(ENV_LOG_FORMAT) {
        settings.profile.log_format = format;
    }
    if let Some(locales) = lookup(ENV_LOCALES) {
        settings.locales.supported = split_locale_list(&locales);
    }
    if let Some(default_locale) = lookup(ENV_DEFAULT_LOCALE) {
        settings.locales.default_locale = default_locale.trim().to_string();
    }

    settings.validate()?;
    Ok(settings)
}

fn read_settings_file(path: &Path) -> ConfigResult<AppSettings> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::SettingsRead {
        path: path.to_path_buf(),
        source,
    })?;
    let settings =
        serde_json::from_str::<AppSettings>(&raw).map_err(|source| ConfigError::SettingsParse {
            path: path.to_path_buf(),
            source,
        })?;
    info!(path = %path.display(), "loaded settings file");
    Ok(settings)
}

fn split_locale_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_locale_list_trims_and_drops_empties() {
        assert_eq!(split_locale_list(" is , en ,,"), vec!["is", "en"]);
        assert!(split_locale_list("").is_empty());
    }

    #[test]
    fn lookup_overrides_take_effect() {
        let settings = load_settings_with(|name| match name {
            ENV_HTTP_PORT => Some("9090".to_string()),
            ENV_LOCALES => Some("en,is".to_string()),
            ENV_DEFAULT_LOCALE => Some("en".to_string()),
            _ => None,
        })
        .expect("settings");
        assert_eq!(settings.profile.http_port, 9090);
        assert_eq!(settings.locales.supported, vec!["en", "is"]);
        assert_eq!(settings.locales.default_locale, "en");
    }

    #[test]
    fn unparsable_port_is_rejected() {
        let err = load_settings_with(|name| {
            (name == ENV_HTTP_PORT).then(|| "not-a-port".to_string())
        })
        .expect_err("bad port");
        assert!(matches!(
            err,
            ConfigError::InvalidEnv {
                name: ENV_HTTP_PORT,
                ..
            }
        ));
    }
}
