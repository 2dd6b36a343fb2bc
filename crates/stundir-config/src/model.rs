//! Typed configuration models.
//!
//! # Design
//! - Pure data carriers used by the bootstrap and delivery surfaces.
//! - Keeps domain types separate from IO/loading code in `loader.rs`.

use std::net::{IpAddr, Ipv4Addr};

use serde::{Deserialize, Serialize};
use stundir_i18n::LocaleRegistry;

use crate::error::{ConfigError, ConfigResult};

/// High-level view of the application profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppProfile {
    /// Friendly identifier displayed in logs and page footers.
    pub instance_name: String,
    /// IP address (and interface) the HTTP server should bind to.
    pub bind_addr: IpAddr,
    /// HTTP port the server should bind to.
    pub http_port: u16,
    /// Log level string handed to the tracing subscriber.
    pub log_level: String,
    /// Log format tag (`json`, `pretty`, or `auto` for the build default).
    pub log_format: String,
}

impl Default for AppProfile {
    fn default() -> Self {
        Self {
            instance_name: "stundir".to_string(),
            bind_addr: IpAddr::V4(Ipv4Addr::LOCALHOST),
            http_port: 8080,
            log_level: "info".to_string(),
            log_format: "auto".to_string(),
        }
    }
}

/// Locale configuration: the supported set and the designated default.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocaleSettings {
    /// Locale tags the deployment serves, in picker order.
    pub supported: Vec<String>,
    /// Tag of the locale used when no valid candidate is present.
    #[serde(rename = "default")]
    pub default_locale: String,
}

impl Default for LocaleSettings {
    fn default() -> Self {
        Self {
            supported: vec!["is".to_string(), "en".to_string()],
            default_locale: "is".to_string(),
        }
    }
}

/// Complete static configuration for one process.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppSettings {
    /// Application profile (network binding, logging).
    #[serde(default)]
    pub profile: AppProfile,
    /// Locale registry configuration.
    #[serde(default)]
    pub locales: LocaleSettings,
}

impl AppSettings {
    /// Validate field-level invariants that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP port is zero.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.profile.http_port == 0 {
            return Err(ConfigError::InvalidField {
                section: "profile",
                field: "http_port",
                reason: "must_not_be_zero",
            });
        }
        Ok(())
    }

    /// Build the immutable locale registry these settings describe.
    ///
    /// # Errors
    ///
    /// Returns an error when the supported set is empty, a tag is malformed,
    /// or the default is not a member of the supported set.
    pub fn locale_registry(&self) -> ConfigResult<LocaleRegistry> {
        LocaleRegistry::new(&self.locales.supported, &self.locales.default_locale)
            .map_err(|source| ConfigError::Locale { source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_the_icelandic_deployment() {
        let settings = AppSettings::default();
        assert_eq!(settings.locales.supported, vec!["is", "en"]);
        assert_eq!(settings.locales.default_locale, "is");
        assert_eq!(settings.profile.http_port, 8080);
        settings.validate().expect("defaults validate");
        let registry = settings.locale_registry().expect("registry");
        assert_eq!(registry.default_locale().as_str(), "is");
    }

    #[test]
    fn zero_port_fails_validation() {
        let mut settings = AppSettings::default();
        settings.profile.http_port = 0;
        let err = settings.validate().expect_err("zero port");
        assert!(matches!(
            err,
            ConfigError::InvalidField {
                field: "http_port",
                ..
            }
        ));
    }

    #[test]
    fn bad_locale_settings_fail_registry_construction() {
        let mut settings = AppSettings::default();
        settings.locales.default_locale = "fr".to_string();
        let err = settings.locale_registry().expect_err("bad default");
        assert!(matches!(err, ConfigError::Locale { .. }));
    }
}
