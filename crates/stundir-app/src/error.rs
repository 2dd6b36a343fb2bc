//! # Design
//!
//! - Centralize application-level errors for bootstrap.
//! - Keep error messages constant while carrying context fields for debugging.
//! - Preserve source errors without re-logging at call sites.

use thiserror::Error;

/// Result alias for application operations.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration operations failed.
    #[error("configuration operation failed")]
    Config {
        /// Operation identifier.
        operation: &'static str,
        /// Source configuration error.
        source: stundir_config::ConfigError,
    },
    /// Telemetry operations failed.
    #[error("telemetry operation failed")]
    Telemetry {
        /// Operation identifier.
        operation: &'static str,
        /// Source telemetry error.
        source: stundir_telemetry::TelemetryError,
    },
    /// Web server operations failed.
    #[error("web server operation failed")]
    WebServer {
        /// Operation identifier.
        operation: &'static str,
        /// Source web server error.
        source: stundir_web::WebServerError,
    },
}

impl AppError {
    pub(crate) const fn config(
        operation: &'static str,
        source: stundir_config::ConfigError,
    ) -> Self {
        Self::Config { operation, source }
    }

    pub(crate) const fn telemetry(
        operation: &'static str,
        source: stundir_telemetry::TelemetryError,
    ) -> Self {
        Self::Telemetry { operation, source }
    }

    pub(crate) const fn web_server(
        operation: &'static str,
        source: stundir_web::WebServerError,
    ) -> Self {
        Self::WebServer { operation, source }
    }
}
