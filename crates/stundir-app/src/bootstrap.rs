//! Application bootstrap and environment loading.

use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use stundir_config::{AppSettings, load_settings};
use stundir_i18n::{LocaleRegistry, MessageCatalog};
use stundir_telemetry::{GlobalContextGuard, LogFormat, LoggingConfig, Metrics};
use stundir_web::{SessionIdentity, SessionVerifier, TimeEntryCatalog, WebServer};
use tracing::info;

use crate::error::{AppError, AppResult};

/// Dependencies required to bootstrap the Stundir application.
pub(crate) struct BootstrapDependencies {
    settings: AppSettings,
    registry: Arc<LocaleRegistry>,
    catalog: MessageCatalog,
    verifier: Arc<dyn SessionVerifier>,
    entries: TimeEntryCatalog,
    telemetry: Metrics,
}

impl BootstrapDependencies {
    /// Construct production dependencies from the environment for the binary
    /// entrypoint.
    pub(crate) fn from_env() -> AppResult<Self> {
        let settings = load_settings().map_err(|err| AppError::config("settings.load", err))?;
        let registry = Arc::new(
            settings
                .locale_registry()
                .map_err(|err| AppError::config("settings.locale_registry", err))?,
        );
        let catalog = MessageCatalog::build(&registry);
        let telemetry =
            Metrics::new().map_err(|err| AppError::telemetry("telemetry.metrics", err))?;
        let verifier: Arc<dyn SessionVerifier> = Arc::new(DenyAllSessions);

        Ok(Self {
            settings,
            registry,
            catalog,
            verifier,
            entries: TimeEntryCatalog::default(),
            telemetry,
        })
    }
}

/// Session verifier used until an identity-provider integration is
/// configured: every token is rejected, so dashboard traffic lands on the
/// marketing site instead of leaking an unauthenticated dashboard.
struct DenyAllSessions;

#[async_trait]
impl SessionVerifier for DenyAllSessions {
    async fn verify(&self, _token: &str) -> Option<SessionIdentity> {
        None
    }
}

/// Entry point for the Stundir application boot sequence.
///
/// # Errors
///
/// Returns an error if dependency construction or application startup fails.
pub async fn run_app() -> AppResult<()> {
    let dependencies = BootstrapDependencies::from_env()?;
    run_app_with(dependencies).await
}

/// Boot sequence that relies entirely on injected dependencies to simplify
/// testing.
pub(crate) async fn run_app_with(dependencies: BootstrapDependencies) -> AppResult<()> {
    let BootstrapDependencies {
        settings,
        registry,
        catalog,
        verifier,
        entries,
        telemetry,
    } = dependencies;

    let logging = LoggingConfig {
        level: &settings.profile.log_level,
        format: LogFormat::from_tag(&settings.profile.log_format),
        build_sha: option_env!("STUNDIR_BUILD_SHA").unwrap_or("dev"),
    };
    stundir_telemetry::init_logging(&logging)
        .map_err(|err| AppError::telemetry("telemetry.init", err))?;
    let _context = GlobalContextGuard::new(settings.profile.instance_name.clone());

    info!(
        locales = registry.supported().len(),
        default_locale = registry.default_locale().as_str(),
        "Stundir application bootstrap starting"
    );

    let server = WebServer::new(
        &settings.profile,
        registry,
        catalog,
        verifier,
        entries,
        telemetry,
    );

    let addr = SocketAddr::new(settings.profile.bind_addr, settings.profile.http_port);
    server
        .serve(addr)
        .await
        .map_err(|err| AppError::web_server("web_server.serve", err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn deny_all_sessions_rejects_every_token() {
        assert!(DenyAllSessions.verify("any-token").await.is_none());
    }

    #[test]
    fn dependencies_assemble_from_defaults() {
        let dependencies = BootstrapDependencies::from_env().expect("dependencies");
        assert_eq!(dependencies.registry.default_locale().as_str(), "is");
        // Both shipped locales carry embedded bundles.
        assert!(dependencies.catalog.degraded().is_empty());
    }
}
