//! Router construction and server host.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    http::Request,
    middleware,
    routing::get,
};
use stundir_config::AppProfile;
use stundir_i18n::{LocaleRegistry, MessageCatalog, RoutingPolicy};
use stundir_telemetry::{Metrics, build_sha};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::Span;

use crate::app::state::{TimeEntryCatalog, WebState};
use crate::error::{WebResult, WebServerError};
use crate::http::auth::{SessionVerifier, require_session};
use crate::http::constants::HEADER_REQUEST_ID;
use crate::http::dashboard;
use crate::http::health::{health, health_full, metrics, well_known};
use crate::http::locale::enforce_canonical_locale;
use crate::http::pages;
use crate::http::telemetry::HttpMetricsLayer;

/// Axum router wrapper that hosts the Stundir web application.
pub struct WebServer {
    router: Router,
}

impl WebServer {
    /// Construct the server with shared dependencies wired through
    /// application state.
    ///
    /// Startup-level registry facts (locale count, degraded bundles) are
    /// recorded on the metrics registry here, once.
    #[must_use]
    pub fn new(
        profile: &AppProfile,
        registry: Arc<LocaleRegistry>,
        catalog: MessageCatalog,
        verifier: Arc<dyn SessionVerifier>,
        entries: TimeEntryCatalog,
        telemetry: Metrics,
    ) -> Self {
        let supported = i64::try_from(registry.supported().len()).unwrap_or(i64::MAX);
        telemetry.set_supported_locales(supported);
        for _ in catalog.degraded() {
            telemetry.inc_bundle_fallback();
        }

        let state = Arc::new(WebState::new(
            profile.instance_name.clone(),
            registry,
            RoutingPolicy::default(),
            catalog,
            verifier,
            entries,
            telemetry.clone(),
        ));

        let trace_layer = TraceLayer::new_for_http()
            .make_span_with(|request: &Request<_>| {
                let method = request.method().clone();
                let uri_path = request.uri().path();
                let request_id = request
                    .headers()
                    .get(HEADER_REQUEST_ID)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("")
                    .to_string();

                tracing::info_span!(
                    "http.request",
                    method = %method,
                    route = %uri_path,
                    request_id = %request_id,
                    build_sha = %build_sha(),
                    status_code = tracing::field::Empty,
                    latency_ms = tracing::field::Empty
                )
            })
            .on_response(
                |response: &axum::response::Response, latency: Duration, span: &Span| {
                    let status = response.status().as_u16();
                    span.record("status_code", status);
                    let latency_ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
                    span.record("latency_ms", latency_ms);
                },
            );
        let layered = ServiceBuilder::new()
            .layer(stundir_telemetry::propagate_request_id_layer())
            .layer(stundir_telemetry::set_request_id_layer())
            .layer(trace_layer)
            .layer(HttpMetricsLayer::new(telemetry));

        let router = Self::build_router(&state)
            .fallback(pages::not_found_fallback)
            .layer(middleware::from_fn_with_state(
                state.clone(),
                enforce_canonical_locale,
            ))
            .layer(layered)
            .with_state(state);

        Self { router }
    }

    fn build_router(state: &Arc<WebState>) -> Router<Arc<WebState>> {
        Self::service_routes().merge(Self::page_routes(state))
    }

    /// Unprefixed machine endpoints; the routing policy excludes these paths
    /// from locale handling before any rule runs.
    fn service_routes() -> Router<Arc<WebState>> {
        Router::new()
            .route("/health", get(health))
            .route("/health/full", get(health_full))
            .route("/.well-known/stundir.json", get(well_known))
            .route("/metrics", get(metrics))
            .route("/robots.txt", get(pages::robots))
    }

    /// Every page route lives under the locale prefix; the middleware has
    /// already guaranteed the prefix is a supported locale by the time
    /// routing happens.
    fn page_routes(state: &Arc<WebState>) -> Router<Arc<WebState>> {
        let require_session = middleware::from_fn_with_state(state.clone(), require_session);

        let dashboard_routes = Router::new()
            .route("/dashboard", get(dashboard::overview))
            .route(
                "/dashboard/entries",
                get(dashboard::entries).post(dashboard::record_entry),
            )
            .route_layer(require_session);

        let pages_routes = Router::new()
            .route("/", get(pages::home))
            .route("/pricing", get(pages::pricing))
            .route("/about", get(pages::about))
            .route("/switch/{target}", get(pages::switch_locale))
            .merge(dashboard_routes);

        Router::new().nest("/{locale}", pages_routes)
    }

    /// The configured router, for embedding and request-level tests.
    #[must_use]
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve the application using the configured router on the supplied
    /// address.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener fails to bind or the server
    /// terminates unexpectedly.
    pub async fn serve(self, addr: SocketAddr) -> WebResult<()> {
        tracing::info!("Starting web server on {}", addr);
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| WebServerError::Bind { addr, source })?;
        axum::serve(listener, self.router.into_make_service())
            .await
            .map_err(|source| WebServerError::Serve { source })?;
        Ok(())
    }
}
