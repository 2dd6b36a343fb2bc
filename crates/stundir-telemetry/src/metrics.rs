//! Prometheus-backed metrics registry and snapshot helpers.
//!
//! # Design
//! - Encapsulates collector registration to keep the public API small.
//! - Exposes the counters relevant to locale routing and page delivery.

use prometheus::{Encoder, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};
use serde::Serialize;

use crate::error::{TelemetryError, TelemetryResult};

/// Prometheus-backed metrics registry shared across services.
#[derive(Clone)]
pub struct Metrics {
    inner: std::sync::Arc<MetricsInner>,
}

struct MetricsInner {
    registry: Registry,
    http_requests_total: IntCounterVec,
    locale_redirects_total: IntCounterVec,
    locale_not_found_total: IntCounter,
    bundle_fallbacks_total: IntCounter,
    dashboard_denied_total: IntCounter,
    supported_locales: IntGauge,
}

/// Snapshot of selected gauges and counters for health reporting.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    /// Number of locales the registry serves.
    pub supported_locales: i64,
    /// Total requests rejected because of an unrecognised locale prefix.
    pub locale_not_found_total: u64,
    /// Total locales degraded to the default message bundle.
    pub bundle_fallbacks_total: u64,
    /// Total dashboard requests turned away for lack of a session.
    pub dashboard_denied_total: u64,
}

impl Metrics {
    /// Construct a new metrics registry with the standard collectors registered.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the Prometheus collectors cannot be built
    /// or registered.
    pub fn new() -> TelemetryResult<Self> {
        let registry = Registry::new();

        let http_requests_total = IntCounterVec::new(
            Opts::new("http_requests_total", "Total HTTP requests received"),
            &["route", "code"],
        )
        .map_err(|source| TelemetryError::MetricsCollector {
            name: "http_requests_total",
            source,
        })?;
        let locale_redirects_total = IntCounterVec::new(
            Opts::new(
                "locale_redirects_total",
                "Redirects issued to the canonical locale-prefixed path",
            ),
            &["locale"],
        )
        .map_err(|source| TelemetryError::MetricsCollector {
            name: "locale_redirects_total",
            source,
        })?;
        let locale_not_found_total = IntCounter::with_opts(Opts::new(
            "locale_not_found_total",
            "Requests rejected for carrying an unrecognised locale prefix",
        ))
        .map_err(|source| TelemetryError::MetricsCollector {
            name: "locale_not_found_total",
            source,
        })?;
        let bundle_fallbacks_total = IntCounter::with_opts(Opts::new(
            "bundle_fallbacks_total",
            "Locales degraded to the default message bundle",
        ))
        .map_err(|source| TelemetryError::MetricsCollector {
            name: "bundle_fallbacks_total",
            source,
        })?;
        let dashboard_denied_total = IntCounter::with_opts(Opts::new(
            "dashboard_denied_total",
            "Dashboard requests turned away for lack of a valid session",
        ))
        .map_err(|source| TelemetryError::MetricsCollector {
            name: "dashboard_denied_total",
            source,
        })?;
        let supported_locales = IntGauge::with_opts(Opts::new(
            "supported_locales",
            "Number of locales in the registry",
        ))
        .map_err(|source| TelemetryError::MetricsCollector {
            name: "supported_locales",
            source,
        })?;

        register(&registry, "http_requests_total", http_requests_total.clone())?;
        register(
            &registry,
            "locale_redirects_total",
            locale_redirects_total.clone(),
        )?;
        register(
            &registry,
            "locale_not_found_total",
            locale_not_found_total.clone(),
        )?;
        register(
            &registry,
            "bundle_fallbacks_total",
            bundle_fallbacks_total.clone(),
        )?;
        register(
            &registry,
            "dashboard_denied_total",
            dashboard_denied_total.clone(),
        )?;
        register(&registry, "supported_locales", supported_locales.clone())?;

        Ok(Self {
            inner: std::sync::Arc::new(MetricsInner {
                registry,
                http_requests_total,
                locale_redirects_total,
                locale_not_found_total,
                bundle_fallbacks_total,
                dashboard_denied_total,
                supported_locales,
            }),
        })
    }

    /// Increment the HTTP request counter for the given route and status code.
    pub fn inc_http_request(&self, route: &str, status: u16) {
        self.inner
            .http_requests_total
            .with_label_values(&[route, &status.to_string()])
            .inc();
    }

    /// Increment the canonical-path redirect counter for a locale.
    pub fn inc_locale_redirect(&self, locale: &str) {
        self.inner
            .locale_redirects_total
            .with_label_values(&[locale])
            .inc();
    }

    /// Increment the unrecognised-locale counter.
    pub fn inc_locale_not_found(&self) {
        self.inner.locale_not_found_total.inc();
    }

    /// Increment the bundle fallback counter.
    pub fn inc_bundle_fallback(&self) {
        self.inner.bundle_fallbacks_total.inc();
    }

    /// Increment the dashboard session-denied counter.
    pub fn inc_dashboard_denied(&self) {
        self.inner.dashboard_denied_total.inc();
    }

    /// Record the number of locales the registry serves.
    pub fn set_supported_locales(&self, count: i64) {
        self.inner.supported_locales.set(count);
    }

    /// Render the metrics registry using the Prometheus text exposition format.
    ///
    /// # Errors
    ///
    /// Returns an error if the metrics cannot be encoded or if the encoded
    /// buffer is not valid UTF-8.
    pub fn render(&self) -> TelemetryResult<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.inner.registry.gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .map_err(|source| TelemetryError::MetricsEncode { source })?;
        String::from_utf8(buffer).map_err(|source| TelemetryError::MetricsUtf8 { source })
    }

    /// Take a point-in-time snapshot of the most relevant gauges and counters.
    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            supported_locales: self.inner.supported_locales.get(),
            locale_not_found_total: self.inner.locale_not_found_total.get(),
            bundle_fallbacks_total: self.inner.bundle_fallbacks_total.get(),
            dashboard_denied_total: self.inner.dashboard_denied_total.get(),
        }
    }
}

fn register<C>(registry: &Registry, name: &'static str, collector: C) -> TelemetryResult<()>
where
    C: prometheus::core::Collector + 'static,
{
    registry
        .register(Box::new(collector))
        .map_err(|source| TelemetryError::MetricsRegister { name, source })
}
