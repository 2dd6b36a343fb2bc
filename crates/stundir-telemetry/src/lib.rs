//! Telemetry primitives shared across the Stundir workspace.
//!
//! Layout: `init.rs` (tracing subscriber setup), `context.rs` (request
//! context propagation), `layers.rs` (`x-request-id` tower layers),
//! `metrics.rs` (Prometheus registry), `error.rs` (structured errors).

pub mod context;
pub mod error;
pub mod init;
pub mod layers;
pub mod metrics;

pub use context::{
    GlobalContextGuard, current_request_id, current_route, set_request_context,
    with_request_context,
};
pub use error::{TelemetryError, TelemetryResult};
pub use init::{DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, build_sha, init_logging};
pub use layers::{propagate_request_id_layer, set_request_id_layer};
pub use metrics::{Metrics, MetricsSnapshot};
