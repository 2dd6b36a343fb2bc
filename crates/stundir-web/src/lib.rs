//! HTTP delivery surface for Stundir: the locale routing middleware, the
//! marketing and dashboard routers, and the session boundary.
//!
//! Layout: `http/` (routers, handlers, middleware), `app/` (shared state).

/// Shared application state for the HTTP layer.
pub mod app;
/// Server-level error types.
pub mod error;
/// HTTP surface modules (routers, handlers, middleware).
pub mod http;

pub use app::state::{TimeEntry, TimeEntryCatalog, WebState};
pub use error::WebServerError;
pub use http::auth::{SessionIdentity, SessionVerifier};
pub use http::constants::SESSION_COOKIE;
pub use http::router::WebServer;
