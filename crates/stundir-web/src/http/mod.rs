//! HTTP surface modules (routers, handlers, middleware).

/// Session verification boundary and middleware.
pub mod auth;
/// Shared constants and header names for HTTP surfaces.
pub mod constants;
/// Authenticated dashboard handlers.
pub mod dashboard;
/// Problem response helpers and error types.
pub mod errors;
/// Health and diagnostics endpoints.
pub mod health;
/// Locale routing middleware and active-locale propagation.
pub mod locale;
/// Marketing-site page handlers and shared rendering.
pub mod pages;
/// Router construction and server host.
pub mod router;
/// Metrics middleware for HTTP requests.
pub mod telemetry;
