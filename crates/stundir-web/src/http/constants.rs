//! Shared constants for the HTTP surface.

/// Header carrying the request correlation identifier.
pub(crate) const HEADER_REQUEST_ID: &str = "x-request-id";
/// Cookie holding the opaque session token issued by the identity provider.
pub const SESSION_COOKIE: &str = "stundir_session";

/// Problem type for unexpected internal failures.
pub(crate) const PROBLEM_INTERNAL: &str = "https://stundir.dev/problems/internal";
