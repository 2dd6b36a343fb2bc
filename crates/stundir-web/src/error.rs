//! Error types for hosting the HTTP surface.

use std::io;
use std::net::SocketAddr;

use thiserror::Error;

/// Errors raised while binding or serving the HTTP listener.
#[derive(Debug, Error)]
pub enum WebServerError {
    /// Binding the TCP listener failed.
    #[error("failed to bind http listener")]
    Bind {
        /// Address the listener attempted to bind.
        addr: SocketAddr,
        /// Source IO error.
        source: io::Error,
    },
    /// The server terminated unexpectedly.
    #[error("http server terminated")]
    Serve {
        /// Source IO error.
        source: io::Error,
    },
}

/// Convenience alias for web server results.
pub type WebResult<T> = Result<T, WebServerError>;
