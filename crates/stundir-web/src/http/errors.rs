//! RFC9457-style error wrapper for the machine-facing endpoints.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::http::constants::PROBLEM_INTERNAL;

/// Problem-details payload for machine-facing endpoints.
#[derive(Debug, Serialize)]
pub(crate) struct ProblemDetails {
    /// Problem type URI.
    #[serde(rename = "type")]
    pub(crate) kind: String,
    /// Short human-readable summary.
    pub(crate) title: String,
    /// HTTP status code mirrored into the body.
    pub(crate) status: u16,
    /// Optional request-specific detail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) detail: Option<String>,
}

/// Structured error for endpoints that answer JSON rather than pages.
#[derive(Debug)]
pub(crate) struct PageError {
    status: StatusCode,
    kind: &'static str,
    title: &'static str,
    detail: Option<String>,
}

impl PageError {
    const fn new(status: StatusCode, kind: &'static str, title: &'static str) -> Self {
        Self {
            status,
            kind,
            title,
            detail: None,
        }
    }

    fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub(crate) fn internal(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            PROBLEM_INTERNAL,
            "internal server error",
        )
        .with_detail(message)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let body = ProblemDetails {
            kind: self.kind.to_string(),
            title: self.title.to_string(),
            status: self.status.as_u16(),
            detail: self.detail,
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_error_renders_problem_details() {
        let response = PageError::internal("boom").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
