//! Health and diagnostics endpoints.

use std::sync::Arc;

use axum::{Json, body::Body, extract::State, http::StatusCode, response::Response};
use serde::Serialize;
use stundir_i18n::LocaleId;
use stundir_telemetry::build_sha;
use tracing::error;

use crate::app::state::WebState;
use crate::http::errors::PageError;

#[derive(Serialize)]
pub(crate) struct HealthResponse {
    pub(crate) status: &'static str,
    pub(crate) build: String,
    pub(crate) locales: usize,
}

#[derive(Serialize)]
pub(crate) struct FullHealthResponse {
    pub(crate) status: &'static str,
    pub(crate) build: String,
    pub(crate) default_locale: String,
    pub(crate) degraded_locales: Vec<String>,
    pub(crate) metrics: stundir_telemetry::MetricsSnapshot,
}

#[derive(Serialize)]
pub(crate) struct WellKnownResponse {
    pub(crate) instance_name: String,
    pub(crate) supported_locales: Vec<String>,
    pub(crate) default_locale: String,
}

pub(crate) async fn health(State(state): State<Arc<WebState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        build: build_sha().to_string(),
        locales: state.registry().supported().len(),
    })
}

pub(crate) async fn health_full(State(state): State<Arc<WebState>>) -> Json<FullHealthResponse> {
    let degraded_locales: Vec<String> = state
        .catalog()
        .degraded()
        .iter()
        .map(|locale| locale.as_str().to_string())
        .collect();
    let status = if degraded_locales.is_empty() {
        "ok"
    } else {
        "degraded"
    };
    Json(FullHealthResponse {
        status,
        build: build_sha().to_string(),
        default_locale: state.registry().default_locale().as_str().to_string(),
        degraded_locales,
        metrics: state.telemetry().snapshot(),
    })
}

pub(crate) async fn well_known(State(state): State<Arc<WebState>>) -> Json<WellKnownResponse> {
    Json(WellKnownResponse {
        instance_name: state.instance_name().to_string(),
        supported_locales: state
            .registry()
            .supported()
            .iter()
            .map(LocaleId::as_str)
            .map(ToString::to_string)
            .collect(),
        default_locale: state.registry().default_locale().as_str().to_string(),
    })
}

pub(crate) async fn metrics(State(state): State<Arc<WebState>>) -> Result<Response, PageError> {
    match state.telemetry().render() {
        Ok(body) => Response::builder()
            .status(StatusCode::OK)
            .header(
                axum::http::header::CONTENT_TYPE,
                "text/plain; version=0.0.4",
            )
            .body(Body::from(body))
            .map_err(|err| {
                error!(error = %err, "failed to build metrics response");
                PageError::internal("failed to build metrics response")
            }),
        Err(err) => {
            error!(error = %err, "failed to render metrics");
            Err(PageError::internal("failed to render metrics"))
        }
    }
}
