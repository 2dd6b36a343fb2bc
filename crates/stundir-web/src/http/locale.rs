//! Locale routing middleware and active-locale propagation.
//!
//! # Design
//! - The middleware only maps the shared routing decision onto HTTP; the
//!   decision itself lives in `stundir_i18n::resolve` so server redirects and
//!   generated links cannot drift apart.
//! - The active locale rides a task-local scope for the request's lifetime,
//!   so handlers never re-derive it from the path.
//! - Every request yields exactly one of pass-through, permanent redirect, or
//!   localized not-found; the middleware itself cannot fail.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use stundir_i18n::{LocaleId, ResolutionOutcome, route_request};

use crate::app::state::WebState;
use crate::http::pages;

tokio::task_local! {
    static ACTIVE_LOCALE: LocaleId;
}

/// Locale established by the middleware for the current request, falling back
/// to the registry default outside a request scope.
pub(crate) fn current_locale(state: &WebState) -> LocaleId {
    ACTIVE_LOCALE
        .try_with(Clone::clone)
        .unwrap_or_else(|_| state.registry().default_locale().clone())
}

/// Enforce the canonical locale-prefixed URL shape for every inbound request.
pub(crate) async fn enforce_canonical_locale(
    State(state): State<Arc<WebState>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let outcome = route_request(
        req.uri().path(),
        req.uri().query(),
        state.registry(),
        state.policy(),
    );
    match outcome {
        ResolutionOutcome::PassThrough(locale) => {
            ACTIVE_LOCALE.scope(locale, next.run(req)).await
        }
        ResolutionOutcome::Redirect { target, locale } => {
            state.telemetry().inc_locale_redirect(locale.as_str());
            Redirect::permanent(&target).into_response()
        }
        ResolutionOutcome::NotFound => {
            state.telemetry().inc_locale_not_found();
            pages::not_found_response(&state, state.registry().default_locale())
        }
    }
}
