//! Session verification boundary for the authenticated dashboard.
//!
//! Authentication itself is delegated to an external identity provider; this
//! module only models the verification seam and turns anonymous dashboard
//! traffic into a redirect to the localized marketing home.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    extract::State,
    http::{Request, header::COOKIE},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use stundir_i18n::href_for;
use tracing::info;

use crate::app::state::WebState;
use crate::http::constants::SESSION_COOKIE;
use crate::http::locale::current_locale;

/// Identity attached to a verified session.
#[derive(Debug, Clone)]
pub struct SessionIdentity {
    /// Opaque subject identifier issued by the identity provider.
    pub subject: String,
    /// Tenant the session is scoped to.
    pub tenant: String,
}

/// Boundary to the external identity provider.
#[async_trait]
pub trait SessionVerifier: Send + Sync {
    /// Verify an opaque session token, returning the identity it carries.
    async fn verify(&self, token: &str) -> Option<SessionIdentity>;
}

/// Gate dashboard routes behind a verified session.
///
/// Anonymous or invalid sessions are sent to the localized home page with a
/// `303 See Other`; humans get a sign-in surface, never a bare 401.
pub(crate) async fn require_session(
    State(state): State<Arc<WebState>>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let identity = match session_token(&req) {
        Some(token) => state.verifier().verify(&token).await,
        None => None,
    };
    let Some(identity) = identity else {
        state.telemetry().inc_dashboard_denied();
        let locale = current_locale(&state);
        return Redirect::to(&href_for("/", &locale)).into_response();
    };
    info!(tenant = %identity.tenant, "dashboard session verified");
    req.extensions_mut().insert(identity);
    next.run(req).await
}

fn session_token(req: &Request<Body>) -> Option<String> {
    let header = req.headers().get(COOKIE)?.to_str().ok()?;
    header.split(';').find_map(|pair| {
        pair.trim()
            .strip_prefix(SESSION_COOKIE)?
            .strip_prefix('=')
            .filter(|token| !token.is_empty())
            .map(ToString::to_string)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_with_cookie(value: &str) -> Request<Body> {
        Request::builder()
            .uri("/is/dashboard")
            .header(COOKIE, value)
            .body(Body::empty())
            .expect("request")
    }

    #[test]
    fn session_token_parses_the_named_cookie() {
        let req = request_with_cookie("theme=dark; stundir_session=abc123; other=1");
        assert_eq!(session_token(&req).as_deref(), Some("abc123"));
    }

    #[test]
    fn session_token_ignores_other_cookies_and_empty_values() {
        let req = request_with_cookie("theme=dark; stundir_session=");
        assert!(session_token(&req).is_none());

        let req = request_with_cookie("stundir_sessionx=abc");
        assert!(session_token(&req).is_none());
    }

    #[test]
    fn session_token_requires_the_cookie_header() {
        let req = Request::builder()
            .uri("/is/dashboard")
            .body(Body::empty())
            .expect("request");
        assert!(session_token(&req).is_none());
    }
}
