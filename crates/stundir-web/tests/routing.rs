//! Routing-layer properties exercised through the public server surface.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use stundir_i18n::{MessageCatalog, href_for};
use stundir_telemetry::Metrics;
use stundir_test_support::{fixtures, mocks};
use stundir_web::WebServer;
use tower::util::ServiceExt;

fn server() -> WebServer {
    let registry = fixtures::registry();
    let catalog = MessageCatalog::build(&registry);
    WebServer::new(
        &fixtures::profile(),
        Arc::clone(&registry),
        catalog,
        Arc::new(mocks::StaticSessionVerifier::with_default_session()),
        fixtures::seeded_entries(),
        Metrics::new().expect("metrics"),
    )
}

async fn status_and_location(server: &WebServer, path: &str) -> (StatusCode, Option<String>) {
    let response = server
        .router()
        .oneshot(
            Request::builder()
                .uri(path)
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(ToString::to_string);
    (response.status(), location)
}

#[tokio::test]
async fn every_locale_bare_page_route_redirects_exactly_once() {
    let server = server();
    for path in ["/", "/pricing", "/about", "/dashboard", "/dashboard/entries"] {
        let (status, location) = status_and_location(&server, path).await;
        assert_eq!(status, StatusCode::PERMANENT_REDIRECT, "path {path}");
        let target = location.expect("redirect target");
        assert!(target.starts_with("/is"), "target {target}");

        // Feeding the target back in never redirects again.
        let (status, _) = status_and_location(&server, &target).await;
        assert_ne!(
            status,
            StatusCode::PERMANENT_REDIRECT,
            "target {target} redirected twice"
        );
    }
}

#[tokio::test]
async fn generated_hrefs_agree_with_the_middleware() {
    let server = server();
    let registry = fixtures::registry();
    for locale in registry.supported() {
        for route in ["/", "/pricing", "/about"] {
            let href = href_for(route, locale);
            let (status, _) = status_and_location(&server, &href).await;
            assert_eq!(status, StatusCode::OK, "href {href}");
        }
    }
}

#[tokio::test]
async fn unknown_canonical_routes_render_the_localized_not_found_page() {
    let server = server();
    let (status, _) = status_and_location(&server, "/en/no-such-page").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unsupported_locale_prefixes_are_not_repaired() {
    let server = server();
    let (status, location) = status_and_location(&server, "/fr/pricing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(location.is_none());
}
