//! Marketing-site page handlers and shared page rendering.

use std::fmt::Write as _;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use stundir_i18n::{LocaleId, href_for, resolve};

use crate::app::state::WebState;
use crate::http::locale::current_locale;

/// Render the localized marketing home page.
pub(crate) async fn home(State(state): State<Arc<WebState>>) -> Html<String> {
    let locale = current_locale(&state);
    let bundle = state.catalog().bundle(&locale);
    let mut body = String::new();
    let _ = write!(
        body,
        "<h1>{}</h1>\n<p>{}</p>\n<p><a href=\"{}\">{}</a></p>",
        bundle.text("home.title"),
        bundle.text("home.tagline"),
        href_for("/dashboard", &locale),
        bundle.text("home.cta"),
    );
    layout(&state, &locale, "/", bundle.text("home.title"), &body)
}

/// Render the localized pricing page.
pub(crate) async fn pricing(State(state): State<Arc<WebState>>) -> Html<String> {
    let locale = current_locale(&state);
    let bundle = state.catalog().bundle(&locale);
    let mut body = String::new();
    let _ = write!(
        body,
        "<h1>{title}</h1>\n<ul>\n<li>{solo} &mdash; 1.900 kr {per}</li>\n<li>{team} &mdash; 9.900 kr {per}</li>\n</ul>",
        title = bundle.text("pricing.title"),
        solo = bundle.text("pricing.solo"),
        team = bundle.text("pricing.team"),
        per = bundle.text("pricing.per_month"),
    );
    layout(&state, &locale, "/pricing", bundle.text("pricing.title"), &body)
}

/// Render the localized about page.
pub(crate) async fn about(State(state): State<Arc<WebState>>) -> Html<String> {
    let locale = current_locale(&state);
    let bundle = state.catalog().bundle(&locale);
    let mut body = String::new();
    let _ = write!(
        body,
        "<h1>{}</h1>\n<p>{}</p>",
        bundle.text("about.title"),
        bundle.text("about.body"),
    );
    layout(&state, &locale, "/about", bundle.text("about.title"), &body)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SwitchQuery {
    #[serde(default)]
    from: Option<String>,
}

/// Switch the active locale, landing on the same logical route.
///
/// An unsupported target degrades to the default locale silently; locale
/// selection is never an error. Responds `303 See Other` so a switch issued
/// from a form is not re-submitted.
pub(crate) async fn switch_locale(
    State(state): State<Arc<WebState>>,
    Path((_, target)): Path<(String, String)>,
    Query(query): Query<SwitchQuery>,
) -> Redirect {
    let target = resolve(Some(&target), state.registry()).clone();
    let from = query
        .from
        .as_deref()
        .filter(|route| route.starts_with('/'))
        .unwrap_or("/");
    Redirect::to(&state.navigator().switch_locale(from, &target))
}

/// Crawler policy for the marketing site.
pub(crate) async fn robots() -> &'static str {
    "User-agent: *\nAllow: /\n"
}

/// Fallback for canonical paths that match no page route.
pub(crate) async fn not_found_fallback(State(state): State<Arc<WebState>>) -> Response {
    let locale = current_locale(&state);
    not_found_response(&state, &locale)
}

/// Localized not-found page with a 404 status.
pub(crate) fn not_found_response(state: &WebState, locale: &LocaleId) -> Response {
    let bundle = state.catalog().bundle(locale);
    let mut body = String::new();
    let _ = write!(
        body,
        "<h1>{}</h1>\n<p>{}</p>\n<p><a href=\"{}\">{}</a></p>",
        bundle.text("notfound.title"),
        bundle.text("notfound.body"),
        href_for("/", locale),
        bundle.text("notfound.home_link"),
    );
    let page = layout(state, locale, "/", bundle.text("notfound.title"), &body);
    (StatusCode::NOT_FOUND, page).into_response()
}

/// Shared page chrome: navigation, the locale switch link, and the footer.
///
/// `route` is the page's locale-bare logical route; the switch link carries
/// it so changing language lands on the same page.
pub(crate) fn layout(
    state: &WebState,
    locale: &LocaleId,
    route: &str,
    title: &str,
    body: &str,
) -> Html<String> {
    let bundle = state.catalog().bundle(locale);
    let mut nav = String::new();
    for (target, key) in [
        ("/", "nav.home"),
        ("/pricing", "nav.pricing"),
        ("/about", "nav.about"),
        ("/dashboard", "nav.dashboard"),
    ] {
        let _ = write!(
            nav,
            "<a href=\"{}\">{}</a> ",
            href_for(target, locale),
            bundle.text(key),
        );
    }
    if let Some(other) = state
        .registry()
        .supported()
        .iter()
        .find(|candidate| *candidate != locale)
    {
        let _ = write!(
            nav,
            "<a href=\"/{}/switch/{}?from={}\" rel=\"alternate\" hreflang=\"{}\">{}</a>",
            locale.as_str(),
            other.as_str(),
            route,
            other.as_str(),
            bundle.text("nav.switch_locale"),
        );
    }
    Html(format!(
        "<!doctype html>\n<html lang=\"{lang}\">\n<head><meta charset=\"utf-8\"><title>{title} \
         &middot; {site}</title></head>\n<body>\n<nav>{nav}</nav>\n<main>\n{body}\n</main>\n\
         <footer>{instance}</footer>\n</body>\n</html>\n",
        lang = locale.as_str(),
        site = bundle.text("site.name"),
        instance = escape_html(state.instance_name()),
    ))
}

/// Minimal HTML escaping for user-supplied text interpolated into pages.
pub(crate) fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use stundir_test_support::fixtures;

    #[test]
    fn escape_html_neutralises_markup() {
        assert_eq!(
            escape_html("<b>\"x\" & 'y'</b>"),
            "&lt;b&gt;&quot;x&quot; &amp; &#39;y&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn layout_links_are_locale_prefixed() {
        let state = fixtures::web_state();
        let en = state.registry().get("en").expect("en").clone();
        let Html(page) = layout(&state, &en, "/pricing", "Title", "<p>body</p>");
        assert!(page.contains("href=\"/en/pricing\""));
        assert!(page.contains("href=\"/en/dashboard\""));
        assert!(page.contains("lang=\"en\""));
        // The switch link targets the other locale and keeps the route.
        assert!(page.contains("/en/switch/is?from=/pricing"));
    }

    #[test]
    fn not_found_page_renders_in_the_requested_locale() {
        let state = fixtures::web_state();
        let is = state.registry().get("is").expect("is").clone();
        let response = not_found_response(&state, &is);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
