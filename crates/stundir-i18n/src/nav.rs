//! Locale-aware navigation helpers shared by handlers and rendered pages.
//!
//! Every href produced here is byte-identical to a prefix the routing
//! decision accepts as pass-through, which is what keeps server redirects
//! and generated links from ever disagreeing.

use std::sync::Arc;

use crate::locale::{LocaleId, LocaleRegistry};

/// Build the canonical locale-prefixed href for a locale-bare route.
#[must_use]
pub fn href_for(route: &str, locale: &LocaleId) -> String {
    let mut href = String::with_capacity(1 + locale.as_str().len() + route.len() + 1);
    href.push('/');
    href.push_str(locale.as_str());
    if !route.is_empty() && route != "/" {
        if !route.starts_with('/') {
            href.push('/');
        }
        href.push_str(route);
    }
    href
}

/// Strip a recognised locale prefix, exposing the locale-bare logical route.
///
/// Paths without a supported prefix are returned unchanged with no locale.
#[must_use]
pub fn logical_route<'p>(path: &'p str, registry: &LocaleRegistry) -> (&'p str, Option<LocaleId>) {
    let Some(trimmed) = path.strip_prefix('/') else {
        return (path, None);
    };
    let segment = trimmed.split('/').next().unwrap_or("");
    match registry.get(segment) {
        Some(locale) => {
            let rest = &path[1 + segment.len()..];
            let route = if rest.is_empty() { "/" } else { rest };
            (route, Some(locale.clone()))
        }
        None => (path, None),
    }
}

/// Programmatic navigation that always lands on canonical locale-prefixed
/// paths; handlers turn its targets into redirect responses.
#[derive(Debug, Clone)]
pub struct Navigator {
    registry: Arc<LocaleRegistry>,
}

impl Navigator {
    /// Wrap the shared registry.
    #[must_use]
    pub const fn new(registry: Arc<LocaleRegistry>) -> Self {
        Self { registry }
    }

    /// The registry backing this navigator.
    #[must_use]
    pub fn registry(&self) -> &LocaleRegistry {
        &self.registry
    }

    /// Canonical href for a route in the given locale.
    #[must_use]
    pub fn href(&self, route: &str, locale: &LocaleId) -> String {
        href_for(route, locale)
    }

    /// Target for moving the current path to another locale, preserving the
    /// logical route so the transition lands on the same page.
    #[must_use]
    pub fn switch_locale(&self, current_path: &str, target: &LocaleId) -> String {
        let (route, _) = logical_route(current_path, &self.registry);
        href_for(route, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::{ResolutionOutcome, RoutingPolicy, route_request};

    fn registry() -> Arc<LocaleRegistry> {
        Arc::new(LocaleRegistry::new(&["is".to_string(), "en".to_string()], "is").expect("registry"))
    }

    #[test]
    fn href_for_prefixes_routes() {
        let registry = registry();
        let en = registry.get("en").expect("en").clone();
        assert_eq!(href_for("/", &en), "/en");
        assert_eq!(href_for("", &en), "/en");
        assert_eq!(href_for("/dashboard", &en), "/en/dashboard");
        assert_eq!(href_for("pricing", &en), "/en/pricing");
    }

    #[test]
    fn hrefs_always_pass_the_routing_decision() {
        let registry = registry();
        let policy = RoutingPolicy::default();
        for locale in registry.supported() {
            for route in ["/", "/dashboard", "/pricing", "/dashboard/entries"] {
                let href = href_for(route, locale);
                let outcome = route_request(&href, None, &registry, &policy);
                assert_eq!(
                    outcome,
                    ResolutionOutcome::PassThrough(locale.clone()),
                    "href {href} must pass through as {locale}"
                );
            }
        }
    }

    #[test]
    fn logical_route_strips_recognised_prefixes_only() {
        let registry = registry();
        let (route, locale) = logical_route("/en/dashboard", &registry);
        assert_eq!(route, "/dashboard");
        assert_eq!(locale.map(|l| l.as_str().to_string()), Some("en".into()));

        let (route, locale) = logical_route("/en", &registry);
        assert_eq!(route, "/");
        assert!(locale.is_some());

        let (route, locale) = logical_route("/fr/dashboard", &registry);
        assert_eq!(route, "/fr/dashboard");
        assert!(locale.is_none());
    }

    #[test]
    fn switch_locale_preserves_the_logical_route() {
        let registry = registry();
        let navigator = Navigator::new(Arc::clone(&registry));
        let en = registry.get("en").expect("en").clone();
        let is = registry.get("is").expect("is").clone();

        assert_eq!(navigator.switch_locale("/is/dashboard", &en), "/en/dashboard");
        assert_eq!(navigator.switch_locale("/en", &is), "/is");
        // A path without a recognised prefix re-prefixes as-is.
        assert_eq!(navigator.switch_locale("/pricing", &en), "/en/pricing");
    }
}
