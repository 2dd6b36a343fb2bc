//! # Design
//!
//! - One pure decision function serves both the server middleware and the
//!   navigation helpers, so the two paths cannot drift apart.
//! - Every request path maps to exactly one outcome; absence of a valid
//!   locale is the fallback case, never an error.
//! - Exclusions (internal prefixes, static-asset extensions) are checked
//!   before any locale rule runs and take priority over all of them.

use crate::locale::{LocaleId, LocaleRegistry};

/// Outcome of routing a single request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOutcome {
    /// Forward the request unchanged, rendering with the given locale.
    PassThrough(LocaleId),
    /// Issue a permanent redirect to the canonical locale-prefixed path.
    Redirect {
        /// Canonical target, query string preserved verbatim.
        target: String,
        /// Locale the target path carries.
        locale: LocaleId,
    },
    /// The path carried a locale-shaped prefix that is not supported.
    NotFound,
}

/// Path classes excluded from locale handling.
///
/// Built once at startup alongside the registry and never mutated.
#[derive(Debug, Clone)]
pub struct RoutingPolicy {
    internal_prefixes: Vec<String>,
    asset_extensions: Vec<String>,
}

impl Default for RoutingPolicy {
    fn default() -> Self {
        Self {
            internal_prefixes: ["/health", "/metrics", "/.well-known", "/assets"]
                .iter()
                .map(ToString::to_string)
                .collect(),
            asset_extensions: [
                "ico", "png", "jpg", "jpeg", "gif", "svg", "webp", "css", "js", "mjs", "map",
                "txt", "xml", "pdf", "doc", "docx", "xls", "xlsx", "csv", "zip", "gz", "woff",
                "woff2", "ttf", "otf", "eot", "webmanifest",
            ]
            .iter()
            .map(ToString::to_string)
            .collect(),
        }
    }
}

impl RoutingPolicy {
    /// Policy with explicit prefixes and extensions, lowercasing extensions
    /// so matching stays case-insensitive.
    #[must_use]
    pub fn new(internal_prefixes: Vec<String>, asset_extensions: Vec<String>) -> Self {
        Self {
            internal_prefixes,
            asset_extensions: asset_extensions
                .into_iter()
                .map(|ext| ext.to_ascii_lowercase())
                .collect(),
        }
    }

    /// Whether the path bypasses locale handling entirely.
    #[must_use]
    pub fn is_excluded(&self, path: &str) -> bool {
        if self
            .internal_prefixes
            .iter()
            .any(|prefix| matches_prefix(path, prefix))
        {
            return true;
        }
        final_segment_extension(path).is_some_and(|ext| {
            self.asset_extensions
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext))
        })
    }
}

/// Resolve a candidate locale tag against the registry.
///
/// Exact, case-sensitive membership returns the candidate's interned id; any
/// other input yields the default. Total and side-effect-free: an unsupported
/// candidate is the fallback case, not an error.
#[must_use]
pub fn resolve<'r>(candidate: Option<&str>, registry: &'r LocaleRegistry) -> &'r LocaleId {
    candidate
        .and_then(|tag| registry.get(tag))
        .unwrap_or_else(|| registry.default_locale())
}

/// Decide how a request path should be served.
///
/// Decision order, first match wins:
/// 1. excluded paths pass through untouched;
/// 2. a supported locale prefix passes through with that locale active;
/// 3. a locale-shaped but unsupported prefix is a not-found;
/// 4. everything else redirects to the default-locale canonical path.
///
/// The redirect is idempotent: feeding the target back through this function
/// always yields `PassThrough`.
#[must_use]
pub fn route_request(
    path: &str,
    query: Option<&str>,
    registry: &LocaleRegistry,
    policy: &RoutingPolicy,
) -> ResolutionOutcome {
    let path = if path.is_empty() { "/" } else { path };
    if policy.is_excluded(path) {
        return ResolutionOutcome::PassThrough(resolve(first_segment(path), registry).clone());
    }
    match first_segment(path) {
        Some(segment) => {
            if let Some(locale) = registry.get(segment) {
                ResolutionOutcome::PassThrough(locale.clone())
            } else if looks_like_locale_tag(segment) {
                ResolutionOutcome::NotFound
            } else {
                redirect_to_default(path, query, registry)
            }
        }
        None => redirect_to_default(path, query, registry),
    }
}

fn redirect_to_default(
    path: &str,
    query: Option<&str>,
    registry: &LocaleRegistry,
) -> ResolutionOutcome {
    let locale = registry.default_locale().clone();
    let mut target = String::with_capacity(1 + locale.as_str().len() + path.len());
    target.push('/');
    target.push_str(locale.as_str());
    if path != "/" {
        target.push_str(path);
    }
    if let Some(query) = query.filter(|value| !value.is_empty()) {
        target.push('?');
        target.push_str(query);
    }
    ResolutionOutcome::Redirect { target, locale }
}

fn first_segment(path: &str) -> Option<&str> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    let segment = trimmed.split('/').next().unwrap_or("");
    (!segment.is_empty()).then_some(segment)
}

/// Structural test for "looks like a locale slot": a 2-3 letter primary
/// subtag, optionally followed by a 2-4 character alphanumeric region.
fn looks_like_locale_tag(segment: &str) -> bool {
    let (primary, region) = segment
        .split_once('-')
        .map_or((segment, None), |(primary, region)| {
            (primary, Some(region))
        });
    let primary_ok =
        (2..=3).contains(&primary.len()) && primary.bytes().all(|byte| byte.is_ascii_alphabetic());
    let region_ok = region.is_none_or(|region| {
        (2..=4).contains(&region.len()) && region.bytes().all(|byte| byte.is_ascii_alphanumeric())
    });
    primary_ok && region_ok
}

fn matches_prefix(path: &str, prefix: &str) -> bool {
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

fn final_segment_extension(path: &str) -> Option<&str> {
    let segment = path.rsplit('/').next().unwrap_or(path);
    segment
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> LocaleRegistry {
        LocaleRegistry::new(&["is".to_string(), "en".to_string()], "is").expect("registry")
    }

    fn decide(path: &str) -> ResolutionOutcome {
        route_request(path, None, &registry(), &RoutingPolicy::default())
    }

    #[test]
    fn root_redirects_to_default_locale() {
        assert_eq!(
            decide("/"),
            ResolutionOutcome::Redirect {
                target: "/is".to_string(),
                locale: registry().default_locale().clone(),
            }
        );
    }

    #[test]
    fn bare_route_redirects_with_segments_preserved() {
        let ResolutionOutcome::Redirect { target, .. } = decide("/dashboard") else {
            panic!("expected redirect");
        };
        assert_eq!(target, "/is/dashboard");

        let ResolutionOutcome::Redirect { target, .. } = decide("/dashboard/entries") else {
            panic!("expected redirect");
        };
        assert_eq!(target, "/is/dashboard/entries");
    }

    #[test]
    fn redirect_preserves_query_string_verbatim() {
        let outcome = route_request(
            "/dashboard",
            Some("week=31&tenant=alpha"),
            &registry(),
            &RoutingPolicy::default(),
        );
        let ResolutionOutcome::Redirect { target, .. } = outcome else {
            panic!("expected redirect");
        };
        assert_eq!(target, "/is/dashboard?week=31&tenant=alpha");
    }

    #[test]
    fn supported_prefix_passes_through_with_that_locale() {
        let ResolutionOutcome::PassThrough(locale) = decide("/en/dashboard") else {
            panic!("expected pass-through");
        };
        assert_eq!(locale.as_str(), "en");
    }

    #[test]
    fn unsupported_locale_shaped_prefix_is_not_found() {
        assert_eq!(decide("/fr/dashboard"), ResolutionOutcome::NotFound);
        assert_eq!(decide("/en-US/dashboard"), ResolutionOutcome::NotFound);
        // Membership is case-sensitive, so an uppercase tag is shaped but unknown.
        assert_eq!(decide("/EN/dashboard"), ResolutionOutcome::NotFound);
    }

    #[test]
    fn asset_paths_bypass_locale_logic() {
        assert!(matches!(
            decide("/logo.png"),
            ResolutionOutcome::PassThrough(_)
        ));
        assert!(matches!(
            decide("/fr/logo.png"),
            ResolutionOutcome::PassThrough(_)
        ));
        assert!(matches!(
            decide("/fonts/Inter.WOFF2"),
            ResolutionOutcome::PassThrough(_)
        ));
    }

    #[test]
    fn internal_prefixes_bypass_locale_logic() {
        assert!(matches!(decide("/health"), ResolutionOutcome::PassThrough(_)));
        assert!(matches!(
            decide("/.well-known/stundir.json"),
            ResolutionOutcome::PassThrough(_)
        ));
        // Prefix matching is segment-aware.
        let ResolutionOutcome::Redirect { target, .. } = decide("/healthcheck") else {
            panic!("expected redirect");
        };
        assert_eq!(target, "/is/healthcheck");
    }

    #[test]
    fn redirect_targets_are_idempotent() {
        let paths = [
            "/",
            "/dashboard",
            "/pricing",
            "/dashboard/entries",
            "/very/deep/route",
        ];
        for path in paths {
            let ResolutionOutcome::Redirect { target, locale } = decide(path) else {
                panic!("expected redirect for {path}");
            };
            let second = decide(&target);
            assert_eq!(
                second,
                ResolutionOutcome::PassThrough(locale),
                "target {target} must pass through"
            );
        }
    }

    #[test]
    fn every_path_maps_to_exactly_one_outcome() {
        // Totality probe over awkward shapes; route_request must never panic.
        let paths = ["", "/", "//", "/..", "/a", "/ab-", "/abcd", "/is/", "/is//x"];
        for path in paths {
            let _ = decide(path);
        }
    }

    #[test]
    fn resolver_returns_candidate_iff_supported() {
        let registry = registry();
        assert_eq!(resolve(Some("en"), &registry).as_str(), "en");
        assert_eq!(resolve(Some("is"), &registry).as_str(), "is");
        assert_eq!(resolve(Some("fr"), &registry).as_str(), "is");
        assert_eq!(resolve(Some("EN"), &registry).as_str(), "is");
        assert_eq!(resolve(None, &registry).as_str(), "is");
        assert_eq!(resolve(Some(""), &registry).as_str(), "is");
    }

    #[test]
    fn locale_shape_test_matches_short_tags_only() {
        assert!(looks_like_locale_tag("fr"));
        assert!(looks_like_locale_tag("deu"));
        assert!(looks_like_locale_tag("en-US"));
        assert!(looks_like_locale_tag("zh-Hans"));
        assert!(!looks_like_locale_tag("dashboard"));
        assert!(!looks_like_locale_tag("a"));
        assert!(!looks_like_locale_tag("e1"));
        assert!(!looks_like_locale_tag("en-"));
        assert!(!looks_like_locale_tag("en-US-x"));
    }
}
