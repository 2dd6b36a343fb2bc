//! # Design
//!
//! - Bundles form a closed mapping built once from the registry's supported
//!   set; there is no string-keyed resource lookup at request time.
//! - A bundle that is missing or fails to parse degrades to the default
//!   locale's bundle with a logged warning; a page must still render.

use std::collections::HashMap;

use serde::Deserialize;
use tracing::warn;

use crate::locale::{LocaleId, LocaleRegistry};

/// Translation bundles compiled into the binary, keyed by exact locale tag.
const EMBEDDED_BUNDLES: &[(&str, &str)] = &[
    ("en", include_str!("../i18n/en.json")),
    ("is", include_str!("../i18n/is.json")),
];

#[derive(Debug, Deserialize)]
struct TranslationFile {
    #[serde(default)]
    messages: HashMap<String, String>,
}

/// Translated strings for exactly one locale. Immutable once loaded.
#[derive(Debug, Default, Clone)]
pub struct MessageBundle {
    messages: HashMap<String, String>,
}

impl MessageBundle {
    /// Look up a translation, falling back to the key itself when absent so
    /// a missing string never blanks out a page.
    #[must_use]
    pub fn text<'a>(&'a self, key: &'a str) -> &'a str {
        self.messages.get(key).map_or(key, String::as_str)
    }

    /// Exact lookup without the key fallback.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.messages.get(key).map(String::as_str)
    }

    /// Number of translations in the bundle.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the bundle carries any translations at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Closed locale-to-bundle mapping built once at startup.
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    bundles: HashMap<LocaleId, MessageBundle>,
    default_locale: LocaleId,
    default_bundle: MessageBundle,
    degraded: Vec<LocaleId>,
}

impl MessageCatalog {
    /// Build the catalog for every supported locale.
    ///
    /// Locales whose bundle is missing from the embedded set or fails to
    /// parse reuse the default bundle; this is a deployment defect worth a
    /// warning, not a reason to fail a request.
    #[must_use]
    pub fn build(registry: &LocaleRegistry) -> Self {
        let default_locale = registry.default_locale().clone();
        let default_bundle = load_bundle(default_locale.as_str()).unwrap_or_else(|| {
            warn!(
                locale = default_locale.as_str(),
                "default locale bundle unavailable; serving untranslated keys"
            );
            MessageBundle::default()
        });
        let mut bundles = HashMap::with_capacity(registry.supported().len());
        let mut degraded = Vec::new();
        for locale in registry.supported() {
            if locale == &default_locale {
                continue;
            }
            match load_bundle(locale.as_str()) {
                Some(bundle) => {
                    bundles.insert(locale.clone(), bundle);
                }
                None => {
                    warn!(
                        locale = locale.as_str(),
                        fallback = default_locale.as_str(),
                        "locale bundle unavailable; falling back to default bundle"
                    );
                    degraded.push(locale.clone());
                }
            }
        }
        Self {
            bundles,
            default_locale,
            default_bundle,
            degraded,
        }
    }

    /// Bundle for the given locale; degraded locales and unknown ids resolve
    /// to the default bundle.
    #[must_use]
    pub fn bundle(&self, locale: &LocaleId) -> &MessageBundle {
        self.bundles.get(locale).unwrap_or(&self.default_bundle)
    }

    /// The locale whose bundle backs the fallback path.
    #[must_use]
    pub const fn default_locale(&self) -> &LocaleId {
        &self.default_locale
    }

    /// Locales that degraded to the default bundle at build time.
    #[must_use]
    pub fn degraded(&self) -> &[LocaleId] {
        &self.degraded
    }
}

fn load_bundle(tag: &str) -> Option<MessageBundle> {
    let (_, raw) = EMBEDDED_BUNDLES
        .iter()
        .find(|(embedded, _)| *embedded == tag)?;
    match serde_json::from_str::<TranslationFile>(raw) {
        Ok(file) => Some(MessageBundle {
            messages: file.messages,
        }),
        Err(err) => {
            warn!(error = %err, locale = tag, "failed to parse locale bundle");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(tags: &[&str], default: &str) -> LocaleRegistry {
        let tags: Vec<String> = tags.iter().map(ToString::to_string).collect();
        LocaleRegistry::new(&tags, default).expect("registry")
    }

    #[test]
    fn catalog_loads_bundles_for_supported_locales() {
        let registry = registry(&["is", "en"], "is");
        let catalog = MessageCatalog::build(&registry);
        assert!(catalog.degraded().is_empty());

        let en = registry.get("en").expect("en");
        let is = registry.get("is").expect("is");
        assert_eq!(catalog.bundle(en).text("nav.dashboard"), "Dashboard");
        assert_eq!(catalog.bundle(is).text("nav.dashboard"), "Mælaborð");
    }

    #[test]
    fn missing_bundle_degrades_to_default() {
        // "de" is supported by configuration but has no embedded bundle.
        let registry = registry(&["is", "de"], "is");
        let catalog = MessageCatalog::build(&registry);

        let de = registry.get("de").expect("de");
        assert_eq!(catalog.degraded(), &[de.clone()]);
        assert_eq!(catalog.bundle(de).text("nav.home"), "Heim");
    }

    #[test]
    fn unsupported_locale_bundle_is_never_consulted() {
        let registry = registry(&["is", "en"], "is");
        let catalog = MessageCatalog::build(&registry);
        // No bundle was built for a tag outside the registry.
        assert_eq!(catalog.bundles.len(), 1);
    }

    #[test]
    fn missing_key_falls_back_to_the_key_itself() {
        let registry = registry(&["is", "en"], "is");
        let catalog = MessageCatalog::build(&registry);
        let en = registry.get("en").expect("en");
        assert_eq!(catalog.bundle(en).text("no.such.key"), "no.such.key");
        assert!(catalog.bundle(en).lookup("no.such.key").is_none());
    }
}
