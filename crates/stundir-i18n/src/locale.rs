//! Locale identifiers and the immutable registry of supported locales.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

/// Errors raised while constructing the locale registry.
#[derive(Debug, Error)]
pub enum LocaleError {
    /// The configured supported-locale list was empty.
    #[error("supported locale set is empty")]
    EmptySupportedSet,
    /// The configured default locale is not a member of the supported set.
    #[error("default locale not in supported set")]
    DefaultNotSupported {
        /// Default locale payload provided by the caller.
        value: String,
    },
    /// A configured locale tag was empty or contained URL-significant characters.
    #[error("invalid locale tag")]
    InvalidTag {
        /// Tag payload provided by the caller.
        value: String,
    },
}

/// Convenience alias for locale registry results.
pub type LocaleResult<T> = Result<T, LocaleError>;

/// Opaque, case-sensitive locale token drawn from the registry's supported set.
///
/// Values are only handed out by [`LocaleRegistry`], so every `LocaleId` in
/// circulation names a supported locale.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocaleId(Arc<str>);

impl LocaleId {
    fn new(tag: &str) -> Self {
        Self(Arc::from(tag))
    }

    /// View the locale token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocaleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Immutable set of supported locales plus the designated default.
///
/// Constructed once at startup from static configuration and shared by
/// reference afterwards; nothing mutates it per request.
#[derive(Debug, Clone)]
pub struct LocaleRegistry {
    supported: Vec<LocaleId>,
    default_index: usize,
}

impl LocaleRegistry {
    /// Construct a registry from the configured tags.
    ///
    /// Duplicate tags are collapsed; configuration order is otherwise kept so
    /// locale pickers render deterministically.
    ///
    /// # Errors
    ///
    /// Returns an error when the supported list is empty, a tag is malformed,
    /// or the default is not a member of the supported set. These are
    /// startup-fatal conditions; the process must not serve traffic with a
    /// broken registry.
    pub fn new(supported: &[String], default: &str) -> LocaleResult<Self> {
        if supported.is_empty() {
            return Err(LocaleError::EmptySupportedSet);
        }
        let mut tags: Vec<LocaleId> = Vec::with_capacity(supported.len());
        for tag in supported {
            let trimmed = tag.trim();
            if trimmed.is_empty() || trimmed.contains(['/', '?', '#']) {
                return Err(LocaleError::InvalidTag { value: tag.clone() });
            }
            if !tags.iter().any(|existing| existing.as_str() == trimmed) {
                tags.push(LocaleId::new(trimmed));
            }
        }
        let default_index = tags
            .iter()
            .position(|tag| tag.as_str() == default)
            .ok_or_else(|| LocaleError::DefaultNotSupported {
                value: default.to_string(),
            })?;
        Ok(Self {
            supported: tags,
            default_index,
        })
    }

    /// All supported locales in configuration order.
    #[must_use]
    pub fn supported(&self) -> &[LocaleId] {
        &self.supported
    }

    /// The designated default locale.
    #[must_use]
    pub fn default_locale(&self) -> &LocaleId {
        &self.supported[self.default_index]
    }

    /// Exact, case-sensitive membership test.
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.get(tag).is_some()
    }

    /// Look up the interned id for a tag.
    #[must_use]
    pub fn get(&self, tag: &str) -> Option<&LocaleId> {
        self.supported.iter().find(|locale| locale.as_str() == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn registry_keeps_configuration_order_and_default() {
        let registry = LocaleRegistry::new(&tags(&["is", "en"]), "is").expect("registry");
        let supported: Vec<&str> = registry
            .supported()
            .iter()
            .map(LocaleId::as_str)
            .collect();
        assert_eq!(supported, vec!["is", "en"]);
        assert_eq!(registry.default_locale().as_str(), "is");
    }

    #[test]
    fn registry_rejects_empty_supported_set() {
        let err = LocaleRegistry::new(&[], "is").expect_err("empty set");
        assert!(matches!(err, LocaleError::EmptySupportedSet));
    }

    #[test]
    fn registry_rejects_default_outside_supported_set() {
        let err = LocaleRegistry::new(&tags(&["is", "en"]), "fr").expect_err("bad default");
        assert!(matches!(
            err,
            LocaleError::DefaultNotSupported { value } if value == "fr"
        ));
    }

    #[test]
    fn registry_rejects_malformed_tags() {
        let err = LocaleRegistry::new(&tags(&["is", "e/n"]), "is").expect_err("bad tag");
        assert!(matches!(err, LocaleError::InvalidTag { .. }));

        let err = LocaleRegistry::new(&tags(&["  "]), "is").expect_err("blank tag");
        assert!(matches!(err, LocaleError::InvalidTag { .. }));
    }

    #[test]
    fn registry_collapses_duplicates() {
        let registry = LocaleRegistry::new(&tags(&["is", "en", "is"]), "en").expect("registry");
        assert_eq!(registry.supported().len(), 2);
    }

    #[test]
    fn membership_is_case_sensitive() {
        let registry = LocaleRegistry::new(&tags(&["is", "en"]), "is").expect("registry");
        assert!(registry.contains("en"));
        assert!(!registry.contains("EN"));
        assert!(!registry.contains("fr"));
    }
}
