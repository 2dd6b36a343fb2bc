//! Shared fixtures for registry, settings, and web-state construction.

use std::sync::Arc;

use chrono::{TimeDelta, Utc};
use stundir_config::AppProfile;
use stundir_i18n::{LocaleRegistry, MessageCatalog, RoutingPolicy};
use stundir_telemetry::Metrics;
use stundir_web::{TimeEntry, TimeEntryCatalog, WebState};
use uuid::Uuid;

use crate::mocks::{DEFAULT_TENANT, StaticSessionVerifier};

/// Registry matching the default deployment: `is` and `en`, Icelandic first.
///
/// # Panics
///
/// Panics if the fixture configuration is rejected by the registry.
#[must_use]
pub fn registry() -> Arc<LocaleRegistry> {
    Arc::new(
        LocaleRegistry::new(&["is".to_string(), "en".to_string()], "is")
            .expect("fixture registry"),
    )
}

/// Application profile used by router-level tests.
#[must_use]
pub fn profile() -> AppProfile {
    AppProfile {
        instance_name: "stundir-test".to_string(),
        ..AppProfile::default()
    }
}

/// Time entries for two tenants so tenant scoping is observable.
#[must_use]
pub fn seeded_entries() -> TimeEntryCatalog {
    let now = Utc::now();
    let completed = |tenant: &str, task: &str, hours: i64| TimeEntry {
        id: Uuid::new_v4(),
        tenant: tenant.to_string(),
        task: task.to_string(),
        started_at: now - TimeDelta::hours(hours),
        ended_at: Some(now),
    };
    TimeEntryCatalog::with_entries(vec![
        completed(DEFAULT_TENANT, "Vefhönnun", 2),
        completed(DEFAULT_TENANT, "Þýðingar", 1),
        completed("beta", "Bókhald annars", 3),
    ])
}

/// Fully assembled web state with the default registry, catalog, and mocks.
///
/// # Panics
///
/// Panics if the metrics registry cannot be constructed.
#[must_use]
pub fn web_state() -> Arc<WebState> {
    let registry = registry();
    let catalog = MessageCatalog::build(&registry);
    Arc::new(WebState::new(
        profile().instance_name,
        registry,
        RoutingPolicy::default(),
        catalog,
        Arc::new(StaticSessionVerifier::with_default_session()),
        seeded_entries(),
        Metrics::new().expect("fixture metrics"),
    ))
}
