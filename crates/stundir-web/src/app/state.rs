//! Web application state and the in-process time-entry catalog.
//!
//! The catalog stands in for the excluded persistence layer at its interface
//! boundary: handlers only see read/record operations, never storage details.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use stundir_i18n::{LocaleRegistry, MessageCatalog, Navigator, RoutingPolicy};
use stundir_telemetry::Metrics;
use uuid::Uuid;

use crate::http::auth::SessionVerifier;

/// One recorded block of work.
#[derive(Debug, Clone)]
pub struct TimeEntry {
    /// Stable identifier for the entry.
    pub id: Uuid,
    /// Tenant the entry belongs to.
    pub tenant: String,
    /// Task label shown on the dashboard.
    pub task: String,
    /// When the work started.
    pub started_at: DateTime<Utc>,
    /// When the work ended; `None` while the timer is running.
    pub ended_at: Option<DateTime<Utc>>,
}

impl TimeEntry {
    /// Hours covered by the entry, zero while the timer is still running.
    #[must_use]
    pub fn hours(&self) -> f64 {
        self.ended_at.map_or(0.0, |ended| {
            let seconds = (ended - self.started_at).num_seconds().max(0);
            #[allow(clippy::cast_precision_loss)]
            let hours = seconds as f64 / 3600.0;
            hours
        })
    }
}

/// In-process, tenant-scoped store of time entries.
#[derive(Debug, Default)]
pub struct TimeEntryCatalog {
    entries: Mutex<Vec<TimeEntry>>,
}

impl TimeEntryCatalog {
    /// Catalog pre-populated with entries, used by bootstrap seeding and tests.
    #[must_use]
    pub fn with_entries(entries: Vec<TimeEntry>) -> Self {
        Self {
            entries: Mutex::new(entries),
        }
    }

    /// Record a new entry.
    pub fn record(&self, entry: TimeEntry) {
        self.entries
            .lock()
            .expect("time entry mutex poisoned")
            .push(entry);
    }

    /// Entries belonging to one tenant, most recent first.
    #[must_use]
    pub fn list_for_tenant(&self, tenant: &str) -> Vec<TimeEntry> {
        let mut entries: Vec<TimeEntry> = self
            .entries
            .lock()
            .expect("time entry mutex poisoned")
            .iter()
            .filter(|entry| entry.tenant == tenant)
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.started_at.cmp(&a.started_at));
        entries
    }

    /// Sum of completed hours for one tenant.
    #[must_use]
    pub fn total_hours(&self, tenant: &str) -> f64 {
        self.list_for_tenant(tenant)
            .iter()
            .map(TimeEntry::hours)
            .sum()
    }
}

/// Immutable dependencies shared by every request handler.
pub struct WebState {
    instance_name: String,
    registry: Arc<LocaleRegistry>,
    policy: RoutingPolicy,
    catalog: MessageCatalog,
    navigator: Navigator,
    verifier: Arc<dyn SessionVerifier>,
    entries: TimeEntryCatalog,
    telemetry: Metrics,
}

impl WebState {
    /// Assemble the shared state from startup-constructed dependencies.
    #[must_use]
    pub fn new(
        instance_name: String,
        registry: Arc<LocaleRegistry>,
        policy: RoutingPolicy,
        catalog: MessageCatalog,
        verifier: Arc<dyn SessionVerifier>,
        entries: TimeEntryCatalog,
        telemetry: Metrics,
    ) -> Self {
        let navigator = Navigator::new(Arc::clone(&registry));
        Self {
            instance_name,
            registry,
            policy,
            catalog,
            navigator,
            verifier,
            entries,
            telemetry,
        }
    }

    /// Friendly instance identifier for footers and logs.
    #[must_use]
    pub fn instance_name(&self) -> &str {
        &self.instance_name
    }

    /// The immutable locale registry.
    #[must_use]
    pub fn registry(&self) -> &LocaleRegistry {
        &self.registry
    }

    /// The routing exclusion policy.
    #[must_use]
    pub const fn policy(&self) -> &RoutingPolicy {
        &self.policy
    }

    /// The message catalog built at startup.
    #[must_use]
    pub const fn catalog(&self) -> &MessageCatalog {
        &self.catalog
    }

    /// Locale-aware navigation helpers.
    #[must_use]
    pub const fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// The session verification boundary.
    #[must_use]
    pub fn verifier(&self) -> &Arc<dyn SessionVerifier> {
        &self.verifier
    }

    /// The in-process time-entry catalog.
    #[must_use]
    pub const fn entries(&self) -> &TimeEntryCatalog {
        &self.entries
    }

    /// Shared metrics handle.
    #[must_use]
    pub const fn telemetry(&self) -> &Metrics {
        &self.telemetry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn entry(tenant: &str, task: &str, hours: i64) -> TimeEntry {
        let started = Utc::now() - TimeDelta::hours(hours);
        TimeEntry {
            id: Uuid::new_v4(),
            tenant: tenant.to_string(),
            task: task.to_string(),
            started_at: started,
            ended_at: Some(started + TimeDelta::hours(hours)),
        }
    }

    #[test]
    fn catalog_scopes_entries_by_tenant() {
        let catalog = TimeEntryCatalog::default();
        catalog.record(entry("alpha", "design", 2));
        catalog.record(entry("beta", "review", 1));
        catalog.record(entry("alpha", "billing", 3));

        let alpha = catalog.list_for_tenant("alpha");
        assert_eq!(alpha.len(), 2);
        assert!(alpha.iter().all(|entry| entry.tenant == "alpha"));
        assert!((catalog.total_hours("alpha") - 5.0).abs() < 1e-6);
        assert!((catalog.total_hours("beta") - 1.0).abs() < 1e-6);
    }

    #[test]
    fn running_timer_counts_zero_hours() {
        let mut open = entry("alpha", "ongoing", 1);
        open.ended_at = None;
        assert!((open.hours() - 0.0).abs() < f64::EPSILON);
    }
}
