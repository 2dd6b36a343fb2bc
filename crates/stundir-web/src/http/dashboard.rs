//! Authenticated dashboard handlers.

use std::fmt::Write as _;
use std::sync::Arc;

use axum::{
    Extension, Form,
    extract::State,
    response::{Html, Redirect},
};
use chrono::{TimeDelta, Utc};
use serde::Deserialize;
use stundir_i18n::href_for;
use tracing::info;
use uuid::Uuid;

use crate::app::state::{TimeEntry, WebState};
use crate::http::auth::SessionIdentity;
use crate::http::locale::current_locale;
use crate::http::pages::{escape_html, layout};

/// Render the dashboard overview for the session's tenant.
pub(crate) async fn overview(
    State(state): State<Arc<WebState>>,
    Extension(identity): Extension<SessionIdentity>,
) -> Html<String> {
    let locale = current_locale(&state);
    let bundle = state.catalog().bundle(&locale);
    let entries = state.entries().list_for_tenant(&identity.tenant);
    let total = state.entries().total_hours(&identity.tenant);

    let mut body = String::new();
    let _ = writeln!(
        body,
        "<h1>{}</h1>\n<p>{}: {total:.1}</p>",
        bundle.text("dashboard.title"),
        bundle.text("dashboard.total_hours"),
    );
    if entries.is_empty() {
        let _ = writeln!(body, "<p>{}</p>", bundle.text("dashboard.empty"));
    } else {
        let _ = writeln!(
            body,
            "<p><a href=\"{}\">{}</a></p>",
            href_for("/dashboard/entries", &locale),
            bundle.text("entries.title"),
        );
    }
    layout(
        &state,
        &locale,
        "/dashboard",
        bundle.text("dashboard.title"),
        &body,
    )
}

/// Render the tenant's time entries as a table.
pub(crate) async fn entries(
    State(state): State<Arc<WebState>>,
    Extension(identity): Extension<SessionIdentity>,
) -> Html<String> {
    let locale = current_locale(&state);
    let bundle = state.catalog().bundle(&locale);
    let entries = state.entries().list_for_tenant(&identity.tenant);

    let mut body = String::new();
    let _ = writeln!(
        body,
        "<h1>{}</h1>\n<table>\n<tr><th>{}</th><th>{}</th><th>{}</th><th>{}</th></tr>",
        bundle.text("entries.title"),
        bundle.text("entries.task"),
        bundle.text("entries.started"),
        bundle.text("entries.ended"),
        bundle.text("entries.hours"),
    );
    for entry in &entries {
        let ended = entry
            .ended_at
            .map_or_else(|| "&ndash;".to_string(), |ended| ended.to_rfc3339());
        let _ = writeln!(
            body,
            "<tr><td>{}</td><td>{}</td><td>{ended}</td><td>{:.1}</td></tr>",
            escape_html(&entry.task),
            entry.started_at.to_rfc3339(),
            entry.hours(),
        );
    }
    body.push_str("</table>");
    layout(
        &state,
        &locale,
        "/dashboard/entries",
        bundle.text("entries.title"),
        &body,
    )
}

#[derive(Debug, Deserialize)]
pub(crate) struct NewEntryForm {
    task: String,
    hours: f64,
}

/// Record a completed block of work and return to the entries table.
pub(crate) async fn record_entry(
    State(state): State<Arc<WebState>>,
    Extension(identity): Extension<SessionIdentity>,
    Form(form): Form<NewEntryForm>,
) -> Redirect {
    let locale = current_locale(&state);
    let minutes = (form.hours.clamp(0.0, 24.0) * 60.0).round();
    #[allow(clippy::cast_possible_truncation)]
    let minutes = minutes as i64;
    let ended_at = Utc::now();
    let entry = TimeEntry {
        id: Uuid::new_v4(),
        tenant: identity.tenant.clone(),
        task: form.task,
        started_at: ended_at - TimeDelta::minutes(minutes),
        ended_at: Some(ended_at),
    };
    info!(tenant = %identity.tenant, entry_id = %entry.id, "time entry recorded");
    state.entries().record(entry);
    Redirect::to(&href_for("/dashboard/entries", &locale))
}
