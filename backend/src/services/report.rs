//! Read-only aggregations over active treaties.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::treaty::ExpiringTreaty;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

/// Synthesized alert for the notification simulation. Nothing is delivered.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExpiryNotification {
    pub treaty_id: i64,
    pub title: String,
    pub message: String,
}

/// Folds statuses into `{status, count}` pairs, preserving first-occurrence
/// order. The counts sum to the number of active treaties.
pub fn fold_status_counts(statuses: impl IntoIterator<Item = String>) -> Vec<StatusCount> {
    let mut counts: Vec<StatusCount> = Vec::new();
    for status in statuses {
        match counts.iter_mut().find(|c| c.status == status) {
            Some(entry) => entry.count += 1,
            None => counts.push(StatusCount { status, count: 1 }),
        }
    }
    counts
}

/// Exclusive lower / inclusive upper bounds of an expiry window anchored on
/// `today`: (today, today + window_days].
pub fn expiry_window(today: NaiveDate, window_days: i64) -> (NaiveDate, NaiveDate) {
    (today, today + Duration::days(window_days))
}

pub fn notification_for(treaty: &ExpiringTreaty, window_days: i64) -> ExpiryNotification {
    ExpiryNotification {
        treaty_id: treaty.id,
        title: treaty.title.clone(),
        message: format!(
            "ALERT: Treaty expiring on {} (within {} days).",
            treaty.expiry_date, window_days
        ),
    }
}
