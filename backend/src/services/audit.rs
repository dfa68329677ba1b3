//! Change auditing: the field diff behind UPDATE and the single-audit-row
//! wrappers for every mutation.
//!
//! Every successful mutation of a treaty writes exactly one audit row.
//! CREATE and UPDATE log after the store write succeeds; ARCHIVE logs
//! before the flag flips. The sequences are not transactional; a failure
//! between the two writes leaves the documented inconsistency window.

use serde_json::{json, Map, Value};
use sqlx::PgPool;

use crate::models::audit_log::AuditAction;
use crate::models::treaty::Treaty;
use crate::repositories::audit_log::insert_audit_log;

/// Fields an update request may touch, diffed in this order. Anything else
/// in the body is ignored.
pub const EDITABLE_FIELDS: [&str; 9] = [
    "title",
    "description",
    "type",
    "category",
    "signatory_countries",
    "current_status",
    "date_signed",
    "effective_date",
    "expiry_date",
];

pub const ARCHIVE_MESSAGE: &str =
    "Record logically deleted (is_active=FALSE) and status set to Archived";

/// One changed field, carrying both sides for the audit payload.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldChange {
    pub field: String,
    pub old: Value,
    pub new: Value,
}

/// Renders a JSON value to the string used for change detection. Strings
/// compare raw, null as "null", everything else via the canonical
/// serde_json form.
///
/// Equality on this form is deliberately loose and is part of the audit
/// contract: `1` and `"1"` compare equal, while reordering
/// `signatory_countries` registers as a change.
pub fn stringified(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

/// Diffs an update body against the stored record. A field counts as
/// changed iff its key is present in the body AND its stringified value
/// differs from the stored one. Returns changes in whitelist order; empty
/// means the update is a no-op.
pub fn compute_changes(old: &Treaty, patch: &Map<String, Value>) -> Vec<FieldChange> {
    let old_value = serde_json::to_value(old).unwrap_or(Value::Null);
    let mut changes = Vec::new();

    for field in EDITABLE_FIELDS {
        let Some(new) = patch.get(field) else {
            continue;
        };
        let old = old_value.get(field).cloned().unwrap_or(Value::Null);
        if stringified(&old) != stringified(new) {
            changes.push(FieldChange {
                field: field.to_string(),
                old,
                new: new.clone(),
            });
        }
    }

    changes
}

/// `{field: {old, new}}` for exactly the changed fields.
pub fn changes_payload(changes: &[FieldChange]) -> Value {
    let mut details = Map::new();
    for change in changes {
        details.insert(
            change.field.clone(),
            json!({ "old": change.old, "new": change.new }),
        );
    }
    Value::Object(details)
}

/// Logged after the insert succeeds, referencing the store-assigned id.
pub async fn record_create(
    pool: &PgPool,
    treaty_id: i64,
    user_id: &str,
    submitted: Value,
) -> Result<(), sqlx::Error> {
    insert_audit_log(
        pool,
        treaty_id,
        user_id,
        AuditAction::Create,
        json!({ "new_data": submitted }),
    )
    .await
}

/// Logged after the store update succeeds, from the precomputed diff.
pub async fn record_update(
    pool: &PgPool,
    treaty_id: i64,
    user_id: &str,
    changes: &[FieldChange],
) -> Result<(), sqlx::Error> {
    insert_audit_log(
        pool,
        treaty_id,
        user_id,
        AuditAction::Update,
        changes_payload(changes),
    )
    .await
}

/// Logged before the store mutation is applied.
pub async fn record_archive(pool: &PgPool, treaty_id: i64, user_id: &str) -> Result<(), sqlx::Error> {
    insert_audit_log(
        pool,
        treaty_id,
        user_id,
        AuditAction::Archive,
        json!({ "message": ARCHIVE_MESSAGE }),
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn sample_treaty() -> Treaty {
        Treaty {
            id: 1,
            title: "Treaty A".to_string(),
            description: Some("A framework agreement".to_string()),
            treaty_type: Some("Bilateral".to_string()),
            category: Some("Trade".to_string()),
            signatory_countries: vec!["JP".to_string(), "FR".to_string()],
            current_status: "Active".to_string(),
            date_signed: NaiveDate::from_ymd_opt(2020, 5, 1),
            effective_date: NaiveDate::from_ymd_opt(2020, 6, 1),
            expiry_date: NaiveDate::from_ymd_opt(2030, 6, 1),
            is_active: true,
            admin_id: "admin-1".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn patch(value: Value) -> Map<String, Value> {
        value.as_object().expect("object").clone()
    }

    #[test]
    fn identical_values_produce_no_changes() {
        let treaty = sample_treaty();
        let body = patch(json!({
            "title": "Treaty A",
            "current_status": "Active",
            "expiry_date": "2030-06-01",
            "signatory_countries": ["JP", "FR"]
        }));
        assert!(compute_changes(&treaty, &body).is_empty());
    }

    #[test]
    fn absent_fields_are_ignored() {
        let treaty = sample_treaty();
        let body = patch(json!({ "admin_id": "someone-else", "is_active": false }));
        assert!(compute_changes(&treaty, &body).is_empty());
    }

    #[test]
    fn changed_fields_are_reported_with_old_and_new() {
        let treaty = sample_treaty();
        let body = patch(json!({
            "title": "Treaty B",
            "current_status": "Active"
        }));
        let changes = compute_changes(&treaty, &body);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].field, "title");
        assert_eq!(changes[0].old, json!("Treaty A"));
        assert_eq!(changes[0].new, json!("Treaty B"));
    }

    #[test]
    fn multiple_changes_follow_whitelist_order() {
        let treaty = sample_treaty();
        let body = patch(json!({
            "expiry_date": "2031-01-01",
            "title": "Treaty B",
            "category": "Defense"
        }));
        let changes = compute_changes(&treaty, &body);
        let fields: Vec<&str> = changes
            .iter()
            .map(|c| c.field.as_str())
            .collect();
        assert_eq!(fields, vec!["title", "category", "expiry_date"]);
    }

    #[test]
    fn null_clears_a_populated_field() {
        let treaty = sample_treaty();
        let body = patch(json!({ "description": null }));
        let changes = compute_changes(&treaty, &body);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].old, json!("A framework agreement"));
        assert_eq!(changes[0].new, Value::Null);
    }

    #[test]
    fn loose_equality_treats_number_and_numeric_string_alike() {
        let mut treaty = sample_treaty();
        treaty.category = Some("1".to_string());
        let body = patch(json!({ "category": 1 }));
        // "1" stringifies identically on both sides, so no change registers.
        assert!(compute_changes(&treaty, &body).is_empty());
    }

    #[test]
    fn loose_equality_flags_reordered_country_list() {
        let treaty = sample_treaty();
        let body = patch(json!({ "signatory_countries": ["FR", "JP"] }));
        let changes = compute_changes(&treaty, &body);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].field, "signatory_countries");
    }

    #[test]
    fn changes_payload_has_one_key_per_change() {
        let treaty = sample_treaty();
        let body = patch(json!({
            "title": "Treaty B",
            "current_status": "Expired"
        }));
        let changes = compute_changes(&treaty, &body);
        let payload = changes_payload(&changes);
        let object = payload.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert_eq!(object["title"], json!({"old": "Treaty A", "new": "Treaty B"}));
        assert_eq!(
            object["current_status"],
            json!({"old": "Active", "new": "Expired"})
        );
    }

    #[test]
    fn stringified_renders_scalars_and_arrays() {
        assert_eq!(stringified(&json!("plain")), "plain");
        assert_eq!(stringified(&Value::Null), "null");
        assert_eq!(stringified(&json!(42)), "42");
        assert_eq!(stringified(&json!(["a", "b"])), "[\"a\",\"b\"]");
    }
}
