use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Database representation of a treaty record.
///
/// `is_active` is the soft-delete flag: archived treaties keep their row
/// (and audit history) but drop out of list/search/report views.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Treaty {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub treaty_type: Option<String>,
    pub category: Option<String>,
    pub signatory_countries: Vec<String>,
    pub current_status: String,
    pub date_signed: Option<NaiveDate>,
    pub effective_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
    pub is_active: bool,
    pub admin_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /treaties`. The creator becomes `admin_id`; the full
/// submitted record is echoed into the CREATE audit entry.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateTreatyPayload {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub treaty_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub signatory_countries: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_signed: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,
}

/// Projection used by the expiring-soon report and the notification check.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ExpiringTreaty {
    pub id: i64,
    pub title: String,
    pub expiry_date: NaiveDate,
    pub current_status: String,
    pub signatory_countries: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn create_payload_accepts_minimal_body() {
        let payload: CreateTreatyPayload =
            serde_json::from_value(serde_json::json!({"title": "Treaty A"})).expect("deserialize");
        assert!(payload.validate().is_ok());
        assert!(payload.signatory_countries.is_empty());
        assert!(payload.current_status.is_none());
    }

    #[test]
    fn create_payload_rejects_empty_title() {
        let payload: CreateTreatyPayload =
            serde_json::from_value(serde_json::json!({"title": ""})).expect("deserialize");
        assert!(payload.validate().is_err());
    }

    #[test]
    fn create_payload_serializes_type_under_wire_name() {
        let payload: CreateTreatyPayload = serde_json::from_value(serde_json::json!({
            "title": "Treaty A",
            "type": "Bilateral"
        }))
        .expect("deserialize");
        assert_eq!(payload.treaty_type.as_deref(), Some("Bilateral"));

        let value = serde_json::to_value(&payload).expect("serialize");
        assert_eq!(value["type"], "Bilateral");
        // Absent optional fields stay absent, matching the submitted record.
        assert!(value.get("description").is_none());
    }
}
