use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::{types::Json, FromRow};
use utoipa::ToSchema;

/// The three mutations a treaty can undergo. Exactly one audit row is
/// written per successful mutation; rows are never updated or deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "TEXT", rename_all = "UPPERCASE")]
pub enum AuditAction {
    Create,
    Update,
    Archive,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Create => "CREATE",
            AuditAction::Update => "UPDATE",
            AuditAction::Archive => "ARCHIVE",
        }
    }
}

/// Projection returned by `GET /treaties/{id}/audit_logs`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AuditLogView {
    pub action: AuditAction,
    pub timestamp: DateTime<Utc>,
    #[schema(value_type = Object)]
    pub details: Json<Value>,
    pub user_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audit_action_serializes_uppercase() {
        assert_eq!(
            serde_json::to_value(AuditAction::Create).unwrap(),
            serde_json::json!("CREATE")
        );
        assert_eq!(
            serde_json::to_value(AuditAction::Archive).unwrap(),
            serde_json::json!("ARCHIVE")
        );
        assert_eq!(AuditAction::Update.as_str(), "UPDATE");
    }
}
