use serde_json::Value;
use sqlx::{types::Json, PgPool};

use crate::models::audit_log::{AuditAction, AuditLogView};

/// Appends one immutable audit row. The timestamp is store-assigned
/// (`DEFAULT now()`), monotonic per insert.
pub async fn insert_audit_log(
    pool: &PgPool,
    treaty_id: i64,
    user_id: &str,
    action: AuditAction,
    details: Value,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO audit_logs (treaty_id, user_id, action, details) VALUES ($1, $2, $3, $4)")
        .bind(treaty_id)
        .bind(user_id)
        .bind(action)
        .bind(Json(details))
        .execute(pool)
        .await
        .map(|_| ())
}

/// History for one treaty, newest first. Ties on timestamp fall back to
/// insert order via id.
pub async fn list_audit_logs_for_treaty(
    pool: &PgPool,
    treaty_id: i64,
) -> Result<Vec<AuditLogView>, sqlx::Error> {
    sqlx::query_as::<_, AuditLogView>(
        "SELECT action, \"timestamp\", details, user_id FROM audit_logs \
         WHERE treaty_id = $1 ORDER BY \"timestamp\" DESC, id DESC",
    )
    .bind(treaty_id)
    .fetch_all(pool)
    .await
}
