use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::AppError, models::audit_log::AuditLogView, repositories::audit_log, state::AppState,
};

/// Full change history of one treaty, newest first. Available to every
/// authenticated role, including for archived treaties.
pub async fn get_audit_logs(
    State(state): State<AppState>,
    Path(treaty_id): Path<i64>,
) -> Result<Json<Vec<AuditLogView>>, AppError> {
    let logs = audit_log::list_audit_logs_for_treaty(&state.pool, treaty_id).await?;
    Ok(Json(logs))
}
