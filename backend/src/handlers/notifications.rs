use axum::{
    extract::{Extension, State},
    Json,
};
use serde_json::{json, Value};

use crate::{
    error::AppError,
    models::user::AuthUser,
    repositories::treaty::TreatyRepository,
    services::report::{expiry_window, notification_for},
    state::AppState,
    utils::time,
};

/// Admin-triggered expiry scan (default 90-day window). Read-only: alert
/// messages are synthesized and returned, never delivered.
pub async fn check_expiry(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Value>, AppError> {
    if !user.is_admin() {
        return Err(AppError::Forbidden(
            "Forbidden: Only Admin can trigger notification check".to_string(),
        ));
    }

    let window_days = state.config.expiry_notice_days;
    let today = time::today_local(&state.config.time_zone);
    let (after, until) = expiry_window(today, window_days);

    let repo = TreatyRepository::new();
    let expiring = repo.expiring_between(&state.pool, after, until).await?;

    let notifications: Vec<_> = expiring
        .iter()
        .map(|treaty| notification_for(treaty, window_days))
        .collect();

    Ok(Json(json!({
        "message": "Expiry check complete.",
        "count": notifications.len(),
        "notifications": notifications
    })))
}
