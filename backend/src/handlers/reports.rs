use axum::{extract::State, Json};

use crate::{
    error::AppError,
    models::treaty::ExpiringTreaty,
    repositories::treaty::TreatyRepository,
    services::report::{expiry_window, fold_status_counts, StatusCount},
    state::AppState,
    utils::time,
};

/// Histogram of `current_status` over active treaties, in first-occurrence
/// order.
pub async fn status_counts(
    State(state): State<AppState>,
) -> Result<Json<Vec<StatusCount>>, AppError> {
    let repo = TreatyRepository::new();
    let statuses = repo.active_statuses(&state.pool).await?;
    Ok(Json(fold_status_counts(statuses)))
}

/// Active treaties expiring within the report window (default 180 days),
/// ascending by expiry date.
pub async fn expiring_soon(
    State(state): State<AppState>,
) -> Result<Json<Vec<ExpiringTreaty>>, AppError> {
    let today = time::today_local(&state.config.time_zone);
    let (after, until) = expiry_window(today, state.config.expiry_report_days);

    let repo = TreatyRepository::new();
    let treaties = repo.expiring_between(&state.pool, after, until).await?;
    Ok(Json(treaties))
}
