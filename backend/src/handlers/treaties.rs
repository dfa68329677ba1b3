use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use utoipa::IntoParams;
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        treaty::{CreateTreatyPayload, Treaty},
        user::AuthUser,
    },
    repositories::treaty::{column_value, ColumnValue, TreatyFilters, TreatyRepository},
    services::audit,
    state::AppState,
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct TreatyListQuery {
    /// Case-insensitive title substring OR exact signatory-country match.
    pub term: Option<String>,
    pub status: Option<String>,
    pub category: Option<String>,
}

pub async fn list_treaties(
    State(state): State<AppState>,
    Query(q): Query<TreatyListQuery>,
) -> Result<Json<Vec<Treaty>>, AppError> {
    let filters = TreatyFilters {
        term: q.term,
        status: q.status,
        category: q.category,
    };

    let repo = TreatyRepository::new();
    let treaties = repo.list(&state.pool, &filters).await?;
    Ok(Json(treaties))
}

pub async fn get_treaty(
    State(state): State<AppState>,
    Path(treaty_id): Path<i64>,
) -> Result<Json<Treaty>, AppError> {
    let repo = TreatyRepository::new();
    let treaty = repo
        .find_by_id(&state.pool, treaty_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Treaty not found.".to_string()))?;
    Ok(Json(treaty))
}

pub async fn create_treaty(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CreateTreatyPayload>,
) -> Result<(StatusCode, Json<Treaty>), AppError> {
    if !user.is_admin() {
        return Err(AppError::Forbidden(
            "Forbidden: Must be Admin to create treaties".to_string(),
        ));
    }
    payload.validate()?;

    // Captured before the insert so the audit entry reflects the submitted
    // record, not the stored row.
    let submitted = serde_json::to_value(&payload)
        .map_err(|e| AppError::InternalServerError(e.into()))?;

    let repo = TreatyRepository::new();
    let created = repo.insert(&state.pool, &payload, &user.id).await?;
    audit::record_create(&state.pool, created.id, &user.id, submitted).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_treaty(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(treaty_id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, AppError> {
    if !user.is_admin() {
        return Err(AppError::Forbidden(
            "Forbidden: Must be Admin to update treaties".to_string(),
        ));
    }
    let patch = body
        .as_object()
        .ok_or_else(|| AppError::BadRequest("Request body must be a JSON object".to_string()))?;

    let repo = TreatyRepository::new();
    let old = repo
        .find_by_id(&state.pool, treaty_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Treaty not found.".to_string()))?;

    let changes = audit::compute_changes(&old, patch);
    if changes.is_empty() {
        // No store write, no audit entry.
        return Ok(Json(json!({"message": "No changes detected. Update aborted."})));
    }

    let updates: Vec<(String, ColumnValue)> = changes
        .iter()
        .map(|change| {
            column_value(&change.field, &change.new).map(|value| (change.field.clone(), value))
        })
        .collect::<Result<_, _>>()
        .map_err(AppError::BadRequest)?;

    let updated = repo.update_fields(&state.pool, treaty_id, &updates).await?;
    // Audit is written after the store update, from the precomputed diff.
    audit::record_update(&state.pool, treaty_id, &user.id, &changes).await?;

    Ok(Json(json!({
        "message": "Treaty updated successfully.",
        "data": updated
    })))
}

pub async fn archive_treaty(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(treaty_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    if !user.is_admin() {
        return Err(AppError::Forbidden(
            "Forbidden: Must be Admin to delete treaties".to_string(),
        ));
    }

    // ARCHIVE logs before the mutation is applied. The audit insert fails
    // (foreign key) when the treaty does not exist, aborting the archive.
    audit::record_archive(&state.pool, treaty_id, &user.id).await?;

    let repo = TreatyRepository::new();
    repo.archive(&state.pool, treaty_id).await?;

    Ok(Json(json!({
        "message": format!("Treaty ID {} successfully archived.", treaty_id)
    })))
}
