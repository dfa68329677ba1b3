#![allow(dead_code)] // OpenAPI doc stubs are only referenced by utoipa macros.

use crate::{
    handlers::treaties::TreatyListQuery,
    models::{
        audit_log::{AuditAction, AuditLogView},
        treaty::{CreateTreatyPayload, ExpiringTreaty, Treaty},
        user::Role,
    },
    services::report::{ExpiryNotification, StatusCount},
};
use utoipa::{
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
    Modify, OpenApi,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        list_treaties_doc,
        get_treaty_doc,
        create_treaty_doc,
        update_treaty_doc,
        archive_treaty_doc,
        audit_logs_doc,
        check_expiry_doc,
        status_counts_doc,
        expiring_soon_doc
    ),
    components(
        schemas(
            Treaty,
            CreateTreatyPayload,
            ExpiringTreaty,
            AuditAction,
            AuditLogView,
            StatusCount,
            ExpiryNotification,
            Role
        )
    ),
    modifiers(&SecuritySchemes),
    tags(
        (name = "Treaties", description = "Treaty CRUD, search and archival"),
        (name = "Audit", description = "Immutable per-treaty change history"),
        (name = "Reports", description = "Status and expiry aggregations"),
        (name = "Notifications", description = "Expiry notification simulation")
    ),
    security(("BearerAuth" = []))
)]
pub struct ApiDoc;

struct SecuritySchemes;

impl Modify for SecuritySchemes {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_default();

        let mut bearer = Http::new(HttpAuthScheme::Bearer);
        bearer.bearer_format = Some("JWT".to_string());

        components.add_security_scheme("BearerAuth", SecurityScheme::Http(bearer));
    }
}

#[utoipa::path(
    get,
    path = "/treaties",
    params(TreatyListQuery),
    responses(
        (status = 200, description = "Active treaties matching the filters", body = Vec<Treaty>),
        (status = 401, description = "Missing or invalid credential")
    ),
    tag = "Treaties"
)]
fn list_treaties_doc() {}

#[utoipa::path(
    get,
    path = "/treaties/{id}",
    params(("id" = i64, Path, description = "Treaty id")),
    responses(
        (status = 200, description = "The treaty, archived or not", body = Treaty),
        (status = 404, description = "No treaty with this id")
    ),
    tag = "Treaties"
)]
fn get_treaty_doc() {}

#[utoipa::path(
    post,
    path = "/treaties",
    request_body = CreateTreatyPayload,
    responses(
        (status = 201, description = "Created; one CREATE audit entry written", body = Treaty),
        (status = 403, description = "Caller is not an admin")
    ),
    tag = "Treaties"
)]
fn create_treaty_doc() {}

#[utoipa::path(
    put,
    path = "/treaties/{id}",
    params(("id" = i64, Path, description = "Treaty id")),
    request_body = serde_json::Value,
    responses(
        (status = 200, description = "Updated record plus message, or a no-op message when nothing changed"),
        (status = 403, description = "Caller is not an admin")
    ),
    tag = "Treaties"
)]
fn update_treaty_doc() {}

#[utoipa::path(
    delete,
    path = "/treaties/{id}",
    params(("id" = i64, Path, description = "Treaty id")),
    responses(
        (status = 200, description = "Archived (logical delete); record retained"),
        (status = 403, description = "Caller is not an admin")
    ),
    tag = "Treaties"
)]
fn archive_treaty_doc() {}

#[utoipa::path(
    get,
    path = "/treaties/{id}/audit_logs",
    params(("id" = i64, Path, description = "Treaty id")),
    responses(
        (status = 200, description = "Change history, newest first", body = Vec<AuditLogView>)
    ),
    tag = "Audit"
)]
fn audit_logs_doc() {}

#[utoipa::path(
    post,
    path = "/notifications/check_expiry",
    responses(
        (status = 200, description = "Synthesized alerts for treaties expiring in the notice window"),
        (status = 403, description = "Caller is not an admin")
    ),
    tag = "Notifications"
)]
fn check_expiry_doc() {}

#[utoipa::path(
    get,
    path = "/reports/status_counts",
    responses(
        (status = 200, description = "Status histogram over active treaties", body = Vec<StatusCount>)
    ),
    tag = "Reports"
)]
fn status_counts_doc() {}

#[utoipa::path(
    get,
    path = "/reports/expiring_soon",
    responses(
        (status = 200, description = "Active treaties expiring in the report window, ascending", body = Vec<ExpiringTreaty>)
    ),
    tag = "Reports"
)]
fn expiring_soon_doc() {}
