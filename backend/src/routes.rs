use axum::{
    http::Method,
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{docs, handlers, middleware as auth_middleware, state::AppState};

/// Builds the full application router. Shared by `main` and the
/// integration tests.
pub fn build_router(state: AppState) -> Router {
    // Read routes: any authenticated role.
    let read_routes = Router::new()
        .route("/treaties", get(handlers::treaties::list_treaties))
        .route("/treaties/{id}", get(handlers::treaties::get_treaty))
        .route(
            "/treaties/{id}/audit_logs",
            get(handlers::audit_logs::get_audit_logs),
        )
        .route(
            "/reports/status_counts",
            get(handlers::reports::status_counts),
        )
        .route(
            "/reports/expiring_soon",
            get(handlers::reports::expiring_soon),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::auth,
        ));

    // Mutating routes: admin only.
    let admin_routes = Router::new()
        .route("/treaties", post(handlers::treaties::create_treaty))
        .route(
            "/treaties/{id}",
            put(handlers::treaties::update_treaty).delete(handlers::treaties::archive_treaty),
        )
        .route(
            "/notifications/check_expiry",
            post(handlers::notifications::check_expiry),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::auth_admin,
        ));

    Router::new()
        .merge(read_routes)
        .merge(admin_routes)
        .merge(
            SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods([
                            Method::GET,
                            Method::POST,
                            Method::PUT,
                            Method::DELETE,
                            Method::OPTIONS,
                        ])
                        .allow_headers(Any)
                        .max_age(std::time::Duration::from_secs(24 * 60 * 60)),
                ),
        )
        .with_state(state)
}
