use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use std::str::FromStr;

use crate::{
    error::AppError,
    models::user::{AuthUser, Role},
    state::AppState,
    utils::jwt::verify_access_token,
};

/// Credential verification: resolves the bearer token to `(user_id, role)`
/// and stores the result as an `AuthUser` request extension. Any
/// authenticated role passes.
pub async fn auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = authenticate_request(request.headers(), &state)?;
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Auth + require the admin role for mutating routes.
pub async fn auth_admin(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = authenticate_request(request.headers(), &state)?;
    if !user.is_admin() {
        return Err(AppError::Forbidden(
            "Forbidden: Must be Admin to modify treaties".to_string(),
        ));
    }

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

fn authenticate_request(
    headers: &axum::http::HeaderMap,
    state: &AppState,
) -> Result<AuthUser, AppError> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_bearer_token)
        .ok_or_else(|| AppError::Unauthorized("Unauthorized".to_string()))?;

    let claims = verify_access_token(token, &state.config.jwt_secret)
        .map_err(|_| AppError::Unauthorized("Unauthorized".to_string()))?;

    let role = Role::from_str(&claims.role)
        .map_err(|_| AppError::Unauthorized("Unauthorized".to_string()))?;

    Ok(AuthUser {
        id: claims.sub,
        role,
    })
}

fn parse_bearer_token(header: &str) -> Option<&str> {
    if let Some(rest) = header.strip_prefix("Bearer ") {
        return Some(rest);
    }
    if let Some(space_idx) = header.find(' ') {
        let (scheme, rest) = header.split_at(space_idx);
        if scheme.eq_ignore_ascii_case("bearer") {
            return Some(rest.trim_start());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bearer_token_accepts_standard_header() {
        assert_eq!(parse_bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
    }

    #[test]
    fn parse_bearer_token_is_scheme_case_insensitive() {
        assert_eq!(parse_bearer_token("bearer token"), Some("token"));
        assert_eq!(parse_bearer_token("BEARER token"), Some("token"));
    }

    #[test]
    fn parse_bearer_token_rejects_other_schemes() {
        assert_eq!(parse_bearer_token("Basic dXNlcjpwYXNz"), None);
        assert_eq!(parse_bearer_token("token-without-scheme"), None);
    }
}
