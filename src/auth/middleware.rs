//! Authentication middleware
//!
//! Validates `Authorization: Bearer <token>` and injects [`CurrentUser`]
//! into request extensions. The user is re-resolved against the store on
//! every request, so stale tokens for removed accounts fail with 401.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use http::Method;

use crate::auth::{CurrentUser, JwtService};
use crate::common::AppError;
use crate::core::ServerState;
use crate::db::repository::UserRepository;
use crate::security_log;

/// Routes reachable without a token.
///
/// Discovery endpoints (restaurant and review reads) are public; all
/// mutations require authentication.
fn is_public_route(method: &Method, path: &str) -> bool {
    if path == "/api/auth/register" || path == "/api/auth/login" {
        return method == Method::POST;
    }

    if method == Method::GET {
        return path == "/api/restaurants"
            || path.starts_with("/api/restaurants/")
            || path == "/api/reviews"
            || path.starts_with("/api/reviews/");
    }

    false
}

/// Authentication middleware - requires a logged-in caller.
///
/// Skips: CORS preflight, non-`/api` paths and the public allowlist above.
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path().to_string();

    // CORS preflight passes through
    if req.method() == Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    // Non-API routes (health, 404s) skip authentication
    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    if is_public_route(req.method(), &path) {
        return Ok(next.run(req).await);
    }

    let user = resolve_current_user(&state, req.headers(), &path).await?;
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// Validate the bearer token and load the user it names.
pub(crate) async fn resolve_current_user(
    state: &ServerState,
    headers: &http::HeaderMap,
    path: &str,
) -> Result<CurrentUser, AppError> {
    let auth_header = headers
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            security_log!("WARN", "auth_missing", path = path);
            return Err(AppError::unauthorized());
        }
    };

    let claims = state.jwt_service.validate_token(token).map_err(|e| {
        security_log!("WARN", "auth_failed", error = format!("{}", e), path = path);
        match e {
            crate::auth::JwtError::ExpiredToken => AppError::token_expired(),
            _ => AppError::invalid_token("Invalid token"),
        }
    })?;

    // Re-resolve identity and role against the user store
    let user_id = claims
        .sub
        .parse::<surrealdb::RecordId>()
        .map_err(|_| AppError::invalid_token("Malformed subject claim"))?;

    let repo = UserRepository::new(state.db.clone());
    let user = repo
        .find_by_id(&user_id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| {
            security_log!("WARN", "auth_user_missing", sub = claims.sub.clone(), path = path);
            AppError::unauthorized()
        })?;

    CurrentUser::from_user(&user)
        .ok_or_else(|| AppError::internal("User record missing id".to_string()))
}
