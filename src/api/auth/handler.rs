//! Auth API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::CurrentUser;
use crate::common::{AppError, AppResult};
use crate::core::ServerState;
use crate::db::models::{UserCreate, UserResponse, UserRole};
use crate::db::repository::{UserRepository, parse_id};
use crate::security_log;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

/// POST /api/auth/register - create an account and log it in
pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<UserCreate>,
) -> AppResult<Json<AuthResponse>> {
    payload.validate()?;

    // Admin accounts are provisioned out of band
    if payload.role == UserRole::Admin {
        return Err(AppError::validation("Invalid role"));
    }

    let repo = UserRepository::new(state.db.clone());
    let user = repo.create(payload).await?;

    let id = user
        .id
        .as_ref()
        .ok_or_else(|| AppError::internal("User record missing id"))?;
    let token = state
        .get_jwt_service()
        .generate_token(&id.to_string(), &user.name, user.role.as_str())?;

    security_log!("INFO", "user_registered", email = user.email.clone());

    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

/// POST /api/auth/login - verify credentials, return a token
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let repo = UserRepository::new(state.db.clone());

    let user = repo
        .find_by_email(&payload.email)
        .await?
        .ok_or_else(|| AppError::validation("Invalid email or password"))?;

    let verified = user
        .verify_password(&payload.password)
        .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;
    if !verified {
        security_log!("WARN", "login_failed", email = payload.email.clone());
        return Err(AppError::validation("Invalid email or password"));
    }

    let id = user
        .id
        .as_ref()
        .ok_or_else(|| AppError::internal("User record missing id"))?;
    let token = state
        .get_jwt_service()
        .generate_token(&id.to_string(), &user.name, user.role.as_str())?;

    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

/// GET /api/auth/profile - fresh user record for the caller
pub async fn profile(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<UserResponse>> {
    let repo = UserRepository::new(state.db.clone());
    let record = repo
        .find_by_id(&user.id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;
    Ok(Json(record.into()))
}

/// PUT /api/auth/favorites/{restaurant_id} - toggle a favorite restaurant
pub async fn toggle_favorite(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(restaurant_id): Path<String>,
) -> AppResult<Json<UserResponse>> {
    let restaurant_id = parse_id("restaurant", &restaurant_id)?;

    let repo = UserRepository::new(state.db.clone());
    let updated = repo.toggle_favorite(&user.id, &restaurant_id).await?;
    Ok(Json(updated.into()))
}
