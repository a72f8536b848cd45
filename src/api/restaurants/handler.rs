//! Restaurant API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use validator::Validate;

use crate::auth::{Access, CurrentUser, authorize};
use crate::common::{AppError, AppResult};
use crate::core::ServerState;
use crate::db::models::{Restaurant, RestaurantCreate, RestaurantFilter, RestaurantUpdate, UserRole};
use crate::db::repository::{RestaurantRepository, parse_id};

/// GET /api/restaurants - public listing with filters
pub async fn list(
    State(state): State<ServerState>,
    Query(filter): Query<RestaurantFilter>,
) -> AppResult<Json<Vec<Restaurant>>> {
    let repo = RestaurantRepository::new(state.db.clone());
    let restaurants = repo.find_all(&filter).await?;
    Ok(Json(restaurants))
}

/// GET /api/restaurants/{id} - public detail
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Restaurant>> {
    let id = parse_id("restaurant", &id)?;
    let repo = RestaurantRepository::new(state.db.clone());
    let restaurant = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Restaurant not found"))?;
    Ok(Json(restaurant))
}

/// POST /api/restaurants - create a listing, one per owner
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<RestaurantCreate>,
) -> AppResult<Json<Restaurant>> {
    authorize(
        &user,
        Access::AnyRole(&[UserRole::RestaurantOwner, UserRole::Admin]),
    )?;
    payload.validate()?;

    let repo = RestaurantRepository::new(state.db.clone());
    let restaurant = repo.create(&user.id, payload).await?;
    Ok(Json(restaurant))
}

/// PUT /api/restaurants/{id} - owning owner or admin
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<RestaurantUpdate>,
) -> AppResult<Json<Restaurant>> {
    let id = parse_id("restaurant", &id)?;
    let repo = RestaurantRepository::new(state.db.clone());

    let restaurant = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Restaurant not found"))?;
    authorize(&user, Access::OwnerOf(&restaurant))?;

    let updated = repo.update(&id, payload).await?;
    Ok(Json(updated))
}
