//! Admin API Handlers
//!
//! Every route requires the admin role.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::auth::{Access, CurrentUser, authorize};
use crate::common::{AppError, AppResult};
use crate::core::ServerState;
use crate::db::models::{
    Reservation, Restaurant, RestaurantFilter, RestaurantStatus, RestaurantUpdate, Review,
    ReviewModeration, ReviewStatus, UserRole,
};
use crate::db::repository::{
    ReservationRepository, RestaurantRepository, ReviewFilter, ReviewRepository, parse_id,
};
use crate::services::rating::recompute_best_effort;

#[derive(Debug, Serialize)]
pub struct PlatformStats {
    pub total_reservations: u64,
    pub total_revenue: f64,
    pub total_reviews: u64,
    pub average_rating: f64,
    pub active_restaurants: u64,
}

#[derive(Debug, Deserialize)]
pub struct RestaurantStatusUpdate {
    pub status: RestaurantStatus,
}

/// GET /api/admin/stats - platform-wide totals
pub async fn stats(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<PlatformStats>> {
    authorize(&user, Access::Role(UserRole::Admin))?;

    let reservations = ReservationRepository::new(state.db.clone());
    let reviews = ReviewRepository::new(state.db.clone());
    let restaurants = RestaurantRepository::new(state.db.clone());

    let stats = PlatformStats {
        total_reservations: reservations.count_all().await?,
        total_revenue: reservations.completed_revenue().await?,
        total_reviews: reviews.count_all().await?,
        average_rating: reviews.avg_rating_all().await?,
        active_restaurants: restaurants.count_active().await?,
    };

    Ok(Json(stats))
}

/// GET /api/admin/restaurants - all listings, any status
pub async fn list_restaurants(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(filter): Query<RestaurantFilter>,
) -> AppResult<Json<Vec<Restaurant>>> {
    authorize(&user, Access::Role(UserRole::Admin))?;

    let repo = RestaurantRepository::new(state.db.clone());
    let restaurants = repo.find_all(&filter).await?;
    Ok(Json(restaurants))
}

/// PATCH /api/admin/restaurants/{id} - approve or deactivate a listing
pub async fn set_restaurant_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<RestaurantStatusUpdate>,
) -> AppResult<Json<Restaurant>> {
    authorize(&user, Access::Role(UserRole::Admin))?;

    let id = parse_id("restaurant", &id)?;
    let repo = RestaurantRepository::new(state.db.clone());
    let updated = repo.set_status(&id, payload.status).await?;
    Ok(Json(updated))
}

/// PUT /api/admin/restaurants/{id} - edit listing details
pub async fn update_restaurant(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<RestaurantUpdate>,
) -> AppResult<Json<Restaurant>> {
    authorize(&user, Access::Role(UserRole::Admin))?;

    let id = parse_id("restaurant", &id)?;
    let repo = RestaurantRepository::new(state.db.clone());
    let updated = repo.update(&id, payload).await?;
    Ok(Json(updated))
}

/// GET /api/admin/reservations - every reservation
pub async fn list_reservations(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Reservation>>> {
    authorize(&user, Access::Role(UserRole::Admin))?;

    let repo = ReservationRepository::new(state.db.clone());
    let reservations = repo.find_all().await?;
    Ok(Json(reservations))
}

/// GET /api/admin/reviews - every review, filters optional
pub async fn list_reviews(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(filter): Query<ReviewFilter>,
) -> AppResult<Json<Vec<Review>>> {
    authorize(&user, Access::Role(UserRole::Admin))?;

    let repo = ReviewRepository::new(state.db.clone());
    let reviews = repo.find_all(&filter).await?;
    Ok(Json(reviews))
}

/// PATCH /api/admin/reviews/{id} - approve or reject a review
pub async fn moderate_review(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<ReviewModeration>,
) -> AppResult<Json<Review>> {
    authorize(&user, Access::Role(UserRole::Admin))?;

    let status = match payload.action.as_str() {
        "approve" => ReviewStatus::Approved,
        "reject" => ReviewStatus::Rejected,
        other => {
            return Err(AppError::validation(format!(
                "Unknown moderation action: {}",
                other
            )));
        }
    };

    let id = parse_id("review", &id)?;
    let repo = ReviewRepository::new(state.db.clone());
    let updated = repo.set_status(&id, status).await?;
    recompute_best_effort(&state.db, &updated.restaurant).await;
    Ok(Json(updated))
}

/// DELETE /api/admin/reviews/{id} - remove a review outright
pub async fn delete_review(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    authorize(&user, Access::Role(UserRole::Admin))?;

    let id = parse_id("review", &id)?;
    let repo = ReviewRepository::new(state.db.clone());
    let review = repo
        .delete(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Review not found"))?;

    recompute_best_effort(&state.db, &review.restaurant).await;
    Ok(Json(serde_json::json!({ "message": "Review deleted" })))
}
