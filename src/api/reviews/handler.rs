//! Review API Handlers
//!
//! Every write that can change a restaurant's approved review set ends with
//! a best-effort rating recompute for that restaurant.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::auth::{Access, CurrentUser, authorize};
use crate::common::{AppError, AppResult};
use crate::core::ServerState;
use crate::db::models::{
    Image, ReplyCreate, Review, ReviewCreate, ReviewReply, ReviewStatus, ReviewStatusUpdate,
    ReviewUpdate, UserRole,
};
use crate::db::repository::{RestaurantRepository, ReviewFilter, ReviewRepository, parse_id};
use crate::services::rating::recompute_best_effort;

fn urls_to_images(urls: Vec<String>) -> Vec<Image> {
    urls.into_iter()
        .map(|url| Image {
            url,
            caption: String::new(),
        })
        .collect()
}

/// GET /api/reviews - public listing with filters
pub async fn list(
    State(state): State<ServerState>,
    Query(mut filter): Query<ReviewFilter>,
) -> AppResult<Json<Vec<Review>>> {
    // Restaurant filter accepts either `restaurant:key` or the bare key
    if let Some(raw) = &filter.restaurant {
        filter.restaurant = Some(parse_id("restaurant", raw)?.to_string());
    }

    let repo = ReviewRepository::new(state.db.clone());
    let reviews = repo.find_all(&filter).await?;
    Ok(Json(reviews))
}

/// GET /api/reviews/{id} - public detail
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Review>> {
    let id = parse_id("review", &id)?;
    let repo = ReviewRepository::new(state.db.clone());
    let review = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Review not found"))?;
    Ok(Json(review))
}

/// POST /api/reviews - create, forced into moderation
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<ReviewCreate>,
) -> AppResult<Json<Review>> {
    payload.validate()?;

    let restaurant_id = parse_id("restaurant", &payload.restaurant)?;
    let restaurants = RestaurantRepository::new(state.db.clone());
    restaurants
        .find_by_id(&restaurant_id)
        .await?
        .ok_or_else(|| AppError::not_found("Restaurant not found"))?;

    let now = Utc::now();
    let review = Review {
        id: None,
        user: user.id.clone(),
        restaurant: restaurant_id.clone(),
        rating: payload.rating,
        title: payload.title,
        comment: payload.comment,
        images: urls_to_images(payload.images),
        likes: Vec::new(),
        status: ReviewStatus::Pending,
        visit_date: payload.visit_date,
        replies: Vec::new(),
        created_at: now,
        updated_at: now,
    };

    let repo = ReviewRepository::new(state.db.clone());
    let created = repo.create(review).await?;
    recompute_best_effort(&state.db, &restaurant_id).await;
    Ok(Json(created))
}

/// PUT /api/reviews/{id} - author or admin edit
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<ReviewUpdate>,
) -> AppResult<Json<Review>> {
    payload.validate()?;

    let id = parse_id("review", &id)?;
    let repo = ReviewRepository::new(state.db.clone());
    let mut review = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Review not found"))?;
    authorize(&user, Access::UserIs(&review.user))?;

    if let Some(rating) = payload.rating {
        review.rating = rating;
    }
    if let Some(title) = payload.title {
        review.title = title;
    }
    if let Some(comment) = payload.comment {
        review.comment = comment;
    }
    if let Some(images) = payload.images {
        review.images = urls_to_images(images);
    }
    if payload.visit_date.is_some() {
        review.visit_date = payload.visit_date;
    }

    let restaurant = review.restaurant.clone();
    let updated = repo.update(&id, review).await?;
    recompute_best_effort(&state.db, &restaurant).await;
    Ok(Json(updated))
}

/// DELETE /api/reviews/{id} - author or admin
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let id = parse_id("review", &id)?;
    let repo = ReviewRepository::new(state.db.clone());
    let review = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Review not found"))?;
    authorize(&user, Access::UserIs(&review.user))?;

    repo.delete(&id).await?;
    recompute_best_effort(&state.db, &review.restaurant).await;
    Ok(Json(serde_json::json!({ "message": "Review deleted" })))
}

/// PUT /api/reviews/{id}/status - admin moderation
pub async fn set_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<ReviewStatusUpdate>,
) -> AppResult<Json<Review>> {
    authorize(&user, Access::Role(UserRole::Admin))?;

    let id = parse_id("review", &id)?;
    let repo = ReviewRepository::new(state.db.clone());
    let updated = repo.set_status(&id, payload.status).await?;
    recompute_best_effort(&state.db, &updated.restaurant).await;
    Ok(Json(updated))
}

/// PUT /api/reviews/{id}/like - toggle the caller's like
pub async fn toggle_like(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Review>> {
    let id = parse_id("review", &id)?;
    let repo = ReviewRepository::new(state.db.clone());
    let updated = repo.toggle_like(&id, &user.id).await?;
    Ok(Json(updated))
}

/// POST /api/reviews/{id}/replies - reply from the restaurant owner
pub async fn add_reply(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<ReplyCreate>,
) -> AppResult<Json<Review>> {
    payload.validate()?;

    let id = parse_id("review", &id)?;
    let repo = ReviewRepository::new(state.db.clone());
    let review = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Review not found"))?;

    let restaurants = RestaurantRepository::new(state.db.clone());
    let restaurant = restaurants
        .find_by_id(&review.restaurant)
        .await?
        .ok_or_else(|| AppError::not_found("Restaurant not found"))?;
    authorize(&user, Access::OwnerOf(&restaurant))?;

    let reply = ReviewReply {
        id: Uuid::new_v4().simple().to_string(),
        user: user.id.clone(),
        comment: payload.comment,
        created_at: Utc::now(),
    };

    let updated = repo.add_reply(&id, reply).await?;
    Ok(Json(updated))
}

/// DELETE /api/reviews/{id}/replies/{reply_id} - reply author or admin
pub async fn delete_reply(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path((id, reply_id)): Path<(String, String)>,
) -> AppResult<Json<Review>> {
    let id = parse_id("review", &id)?;
    let repo = ReviewRepository::new(state.db.clone());
    let review = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Review not found"))?;

    let reply = review
        .replies
        .iter()
        .find(|r| r.id == reply_id)
        .ok_or_else(|| AppError::not_found("Reply not found"))?;
    authorize(&user, Access::UserIs(&reply.user))?;

    let updated = repo.remove_reply(&id, &reply_id).await?;
    Ok(Json(updated))
}
