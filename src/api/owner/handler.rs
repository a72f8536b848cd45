//! Owner dashboard handlers

use axum::{Json, extract::State};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::auth::{Access, CurrentUser, authorize};
use crate::common::{AppError, AppResult};
use crate::core::ServerState;
use crate::db::models::{PaymentStatus, Restaurant, ReservationStatus, UserRole};
use crate::db::repository::{ReservationRepository, RestaurantRepository};

#[derive(Debug, Serialize)]
pub struct OwnerStats {
    pub total_reservations: u64,
    pub pending_reservations: u64,
    pub confirmed_reservations: u64,
    pub completed_reservations: u64,
    pub cancelled_reservations: u64,
    pub total_revenue: Decimal,
    pub rating: f64,
    pub review_count: u64,
}

async fn owned_restaurant(state: &ServerState, user: &CurrentUser) -> AppResult<Restaurant> {
    authorize(
        user,
        Access::AnyRole(&[UserRole::RestaurantOwner, UserRole::Admin]),
    )?;

    let restaurants = RestaurantRepository::new(state.db.clone());
    restaurants
        .find_by_owner(&user.id)
        .await?
        .ok_or_else(|| AppError::not_found("No restaurant found for this account"))
}

/// GET /api/owner/restaurant - the caller's restaurant
pub async fn my_restaurant(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Restaurant>> {
    let restaurant = owned_restaurant(&state, &user).await?;
    Ok(Json(restaurant))
}

/// GET /api/owner/restaurant/stats - reservation and revenue summary
pub async fn my_stats(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<OwnerStats>> {
    let restaurant = owned_restaurant(&state, &user).await?;
    let restaurant_id = restaurant
        .id
        .as_ref()
        .ok_or_else(|| AppError::internal("Restaurant record missing id"))?;

    let reservations = ReservationRepository::new(state.db.clone())
        .find_by_restaurant(restaurant_id)
        .await?;

    let mut stats = OwnerStats {
        total_reservations: reservations.len() as u64,
        pending_reservations: 0,
        confirmed_reservations: 0,
        completed_reservations: 0,
        cancelled_reservations: 0,
        total_revenue: Decimal::ZERO,
        rating: restaurant.rating,
        review_count: restaurant.review_count,
    };

    for reservation in &reservations {
        match reservation.status {
            ReservationStatus::Pending => stats.pending_reservations += 1,
            ReservationStatus::Confirmed => stats.confirmed_reservations += 1,
            ReservationStatus::Completed => stats.completed_reservations += 1,
            ReservationStatus::Cancelled => stats.cancelled_reservations += 1,
        }
        if reservation.payment.status == PaymentStatus::Completed {
            stats.total_revenue += reservation.payment.amount;
        }
    }

    Ok(Json(stats))
}
