//! Reservation API Handlers
//!
//! Status changes go through `ReservationStatus::can_transition_to`; a
//! cancellation must carry a reason and records who cancelled.

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use rust_decimal::Decimal;
use validator::Validate;

use crate::auth::{Access, CurrentUser, authorize};
use crate::common::{AppError, AppResult};
use crate::core::ServerState;
use crate::db::models::{
    CancelledBy, Cancellation, Payment, Reservation, ReservationCreate, ReservationStatus,
    ReservationUpdate,
};
use crate::db::repository::{ReservationRepository, RestaurantRepository, parse_id};

/// GET /api/reservations - the caller's reservations
pub async fn list_mine(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Reservation>>> {
    let repo = ReservationRepository::new(state.db.clone());
    let reservations = repo.find_by_user(&user.id).await?;
    Ok(Json(reservations))
}

/// GET /api/reservations/restaurant/{restaurant_id} - owner's view
pub async fn list_for_restaurant(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(restaurant_id): Path<String>,
) -> AppResult<Json<Vec<Reservation>>> {
    let restaurant_id = parse_id("restaurant", &restaurant_id)?;

    let restaurants = RestaurantRepository::new(state.db.clone());
    let restaurant = restaurants
        .find_by_id(&restaurant_id)
        .await?
        .ok_or_else(|| AppError::not_found("Restaurant not found"))?;
    authorize(&user, Access::OwnerOf(&restaurant))?;

    let repo = ReservationRepository::new(state.db.clone());
    let reservations = repo.find_by_restaurant(&restaurant_id).await?;
    Ok(Json(reservations))
}

/// GET /api/reservations/{id} - reservation's user, restaurant owner, or admin
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Reservation>> {
    let id = parse_id("reservation", &id)?;
    let repo = ReservationRepository::new(state.db.clone());
    let reservation = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Reservation not found"))?;

    let restaurants = RestaurantRepository::new(state.db.clone());
    let restaurant = restaurants.find_by_id(&reservation.restaurant).await?;
    authorize(
        &user,
        Access::UserOrOwnerOf(&reservation.user, restaurant.as_ref()),
    )?;

    Ok(Json(reservation))
}

/// POST /api/reservations - book a table, deposit pending
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<ReservationCreate>,
) -> AppResult<Json<Reservation>> {
    payload.validate()?;

    let restaurant_id = parse_id("restaurant", &payload.restaurant)?;
    let restaurants = RestaurantRepository::new(state.db.clone());
    restaurants
        .find_by_id(&restaurant_id)
        .await?
        .ok_or_else(|| AppError::not_found("Restaurant not found"))?;

    let deposit = Decimal::from(payload.party_size) * state.config.deposit_per_guest;
    let now = Utc::now();

    let reservation = Reservation {
        id: None,
        user: user.id.clone(),
        restaurant: restaurant_id,
        date: payload.date,
        time: payload.time,
        party_size: payload.party_size,
        special_requests: payload.special_requests,
        status: ReservationStatus::Pending,
        payment: Payment::pending(deposit),
        cancellation: None,
        created_at: now,
        updated_at: now,
    };

    let repo = ReservationRepository::new(state.db.clone());
    let created = repo.create(reservation).await?;
    Ok(Json(created))
}

/// PUT /api/reservations/{id} - drive the status state machine
pub async fn update_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<ReservationUpdate>,
) -> AppResult<Json<Reservation>> {
    let id = parse_id("reservation", &id)?;
    let repo = ReservationRepository::new(state.db.clone());
    let mut reservation = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Reservation not found"))?;

    let restaurants = RestaurantRepository::new(state.db.clone());
    let restaurant = restaurants.find_by_id(&reservation.restaurant).await?;
    authorize(
        &user,
        Access::UserOrOwnerOf(&reservation.user, restaurant.as_ref()),
    )?;

    let from = reservation.status;
    let to = payload.status;
    if !from.can_transition_to(to) {
        return Err(AppError::validation(format!(
            "Cannot change reservation from {:?} to {:?}",
            from, to
        )));
    }

    match to {
        ReservationStatus::Cancelled => {
            let reason = payload
                .cancellation_reason
                .filter(|r| !r.trim().is_empty())
                .ok_or_else(|| AppError::validation("Cancellation reason is required"))?;

            let cancelled_by = if user.is_admin() {
                CancelledBy::System
            } else if reservation.user == user.id {
                CancelledBy::User
            } else {
                CancelledBy::Restaurant
            };

            reservation.cancellation = Some(Cancellation {
                cancelled_at: Utc::now(),
                cancelled_by,
                reason,
            });
        }
        ReservationStatus::Confirmed | ReservationStatus::Completed => {
            // Customers confirm through payment verification, not here
            let is_owner = restaurant
                .as_ref()
                .map(|r| r.owner == user.id)
                .unwrap_or(false);
            if !user.is_admin() && !is_owner {
                return Err(AppError::forbidden(
                    "Not authorized to access this resource",
                ));
            }
        }
        ReservationStatus::Pending => {
            // Unreachable through the transition guard
            return Err(AppError::validation("Invalid status value"));
        }
    }

    reservation.status = to;
    let updated = repo.update(&id, reservation).await?;
    Ok(Json(updated))
}
