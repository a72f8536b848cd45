//! Payment API Handlers
//!
//! Deposit flow: `create-order` opens an order at the gateway for the
//! reservation's deposit, the client pays it there, then `verify` checks
//! the returned signature and confirms the reservation.

use axum::{
    Json,
    extract::State,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::auth::{Access, CurrentUser, authorize};
use crate::common::{AppError, AppResult};
use crate::core::ServerState;
use crate::db::models::{PaymentStatus, Reservation, ReservationStatus};
use crate::db::repository::{ReservationRepository, parse_id};
use crate::security_log;
use crate::services::PaymentOrder;

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub reservation_id: String,
}

#[derive(Debug, Serialize)]
pub struct CreateOrderResponse {
    pub order: PaymentOrder,
    pub key_id: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub reservation_id: String,
    pub order_id: String,
    pub payment_id: String,
    pub signature: String,
}

/// POST /api/payments/create-order - open a gateway order for the deposit
pub async fn create_order(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<Json<CreateOrderResponse>> {
    let id = parse_id("reservation", &payload.reservation_id)?;
    let repo = ReservationRepository::new(state.db.clone());
    let reservation = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Reservation not found"))?;
    authorize(&user, Access::UserIs(&reservation.user))?;

    if reservation.payment.status != PaymentStatus::Pending {
        return Err(AppError::validation("Deposit is not payable"));
    }

    let receipt = id.to_string();
    let order = state
        .payments
        .create_order(reservation.payment.amount, &receipt)
        .await?;

    Ok(Json(CreateOrderResponse {
        order,
        key_id: state.config.payment.key_id.clone(),
    }))
}

/// POST /api/payments/verify - check the gateway signature, confirm
pub async fn verify(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<VerifyRequest>,
) -> AppResult<Json<Reservation>> {
    let id = parse_id("reservation", &payload.reservation_id)?;
    let repo = ReservationRepository::new(state.db.clone());
    let mut reservation = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Reservation not found"))?;
    authorize(&user, Access::UserIs(&reservation.user))?;

    // Re-verifying an already captured deposit is a no-op
    if reservation.payment.status == PaymentStatus::Completed
        && reservation.status == ReservationStatus::Confirmed
    {
        return Ok(Json(reservation));
    }

    if !state
        .payments
        .verify_signature(&payload.order_id, &payload.payment_id, &payload.signature)
    {
        security_log!(
            "WARN",
            "payment_signature_mismatch",
            reservation = payload.reservation_id.clone(),
            order = payload.order_id.clone()
        );
        return Err(AppError::validation("Invalid payment signature"));
    }

    if !reservation
        .status
        .can_transition_to(ReservationStatus::Confirmed)
    {
        return Err(AppError::validation(
            "Reservation can no longer be confirmed",
        ));
    }

    reservation.payment.status = PaymentStatus::Completed;
    reservation.payment.transaction_id = Some(payload.payment_id);
    reservation.payment.paid_at = Some(Utc::now());
    reservation.status = ReservationStatus::Confirmed;

    let updated = repo.update(&id, reservation).await?;
    Ok(Json(updated))
}
