//! Reservation Repository

use chrono::Utc;
use serde::Deserialize;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{RepoError, RepoResult, new_id};
use crate::db::models::Reservation;

const TABLE: &str = "reservation";

#[derive(Clone)]
pub struct ReservationRepository {
    db: Surreal<Db>,
}

#[derive(Debug, Deserialize)]
struct CountRow {
    count: u64,
}

#[derive(Debug, Deserialize)]
struct SumRow {
    total: Option<f64>,
}

impl ReservationRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub async fn create(&self, reservation: Reservation) -> RepoResult<Reservation> {
        let created: Option<Reservation> =
            self.db.create(new_id(TABLE)).content(reservation).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create reservation".to_string()))
    }

    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Reservation>> {
        let reservation: Option<Reservation> = self.db.select(id.clone()).await?;
        Ok(reservation)
    }

    pub async fn find_by_user(&self, user: &RecordId) -> RepoResult<Vec<Reservation>> {
        let mut result = self
            .db
            .query("SELECT * FROM reservation WHERE user = $user ORDER BY date DESC")
            .bind(("user", user.to_string()))
            .await?;
        let reservations: Vec<Reservation> = result.take(0)?;
        Ok(reservations)
    }

    pub async fn find_by_restaurant(&self, restaurant: &RecordId) -> RepoResult<Vec<Reservation>> {
        let mut result = self
            .db
            .query("SELECT * FROM reservation WHERE restaurant = $restaurant ORDER BY date DESC")
            .bind(("restaurant", restaurant.to_string()))
            .await?;
        let reservations: Vec<Reservation> = result.take(0)?;
        Ok(reservations)
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Reservation>> {
        let mut result = self
            .db
            .query("SELECT * FROM reservation ORDER BY date DESC")
            .await?;
        let reservations: Vec<Reservation> = result.take(0)?;
        Ok(reservations)
    }

    /// Replace a reservation document. Single-document write, so the
    /// status/payment/cancellation fields land atomically.
    pub async fn update(&self, id: &RecordId, mut reservation: Reservation) -> RepoResult<Reservation> {
        reservation.updated_at = Utc::now();
        reservation.id = None;

        let updated: Option<Reservation> =
            self.db.update(id.clone()).content(reservation).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Reservation {} not found", id)))
    }

    pub async fn count_all(&self) -> RepoResult<u64> {
        let mut result = self
            .db
            .query("SELECT count() AS count FROM reservation GROUP ALL")
            .await?;
        let rows: Vec<CountRow> = result.take(0)?;
        Ok(rows.first().map(|r| r.count).unwrap_or(0))
    }

    /// Sum of captured deposits across all reservations.
    pub async fn completed_revenue(&self) -> RepoResult<f64> {
        let mut result = self
            .db
            .query(
                "SELECT math::sum(payment.amount) AS total FROM reservation \
                 WHERE payment.status = 'completed' GROUP ALL",
            )
            .await?;
        let rows: Vec<SumRow> = result.take(0)?;
        Ok(rows.first().and_then(|r| r.total).unwrap_or(0.0))
    }
}
