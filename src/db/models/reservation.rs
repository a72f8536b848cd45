//! Reservation Model
//!
//! Status transitions: `pending -> confirmed -> completed`, with
//! cancellation reachable from any non-terminal state. Cancellation
//! metadata travels in one struct so the three fields are set together or
//! not at all.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

use super::restaurant::RestaurantId;
use super::serde_helpers;
use super::user::UserId;

/// Reservation ID type
pub type ReservationId = RecordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl ReservationStatus {
    /// State machine guard. Terminal states admit nothing.
    pub fn can_transition_to(self, to: ReservationStatus) -> bool {
        use ReservationStatus::*;
        matches!(
            (self, to),
            (Pending, Confirmed) | (Pending, Cancelled) | (Confirmed, Completed) | (Confirmed, Cancelled)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, ReservationStatus::Cancelled | ReservationStatus::Completed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
    Refunded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CancelledBy {
    User,
    Restaurant,
    System,
}

/// Embedded payment state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub status: PaymentStatus,
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<DateTime<Utc>>,
}

impl Payment {
    /// Fresh deposit awaiting capture
    pub fn pending(amount: Decimal) -> Self {
        Self {
            status: PaymentStatus::Pending,
            amount,
            transaction_id: None,
            payment_method: None,
            paid_at: None,
        }
    }
}

/// Cancellation metadata - always recorded as a whole
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cancellation {
    pub cancelled_at: DateTime<Utc>,
    pub cancelled_by: CancelledBy,
    pub reason: String,
}

/// Reservation document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<ReservationId>,
    #[serde(with = "serde_helpers::record_id")]
    pub user: UserId,
    #[serde(with = "serde_helpers::record_id")]
    pub restaurant: RestaurantId,
    pub date: NaiveDate,
    /// "HH:MM" local restaurant time
    pub time: String,
    pub party_size: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
    pub status: ReservationStatus,
    pub payment: Payment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancellation: Option<Cancellation>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReservationCreate {
    /// Restaurant id, `restaurant:key` form
    pub restaurant: String,
    pub date: NaiveDate,
    pub time: String,
    #[validate(range(min = 1))]
    pub party_size: u32,
    pub special_requests: Option<String>,
}

/// Status change payload
#[derive(Debug, Clone, Deserialize)]
pub struct ReservationUpdate {
    pub status: ReservationStatus,
    /// Required when `status` is `cancelled`
    pub cancellation_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_transitions() {
        use ReservationStatus::*;
        assert!(Pending.can_transition_to(Confirmed));
        assert!(Confirmed.can_transition_to(Completed));
        assert!(!Pending.can_transition_to(Completed));
    }

    #[test]
    fn test_cancellation_branch() {
        use ReservationStatus::*;
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Confirmed.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Confirmed));
        assert!(!Completed.can_transition_to(Cancelled));
    }

    #[test]
    fn test_terminal_states() {
        use ReservationStatus::*;
        assert!(Cancelled.is_terminal());
        assert!(Completed.is_terminal());
        assert!(!Pending.is_terminal());
        // Self transitions are not transitions
        assert!(!Confirmed.can_transition_to(Confirmed));
    }
}
