//! Review Model
//!
//! One review per (user, restaurant) pair, enforced by a unique index.
//! Only approved reviews count toward the restaurant's derived rating.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

use super::restaurant::{Image, RestaurantId};
use super::serde_helpers;
use super::user::UserId;

/// Review ID type
pub type ReviewId = RecordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    Pending,
    Approved,
    Rejected,
}

impl Default for ReviewStatus {
    fn default() -> Self {
        ReviewStatus::Pending
    }
}

/// Owner reply embedded in the review
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewReply {
    pub id: String,
    #[serde(with = "serde_helpers::record_id")]
    pub user: UserId,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

/// Review document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<ReviewId>,
    #[serde(with = "serde_helpers::record_id")]
    pub user: UserId,
    #[serde(with = "serde_helpers::record_id")]
    pub restaurant: RestaurantId,
    /// 1..=5 stars
    pub rating: u8,
    pub title: String,
    pub comment: String,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default, with = "serde_helpers::vec_record_id")]
    pub likes: Vec<UserId>,
    #[serde(default)]
    pub status: ReviewStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visit_date: Option<NaiveDate>,
    #[serde(default)]
    pub replies: Vec<ReviewReply>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create payload - status is forced to pending server-side
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReviewCreate {
    /// Restaurant id, `restaurant:key` form
    pub restaurant: String,
    #[validate(range(min = 1, max = 5))]
    pub rating: u8,
    #[validate(length(min = 1, max = 100))]
    pub title: String,
    #[validate(length(min = 1, max = 1000))]
    pub comment: String,
    /// Hosted image URLs
    #[serde(default)]
    pub images: Vec<String>,
    pub visit_date: Option<NaiveDate>,
}

/// Author edit payload
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ReviewUpdate {
    #[validate(range(min = 1, max = 5))]
    pub rating: Option<u8>,
    #[validate(length(min = 1, max = 100))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 1000))]
    pub comment: Option<String>,
    pub images: Option<Vec<String>>,
    pub visit_date: Option<NaiveDate>,
}

/// Admin moderation payload for `PUT /api/reviews/{id}/status`
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewStatusUpdate {
    pub status: ReviewStatus,
}

/// Admin moderation payload for `PATCH /api/admin/reviews/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewModeration {
    /// "approve" | "reject"
    pub action: String,
}

/// Reply payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReplyCreate {
    #[validate(length(min = 1, max = 1000))]
    pub comment: String,
}
