//! Restaurant Model
//!
//! `rating` and `review_count` are derived fields maintained by the rating
//! aggregation service; nothing else writes them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

use super::serde_helpers;
use super::user::UserId;

/// Restaurant ID type
pub type RestaurantId = RecordId;

/// Price bracket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceRange {
    #[serde(rename = "$")]
    Budget,
    #[serde(rename = "$$")]
    Moderate,
    #[serde(rename = "$$$")]
    Expensive,
    #[serde(rename = "$$$$")]
    Luxury,
}

/// Listing lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RestaurantStatus {
    Active,
    Inactive,
    Pending,
}

impl Default for RestaurantStatus {
    fn default() -> Self {
        RestaurantStatus::Pending
    }
}

/// Hosted image reference
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    #[serde(default)]
    pub caption: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip_code: String,
    #[serde(default)]
    pub country: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DayHours {
    pub open: String,
    pub close: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpeningHours {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monday: Option<DayHours>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tuesday: Option<DayHours>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wednesday: Option<DayHours>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thursday: Option<DayHours>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friday: Option<DayHours>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saturday: Option<DayHours>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sunday: Option<DayHours>,
}

/// Restaurant document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Restaurant {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RestaurantId>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub address: Address,
    pub cuisine: Vec<String>,
    pub price_range: PriceRange,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub opening_hours: OpeningHours,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(with = "serde_helpers::record_id")]
    pub owner: UserId,
    /// Derived: mean of approved review ratings, one decimal place
    #[serde(default)]
    pub rating: f64,
    /// Derived: count of approved reviews
    #[serde(default)]
    pub review_count: u64,
    #[serde(default)]
    pub status: RestaurantStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create payload (owner taken from the caller)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RestaurantCreate {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub address: Address,
    #[validate(length(min = 1))]
    pub cuisine: Vec<String>,
    pub price_range: PriceRange,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub opening_hours: OpeningHours,
    #[serde(default)]
    pub features: Vec<String>,
}

/// Partial update payload
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RestaurantUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub address: Option<Address>,
    pub cuisine: Option<Vec<String>>,
    pub price_range: Option<PriceRange>,
    pub images: Option<Vec<Image>>,
    pub opening_hours: Option<OpeningHours>,
    pub features: Option<Vec<String>>,
}

/// Query filters for the public listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RestaurantFilter {
    /// Comma-separated cuisines
    pub cuisine: Option<String>,
    /// Comma-separated price brackets
    pub price_range: Option<String>,
    pub min_rating: Option<f64>,
    /// Comma-separated features
    pub features: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_range_serialization() {
        assert_eq!(serde_json::to_string(&PriceRange::Budget).unwrap(), "\"$\"");
        assert_eq!(
            serde_json::from_str::<PriceRange>("\"$$$$\"").unwrap(),
            PriceRange::Luxury
        );
    }

    #[test]
    fn test_status_default_is_pending() {
        assert_eq!(RestaurantStatus::default(), RestaurantStatus::Pending);
    }
}
