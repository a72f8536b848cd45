//! Menu Item Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

use super::restaurant::{Image, RestaurantId};
use super::serde_helpers;

/// Menu item ID type
pub type MenuItemId = RecordId;

/// Menu item document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<MenuItemId>,
    pub name: String,
    pub description: String,
    /// Non-negative
    pub price: Decimal,
    pub category: String,
    pub image: Image,
    #[serde(with = "serde_helpers::record_id")]
    pub restaurant: RestaurantId,
    #[serde(default = "default_true")]
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

/// Create payload (restaurant resolved from the owning caller)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MenuItemCreate {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 1000))]
    pub description: String,
    pub price: Decimal,
    #[validate(length(min = 1, max = 100))]
    pub category: String,
    pub image: Image,
}

/// Partial update payload
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub category: Option<String>,
    pub image: Option<Image>,
    pub is_available: Option<bool>,
}
