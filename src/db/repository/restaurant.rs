//! Restaurant Repository

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{RepoError, RepoResult, new_id};
use crate::db::models::{
    Restaurant, RestaurantCreate, RestaurantFilter, RestaurantStatus, RestaurantUpdate,
};

const TABLE: &str = "restaurant";

#[derive(Clone)]
pub struct RestaurantRepository {
    db: Surreal<Db>,
}

/// Derived-field write applied by the rating aggregation service
#[derive(Debug, Serialize)]
struct RatingPatch {
    rating: f64,
    review_count: u64,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct CountRow {
    count: u64,
}

impl RestaurantRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    /// Public listing with optional filters, newest first.
    pub async fn find_all(&self, filter: &RestaurantFilter) -> RepoResult<Vec<Restaurant>> {
        let mut conditions: Vec<&str> = Vec::new();

        let cuisine = filter.cuisine.as_deref().map(split_csv);
        let price_ranges = filter.price_range.as_deref().map(split_csv);
        let features = filter.features.as_deref().map(split_csv);

        if cuisine.is_some() {
            conditions.push("cuisine CONTAINSANY $cuisine");
        }
        if price_ranges.is_some() {
            conditions.push("price_range INSIDE $price_ranges");
        }
        if filter.min_rating.is_some() {
            conditions.push("rating >= $min_rating");
        }
        if features.is_some() {
            conditions.push("features CONTAINSANY $features");
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };
        let sql = format!(
            "SELECT * FROM restaurant{} ORDER BY created_at DESC",
            where_clause
        );

        let mut query = self.db.query(sql);
        if let Some(cuisine) = cuisine {
            query = query.bind(("cuisine", cuisine));
        }
        if let Some(price_ranges) = price_ranges {
            query = query.bind(("price_ranges", price_ranges));
        }
        if let Some(min_rating) = filter.min_rating {
            query = query.bind(("min_rating", min_rating));
        }
        if let Some(features) = features {
            query = query.bind(("features", features));
        }

        let restaurants: Vec<Restaurant> = query.await?.take(0)?;
        Ok(restaurants)
    }

    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Restaurant>> {
        let restaurant: Option<Restaurant> = self.db.select(id.clone()).await?;
        Ok(restaurant)
    }

    pub async fn find_by_owner(&self, owner: &RecordId) -> RepoResult<Option<Restaurant>> {
        let mut result = self
            .db
            .query("SELECT * FROM restaurant WHERE owner = $owner LIMIT 1")
            .bind(("owner", owner.to_string()))
            .await?;
        let restaurants: Vec<Restaurant> = result.take(0)?;
        Ok(restaurants.into_iter().next())
    }

    /// Create a restaurant for `owner`. Ownership is exclusive: a second
    /// restaurant for the same owner is a duplicate.
    pub async fn create(&self, owner: &RecordId, data: RestaurantCreate) -> RepoResult<Restaurant> {
        if self.find_by_owner(owner).await?.is_some() {
            return Err(RepoError::Duplicate(
                "Owner already has a restaurant".to_string(),
            ));
        }

        let now = Utc::now();
        let restaurant = Restaurant {
            id: None,
            name: data.name,
            description: data.description,
            address: data.address,
            cuisine: data.cuisine,
            price_range: data.price_range,
            images: data.images,
            opening_hours: data.opening_hours,
            features: data.features,
            owner: owner.clone(),
            rating: 0.0,
            review_count: 0,
            status: RestaurantStatus::Pending,
            created_at: now,
            updated_at: now,
        };

        let created: Option<Restaurant> = self.db.create(new_id(TABLE)).content(restaurant).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create restaurant".to_string()))
    }

    pub async fn update(&self, id: &RecordId, data: RestaurantUpdate) -> RepoResult<Restaurant> {
        let mut restaurant = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Restaurant {} not found", id)))?;

        if let Some(name) = data.name {
            restaurant.name = name;
        }
        if let Some(description) = data.description {
            restaurant.description = description;
        }
        if let Some(address) = data.address {
            restaurant.address = address;
        }
        if let Some(cuisine) = data.cuisine {
            restaurant.cuisine = cuisine;
        }
        if let Some(price_range) = data.price_range {
            restaurant.price_range = price_range;
        }
        if let Some(images) = data.images {
            restaurant.images = images;
        }
        if let Some(opening_hours) = data.opening_hours {
            restaurant.opening_hours = opening_hours;
        }
        if let Some(features) = data.features {
            restaurant.features = features;
        }
        restaurant.updated_at = Utc::now();
        restaurant.id = None;

        let updated: Option<Restaurant> = self.db.update(id.clone()).content(restaurant).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Restaurant {} not found", id)))
    }

    pub async fn set_status(
        &self,
        id: &RecordId,
        status: RestaurantStatus,
    ) -> RepoResult<Restaurant> {
        #[derive(Serialize)]
        struct StatusPatch {
            status: RestaurantStatus,
            updated_at: DateTime<Utc>,
        }

        let updated: Option<Restaurant> = self
            .db
            .update(id.clone())
            .merge(StatusPatch {
                status,
                updated_at: Utc::now(),
            })
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Restaurant {} not found", id)))
    }

    /// Write the derived rating fields in a single merge (no read involved,
    /// so concurrent recomputes last-write-win on a consistent pair).
    pub async fn update_rating(
        &self,
        id: &RecordId,
        rating: f64,
        review_count: u64,
    ) -> RepoResult<()> {
        let updated: Option<Restaurant> = self
            .db
            .update(id.clone())
            .merge(RatingPatch {
                rating,
                review_count,
                updated_at: Utc::now(),
            })
            .await?;
        updated
            .map(|_| ())
            .ok_or_else(|| RepoError::NotFound(format!("Restaurant {} not found", id)))
    }

    pub async fn count_active(&self) -> RepoResult<u64> {
        let mut result = self
            .db
            .query("SELECT count() AS count FROM restaurant WHERE status = 'active' GROUP ALL")
            .await?;
        let rows: Vec<CountRow> = result.take(0)?;
        Ok(rows.first().map(|r| r.count).unwrap_or(0))
    }
}

fn split_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
