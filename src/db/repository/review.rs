//! Review Repository

use chrono::Utc;
use serde::Deserialize;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{RepoError, RepoResult, map_unique_violation, new_id};
use crate::db::models::{Review, ReviewReply, ReviewStatus};

const TABLE: &str = "review";

/// Query-string filters for review listings.
#[derive(Debug, Default, Deserialize)]
pub struct ReviewFilter {
    pub restaurant: Option<String>,
    pub status: Option<ReviewStatus>,
    pub sort: Option<String>,
}

#[derive(Clone)]
pub struct ReviewRepository {
    db: Surreal<Db>,
}

#[derive(Debug, Deserialize)]
struct CountRow {
    count: u64,
}

#[derive(Debug, Deserialize)]
struct StatsRow {
    avg_rating: Option<f64>,
    review_count: u64,
}

#[derive(Debug, Deserialize)]
struct AvgRow {
    avg_rating: Option<f64>,
}

impl ReviewRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub async fn find_all(&self, filter: &ReviewFilter) -> RepoResult<Vec<Review>> {
        let mut conditions: Vec<&str> = Vec::new();
        if filter.restaurant.is_some() {
            conditions.push("restaurant = $restaurant");
        }
        if filter.status.is_some() {
            conditions.push("status = $status");
        }

        let order = match filter.sort.as_deref() {
            Some("rating") => "rating DESC",
            _ => "created_at DESC",
        };

        let mut sql = String::from("SELECT * FROM review");
        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }
        sql.push_str(" ORDER BY ");
        sql.push_str(order);

        let mut query = self.db.query(sql);
        if let Some(restaurant) = &filter.restaurant {
            query = query.bind(("restaurant", restaurant.clone()));
        }
        if let Some(status) = &filter.status {
            query = query.bind(("status", *status));
        }

        let mut result = query.await?;
        let reviews: Vec<Review> = result.take(0)?;
        Ok(reviews)
    }

    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Review>> {
        let review: Option<Review> = self.db.select(id.clone()).await?;
        Ok(review)
    }

    pub async fn find_by_restaurant(&self, restaurant: &RecordId) -> RepoResult<Vec<Review>> {
        let mut result = self
            .db
            .query("SELECT * FROM review WHERE restaurant = $restaurant ORDER BY created_at DESC")
            .bind(("restaurant", restaurant.to_string()))
            .await?;
        let reviews: Vec<Review> = result.take(0)?;
        Ok(reviews)
    }

    pub async fn find_by_user_and_restaurant(
        &self,
        user: &RecordId,
        restaurant: &RecordId,
    ) -> RepoResult<Option<Review>> {
        let mut result = self
            .db
            .query("SELECT * FROM review WHERE user = $user AND restaurant = $restaurant LIMIT 1")
            .bind(("user", user.to_string()))
            .bind(("restaurant", restaurant.to_string()))
            .await?;
        let reviews: Vec<Review> = result.take(0)?;
        Ok(reviews.into_iter().next())
    }

    /// One review per user per restaurant, backed by a unique index.
    pub async fn create(&self, review: Review) -> RepoResult<Review> {
        if self
            .find_by_user_and_restaurant(&review.user, &review.restaurant)
            .await?
            .is_some()
        {
            return Err(RepoError::Duplicate(
                "You have already reviewed this restaurant".to_string(),
            ));
        }

        let created: Option<Review> = self
            .db
            .create(new_id(TABLE))
            .content(review)
            .await
            .map_err(|e| map_unique_violation(e, "You have already reviewed this restaurant"))?;
        created.ok_or_else(|| RepoError::Database("Failed to create review".to_string()))
    }

    pub async fn update(&self, id: &RecordId, mut review: Review) -> RepoResult<Review> {
        review.updated_at = Utc::now();
        review.id = None;

        let updated: Option<Review> = self.db.update(id.clone()).content(review).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Review {} not found", id)))
    }

    pub async fn delete(&self, id: &RecordId) -> RepoResult<Option<Review>> {
        let deleted: Option<Review> = self.db.delete(id.clone()).await?;
        Ok(deleted)
    }

    pub async fn set_status(&self, id: &RecordId, status: ReviewStatus) -> RepoResult<Review> {
        let mut review = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Review {} not found", id)))?;
        review.status = status;
        self.update(id, review).await
    }

    /// Returns the review with the caller's like toggled on or off.
    pub async fn toggle_like(&self, id: &RecordId, user: &RecordId) -> RepoResult<Review> {
        let mut review = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Review {} not found", id)))?;

        if let Some(pos) = review.likes.iter().position(|liker| liker == user) {
            review.likes.remove(pos);
        } else {
            review.likes.push(user.clone());
        }

        self.update(id, review).await
    }

    pub async fn add_reply(&self, id: &RecordId, reply: ReviewReply) -> RepoResult<Review> {
        let mut review = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Review {} not found", id)))?;
        review.replies.push(reply);
        self.update(id, review).await
    }

    pub async fn remove_reply(&self, id: &RecordId, reply_id: &str) -> RepoResult<Review> {
        let mut review = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Review {} not found", id)))?;

        let before = review.replies.len();
        review.replies.retain(|r| r.id != reply_id);
        if review.replies.len() == before {
            return Err(RepoError::NotFound(format!("Reply {} not found", reply_id)));
        }

        self.update(id, review).await
    }

    /// Mean rating and count over approved reviews for one restaurant.
    pub async fn approved_stats(&self, restaurant: &RecordId) -> RepoResult<(f64, u64)> {
        let mut result = self
            .db
            .query(
                "SELECT math::mean(rating) AS avg_rating, count() AS review_count \
                 FROM review WHERE restaurant = $restaurant AND status = 'approved' GROUP ALL",
            )
            .bind(("restaurant", restaurant.to_string()))
            .await?;
        let rows: Vec<StatsRow> = result.take(0)?;
        Ok(rows
            .first()
            .map(|r| (r.avg_rating.unwrap_or(0.0), r.review_count))
            .unwrap_or((0.0, 0)))
    }

    pub async fn avg_rating_all(&self) -> RepoResult<f64> {
        let mut result = self
            .db
            .query(
                "SELECT math::mean(rating) AS avg_rating FROM review \
                 WHERE status = 'approved' GROUP ALL",
            )
            .await?;
        let rows: Vec<AvgRow> = result.take(0)?;
        Ok(rows.first().and_then(|r| r.avg_rating).unwrap_or(0.0))
    }

    pub async fn count_all(&self) -> RepoResult<u64> {
        let mut result = self
            .db
            .query("SELECT count() AS count FROM review GROUP ALL")
            .await?;
        let rows: Vec<CountRow> = result.take(0)?;
        Ok(rows.first().map(|r| r.count).unwrap_or(0))
    }
}
