//! Derived rating maintenance.
//!
//! A restaurant's `rating` and `review_count` are a projection of its
//! approved reviews. Every write path that can change that set (review
//! create, edit, delete, moderation) calls back into here so the stored
//! values never drift from the source reviews.

use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;
use tracing::warn;

use crate::db::repository::{RepoResult, RestaurantRepository, ReviewRepository};

/// Recompute a restaurant's rating from its approved reviews and persist it.
///
/// The mean is rounded to one decimal place. A restaurant with no approved
/// reviews goes back to `(0.0, 0)`.
pub async fn recompute_restaurant_rating(
    db: &Surreal<Db>,
    restaurant: &RecordId,
) -> RepoResult<(f64, u64)> {
    let reviews = ReviewRepository::new(db.clone());
    let restaurants = RestaurantRepository::new(db.clone());

    let (avg, count) = reviews.approved_stats(restaurant).await?;
    let rating = if count == 0 { 0.0 } else { (avg * 10.0).round() / 10.0 };

    restaurants.update_rating(restaurant, rating, count).await?;
    Ok((rating, count))
}

/// Recompute without failing the caller. Review writes must not bounce
/// because the projection update hit a transient error.
pub async fn recompute_best_effort(db: &Surreal<Db>, restaurant: &RecordId) {
    if let Err(e) = recompute_restaurant_rating(db, restaurant).await {
        warn!("Failed to recompute rating for {}: {}", restaurant, e);
    }
}
