//! Menu Item Repository

use chrono::Utc;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{RepoError, RepoResult, new_id};
use crate::db::models::MenuItem;

const TABLE: &str = "menu_item";

#[derive(Clone)]
pub struct MenuRepository {
    db: Surreal<Db>,
}

impl MenuRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub async fn create(&self, item: MenuItem) -> RepoResult<MenuItem> {
        let created: Option<MenuItem> = self.db.create(new_id(TABLE)).content(item).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create menu item".to_string()))
    }

    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<MenuItem>> {
        let item: Option<MenuItem> = self.db.select(id.clone()).await?;
        Ok(item)
    }

    pub async fn find_by_restaurant(&self, restaurant: &RecordId) -> RepoResult<Vec<MenuItem>> {
        let mut result = self
            .db
            .query("SELECT * FROM menu_item WHERE restaurant = $restaurant ORDER BY category, name")
            .bind(("restaurant", restaurant.to_string()))
            .await?;
        let items: Vec<MenuItem> = result.take(0)?;
        Ok(items)
    }

    pub async fn update(&self, id: &RecordId, mut item: MenuItem) -> RepoResult<MenuItem> {
        item.updated_at = Utc::now();
        item.id = None;

        let updated: Option<MenuItem> = self.db.update(id.clone()).content(item).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Menu item {} not found", id)))
    }

    pub async fn delete(&self, id: &RecordId) -> RepoResult<Option<MenuItem>> {
        let deleted: Option<MenuItem> = self.db.delete(id.clone()).await?;
        Ok(deleted)
    }
}
