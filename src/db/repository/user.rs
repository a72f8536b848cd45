//! User Repository

use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{RepoError, RepoResult, map_unique_violation, new_id};
use crate::db::models::{User, UserCreate};

const TABLE: &str = "user";

#[derive(Clone)]
pub struct UserRepository {
    db: Surreal<Db>,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: &surrealdb::RecordId) -> RepoResult<Option<User>> {
        let user: Option<User> = self.db.select(id.clone()).await?;
        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let email = email.trim().to_lowercase();
        let mut result = self
            .db
            .query("SELECT * FROM user WHERE email = $email LIMIT 1")
            .bind(("email", email))
            .await?;
        let users: Vec<User> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    /// Create a user. Email is normalised to lowercase; the password is
    /// hashed before it ever reaches the store.
    pub async fn create(&self, data: UserCreate) -> RepoResult<User> {
        let email = data.email.trim().to_lowercase();

        if self.find_by_email(&email).await?.is_some() {
            return Err(RepoError::Duplicate("User already exists".to_string()));
        }

        let password_hash = User::hash_password(&data.password)
            .map_err(|e| RepoError::Database(format!("Password hashing failed: {}", e)))?;

        let now = Utc::now();
        let user = User {
            id: None,
            name: data.name,
            email,
            password_hash,
            role: data.role,
            phone_number: data.phone_number,
            avatar: None,
            favorites: vec![],
            created_at: now,
            updated_at: now,
        };

        let created: Option<User> = self
            .db
            .create(new_id(TABLE))
            .content(user)
            .await
            .map_err(|e| map_unique_violation(e, "User already exists"))?;
        created.ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }

    /// Toggle a restaurant in the user's favorites, returning the updated
    /// record.
    pub async fn toggle_favorite(
        &self,
        user_id: &surrealdb::RecordId,
        restaurant_id: &surrealdb::RecordId,
    ) -> RepoResult<User> {
        let mut user = self
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| RepoError::NotFound("User not found".to_string()))?;

        match user.favorites.iter().position(|f| f == restaurant_id) {
            Some(idx) => {
                user.favorites.remove(idx);
            }
            None => user.favorites.push(restaurant_id.clone()),
        }
        user.updated_at = Utc::now();
        user.id = None;

        let updated: Option<User> = self.db.update(user_id.clone()).content(user).await?;
        updated.ok_or_else(|| RepoError::NotFound("User not found".to_string()))
    }
}
