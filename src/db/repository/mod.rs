//! Repository Module
//!
//! CRUD operations on SurrealDB documents, one repository per entity.
//!
//! ID convention: the whole stack uses `"table:key"` strings. Keys are
//! generated as simple (hyphen-free) UUIDs so `RecordId::to_string()`
//! round-trips without escaping. Record references inside documents are
//! stored as those strings; queries bind the same string form.

pub mod menu_item;
pub mod reservation;
pub mod restaurant;
pub mod review;
pub mod user;

pub use menu_item::MenuRepository;
pub use reservation::ReservationRepository;
pub use restaurant::RestaurantRepository;
pub use review::{ReviewFilter, ReviewRepository};
pub use user::UserRepository;

use surrealdb::RecordId;
use thiserror::Error;
use uuid::Uuid;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Generate a fresh record id for `table`.
pub fn new_id(table: &str) -> RecordId {
    RecordId::from_table_key(table, Uuid::new_v4().simple().to_string())
}

/// Parse a client-supplied id, accepting both `"table:key"` and bare keys.
pub fn parse_id(table: &str, raw: &str) -> RepoResult<RecordId> {
    if raw.contains(':') {
        let id: RecordId = raw
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid id: {}", raw)))?;
        if id.table() != table {
            return Err(RepoError::Validation(format!(
                "Expected {} id, got {}",
                table, raw
            )));
        }
        Ok(id)
    } else {
        Ok(RecordId::from_table_key(table, raw))
    }
}

/// Map a create-time database error, turning unique index violations into
/// [`RepoError::Duplicate`] with `message`.
pub(crate) fn map_unique_violation(err: surrealdb::Error, message: &str) -> RepoError {
    let detail = err.to_string();
    if detail.contains("already contains") {
        RepoError::Duplicate(message.to_string())
    } else {
        RepoError::Database(detail)
    }
}
