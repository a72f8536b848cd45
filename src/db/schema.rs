//! Schema definitions applied at startup
//!
//! Tables stay schemaless documents; only the uniqueness and lookup
//! indexes the invariants depend on are defined here. `IF NOT EXISTS`
//! makes the definitions idempotent across restarts.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const SCHEMA: &str = "
    DEFINE INDEX IF NOT EXISTS user_email ON TABLE user COLUMNS email UNIQUE;
    DEFINE INDEX IF NOT EXISTS review_user_restaurant ON TABLE review COLUMNS user, restaurant UNIQUE;
    DEFINE INDEX IF NOT EXISTS review_restaurant ON TABLE review COLUMNS restaurant;
    DEFINE INDEX IF NOT EXISTS review_status ON TABLE review COLUMNS status;
    DEFINE INDEX IF NOT EXISTS reservation_user ON TABLE reservation COLUMNS user;
    DEFINE INDEX IF NOT EXISTS reservation_restaurant ON TABLE reservation COLUMNS restaurant;
    DEFINE INDEX IF NOT EXISTS restaurant_owner ON TABLE restaurant COLUMNS owner;
    DEFINE INDEX IF NOT EXISTS menu_item_restaurant ON TABLE menu_item COLUMNS restaurant;
";

/// Apply index definitions. Errors here abort startup.
pub async fn define(db: &Surreal<Db>) -> surrealdb::Result<()> {
    db.query(SCHEMA).await?.check()?;
    Ok(())
}
