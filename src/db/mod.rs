//! Database Module
//!
//! Embedded SurrealDB storage. [`DbService::open`] owns the lifecycle:
//! open (with bounded retry and fixed delay), select namespace, apply the
//! schema. Tests use [`DbService::open_memory`] for an isolated in-memory
//! instance.

pub mod models;
pub mod repository;
pub mod schema;

use std::time::Duration;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

const NAMESPACE: &str = "dineease";
const DATABASE: &str = "main";

const OPEN_ATTEMPTS: u32 = 3;
const OPEN_RETRY_DELAY: Duration = Duration::from_secs(5);

pub struct DbService;

impl DbService {
    /// Open the on-disk database under `data_dir`.
    ///
    /// Retries with a fixed delay; exhausting the attempts is a startup
    /// failure the caller turns into a non-zero exit.
    pub async fn open(data_dir: &str) -> anyhow::Result<Surreal<Db>> {
        let path = std::path::Path::new(data_dir).join("dineease.db");
        let path = path.to_string_lossy().to_string();

        let mut last_err = None;
        for attempt in 1..=OPEN_ATTEMPTS {
            match Surreal::new::<RocksDb>(path.as_str()).await {
                Ok(db) => {
                    Self::init(&db).await?;
                    return Ok(db);
                }
                Err(e) => {
                    tracing::warn!(
                        attempt,
                        error = %e,
                        "Database open failed, retrying in {}s",
                        OPEN_RETRY_DELAY.as_secs()
                    );
                    last_err = Some(e);
                    if attempt < OPEN_ATTEMPTS {
                        tokio::time::sleep(OPEN_RETRY_DELAY).await;
                    }
                }
            }
        }

        Err(anyhow::anyhow!(
            "failed to open database after {} attempts: {}",
            OPEN_ATTEMPTS,
            last_err.map(|e| e.to_string()).unwrap_or_default()
        ))
    }

    /// Open an isolated in-memory database (tests).
    pub async fn open_memory() -> anyhow::Result<Surreal<Db>> {
        let db = Surreal::new::<Mem>(()).await?;
        Self::init(&db).await?;
        Ok(db)
    }

    async fn init(db: &Surreal<Db>) -> anyhow::Result<()> {
        db.use_ns(NAMESPACE).use_db(DATABASE).await?;
        schema::define(db).await?;
        Ok(())
    }
}
