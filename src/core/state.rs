//! Server state - shared service handles
//!
//! [`ServerState`] holds the configuration, the embedded database handle and
//! the external collaborators. It is `Clone` (all members are cheap handles)
//! and passed down explicitly so tests can construct it with doubles such as
//! an in-memory database.

use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::services::{ImageHost, PaymentGateway};

#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Embedded database (SurrealDB)
    pub db: Surreal<Db>,
    /// JWT token service
    pub jwt_service: Arc<JwtService>,
    /// Payment gateway bridge
    pub payments: Arc<PaymentGateway>,
    /// Image hosting client (None when not configured)
    pub images: Option<Arc<ImageHost>>,
}

impl ServerState {
    /// Build state around an already-open database handle.
    pub fn new(config: Config, db: Surreal<Db>) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let payments = Arc::new(PaymentGateway::new(config.payment.clone()));
        let images = config
            .image_host
            .as_ref()
            .map(|cfg| Arc::new(ImageHost::new(cfg.clone())));

        Self {
            config,
            db,
            jwt_service,
            payments,
            images,
        }
    }

    /// Initialise server state for production use.
    ///
    /// Opens the embedded database under `config.data_dir` (with bounded
    /// retry) and applies the schema. Failure here is fatal to startup.
    pub async fn initialize(config: &Config) -> anyhow::Result<Self> {
        std::fs::create_dir_all(&config.data_dir)?;

        let db = DbService::open(&config.data_dir).await?;
        tracing::info!(data_dir = %config.data_dir, "Database ready");

        Ok(Self::new(config.clone(), db))
    }

    pub fn get_db(&self) -> &Surreal<Db> {
        &self.db
    }

    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
