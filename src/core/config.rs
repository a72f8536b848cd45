//! Server configuration
//!
//! All settings come from environment variables. Required variables missing
//! at startup fail the process rather than serving degraded traffic.
//!
//! | Environment variable | Required | Default |
//! |----------------------|----------|---------|
//! | JWT_SECRET           | yes (>= 32 chars) | - |
//! | PAYMENT_KEY_ID       | yes      | - |
//! | PAYMENT_KEY_SECRET   | yes      | - |
//! | ALLOWED_ORIGINS      | yes (comma-separated, or `*`) | - |
//! | DATA_DIR             | no       | ./data |
//! | HTTP_PORT            | no       | 5000 |
//! | PAYMENT_API_URL      | no       | https://api.razorpay.com |
//! | PAYMENT_CURRENCY     | no       | INR |
//! | DEPOSIT_PER_GUEST    | no       | 10 |
//! | IMAGE_HOST_URL       | no       | - (upload disabled) |
//! | IMAGE_HOST_KEY       | no       | - |
//! | JWT_EXPIRATION_MINUTES | no     | 1440 |
//! | ENVIRONMENT          | no       | development |

use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variables: {0}")]
    MissingVars(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidValue { var: &'static str, reason: String },
}

/// JWT signing configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Signing secret (at least 32 bytes)
    pub secret: String,
    /// Token lifetime in minutes
    pub expiration_minutes: i64,
    /// Token issuer
    pub issuer: String,
    /// Token audience
    pub audience: String,
}

/// Payment gateway configuration (HMAC-signed order/verify flow)
#[derive(Debug, Clone)]
pub struct PaymentConfig {
    pub key_id: String,
    pub key_secret: String,
    pub api_url: String,
    pub currency: String,
}

/// Image hosting service configuration
#[derive(Debug, Clone)]
pub struct ImageHostConfig {
    pub url: String,
    pub api_key: String,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the embedded database
    pub data_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// JWT configuration
    pub jwt: JwtConfig,
    /// Payment gateway credentials
    pub payment: PaymentConfig,
    /// Image host credentials; uploads are rejected when absent
    pub image_host: Option<ImageHostConfig>,
    /// CORS origins (`*` allows any)
    pub allowed_origins: Vec<String>,
    /// Reservation deposit charged per guest
    pub deposit_per_guest: Decimal,
    /// Runtime environment: development | staging | production
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Collects every missing required variable before failing so the log
    /// names them all at once.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut missing = Vec::new();

        let jwt_secret = require("JWT_SECRET", &mut missing);
        let payment_key_id = require("PAYMENT_KEY_ID", &mut missing);
        let payment_key_secret = require("PAYMENT_KEY_SECRET", &mut missing);
        let allowed_origins = require("ALLOWED_ORIGINS", &mut missing);

        if !missing.is_empty() {
            return Err(ConfigError::MissingVars(missing.join(", ")));
        }

        let jwt_secret = jwt_secret.unwrap_or_default();
        if jwt_secret.len() < 32 {
            return Err(ConfigError::InvalidValue {
                var: "JWT_SECRET",
                reason: "must be at least 32 characters long".into(),
            });
        }

        let deposit_per_guest = match std::env::var("DEPOSIT_PER_GUEST") {
            Ok(raw) => Decimal::from_str(&raw).map_err(|e| ConfigError::InvalidValue {
                var: "DEPOSIT_PER_GUEST",
                reason: e.to_string(),
            })?,
            Err(_) => Decimal::new(10, 0),
        };

        let image_host = match (
            std::env::var("IMAGE_HOST_URL").ok(),
            std::env::var("IMAGE_HOST_KEY").ok(),
        ) {
            (Some(url), Some(api_key)) => Some(ImageHostConfig { url, api_key }),
            _ => None,
        };

        Ok(Self {
            data_dir: std::env::var("DATA_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            jwt: JwtConfig {
                secret: jwt_secret,
                expiration_minutes: std::env::var("JWT_EXPIRATION_MINUTES")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(1440),
                issuer: std::env::var("JWT_ISSUER")
                    .unwrap_or_else(|_| "dineease-server".to_string()),
                audience: std::env::var("JWT_AUDIENCE")
                    .unwrap_or_else(|_| "dineease-clients".to_string()),
            },
            payment: PaymentConfig {
                key_id: payment_key_id.unwrap_or_default(),
                key_secret: payment_key_secret.unwrap_or_default(),
                api_url: std::env::var("PAYMENT_API_URL")
                    .unwrap_or_else(|_| "https://api.razorpay.com".into()),
                currency: std::env::var("PAYMENT_CURRENCY").unwrap_or_else(|_| "INR".into()),
            },
            image_host,
            allowed_origins: allowed_origins
                .unwrap_or_default()
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            deposit_per_guest,
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        })
    }

    /// Fixed configuration for tests - no environment reads
    pub fn for_tests() -> Self {
        Self {
            data_dir: String::new(),
            http_port: 0,
            jwt: JwtConfig {
                secret: "test-secret-key-for-dineease-0123456789ab".into(),
                expiration_minutes: 60,
                issuer: "dineease-server".into(),
                audience: "dineease-clients".into(),
            },
            payment: PaymentConfig {
                key_id: "key_test".into(),
                key_secret: "payment-test-secret".into(),
                api_url: "http://127.0.0.1:0".into(),
                currency: "INR".into(),
            },
            image_host: None,
            allowed_origins: vec!["*".into()],
            deposit_per_guest: Decimal::new(10, 0),
            environment: "test".into(),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

fn require(var: &'static str, missing: &mut Vec<&'static str>) -> Option<String> {
    match std::env::var(var) {
        Ok(v) if !v.is_empty() => Some(v),
        _ => {
            missing.push(var);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_for_tests_is_self_contained() {
        let config = Config::for_tests();
        assert!(config.jwt.secret.len() >= 32);
        assert_eq!(config.deposit_per_guest, Decimal::new(10, 0));
        assert!(!config.is_production());
    }
}
