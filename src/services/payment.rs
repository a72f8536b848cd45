//! Payment gateway client.
//!
//! Thin HTTP client for the deposit provider plus HMAC verification of
//! its payment callbacks. The signature covers `order_id + "|" + payment_id`
//! and is checked in constant time.

use hmac::{Hmac, Mac};
use reqwest::Client;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use tracing::debug;

use crate::common::{AppError, AppResult};
use crate::core::config::PaymentConfig;

type HmacSha256 = Hmac<Sha256>;

/// Order created at the gateway. `amount` is in minor currency units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentOrder {
    pub id: String,
    pub amount: u64,
    pub currency: String,
}

#[derive(Debug, Serialize)]
struct CreateOrderRequest {
    amount: u64,
    currency: String,
    receipt: String,
}

pub struct PaymentGateway {
    config: PaymentConfig,
    client: Client,
}

impl PaymentGateway {
    pub fn new(config: PaymentConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    /// Create a gateway order for a deposit of `amount` major units.
    pub async fn create_order(&self, amount: Decimal, receipt: &str) -> AppResult<PaymentOrder> {
        let minor_units = (amount * Decimal::from(100))
            .to_u64()
            .ok_or_else(|| AppError::validation("Invalid deposit amount"))?;

        let request = CreateOrderRequest {
            amount: minor_units,
            currency: self.config.currency.clone(),
            receipt: receipt.to_string(),
        };

        debug!("Creating payment order for receipt {}", receipt);

        let response = self
            .client
            .post(format!("{}/v1/orders", self.config.api_url))
            .basic_auth(&self.config.key_id, Some(&self.config.key_secret))
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::upstream(format!("Payment gateway unreachable: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::upstream(format!(
                "Payment gateway returned {}",
                status
            )));
        }

        response
            .json::<PaymentOrder>()
            .await
            .map_err(|e| AppError::upstream(format!("Invalid payment gateway response: {}", e)))
    }

    /// Verify a callback signature. `signature` is hex-encoded HMAC-SHA256
    /// of `"{order_id}|{payment_id}"` keyed with the gateway secret.
    pub fn verify_signature(&self, order_id: &str, payment_id: &str, signature: &str) -> bool {
        let Ok(expected) = hex::decode(signature) else {
            return false;
        };

        let mut mac = match HmacSha256::new_from_slice(self.config.key_secret.as_bytes()) {
            Ok(mac) => mac,
            Err(_) => return false,
        };
        mac.update(order_id.as_bytes());
        mac.update(b"|");
        mac.update(payment_id.as_bytes());

        mac.verify_slice(&expected).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_gateway() -> PaymentGateway {
        PaymentGateway::new(PaymentConfig {
            key_id: "key_test".to_string(),
            key_secret: "payment-test-secret".to_string(),
            api_url: "http://localhost:0".to_string(),
            currency: "INR".to_string(),
        })
    }

    fn sign(secret: &str, order_id: &str, payment_id: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(format!("{}|{}", order_id, payment_id).as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    #[test]
    fn valid_signature_accepted() {
        let gateway = test_gateway();
        let sig = sign("payment-test-secret", "order_1", "pay_1");
        assert!(gateway.verify_signature("order_1", "pay_1", &sig));
    }

    #[test]
    fn wrong_secret_rejected() {
        let gateway = test_gateway();
        let sig = sign("some-other-secret", "order_1", "pay_1");
        assert!(!gateway.verify_signature("order_1", "pay_1", &sig));
    }

    #[test]
    fn tampered_payment_id_rejected() {
        let gateway = test_gateway();
        let sig = sign("payment-test-secret", "order_1", "pay_1");
        assert!(!gateway.verify_signature("order_1", "pay_2", &sig));
    }

    #[test]
    fn malformed_hex_rejected() {
        let gateway = test_gateway();
        assert!(!gateway.verify_signature("order_1", "pay_1", "not-hex"));
    }
}
