//! Service Module
//!
//! Domain logic that sits above the repositories: derived rating
//! maintenance, the payment gateway client, and the image host client.

pub mod image_host;
pub mod payment;
pub mod rating;

pub use image_host::{HostedImage, ImageHost};
pub use payment::{PaymentGateway, PaymentOrder};
pub use rating::{recompute_best_effort, recompute_restaurant_rating};
