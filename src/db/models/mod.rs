//! Database Models

pub mod serde_helpers;

pub mod menu_item;
pub mod reservation;
pub mod restaurant;
pub mod review;
pub mod user;

// Re-exports
pub use menu_item::{MenuItem, MenuItemCreate, MenuItemUpdate};
pub use reservation::{
    Cancellation, CancelledBy, Payment, PaymentStatus, Reservation, ReservationCreate,
    ReservationStatus, ReservationUpdate,
};
pub use restaurant::{
    Address, Image, OpeningHours, PriceRange, Restaurant, RestaurantCreate, RestaurantFilter,
    RestaurantStatus, RestaurantUpdate,
};
pub use review::{
    ReplyCreate, Review, ReviewCreate, ReviewModeration, ReviewReply, ReviewStatus,
    ReviewStatusUpdate, ReviewUpdate,
};
pub use user::{User, UserCreate, UserResponse, UserRole};
