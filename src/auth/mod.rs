//! Authentication and authorization
//!
//! - [`JwtService`] - bearer token issue/verify
//! - [`CurrentUser`] - authenticated caller, re-resolved per request
//! - [`require_auth`] - authentication middleware
//! - [`authorize`] / [`Access`] - single capability gate for roles and
//!   restaurant ownership

pub mod access;
pub mod extractor;
pub mod jwt;
pub mod middleware;

pub use access::{Access, authorize};
pub use jwt::{Claims, CurrentUser, JwtError, JwtService};
pub use middleware::require_auth;
