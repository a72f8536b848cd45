//! CurrentUser extractor
//!
//! Lets protected handlers take [`CurrentUser`] as an argument. Reuses the
//! identity the middleware injected; falls back to validating the header
//! itself so handlers stay correct regardless of layering.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::auth::CurrentUser;
use crate::auth::middleware::resolve_current_user;
use crate::common::AppError;
use crate::core::ServerState;

impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let path = parts.uri.path().to_string();
        let user = resolve_current_user(state, &parts.headers, &path).await?;
        parts.extensions.insert(user.clone());
        Ok(user)
    }
}
