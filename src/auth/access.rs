//! Capability gate
//!
//! One check applied uniformly by handlers instead of ad hoc role
//! comparisons. Admin passes every check; ownership checks compare the
//! restaurant's `owner` reference with the caller's identity.

use surrealdb::RecordId;

use crate::auth::CurrentUser;
use crate::common::AppError;
use crate::db::models::{Restaurant, UserRole};

/// What a route requires of the caller
#[derive(Debug, Clone, Copy)]
pub enum Access<'a> {
    /// Any authenticated caller
    Authenticated,
    /// A specific role
    Role(UserRole),
    /// Any of the listed roles
    AnyRole(&'a [UserRole]),
    /// The owner of this restaurant
    OwnerOf(&'a Restaurant),
    /// A specific user
    UserIs(&'a RecordId),
    /// The given user, or the owner of the given restaurant
    UserOrOwnerOf(&'a RecordId, Option<&'a Restaurant>),
}

/// Check whether `user` satisfies `access`.
///
/// Admins are allowed through every gate.
pub fn authorize(user: &CurrentUser, access: Access<'_>) -> Result<(), AppError> {
    if user.is_admin() {
        return Ok(());
    }

    let allowed = match access {
        Access::Authenticated => true,
        Access::Role(role) => user.role == role,
        Access::AnyRole(roles) => roles.contains(&user.role),
        Access::OwnerOf(restaurant) => restaurant.owner == user.id,
        Access::UserIs(user_id) => *user_id == user.id,
        Access::UserOrOwnerOf(user_id, restaurant) => {
            *user_id == user.id || restaurant.is_some_and(|r| r.owner == user.id)
        }
    };

    if allowed {
        Ok(())
    } else {
        Err(AppError::forbidden(
            "Not authorized to access this resource",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{PriceRange, Restaurant};
    use surrealdb::RecordId;

    fn user(id: &str, role: UserRole) -> CurrentUser {
        CurrentUser {
            id: RecordId::from_table_key("user", id),
            name: "test".into(),
            email: "test@example.com".into(),
            role,
        }
    }

    fn restaurant(owner: &CurrentUser) -> Restaurant {
        Restaurant {
            id: Some(RecordId::from_table_key("restaurant", "r1")),
            name: "Trattoria".into(),
            description: String::new(),
            address: Default::default(),
            cuisine: vec!["italian".into()],
            price_range: PriceRange::Moderate,
            images: vec![],
            opening_hours: Default::default(),
            features: vec![],
            owner: owner.id.clone(),
            rating: 0.0,
            review_count: 0,
            status: Default::default(),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_admin_passes_everything() {
        let admin = user("a", UserRole::Admin);
        let owner = user("o", UserRole::RestaurantOwner);
        let r = restaurant(&owner);

        assert!(authorize(&admin, Access::Role(UserRole::RestaurantOwner)).is_ok());
        assert!(authorize(&admin, Access::OwnerOf(&r)).is_ok());
        assert!(authorize(&admin, Access::UserIs(&owner.id)).is_ok());
    }

    #[test]
    fn test_owner_scoped_access() {
        let owner = user("o", UserRole::RestaurantOwner);
        let other = user("x", UserRole::RestaurantOwner);
        let r = restaurant(&owner);

        assert!(authorize(&owner, Access::OwnerOf(&r)).is_ok());
        assert!(authorize(&other, Access::OwnerOf(&r)).is_err());
    }

    #[test]
    fn test_user_or_owner() {
        let customer = user("c", UserRole::User);
        let owner = user("o", UserRole::RestaurantOwner);
        let stranger = user("s", UserRole::User);
        let r = restaurant(&owner);

        let access = Access::UserOrOwnerOf(&customer.id, Some(&r));
        assert!(authorize(&customer, access).is_ok());
        assert!(authorize(&owner, access).is_ok());
        assert!(authorize(&stranger, access).is_err());
    }

    #[test]
    fn test_role_mismatch_denied() {
        let customer = user("c", UserRole::User);
        assert!(authorize(&customer, Access::Role(UserRole::RestaurantOwner)).is_err());
        assert!(authorize(&customer, Access::Authenticated).is_ok());
    }
}
