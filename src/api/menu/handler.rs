//! Menu API Handlers
//!
//! All routes operate on the calling owner's restaurant.

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use rust_decimal::Decimal;
use validator::Validate;

use crate::auth::{Access, CurrentUser, authorize};
use crate::common::{AppError, AppResult};
use crate::core::ServerState;
use crate::db::models::{MenuItem, MenuItemCreate, MenuItemUpdate, Restaurant, UserRole};
use crate::db::repository::{MenuRepository, RestaurantRepository, parse_id};

async fn owned_restaurant(state: &ServerState, user: &CurrentUser) -> AppResult<Restaurant> {
    authorize(
        user,
        Access::AnyRole(&[UserRole::RestaurantOwner, UserRole::Admin]),
    )?;

    let restaurants = RestaurantRepository::new(state.db.clone());
    restaurants
        .find_by_owner(&user.id)
        .await?
        .ok_or_else(|| AppError::not_found("No restaurant found for this account"))
}

/// GET /api/menu - the owner's full menu
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<MenuItem>>> {
    let restaurant = owned_restaurant(&state, &user).await?;
    let restaurant_id = restaurant
        .id
        .ok_or_else(|| AppError::internal("Restaurant record missing id"))?;

    let repo = MenuRepository::new(state.db.clone());
    let items = repo.find_by_restaurant(&restaurant_id).await?;
    Ok(Json(items))
}

/// GET /api/menu/category/{category} - one category of the owner's menu
pub async fn list_by_category(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(category): Path<String>,
) -> AppResult<Json<Vec<MenuItem>>> {
    let restaurant = owned_restaurant(&state, &user).await?;
    let restaurant_id = restaurant
        .id
        .ok_or_else(|| AppError::internal("Restaurant record missing id"))?;

    let repo = MenuRepository::new(state.db.clone());
    let items = repo
        .find_by_restaurant(&restaurant_id)
        .await?
        .into_iter()
        .filter(|item| item.category.eq_ignore_ascii_case(&category))
        .collect();
    Ok(Json(items))
}

/// POST /api/menu - add an item to the owner's menu
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<Json<MenuItem>> {
    payload.validate()?;
    if payload.price < Decimal::ZERO {
        return Err(AppError::validation("Price cannot be negative"));
    }

    let restaurant = owned_restaurant(&state, &user).await?;
    let restaurant_id = restaurant
        .id
        .ok_or_else(|| AppError::internal("Restaurant record missing id"))?;

    let now = Utc::now();
    let item = MenuItem {
        id: None,
        name: payload.name,
        description: payload.description,
        price: payload.price,
        category: payload.category,
        image: payload.image,
        restaurant: restaurant_id,
        is_available: true,
        created_at: now,
        updated_at: now,
    };

    let repo = MenuRepository::new(state.db.clone());
    let created = repo.create(item).await?;
    Ok(Json(created))
}

/// PUT /api/menu/{id} - edit an item on the owner's menu
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<Json<MenuItem>> {
    if let Some(price) = payload.price {
        if price < Decimal::ZERO {
            return Err(AppError::validation("Price cannot be negative"));
        }
    }

    let id = parse_id("menu_item", &id)?;
    let repo = MenuRepository::new(state.db.clone());
    let mut item = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Menu item not found"))?;

    let restaurants = RestaurantRepository::new(state.db.clone());
    let restaurant = restaurants
        .find_by_id(&item.restaurant)
        .await?
        .ok_or_else(|| AppError::not_found("Restaurant not found"))?;
    authorize(&user, Access::OwnerOf(&restaurant))?;

    if let Some(name) = payload.name {
        item.name = name;
    }
    if let Some(description) = payload.description {
        item.description = description;
    }
    if let Some(price) = payload.price {
        item.price = price;
    }
    if let Some(category) = payload.category {
        item.category = category;
    }
    if let Some(image) = payload.image {
        item.image = image;
    }
    if let Some(is_available) = payload.is_available {
        item.is_available = is_available;
    }

    let updated = repo.update(&id, item).await?;
    Ok(Json(updated))
}

/// DELETE /api/menu/{id} - remove an item from the owner's menu
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let id = parse_id("menu_item", &id)?;
    let repo = MenuRepository::new(state.db.clone());
    let item = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Menu item not found"))?;

    let restaurants = RestaurantRepository::new(state.db.clone());
    let restaurant = restaurants
        .find_by_id(&item.restaurant)
        .await?
        .ok_or_else(|| AppError::not_found("Restaurant not found"))?;
    authorize(&user, Access::OwnerOf(&restaurant))?;

    repo.delete(&id).await?;
    Ok(Json(serde_json::json!({ "message": "Menu item deleted" })))
}
