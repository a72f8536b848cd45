//! End-to-end router tests over an in-memory database.
//!
//! Each test builds the full axum router (auth middleware included) around
//! an isolated in-memory SurrealDB instance and drives it with raw HTTP
//! requests.

use axum::Router;
use axum::body::Body;
use hmac::{Hmac, Mac};
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use sha2::Sha256;
use tower::ServiceExt;

use dineease_server::core::config::ImageHostConfig;
use dineease_server::db::DbService;
use dineease_server::db::models::{UserCreate, UserRole};
use dineease_server::db::repository::UserRepository;
use dineease_server::{Config, ServerState, api};

async fn test_app() -> (Router, ServerState) {
    let db = DbService::open_memory().await.expect("in-memory db");
    let state = ServerState::new(Config::for_tests(), db);
    (api::router(state.clone()), state)
}

async fn send(
    app: &Router,
    method: &str,
    path: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn register(app: &Router, name: &str, email: &str, role: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "name": name,
            "email": email,
            "password": "password123",
            "role": role,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "register failed: {}", body);
    body["token"].as_str().unwrap().to_string()
}

/// Admin accounts cannot self-register; seed one directly and log in.
async fn seed_admin(app: &Router, state: &ServerState) -> String {
    let repo = UserRepository::new(state.db.clone());
    repo.create(UserCreate {
        name: "Admin".into(),
        email: "admin@dineease.test".into(),
        password: "password123".into(),
        role: UserRole::Admin,
        phone_number: None,
    })
    .await
    .expect("seed admin");

    let (status, body) = send(
        app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({
            "email": "admin@dineease.test",
            "password": "password123",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

async fn create_restaurant(app: &Router, owner_token: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/restaurants",
        Some(owner_token),
        Some(json!({
            "name": "Trattoria da Test",
            "description": "Wood-fired everything",
            "cuisine": ["italian"],
            "price_range": "$$",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "create restaurant failed: {}", body);
    body["id"].as_str().unwrap().to_string()
}

async fn create_reservation(app: &Router, token: &str, restaurant: &str, party: u32) -> Value {
    let (status, body) = send(
        app,
        "POST",
        "/api/reservations",
        Some(token),
        Some(json!({
            "restaurant": restaurant,
            "date": "2026-09-10",
            "time": "19:00",
            "party_size": party,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "create reservation failed: {}", body);
    body
}

fn sign_payment(order_id: &str, payment_id: &str) -> String {
    // Same secret as Config::for_tests
    let mut mac = Hmac::<Sha256>::new_from_slice(b"payment-test-secret").unwrap();
    mac.update(format!("{}|{}", order_id, payment_id).as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

#[tokio::test]
async fn register_login_profile_roundtrip() {
    let (app, _state) = test_app().await;

    let token = register(&app, "Alice", "alice@example.com", "user").await;

    let (status, body) = send(&app, "GET", "/api/auth/profile", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "alice@example.com");
    assert_eq!(body["role"], "user");
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());

    // No token, bad token
    let (status, _) = send(&app, "GET", "/api/auth/profile", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = send(&app, "GET", "/api/auth/profile", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Wrong password
    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": "alice@example.com", "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn admin_role_cannot_self_register() {
    let (app, _state) = test_app().await;
    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "name": "Mallory",
            "email": "mallory@example.com",
            "password": "password123",
            "role": "admin",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn rating_follows_approved_reviews() {
    let (app, state) = test_app().await;
    let admin = seed_admin(&app, &state).await;
    let owner = register(&app, "Owner", "owner@example.com", "restaurant_owner").await;
    let restaurant = create_restaurant(&app, &owner).await;

    let alice = register(&app, "Alice", "alice@example.com", "user").await;
    let bob = register(&app, "Bob", "bob@example.com", "user").await;

    let mut review_ids = Vec::new();
    for (token, rating) in [(&alice, 5), (&bob, 3)] {
        let (status, body) = send(
            &app,
            "POST",
            "/api/reviews",
            Some(token),
            Some(json!({
                "restaurant": restaurant,
                "rating": rating,
                "title": "Visit",
                "comment": "Detailed impressions of the meal.",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "create review failed: {}", body);
        assert_eq!(body["status"], "pending");
        review_ids.push(body["id"].as_str().unwrap().to_string());
    }

    // Pending reviews contribute nothing
    let (_, body) = send(&app, "GET", &format!("/api/restaurants/{}", restaurant), None, None).await;
    assert_eq!(body["rating"].as_f64().unwrap(), 0.0);
    assert_eq!(body["review_count"], 0);

    for id in &review_ids {
        let (status, _) = send(
            &app,
            "PATCH",
            &format!("/api/admin/reviews/{}", id),
            Some(&admin),
            Some(json!({ "action": "approve" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, body) = send(&app, "GET", &format!("/api/restaurants/{}", restaurant), None, None).await;
    assert_eq!(body["rating"].as_f64().unwrap(), 4.0);
    assert_eq!(body["review_count"], 2);

    // Deleting an approved review recomputes the projection
    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/reviews/{}", review_ids[0]),
        Some(&alice),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, "GET", &format!("/api/restaurants/{}", restaurant), None, None).await;
    assert_eq!(body["rating"].as_f64().unwrap(), 3.0);
    assert_eq!(body["review_count"], 1);

    // Rejecting the last one empties the projection
    let (status, _) = send(
        &app,
        "PATCH",
        &format!("/api/admin/reviews/{}", review_ids[1]),
        Some(&admin),
        Some(json!({ "action": "reject" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, "GET", &format!("/api/restaurants/{}", restaurant), None, None).await;
    assert_eq!(body["rating"].as_f64().unwrap(), 0.0);
    assert_eq!(body["review_count"], 0);
}

#[tokio::test]
async fn duplicate_review_is_rejected() {
    let (app, _state) = test_app().await;
    let owner = register(&app, "Owner", "owner@example.com", "restaurant_owner").await;
    let restaurant = create_restaurant(&app, &owner).await;
    let alice = register(&app, "Alice", "alice@example.com", "user").await;

    let payload = json!({
        "restaurant": restaurant,
        "rating": 4,
        "title": "First visit",
        "comment": "Went twice, reviewing once.",
    });

    let (status, _) = send(&app, "POST", "/api/reviews", Some(&alice), Some(payload.clone())).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "POST", "/api/reviews", Some(&alice), Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "You have already reviewed this restaurant");
}

#[tokio::test]
async fn authorization_guards() {
    let (app, _state) = test_app().await;
    let owner = register(&app, "Owner", "owner@example.com", "restaurant_owner").await;
    let restaurant = create_restaurant(&app, &owner).await;
    let alice = register(&app, "Alice", "alice@example.com", "user").await;
    let rival = register(&app, "Rival", "rival@example.com", "restaurant_owner").await;

    // Customers cannot create restaurants
    let (status, _) = send(
        &app,
        "POST",
        "/api/restaurants",
        Some(&alice),
        Some(json!({ "name": "Nope", "cuisine": ["fusion"], "price_range": "$" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Another owner cannot edit someone else's restaurant
    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/restaurants/{}", restaurant),
        Some(&rival),
        Some(json!({ "name": "Hostile takeover" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Admin surface is admin-only
    let (status, _) = send(&app, "GET", "/api/admin/stats", Some(&alice), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // One restaurant per owner
    let (status, body) = send(
        &app,
        "POST",
        "/api/restaurants",
        Some(&owner),
        Some(json!({ "name": "Second", "cuisine": ["thai"], "price_range": "$" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "expected conflict: {}", body);
}

#[tokio::test]
async fn reservation_state_machine() {
    let (app, _state) = test_app().await;
    let owner = register(&app, "Owner", "owner@example.com", "restaurant_owner").await;
    let restaurant = create_restaurant(&app, &owner).await;
    let alice = register(&app, "Alice", "alice@example.com", "user").await;

    let reservation = create_reservation(&app, &alice, &restaurant, 4).await;
    let id = reservation["id"].as_str().unwrap().to_string();

    assert_eq!(reservation["status"], "pending");
    assert_eq!(reservation["payment"]["status"], "pending");
    // party_size 4 at 10.00 per guest
    assert_eq!(reservation["payment"]["amount"].as_f64().unwrap(), 40.0);

    // pending -> completed skips a state
    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/reservations/{}", id),
        Some(&alice),
        Some(json!({ "status": "completed" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Customers do not confirm by hand
    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/reservations/{}", id),
        Some(&alice),
        Some(json!({ "status": "confirmed" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // The owner can
    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/reservations/{}", id),
        Some(&owner),
        Some(json!({ "status": "confirmed" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "confirmed");

    // Cancellation needs a reason
    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/reservations/{}", id),
        Some(&alice),
        Some(json!({ "status": "cancelled" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/reservations/{}", id),
        Some(&alice),
        Some(json!({ "status": "cancelled", "cancellation_reason": "Change of plans" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "cancelled");
    let cancellation = &body["cancellation"];
    assert_eq!(cancellation["cancelled_by"], "user");
    assert_eq!(cancellation["reason"], "Change of plans");
    assert!(cancellation["cancelled_at"].is_string());

    // Terminal state admits nothing
    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/reservations/{}", id),
        Some(&owner),
        Some(json!({ "status": "confirmed" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn payment_verification() {
    let (app, _state) = test_app().await;
    let owner = register(&app, "Owner", "owner@example.com", "restaurant_owner").await;
    let restaurant = create_restaurant(&app, &owner).await;
    let alice = register(&app, "Alice", "alice@example.com", "user").await;

    let reservation = create_reservation(&app, &alice, &restaurant, 2).await;
    let id = reservation["id"].as_str().unwrap().to_string();

    // Bad signature: 400 and no state change
    let (status, body) = send(
        &app,
        "POST",
        "/api/payments/verify",
        Some(&alice),
        Some(json!({
            "reservation_id": id,
            "order_id": "order_1",
            "payment_id": "pay_1",
            "signature": sign_payment("order_1", "someone_elses_payment"),
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid payment signature");

    let (_, body) = send(&app, "GET", &format!("/api/reservations/{}", id), Some(&alice), None).await;
    assert_eq!(body["status"], "pending");
    assert_eq!(body["payment"]["status"], "pending");

    // Another customer cannot verify this reservation
    let mallory = register(&app, "Mallory", "mallory@example.com", "user").await;
    let (status, _) = send(
        &app,
        "POST",
        "/api/payments/verify",
        Some(&mallory),
        Some(json!({
            "reservation_id": id,
            "order_id": "order_1",
            "payment_id": "pay_1",
            "signature": sign_payment("order_1", "pay_1"),
        })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Valid signature confirms the reservation
    let verify = json!({
        "reservation_id": id,
        "order_id": "order_1",
        "payment_id": "pay_1",
        "signature": sign_payment("order_1", "pay_1"),
    });
    let (status, body) = send(&app, "POST", "/api/payments/verify", Some(&alice), Some(verify.clone())).await;
    assert_eq!(status, StatusCode::OK, "verify failed: {}", body);
    assert_eq!(body["status"], "confirmed");
    assert_eq!(body["payment"]["status"], "completed");
    assert_eq!(body["payment"]["transaction_id"], "pay_1");
    assert!(body["payment"]["paid_at"].is_string());

    // Re-verification is a no-op
    let (status, body) = send(&app, "POST", "/api/payments/verify", Some(&alice), Some(verify)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "confirmed");
}

#[tokio::test]
async fn public_and_protected_routes() {
    let (app, _state) = test_app().await;
    let owner = register(&app, "Owner", "owner@example.com", "restaurant_owner").await;
    let restaurant = create_restaurant(&app, &owner).await;

    // Discovery reads need no token
    let (status, body) = send(&app, "GET", "/api/restaurants", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, _) = send(&app, "GET", &format!("/api/restaurants/{}", restaurant), None, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "GET", "/api/reviews", None, None).await;
    assert_eq!(status, StatusCode::OK);

    // Everything else does
    let (status, _) = send(&app, "GET", "/api/reservations", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = send(&app, "GET", "/api/owner/restaurant", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Liveness is outside /api
    let (status, body) = send(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn restaurant_filters() {
    let (app, state) = test_app().await;
    let admin = seed_admin(&app, &state).await;
    let owner = register(&app, "Owner", "owner@example.com", "restaurant_owner").await;
    let restaurant = create_restaurant(&app, &owner).await;

    let (status, _) = send(
        &app,
        "PATCH",
        &format!("/api/admin/restaurants/{}", restaurant),
        Some(&admin),
        Some(json!({ "status": "active" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, "GET", "/api/restaurants?cuisine=italian", None, None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (_, body) = send(&app, "GET", "/api/restaurants?cuisine=sushi", None, None).await;
    assert_eq!(body.as_array().unwrap().len(), 0);

    let (_, body) = send(&app, "GET", "/api/restaurants?min_rating=4.5", None, None).await;
    assert_eq!(body.as_array().unwrap().len(), 0);

    // Admin stats see the activated restaurant
    let (status, body) = send(&app, "GET", "/api/admin/stats", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["active_restaurants"], 1);
}

#[tokio::test]
async fn favorites_toggle() {
    let (app, _state) = test_app().await;
    let owner = register(&app, "Owner", "owner@example.com", "restaurant_owner").await;
    let restaurant = create_restaurant(&app, &owner).await;
    let alice = register(&app, "Alice", "alice@example.com", "user").await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/auth/favorites/{}", restaurant),
        Some(&alice),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["favorites"].as_array().unwrap().len(), 1);

    let (_, body) = send(
        &app,
        "PUT",
        &format!("/api/auth/favorites/{}", restaurant),
        Some(&alice),
        None,
    )
    .await;
    assert_eq!(body["favorites"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn owner_dashboard_and_menu() {
    let (app, _state) = test_app().await;
    let owner = register(&app, "Owner", "owner@example.com", "restaurant_owner").await;
    let restaurant = create_restaurant(&app, &owner).await;
    let alice = register(&app, "Alice", "alice@example.com", "user").await;

    let (status, body) = send(&app, "GET", "/api/owner/restaurant", Some(&owner), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], restaurant.as_str());

    // Menu CRUD
    let (status, body) = send(
        &app,
        "POST",
        "/api/menu",
        Some(&owner),
        Some(json!({
            "name": "Margherita",
            "description": "Tomato, mozzarella, basil",
            "price": 12.5,
            "category": "Pizza",
            "image": { "url": "https://img.example/margherita.jpg" },
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "menu create failed: {}", body);
    let item_id = body["id"].as_str().unwrap().to_string();

    let (_, body) = send(&app, "GET", "/api/menu", Some(&owner), None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (_, body) = send(&app, "GET", "/api/menu/category/pizza", Some(&owner), None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    // Customers have no menu surface
    let (status, _) = send(&app, "GET", "/api/menu", Some(&alice), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/menu/{}", item_id),
        Some(&owner),
        Some(json!({ "price": 13.0, "is_available": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_available"], false);

    let (status, _) = send(&app, "DELETE", &format!("/api/menu/{}", item_id), Some(&owner), None).await;
    assert_eq!(status, StatusCode::OK);

    // Owner stats reflect reservations
    create_reservation(&app, &alice, &restaurant, 3).await;
    let (status, body) = send(&app, "GET", "/api/owner/restaurant/stats", Some(&owner), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_reservations"], 1);
    assert_eq!(body["pending_reservations"], 1);
}

fn multipart_body(boundary: &str, filename: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"images\"; filename=\"{}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n",
            filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());
    body
}

async fn send_upload(app: &Router, token: &str, filename: &str, data: &[u8]) -> (StatusCode, Value) {
    let boundary = "test-upload-boundary";
    let request = Request::builder()
        .method("POST")
        .uri("/api/upload/restaurant-images")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(multipart_body(boundary, filename, data)))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn upload_limits_come_from_the_handler() {
    // Host configured (never reached: validation fails first) so requests
    // make it past the configuration check to the size and format logic.
    let db = DbService::open_memory().await.expect("in-memory db");
    let mut config = Config::for_tests();
    config.image_host = Some(ImageHostConfig {
        url: "http://127.0.0.1:0".into(),
        api_key: "test".into(),
    });
    let state = ServerState::new(config, db);
    let app = api::router(state.clone());

    let alice = register(&app, "Alice", "alice@example.com", "user").await;

    // A 3MB body passes the framework limit and fails image validation
    // with the JSON error shape, not a bare 413
    let three_mb = vec![0xABu8; 3 * 1024 * 1024];
    let (status, body) = send_upload(&app, &alice, "photo.png", &three_mb).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "unexpected: {}", body);
    assert!(
        body["message"].as_str().unwrap().contains("Invalid image file"),
        "unexpected message: {}",
        body
    );

    // Over the per-file cap the handler's own limit answers
    let six_mb = vec![0xABu8; 6 * 1024 * 1024];
    let (status, body) = send_upload(&app, &alice, "huge.png", &six_mb).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "unexpected: {}", body);
    assert!(
        body["message"].as_str().unwrap().starts_with("File too large"),
        "unexpected message: {}",
        body
    );

    // Unknown extensions are refused before decoding
    let (status, body) = send_upload(&app, &alice, "notes.txt", b"hello").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["message"].as_str().unwrap().contains("Unsupported file format"),
        "unexpected message: {}",
        body
    );
}

#[tokio::test]
async fn review_replies_and_likes() {
    let (app, state) = test_app().await;
    let admin = seed_admin(&app, &state).await;
    let owner = register(&app, "Owner", "owner@example.com", "restaurant_owner").await;
    let restaurant = create_restaurant(&app, &owner).await;
    let alice = register(&app, "Alice", "alice@example.com", "user").await;
    let bob = register(&app, "Bob", "bob@example.com", "user").await;

    let (_, review) = send(
        &app,
        "POST",
        "/api/reviews",
        Some(&alice),
        Some(json!({
            "restaurant": restaurant,
            "rating": 5,
            "title": "Great",
            "comment": "Would book again.",
        })),
    )
    .await;
    let review_id = review["id"].as_str().unwrap().to_string();

    // Likes toggle per user
    let (_, body) = send(&app, "PUT", &format!("/api/reviews/{}/like", review_id), Some(&bob), None).await;
    assert_eq!(body["likes"].as_array().unwrap().len(), 1);
    let (_, body) = send(&app, "PUT", &format!("/api/reviews/{}/like", review_id), Some(&bob), None).await;
    assert_eq!(body["likes"].as_array().unwrap().len(), 0);

    // Only the restaurant owner replies
    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/reviews/{}/replies", review_id),
        Some(&bob),
        Some(json!({ "comment": "Thanks!" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/reviews/{}/replies", review_id),
        Some(&owner),
        Some(json!({ "comment": "Thank you for visiting!" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let reply_id = body["replies"][0]["id"].as_str().unwrap().to_string();

    // Strangers cannot delete the reply, admins can
    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/reviews/{}/replies/{}", review_id, reply_id),
        Some(&bob),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(
        &app,
        "DELETE",
        &format!("/api/reviews/{}/replies/{}", review_id, reply_id),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["replies"].as_array().unwrap().len(), 0);
}
