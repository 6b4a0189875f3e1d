/// End-to-end tests for the HomeHub HTTP API
///
/// Every test drives the real router over an in-memory store:
/// - Registration and duplicate emails
/// - Login and token contents
/// - Bearer authentication on maintenance routes
/// - Listing and status updates
/// - Error mapping for bad input

mod common;

use axum::http::{Method, StatusCode};
use chrono::Utc;
use common::{TestContext, TEST_SECRET};
use homehub_shared::auth::jwt::{issue_token, validate_token};
use homehub_shared::models::maintenance::MaintenanceRequest;
use homehub_shared::store::Store;
use serde_json::json;

#[tokio::test]
async fn test_register_then_login() {
    let ctx = TestContext::new();

    let (status, body) = ctx.register("Alice", "a@x.com", "p1").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "User created");

    let (status, body) = ctx
        .post_json("/login", json!({ "email": "a@x.com", "password": "p1" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "tenant");
    assert_eq!(body["name"], "Alice");

    let (status, body) = ctx
        .post_json("/login", json!({ "email": "a@x.com", "password": "wrong" }))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_duplicate_email_rejected() {
    let ctx = TestContext::new();

    let (status, _) = ctx.register("Alice", "a@x.com", "p1").await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = ctx.register("Alice Again", "a@x.com", "p2").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Email already exists");

    // The first account is untouched
    let token = ctx.login_token("a@x.com", "p1").await;
    assert!(!token.is_empty());
}

#[tokio::test]
async fn test_role_defaults_to_tenant() {
    let ctx = TestContext::new();

    let (status, _) = ctx
        .post_json(
            "/register",
            json!({ "full_name": "Bob", "email": "b@x.com", "password": "p1" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let user = ctx.store.find_user_by_email("b@x.com").await.unwrap().unwrap();
    assert_eq!(user.role, "tenant");
}

#[tokio::test]
async fn test_register_keeps_optional_fields_and_role() {
    let ctx = TestContext::new();

    let (status, _) = ctx
        .post_json(
            "/register",
            json!({
                "full_name": "Lena",
                "email": "l@x.com",
                "password": "p1",
                "role": "landlord",
                "phone": "+44 20 7946 0000",
                "dob": "1990-04-01"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let user = ctx.store.find_user_by_email("l@x.com").await.unwrap().unwrap();
    assert_eq!(user.role, "landlord");
    assert_eq!(user.phone.as_deref(), Some("+44 20 7946 0000"));
    assert_eq!(user.gender, None);
    assert_eq!(user.dob.as_deref(), Some("1990-04-01"));
}

#[tokio::test]
async fn test_password_is_not_stored_in_plaintext() {
    let ctx = TestContext::new();
    ctx.register("Alice", "a@x.com", "p1").await;

    let user = ctx.store.find_user_by_email("a@x.com").await.unwrap().unwrap();
    assert_ne!(user.password_hash, "p1");
    assert!(user.password_hash.starts_with("$argon2id$"));
}

#[tokio::test]
async fn test_login_unknown_email() {
    let ctx = TestContext::new();

    let (status, body) = ctx
        .post_json("/login", json!({ "email": "ghost@x.com", "password": "p1" }))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_token_identifies_user() {
    let ctx = TestContext::new();
    let (user_id, token) = ctx.tenant_session("a@x.com").await;

    let claims = validate_token(&token, TEST_SECRET).unwrap();
    assert_eq!(claims.sub, user_id);
    assert_eq!(claims.role, "tenant");
    assert_eq!(claims.exp - claims.iat, ctx.config.jwt.expiration_minutes * 60);
}

#[tokio::test]
async fn test_maintenance_requires_valid_token() {
    let ctx = TestContext::new();
    let (_, token) = ctx.tenant_session("a@x.com").await;

    let (status, _) = ctx.send(Method::GET, "/maintenance", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let mut corrupted = token.clone();
    corrupted.push('x');
    let (status, _) = ctx
        .send(Method::GET, "/maintenance", Some(&corrupted), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = ctx.send(Method::GET, "/maintenance", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_expired_token_rejected() {
    let ctx = TestContext::new();
    let (user_id, _) = ctx.tenant_session("a@x.com").await;

    let expired = issue_token(user_id, "tenant", TEST_SECRET, chrono::Duration::minutes(-1)).unwrap();
    let (status, body) = ctx
        .send(Method::GET, "/maintenance", Some(&expired), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Token expired");
}

#[tokio::test]
async fn test_token_signed_with_other_secret_rejected() {
    let ctx = TestContext::new();
    let (user_id, _) = ctx.tenant_session("a@x.com").await;

    let forged = issue_token(
        user_id,
        "admin",
        "another-secret-key-at-least-32-bytes",
        chrono::Duration::minutes(15),
    )
    .unwrap();
    let (status, _) = ctx.send(Method::GET, "/maintenance", Some(&forged), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_maintenance_shape() {
    let ctx = TestContext::new();
    let (user_id, token) = ctx.tenant_session("a@x.com").await;
    let request = ctx.file_request(user_id, user_id, "Leaking tap").await;

    let (status, body) = ctx.send(Method::GET, "/maintenance", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(
        items[0],
        json!({
            "id": request.id,
            "title": "Leaking tap",
            "description": "Kitchen tap drips overnight",
            "priority": "high",
            "status": "pending",
            "date": request.created_at.format("%Y-%m-%d").to_string(),
            "property_title": "Harbor View",
            "tenant_name": "Alice",
        })
    );
}

#[tokio::test]
async fn test_update_status_visible_in_listing() {
    let ctx = TestContext::new();
    let (user_id, token) = ctx.tenant_session("a@x.com").await;
    let first = ctx.file_request(user_id, user_id, "Leaking tap").await;
    let second = ctx.file_request(user_id, user_id, "Broken heater").await;

    let (status, body) = ctx
        .send(
            Method::PATCH,
            &format!("/maintenance/{}/status", first.id),
            Some(&token),
            Some(json!({ "status": "in_progress" }).to_string()),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Status updated");

    let (_, body) = ctx.send(Method::GET, "/maintenance", Some(&token), None).await;
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 2);

    let updated = items.iter().find(|i| i["id"] == first.id).unwrap();
    assert_eq!(updated["status"], "in_progress");

    let untouched = items.iter().find(|i| i["id"] == second.id).unwrap();
    assert_eq!(untouched["status"], "pending");

    // created_at is immutable
    let stored = ctx.store.find_maintenance_request_by_id(first.id).await.unwrap();
    assert_eq!(stored.created_at, first.created_at);
}

#[tokio::test]
async fn test_long_role_and_status_accepted() {
    let ctx = TestContext::new();

    let (status, _) = ctx
        .post_json(
            "/register",
            json!({
                "full_name": "Cora",
                "email": "cora@x.com",
                "password": "p1",
                "role": "regional-property-coordinator"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let user = ctx.store.find_user_by_email("cora@x.com").await.unwrap().unwrap();
    let token = ctx.login_token("cora@x.com", "p1").await;
    let request = ctx.file_request(user.id, user.id, "Window latch").await;

    let (status, _) = ctx
        .send(
            Method::PATCH,
            &format!("/maintenance/{}/status", request.id),
            Some(&token),
            Some(json!({ "status": "awaiting_contractor_visit" }).to_string()),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = ctx.send(Method::GET, "/maintenance", Some(&token), None).await;
    assert_eq!(body[0]["status"], "awaiting_contractor_visit");
}

#[tokio::test]
async fn test_update_status_unknown_id() {
    let ctx = TestContext::new();
    let (_, token) = ctx.tenant_session("a@x.com").await;

    let (status, body) = ctx
        .send(
            Method::PATCH,
            "/maintenance/9999/status",
            Some(&token),
            Some(json!({ "status": "completed" }).to_string()),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Maintenance request not found");

    let (status, _) = ctx
        .send(
            Method::PATCH,
            "/maintenance/abc/status",
            Some(&token),
            Some(json!({ "status": "completed" }).to_string()),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_status_requires_token() {
    let ctx = TestContext::new();
    let (user_id, _) = ctx.tenant_session("a@x.com").await;
    let request = ctx.file_request(user_id, user_id, "Leaking tap").await;

    let (status, _) = ctx
        .send(
            Method::PATCH,
            &format!("/maintenance/{}/status", request.id),
            None,
            Some(json!({ "status": "completed" }).to_string()),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let stored = ctx.store.find_maintenance_request_by_id(request.id).await.unwrap();
    assert_eq!(stored.status, "pending");
}

#[tokio::test]
async fn test_malformed_bodies_are_bad_requests() {
    let ctx = TestContext::new();

    let (status, _) = ctx
        .send(Method::POST, "/register", None, Some("{not json".to_string()))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = ctx
        .send(Method::POST, "/login", None, Some(r#"{"email":"a@x.com"}"#.to_string()))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = ctx
        .post_json(
            "/register",
            json!({ "full_name": "", "email": "a@x.com", "password": "p1" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");

    let (user_id, token) = ctx.tenant_session("c@x.com").await;
    let request = ctx.file_request(user_id, user_id, "Leaking tap").await;
    let (status, _) = ctx
        .send(
            Method::PATCH,
            &format!("/maintenance/{}/status", request.id),
            Some(&token),
            Some(json!({ "state": "completed" }).to_string()),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_orphaned_request_lists_unknown() {
    let ctx = TestContext::new();
    let (user_id, token) = ctx.tenant_session("a@x.com").await;

    ctx.store
        .insert_orphaned_request(MaintenanceRequest {
            id: 0,
            property_id: 4242,
            tenant_id: user_id,
            title: "Mould in bathroom".to_string(),
            description: "Black spots above the shower".to_string(),
            priority: "low".to_string(),
            status: "pending".to_string(),
            created_at: Utc::now(),
        })
        .await;

    let (status, body) = ctx.send(Method::GET, "/maintenance", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["property_title"], "Unknown");
    assert_eq!(body[0]["tenant_name"], "Alice");
}

#[tokio::test]
async fn test_health() {
    let ctx = TestContext::new();

    let (status, body) = ctx.send(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["store"], "connected");
}
