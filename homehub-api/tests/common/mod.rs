/// Common test utilities for integration tests
///
/// Builds the full router over a fresh [`MemoryStore`] so the HTTP surface
/// can be exercised without PostgreSQL, plus helpers for the usual
/// register → login → call flow.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use homehub_api::app::{build_router, AppState};
use homehub_api::config::{AdminConfig, ApiConfig, Config, DatabaseConfig, JwtConfig, StoreBackend};
use homehub_shared::models::maintenance::{CreateMaintenanceRequest, MaintenanceRequest, Priority};
use homehub_shared::models::property::CreateProperty;
use homehub_shared::store::{MemoryStore, Store};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "test-secret-key-at-least-32-bytes-long";

/// Test context containing all necessary resources
pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub app: axum::Router,
    pub config: Config,
}

impl TestContext {
    /// Creates a new test context with an empty store
    pub fn new() -> Self {
        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors_origins: vec!["*".to_string()],
            },
            database: DatabaseConfig {
                backend: StoreBackend::Memory,
                url: String::new(),
                max_connections: 1,
            },
            jwt: JwtConfig {
                secret: TEST_SECRET.to_string(),
                expiration_minutes: 15,
            },
            admin: AdminConfig {
                email: "admin@homehub.com".to_string(),
                name: "Super Admin".to_string(),
                password: None,
            },
        };

        let store = Arc::new(MemoryStore::new());
        let app = build_router(AppState::new(store.clone(), config.clone()));

        TestContext { store, app, config }
    }

    /// Sends a request and returns the status and JSON body
    ///
    /// An empty body is returned as `Value::Null`.
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<String>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, json)
    }

    /// POSTs a JSON value
    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, None, Some(body.to_string())).await
    }

    /// Registers a user with the given email and password
    pub async fn register(&self, name: &str, email: &str, password: &str) -> (StatusCode, Value) {
        self.post_json(
            "/register",
            json!({
                "full_name": name,
                "email": email,
                "password": password,
                "role": "tenant",
            }),
        )
        .await
    }

    /// Logs in and returns the bearer token
    pub async fn login_token(&self, email: &str, password: &str) -> String {
        let (status, body) = self
            .post_json("/login", json!({ "email": email, "password": password }))
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {}", body);

        body["token"].as_str().unwrap().to_string()
    }

    /// Registers and logs in a tenant, returning (user_id, token)
    pub async fn tenant_session(&self, email: &str) -> (i64, String) {
        let (status, _) = self.register("Alice", email, "p1").await;
        assert_eq!(status, StatusCode::CREATED);

        let user = self.store.find_user_by_email(email).await.unwrap().unwrap();
        let token = self.login_token(email, "p1").await;

        (user.id, token)
    }

    /// Creates a property owned by `owner_id` and a pending request on it
    pub async fn file_request(&self, owner_id: i64, tenant_id: i64, title: &str) -> MaintenanceRequest {
        let property = self
            .store
            .create_property(CreateProperty {
                owner_id,
                title: "Harbor View".to_string(),
                location: Some("12 Dock St".to_string()),
                price: Some(1450.0),
            })
            .await
            .unwrap();

        self.store
            .create_maintenance_request(CreateMaintenanceRequest {
                property_id: property.id,
                tenant_id,
                title: title.to_string(),
                description: "Kitchen tap drips overnight".to_string(),
                priority: Priority::High,
            })
            .await
            .unwrap()
    }
}
