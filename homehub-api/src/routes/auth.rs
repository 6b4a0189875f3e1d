/// Authentication endpoints
///
/// - `POST /register` - Create an account
/// - `POST /login` - Exchange credentials for a bearer token

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::ValidatedJson,
};
use axum::{extract::State, http::StatusCode, Json};
use homehub_shared::{
    auth::{jwt, password},
    models::user::{CreateUser, Role},
};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,

    /// Email address (must be unused)
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    /// Password (stored as an Argon2id hash)
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    /// Role name; defaults to "tenant"
    pub role: Option<String>,

    /// Optional phone number
    pub phone: Option<String>,

    /// Optional gender
    pub gender: Option<String>,

    /// Optional date of birth
    pub dob: Option<String>,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address
    pub email: String,

    /// Password
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer token
    pub token: String,

    /// User role
    pub role: String,

    /// User's full name
    pub name: String,
}

/// Plain acknowledgement body
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable message
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Register a new user
///
/// # Endpoint
///
/// ```text
/// POST /register
/// Content-Type: application/json
///
/// {
///   "full_name": "Alice",
///   "email": "a@x.com",
///   "password": "p1",
///   "role": "tenant"
/// }
/// ```
///
/// # Response
///
/// `201 Created` with `{"message": "User created"}`
///
/// # Errors
///
/// - `400 Bad Request`: Email already exists, malformed body, or empty
///   required field
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    if state.store.find_user_by_email(&req.email).await?.is_some() {
        return Err(ApiError::BadRequest("Email already exists".to_string()));
    }

    let password_hash = password::hash_password(&req.password)?;

    let role = req
        .role
        .filter(|role| !role.trim().is_empty())
        .unwrap_or_else(|| Role::default().as_str().to_string());

    // The unique constraint still catches a concurrent registration
    let user = state
        .store
        .create_user(CreateUser {
            full_name: req.full_name,
            email: req.email,
            password_hash,
            role,
            phone: req.phone,
            gender: req.gender,
            dob: req.dob,
        })
        .await?;

    tracing::info!(user_id = user.id, role = %user.role, "User registered");

    Ok((StatusCode::CREATED, Json(MessageResponse::new("User created"))))
}

/// Login endpoint
///
/// # Endpoint
///
/// ```text
/// POST /login
/// Content-Type: application/json
///
/// {
///   "email": "a@x.com",
///   "password": "p1"
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "token": "eyJ...",
///   "role": "tenant",
///   "name": "Alice"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Malformed body
/// - `401 Unauthorized`: Unknown email or wrong password
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let user = state.store.find_user_by_email(&req.email).await?;

    let stored_hash = user.as_ref().map(|u| u.password_hash.as_str());
    let valid = match password::verify_credentials(&req.password, stored_hash) {
        Ok(valid) => valid,
        // A stored value that is not a PHC hash can never match
        Err(password::PasswordError::InvalidHash(e)) => {
            tracing::warn!(error = %e, "Stored credential is not a valid hash");
            false
        }
        Err(e) => return Err(e.into()),
    };

    let user = match user {
        Some(user) if valid => user,
        _ => {
            tracing::warn!("Failed login attempt");
            return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
        }
    };

    let token = jwt::issue_token(user.id, &user.role, state.jwt_secret(), state.config.token_ttl())?;

    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(LoginResponse {
        token,
        role: user.role,
        name: user.full_name,
    }))
}
