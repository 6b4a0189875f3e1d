/// Maintenance request endpoints
///
/// Both endpoints sit behind bearer authentication. Any authenticated role
/// may list requests and change their status.
///
/// - `GET /maintenance` - List every request with property and tenant names
/// - `PATCH /maintenance/:id/status` - Set a request's status

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::ValidatedJson,
    routes::auth::MessageResponse,
};
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use homehub_shared::{auth::middleware::AuthContext, models::maintenance::MaintenanceRequestDetails};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Shown when a joined property or tenant row is missing
const UNKNOWN: &str = "Unknown";

/// Maintenance request as returned by the listing
#[derive(Debug, Serialize, Deserialize)]
pub struct MaintenanceResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub priority: String,
    pub status: String,

    /// Filing date, `YYYY-MM-DD`
    pub date: String,

    /// Property title, or "Unknown"
    pub property_title: String,

    /// Tenant name, or "Unknown"
    pub tenant_name: String,
}

impl From<MaintenanceRequestDetails> for MaintenanceResponse {
    fn from(details: MaintenanceRequestDetails) -> Self {
        let date = details.request.date();
        let request = details.request;

        Self {
            id: request.id,
            title: request.title,
            description: request.description,
            priority: request.priority,
            status: request.status,
            date,
            property_title: details.property_title.unwrap_or_else(|| UNKNOWN.to_string()),
            tenant_name: details.tenant_name.unwrap_or_else(|| UNKNOWN.to_string()),
        }
    }
}

/// Status update request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStatusRequest {
    /// New status, e.g. "in_progress"
    #[validate(length(min = 1, message = "Status is required"))]
    pub status: String,
}

/// List maintenance requests
///
/// # Endpoint
///
/// ```text
/// GET /maintenance
/// Authorization: Bearer <token>
/// ```
///
/// # Response
///
/// ```json
/// [
///   {
///     "id": 7,
///     "title": "Leaking tap",
///     "description": "Kitchen tap drips overnight",
///     "priority": "medium",
///     "status": "pending",
///     "date": "2025-03-14",
///     "property_title": "Harbor View",
///     "tenant_name": "Alice"
///   }
/// ]
/// ```
pub async fn list_maintenance(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<MaintenanceResponse>>> {
    let requests = state.store.list_maintenance_requests().await?;

    tracing::debug!(
        user_id = auth.user_id,
        count = requests.len(),
        "Listed maintenance requests"
    );

    Ok(Json(requests.into_iter().map(MaintenanceResponse::from).collect()))
}

/// Update a maintenance request's status
///
/// # Endpoint
///
/// ```text
/// PATCH /maintenance/:id/status
/// Authorization: Bearer <token>
/// Content-Type: application/json
///
/// { "status": "in_progress" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Malformed body or empty status
/// - `401 Unauthorized`: Missing or invalid token
/// - `404 Not Found`: No request with this ID
pub async fn update_status(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateStatusRequest>,
) -> ApiResult<Json<MessageResponse>> {
    // Only integer IDs name a request
    let id: i64 = id
        .parse()
        .map_err(|_| ApiError::NotFound("Maintenance request not found".to_string()))?;

    let updated = state
        .store
        .update_maintenance_request_status(id, &req.status)
        .await?;

    tracing::info!(
        request_id = updated.id,
        status = %updated.status,
        user_id = auth.user_id,
        "Maintenance status updated"
    );

    Ok(Json(MessageResponse::new("Status updated")))
}
