/// Maintenance request model and database operations
///
/// A maintenance request is an issue filed by a tenant against a property
/// and tracked through a status lifecycle. Only the status is ever mutated.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE maintenance_requests (
///     id BIGSERIAL PRIMARY KEY,
///     property_id BIGINT NOT NULL REFERENCES properties(id),
///     tenant_id BIGINT NOT NULL REFERENCES users(id),
///     title VARCHAR(100) NOT NULL,
///     description TEXT NOT NULL,
///     priority VARCHAR(20) NOT NULL DEFAULT 'medium',
///     status VARCHAR(20) NOT NULL DEFAULT 'pending',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Status Lifecycle
///
/// ```text
/// pending → in_progress → completed
/// ```
///
/// The column is free text: clients may set any non-empty status and the
/// values above are the ones the application knows about.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Request urgency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Converts priority to string for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    /// Parses priority from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            _ => None,
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

/// Known maintenance request statuses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceStatus {
    /// Filed, not yet picked up (default)
    Pending,

    /// Work has started
    InProgress,

    /// Resolved
    Completed,
}

impl MaintenanceStatus {
    /// Converts status to string for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            MaintenanceStatus::Pending => "pending",
            MaintenanceStatus::InProgress => "in_progress",
            MaintenanceStatus::Completed => "completed",
        }
    }

    /// Parses status from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(MaintenanceStatus::Pending),
            "in_progress" => Some(MaintenanceStatus::InProgress),
            "completed" => Some(MaintenanceStatus::Completed),
            _ => None,
        }
    }
}

impl Default for MaintenanceStatus {
    fn default() -> Self {
        MaintenanceStatus::Pending
    }
}

/// Maintenance request row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MaintenanceRequest {
    /// Generated request ID
    pub id: i64,

    /// Property the request is filed against
    pub property_id: i64,

    /// Tenant who filed the request
    pub tenant_id: i64,

    /// Short summary
    pub title: String,

    /// Full description of the issue
    pub description: String,

    /// Priority (see [`Priority`])
    pub priority: String,

    /// Current status (see [`MaintenanceStatus`])
    pub status: String,

    /// When the request was filed (immutable)
    pub created_at: DateTime<Utc>,
}

/// Maintenance request joined with the names of its property and tenant
///
/// The joined columns are `None` when the referenced row is missing.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MaintenanceRequestDetails {
    /// The request itself
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub request: MaintenanceRequest,

    /// Title of the referenced property
    pub property_title: Option<String>,

    /// Full name of the filing tenant
    pub tenant_name: Option<String>,
}

/// Input for filing a new maintenance request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMaintenanceRequest {
    /// Property the request is filed against (must exist)
    pub property_id: i64,

    /// Filing tenant (must exist)
    pub tenant_id: i64,

    /// Short summary
    pub title: String,

    /// Full description
    pub description: String,

    /// Priority (defaults to medium)
    #[serde(default)]
    pub priority: Priority,
}

const REQUEST_COLUMNS: &str =
    "id, property_id, tenant_id, title, description, priority, status, created_at";

impl MaintenanceRequest {
    /// Files a new request with status `pending`
    ///
    /// # Errors
    ///
    /// Returns an error if the property or tenant does not exist (foreign key
    /// violation) or the database connection fails.
    pub async fn create(
        pool: &PgPool,
        data: CreateMaintenanceRequest,
    ) -> Result<Self, sqlx::Error> {
        let query = format!(
            r#"
            INSERT INTO maintenance_requests
                (property_id, tenant_id, title, description, priority, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {REQUEST_COLUMNS}
            "#
        );

        let request = sqlx::query_as::<_, MaintenanceRequest>(&query)
            .bind(data.property_id)
            .bind(data.tenant_id)
            .bind(data.title)
            .bind(data.description)
            .bind(data.priority.as_str())
            .bind(MaintenanceStatus::Pending.as_str())
            .fetch_one(pool)
            .await?;

        Ok(request)
    }

    /// Finds a request by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let query = format!("SELECT {REQUEST_COLUMNS} FROM maintenance_requests WHERE id = $1");

        let request = sqlx::query_as::<_, MaintenanceRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(request)
    }

    /// Lists every request with its property title and tenant name
    ///
    /// Uses a single LEFT JOIN so requests whose property or tenant row is
    /// missing are still returned, with `None` in the joined columns.
    /// Ordered by ID.
    pub async fn list_with_details(
        pool: &PgPool,
    ) -> Result<Vec<MaintenanceRequestDetails>, sqlx::Error> {
        let details = sqlx::query_as::<_, MaintenanceRequestDetails>(
            r#"
            SELECT m.id, m.property_id, m.tenant_id, m.title, m.description,
                   m.priority, m.status, m.created_at,
                   p.title AS property_title,
                   u.full_name AS tenant_name
            FROM maintenance_requests m
            LEFT JOIN properties p ON p.id = m.property_id
            LEFT JOIN users u ON u.id = m.tenant_id
            ORDER BY m.id
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(details)
    }

    /// Sets the status of a request
    ///
    /// Single-statement update; returns the updated row, or `None` if no
    /// request has this ID.
    pub async fn update_status(
        pool: &PgPool,
        id: i64,
        status: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let query = format!(
            r#"
            UPDATE maintenance_requests
            SET status = $2
            WHERE id = $1
            RETURNING {REQUEST_COLUMNS}
            "#
        );

        let request = sqlx::query_as::<_, MaintenanceRequest>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await?;

        Ok(request)
    }

    /// Gets the parsed status, if it is one of the known values
    pub fn get_status(&self) -> Option<MaintenanceStatus> {
        MaintenanceStatus::from_str(&self.status)
    }

    /// Filing date formatted as `YYYY-MM-DD`
    pub fn date(&self) -> String {
        self.created_at.format("%Y-%m-%d").to_string()
    }
}
