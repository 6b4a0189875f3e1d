/// Property model and database operations
///
/// Properties are listings owned by a user. No HTTP endpoint creates or
/// edits them yet; the queries here back seeding and the maintenance join.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE properties (
///     id BIGSERIAL PRIMARY KEY,
///     owner_id BIGINT NOT NULL REFERENCES users(id),
///     title VARCHAR(100) NOT NULL,
///     location VARCHAR(100),
///     price DOUBLE PRECISION,
///     status VARCHAR(20) NOT NULL DEFAULT 'under_review',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Listing review status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyStatus {
    /// Newly listed, awaiting review (default)
    UnderReview,

    /// Approved and visible
    Approved,

    /// Rejected by an administrator
    Rejected,
}

impl PropertyStatus {
    /// Converts status to string for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyStatus::UnderReview => "under_review",
            PropertyStatus::Approved => "approved",
            PropertyStatus::Rejected => "rejected",
        }
    }

    /// Parses status from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "under_review" => Some(PropertyStatus::UnderReview),
            "approved" => Some(PropertyStatus::Approved),
            "rejected" => Some(PropertyStatus::Rejected),
            _ => None,
        }
    }
}

/// Property model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Property {
    /// Generated property ID
    pub id: i64,

    /// Owning user
    pub owner_id: i64,

    /// Listing title
    pub title: String,

    /// Free-form location
    pub location: Option<String>,

    /// Asking price
    pub price: Option<f64>,

    /// Review status (see [`PropertyStatus`])
    pub status: String,

    /// When the property was listed
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new property
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProperty {
    /// Owning user (must exist)
    pub owner_id: i64,

    /// Listing title
    pub title: String,

    /// Free-form location
    pub location: Option<String>,

    /// Asking price
    pub price: Option<f64>,
}

const PROPERTY_COLUMNS: &str = "id, owner_id, title, location, price, status, created_at";

impl Property {
    /// Creates a new property with status `under_review`
    ///
    /// # Errors
    ///
    /// Returns an error if the owner does not exist (foreign key violation)
    /// or the database connection fails.
    pub async fn create(pool: &PgPool, data: CreateProperty) -> Result<Self, sqlx::Error> {
        let query = format!(
            r#"
            INSERT INTO properties (owner_id, title, location, price, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {PROPERTY_COLUMNS}
            "#
        );

        let property = sqlx::query_as::<_, Property>(&query)
            .bind(data.owner_id)
            .bind(data.title)
            .bind(data.location)
            .bind(data.price)
            .bind(PropertyStatus::UnderReview.as_str())
            .fetch_one(pool)
            .await?;

        Ok(property)
    }

    /// Finds a property by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let query = format!("SELECT {PROPERTY_COLUMNS} FROM properties WHERE id = $1");

        let property = sqlx::query_as::<_, Property>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(property)
    }
}
