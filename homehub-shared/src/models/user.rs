/// User model and database operations
///
/// This module provides the User model and the queries behind registration
/// and login. Users own properties (as landlords) and file maintenance
/// requests (as tenants).
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id BIGSERIAL PRIMARY KEY,
///     full_name VARCHAR(100) NOT NULL,
///     email VARCHAR(120) NOT NULL UNIQUE,
///     password_hash VARCHAR(255) NOT NULL,
///     role VARCHAR(20) NOT NULL DEFAULT 'tenant',
///     phone VARCHAR(20),
///     gender VARCHAR(20),
///     dob VARCHAR(20),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use homehub_shared::models::user::{User, CreateUser};
/// use homehub_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let new_user = CreateUser {
///     full_name: "Alice".to_string(),
///     email: "alice@example.com".to_string(),
///     password_hash: "$argon2id$...".to_string(),
///     role: "tenant".to_string(),
///     phone: None,
///     gender: None,
///     dob: None,
/// };
///
/// let user = User::create(&pool, new_user).await?;
/// let found = User::find_by_email(&pool, "alice@example.com").await?;
/// assert_eq!(found.map(|u| u.id), Some(user.id));
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Well-known user roles
///
/// The role column is free text; these are the values the application
/// itself assigns. Roles are recorded, not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Renter filing maintenance requests (default at registration)
    Tenant,

    /// Property owner
    Landlord,

    /// Platform administrator
    Admin,
}

impl Role {
    /// Converts role to string for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Tenant => "tenant",
            Role::Landlord => "landlord",
            Role::Admin => "admin",
        }
    }

    /// Parses role from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "tenant" => Some(Role::Tenant),
            "landlord" => Some(Role::Landlord),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Tenant
    }
}

/// User model representing an account
///
/// `password_hash` holds an Argon2id PHC string and is never serialized.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Generated user ID
    pub id: i64,

    /// Display name
    pub full_name: String,

    /// Email address, unique across all users
    pub email: String,

    /// Stored credential (Argon2id hash)
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// Role name ("tenant", "admin", ...)
    pub role: String,

    /// Optional phone number
    pub phone: Option<String>,

    /// Optional gender
    pub gender: Option<String>,

    /// Optional date of birth, as entered
    pub dob: Option<String>,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Gets the parsed role, if it is one of the well-known values
    pub fn get_role(&self) -> Option<Role> {
        Role::from_str(&self.role)
    }
}

/// Input for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Display name
    pub full_name: String,

    /// Email address
    pub email: String,

    /// Argon2id password hash (NOT plaintext password!)
    pub password_hash: String,

    /// Role name
    pub role: String,

    /// Optional phone number
    pub phone: Option<String>,

    /// Optional gender
    pub gender: Option<String>,

    /// Optional date of birth
    pub dob: Option<String>,
}

const USER_COLUMNS: &str =
    "id, full_name, email, password_hash, role, phone, gender, dob, created_at";

impl User {
    /// Creates a new user in the database
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Email already exists (unique constraint `users_email_key`)
    /// - Database connection fails
    pub async fn create(pool: &PgPool, data: CreateUser) -> Result<Self, sqlx::Error> {
        let query = format!(
            r#"
            INSERT INTO users (full_name, email, password_hash, role, phone, gender, dob)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {USER_COLUMNS}
            "#
        );

        let user = sqlx::query_as::<_, User>(&query)
            .bind(data.full_name)
            .bind(data.email)
            .bind(data.password_hash)
            .bind(data.role)
            .bind(data.phone)
            .bind(data.gender)
            .bind(data.dob)
            .fetch_one(pool)
            .await?;

        Ok(user)
    }

    /// Finds a user by ID
    ///
    /// Returns `None` if no user has this ID.
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");

        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(user)
    }

    /// Finds a user by email address
    ///
    /// Email matching is exact.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use homehub_shared::models::user::User;
    /// # use sqlx::PgPool;
    /// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
    /// if let Some(user) = User::find_by_email(&pool, "alice@example.com").await? {
    ///     println!("Found user: {}", user.id);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");

        let user = sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await?;

        Ok(user)
    }
}
