/// Repository layer
///
/// The [`Store`] trait is the only way the API layer touches persisted data.
/// It returns plain records and resolves relations explicitly instead of
/// handing out objects that load lazily.
///
/// # Implementations
///
/// - [`PgStore`]: PostgreSQL via sqlx; constraints enforce integrity
/// - [`MemoryStore`]: in-process tables with the same invariants, used by
///   tests and local runs
///
/// # Example
///
/// ```
/// use homehub_shared::store::{MemoryStore, Store};
/// use homehub_shared::models::user::CreateUser;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = MemoryStore::new();
///
/// let user = store
///     .create_user(CreateUser {
///         full_name: "Alice".to_string(),
///         email: "a@x.com".to_string(),
///         password_hash: "$argon2id$...".to_string(),
///         role: "tenant".to_string(),
///         phone: None,
///         gender: None,
///         dob: None,
///     })
///     .await?;
///
/// assert!(store.find_user_by_email("a@x.com").await?.is_some());
/// assert_eq!(store.find_user_by_id(user.id).await?.full_name, "Alice");
/// # Ok(())
/// # }
/// ```

use async_trait::async_trait;

use crate::models::{
    maintenance::{CreateMaintenanceRequest, MaintenanceRequest, MaintenanceRequestDetails},
    property::{CreateProperty, Property},
    user::{CreateUser, User},
};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Lookup by ID found no row
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// Email is already registered
    #[error("Email already exists")]
    DuplicateEmail,

    /// A foreign key points at a row that does not exist
    #[error("Referenced row does not exist: {0}")]
    MissingReference(String),

    /// Underlying database failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Shorthand for a `NotFound` error
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        StoreError::NotFound { entity, id }
    }
}

/// Store result type alias
pub type StoreResult<T> = Result<T, StoreError>;

/// Repository over users, properties and maintenance requests
///
/// Every write is atomic and visible to the next read. Lookups by ID return
/// [`StoreError::NotFound`] when no row matches.
#[async_trait]
pub trait Store: Send + Sync {
    /// Creates a user; fails with [`StoreError::DuplicateEmail`] if the email
    /// is taken
    async fn create_user(&self, data: CreateUser) -> StoreResult<User>;

    /// Finds a user by exact email
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// Finds a user by ID
    async fn find_user_by_id(&self, id: i64) -> StoreResult<User>;

    /// Creates a property owned by an existing user
    async fn create_property(&self, data: CreateProperty) -> StoreResult<Property>;

    /// Finds a property by ID
    async fn find_property_by_id(&self, id: i64) -> StoreResult<Property>;

    /// Files a maintenance request against an existing property and tenant
    async fn create_maintenance_request(
        &self,
        data: CreateMaintenanceRequest,
    ) -> StoreResult<MaintenanceRequest>;

    /// Lists every maintenance request, ordered by ID, with the property
    /// title and tenant name resolved
    async fn list_maintenance_requests(&self) -> StoreResult<Vec<MaintenanceRequestDetails>>;

    /// Finds a maintenance request by ID
    async fn find_maintenance_request_by_id(&self, id: i64) -> StoreResult<MaintenanceRequest>;

    /// Sets the status of a maintenance request and returns the updated row
    async fn update_maintenance_request_status(
        &self,
        id: i64,
        status: &str,
    ) -> StoreResult<MaintenanceRequest>;

    /// Checks that the backing storage is reachable
    async fn ping(&self) -> StoreResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let err = StoreError::not_found("maintenance request", 42);
        assert_eq!(err.to_string(), "maintenance request 42 not found");

        assert_eq!(StoreError::DuplicateEmail.to_string(), "Email already exists");
    }
}
