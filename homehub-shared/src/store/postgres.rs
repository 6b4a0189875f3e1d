/// PostgreSQL-backed store
///
/// Delegates to the query functions in [`crate::models`] and translates
/// constraint violations into [`StoreError`] variants. Concurrent writers are
/// serialized by PostgreSQL itself.
///
/// # Example
///
/// ```no_run
/// use homehub_shared::db::pool::{create_pool, DatabaseConfig};
/// use homehub_shared::store::{PgStore, Store};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig {
///     url: std::env::var("DATABASE_URL")?,
///     ..Default::default()
/// })
/// .await?;
///
/// let store = PgStore::new(pool);
/// let requests = store.list_maintenance_requests().await?;
/// println!("{} open requests", requests.len());
/// # Ok(())
/// # }
/// ```

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use super::{Store, StoreError, StoreResult};
use crate::db::pool::health_check;
use crate::models::{
    maintenance::{CreateMaintenanceRequest, MaintenanceRequest, MaintenanceRequestDetails},
    property::{CreateProperty, Property},
    user::{CreateUser, User},
};

/// SQLSTATE for unique_violation
const UNIQUE_VIOLATION: &str = "23505";

/// SQLSTATE for foreign_key_violation
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Store backed by a PostgreSQL connection pool
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wraps an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets the underlying pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Maps constraint violations onto store errors
fn map_write_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        match db_err.code().as_deref() {
            Some(UNIQUE_VIOLATION)
                if db_err
                    .constraint()
                    .map_or(true, |constraint| constraint.contains("email")) =>
            {
                return StoreError::DuplicateEmail;
            }
            Some(FOREIGN_KEY_VIOLATION) => {
                return StoreError::MissingReference(
                    db_err
                        .constraint()
                        .unwrap_or("foreign key")
                        .to_string(),
                );
            }
            _ => {}
        }
    }

    StoreError::Database(err)
}

#[async_trait]
impl Store for PgStore {
    async fn create_user(&self, data: CreateUser) -> StoreResult<User> {
        let user = User::create(&self.pool, data)
            .await
            .map_err(map_write_error)?;

        debug!(user_id = user.id, "Inserted user");
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(User::find_by_email(&self.pool, email).await?)
    }

    async fn find_user_by_id(&self, id: i64) -> StoreResult<User> {
        User::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| StoreError::not_found("user", id))
    }

    async fn create_property(&self, data: CreateProperty) -> StoreResult<Property> {
        let property = Property::create(&self.pool, data)
            .await
            .map_err(map_write_error)?;

        debug!(property_id = property.id, owner_id = property.owner_id, "Inserted property");
        Ok(property)
    }

    async fn find_property_by_id(&self, id: i64) -> StoreResult<Property> {
        Property::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| StoreError::not_found("property", id))
    }

    async fn create_maintenance_request(
        &self,
        data: CreateMaintenanceRequest,
    ) -> StoreResult<MaintenanceRequest> {
        let request = MaintenanceRequest::create(&self.pool, data)
            .await
            .map_err(map_write_error)?;

        debug!(request_id = request.id, "Inserted maintenance request");
        Ok(request)
    }

    async fn list_maintenance_requests(&self) -> StoreResult<Vec<MaintenanceRequestDetails>> {
        Ok(MaintenanceRequest::list_with_details(&self.pool).await?)
    }

    async fn find_maintenance_request_by_id(&self, id: i64) -> StoreResult<MaintenanceRequest> {
        MaintenanceRequest::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| StoreError::not_found("maintenance request", id))
    }

    async fn update_maintenance_request_status(
        &self,
        id: i64,
        status: &str,
    ) -> StoreResult<MaintenanceRequest> {
        MaintenanceRequest::update_status(&self.pool, id, status)
            .await
            .map_err(map_write_error)?
            .ok_or_else(|| StoreError::not_found("maintenance request", id))
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(health_check(&self.pool).await?)
    }
}
