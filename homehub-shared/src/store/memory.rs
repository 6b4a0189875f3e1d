/// In-process store
///
/// Keeps every table in memory behind a single `RwLock`, so each operation is
/// atomic with respect to the others. Enforces the same invariants as the
/// PostgreSQL schema: unique emails and existing foreign keys. Data is lost
/// when the process exits.
///
/// # Example
///
/// ```
/// use homehub_shared::store::{MemoryStore, Store, StoreError};
///
/// # async fn example() {
/// let store = MemoryStore::new();
/// let err = store.find_maintenance_request_by_id(1).await.unwrap_err();
/// assert!(matches!(err, StoreError::NotFound { .. }));
/// # }
/// ```

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{Store, StoreError, StoreResult};
use crate::models::{
    maintenance::{
        CreateMaintenanceRequest, MaintenanceRequest, MaintenanceRequestDetails,
        MaintenanceStatus,
    },
    property::{CreateProperty, Property, PropertyStatus},
    user::{CreateUser, User},
};

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    properties: BTreeMap<i64, Property>,
    requests: BTreeMap<i64, MaintenanceRequest>,
    next_id: i64,
}

impl Tables {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Store holding all rows in process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a maintenance request row as-is, bypassing foreign key checks
    ///
    /// Mirrors rows left behind by deletes outside this service, which the
    /// listing must still render.
    pub async fn insert_orphaned_request(&self, mut request: MaintenanceRequest) -> MaintenanceRequest {
        let mut tables = self.tables.write().await;
        request.id = tables.allocate_id();
        tables.requests.insert(request.id, request.clone());
        request
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_user(&self, data: CreateUser) -> StoreResult<User> {
        let mut tables = self.tables.write().await;

        if tables.users.values().any(|u| u.email == data.email) {
            return Err(StoreError::DuplicateEmail);
        }

        let user = User {
            id: tables.allocate_id(),
            full_name: data.full_name,
            email: data.email,
            password_hash: data.password_hash,
            role: data.role,
            phone: data.phone,
            gender: data.gender,
            dob: data.dob,
            created_at: Utc::now(),
        };
        tables.users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: i64) -> StoreResult<User> {
        let tables = self.tables.read().await;
        tables
            .users
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("user", id))
    }

    async fn create_property(&self, data: CreateProperty) -> StoreResult<Property> {
        let mut tables = self.tables.write().await;

        if !tables.users.contains_key(&data.owner_id) {
            return Err(StoreError::MissingReference(format!(
                "owner {}",
                data.owner_id
            )));
        }

        let property = Property {
            id: tables.allocate_id(),
            owner_id: data.owner_id,
            title: data.title,
            location: data.location,
            price: data.price,
            status: PropertyStatus::UnderReview.as_str().to_string(),
            created_at: Utc::now(),
        };
        tables.properties.insert(property.id, property.clone());

        Ok(property)
    }

    async fn find_property_by_id(&self, id: i64) -> StoreResult<Property> {
        let tables = self.tables.read().await;
        tables
            .properties
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("property", id))
    }

    async fn create_maintenance_request(
        &self,
        data: CreateMaintenanceRequest,
    ) -> StoreResult<MaintenanceRequest> {
        let mut tables = self.tables.write().await;

        if !tables.properties.contains_key(&data.property_id) {
            return Err(StoreError::MissingReference(format!(
                "property {}",
                data.property_id
            )));
        }
        if !tables.users.contains_key(&data.tenant_id) {
            return Err(StoreError::MissingReference(format!(
                "tenant {}",
                data.tenant_id
            )));
        }

        let request = MaintenanceRequest {
            id: tables.allocate_id(),
            property_id: data.property_id,
            tenant_id: data.tenant_id,
            title: data.title,
            description: data.description,
            priority: data.priority.as_str().to_string(),
            status: MaintenanceStatus::Pending.as_str().to_string(),
            created_at: Utc::now(),
        };
        tables.requests.insert(request.id, request.clone());

        Ok(request)
    }

    async fn list_maintenance_requests(&self) -> StoreResult<Vec<MaintenanceRequestDetails>> {
        let tables = self.tables.read().await;

        let details = tables
            .requests
            .values()
            .map(|request| MaintenanceRequestDetails {
                property_title: tables
                    .properties
                    .get(&request.property_id)
                    .map(|p| p.title.clone()),
                tenant_name: tables
                    .users
                    .get(&request.tenant_id)
                    .map(|u| u.full_name.clone()),
                request: request.clone(),
            })
            .collect();

        Ok(details)
    }

    async fn find_maintenance_request_by_id(&self, id: i64) -> StoreResult<MaintenanceRequest> {
        let tables = self.tables.read().await;
        tables
            .requests
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("maintenance request", id))
    }

    async fn update_maintenance_request_status(
        &self,
        id: i64,
        status: &str,
    ) -> StoreResult<MaintenanceRequest> {
        let mut tables = self.tables.write().await;

        let request = tables
            .requests
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("maintenance request", id))?;
        request.status = status.to_string();

        Ok(request.clone())
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
