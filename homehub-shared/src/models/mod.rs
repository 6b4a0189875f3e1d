/// Database models for HomeHub
///
/// This module contains the row types for every table and the sqlx queries
/// that read and write them. Handlers do not call these directly; they go
/// through the [`Store`](crate::store::Store) trait.
///
/// # Models
///
/// - `user`: Accounts (tenants, landlords, admins)
/// - `property`: Listings owned by a user
/// - `maintenance`: Maintenance requests filed by tenants against properties

pub mod maintenance;
pub mod property;
pub mod user;
