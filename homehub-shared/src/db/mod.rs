/// Database layer for HomeHub
///
/// # Modules
///
/// - `pool`: PostgreSQL connection pool with health checks
/// - `migrations`: Initial schema runner
///
/// Row types and queries live in [`crate::models`].

pub mod migrations;
pub mod pool;
