//! # HomeHub Shared Library
//!
//! Types, persistence and auth primitives used by the HomeHub API server.
//!
//! ## Module Organization
//!
//! - `models`: Row types and sqlx queries
//! - `store`: Repository trait with PostgreSQL and in-memory backends
//! - `db`: Connection pool and schema setup
//! - `auth`: Password hashing, JWT tokens, bearer extraction

pub mod auth;
pub mod db;
pub mod models;
pub mod store;

/// Current version of the HomeHub shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
