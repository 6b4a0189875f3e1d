/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Registration and login
/// - `maintenance`: Maintenance request listing and status updates

pub mod auth;
pub mod health;
pub mod maintenance;
