//! # HomeHub API Server Library
//!
//! This library provides the core functionality for the HomeHub API server.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `extract`: Validated JSON body extraction
//! - `routes`: API route handlers
//! - `seed`: Bootstrap admin account

pub mod app;
pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod seed;
