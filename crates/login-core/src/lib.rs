//! # login-core
//!
//! Core registration and authentication logic for the login service.
//!
//! This crate provides:
//! - Credential format validation (`validation` module)
//! - Password hashing and JWT issuance/verification (`auth` module)
//! - Data models and response views (`models` module)
//! - The user store contract and its SQLite implementation (`store` module)
//! - The register/login orchestration (`service` module)
//! - Database bootstrap and migrations (`db` module)
//! - Unified error handling (`error` module)

pub mod auth;
pub mod clock;
pub mod db;
pub mod error;
pub mod models;
pub mod service;
pub mod store;
pub mod validation;

// Re-exports for convenience
pub use auth::TokenService;
pub use clock::{Clock, SystemClock};
pub use db::Database;
pub use error::{Error, Result};
pub use models::{Claims, Phone, PhoneRequest, RegisterRequest, User, UserResponse};
pub use service::UserService;
pub use store::{SqliteUserStore, UserStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
