//! # login-server
//!
//! HTTP adapter for the login service. All decision logic lives in
//! `login-core`; this crate only routes requests and maps core errors to
//! wire responses.

pub mod api;

pub use api::{create_router, AppState};
