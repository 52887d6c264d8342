// src/core/mod.rs
//! Backend HTTP access

pub mod api_client;

pub use api_client::{ApiClient, ApiError};
