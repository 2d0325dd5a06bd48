//! Shared types for the practice-management client
//!
//! Wire models for every backend resource, the request/response DTOs of
//! the auth endpoint and the error body shape returned by the API.
//! Field names follow the backend's camelCase JSON.

pub mod client;
pub mod models;
pub mod response;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use client::{LoginRequest, LoginResponse};
pub use response::ApiErrorBody;
