//! Care Client - client for the practice-management API
//!
//! Typed repositories over the REST backend, the session store, input
//! guards, headless screen logic and the conversation feed.

pub mod chat;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
#[cfg(feature = "in-process")]
pub mod http_oneshot;
pub mod logger;
pub mod repository;
pub mod session;
pub mod validation;
pub mod view;

pub use client::CareClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{ApiRequest, HttpClient, NetworkHttpClient, RawResponse};
#[cfg(feature = "in-process")]
pub use http_oneshot::OneshotHttpClient;
pub use session::{SessionData, SessionStorage, SessionStore};

// Re-export shared types for convenience
pub use shared::models;
pub use shared::{ApiErrorBody, LoginRequest, LoginResponse};
