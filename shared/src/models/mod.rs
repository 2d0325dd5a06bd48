//! Data models
//!
//! Plain records as the backend serves them. The client never owns their
//! lifecycle: lists are fetched, patched after a successful mutation, and
//! dropped after a successful delete.
//! All IDs are `i64`.

pub mod category;
pub mod chat;
pub mod child;
pub mod consultation;
pub mod goal;
pub mod invoice;
pub mod location;
pub mod profile;
pub mod report;
pub mod user;

// Re-exports
pub use category::*;
pub use chat::*;
pub use child::*;
pub use consultation::*;
pub use goal::*;
pub use invoice::*;
pub use location::*;
pub use profile::*;
pub use report::*;
pub use user::*;
