//! Shared types for the shop platform
//!
//! Common types used across crates: the unified error system, API response
//! and pagination structures, and domain status models.

pub mod error;
pub mod models;
pub mod response;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};
