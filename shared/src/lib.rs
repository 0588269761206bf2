//! Shared types for the menu catalog
//!
//! Common types used by the menu server and its clients: error codes and
//! response envelopes, catalog models, change notifications and id helpers.

pub mod error;
pub mod message;
pub mod models;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
pub use message::{ChangeAction, SyncPayload};
