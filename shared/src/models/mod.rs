//! Data models
//!
//! Shared between menu-server and its clients (public menu, admin panel).
//! Wire format is camelCase to match the persisted document shapes; ids are
//! snowflake `i64`, timestamps are epoch milliseconds.

pub mod category;
pub mod menu_item;
pub mod ordering;
pub mod serde_helpers;
pub mod settings;
pub mod tenant;

// Re-exports
pub use category::*;
pub use menu_item::*;
pub use ordering::*;
pub use settings::*;
pub use tenant::*;
