//! Manual ordering payloads

use serde::{Deserialize, Serialize};

/// Which collection an ordering request addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogKind {
    Category,
    MenuItem,
}

impl CatalogKind {
    /// Resource name used in change notifications
    pub fn resource(&self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::MenuItem => "menu_item",
        }
    }
}

/// One `{id, order}` pair of a batch order update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrderItem {
    pub id: i64,
    #[serde(rename = "order")]
    pub sort_order: i32,
}

/// Batch order update request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSortOrderRequest {
    pub items: Vec<SortOrderItem>,
}

/// Drag gesture: move `source_id` to the position currently held by `target_id`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderRequest {
    pub source_id: i64,
    pub target_id: i64,
}
