//! Menu Item Model

use serde::{Deserialize, Serialize};

use super::serde_helpers;

/// Menu item entity
///
/// `sort_order` is only comparable between items sharing a `category_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub currency: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub image_id: String,
    pub category_id: i64,
    #[serde(default = "default_true", deserialize_with = "serde_helpers::bool_true")]
    pub is_visible: bool,
    #[serde(default = "default_true", deserialize_with = "serde_helpers::bool_true")]
    pub in_stock: bool,
    #[serde(default)]
    pub is_special: bool,
    /// Dietary / status markers ("vegan", "spicy", "new")
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub allergens: Vec<String>,
    /// Advisory lowercase keywords used by search
    #[serde(default)]
    pub search_keywords: Vec<String>,
    #[serde(rename = "order", default)]
    pub sort_order: i32,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

fn default_true() -> bool {
    true
}

/// Create menu item payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemCreate {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: f64,
    pub currency: Option<String>,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub image_id: String,
    /// Required; kept optional here so a missing field surfaces as a
    /// validation error instead of a JSON rejection
    pub category_id: Option<i64>,
    pub is_visible: Option<bool>,
    pub in_stock: Option<bool>,
    pub is_special: Option<bool>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub allergens: Vec<String>,
    #[serde(default)]
    pub search_keywords: Vec<String>,
    #[serde(rename = "order")]
    pub sort_order: Option<i32>,
    /// Ask the keyword assist for suggestions when `search_keywords` is empty
    #[serde(default)]
    pub generate_keywords: bool,
}

/// Update menu item payload (partial)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub image_url: Option<String>,
    pub image_id: Option<String>,
    pub category_id: Option<i64>,
    pub is_visible: Option<bool>,
    pub in_stock: Option<bool>,
    pub is_special: Option<bool>,
    pub tags: Option<Vec<String>>,
    pub allergens: Option<Vec<String>>,
    pub search_keywords: Option<Vec<String>>,
    #[serde(rename = "order")]
    pub sort_order: Option<i32>,
}

impl MenuItemUpdate {
    /// Partial update touching only the order field
    pub fn order(sort_order: i32) -> Self {
        Self {
            sort_order: Some(sort_order),
            ..Default::default()
        }
    }
}

/// Inline boolean flags the admin panel toggles in place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MenuItemFlag {
    IsVisible,
    InStock,
    IsSpecial,
}

impl MenuItemFlag {
    pub fn get(&self, item: &MenuItem) -> bool {
        match self {
            Self::IsVisible => item.is_visible,
            Self::InStock => item.in_stock,
            Self::IsSpecial => item.is_special,
        }
    }

    pub fn set(&self, item: &mut MenuItem, value: bool) {
        match self {
            Self::IsVisible => item.is_visible = value,
            Self::InStock => item.in_stock = value,
            Self::IsSpecial => item.is_special = value,
        }
    }

    /// Partial update writing `value` into this flag
    pub fn to_update(&self, value: bool) -> MenuItemUpdate {
        let mut update = MenuItemUpdate::default();
        match self {
            Self::IsVisible => update.is_visible = Some(value),
            Self::InStock => update.in_stock = Some(value),
            Self::IsSpecial => update.is_special = Some(value),
        }
        update
    }
}
