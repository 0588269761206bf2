//! Tenant Model

use serde::{Deserialize, Serialize};

/// A restaurant namespace; all catalog data is scoped under `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub theme: Theme,
}

/// UI theme parameters for the public menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub primary_color: String,
    pub accent_color: String,
    pub background_color: String,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub features: ThemeFeatures,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_color: "#1f2937".to_string(),
            accent_color: "#b45309".to_string(),
            background_color: "#fafaf9".to_string(),
            logo_url: None,
            features: ThemeFeatures::default(),
        }
    }
}

/// Feature toggles of the public menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemeFeatures {
    pub show_prices: bool,
    pub show_allergens: bool,
    pub show_specials: bool,
    pub search_enabled: bool,
}

impl Default for ThemeFeatures {
    fn default() -> Self {
        Self {
            show_prices: true,
            show_allergens: true,
            show_specials: true,
            search_enabled: true,
        }
    }
}
