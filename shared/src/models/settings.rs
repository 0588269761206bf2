//! Restaurant Settings Model

use serde::{Deserialize, Serialize};

/// Currency used when neither the payload nor the tenant settings name one
pub const DEFAULT_CURRENCY: &str = "EUR";

/// Restaurant settings document (singleton per tenant)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct RestaurantSettings {
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub logo_url: Option<String>,
    pub updated_at: Option<i64>,
}

impl Default for RestaurantSettings {
    fn default() -> Self {
        Self {
            name: String::new(),
            currency: default_currency(),
            logo_url: None,
            updated_at: None,
        }
    }
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

/// Update settings payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantSettingsUpdate {
    pub name: Option<String>,
    pub currency: Option<String>,
    pub logo_url: Option<String>,
}
