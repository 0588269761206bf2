//! Tenant Registry

use std::collections::HashMap;
use std::path::Path;

use shared::models::{Tenant, Theme};

use crate::utils::{AppError, AppResult};

/// Result of a successful lookup
///
/// `namespace` scopes every catalog query; it is the canonical (lower-case)
/// tenant id.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTenant {
    pub namespace: String,
    pub tenant: Tenant,
}

impl ResolvedTenant {
    pub fn theme(&self) -> &Theme {
        &self.tenant.theme
    }
}

/// 租户注册表 - 只读查找表
///
/// Built once at startup, shared behind `Arc`. Lookups are case-insensitive
/// and ignore surrounding whitespace.
#[derive(Debug, Clone)]
pub struct TenantRegistry {
    tenants: HashMap<String, Tenant>,
}

impl TenantRegistry {
    pub fn new(tenants: impl IntoIterator<Item = Tenant>) -> Self {
        let tenants = tenants
            .into_iter()
            .map(|mut t| {
                t.id = canonical_id(&t.id);
                (t.id.clone(), t)
            })
            .collect();
        Self { tenants }
    }

    /// Built-in registry used when no tenants file is configured
    pub fn builtin() -> Self {
        Self::new([
            Tenant {
                id: "demo".to_string(),
                display_name: "Demo Restaurant".to_string(),
                theme: Theme::default(),
            },
            Tenant {
                id: "parrilla".to_string(),
                display_name: "La Parrilla".to_string(),
                theme: Theme {
                    primary_color: "#7f1d1d".to_string(),
                    accent_color: "#f59e0b".to_string(),
                    background_color: "#fffbeb".to_string(),
                    ..Theme::default()
                },
            },
        ])
    }

    /// Load the registry from a JSON array of tenants
    pub fn from_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::with_message(
                shared::ErrorCode::ConfigError,
                format!("Failed to read tenants file {}: {e}", path.display()),
            )
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> AppResult<Self> {
        let tenants: Vec<Tenant> = serde_json::from_str(raw).map_err(|e| {
            AppError::with_message(
                shared::ErrorCode::ConfigError,
                format!("Invalid tenants file: {e}"),
            )
        })?;
        if tenants.is_empty() {
            return Err(AppError::with_message(
                shared::ErrorCode::ConfigError,
                "Tenants file lists no tenants",
            ));
        }
        Ok(Self::new(tenants))
    }

    /// Resolve a tenant id; unknown ids are an error, never a default tenant
    pub fn resolve(&self, tenant_id: &str) -> AppResult<ResolvedTenant> {
        let key = canonical_id(tenant_id);
        self.tenants
            .get(&key)
            .map(|tenant| ResolvedTenant {
                namespace: key.clone(),
                tenant: tenant.clone(),
            })
            .ok_or_else(|| AppError::tenant_not_found(tenant_id.trim()))
    }

    /// Theme for UI purposes; unknown tenants get the default look
    pub fn theme_or_default(&self, tenant_id: &str) -> Theme {
        self.tenants
            .get(&canonical_id(tenant_id))
            .map(|t| t.theme.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.tenants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tenants.is_empty()
    }
}

fn canonical_id(id: &str) -> String {
    id.trim().to_lowercase()
}
