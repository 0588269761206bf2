//! Tenant Extractor
//!
//! Resolves the `{tenant}` segment of every tenant-scoped route

use std::collections::HashMap;

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use super::ResolvedTenant;
use crate::core::ServerState;
use crate::utils::AppError;

/// Resolved tenant of the current request
///
/// Unknown tenants are rejected with 404 before the handler runs.
#[derive(Debug, Clone)]
pub struct TenantScope(pub ResolvedTenant);

impl TenantScope {
    pub fn namespace(&self) -> &str {
        &self.0.namespace
    }
}

impl FromRequestParts<ServerState> for TenantScope {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(scope) = parts.extensions.get::<TenantScope>() {
            return Ok(scope.clone());
        }

        let Path(params) = Path::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::invalid_request(e.body_text()))?;
        let raw = params
            .get("tenant")
            .ok_or_else(|| AppError::invalid_request("Missing tenant path segment"))?;

        let scope = TenantScope(state.tenants.resolve(raw)?);
        parts.extensions.insert(scope.clone());
        Ok(scope)
    }
}
