//! 租户主题
//!
//! 未知租户返回默认主题 (仅限 UI 外观；数据路由仍返回 404)

use axum::{
    Router,
    extract::{Path, State},
    routing::get,
};
use serde::Serialize;
use shared::models::Theme;

use crate::core::ServerState;
use crate::utils::{ApiResponse, AppResult};

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/tenants/{tenant}/theme", get(get_theme))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeResponse {
    /// 规范化租户 ID (未知租户为 None)
    pub tenant_id: Option<String>,
    pub display_name: Option<String>,
    pub theme: Theme,
    /// 是否为默认主题回退
    pub is_default: bool,
}

/// GET /api/tenants/{tenant}/theme - 获取租户主题
pub async fn get_theme(
    State(state): State<ServerState>,
    Path(tenant): Path<String>,
) -> AppResult<ApiResponse<ThemeResponse>> {
    let response = match state.tenants.resolve(&tenant) {
        Ok(resolved) => ThemeResponse {
            tenant_id: Some(resolved.namespace.clone()),
            display_name: Some(resolved.tenant.display_name.clone()),
            theme: resolved.theme().clone(),
            is_default: false,
        },
        Err(_) => {
            tracing::debug!(tenant = %tenant, "Unknown tenant, serving default theme");
            ThemeResponse {
                tenant_id: None,
                display_name: None,
                theme: state.tenants.theme_or_default(&tenant),
                is_default: true,
            }
        }
    };
    Ok(ApiResponse::success(response))
}
