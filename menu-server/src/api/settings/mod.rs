//! 餐厅设置 (每个租户一份)
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/tenants/{tenant}/settings | GET | 获取设置 (未保存时返回默认值) |
//! | /api/tenants/{tenant}/settings | PUT | 部分更新设置 |

use axum::{Json, Router, extract::State, routing::get};
use shared::message::ChangeAction;
use shared::models::{RestaurantSettings, RestaurantSettingsUpdate};

use crate::core::ServerState;
use crate::tenant::TenantScope;
use crate::utils::{ApiResponse, AppResult};

const RESOURCE: &str = "settings";

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/tenants/{tenant}/settings", get(get_settings).put(update_settings))
}

/// GET /api/tenants/{tenant}/settings - 获取餐厅设置
pub async fn get_settings(
    State(state): State<ServerState>,
    scope: TenantScope,
) -> AppResult<ApiResponse<RestaurantSettings>> {
    let settings = state.store.get_settings(scope.namespace()).await?;
    Ok(ApiResponse::success(settings))
}

/// PUT /api/tenants/{tenant}/settings - 更新餐厅设置
pub async fn update_settings(
    State(state): State<ServerState>,
    scope: TenantScope,
    Json(payload): Json<RestaurantSettingsUpdate>,
) -> AppResult<ApiResponse<RestaurantSettings>> {
    let ns = scope.namespace();
    let settings = state.store.update_settings(ns, payload).await?;

    state.broadcast_sync(ns, RESOURCE, ChangeAction::Updated, "", Some(&settings));
    Ok(ApiResponse::success(settings))
}
