//! API 路由模块
//!
//! 所有租户路由挂载在 `/api/tenants/{tenant}` 下，由 [`TenantScope`](crate::tenant::TenantScope)
//! 解析租户；响应统一使用 `ApiResponse` 包装。
//!
//! - [`health`] - 健康检查
//! - [`theme`] - 租户主题
//! - [`menu`] - 公共菜单 / 管理端目录视图
//! - [`categories`] - 分类管理接口
//! - [`menu_items`] - 菜品管理接口
//! - [`keywords`] - 搜索关键词生成
//! - [`settings`] - 餐厅设置
//! - [`events`] - 变更通知 (SSE)

pub mod categories;
pub mod events;
pub mod health;
pub mod keywords;
pub mod menu;
pub mod menu_items;
pub mod settings;
pub mod theme;

use std::time::Duration;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use serde::Deserialize;
use shared::message::ChangeAction;
use shared::models::SortOrderItem;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;
use crate::utils::{AppResult, ErrorCode};

/// Prefix of every tenant-scoped route
pub const TENANT_PREFIX: &str = "/api/tenants/{tenant}";

/// `{id}` path segment of entity routes
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct IdPath {
    pub id: i64,
}

/// Notify subscribers after an order write
///
/// A partial failure still changed some documents, so subscribers are told
/// to re-read (no data); a total failure changed nothing.
pub(crate) fn broadcast_order<T>(
    state: &ServerState,
    ns: &str,
    resource: &str,
    result: &AppResult<T>,
    items: &[SortOrderItem],
) {
    match result {
        Ok(_) => {
            state.broadcast_sync(ns, resource, ChangeAction::Reordered, "", Some(&items));
        }
        Err(e) if e.code == ErrorCode::ReorderPartialFailure => {
            state.broadcast_sync::<()>(ns, resource, ChangeAction::Reordered, "", None);
        }
        Err(_) => {}
    }
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(theme::router())
        .merge(menu::router())
        .merge(categories::router())
        .merge(menu_items::router())
        .merge(keywords::router())
        .merge(settings::router())
        .merge(events::router())
}

/// Build a fully configured application with middleware and state
///
/// Used by the HTTP server and by oneshot tests
pub fn build_app(state: &ServerState) -> Router {
    let timeout = Duration::from_millis(state.config.request_timeout_ms);
    build_router()
        .layer(DefaultBodyLimit::max(1024 * 1024)) // 1MB
        // Request timeout (SSE streams are long-lived responses, only the
        // handler future is bounded)
        .layer(TimeoutLayer::with_status_code(
            http::StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        // CORS - public menus are embedded on restaurant sites
        .layer(CorsLayer::permissive())
        // Trace - Request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone())
}
