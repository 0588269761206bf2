//! Menu Item API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::message::ChangeAction;
use shared::models::{
    BatchSortOrderRequest, CatalogKind, MenuItem, MenuItemCreate, MenuItemUpdate, ReorderRequest,
};

use crate::api::{IdPath, broadcast_order};
use crate::assist::fill_keywords;
use crate::core::ServerState;
use crate::reorder::{self, order_items, persist_order};
use crate::tenant::TenantScope;
use crate::utils::{ApiResponse, AppResult};

const RESOURCE: &str = "menu_item";

/// GET /api/tenants/{tenant}/menu-items - 获取所有菜品
pub async fn list(
    State(state): State<ServerState>,
    scope: TenantScope,
) -> AppResult<ApiResponse<Vec<MenuItem>>> {
    let items = state.store.list_menu_items(scope.namespace()).await?;
    Ok(ApiResponse::success(items))
}

/// GET /api/tenants/{tenant}/menu-items/{id} - 获取单个菜品
pub async fn get_by_id(
    State(state): State<ServerState>,
    scope: TenantScope,
    Path(IdPath { id }): Path<IdPath>,
) -> AppResult<ApiResponse<MenuItem>> {
    let item = state.store.get_menu_item(scope.namespace(), id).await?;
    Ok(ApiResponse::success(item))
}

/// POST /api/tenants/{tenant}/menu-items - 创建菜品
///
/// `generateKeywords: true` 且未提供关键词时调用关键词生成；生成失败不影响创建
pub async fn create(
    State(state): State<ServerState>,
    scope: TenantScope,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<ApiResponse<MenuItem>> {
    let ns = scope.namespace();
    let payload = fill_keywords(state.keywords.as_ref(), state.store.as_ref(), ns, payload).await;
    let item = state.store.create_menu_item(ns, payload).await?;

    state.broadcast_sync(
        ns,
        RESOURCE,
        ChangeAction::Created,
        &item.id.to_string(),
        Some(&item),
    );
    Ok(ApiResponse::success(item))
}

/// PUT /api/tenants/{tenant}/menu-items/{id} - 部分更新菜品
pub async fn update(
    State(state): State<ServerState>,
    scope: TenantScope,
    Path(IdPath { id }): Path<IdPath>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<ApiResponse<MenuItem>> {
    let ns = scope.namespace();
    let item = state.store.update_menu_item(ns, id, payload).await?;

    state.broadcast_sync(
        ns,
        RESOURCE,
        ChangeAction::Updated,
        &id.to_string(),
        Some(&item),
    );
    Ok(ApiResponse::success(item))
}

/// DELETE /api/tenants/{tenant}/menu-items/{id} - 删除菜品
pub async fn delete(
    State(state): State<ServerState>,
    scope: TenantScope,
    Path(IdPath { id }): Path<IdPath>,
) -> AppResult<ApiResponse<()>> {
    let ns = scope.namespace();
    state.store.delete_menu_item(ns, id).await?;

    state.broadcast_sync::<()>(ns, RESOURCE, ChangeAction::Deleted, &id.to_string(), None);
    Ok(ApiResponse::ok())
}

/// PUT /api/tenants/{tenant}/menu-items/sort-order - 批量更新排序
pub async fn batch_update_sort_order(
    State(state): State<ServerState>,
    scope: TenantScope,
    Json(payload): Json<BatchSortOrderRequest>,
) -> AppResult<ApiResponse<()>> {
    let ns = scope.namespace();
    tracing::info!(
        tenant = %ns,
        count = payload.items.len(),
        "Batch update menu item sort order request received"
    );

    let result = persist_order(
        state.store.as_ref(),
        ns,
        CatalogKind::MenuItem,
        &payload.items,
    )
    .await;
    broadcast_order(&state, ns, RESOURCE, &result, &payload.items);
    result?;
    Ok(ApiResponse::ok())
}

/// POST /api/tenants/{tenant}/menu-items/reorder - 拖拽移动 (同一分类内)
pub async fn reorder(
    State(state): State<ServerState>,
    scope: TenantScope,
    Json(payload): Json<ReorderRequest>,
) -> AppResult<ApiResponse<Vec<MenuItem>>> {
    let ns = scope.namespace();
    let result = reorder::reorder::<MenuItem>(
        state.store.as_ref(),
        ns,
        payload.source_id,
        payload.target_id,
    )
    .await;

    let items = result.as_deref().map(order_items).unwrap_or_default();
    broadcast_order(&state, ns, RESOURCE, &result, &items);
    Ok(ApiResponse::success(result?))
}
