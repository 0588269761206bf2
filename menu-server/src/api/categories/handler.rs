//! Category API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::message::ChangeAction;
use shared::models::{
    BatchSortOrderRequest, CatalogKind, Category, CategoryCreate, CategoryUpdate, ReorderRequest,
};

use crate::api::{IdPath, broadcast_order};
use crate::core::ServerState;
use crate::reorder::{self, order_items, persist_order};
use crate::tenant::TenantScope;
use crate::utils::{ApiResponse, AppResult};

const RESOURCE: &str = "category";

/// GET /api/tenants/{tenant}/categories - 获取所有分类
pub async fn list(
    State(state): State<ServerState>,
    scope: TenantScope,
) -> AppResult<ApiResponse<Vec<Category>>> {
    let categories = state.store.list_categories(scope.namespace()).await?;
    Ok(ApiResponse::success(categories))
}

/// GET /api/tenants/{tenant}/categories/{id} - 获取单个分类
pub async fn get_by_id(
    State(state): State<ServerState>,
    scope: TenantScope,
    Path(IdPath { id }): Path<IdPath>,
) -> AppResult<ApiResponse<Category>> {
    let category = state.store.get_category(scope.namespace(), id).await?;
    Ok(ApiResponse::success(category))
}

/// POST /api/tenants/{tenant}/categories - 创建分类
pub async fn create(
    State(state): State<ServerState>,
    scope: TenantScope,
    Json(payload): Json<CategoryCreate>,
) -> AppResult<ApiResponse<Category>> {
    let ns = scope.namespace();
    let category = state.store.create_category(ns, payload).await?;

    // 广播同步通知
    state.broadcast_sync(
        ns,
        RESOURCE,
        ChangeAction::Created,
        &category.id.to_string(),
        Some(&category),
    );
    Ok(ApiResponse::success(category))
}

/// PUT /api/tenants/{tenant}/categories/{id} - 部分更新分类
pub async fn update(
    State(state): State<ServerState>,
    scope: TenantScope,
    Path(IdPath { id }): Path<IdPath>,
    Json(payload): Json<CategoryUpdate>,
) -> AppResult<ApiResponse<Category>> {
    let ns = scope.namespace();
    let category = state.store.update_category(ns, id, payload).await?;

    state.broadcast_sync(
        ns,
        RESOURCE,
        ChangeAction::Updated,
        &id.to_string(),
        Some(&category),
    );
    Ok(ApiResponse::success(category))
}

/// DELETE /api/tenants/{tenant}/categories/{id} - 删除分类
///
/// 有子分类时拒绝删除；分类下的菜品保留 (成为孤立菜品)
pub async fn delete(
    State(state): State<ServerState>,
    scope: TenantScope,
    Path(IdPath { id }): Path<IdPath>,
) -> AppResult<ApiResponse<()>> {
    let ns = scope.namespace();
    state.store.delete_category(ns, id).await?;

    state.broadcast_sync::<()>(ns, RESOURCE, ChangeAction::Deleted, &id.to_string(), None);
    Ok(ApiResponse::ok())
}

/// PUT /api/tenants/{tenant}/categories/sort-order - 批量更新排序
pub async fn batch_update_sort_order(
    State(state): State<ServerState>,
    scope: TenantScope,
    Json(payload): Json<BatchSortOrderRequest>,
) -> AppResult<ApiResponse<()>> {
    let ns = scope.namespace();
    tracing::info!(
        tenant = %ns,
        count = payload.items.len(),
        "Batch update category sort order request received"
    );

    let result = persist_order(
        state.store.as_ref(),
        ns,
        CatalogKind::Category,
        &payload.items,
    )
    .await;
    broadcast_order(&state, ns, RESOURCE, &result, &payload.items);
    result?;
    Ok(ApiResponse::ok())
}

/// POST /api/tenants/{tenant}/categories/reorder - 拖拽移动
///
/// 将 `sourceId` 移动到 `targetId` 当前所在位置，返回同级分类的新顺序
pub async fn reorder(
    State(state): State<ServerState>,
    scope: TenantScope,
    Json(payload): Json<ReorderRequest>,
) -> AppResult<ApiResponse<Vec<Category>>> {
    let ns = scope.namespace();
    let result = reorder::reorder::<Category>(
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
