//! Catalog view handlers

use axum::extract::{Query, State};
use serde::Serialize;
use shared::models::{Category, RestaurantSettings, Theme};

use crate::catalog::{Audience, CatalogView, CategoryTree, ViewFilter, project};
use crate::core::ServerState;
use crate::tenant::TenantScope;
use crate::utils::{ApiResponse, AppResult};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicMenu {
    pub tenant_id: String,
    pub display_name: String,
    pub theme: Theme,
    pub settings: RestaurantSettings,
    #[serde(flatten)]
    pub view: CatalogView,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminCatalog {
    /// Every category in display order (roots followed by their children)
    pub categories: Vec<Category>,
    #[serde(flatten)]
    pub view: CatalogView,
}

/// GET /api/tenants/{tenant}/menu - 公共菜单
///
/// Query: `category`, `search`, `sort`, `parent`
pub async fn public_menu(
    State(state): State<ServerState>,
    TenantScope(tenant): TenantScope,
    Query(filter): Query<ViewFilter>,
) -> AppResult<ApiResponse<PublicMenu>> {
    let ns = tenant.namespace.as_str();
    let (categories, items, settings) = tokio::try_join!(
        state.store.list_categories(ns),
        state.store.list_menu_items(ns),
        state.store.get_settings(ns),
    )?;

    let view = project(&categories, &items, &filter, Audience::Public);
    Ok(ApiResponse::success(PublicMenu {
        tenant_id: tenant.namespace.clone(),
        display_name: tenant.tenant.display_name.clone(),
        theme: tenant.theme().clone(),
        settings,
        view,
    }))
}

/// GET /api/tenants/{tenant}/admin/catalog - 管理端目录视图
///
/// Query: `category`, `search`, `sort`, `parent`, `includeHidden`
pub async fn admin_catalog(
    State(state): State<ServerState>,
    scope: TenantScope,
    Query(filter): Query<ViewFilter>,
) -> AppResult<ApiResponse<AdminCatalog>> {
    let ns = scope.namespace();
    let (categories, items) = tokio::try_join!(
        state.store.list_categories(ns),
        state.store.list_menu_items(ns),
    )?;

    let view = project(&categories, &items, &filter, Audience::Admin);
    let ordered = CategoryTree::build(&categories)
        .display_order()
        .into_iter()
        .cloned()
        .collect();
    Ok(ApiResponse::success(AdminCatalog {
        categories: ordered,
        view,
    }))
}
