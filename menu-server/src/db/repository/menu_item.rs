//! Menu Item Repository
//!
//! List columns (`tags`, `allergens`, `search_keywords`) are stored as JSON
//! arrays in TEXT columns.

use super::{RepoError, RepoResult};
use shared::models::{MenuItem, MenuItemUpdate};
use sqlx::types::Json;
use sqlx::{FromRow, SqlitePool};

const COLUMNS: &str = "id, name, description, price, currency, image_url, image_id, category_id, \
     is_visible, in_stock, is_special, tags, allergens, search_keywords, sort_order, created_at, updated_at";

#[derive(Debug, FromRow)]
struct MenuItemRow {
    id: i64,
    name: String,
    description: String,
    price: f64,
    currency: String,
    image_url: String,
    image_id: String,
    category_id: i64,
    is_visible: bool,
    in_stock: bool,
    is_special: bool,
    tags: Json<Vec<String>>,
    allergens: Json<Vec<String>>,
    search_keywords: Json<Vec<String>>,
    sort_order: i32,
    created_at: i64,
    updated_at: i64,
}

impl From<MenuItemRow> for MenuItem {
    fn from(row: MenuItemRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            price: row.price,
            currency: row.currency,
            image_url: row.image_url,
            image_id: row.image_id,
            category_id: row.category_id,
            is_visible: row.is_visible,
            in_stock: row.in_stock,
            is_special: row.is_special,
            tags: row.tags.0,
            allergens: row.allergens.0,
            search_keywords: row.search_keywords.0,
            sort_order: row.sort_order,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// All menu items of a tenant, pre-sorted by order
pub async fn find_all(pool: &SqlitePool, tenant: &str) -> RepoResult<Vec<MenuItem>> {
    let sql = format!(
        "SELECT {COLUMNS} FROM menu_items WHERE tenant_id = ? ORDER BY sort_order, name COLLATE NOCASE, id"
    );
    let rows = sqlx::query_as::<_, MenuItemRow>(&sql)
        .bind(tenant)
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(MenuItem::from).collect())
}

pub async fn find_by_id(pool: &SqlitePool, tenant: &str, id: i64) -> RepoResult<Option<MenuItem>> {
    let sql = format!("SELECT {COLUMNS} FROM menu_items WHERE tenant_id = ? AND id = ?");
    let row = sqlx::query_as::<_, MenuItemRow>(&sql)
        .bind(tenant)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(MenuItem::from))
}

pub async fn find_by_category(
    pool: &SqlitePool,
    tenant: &str,
    category_id: i64,
) -> RepoResult<Vec<MenuItem>> {
    let sql = format!(
        "SELECT {COLUMNS} FROM menu_items WHERE tenant_id = ? AND category_id = ? ORDER BY sort_order, id"
    );
    let rows = sqlx::query_as::<_, MenuItemRow>(&sql)
        .bind(tenant)
        .bind(category_id)
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(MenuItem::from).collect())
}

pub async fn insert(pool: &SqlitePool, tenant: &str, item: &MenuItem) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO menu_items (id, tenant_id, name, description, price, currency, image_url, image_id, category_id, is_visible, in_stock, is_special, tags, allergens, search_keywords, sort_order, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(item.id)
    .bind(tenant)
    .bind(&item.name)
    .bind(&item.description)
    .bind(item.price)
    .bind(&item.currency)
    .bind(&item.image_url)
    .bind(&item.image_id)
    .bind(item.category_id)
    .bind(item.is_visible)
    .bind(item.in_stock)
    .bind(item.is_special)
    .bind(Json(&item.tags))
    .bind(Json(&item.allergens))
    .bind(Json(&item.search_keywords))
    .bind(item.sort_order)
    .bind(item.created_at)
    .bind(item.updated_at)
    .execute(pool)
    .await?;
    Ok(())
}

/// Partial update; absent fields keep their value
pub async fn update(
    pool: &SqlitePool,
    tenant: &str,
    id: i64,
    data: &MenuItemUpdate,
    now: i64,
) -> RepoResult<MenuItem> {
    let rows = sqlx::query(
        "UPDATE menu_items SET \
           name = COALESCE(?1, name), \
           description = COALESCE(?2, description), \
           price = COALESCE(?3, price), \
           currency = COALESCE(?4, currency), \
           image_url = COALESCE(?5, image_url), \
           image_id = COALESCE(?6, image_id), \
           category_id = COALESCE(?7, category_id), \
           is_visible = COALESCE(?8, is_visible), \
           in_stock = COALESCE(?9, in_stock), \
           is_special = COALESCE(?10, is_special), \
           tags = COALESCE(?11, tags), \
           allergens = COALESCE(?12, allergens), \
           search_keywords = COALESCE(?13, search_keywords), \
           sort_order = COALESCE(?14, sort_order), \
           updated_at = ?15 \
         WHERE tenant_id = ?16 AND id = ?17",
    )
    .bind(data.name.as_deref().map(str::trim))
    .bind(data.description.as_deref())
    .bind(data.price)
    .bind(data.currency.as_deref())
    .bind(data.image_url.as_deref())
    .bind(data.image_id.as_deref())
    .bind(data.category_id)
    .bind(data.is_visible)
    .bind(data.in_stock)
    .bind(data.is_special)
    .bind(data.tags.as_ref().map(Json))
    .bind(data.allergens.as_ref().map(Json))
    .bind(data.search_keywords.as_ref().map(Json))
    .bind(data.sort_order)
    .bind(now)
    .bind(tenant)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Menu item {id} not found")));
    }
    find_by_id(pool, tenant, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to read back updated menu item".into()))
}

pub async fn update_sort_order(
    pool: &SqlitePool,
    tenant: &str,
    id: i64,
    sort_order: i32,
    now: i64,
) -> RepoResult<()> {
    let rows = sqlx::query(
        "UPDATE menu_items SET sort_order = ?, updated_at = ? WHERE tenant_id = ? AND id = ?",
    )
    .bind(sort_order)
    .bind(now)
    .bind(tenant)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Menu item {id} not found")));
    }
    Ok(())
}

/// Returns `false` when nothing was deleted
pub async fn delete(pool: &SqlitePool, tenant: &str, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM menu_items WHERE tenant_id = ? AND id = ?")
        .bind(tenant)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
