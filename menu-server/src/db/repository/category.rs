//! Category Repository

use super::{RepoError, RepoResult};
use shared::models::{Category, CategoryUpdate};
use sqlx::SqlitePool;

const COLUMNS: &str =
    "id, name, sort_order, is_visible, parent_category_id, created_at, updated_at";

/// All categories of a tenant, pre-sorted by order
pub async fn find_all(pool: &SqlitePool, tenant: &str) -> RepoResult<Vec<Category>> {
    let sql = format!(
        "SELECT {COLUMNS} FROM categories WHERE tenant_id = ? ORDER BY sort_order, name COLLATE NOCASE, id"
    );
    let rows = sqlx::query_as::<_, Category>(&sql)
        .bind(tenant)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, tenant: &str, id: i64) -> RepoResult<Option<Category>> {
    let sql = format!("SELECT {COLUMNS} FROM categories WHERE tenant_id = ? AND id = ?");
    let row = sqlx::query_as::<_, Category>(&sql)
        .bind(tenant)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Highest order among siblings sharing `parent` (`None` = roots)
pub async fn max_sibling_order(
    pool: &SqlitePool,
    tenant: &str,
    parent: Option<i64>,
) -> RepoResult<Option<i32>> {
    let max: Option<i32> = sqlx::query_scalar(
        "SELECT MAX(sort_order) FROM categories WHERE tenant_id = ? AND parent_category_id IS ?",
    )
    .bind(tenant)
    .bind(parent)
    .fetch_one(pool)
    .await?;
    Ok(max)
}

pub async fn count_children(pool: &SqlitePool, tenant: &str, id: i64) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM categories WHERE tenant_id = ? AND parent_category_id = ?",
    )
    .bind(tenant)
    .bind(id)
    .fetch_one(pool)
    .await?;
    Ok(count)
}

pub async fn insert(pool: &SqlitePool, tenant: &str, category: &Category) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO categories (id, tenant_id, name, sort_order, is_visible, parent_category_id, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(category.id)
    .bind(tenant)
    .bind(&category.name)
    .bind(category.sort_order)
    .bind(category.is_visible)
    .bind(category.parent_category_id)
    .bind(category.created_at)
    .bind(category.updated_at)
    .execute(pool)
    .await?;
    Ok(())
}

/// Partial update; absent fields keep their value
pub async fn update(
    pool: &SqlitePool,
    tenant: &str,
    id: i64,
    data: &CategoryUpdate,
    now: i64,
) -> RepoResult<Category> {
    let (set_parent, parent) = match data.parent_category_id {
        Some(parent) => (true, parent),
        None => (false, None),
    };
    let rows = sqlx::query(
        "UPDATE categories SET \
           name = COALESCE(?1, name), \
           sort_order = COALESCE(?2, sort_order), \
           is_visible = COALESCE(?3, is_visible), \
           parent_category_id = CASE WHEN ?4 THEN ?5 ELSE parent_category_id END, \
           updated_at = ?6 \
         WHERE tenant_id = ?7 AND id = ?8",
    )
    .bind(data.name.as_deref().map(str::trim))
    .bind(data.sort_order)
    .bind(data.is_visible)
    .bind(set_parent)
    .bind(parent)
    .bind(now)
    .bind(tenant)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Category {id} not found")));
    }
    find_by_id(pool, tenant, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to read back updated category".into()))
}

pub async fn update_sort_order(
    pool: &SqlitePool,
    tenant: &str,
    id: i64,
    sort_order: i32,
    now: i64,
) -> RepoResult<()> {
    let rows = sqlx::query(
        "UPDATE categories SET sort_order = ?, updated_at = ? WHERE tenant_id = ? AND id = ?",
    )
    .bind(sort_order)
    .bind(now)
    .bind(tenant)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Category {id} not found")));
    }
    Ok(())
}

/// Returns `false` when nothing was deleted
pub async fn delete(pool: &SqlitePool, tenant: &str, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM categories WHERE tenant_id = ? AND id = ?")
        .bind(tenant)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
