//! Catalog Store
//!
//! [`CatalogStore`] is the persistence seam of the catalog: tenant-scoped
//! CRUD over categories and menu items plus the tenant settings singleton.
//! [`SqliteCatalogStore`] is the production implementation; cross-entity
//! rules (nesting, category references, keyword casing) are enforced here
//! before anything reaches the repositories.

use async_trait::async_trait;
use futures::future::join_all;
use shared::models::{
    CatalogKind, Category, CategoryCreate, CategoryUpdate, MenuItem, MenuItemCreate,
    MenuItemUpdate, RestaurantSettings, RestaurantSettingsUpdate, SortOrderItem,
};
use shared::util::{now_millis, snowflake_id};
use shared::ErrorCode;
use sqlx::SqlitePool;

use super::normalize::{clean_labels, normalize_keywords};
use super::tree::check_parent;
use crate::db::DbService;
use crate::db::repository::{RepoError, category, menu_item, settings};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, MAX_URL_LEN, validate_optional_text,
    validate_price, validate_required_text, validate_text_list,
};
use crate::utils::{AppError, AppResult};

/// Outcome of a batch order update; one entry per requested id
#[derive(Debug, Default)]
pub struct SortOrderOutcome {
    pub updated: Vec<i64>,
    pub failed: Vec<(i64, AppError)>,
}

impl SortOrderOutcome {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn failed_ids(&self) -> Vec<i64> {
        self.failed.iter().map(|(id, _)| *id).collect()
    }
}

#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Categories sorted by `order` (convenience only, the view re-sorts)
    async fn list_categories(&self, ns: &str) -> AppResult<Vec<Category>>;
    /// Menu items sorted by `order`
    async fn list_menu_items(&self, ns: &str) -> AppResult<Vec<MenuItem>>;
    async fn get_category(&self, ns: &str, id: i64) -> AppResult<Category>;
    async fn get_menu_item(&self, ns: &str, id: i64) -> AppResult<MenuItem>;

    /// `order` = max sibling order + 1, visible unless told otherwise
    async fn create_category(&self, ns: &str, data: CategoryCreate) -> AppResult<Category>;
    async fn create_menu_item(&self, ns: &str, data: MenuItemCreate) -> AppResult<MenuItem>;

    async fn update_category(&self, ns: &str, id: i64, data: CategoryUpdate)
    -> AppResult<Category>;
    async fn update_menu_item(&self, ns: &str, id: i64, data: MenuItemUpdate)
    -> AppResult<MenuItem>;

    async fn delete_category(&self, ns: &str, id: i64) -> AppResult<()>;
    async fn delete_menu_item(&self, ns: &str, id: i64) -> AppResult<()>;

    /// Write a single `order` value
    async fn update_sort_order(
        &self,
        ns: &str,
        kind: CatalogKind,
        id: i64,
        sort_order: i32,
    ) -> AppResult<()>;

    async fn get_settings(&self, ns: &str) -> AppResult<RestaurantSettings>;
    async fn update_settings(
        &self,
        ns: &str,
        data: RestaurantSettingsUpdate,
    ) -> AppResult<RestaurantSettings>;

    /// Write many `order` values as independent concurrent updates (no
    /// transaction); every failure is reported with its id
    async fn update_sort_orders(
        &self,
        ns: &str,
        kind: CatalogKind,
        items: &[SortOrderItem],
    ) -> SortOrderOutcome {
        let results = join_all(
            items
                .iter()
                .map(|item| self.update_sort_order(ns, kind, item.id, item.sort_order)),
        )
        .await;

        let mut outcome = SortOrderOutcome::default();
        for (item, result) in items.iter().zip(results) {
            match result {
                Ok(()) => outcome.updated.push(item.id),
                Err(e) => outcome.failed.push((item.id, e)),
            }
        }
        outcome
    }
}

/// SQLite-backed catalog store
#[derive(Debug, Clone)]
pub struct SqliteCatalogStore {
    pool: SqlitePool,
}

impl SqliteCatalogStore {
    pub fn new(db: &DbService) -> Self {
        Self {
            pool: db.pool.clone(),
        }
    }

    async fn require_category(&self, ns: &str, id: i64) -> AppResult<Category> {
        category::find_by_id(&self.pool, ns, id)
            .await?
            .ok_or_else(|| AppError::category_not_found(id))
    }

    async fn require_menu_item(&self, ns: &str, id: i64) -> AppResult<MenuItem> {
        menu_item::find_by_id(&self.pool, ns, id)
            .await?
            .ok_or_else(|| AppError::menu_item_not_found(id))
    }
}

fn not_found_as(kind: CatalogKind, id: i64) -> impl FnOnce(RepoError) -> AppError {
    move |err| match err {
        RepoError::NotFound(_) => match kind {
            CatalogKind::Category => AppError::category_not_found(id),
            CatalogKind::MenuItem => AppError::menu_item_not_found(id),
        },
        other => other.into(),
    }
}

fn validate_menu_item_text(
    description: Option<&str>,
    image_url: Option<&str>,
    image_id: Option<&str>,
    currency: Option<&str>,
) -> AppResult<()> {
    validate_optional_text(description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(image_url, "imageUrl", MAX_URL_LEN)?;
    validate_optional_text(image_id, "imageId", MAX_URL_LEN)?;
    if let Some(currency) = currency {
        validate_required_text(currency, "currency", MAX_SHORT_TEXT_LEN)?;
    }
    Ok(())
}

fn validate_lists(
    tags: Option<&[String]>,
    allergens: Option<&[String]>,
    keywords: Option<&[String]>,
) -> AppResult<()> {
    validate_text_list(tags.unwrap_or_default(), "tags", MAX_SHORT_TEXT_LEN)?;
    validate_text_list(allergens.unwrap_or_default(), "allergens", MAX_SHORT_TEXT_LEN)?;
    validate_text_list(keywords.unwrap_or_default(), "searchKeywords", MAX_SHORT_TEXT_LEN)
}

#[async_trait]
impl CatalogStore for SqliteCatalogStore {
    async fn list_categories(&self, ns: &str) -> AppResult<Vec<Category>> {
        Ok(category::find_all(&self.pool, ns).await?)
    }

    async fn list_menu_items(&self, ns: &str) -> AppResult<Vec<MenuItem>> {
        Ok(menu_item::find_all(&self.pool, ns).await?)
    }

    async fn get_category(&self, ns: &str, id: i64) -> AppResult<Category> {
        self.require_category(ns, id).await
    }

    async fn get_menu_item(&self, ns: &str, id: i64) -> AppResult<MenuItem> {
        self.require_menu_item(ns, id).await
    }

    async fn create_category(&self, ns: &str, data: CategoryCreate) -> AppResult<Category> {
        validate_required_text(&data.name, "name", MAX_NAME_LEN)?;

        if let Some(parent_id) = data.parent_category_id {
            let parent = category::find_by_id(&self.pool, ns, parent_id).await?;
            check_parent(None, parent_id, parent.as_ref(), false)?;
        }

        let sort_order = match category::max_sibling_order(&self.pool, ns, data.parent_category_id)
            .await?
        {
            None => 0,
            Some(max) => max.checked_add(1).ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::ValueOutOfRange,
                    "Sibling order is at its maximum, renumber the categories first",
                )
                .with_detail("field", "order")
            })?,
        };
        let now = now_millis();
        let created = Category {
            id: snowflake_id(),
            name: data.name.trim().to_string(),
            sort_order,
            is_visible: data.is_visible.unwrap_or(true),
            parent_category_id: data.parent_category_id,
            created_at: now,
            updated_at: now,
        };
        category::insert(&self.pool, ns, &created).await?;
        tracing::info!(tenant = %ns, id = created.id, name = %created.name, "Category created");
        Ok(created)
    }

    async fn create_menu_item(&self, ns: &str, data: MenuItemCreate) -> AppResult<MenuItem> {
        validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
        let category_id = data.category_id.ok_or_else(|| AppError::required("categoryId"))?;
        validate_price(data.price)?;
        validate_menu_item_text(
            Some(data.description.as_str()),
            Some(data.image_url.as_str()),
            Some(data.image_id.as_str()),
            data.currency.as_deref(),
        )?;
        validate_lists(
            Some(data.tags.as_slice()),
            Some(data.allergens.as_slice()),
            Some(data.search_keywords.as_slice()),
        )?;
        self.require_category(ns, category_id).await?;

        let currency = match data.currency {
            Some(c) => c.trim().to_uppercase(),
            None => self.get_settings(ns).await?.currency,
        };
        let now = now_millis();
        let item = MenuItem {
            id: snowflake_id(),
            name: data.name.trim().to_string(),
            description: data.description,
            price: data.price,
            currency,
            image_url: data.image_url,
            image_id: data.image_id,
            category_id,
            is_visible: data.is_visible.unwrap_or(true),
            in_stock: data.in_stock.unwrap_or(true),
            is_special: data.is_special.unwrap_or(false),
            tags: clean_labels(&data.tags),
            allergens: clean_labels(&data.allergens),
            search_keywords: normalize_keywords(&data.search_keywords),
            sort_order: data.sort_order.unwrap_or(0),
            created_at: now,
            updated_at: now,
        };
        menu_item::insert(&self.pool, ns, &item).await?;
        tracing::info!(tenant = %ns, id = item.id, name = %item.name, "Menu item created");
        Ok(item)
    }

    async fn update_category(
        &self,
        ns: &str,
        id: i64,
        data: CategoryUpdate,
    ) -> AppResult<Category> {
        if let Some(name) = &data.name {
            validate_required_text(name, "name", MAX_NAME_LEN)?;
        }
        self.require_category(ns, id).await?;

        if let Some(Some(parent_id)) = data.parent_category_id {
            let parent = category::find_by_id(&self.pool, ns, parent_id).await?;
            let has_children = category::count_children(&self.pool, ns, id).await? > 0;
            check_parent(Some(id), parent_id, parent.as_ref(), has_children)?;
        }

        let updated = category::update(&self.pool, ns, id, &data, now_millis())
            .await
            .map_err(not_found_as(CatalogKind::Category, id))?;
        tracing::debug!(tenant = %ns, id, "Category updated");
        Ok(updated)
    }

    async fn update_menu_item(
        &self,
        ns: &str,
        id: i64,
        mut data: MenuItemUpdate,
    ) -> AppResult<MenuItem> {
        if let Some(name) = &data.name {
            validate_required_text(name, "name", MAX_NAME_LEN)?;
        }
        if let Some(price) = data.price {
            validate_price(price)?;
        }
        validate_menu_item_text(
            data.description.as_deref(),
            data.image_url.as_deref(),
            data.image_id.as_deref(),
            data.currency.as_deref(),
        )?;
        validate_lists(
            data.tags.as_deref(),
            data.allergens.as_deref(),
            data.search_keywords.as_deref(),
        )?;
        self.require_menu_item(ns, id).await?;
        if let Some(category_id) = data.category_id {
            self.require_category(ns, category_id).await?;
        }

        data.currency = data.currency.map(|c| c.trim().to_uppercase());
        data.tags = data.tags.map(|t| clean_labels(&t));
        data.allergens = data.allergens.map(|a| clean_labels(&a));
        data.search_keywords = data.search_keywords.map(|k| normalize_keywords(&k));

        let updated = menu_item::update(&self.pool, ns, id, &data, now_millis())
            .await
            .map_err(not_found_as(CatalogKind::MenuItem, id))?;
        tracing::debug!(tenant = %ns, id, "Menu item updated");
        Ok(updated)
    }

    async fn delete_category(&self, ns: &str, id: i64) -> AppResult<()> {
        self.require_category(ns, id).await?;

        let children = category::count_children(&self.pool, ns, id).await?;
        if children > 0 {
            return Err(AppError::with_message(
                ErrorCode::CategoryHasChildren,
                format!("Category {id} still has {children} child categories"),
            )
            .with_detail("id", id)
            .with_detail("childCount", children));
        }

        let orphaned = menu_item::find_by_category(&self.pool, ns, id).await?.len();
        if !category::delete(&self.pool, ns, id).await? {
            return Err(AppError::category_not_found(id));
        }
        if orphaned > 0 {
            tracing::warn!(
                tenant = %ns,
                id,
                orphaned,
                "Category deleted, its menu items are now unreachable"
            );
        } else {
            tracing::info!(tenant = %ns, id, "Category deleted");
        }
        Ok(())
    }

    async fn delete_menu_item(&self, ns: &str, id: i64) -> AppResult<()> {
        if !menu_item::delete(&self.pool, ns, id).await? {
            return Err(AppError::menu_item_not_found(id));
        }
        tracing::info!(tenant = %ns, id, "Menu item deleted");
        Ok(())
    }

    async fn update_sort_order(
        &self,
        ns: &str,
        kind: CatalogKind,
        id: i64,
        sort_order: i32,
    ) -> AppResult<()> {
        let now = now_millis();
        let result = match kind {
            CatalogKind::Category => {
                category::update_sort_order(&self.pool, ns, id, sort_order, now).await
            }
            CatalogKind::MenuItem => {
                menu_item::update_sort_order(&self.pool, ns, id, sort_order, now).await
            }
        };
        result.map_err(not_found_as(kind, id))
    }

    async fn get_settings(&self, ns: &str) -> AppResult<RestaurantSettings> {
        Ok(settings::get(&self.pool, ns).await?.unwrap_or_default())
    }

    async fn update_settings(
        &self,
        ns: &str,
        mut data: RestaurantSettingsUpdate,
    ) -> AppResult<RestaurantSettings> {
        validate_optional_text(data.name.as_deref(), "name", MAX_NAME_LEN)?;
        validate_optional_text(data.logo_url.as_deref(), "logoUrl", MAX_URL_LEN)?;
        if let Some(currency) = &data.currency {
            validate_required_text(currency, "currency", MAX_SHORT_TEXT_LEN)?;
        }
        data.currency = data.currency.map(|c| c.trim().to_uppercase());

        let saved = settings::upsert(&self.pool, ns, &data, now_millis()).await?;
        tracing::info!(tenant = %ns, "Restaurant settings updated");
        Ok(saved)
    }
}
