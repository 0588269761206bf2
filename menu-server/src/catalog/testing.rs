//! Store wrapper with injectable write failures

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use shared::models::{
    CatalogKind, Category, CategoryCreate, CategoryUpdate, MenuItem, MenuItemCreate,
    MenuItemUpdate, RestaurantSettings, RestaurantSettingsUpdate,
};

use super::store::{CatalogStore, SqliteCatalogStore};
use crate::db::DbService;
use crate::utils::{AppError, AppResult};

pub struct FlakyStore {
    pub inner: SqliteCatalogStore,
    /// `update_sort_order` fails for these ids
    pub failing_order_ids: Mutex<HashSet<i64>>,
    /// every update (entity and order) fails
    pub fail_updates: AtomicBool,
}

impl FlakyStore {
    pub async fn new() -> Self {
        Self {
            inner: SqliteCatalogStore::new(&DbService::in_memory().await.unwrap()),
            failing_order_ids: Mutex::new(HashSet::new()),
            fail_updates: AtomicBool::new(false),
        }
    }

    pub fn fail_order_for(&self, id: i64) {
        self.failing_order_ids.lock().insert(id);
    }

    pub fn set_fail_updates(&self, fail: bool) {
        self.fail_updates.store(fail, Ordering::SeqCst);
    }

    fn check_updates(&self) -> AppResult<()> {
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(AppError::store_unavailable("injected failure"));
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogStore for FlakyStore {
    async fn list_categories(&self, ns: &str) -> AppResult<Vec<Category>> {
        self.inner.list_categories(ns).await
    }

    async fn list_menu_items(&self, ns: &str) -> AppResult<Vec<MenuItem>> {
        self.inner.list_menu_items(ns).await
    }

    async fn get_category(&self, ns: &str, id: i64) -> AppResult<Category> {
        self.inner.get_category(ns, id).await
    }

    async fn get_menu_item(&self, ns: &str, id: i64) -> AppResult<MenuItem> {
        self.inner.get_menu_item(ns, id).await
    }

    async fn create_category(&self, ns: &str, data: CategoryCreate) -> AppResult<Category> {
        self.inner.create_category(ns, data).await
    }

    async fn create_menu_item(&self, ns: &str, data: MenuItemCreate) -> AppResult<MenuItem> {
        self.inner.create_menu_item(ns, data).await
    }

    async fn update_category(
        &self,
        ns: &str,
        id: i64,
        data: CategoryUpdate,
    ) -> AppResult<Category> {
        self.check_updates()?;
        self.inner.update_category(ns, id, data).await
    }

    async fn update_menu_item(
        &self,
        ns: &str,
        id: i64,
        data: MenuItemUpdate,
    ) -> AppResult<MenuItem> {
        self.check_updates()?;
        self.inner.update_menu_item(ns, id, data).await
    }

    async fn delete_category(&self, ns: &str, id: i64) -> AppResult<()> {
        self.inner.delete_category(ns, id).await
    }

    async fn delete_menu_item(&self, ns: &str, id: i64) -> AppResult<()> {
        self.inner.delete_menu_item(ns, id).await
    }

    async fn update_sort_order(
        &self,
        ns: &str,
        kind: CatalogKind,
        id: i64,
        sort_order: i32,
    ) -> AppResult<()> {
        self.check_updates()?;
        if self.failing_order_ids.lock().contains(&id) {
            return Err(AppError::store_unavailable(format!("injected failure for {id}")));
        }
        self.inner.update_sort_order(ns, kind, id, sort_order).await
    }

    async fn get_settings(&self, ns: &str) -> AppResult<RestaurantSettings> {
        self.inner.get_settings(ns).await
    }

    async fn update_settings(
        &self,
        ns: &str,
        data: RestaurantSettingsUpdate,
    ) -> AppResult<RestaurantSettings> {
        self.inner.update_settings(ns, data).await
    }
}
