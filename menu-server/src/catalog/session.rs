//! Admin panel session
//!
//! Local copy of one tenant's catalog as the admin panel holds it. Inline
//! toggles go through [`optimistic`]; drag reorders go through
//! [`ReorderSession`].

use std::sync::Arc;

use parking_lot::RwLock;
use shared::models::{Category, CategoryUpdate, MenuItem, MenuItemFlag};

use super::optimistic::optimistic;
use super::store::CatalogStore;
use super::view::{Audience, CatalogView, ViewFilter, project};
use crate::reorder::{ReorderSession, Reorderable};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    pub categories: Vec<Category>,
    pub items: Vec<MenuItem>,
}

pub struct AdminSession {
    store: Arc<dyn CatalogStore>,
    ns: String,
    state: Arc<RwLock<CatalogSnapshot>>,
}

impl AdminSession {
    pub async fn load(store: Arc<dyn CatalogStore>, ns: impl Into<String>) -> AppResult<Self> {
        let session = Self {
            store,
            ns: ns.into(),
            state: Arc::new(RwLock::new(CatalogSnapshot::default())),
        };
        session.refresh().await?;
        Ok(session)
    }

    /// Replace local state with a fresh read
    pub async fn refresh(&self) -> AppResult<()> {
        let categories = self.store.list_categories(&self.ns).await?;
        let items = self.store.list_menu_items(&self.ns).await?;
        *self.state.write() = CatalogSnapshot { categories, items };
        Ok(())
    }

    pub fn snapshot(&self) -> CatalogSnapshot {
        self.state.read().clone()
    }

    pub fn view(&self, filter: &ViewFilter) -> CatalogView {
        let state = self.state.read();
        project(&state.categories, &state.items, filter, Audience::Admin)
    }

    /// Flip one inline flag of a menu item; returns the new value
    pub async fn toggle_item_flag(&self, id: i64, flag: MenuItemFlag) -> AppResult<bool> {
        let current = self
            .state
            .read()
            .items
            .iter()
            .find(|i| i.id == id)
            .map(|i| flag.get(i))
            .ok_or_else(|| AppError::menu_item_not_found(id))?;
        let next = !current;

        let set = move |value: bool| {
            move |s: &mut CatalogSnapshot| {
                if let Some(item) = s.items.iter_mut().find(|i| i.id == id) {
                    flag.set(item, value);
                }
            }
        };
        let saved = optimistic(
            &self.state,
            set(next),
            set(current),
            self.store.update_menu_item(&self.ns, id, flag.to_update(next)),
        )
        .await?;

        let value = flag.get(&saved);
        if let Some(item) = self.state.write().items.iter_mut().find(|i| i.id == id) {
            *item = saved;
        }
        Ok(value)
    }

    /// Flip a category's visibility; returns the new value
    pub async fn toggle_category_visibility(&self, id: i64) -> AppResult<bool> {
        let current = self
            .state
            .read()
            .categories
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.is_visible)
            .ok_or_else(|| AppError::category_not_found(id))?;
        let next = !current;

        let set = move |value: bool| {
            move |s: &mut CatalogSnapshot| {
                if let Some(category) = s.categories.iter_mut().find(|c| c.id == id) {
                    category.is_visible = value;
                }
            }
        };
        let update = CategoryUpdate {
            is_visible: Some(next),
            ..Default::default()
        };
        let saved = optimistic(
            &self.state,
            set(next),
            set(current),
            self.store.update_category(&self.ns, id, update),
        )
        .await?;

        let value = saved.is_visible;
        if let Some(category) = self.state.write().categories.iter_mut().find(|c| c.id == id) {
            *category = saved;
        }
        Ok(value)
    }

    /// Start dragging within the container of menu item `anchor_id`
    pub fn begin_item_reorder(&self, anchor_id: i64) -> AppResult<ReorderSession<MenuItem>> {
        let scope = MenuItem::scope(&self.state.read().items, anchor_id, anchor_id)?;
        Ok(ReorderSession::begin(self.store.clone(), self.ns.clone(), scope))
    }

    /// Start dragging within the container of category `anchor_id`
    pub fn begin_category_reorder(&self, anchor_id: i64) -> AppResult<ReorderSession<Category>> {
        let scope = Category::scope(&self.state.read().categories, anchor_id, anchor_id)?;
        Ok(ReorderSession::begin(self.store.clone(), self.ns.clone(), scope))
    }
}
