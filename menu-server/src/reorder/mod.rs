//! Reorder Engine
//!
//! Turns a drag gesture ("move A to where B is") into a renumbered sibling
//! sequence and persists it.
//!
//! - [`move_within`] - pure splice-and-reinsert, renumbers to `0..n`
//! - [`persist_order`] - concurrent per-document writes, one aggregate error
//! - [`ReorderSession`] - optimistic local sequence with reload on failure

mod session;

pub use session::ReorderSession;

use async_trait::async_trait;
use shared::ErrorCode;
use shared::models::{CatalogKind, Category, MenuItem, SortOrderItem};

use crate::catalog::store::CatalogStore;
use crate::catalog::tree::CategoryTree;
use crate::catalog::view::{SortMode, cmp_items};
use crate::utils::{AppError, AppResult};

/// An entity with a manual rank inside its container
#[async_trait]
pub trait Reorderable: Clone + Send + Sync + 'static {
    const KIND: CatalogKind;

    fn id(&self) -> i64;
    fn sort_order(&self) -> i32;
    fn set_sort_order(&mut self, sort_order: i32);

    /// Container shared by `source_id` and `target_id`, in display order
    fn scope(all: &[Self], source_id: i64, target_id: i64) -> AppResult<Vec<Self>>;

    async fn load_all(store: &dyn CatalogStore, ns: &str) -> AppResult<Vec<Self>>;
}

fn scope_mismatch(kind: CatalogKind, source_id: i64, target_id: i64) -> AppError {
    AppError::with_message(
        ErrorCode::ReorderScopeMismatch,
        format!(
            "Cannot reorder {} {source_id} relative to {target_id}: different containers",
            kind.resource()
        ),
    )
    .with_detail("sourceId", source_id)
    .with_detail("targetId", target_id)
}

#[async_trait]
impl Reorderable for MenuItem {
    const KIND: CatalogKind = CatalogKind::MenuItem;

    fn id(&self) -> i64 {
        self.id
    }

    fn sort_order(&self) -> i32 {
        self.sort_order
    }

    fn set_sort_order(&mut self, sort_order: i32) {
        self.sort_order = sort_order;
    }

    /// Items are siblings when they share `category_id`
    fn scope(all: &[Self], source_id: i64, target_id: i64) -> AppResult<Vec<Self>> {
        let find = |id: i64| {
            all.iter()
                .find(|i| i.id == id)
                .ok_or_else(|| AppError::menu_item_not_found(id))
        };
        let source = find(source_id)?;
        let target = find(target_id)?;
        if source.category_id != target.category_id {
            return Err(scope_mismatch(Self::KIND, source_id, target_id));
        }
        let mut scope: Vec<MenuItem> = all
            .iter()
            .filter(|i| i.category_id == source.category_id)
            .cloned()
            .collect();
        scope.sort_by(|a, b| cmp_items(SortMode::Manual, a, b));
        Ok(scope)
    }

    async fn load_all(store: &dyn CatalogStore, ns: &str) -> AppResult<Vec<Self>> {
        store.list_menu_items(ns).await
    }
}

#[async_trait]
impl Reorderable for Category {
    const KIND: CatalogKind = CatalogKind::Category;

    fn id(&self) -> i64 {
        self.id
    }

    fn sort_order(&self) -> i32 {
        self.sort_order
    }

    fn set_sort_order(&mut self, sort_order: i32) {
        self.sort_order = sort_order;
    }

    /// Roots are siblings of roots; children only of the same parent
    fn scope(all: &[Self], source_id: i64, target_id: i64) -> AppResult<Vec<Self>> {
        let tree = CategoryTree::build(all);
        for id in [source_id, target_id] {
            if tree.get(id).is_none() {
                return Err(AppError::category_not_found(id));
            }
        }
        let siblings = tree.siblings(source_id).unwrap_or_default();
        if !siblings.contains(&target_id) {
            return Err(scope_mismatch(Self::KIND, source_id, target_id));
        }
        Ok(siblings
            .iter()
            .filter_map(|id| tree.get(*id).cloned())
            .collect())
    }

    async fn load_all(store: &dyn CatalogStore, ns: &str) -> AppResult<Vec<Self>> {
        store.list_categories(ns).await
    }
}

/// Assign `0..n` in positional order
pub fn renumber<T: Reorderable>(sequence: &mut [T]) {
    for (index, entry) in sequence.iter_mut().enumerate() {
        entry.set_sort_order(index as i32);
    }
}

/// Remove `source_id` and reinsert it at the index `target_id` occupies,
/// then renumber. Both ids must be in `sequence`.
pub fn move_within<T: Reorderable>(
    sequence: &[T],
    source_id: i64,
    target_id: i64,
) -> AppResult<Vec<T>> {
    let position = |id: i64| {
        sequence
            .iter()
            .position(|e| e.id() == id)
            .ok_or_else(|| scope_mismatch(T::KIND, source_id, target_id))
    };
    let from = position(source_id)?;
    let to = position(target_id)?;

    let mut next = sequence.to_vec();
    let moved = next.remove(from);
    next.insert(to, moved);
    renumber(&mut next);
    Ok(next)
}

/// `{id, order}` pairs of a sequence
pub fn order_items<T: Reorderable>(sequence: &[T]) -> Vec<SortOrderItem> {
    sequence
        .iter()
        .map(|e| SortOrderItem {
            id: e.id(),
            sort_order: e.sort_order(),
        })
        .collect()
}

/// Persist every `order` of a scope as independent concurrent writes
///
/// Any failure becomes one aggregate error carrying the failed ids. Nothing
/// is rolled back; callers reload from the store instead.
pub async fn persist_order(
    store: &dyn CatalogStore,
    ns: &str,
    kind: CatalogKind,
    items: &[SortOrderItem],
) -> AppResult<()> {
    let outcome = store.update_sort_orders(ns, kind, items).await;
    if outcome.is_complete() {
        tracing::debug!(
            tenant = %ns,
            resource = kind.resource(),
            count = items.len(),
            "Order persisted"
        );
        return Ok(());
    }

    let failed_ids = outcome.failed_ids();
    tracing::warn!(
        tenant = %ns,
        resource = kind.resource(),
        failed = ?failed_ids,
        updated = outcome.updated.len(),
        "Order persisted partially"
    );

    if outcome.updated.is_empty()
        && let Some((_, first)) = outcome.failed.into_iter().next()
    {
        return Err(first.with_detail("failedIds", failed_ids));
    }
    Err(AppError::with_message(
        ErrorCode::ReorderPartialFailure,
        format!(
            "{} of {} order updates failed",
            failed_ids.len(),
            items.len()
        ),
    )
    .with_detail("failedIds", failed_ids))
}

/// Server-side drag move: load, move, persist; returns the new sequence
pub async fn reorder<T: Reorderable>(
    store: &dyn CatalogStore,
    ns: &str,
    source_id: i64,
    target_id: i64,
) -> AppResult<Vec<T>> {
    let all = T::load_all(store, ns).await?;
    let scope = T::scope(&all, source_id, target_id)?;
    let next = move_within(&scope, source_id, target_id)?;
    persist_order(store, ns, T::KIND, &order_items(&next)).await?;
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::testing::FlakyStore;
    use shared::models::{CategoryCreate, MenuItemCreate};

    fn item(id: i64, name: &str, category_id: i64, order: i32) -> MenuItem {
        MenuItem {
            id,
            name: name.to_string(),
            description: String::new(),
            price: 1.0,
            currency: "EUR".into(),
            image_url: String::new(),
            image_id: String::new(),
            category_id,
            is_visible: true,
            in_stock: true,
            is_special: false,
            tags: vec![],
            allergens: vec![],
            search_keywords: vec![],
            sort_order: order,
            created_at: 0,
            updated_at: 0,
        }
    }

    fn cat(id: i64, order: i32, parent: Option<i64>) -> Category {
        Category {
            id,
            name: format!("c{id}"),
            sort_order: order,
            is_visible: true,
            parent_category_id: parent,
            created_at: 0,
            updated_at: 0,
        }
    }

    fn ids<T: Reorderable>(seq: &[T]) -> Vec<(i64, i32)> {
        seq.iter().map(|e| (e.id(), e.sort_order())).collect()
    }

    #[test]
    fn test_move_is_splice_not_swap() {
        let seq = vec![
            item(1, "a", 1, 0),
            item(2, "b", 1, 1),
            item(3, "c", 1, 2),
            item(4, "d", 1, 3),
        ];
        let down = move_within(&seq, 1, 3).unwrap();
        assert_eq!(ids(&down), vec![(2, 0), (3, 1), (1, 2), (4, 3)]);
        let up = move_within(&seq, 4, 2).unwrap();
        assert_eq!(ids(&up), vec![(1, 0), (4, 1), (2, 2), (3, 3)]);
        // input untouched
        assert_eq!(seq[0].id, 1);
    }

    #[test]
    fn test_move_is_a_permutation_with_contiguous_orders() {
        let seq: Vec<MenuItem> = (0..7).map(|i| item(i, "x", 1, (i * 10) as i32)).collect();
        for source in 0..7 {
            for target in 0..7 {
                let next = move_within(&seq, source, target).unwrap();
                let mut got: Vec<i64> = next.iter().map(|i| i.id).collect();
                got.sort();
                assert_eq!(got, (0..7).collect::<Vec<_>>());
                let orders: Vec<i32> = next.iter().map(|i| i.sort_order).collect();
                assert_eq!(orders, (0..7).collect::<Vec<_>>());
            }
        }
    }

    #[test]
    fn test_move_outside_sequence_is_scope_mismatch() {
        let seq = vec![item(1, "a", 1, 0)];
        let err = move_within(&seq, 1, 9).unwrap_err();
        assert_eq!(err.code, ErrorCode::ReorderScopeMismatch);
    }

    #[test]
    fn test_item_scope() {
        let all = vec![
            item(1, "Milanesa", 10, 0),
            item(2, "Ensalada", 10, 1),
            item(3, "Cerveza", 20, 0),
        ];
        let scope = MenuItem::scope(&all, 2, 1).unwrap();
        assert_eq!(ids(&scope), vec![(1, 0), (2, 1)]);
        assert_eq!(
            MenuItem::scope(&all, 2, 3).unwrap_err().code,
            ErrorCode::ReorderScopeMismatch
        );
        assert_eq!(
            MenuItem::scope(&all, 2, 99).unwrap_err().code,
            ErrorCode::MenuItemNotFound
        );
    }

    #[test]
    fn test_category_scope() {
        let all = vec![
            cat(1, 0, None),
            cat(2, 1, None),
            cat(3, 0, Some(1)),
            cat(4, 1, Some(1)),
            cat(5, 0, Some(2)),
        ];
        assert_eq!(
            Category::scope(&all, 2, 1).unwrap().iter().map(|c| c.id).collect::<Vec<_>>(),
            vec![1, 2]
        );
        assert_eq!(
            Category::scope(&all, 4, 3).unwrap().iter().map(|c| c.id).collect::<Vec<_>>(),
            vec![3, 4]
        );
        // root vs child, and children of different parents
        assert_eq!(
            Category::scope(&all, 1, 3).unwrap_err().code,
            ErrorCode::ReorderScopeMismatch
        );
        assert_eq!(
            Category::scope(&all, 3, 5).unwrap_err().code,
            ErrorCode::ReorderScopeMismatch
        );
        assert_eq!(
            Category::scope(&all, 3, 77).unwrap_err().code,
            ErrorCode::CategoryNotFound
        );
    }

    async fn seed_parrilla(store: &FlakyStore) -> (i64, i64, [MenuItem; 3]) {
        let a = store
            .create_category("t", CategoryCreate { name: "A".into(), ..Default::default() })
            .await
            .unwrap();
        let b = store
            .create_category("t", CategoryCreate { name: "B".into(), ..Default::default() })
            .await
            .unwrap();
        let mk = |name: &str, category_id: i64, order: i32| MenuItemCreate {
            name: name.to_string(),
            category_id: Some(category_id),
            sort_order: Some(order),
            ..Default::default()
        };
        let milanesa = store.create_menu_item("t", mk("Milanesa", a.id, 0)).await.unwrap();
        let ensalada = store.create_menu_item("t", mk("Ensalada", a.id, 1)).await.unwrap();
        let cerveza = store.create_menu_item("t", mk("Cerveza", b.id, 0)).await.unwrap();
        (a.id, b.id, [milanesa, ensalada, cerveza])
    }

    #[tokio::test]
    async fn test_drag_ensalada_above_milanesa() {
        let store = FlakyStore::new().await;
        let (_, _, [milanesa, ensalada, cerveza]) = seed_parrilla(&store).await;

        let next = reorder::<MenuItem>(&store, "t", ensalada.id, milanesa.id).await.unwrap();
        assert_eq!(ids(&next), vec![(ensalada.id, 0), (milanesa.id, 1)]);

        assert_eq!(store.get_menu_item("t", ensalada.id).await.unwrap().sort_order, 0);
        assert_eq!(store.get_menu_item("t", milanesa.id).await.unwrap().sort_order, 1);
        let untouched = store.get_menu_item("t", cerveza.id).await.unwrap();
        assert_eq!(untouched.sort_order, 0);
        assert_eq!(untouched.updated_at, cerveza.updated_at);
    }

    #[tokio::test]
    async fn test_cross_category_drag_rejected() {
        let store = FlakyStore::new().await;
        let (_, _, [milanesa, _, cerveza]) = seed_parrilla(&store).await;
        let err = reorder::<MenuItem>(&store, "t", cerveza.id, milanesa.id)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ReorderScopeMismatch);
    }

    #[tokio::test]
    async fn test_persist_partial_failure_is_aggregated() {
        let store = FlakyStore::new().await;
        let (_, _, [milanesa, ensalada, _]) = seed_parrilla(&store).await;
        store.fail_order_for(milanesa.id);

        let err = reorder::<MenuItem>(&store, "t", ensalada.id, milanesa.id)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ReorderPartialFailure);
        let details = err.details.unwrap();
        assert_eq!(details["failedIds"], serde_json::json!([milanesa.id]));
        // no rollback: the successful write stays
        assert_eq!(store.get_menu_item("t", ensalada.id).await.unwrap().sort_order, 0);
    }

    #[tokio::test]
    async fn test_persist_total_failure_keeps_store_error() {
        let store = FlakyStore::new().await;
        let (_, _, [milanesa, ensalada, _]) = seed_parrilla(&store).await;
        store.set_fail_updates(true);
        let err = persist_order(
            &store,
            "t",
            CatalogKind::MenuItem,
            &[
                SortOrderItem { id: ensalada.id, sort_order: 0 },
                SortOrderItem { id: milanesa.id, sort_order: 1 },
            ],
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::StoreUnavailable);
    }

    #[tokio::test]
    async fn test_reorder_root_categories() {
        let store = FlakyStore::new().await;
        let (a, b, _) = seed_parrilla(&store).await;
        let next = reorder::<Category>(&store, "t", b, a).await.unwrap();
        assert_eq!(ids(&next), vec![(b, 0), (a, 1)]);
        let listed = store.list_categories("t").await.unwrap();
        assert_eq!(listed.iter().map(|c| c.id).collect::<Vec<_>>(), vec![b, a]);
    }
}
