//! Client-held drag state
//!
//! Moves update the local sequence eagerly; the drop persists it. On any
//! persistence failure the local sequence is discarded and re-read from the
//! store.

use std::sync::Arc;

use super::{Reorderable, move_within, order_items, persist_order};
use crate::catalog::store::CatalogStore;
use crate::utils::AppResult;

pub struct ReorderSession<T: Reorderable> {
    store: Arc<dyn CatalogStore>,
    ns: String,
    /// Authoritative sequence when the drag started
    snapshot: Vec<T>,
    /// Optimistic sequence shown while dragging
    current: Vec<T>,
}

impl<T: Reorderable> ReorderSession<T> {
    /// `sequence` is one container in display order
    pub fn begin(store: Arc<dyn CatalogStore>, ns: impl Into<String>, sequence: Vec<T>) -> Self {
        Self {
            store,
            ns: ns.into(),
            snapshot: sequence.clone(),
            current: sequence,
        }
    }

    pub fn current(&self) -> &[T] {
        &self.current
    }

    pub fn is_dirty(&self) -> bool {
        self.current
            .iter()
            .zip(&self.snapshot)
            .any(|(a, b)| a.id() != b.id() || a.sort_order() != b.sort_order())
    }

    /// Eager local move (may be called many times during one drag)
    pub fn move_to(&mut self, source_id: i64, target_id: i64) -> AppResult<&[T]> {
        self.current = move_within(&self.current, source_id, target_id)?;
        Ok(&self.current)
    }

    /// Drop: persist the whole sequence. On failure the local state is
    /// replaced by a fresh read and the error is returned.
    pub async fn commit(&mut self) -> AppResult<()> {
        let items = order_items(&self.current);
        match persist_order(self.store.as_ref(), &self.ns, T::KIND, &items).await {
            Ok(()) => {
                self.snapshot = self.current.clone();
                Ok(())
            }
            Err(e) => {
                self.reload().await;
                Err(e)
            }
        }
    }

    /// Abandon the drag without writing
    pub fn cancel(&mut self) {
        self.current = self.snapshot.clone();
    }

    async fn reload(&mut self) {
        let Some(anchor) = self.snapshot.first().map(|e| e.id()) else {
            return;
        };
        let fresh = match T::load_all(self.store.as_ref(), &self.ns).await {
            Ok(all) => T::scope(&all, anchor, anchor),
            Err(e) => Err(e),
        };
        match fresh {
            Ok(sequence) => {
                self.snapshot = sequence.clone();
                self.current = sequence;
            }
            Err(e) => {
                tracing::error!(
                    tenant = %self.ns,
                    error = %e,
                    "Reload after failed reorder failed, keeping pre-drag state"
                );
                self.current = self.snapshot.clone();
            }
        }
    }
}
