//! Optimistic mutation primitive
//!
//! apply locally → await the remote write → apply the inverse on failure.
//! The local change is visible to every reader of the shared state while the
//! write is in flight.

use std::future::Future;

use parking_lot::RwLock;

use crate::utils::AppResult;

pub async fn optimistic<S, R, Fut>(
    state: &RwLock<S>,
    apply: impl FnOnce(&mut S),
    revert: impl FnOnce(&mut S),
    remote: Fut,
) -> AppResult<R>
where
    Fut: Future<Output = AppResult<R>>,
{
    apply(&mut state.write());
    match remote.await {
        Ok(value) => Ok(value),
        Err(e) => {
            revert(&mut state.write());
            tracing::warn!(
                code = %e.code,
                error = %e,
                "Remote write failed, local change reverted"
            );
            Err(e)
        }
    }
}
