//! 变更通知
//!
//! # 架构
//!
//! ```text
//! handler ──▶ ServerState::broadcast_sync() ──▶ ChangeBus (broadcast)
//!                                                   │
//!                                   ┌───────────────┼───────────────┐
//!                                   ▼               ▼               ▼
//!                             SSE subscriber   SSE subscriber   ReorderSession
//! ```
//!
//! Every payload carries a version that grows per `tenant:resource`, so a
//! subscriber can drop stale or duplicated signals.

use dashmap::DashMap;
use shared::message::SyncPayload;
use tokio::sync::broadcast;

/// Capacity of the broadcast channel; slow subscribers lag past it
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1024;

/// 资源版本管理器
///
/// 每个 `tenant:resource` 维护独立的版本号，支持原子递增。
#[derive(Debug, Default)]
pub struct ResourceVersions {
    versions: DashMap<String, u64>,
}

impl ResourceVersions {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(tenant: &str, resource: &str) -> String {
        format!("{tenant}:{resource}")
    }

    /// 递增版本号并返回新值 (首次返回 1)
    pub fn increment(&self, tenant: &str, resource: &str) -> u64 {
        let mut entry = self.versions.entry(Self::key(tenant, resource)).or_insert(0);
        *entry += 1;
        *entry
    }

    /// 当前版本号 (未知资源返回 0)
    pub fn get(&self, tenant: &str, resource: &str) -> u64 {
        self.versions
            .get(&Self::key(tenant, resource))
            .map(|v| *v)
            .unwrap_or(0)
    }
}

/// 变更总线
#[derive(Debug, Clone)]
pub struct ChangeBus {
    tx: broadcast::Sender<SyncPayload>,
}

impl ChangeBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Returns the number of subscribers reached; zero is not an error
    pub fn publish(&self, payload: SyncPayload) -> usize {
        match self.tx.send(payload) {
            Ok(n) => n,
            Err(broadcast::error::SendError(payload)) => {
                tracing::trace!(
                    tenant = %payload.tenant,
                    resource = %payload.resource,
                    "No subscribers for change notification"
                );
                0
            }
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SyncPayload> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for ChangeBus {
    fn default() -> Self {
        Self::new(DEFAULT_CHANNEL_CAPACITY)
    }
}

/// Subscription filter: one tenant, optionally one resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionFilter {
    pub tenant: String,
    pub resource: Option<String>,
}

impl SubscriptionFilter {
    pub fn matches(&self, payload: &SyncPayload) -> bool {
        payload.tenant == self.tenant
            && self
                .resource
                .as_deref()
                .is_none_or(|r| r == payload.resource)
    }
}
