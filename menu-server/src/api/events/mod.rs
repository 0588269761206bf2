//! 变更通知流 (Server-Sent Events)
//!
//! `GET /api/tenants/{tenant}/events[?resource=settings]`
//!
//! 每条事件: `event: <resource>`, `id: <version>`, `data: <SyncPayload JSON>`

use std::convert::Infallible;

use axum::{
    Router,
    extract::{Query, State},
    response::sse::{Event, KeepAlive, Sse},
    routing::get,
};
use futures::stream::{self, Stream};
use serde::Deserialize;
use tokio::sync::broadcast::error::RecvError;

use crate::core::ServerState;
use crate::message::SubscriptionFilter;
use crate::tenant::TenantScope;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/tenants/{tenant}/events", get(subscribe))
}

#[derive(Debug, Default, Deserialize)]
pub struct EventsQuery {
    /// 仅订阅单一资源 ("category" | "menu_item" | "settings")
    pub resource: Option<String>,
}

/// GET /api/tenants/{tenant}/events - 订阅变更通知
pub async fn subscribe(
    State(state): State<ServerState>,
    scope: TenantScope,
    Query(query): Query<EventsQuery>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let filter = SubscriptionFilter {
        tenant: scope.namespace().to_string(),
        resource: query.resource.filter(|r| !r.trim().is_empty()),
    };
    tracing::debug!(tenant = %filter.tenant, resource = ?filter.resource, "Change stream opened");

    let rx = state.bus.subscribe();
    let events = stream::unfold((rx, filter), |(mut rx, filter)| async move {
        loop {
            match rx.recv().await {
                Ok(payload) if filter.matches(&payload) => {
                    let event = match Event::default()
                        .event(payload.resource.as_str())
                        .id(payload.version.to_string())
                        .json_data(&payload)
                    {
                        Ok(event) => event,
                        Err(e) => {
                            tracing::warn!(error = %e, "Failed to encode change event");
                            continue;
                        }
                    };
                    return Some((Ok(event), (rx, filter)));
                }
                Ok(_) => continue,
                Err(RecvError::Lagged(skipped)) => {
                    // 订阅者落后：提示客户端全量刷新
                    tracing::warn!(tenant = %filter.tenant, skipped, "Change stream lagged");
                    let event = Event::default().event("resync").data(skipped.to_string());
                    return Some((Ok(event), (rx, filter)));
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}
