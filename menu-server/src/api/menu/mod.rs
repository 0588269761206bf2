//! Catalog views
//!
//! | 路径 | 说明 |
//! |------|------|
//! | GET /api/tenants/{tenant}/menu | 公共菜单 |
//! | GET /api/tenants/{tenant}/admin/catalog | 管理端目录 |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/tenants/{tenant}", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/menu", get(handler::public_menu))
        .route("/admin/catalog", get(handler::admin_catalog))
}
