//! 搜索关键词生成
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/tenants/{tenant}/keywords | POST | 生成建议关键词 (服务不可用时 503) |

use axum::{Json, Router, extract::State, routing::post};

use crate::assist::{KeywordInput, KeywordSuggestion};
use crate::core::ServerState;
use crate::tenant::TenantScope;
use crate::utils::{ApiResponse, AppError, AppResult};

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/tenants/{tenant}/keywords", post(generate))
}

/// POST /api/tenants/{tenant}/keywords - 生成搜索关键词
///
/// 仅为建议，调用方可在失败时继续保存
pub async fn generate(
    State(state): State<ServerState>,
    scope: TenantScope,
    Json(input): Json<KeywordInput>,
) -> AppResult<ApiResponse<KeywordSuggestion>> {
    if input.name.trim().is_empty() {
        return Err(AppError::required("name"));
    }

    let search_keywords = state.keywords.generate(&input).await.inspect_err(|e| {
        tracing::warn!(
            tenant = %scope.namespace(),
            item = %input.name,
            error = %e,
            "Keyword generation failed"
        );
    })?;
    Ok(ApiResponse::success(KeywordSuggestion { search_keywords }))
}
