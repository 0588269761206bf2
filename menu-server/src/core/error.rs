use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::utils::{AppError, ErrorCode};

/// 启动及运行期错误 (请求级错误使用 [`AppError`])
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("配置错误: {0}")]
    Config(String),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    App(#[from] AppError),

    #[error("内部服务器错误")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let err = match self {
            ServerError::App(err) => err,
            ServerError::Config(msg) => AppError::with_message(ErrorCode::ConfigError, msg),
            ServerError::Io(err) => {
                tracing::error!(error = ?err, "I/O error");
                AppError::internal("An internal error occurred")
            }
            ServerError::Internal(err) => {
                // 记录内部错误但不暴露详细信息
                tracing::error!(error = ?err, "Internal server error");
                AppError::internal("An internal error occurred")
            }
        };
        err.into_response()
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_keeps_status() {
        let resp = ServerError::from(AppError::tenant_not_found("nope")).into_response();
        assert_eq!(resp.status(), http::StatusCode::NOT_FOUND);

        let resp = ServerError::Internal(anyhow::anyhow!("boom")).into_response();
        assert_eq!(resp.status(), http::StatusCode::INTERNAL_SERVER_ERROR);
    }
}
