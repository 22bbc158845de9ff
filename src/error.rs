use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

/// 统一的应用错误类型 / Unified application error
///
/// 所有处理器只返回带类型的错误，状态码翻译集中在 `error_response` 一处
/// Handlers only surface typed variants; status-code translation lives in
/// one place (`error_response`).
#[derive(Error, Debug)]
pub enum AppError {
    #[error("配置错误: {0}")]
    Config(#[from] crate::comm::config::ConfigError),

    /// 请求体缺少必填字段 / missing required request fields
    #[error("{message}")]
    Validation { message: String },

    /// 与现有记录冲突 / conflict with an existing record
    #[error("{message}")]
    Conflict { message: String },

    /// 未匹配到路由 / no route matched the request
    #[error("Not Found: {path}")]
    NotFound { path: String },

    #[error("内部错误: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// 创建验证错误
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// 创建冲突错误
    pub fn conflict<T: Into<String>>(message: T) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// 创建路由未找到错误
    pub fn not_found<T: Into<String>>(path: T) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// 获取HTTP状态码
    pub fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        // 记录错误日志 / log by severity
        match self {
            AppError::Internal(_) | AppError::Config(_) => {
                tracing::error!("Internal error: {}", self);
            }
            _ => {
                tracing::info!("Client error: {}", self);
            }
        }

        // 错误响应体始终是至少带 `error` 字段的 JSON 对象
        // Error bodies are always JSON objects with at least an `error` field.
        let body = match self {
            AppError::NotFound { path } => json!({
                "error": "Not Found",
                "path": path,
            }),
            AppError::Internal(_) | AppError::Config(_) => json!({
                "error": "Internal Server Error",
            }),
            other => json!({
                "error": other.to_string(),
            }),
        };

        HttpResponse::build(status).json(body)
    }
}

/// 应用结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::MessageBody;
    use actix_web::http::StatusCode;

    fn body_json(resp: HttpResponse) -> serde_json::Value {
        let bytes = resp.into_body().try_into_bytes().unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(
            AppError::validation("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::conflict("x").status_code(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::not_found("/x").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Internal(anyhow::anyhow!("boom")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_not_found_body_carries_path() {
        let resp = AppError::not_found("/does-not-exist").error_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body = body_json(resp);
        assert_eq!(body["error"], "Not Found");
        assert_eq!(body["path"], "/does-not-exist");
    }

    #[test]
    fn test_internal_error_body_is_opaque() {
        let resp = AppError::Internal(anyhow::anyhow!("secret detail")).error_response();
        let body = body_json(resp);
        assert_eq!(body["error"], "Internal Server Error");
        assert!(body.get("path").is_none());
    }

    #[test]
    fn test_client_error_body_carries_message() {
        let resp = AppError::validation("Username and email are required").error_response();
        let body = body_json(resp);
        assert_eq!(body["error"], "Username and email are required");
    }
}
