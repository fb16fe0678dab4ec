use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;

use crate::errors::ErrorCode;

/// Error payload returned to clients: a stable code plus a human-readable
/// message. Errors are never silently downgraded to success responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid parameter: {detail}")]
    Param { detail: String },
    #[error("Unauthorized: {detail}")]
    Auth { code: ErrorCode, detail: String },
    #[error("Forbidden: {detail}")]
    Forbidden { code: ErrorCode, detail: String },
    #[error("Not found: {detail}")]
    NotFound { code: ErrorCode, detail: String },
    #[error("Conflict: {detail}")]
    Conflict { code: ErrorCode, detail: String },
    #[error("WeChat error: {detail}")]
    Wechat { code: ErrorCode, detail: String },
    #[error("Database error: {detail}")]
    Db { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
}

impl AppError {
    /// Stable error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Param { .. } => ErrorCode::ParamError,
            AppError::Auth { code, .. } => *code,
            AppError::Forbidden { code, .. } => *code,
            AppError::NotFound { code, .. } => *code,
            AppError::Conflict { code, .. } => *code,
            AppError::Wechat { code, .. } => *code,
            AppError::Db { .. } => ErrorCode::DbError,
            AppError::Config { .. } => ErrorCode::ConfigError,
            AppError::Internal { .. } => ErrorCode::SystemError,
        }
    }

    /// User-facing message for this error.
    fn message(&self) -> String {
        match self {
            AppError::Param { detail }
            | AppError::Auth { detail, .. }
            | AppError::Forbidden { detail, .. }
            | AppError::NotFound { detail, .. }
            | AppError::Conflict { detail, .. }
            | AppError::Wechat { detail, .. } => detail.clone(),
            // Internal detail stays in logs; clients get the generic message.
            AppError::Db { .. } | AppError::Config { .. } | AppError::Internal { .. } => {
                self.code().default_message().to_string()
            }
        }
    }

    /// Get the HTTP status code for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Param { .. } => StatusCode::BAD_REQUEST,
            AppError::Auth { .. } => StatusCode::UNAUTHORIZED,
            AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Wechat { .. } => StatusCode::BAD_GATEWAY,
            AppError::Db { .. } | AppError::Config { .. } | AppError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn param(detail: impl Into<String>) -> Self {
        Self::Param { detail: detail.into() }
    }

    pub fn auth_token_missing(detail: impl Into<String>) -> Self {
        Self::Auth {
            code: ErrorCode::AuthTokenMissing,
            detail: detail.into(),
        }
    }

    pub fn auth_token_invalid() -> Self {
        Self::Auth {
            code: ErrorCode::AuthTokenInvalid,
            detail: ErrorCode::AuthTokenInvalid.default_message().to_string(),
        }
    }

    pub fn auth_user_not_found() -> Self {
        Self::Auth {
            code: ErrorCode::AuthUserNotFound,
            detail: ErrorCode::AuthUserNotFound.default_message().to_string(),
        }
    }

    pub fn auth_user_disabled() -> Self {
        Self::Forbidden {
            code: ErrorCode::AuthUserDisabled,
            detail: ErrorCode::AuthUserDisabled.default_message().to_string(),
        }
    }

    pub fn wechat_login_failed(detail: impl Into<String>) -> Self {
        Self::Wechat {
            code: ErrorCode::WechatLoginFailed,
            detail: detail.into(),
        }
    }

    pub fn wechat_api_error(detail: impl Into<String>) -> Self {
        Self::Wechat {
            code: ErrorCode::WechatApiError,
            detail: detail.into(),
        }
    }

    pub fn conflict(code: ErrorCode) -> Self {
        Self::Conflict {
            code,
            detail: code.default_message().to_string(),
        }
    }

    pub fn not_found(code: ErrorCode) -> Self {
        Self::NotFound {
            code,
            detail: code.default_message().to_string(),
        }
    }

    pub fn db(detail: impl Into<String>) -> Self {
        Self::Db { detail: detail.into() }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config { detail: detail.into() }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal { detail: detail.into() }
    }
}

impl From<std::env::VarError> for AppError {
    fn from(e: std::env::VarError) -> Self {
        AppError::config(format!("env var error: {e}"))
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(e: sea_orm::DbErr) -> Self {
        AppError::db(format!("db error: {e}"))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let body = ErrorBody {
            code: self.code().as_str().to_string(),
            message: self.message(),
        };
        HttpResponse::build(self.status()).json(body)
    }
}
