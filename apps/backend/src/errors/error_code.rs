//! Error codes for the mini-app backend API.
//!
//! This module defines all error codes used throughout the application.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses. The default messages keep the
//! product's user-facing phrasing.

use core::fmt;

/// Centralized error codes for the mini-app backend API.
///
/// Each variant maps to a canonical SCREAMING_SNAKE_CASE string that appears
/// in HTTP responses, plus the default human-readable message for that code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request validation
    /// Invalid or missing request parameter
    ParamError,

    // Authentication
    /// Guarded route called without the token header
    AuthTokenMissing,
    /// Token present but undecodable or missing required claims
    AuthTokenInvalid,
    /// Token decodes to a user id with no matching user
    AuthUserNotFound,
    /// User exists but is disabled
    AuthUserDisabled,

    // WeChat collaborator
    /// WeChat login flow failed
    WechatLoginFailed,
    /// WeChat API call or response parsing failed
    WechatApiError,

    // Favorite categories
    /// Category name already taken
    CategoryNameExists,
    /// Category does not exist
    CategoryNotExists,
    /// System categories cannot be edited
    SystemCategoryNotEditable,
    /// System categories cannot be deleted
    SystemCategoryNotDeletable,

    // System errors
    /// Database error
    DbError,
    /// Configuration error
    ConfigError,
    /// Generic system error
    SystemError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    ///
    /// This is the exact string that appears in HTTP responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ParamError => "PARAM_ERROR",

            Self::AuthTokenMissing => "AUTH_TOKEN_MISSING",
            Self::AuthTokenInvalid => "AUTH_TOKEN_INVALID",
            Self::AuthUserNotFound => "AUTH_USER_NOT_FOUND",
            Self::AuthUserDisabled => "AUTH_USER_DISABLED",

            Self::WechatLoginFailed => "WECHAT_LOGIN_FAILED",
            Self::WechatApiError => "WECHAT_API_ERROR",

            Self::CategoryNameExists => "CATEGORY_NAME_EXISTS",
            Self::CategoryNotExists => "CATEGORY_NOT_EXISTS",
            Self::SystemCategoryNotEditable => "SYSTEM_CATEGORY_NOT_EDITABLE",
            Self::SystemCategoryNotDeletable => "SYSTEM_CATEGORY_NOT_DELETABLE",

            Self::DbError => "DB_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
            Self::SystemError => "SYSTEM_ERROR",
        }
    }

    /// Default user-facing message for this code.
    pub const fn default_message(&self) -> &'static str {
        match self {
            Self::ParamError => "参数错误",

            Self::AuthTokenMissing => "访问令牌缺失",
            Self::AuthTokenInvalid => "访问令牌无效",
            Self::AuthUserNotFound => "用户不存在",
            Self::AuthUserDisabled => "用户已被禁用",

            Self::WechatLoginFailed => "微信登录失败",
            Self::WechatApiError => "微信接口调用失败",

            Self::CategoryNameExists => "分类名称已存在",
            Self::CategoryNotExists => "分类不存在",
            Self::SystemCategoryNotEditable => "系统分类不允许修改",
            Self::SystemCategoryNotDeletable => "系统分类不允许删除",

            Self::DbError => "系统错误",
            Self::ConfigError => "系统错误",
            Self::SystemError => "系统错误",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_strings() {
        assert_eq!(ErrorCode::ParamError.as_str(), "PARAM_ERROR");
        assert_eq!(ErrorCode::AuthTokenMissing.as_str(), "AUTH_TOKEN_MISSING");
        assert_eq!(ErrorCode::AuthTokenInvalid.as_str(), "AUTH_TOKEN_INVALID");
        assert_eq!(ErrorCode::AuthUserNotFound.as_str(), "AUTH_USER_NOT_FOUND");
        assert_eq!(ErrorCode::AuthUserDisabled.as_str(), "AUTH_USER_DISABLED");
        assert_eq!(ErrorCode::WechatLoginFailed.as_str(), "WECHAT_LOGIN_FAILED");
        assert_eq!(ErrorCode::WechatApiError.as_str(), "WECHAT_API_ERROR");
        assert_eq!(ErrorCode::CategoryNameExists.as_str(), "CATEGORY_NAME_EXISTS");
        assert_eq!(ErrorCode::CategoryNotExists.as_str(), "CATEGORY_NOT_EXISTS");
        assert_eq!(
            ErrorCode::SystemCategoryNotEditable.as_str(),
            "SYSTEM_CATEGORY_NOT_EDITABLE"
        );
        assert_eq!(
            ErrorCode::SystemCategoryNotDeletable.as_str(),
            "SYSTEM_CATEGORY_NOT_DELETABLE"
        );
        assert_eq!(ErrorCode::DbError.as_str(), "DB_ERROR");
        assert_eq!(ErrorCode::ConfigError.as_str(), "CONFIG_ERROR");
        assert_eq!(ErrorCode::SystemError.as_str(), "SYSTEM_ERROR");
    }

    #[test]
    fn test_display_trait() {
        assert_eq!(format!("{}", ErrorCode::AuthTokenMissing), "AUTH_TOKEN_MISSING");
        assert_eq!(format!("{}", ErrorCode::CategoryNotExists), "CATEGORY_NOT_EXISTS");
    }

    #[test]
    fn test_default_messages() {
        assert_eq!(ErrorCode::AuthTokenMissing.default_message(), "访问令牌缺失");
        assert_eq!(ErrorCode::AuthUserDisabled.default_message(), "用户已被禁用");
        assert_eq!(ErrorCode::CategoryNameExists.default_message(), "分类名称已存在");
    }
}
