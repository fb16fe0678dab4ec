use sea_orm::DatabaseConnection;

use crate::config::wechat::WechatConfig;
use crate::error::AppError;

/// Application state containing shared resources
#[derive(Debug)]
pub struct AppState {
    /// Database connection (optional for test scenarios)
    pub db: Option<DatabaseConnection>,
    /// WeChat mini-app credentials and endpoints
    pub wechat: WechatConfig,
    /// Shared HTTP client for outbound calls
    pub http: reqwest::Client,
}

impl AppState {
    /// Create a new AppState with the given database connection
    pub fn new(db: DatabaseConnection, wechat: WechatConfig, http: reqwest::Client) -> Self {
        Self {
            db: Some(db),
            wechat,
            http,
        }
    }

    /// Create a new AppState without a database connection (for testing)
    pub fn without_db(wechat: WechatConfig, http: reqwest::Client) -> Self {
        Self {
            db: None,
            wechat,
            http,
        }
    }

    /// Database connection, or a config error when none was wired.
    pub fn require_db(&self) -> Result<&DatabaseConnection, AppError> {
        self.db
            .as_ref()
            .ok_or_else(|| AppError::config("database connection not available".to_string()))
    }
}
