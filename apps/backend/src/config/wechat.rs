use std::env;
use std::time::Duration;

use crate::error::AppError;

const DEFAULT_API_BASE_URL: &str = "https://api.weixin.qq.com";

/// WeChat mini-app credentials and endpoint configuration.
#[derive(Debug, Clone)]
pub struct WechatConfig {
    pub app_id: String,
    pub app_secret: String,
    pub api_base_url: String,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
}

impl WechatConfig {
    pub fn new(app_id: impl Into<String>, app_secret: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            app_secret: app_secret.into(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            connect_timeout: Duration::from_millis(5000),
            read_timeout: Duration::from_millis(10_000),
        }
    }

    /// Read configuration from `WECHAT_APPID` / `WECHAT_SECRET`
    /// (+ optional `WECHAT_API_BASE_URL`).
    pub fn from_env() -> Result<Self, AppError> {
        let app_id = env::var("WECHAT_APPID")
            .map_err(|_| AppError::config("WECHAT_APPID is not set".to_string()))?;
        let app_secret = env::var("WECHAT_SECRET")
            .map_err(|_| AppError::config("WECHAT_SECRET is not set".to_string()))?;

        let mut config = Self::new(app_id, app_secret);
        if let Ok(base_url) = env::var("WECHAT_API_BASE_URL") {
            config.api_base_url = base_url.trim_end_matches('/').to_string();
        }
        Ok(config)
    }

    /// Full URL of the code-to-session endpoint.
    pub fn jscode2session_url(&self) -> String {
        format!("{}/sns/jscode2session", self.api_base_url)
    }
}
