#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod auth;
pub mod config;
pub mod entities;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod infra;
pub mod middleware;
pub mod repos;
pub mod routes;
pub mod services;
pub mod state;
pub mod telemetry;
pub mod utils;

// Re-exports for public API
pub use auth::policy::{AuthPolicy, PolicyRegistry};
pub use auth::token::{decode_token, generate_token, is_token_valid, TokenClaims};
pub use auth::user_context;
pub use config::wechat::WechatConfig;
pub use error::AppError;
pub use errors::ErrorCode;
pub use extractors::CurrentUser;
pub use infra::db::connect_db;
pub use middleware::auth_guard::TOKEN_HEADER;
pub use middleware::{cors_middleware, AuthGuard, RequestTrace};
pub use state::app_state::AppState;
