//! User profile operations.

use sea_orm::ConnectionTrait;
use tracing::info;

use crate::utils::time;
use crate::error::AppError;
use crate::repos::users::{self, WechatUser};

/// Fetch the profile for a user id.
pub async fn get_profile<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: &str,
) -> Result<WechatUser, AppError> {
    users::find_by_user_id(conn, user_id)
        .await?
        .ok_or_else(AppError::auth_user_not_found)
}

/// Update the current user's nickname. Returns whether a row changed.
pub async fn update_nickname<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: &str,
    nickname: &str,
) -> Result<bool, AppError> {
    if nickname.trim().is_empty() {
        return Err(AppError::param("昵称不能为空"));
    }

    users::update_nickname(conn, user_id, nickname.trim(), time::current_millis()).await?;
    info!(user_id = %user_id, "nickname updated");
    Ok(true)
}
