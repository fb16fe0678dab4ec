//! Request authenticator: token → claims → user directory → user context.
//!
//! One lookup attempt per request, no retry; a directory failure surfaces
//! immediately. Anything unexpected between decode and lookup is normalized
//! to an invalid-token rejection so internal detail never reaches the
//! caller.

use sea_orm::ConnectionTrait;
use tracing::warn;

use crate::auth::{token, user_context};
use crate::error::AppError;
use crate::repos::users::{self, WechatUser};

/// Authenticate a raw token and populate the request-scoped user context.
///
/// Failure modes, in order:
/// - blank/absent token → `AUTH_TOKEN_MISSING`
/// - no usable user id in the token → `AUTH_TOKEN_INVALID`
/// - no matching user → `AUTH_USER_NOT_FOUND`
/// - unexpected decode/lookup failure → `AUTH_TOKEN_INVALID`
///
/// The disabled-status check is the caller's responsibility.
pub async fn authenticate<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    raw_token: &str,
) -> Result<WechatUser, AppError> {
    if raw_token.trim().is_empty() {
        return Err(AppError::auth_token_missing(
            crate::errors::ErrorCode::AuthTokenMissing.default_message(),
        ));
    }

    let user_id = match token::decode_token(raw_token) {
        Some(claims) if !claims.user_id.is_empty() => claims.user_id,
        _ => return Err(AppError::auth_token_invalid()),
    };

    let user = match users::find_by_user_id(conn, &user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => return Err(AppError::auth_user_not_found()),
        Err(err) => {
            warn!(user_id = %user_id, error = %err, "user lookup failed during authentication");
            return Err(AppError::auth_token_invalid());
        }
    };

    user_context::set_current_user(user.clone());
    user_context::set_current_token(raw_token.to_string());

    Ok(user)
}
