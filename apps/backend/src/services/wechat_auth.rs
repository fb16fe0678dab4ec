//! WeChat login flow.
//!
//! Exchanges the mini-app authorization code for an openid + session key at
//! the WeChat API, finds or creates the user, records the login, and issues
//! an access token.

use serde::Deserialize;
use tracing::{info, warn};

use crate::auth::token::{self, DEVICE_TYPE_MINIAPP};
use crate::error::AppError;
use crate::repos::users::{self, NewWechatUser, WechatUser};
use crate::state::app_state::AppState;
use crate::utils::{time, uid};

const DEFAULT_NICKNAME: &str = "微信用户";

/// Result of a successful login: the user (with login info refreshed) and a
/// freshly minted token.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: WechatUser,
    pub access_token: String,
}

/// `jscode2session` response. A missing/zero `errcode` means success.
#[derive(Debug, Deserialize)]
struct Code2SessionResponse {
    openid: Option<String>,
    session_key: Option<String>,
    unionid: Option<String>,
    errcode: Option<i64>,
    errmsg: Option<String>,
}

impl Code2SessionResponse {
    fn is_success(&self) -> bool {
        matches!(self.errcode, None | Some(0))
    }
}

/// Identity material returned by WeChat for one login code.
#[derive(Debug)]
struct WechatSession {
    openid: String,
    session_key: String,
    unionid: Option<String>,
}

/// Log a user in with a mini-app authorization code.
pub async fn mini_app_login(
    state: &AppState,
    code: &str,
    nickname: Option<&str>,
    avatar_url: Option<&str>,
    client_ip: Option<String>,
    user_agent: Option<String>,
) -> Result<LoginOutcome, AppError> {
    if code.trim().is_empty() {
        warn!("mini-app login rejected: empty authorization code");
        return Err(AppError::param("微信登录凭证不能为空"));
    }

    let session = code_to_session(state, code).await?;

    let db = state.require_db()?;
    let user = match users::find_by_openid(db, &session.openid).await? {
        Some(user) => user,
        None => {
            info!(openid = %session.openid, "first login, creating user");
            let now = time::current_millis();
            users::create(
                db,
                NewWechatUser {
                    id: uid::generate_user_id(),
                    openid: session.openid.clone(),
                    unionid: session.unionid.clone(),
                    nickname: nickname
                        .filter(|n| !n.trim().is_empty())
                        .unwrap_or(DEFAULT_NICKNAME)
                        .to_string(),
                    avatar_url: avatar_url.unwrap_or_default().to_string(),
                    session_key: session.session_key.clone(),
                    created_time: now,
                },
            )
            .await?
        }
    };

    let user = users::update_login_info(
        db,
        &user.id,
        client_ip,
        user_agent,
        time::current_millis(),
    )
    .await?;

    let access_token = token::generate_token(&user.id, DEVICE_TYPE_MINIAPP, time::current_millis());

    info!(user_id = %user.id, "mini-app login succeeded");
    Ok(LoginOutcome { user, access_token })
}

/// Exchange an authorization code for openid + session key.
async fn code_to_session(state: &AppState, code: &str) -> Result<WechatSession, AppError> {
    let url = state.wechat.jscode2session_url();

    let response = state
        .http
        .get(&url)
        .query(&[
            ("appid", state.wechat.app_id.as_str()),
            ("secret", state.wechat.app_secret.as_str()),
            ("js_code", code),
            ("grant_type", "authorization_code"),
        ])
        .send()
        .await
        .map_err(|err| {
            warn!(error = %err, "jscode2session request failed");
            AppError::wechat_api_error("微信服务异常")
        })?;

    let body: Code2SessionResponse = response.json().await.map_err(|err| {
        warn!(error = %err, "jscode2session response could not be parsed");
        AppError::wechat_api_error("解析微信响应失败")
    })?;

    if !body.is_success() {
        warn!(
            errcode = body.errcode,
            errmsg = body.errmsg.as_deref().unwrap_or(""),
            "jscode2session returned an error"
        );
        return Err(AppError::wechat_login_failed(format!(
            "微信登录失败: {}",
            body.errmsg.unwrap_or_default()
        )));
    }

    let openid = match body.openid {
        Some(openid) if !openid.is_empty() => openid,
        _ => {
            warn!("jscode2session returned an empty openid");
            return Err(AppError::wechat_login_failed("微信返回的用户标识为空"));
        }
    };

    Ok(WechatSession {
        openid,
        session_key: body.session_key.unwrap_or_default(),
        unionid: body.unionid,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::wechat::WechatConfig;
    use crate::errors::ErrorCode;

    fn test_state() -> AppState {
        AppState::without_db(WechatConfig::new("wx123", "secret"), reqwest::Client::new())
    }

    #[tokio::test]
    async fn test_empty_code_rejected_before_any_call() {
        let state = test_state();
        let err = mini_app_login(&state, "  ", None, None, None, None)
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ParamError);
    }

    #[test]
    fn test_code2session_success_detection() {
        let ok: Code2SessionResponse =
            serde_json::from_str(r#"{"openid":"o123","session_key":"sk"}"#).unwrap();
        assert!(ok.is_success());

        let explicit_zero: Code2SessionResponse =
            serde_json::from_str(r#"{"openid":"o123","session_key":"sk","errcode":0}"#).unwrap();
        assert!(explicit_zero.is_success());

        let failed: Code2SessionResponse =
            serde_json::from_str(r#"{"errcode":40029,"errmsg":"invalid code"}"#).unwrap();
        assert!(!failed.is_success());
    }
}
