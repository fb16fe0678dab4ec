use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::user_context;
use crate::error::AppError;
use crate::extractors::CurrentUser;
use crate::repos::users::WechatUser;
use crate::services::users as users_service;
use crate::services::wechat_auth::{self, LoginOutcome};
use crate::state::app_state::AppState;
use crate::utils::client_ip::client_ip;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub code: String,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user_id: String,
    pub nickname: String,
    pub avatar_url: String,
    pub last_login_time: Option<i64>,
    pub access_token: String,
}

impl From<LoginOutcome> for LoginResponse {
    fn from(outcome: LoginOutcome) -> Self {
        Self {
            user_id: outcome.user.id,
            nickname: outcome.user.nickname,
            avatar_url: outcome.user.avatar_url,
            last_login_time: outcome.user.last_login_time,
            access_token: outcome.access_token,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileResponse {
    pub user_id: String,
    pub nickname: String,
    pub avatar_url: String,
    pub gender: Option<i32>,
    pub country: Option<String>,
    pub province: Option<String>,
    pub city: Option<String>,
}

impl From<WechatUser> for UserProfileResponse {
    fn from(user: WechatUser) -> Self {
        Self {
            user_id: user.id,
            nickname: user.nickname,
            avatar_url: user.avatar_url,
            gender: user.gender,
            country: user.country,
            province: user.province,
            city: user.city,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNicknameRequest {
    pub nickname: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNicknameResponse {
    pub updated: bool,
}

/// Mini-app login: exchange the WeChat authorization code for a profile and
/// an access token.
async fn miniapp_login(
    req: HttpRequest,
    body: web::Json<LoginRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let client_ip = client_ip(&req);
    let user_agent = req
        .headers()
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    let outcome = wechat_auth::mini_app_login(
        &app_state,
        &body.code,
        body.nickname.as_deref(),
        body.avatar_url.as_deref(),
        client_ip,
        user_agent,
    )
    .await?;

    Ok(HttpResponse::Ok().json(LoginResponse::from(outcome)))
}

/// Current user's profile. Guarded; the identity comes from the request
/// context populated by the guard.
async fn user_info(
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = app_state.require_db()?;
    let user = users_service::get_profile(db, &current_user.0.id).await?;
    Ok(HttpResponse::Ok().json(UserProfileResponse::from(user)))
}

/// Update the current user's nickname. Guarded.
async fn update_nickname(
    current_user: CurrentUser,
    body: web::Json<UpdateNicknameRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = app_state.require_db()?;
    let updated = users_service::update_nickname(db, &current_user.0.id, &body.nickname).await?;
    Ok(HttpResponse::Ok().json(UpdateNicknameResponse { updated }))
}

/// Logout: drop the request's identity. Always succeeds; with a stateless
/// token there is nothing server-side to revoke.
async fn logout() -> Result<HttpResponse, AppError> {
    if let Some(user_id) = user_context::current_user_id() {
        info!(user_id = %user_id, "user logged out");
    }
    user_context::clear();
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "退出登录成功" })))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/auth/miniapp/login").route(web::post().to(miniapp_login)));
    cfg.service(web::resource("/api/auth/user/info").route(web::get().to(user_info)));
    cfg.service(web::resource("/api/auth/user/nickname").route(web::put().to(update_nickname)));
    cfg.service(web::resource("/api/auth/logout").route(web::post().to(logout)));
}
