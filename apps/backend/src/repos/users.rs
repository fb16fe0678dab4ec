//! User directory: domain model and keyed reads/writes over the WeChat user
//! store (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;

use crate::adapters::users_sea as users_adapter;
use crate::entities::wechat_users;
use crate::error::AppError;

/// Active value of the `status` flag; anything else counts as disabled.
pub const USER_STATUS_ACTIVE: i32 = 1;

/// WeChat user domain model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WechatUser {
    pub id: String,
    pub openid: String,
    pub unionid: Option<String>,
    pub nickname: String,
    pub avatar_url: String,
    pub gender: Option<i32>,
    pub country: Option<String>,
    pub province: Option<String>,
    pub city: Option<String>,
    pub language: Option<String>,
    pub session_key: String,
    pub last_login_time: Option<i64>,
    pub last_login_ip: Option<String>,
    pub user_agent: Option<String>,
    pub status: i32,
    pub created_time: i64,
    pub updated_time: i64,
}

impl WechatUser {
    pub fn is_active(&self) -> bool {
        self.status == USER_STATUS_ACTIVE
    }
}

/// Fields for a first-login user row.
#[derive(Debug, Clone)]
pub struct NewWechatUser {
    pub id: String,
    pub openid: String,
    pub unionid: Option<String>,
    pub nickname: String,
    pub avatar_url: String,
    pub session_key: String,
    pub created_time: i64,
}

pub async fn find_by_user_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: &str,
) -> Result<Option<WechatUser>, AppError> {
    let user = users_adapter::find_by_user_id(conn, user_id).await?;
    Ok(user.map(WechatUser::from))
}

pub async fn find_by_openid<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    openid: &str,
) -> Result<Option<WechatUser>, AppError> {
    let user = users_adapter::find_by_openid(conn, openid).await?;
    Ok(user.map(WechatUser::from))
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    new_user: NewWechatUser,
) -> Result<WechatUser, AppError> {
    let model = wechat_users::Model {
        id: new_user.id,
        openid: new_user.openid,
        unionid: new_user.unionid,
        nickname: new_user.nickname,
        avatar_url: new_user.avatar_url,
        gender: None,
        country: None,
        province: None,
        city: None,
        language: None,
        session_key: new_user.session_key,
        last_login_time: None,
        last_login_ip: None,
        user_agent: None,
        status: USER_STATUS_ACTIVE,
        created_time: new_user.created_time,
        updated_time: new_user.created_time,
        deleted: 0,
    };
    let inserted = users_adapter::insert(conn, model).await?;
    Ok(WechatUser::from(inserted))
}

pub async fn update_login_info<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: &str,
    login_ip: Option<String>,
    user_agent: Option<String>,
    now_millis: i64,
) -> Result<WechatUser, AppError> {
    let user = users_adapter::find_by_user_id(conn, user_id)
        .await?
        .ok_or_else(|| AppError::param("用户不存在"))?;
    let updated =
        users_adapter::update_login_info(conn, user, login_ip, user_agent, now_millis).await?;
    Ok(WechatUser::from(updated))
}

pub async fn update_nickname<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: &str,
    nickname: &str,
    now_millis: i64,
) -> Result<WechatUser, AppError> {
    let user = users_adapter::find_by_user_id(conn, user_id)
        .await?
        .ok_or_else(|| AppError::param("用户不存在"))?;
    let updated = users_adapter::update_nickname(conn, user, nickname, now_millis).await?;
    Ok(WechatUser::from(updated))
}

impl From<wechat_users::Model> for WechatUser {
    fn from(model: wechat_users::Model) -> Self {
        Self {
            id: model.id,
            openid: model.openid,
            unionid: model.unionid,
            nickname: model.nickname,
            avatar_url: model.avatar_url,
            gender: model.gender,
            country: model.country,
            province: model.province,
            city: model.city,
            language: model.language,
            session_key: model.session_key,
            last_login_time: model.last_login_time,
            last_login_ip: model.last_login_ip,
            user_agent: model.user_agent,
            status: model.status,
            created_time: model.created_time,
            updated_time: model.updated_time,
        }
    }
}
