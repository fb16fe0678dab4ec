//! SeaORM adapter for the WeChat user store.
//!
//! Adapter functions return DbErr; the repos layer maps to AppError.
//! Soft-deleted rows are invisible to every query here.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set,
};

use crate::entities::wechat_users;

pub async fn find_by_user_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: &str,
) -> Result<Option<wechat_users::Model>, sea_orm::DbErr> {
    wechat_users::Entity::find()
        .filter(wechat_users::Column::Id.eq(user_id))
        .filter(wechat_users::Column::Deleted.eq(0))
        .one(conn)
        .await
}

pub async fn find_by_openid<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    openid: &str,
) -> Result<Option<wechat_users::Model>, sea_orm::DbErr> {
    wechat_users::Entity::find()
        .filter(wechat_users::Column::Openid.eq(openid))
        .filter(wechat_users::Column::Deleted.eq(0))
        .one(conn)
        .await
}

pub async fn insert<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    model: wechat_users::Model,
) -> Result<wechat_users::Model, sea_orm::DbErr> {
    let mut active: wechat_users::ActiveModel = model.into();
    active.deleted = Set(0);
    active.insert(conn).await
}

pub async fn update_login_info<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user: wechat_users::Model,
    login_ip: Option<String>,
    user_agent: Option<String>,
    now_millis: i64,
) -> Result<wechat_users::Model, sea_orm::DbErr> {
    let mut active: wechat_users::ActiveModel = user.into();
    active.last_login_time = Set(Some(now_millis));
    active.last_login_ip = Set(login_ip);
    active.user_agent = Set(user_agent);
    active.updated_time = Set(now_millis);
    active.update(conn).await
}

pub async fn update_nickname<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user: wechat_users::Model,
    nickname: &str,
    now_millis: i64,
) -> Result<wechat_users::Model, sea_orm::DbErr> {
    let mut active: wechat_users::ActiveModel = user.into();
    active.nickname = Set(nickname.to_string());
    active.updated_time = Set(now_millis);
    active.update(conn).await
}
