use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// WeChat user row. Timestamps are Unix milliseconds; `deleted` is a
/// soft-delete flag (0 = live, 1 = deleted).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "wechat_users")]
pub struct Model {
    /// Generated id, `FP` + timestamp prefix + random digits
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub openid: String,
    pub unionid: Option<String>,
    pub nickname: String,
    #[sea_orm(column_name = "avatar_url")]
    pub avatar_url: String,
    /// 0 = unknown, 1 = male, 2 = female
    pub gender: Option<i32>,
    pub country: Option<String>,
    pub province: Option<String>,
    pub city: Option<String>,
    pub language: Option<String>,
    #[sea_orm(column_name = "session_key")]
    pub session_key: String,
    #[sea_orm(column_name = "last_login_time")]
    pub last_login_time: Option<i64>,
    #[sea_orm(column_name = "last_login_ip")]
    pub last_login_ip: Option<String>,
    #[sea_orm(column_name = "user_agent")]
    pub user_agent: Option<String>,
    /// 0 = disabled, 1 = active
    pub status: i32,
    #[sea_orm(column_name = "created_time")]
    pub created_time: i64,
    #[sea_orm(column_name = "updated_time")]
    pub updated_time: i64,
    pub deleted: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
