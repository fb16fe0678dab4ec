use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Favorite-category row. `is_system` marks preset categories that cannot be
/// edited or deleted; `deleted` is a soft-delete flag.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "favorite_categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    #[sea_orm(column_name = "sort_order")]
    pub sort_order: i32,
    /// 0 = user-created, 1 = system preset
    #[sea_orm(column_name = "is_system")]
    pub is_system: i32,
    #[sea_orm(column_name = "created_time")]
    pub created_time: i64,
    #[sea_orm(column_name = "updated_time")]
    pub updated_time: i64,
    pub deleted: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
