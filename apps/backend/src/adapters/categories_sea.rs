//! SeaORM adapter for favorite categories.
//!
//! Adapter functions return DbErr; the repos layer maps to AppError.
//! Deletion is a soft delete: rows flip `deleted` to 1 and drop out of
//! every query here.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::favorite_categories;

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<favorite_categories::Model>, sea_orm::DbErr> {
    favorite_categories::Entity::find()
        .filter(favorite_categories::Column::Id.eq(id))
        .filter(favorite_categories::Column::Deleted.eq(0))
        .one(conn)
        .await
}

pub async fn find_by_name<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<Option<favorite_categories::Model>, sea_orm::DbErr> {
    favorite_categories::Entity::find()
        .filter(favorite_categories::Column::Name.eq(name))
        .filter(favorite_categories::Column::Deleted.eq(0))
        .one(conn)
        .await
}

pub async fn insert<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: String,
    description: Option<String>,
    icon: Option<String>,
    sort_order: i32,
    now_millis: i64,
) -> Result<favorite_categories::Model, sea_orm::DbErr> {
    let active = favorite_categories::ActiveModel {
        id: sea_orm::NotSet,
        name: Set(name),
        description: Set(description),
        icon: Set(icon),
        sort_order: Set(sort_order),
        is_system: Set(0),
        created_time: Set(now_millis),
        updated_time: Set(now_millis),
        deleted: Set(0),
    };
    active.insert(conn).await
}

pub async fn update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    category: favorite_categories::Model,
    name: String,
    description: Option<String>,
    icon: Option<String>,
    sort_order: Option<i32>,
    now_millis: i64,
) -> Result<favorite_categories::Model, sea_orm::DbErr> {
    let mut active: favorite_categories::ActiveModel = category.into();
    active.name = Set(name);
    active.description = Set(description);
    active.icon = Set(icon);
    if let Some(sort_order) = sort_order {
        active.sort_order = Set(sort_order);
    }
    active.updated_time = Set(now_millis);
    active.update(conn).await
}

pub async fn soft_delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    category: favorite_categories::Model,
    now_millis: i64,
) -> Result<(), sea_orm::DbErr> {
    let mut active: favorite_categories::ActiveModel = category.into();
    active.deleted = Set(1);
    active.updated_time = Set(now_millis);
    active.update(conn).await?;
    Ok(())
}

/// Paged listing ordered by sort weight, then creation time, newest first.
pub async fn find_page<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    page_num: u64,
    page_size: u64,
    name_filter: Option<&str>,
    is_system: Option<i32>,
) -> Result<(Vec<favorite_categories::Model>, u64), sea_orm::DbErr> {
    let mut query = favorite_categories::Entity::find()
        .filter(favorite_categories::Column::Deleted.eq(0));

    if let Some(name) = name_filter {
        query = query.filter(favorite_categories::Column::Name.contains(name));
    }
    if let Some(is_system) = is_system {
        query = query.filter(favorite_categories::Column::IsSystem.eq(is_system));
    }

    let paginator = query
        .order_by_desc(favorite_categories::Column::SortOrder)
        .order_by_desc(favorite_categories::Column::CreatedTime)
        .paginate(conn, page_size);

    let total = paginator.num_items().await?;
    // Page numbers are 1-based at the API boundary.
    let records = paginator.fetch_page(page_num.saturating_sub(1)).await?;
    Ok((records, total))
}

pub async fn find_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<favorite_categories::Model>, sea_orm::DbErr> {
    favorite_categories::Entity::find()
        .filter(favorite_categories::Column::Deleted.eq(0))
        .order_by_desc(favorite_categories::Column::SortOrder)
        .order_by_desc(favorite_categories::Column::CreatedTime)
        .all(conn)
        .await
}
