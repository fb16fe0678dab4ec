//! Favorite-category domain model and data access (generic over
//! ConnectionTrait).

use sea_orm::ConnectionTrait;

use crate::adapters::categories_sea as categories_adapter;
use crate::entities::favorite_categories;
use crate::error::AppError;

/// System-preset marker for `is_system`.
pub const CATEGORY_SYSTEM: i32 = 1;

/// Favorite-category domain model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub sort_order: i32,
    pub is_system: i32,
    pub created_time: i64,
    pub updated_time: i64,
}

impl Category {
    pub fn is_system(&self) -> bool {
        self.is_system == CATEGORY_SYSTEM
    }
}

/// One page of categories plus the total row count.
#[derive(Debug, Clone)]
pub struct CategoryPage {
    pub records: Vec<Category>,
    pub total: u64,
    pub page_num: u64,
    pub page_size: u64,
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<Category>, AppError> {
    let category = categories_adapter::find_by_id(conn, id).await?;
    Ok(category.map(Category::from))
}

pub async fn find_by_name<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<Option<Category>, AppError> {
    let category = categories_adapter::find_by_name(conn, name).await?;
    Ok(category.map(Category::from))
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: String,
    description: Option<String>,
    icon: Option<String>,
    sort_order: i32,
    now_millis: i64,
) -> Result<Category, AppError> {
    let inserted =
        categories_adapter::insert(conn, name, description, icon, sort_order, now_millis).await?;
    Ok(Category::from(inserted))
}

pub async fn update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    name: String,
    description: Option<String>,
    icon: Option<String>,
    sort_order: Option<i32>,
    now_millis: i64,
) -> Result<Option<Category>, AppError> {
    let Some(category) = categories_adapter::find_by_id(conn, id).await? else {
        return Ok(None);
    };
    let updated = categories_adapter::update(
        conn,
        category,
        name,
        description,
        icon,
        sort_order,
        now_millis,
    )
    .await?;
    Ok(Some(Category::from(updated)))
}

pub async fn soft_delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    now_millis: i64,
) -> Result<bool, AppError> {
    let Some(category) = categories_adapter::find_by_id(conn, id).await? else {
        return Ok(false);
    };
    categories_adapter::soft_delete(conn, category, now_millis).await?;
    Ok(true)
}

pub async fn page<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    page_num: u64,
    page_size: u64,
    name_filter: Option<&str>,
    is_system: Option<i32>,
) -> Result<CategoryPage, AppError> {
    let (records, total) =
        categories_adapter::find_page(conn, page_num, page_size, name_filter, is_system).await?;
    Ok(CategoryPage {
        records: records.into_iter().map(Category::from).collect(),
        total,
        page_num,
        page_size,
    })
}

pub async fn list_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Category>, AppError> {
    let categories = categories_adapter::find_all(conn).await?;
    Ok(categories.into_iter().map(Category::from).collect())
}

impl From<favorite_categories::Model> for Category {
    fn from(model: favorite_categories::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            icon: model.icon,
            sort_order: model.sort_order,
            is_system: model.is_system,
            created_time: model.created_time,
            updated_time: model.updated_time,
        }
    }
}
