//! Favorite-category management.
//!
//! Category names are unique among live rows; system presets can be read but
//! never edited or deleted.

use sea_orm::ConnectionTrait;
use tracing::{info, warn};

use crate::utils::time;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::repos::categories::{self, Category, CategoryPage};

/// Fields accepted when creating a category.
#[derive(Debug, Clone)]
pub struct CategoryCreate {
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub sort_order: Option<i32>,
}

/// Fields accepted when updating a category.
#[derive(Debug, Clone)]
pub struct CategoryUpdate {
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub sort_order: Option<i32>,
}

/// Paged-list filters.
#[derive(Debug, Clone)]
pub struct CategoryQuery {
    pub page_num: u64,
    pub page_size: u64,
    pub name: Option<String>,
    pub is_system: Option<i32>,
}

pub async fn add_category<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    create: CategoryCreate,
) -> Result<Category, AppError> {
    if create.name.trim().is_empty() {
        return Err(AppError::param("分类名称不能为空"));
    }

    if categories::find_by_name(conn, &create.name).await?.is_some() {
        warn!(name = %create.name, "category name already exists");
        return Err(AppError::conflict(ErrorCode::CategoryNameExists));
    }

    let category = categories::create(
        conn,
        create.name,
        create.description,
        create.icon,
        create.sort_order.unwrap_or(0),
        time::current_millis(),
    )
    .await?;

    info!(category_id = category.id, "category created");
    Ok(category)
}

pub async fn update_category<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    update: CategoryUpdate,
) -> Result<Category, AppError> {
    let existing = categories::find_by_id(conn, id)
        .await?
        .ok_or_else(|| AppError::not_found(ErrorCode::CategoryNotExists))?;

    if existing.is_system() {
        warn!(category_id = id, "attempted to edit a system category");
        return Err(AppError::conflict(ErrorCode::SystemCategoryNotEditable));
    }

    // Re-check name uniqueness, excluding the row being updated.
    if let Some(conflict) = categories::find_by_name(conn, &update.name).await? {
        if conflict.id != id {
            warn!(name = %update.name, "category name already exists");
            return Err(AppError::conflict(ErrorCode::CategoryNameExists));
        }
    }

    let updated = categories::update(
        conn,
        id,
        update.name,
        update.description,
        update.icon,
        update.sort_order,
        time::current_millis(),
    )
    .await?
    .ok_or_else(|| AppError::not_found(ErrorCode::CategoryNotExists))?;

    info!(category_id = id, "category updated");
    Ok(updated)
}

pub async fn delete_category<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<bool, AppError> {
    let existing = categories::find_by_id(conn, id)
        .await?
        .ok_or_else(|| AppError::not_found(ErrorCode::CategoryNotExists))?;

    if existing.is_system() {
        warn!(category_id = id, "attempted to delete a system category");
        return Err(AppError::conflict(ErrorCode::SystemCategoryNotDeletable));
    }

    let deleted = categories::soft_delete(conn, id, time::current_millis()).await?;
    info!(category_id = id, "category deleted");
    Ok(deleted)
}

pub async fn get_category<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Category, AppError> {
    categories::find_by_id(conn, id)
        .await?
        .ok_or_else(|| AppError::not_found(ErrorCode::CategoryNotExists))
}

pub async fn page_categories<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    query: CategoryQuery,
) -> Result<CategoryPage, AppError> {
    let page_num = query.page_num.max(1);
    let page_size = query.page_size.clamp(1, 100);
    categories::page(
        conn,
        page_num,
        page_size,
        query.name.as_deref().filter(|name| !name.is_empty()),
        query.is_system,
    )
    .await
}

pub async fn list_all_categories<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Category>, AppError> {
    categories::list_all(conn).await
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, MockDatabase};

    use super::*;
    use crate::entities::favorite_categories;

    fn category_row(id: i64, name: &str, is_system: i32) -> favorite_categories::Model {
        favorite_categories::Model {
            id,
            name: name.to_string(),
            description: None,
            icon: None,
            sort_order: 0,
            is_system,
            created_time: 0,
            updated_time: 0,
            deleted: 0,
        }
    }

    #[tokio::test]
    async fn test_add_rejects_duplicate_name() {
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![category_row(1, "技术文章", 0)]])
            .into_connection();

        let err = add_category(
            &conn,
            CategoryCreate {
                name: "技术文章".to_string(),
                description: None,
                icon: None,
                sort_order: None,
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.code(), ErrorCode::CategoryNameExists);
    }

    #[tokio::test]
    async fn test_add_rejects_blank_name() {
        let conn = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let err = add_category(
            &conn,
            CategoryCreate {
                name: " ".to_string(),
                description: None,
                icon: None,
                sort_order: None,
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ParamError);
    }

    #[tokio::test]
    async fn test_update_missing_category() {
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<favorite_categories::Model>::new()])
            .into_connection();

        let err = update_category(
            &conn,
            42,
            CategoryUpdate {
                name: "新名称".to_string(),
                description: None,
                icon: None,
                sort_order: None,
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.code(), ErrorCode::CategoryNotExists);
    }

    #[tokio::test]
    async fn test_update_rejects_system_category() {
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![category_row(1, "默认分类", 1)]])
            .into_connection();

        let err = update_category(
            &conn,
            1,
            CategoryUpdate {
                name: "新名称".to_string(),
                description: None,
                icon: None,
                sort_order: None,
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.code(), ErrorCode::SystemCategoryNotEditable);
    }

    #[tokio::test]
    async fn test_update_rejects_name_taken_by_other_row() {
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([
                vec![category_row(1, "旧名称", 0)],
                vec![category_row(2, "新名称", 0)],
            ])
            .into_connection();

        let err = update_category(
            &conn,
            1,
            CategoryUpdate {
                name: "新名称".to_string(),
                description: None,
                icon: None,
                sort_order: None,
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.code(), ErrorCode::CategoryNameExists);
    }

    #[tokio::test]
    async fn test_delete_rejects_system_category() {
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![category_row(1, "默认分类", 1)]])
            .into_connection();

        let err = delete_category(&conn, 1).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::SystemCategoryNotDeletable);
    }

    #[tokio::test]
    async fn test_get_category_found() {
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![category_row(7, "技术文章", 0)]])
            .into_connection();

        let category = get_category(&conn, 7).await.unwrap();
        assert_eq!(category.id, 7);
        assert_eq!(category.name, "技术文章");
    }
}
