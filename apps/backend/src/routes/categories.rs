use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::repos::categories::{Category, CategoryPage};
use crate::services::categories::{self, CategoryCreate, CategoryQuery, CategoryUpdate};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryAddRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub sort_order: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryUpdateRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub sort_order: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryListRequest {
    #[serde(default = "default_page_num")]
    pub page_num: u64,
    #[serde(default = "default_page_size")]
    pub page_size: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub is_system: Option<i32>,
}

fn default_page_num() -> u64 {
    1
}

fn default_page_size() -> u64 {
    10
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub sort_order: i32,
    pub is_system: i32,
    pub created_time: i64,
    pub updated_time: i64,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            description: category.description,
            icon: category.icon,
            sort_order: category.sort_order,
            is_system: category.is_system,
            created_time: category.created_time,
            updated_time: category.updated_time,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPageResponse {
    pub records: Vec<CategoryResponse>,
    pub total: u64,
    pub page_num: u64,
    pub page_size: u64,
}

impl From<CategoryPage> for CategoryPageResponse {
    fn from(page: CategoryPage) -> Self {
        Self {
            records: page.records.into_iter().map(CategoryResponse::from).collect(),
            total: page.total,
            page_num: page.page_num,
            page_size: page.page_size,
        }
    }
}

async fn add_category(
    body: web::Json<CategoryAddRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = app_state.require_db()?;
    let body = body.into_inner();
    let category = categories::add_category(
        db,
        CategoryCreate {
            name: body.name,
            description: body.description,
            icon: body.icon,
            sort_order: body.sort_order,
        },
    )
    .await?;
    Ok(HttpResponse::Ok().json(CategoryResponse::from(category)))
}

async fn update_category(
    path: web::Path<i64>,
    body: web::Json<CategoryUpdateRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = app_state.require_db()?;
    let body = body.into_inner();
    let category = categories::update_category(
        db,
        path.into_inner(),
        CategoryUpdate {
            name: body.name,
            description: body.description,
            icon: body.icon,
            sort_order: body.sort_order,
        },
    )
    .await?;
    Ok(HttpResponse::Ok().json(CategoryResponse::from(category)))
}

async fn delete_category(
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = app_state.require_db()?;
    let deleted = categories::delete_category(db, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "deleted": deleted })))
}

async fn get_category(
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = app_state.require_db()?;
    let category = categories::get_category(db, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(CategoryResponse::from(category)))
}

async fn page_categories(
    body: web::Json<CategoryListRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = app_state.require_db()?;
    let body = body.into_inner();
    let page = categories::page_categories(
        db,
        CategoryQuery {
            page_num: body.page_num,
            page_size: body.page_size,
            name: body.name,
            is_system: body.is_system,
        },
    )
    .await?;
    Ok(HttpResponse::Ok().json(CategoryPageResponse::from(page)))
}

async fn all_categories(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let db = app_state.require_db()?;
    let categories = categories::list_all_categories(db).await?;
    let response: Vec<CategoryResponse> =
        categories.into_iter().map(CategoryResponse::from).collect();
    Ok(HttpResponse::Ok().json(response))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/categories")
            .service(web::resource("/addCategory").route(web::post().to(add_category)))
            .service(web::resource("/page").route(web::post().to(page_categories)))
            .service(web::resource("/all").route(web::get().to(all_categories)))
            .service(
                web::resource("/{categoryId}")
                    .route(web::get().to(get_category))
                    .route(web::put().to(update_category))
                    .route(web::delete().to(delete_category)),
            ),
    );
}
