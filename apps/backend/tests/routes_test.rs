//! End-to-end tests over the real route table, policy registry, and guard.

use actix_web::{test, web, App};
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};

use backend::auth::token::{generate_token, DEVICE_TYPE_MINIAPP};
use backend::utils::time::current_millis;
use backend::config::wechat::WechatConfig;
use backend::entities::{favorite_categories, wechat_users};
use backend::middleware::auth_guard::{AuthGuard, TOKEN_HEADER};
use backend::routes;
use backend::state::app_state::AppState;

fn state_with(conn: DatabaseConnection) -> AppState {
    AppState::new(conn, WechatConfig::new("wx123", "secret"), reqwest::Client::new())
}

fn user_row(id: &str) -> wechat_users::Model {
    wechat_users::Model {
        id: id.to_string(),
        openid: format!("openid-{id}"),
        unionid: None,
        nickname: "测试用户".to_string(),
        avatar_url: String::new(),
        gender: None,
        country: None,
        province: None,
        city: None,
        language: None,
        session_key: "sk".to_string(),
        last_login_time: None,
        last_login_ip: None,
        user_agent: None,
        status: 1,
        created_time: 0,
        updated_time: 0,
        deleted: 0,
    }
}

fn category_row(id: i64, name: &str) -> favorite_categories::Model {
    favorite_categories::Model {
        id,
        name: name.to_string(),
        description: None,
        icon: None,
        sort_order: 0,
        is_system: 0,
        created_time: 0,
        updated_time: 0,
        deleted: 0,
    }
}

macro_rules! real_app {
    ($conn:expr) => {
        test::init_service(
            App::new()
                .wrap(AuthGuard::new(routes::policy_registry()))
                .app_data(web::Data::new(state_with($conn)))
                .configure(routes::configure),
        )
        .await
    };
}

#[actix_web::test]
async fn test_categories_scope_is_guarded() {
    let conn = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let app = real_app!(conn);

    let req = test::TestRequest::get().uri("/api/v1/categories/all").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 401);
    let body = test::read_body(resp).await;
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["code"], "AUTH_TOKEN_MISSING");
}

#[actix_web::test]
async fn test_categories_all_with_valid_token() {
    let conn = MockDatabase::new(DatabaseBackend::Postgres)
        // First query: the guard's user lookup; second: the category listing.
        .append_query_results([vec![user_row("FP17351234")]])
        .append_query_results([vec![
            category_row(1, "技术文章"),
            category_row(2, "生活记录"),
        ]])
        .into_connection();
    let app = real_app!(conn);

    let token = generate_token("FP17351234", DEVICE_TYPE_MINIAPP, current_millis());
    let req = test::TestRequest::get()
        .uri("/api/v1/categories/all")
        .insert_header((TOKEN_HEADER, token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 200);
    let body = test::read_body(resp).await;
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body.as_array().unwrap().len(), 2);
    assert_eq!(body[0]["name"], "技术文章");
}

#[actix_web::test]
async fn test_login_rejects_empty_code() {
    let conn = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let app = real_app!(conn);

    let req = test::TestRequest::post()
        .uri("/api/auth/miniapp/login")
        .set_json(serde_json::json!({ "code": "" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 400);
    let body = test::read_body(resp).await;
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["code"], "PARAM_ERROR");
}

#[actix_web::test]
async fn test_user_info_is_guarded() {
    let conn = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let app = real_app!(conn);

    let req = test::TestRequest::get().uri("/api/auth/user/info").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 401);
}

#[actix_web::test]
async fn test_user_info_returns_profile() {
    let conn = MockDatabase::new(DatabaseBackend::Postgres)
        // Guard lookup, then the profile re-read.
        .append_query_results([vec![user_row("FP17351234")]])
        .append_query_results([vec![user_row("FP17351234")]])
        .into_connection();
    let app = real_app!(conn);

    let token = generate_token("FP17351234", DEVICE_TYPE_MINIAPP, current_millis());
    let req = test::TestRequest::get()
        .uri("/api/auth/user/info")
        .insert_header((TOKEN_HEADER, token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 200);
    let body = test::read_body(resp).await;
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["userId"], "FP17351234");
    assert_eq!(body["nickname"], "测试用户");
}

#[actix_web::test]
async fn test_logout_succeeds_without_identity() {
    let conn = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let app = real_app!(conn);

    let req = test::TestRequest::post().uri("/api/auth/logout").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 200);
}

#[actix_web::test]
async fn test_health_route_is_open() {
    let conn = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let app = real_app!(conn);

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 200);
    let body = test::read_body(resp).await;
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["status"], "ok");
}
