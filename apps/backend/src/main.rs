use actix_web::{web, App, HttpServer};
use backend::config::wechat::WechatConfig;
use backend::infra::db::connect_db;
use backend::middleware::auth_guard::AuthGuard;
use backend::middleware::cors::cors_middleware;
use backend::middleware::request_trace::RequestTrace;
use backend::routes;
use backend::state::app_state::AppState;
use backend::telemetry;
use migration::{Migrator, MigratorTrait};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment:
    // - Docker: Set via docker-compose env_file or docker run --env-file
    // - Local dev: Source env files manually (e.g. set -a; . ./.env; set +a)
    let host = std::env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("BACKEND_PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse::<u16>()
        .unwrap_or_else(|_| {
            eprintln!("BACKEND_PORT must be a valid port number");
            std::process::exit(1);
        });

    let wechat = match WechatConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load WeChat configuration: {e}");
            std::process::exit(1);
        }
    };

    let db = match connect_db().await {
        Ok(conn) => conn,
        Err(e) => {
            eprintln!("Failed to connect to database: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = Migrator::up(&db, None).await {
        eprintln!("Failed to run migrations: {e}");
        std::process::exit(1);
    }

    let http = reqwest::Client::builder()
        .connect_timeout(wechat.connect_timeout)
        .timeout(wechat.read_timeout)
        .build()
        .unwrap_or_else(|e| {
            eprintln!("Failed to build HTTP client: {e}");
            std::process::exit(1);
        });

    let data = web::Data::new(AppState::new(db, wechat, http));
    let registry = routes::policy_registry();

    tracing::info!(host = %host, port = port, "starting mini-app backend");

    HttpServer::new(move || {
        App::new()
            .wrap(AuthGuard::new(registry.clone()))
            .wrap(RequestTrace)
            .wrap(cors_middleware())
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
