use std::sync::Arc;

use actix_web::http::Method;
use actix_web::web;

use crate::auth::policy::{AuthPolicy, PolicyRegistry};

pub mod auth;
pub mod categories;
pub mod health;

/// Configure application routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    auth::configure_routes(cfg);
    categories::configure_routes(cfg);
    health::configure_routes(cfg);
}

/// Authentication policy table, maintained beside the route registration
/// above. Routes without an entry are unauthenticated.
pub fn policy_registry() -> Arc<PolicyRegistry> {
    Arc::new(
        PolicyRegistry::builder()
            .route(Method::GET, "/api/auth/user/info", AuthPolicy::default())
            .route(Method::PUT, "/api/auth/user/nickname", AuthPolicy::default())
            .scope("/api/v1/categories", AuthPolicy::default())
            .build(),
    )
}
