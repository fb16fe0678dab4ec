//! Authentication guard middleware.
//!
//! For every request: resolve the route's policy from the registry, and if
//! one applies, authenticate the `en-bit-token` header before the handler
//! runs. The whole authenticate + dispatch sequence executes inside a user
//! context scope, so the identity slots exist for exactly one request and
//! are destroyed when it finishes, whatever the outcome was.
//!
//! Per request, two terminal states: authorized (handler runs, context
//! populated iff a policy applied) or rejected (stable error code in the
//! response body, handler never runs).

use std::rc::Rc;
use std::sync::Arc;

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::error::ResponseError;
use actix_web::{web, Error};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use tracing::debug;

use crate::auth::policy::PolicyRegistry;
use crate::auth::{authenticator, user_context};
use crate::error::AppError;
use crate::state::app_state::AppState;

/// Fixed, case-sensitive request header carrying the raw token.
pub const TOKEN_HEADER: &str = "en-bit-token";

pub struct AuthGuard {
    registry: Arc<PolicyRegistry>,
}

impl AuthGuard {
    pub fn new(registry: Arc<PolicyRegistry>) -> Self {
        Self { registry }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthGuardMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGuardMiddleware {
            service: Rc::new(service),
            registry: Arc::clone(&self.registry),
        }))
    }
}

pub struct AuthGuardMiddleware<S> {
    service: Rc<S>,
    registry: Arc<PolicyRegistry>,
}

impl<S, B> Service<ServiceRequest> for AuthGuardMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let registry = Arc::clone(&self.registry);

        Box::pin(async move {
            let policy = registry
                .resolve(req.method(), req.path())
                .filter(|policy| policy.required)
                .cloned();

            // The scope owns the context slots for the lifetime of this
            // request; leaving it is the unconditional clear.
            user_context::scope(async move {
                let Some(policy) = policy else {
                    return service
                        .call(req)
                        .await
                        .map(|res| res.map_into_left_body());
                };

                let raw_token = req
                    .headers()
                    .get(TOKEN_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("")
                    .to_string();
                if raw_token.trim().is_empty() {
                    debug!(path = %req.path(), "guarded route called without token header");
                    return Ok(reject(req, AppError::auth_token_missing(policy.message)));
                }

                let Some(app_state) = req.app_data::<web::Data<AppState>>().cloned() else {
                    return Ok(reject(
                        req,
                        AppError::internal("AppState not available".to_string()),
                    ));
                };

                let authenticated = match app_state.require_db() {
                    Ok(db) => authenticator::authenticate(db, &raw_token).await,
                    Err(err) => Err(err),
                };
                let user = match authenticated {
                    Ok(user) => user,
                    Err(err) => return Ok(reject(req, err)),
                };

                if !user.is_active() {
                    return Ok(reject(req, AppError::auth_user_disabled()));
                }

                service
                    .call(req)
                    .await
                    .map(|res| res.map_into_left_body())
            })
            .await
        })
    }
}

/// Terminal rejection: stable code + message body, handler never runs.
fn reject<B>(req: ServiceRequest, err: AppError) -> ServiceResponse<EitherBody<B>> {
    let response = err.error_response();
    req.into_response(response).map_into_right_body()
}
