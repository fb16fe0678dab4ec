//! Extractor for the authenticated identity on guarded routes.
//!
//! Reads the user the guard middleware stored in the request-scoped context.
//! Using it on a route with no policy entry yields an invalid-token
//! rejection, since nothing populated the context there.

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::auth::user_context;
use crate::error::AppError;
use crate::repos::users::WechatUser;

/// Current authenticated user, resolved by the guard middleware.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub WechatUser);

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(_req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            user_context::current_user()
                .map(CurrentUser)
                .ok_or_else(AppError::auth_token_invalid),
        )
    }
}
