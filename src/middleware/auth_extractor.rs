// src/middleware/auth_extractor.rs

use actix_web::{dev::Payload, web, Error, FromRequest, HttpRequest};
use futures::future::{ready, Ready};

use crate::errors::ApiError;
use crate::services::auth_services::{AuthService, TOKEN_COOKIE};

/// Identity re-derived from the validated session cookie. Handlers that take
/// this directly require authentication; `Option<AuthenticatedUser>` treats a
/// missing or invalid token as an anonymous request.
pub struct AuthenticatedUser {
    pub id: i64,
    pub email: String,
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<AuthenticatedUser, Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(auth) = req.app_data::<web::Data<AuthService>>() else {
            return ready(Err(ApiError::internal("AuthService not configured").into()));
        };

        let identity = req
            .cookie(TOKEN_COOKIE)
            .and_then(|cookie| auth.decode_token(cookie.value()))
            .map(|claims| AuthenticatedUser {
                id: claims.id,
                email: claims.email,
            });

        match identity {
            Some(user) => ready(Ok(user)),
            None => ready(Err(ApiError::unauthorized().into())),
        }
    }
}
