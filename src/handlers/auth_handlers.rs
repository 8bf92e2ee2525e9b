// src/handlers/auth_handlers.rs - signup, login, logout

use actix_web::{post, web, HttpResponse};
use regex::Regex;
use serde_json::json;

use crate::dtos::auth_dtos::{LoginIn, SignupIn, UserEnvelope, UserOut};
use crate::errors::ApiError;
use crate::repositories::db;
use crate::repositories::user_repository::UserRepository;
use crate::services::auth_services::{AuthService, DUMMY_HASH};
use crate::AppState;

fn looks_like_email(email: &str) -> bool {
    let re = Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").unwrap();
    re.is_match(email)
}

// One generic failure for unknown email and wrong password alike; callers
// never learn which one it was.
fn invalid_credentials() -> ApiError {
    ApiError::Unauthorized("invalid credentials".to_string())
}

#[post("/api/signup")]
pub async fn signup(
    state: web::Data<AppState>,
    auth: web::Data<AuthService>,
    body: web::Json<SignupIn>,
) -> Result<HttpResponse, ApiError> {
    let email = body.email.trim().to_string();
    if email.is_empty() || body.password.is_empty() {
        return Err(ApiError::BadRequest(
            "email and password are required".to_string(),
        ));
    }
    if !looks_like_email(&email) {
        return Err(ApiError::BadRequest("invalid email format".to_string()));
    }

    let password_hash = auth
        .hash_password(&body.password)
        .map_err(ApiError::internal)?;
    let name = body
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(String::from);

    let id = match UserRepository::create_user(&state.db, email.clone(), password_hash, name.clone())
        .await
    {
        Ok(id) => id,
        Err(err) if db::is_unique_violation(&err) => {
            return Err(ApiError::Conflict("email already registered".to_string()));
        }
        Err(err) => return Err(err.into()),
    };

    let token = auth.create_token(id, &email).map_err(ApiError::internal)?;
    let user = UserOut {
        id,
        email,
        name,
        profile_image: None,
        banner_image: None,
        bio: None,
    };
    Ok(HttpResponse::Ok()
        .cookie(auth.session_cookie(token))
        .json(UserEnvelope { user }))
}

#[post("/api/login")]
pub async fn login(
    state: web::Data<AppState>,
    auth: web::Data<AuthService>,
    body: web::Json<LoginIn>,
) -> Result<HttpResponse, ApiError> {
    if body.email.is_empty() || body.password.is_empty() {
        return Err(ApiError::BadRequest(
            "email and password are required".to_string(),
        ));
    }

    let Some(user) = UserRepository::find_by_email(&state.db, body.email.trim().to_string()).await?
    else {
        // burn a verification so an unknown email costs as much as a mismatch
        auth.verify_password(&body.password, DUMMY_HASH);
        return Err(invalid_credentials());
    };
    if !auth.verify_password(&body.password, &user.password_hash) {
        return Err(invalid_credentials());
    }

    let token = auth
        .create_token(user.id, &user.email)
        .map_err(ApiError::internal)?;
    Ok(HttpResponse::Ok()
        .cookie(auth.session_cookie(token))
        .json(UserEnvelope {
            user: UserOut::from(&user),
        }))
}

#[post("/api/logout")]
pub async fn logout(auth: web::Data<AuthService>) -> HttpResponse {
    HttpResponse::Ok()
        .cookie(auth.clear_cookie())
        .json(json!({ "ok": true }))
}
