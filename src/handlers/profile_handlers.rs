// src/handlers/profile_handlers.rs - own profile and public profiles

use actix_multipart::Multipart;
use actix_web::{get, post, web, HttpResponse};
use futures::StreamExt;

use crate::dtos::auth_dtos::{UserEnvelope, UserOut};
use crate::dtos::social_dtos::PublicUserOut;
use crate::errors::ApiError;
use crate::middleware::auth_extractor::AuthenticatedUser;
use crate::models::user::ProfileUpdate;
use crate::repositories::user_repository::UserRepository;
use crate::services::upload_services;
use crate::AppState;

#[get("/api/me")]
pub async fn me(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    let user = UserRepository::find_by_id(&state.db, user.id)
        .await?
        .ok_or_else(ApiError::unauthorized)?;
    Ok(HttpResponse::Ok().json(UserEnvelope {
        user: UserOut::from(&user),
    }))
}

/// Multipart update: `name` and `bio` text fields, `profileImage` and
/// `bannerImage` files. Only supplied fields are touched.
#[post("/api/me")]
pub async fn update_me(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    mut payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    let mut update = ProfileUpdate::default();

    while let Some(item) = payload.next().await {
        let mut field = item?;
        let name = field.content_disposition().get_name().map(String::from);
        match name.as_deref() {
            Some("name") => update.name = Some(upload_services::read_text_field(&mut field).await?),
            Some("bio") => update.bio = Some(upload_services::read_text_field(&mut field).await?),
            Some("profileImage") => {
                let saved = upload_services::save_field(&state.uploads_dir, &mut field).await?;
                update.profile_image = Some(saved.public_path);
            }
            Some("bannerImage") => {
                let saved = upload_services::save_field(&state.uploads_dir, &mut field).await?;
                update.banner_image = Some(saved.public_path);
            }
            _ => upload_services::drain_field(&mut field).await?,
        }
    }

    UserRepository::update_profile(&state.db, user.id, update).await?;

    let user = UserRepository::find_by_id(&state.db, user.id)
        .await?
        .ok_or_else(ApiError::unauthorized)?;
    Ok(HttpResponse::Ok().json(UserEnvelope {
        user: UserOut::from(&user),
    }))
}

#[get("/api/users/{id}")]
pub async fn public_user(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let user = UserRepository::find_by_id(&state.db, path.into_inner())
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;
    Ok(HttpResponse::Ok().json(PublicUserOut {
        id: user.id,
        name: user.name,
        email: user.email,
        bio: user.bio,
        profile_image: user.profile_image,
        banner_image: user.banner_image,
    }))
}
