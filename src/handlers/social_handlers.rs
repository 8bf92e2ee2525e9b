// src/handlers/social_handlers.rs - likes, comments, follows

use actix_web::{get, post, web, HttpResponse};

use crate::dtos::social_dtos::{
    CommentIn, FollowStatusOut, FollowToggleOut, LikeStatusOut, LikeToggleOut,
};
use crate::errors::ApiError;
use crate::middleware::auth_extractor::AuthenticatedUser;
use crate::repositories::social_repository::SocialRepository;
use crate::AppState;

#[post("/api/posts/{id}/like")]
pub async fn toggle_like(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let (liked, count) =
        SocialRepository::toggle_like(&state.db, user.id, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(LikeToggleOut { liked, count }))
}

#[get("/api/posts/{id}/likes")]
pub async fn like_status(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    user: Option<AuthenticatedUser>,
) -> Result<HttpResponse, ApiError> {
    let viewer = user.map(|u| u.id);
    let (count, liked) =
        SocialRepository::like_status(&state.db, path.into_inner(), viewer).await?;
    Ok(HttpResponse::Ok().json(LikeStatusOut { count, liked }))
}

#[post("/api/posts/{id}/comments")]
pub async fn add_comment(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<i64>,
    body: web::Json<CommentIn>,
) -> Result<HttpResponse, ApiError> {
    let content = body.content.trim().to_string();
    if content.is_empty() {
        return Err(ApiError::BadRequest(
            "comment content is required".to_string(),
        ));
    }
    let comment =
        SocialRepository::add_comment(&state.db, user.id, path.into_inner(), content).await?;
    Ok(HttpResponse::Ok().json(comment))
}

#[get("/api/posts/{id}/comments")]
pub async fn list_comments(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let comments = SocialRepository::list_comments(&state.db, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(comments))
}

#[post("/api/users/{id}/follow")]
pub async fn toggle_follow(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let target = path.into_inner();
    if target == user.id {
        return Err(ApiError::BadRequest(
            "You cannot follow yourself".to_string(),
        ));
    }
    let (following, follower_count) =
        SocialRepository::toggle_follow(&state.db, user.id, target).await?;
    Ok(HttpResponse::Ok().json(FollowToggleOut {
        following,
        follower_count,
    }))
}

#[get("/api/users/{id}/follow-status")]
pub async fn follow_status(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    user: Option<AuthenticatedUser>,
) -> Result<HttpResponse, ApiError> {
    let viewer = user.map(|u| u.id);
    let (follower_count, following_count, is_following) =
        SocialRepository::follow_status(&state.db, path.into_inner(), viewer).await?;
    Ok(HttpResponse::Ok().json(FollowStatusOut {
        follower_count,
        following_count,
        is_following,
    }))
}
