// src/handlers/post_handlers.rs - post creation workflow, feeds, deletion

use actix_multipart::Multipart;
use actix_web::{delete, get, post, web, HttpResponse};
use futures::StreamExt;
use serde_json::json;

use crate::dtos::post_dtos::CreatePostOut;
use crate::errors::ApiError;
use crate::middleware::auth_extractor::AuthenticatedUser;
use crate::repositories::post_repository::PostRepository;
use crate::services::story_services::StoryGenerator;
use crate::services::upload_services::{self, SavedFile};
use crate::AppState;

/// Upload -> story generation -> persistence. The generator's failures never
/// surface here; the fallback story keeps the flow available.
#[post("/api/posts")]
pub async fn create_post(
    state: web::Data<AppState>,
    generator: web::Data<StoryGenerator>,
    user: AuthenticatedUser,
    mut payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    let mut image: Option<SavedFile> = None;
    let mut description: Option<String> = None;
    let mut story_type: Option<String> = None;

    while let Some(item) = payload.next().await {
        let mut field = item?;
        let name = field.content_disposition().get_name().map(String::from);
        match name.as_deref() {
            Some("image") => {
                image = Some(upload_services::save_field(&state.uploads_dir, &mut field).await?)
            }
            Some("description") => {
                description = Some(upload_services::read_text_field(&mut field).await?)
            }
            Some("storyType") => {
                story_type = Some(upload_services::read_text_field(&mut field).await?)
            }
            // title is accepted but only the generated story is persisted
            _ => upload_services::drain_field(&mut field).await?,
        }
    }

    let image = image.ok_or_else(|| ApiError::BadRequest("image is required".to_string()))?;

    let generated = generator
        .generate(
            &image.disk_path,
            description.as_deref(),
            story_type.as_deref(),
            &state.uploads_dir,
        )
        .await;

    let id = PostRepository::insert_post(
        &state.db,
        user.id,
        generated.story,
        image.public_path.clone(),
        generated.audio_path.clone(),
    )
    .await?;

    Ok(HttpResponse::Ok().json(CreatePostOut {
        id,
        image_path: image.public_path,
        audio_path: generated.audio_path,
    }))
}

#[get("/api/posts")]
pub async fn list_posts(
    state: web::Data<AppState>,
    user: Option<AuthenticatedUser>,
) -> Result<HttpResponse, ApiError> {
    let viewer = user.map(|u| u.id);
    let posts = PostRepository::list_posts(&state.db, viewer).await?;
    Ok(HttpResponse::Ok().json(posts))
}

#[get("/api/posts/{id}")]
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    user: Option<AuthenticatedUser>,
) -> Result<HttpResponse, ApiError> {
    let viewer = user.map(|u| u.id);
    let post = PostRepository::get_post(&state.db, path.into_inner(), viewer)
        .await?
        .ok_or_else(|| ApiError::NotFound("not found".to_string()))?;
    Ok(HttpResponse::Ok().json(post))
}

#[get("/api/my-posts")]
pub async fn my_posts(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    let posts = PostRepository::list_posts_by_user(&state.db, user.id).await?;
    Ok(HttpResponse::Ok().json(posts))
}

#[get("/api/users/{id}/posts")]
pub async fn user_posts(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let posts = PostRepository::list_posts_by_user(&state.db, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// Owner-only. Media files are removed best-effort before the rows cascade.
#[delete("/api/posts/{id}")]
pub async fn delete_post(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let post_id = path.into_inner();
    let media = PostRepository::find_media(&state.db, post_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Post not found".to_string()))?;

    if media.user_id != user.id {
        return Err(ApiError::Forbidden(
            "You can only delete your own posts".to_string(),
        ));
    }

    for public_path in [media.image_path, media.audio_path].into_iter().flatten() {
        upload_services::remove_media(&state.uploads_dir, &public_path);
    }

    PostRepository::delete_cascade(&state.db, post_id).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "message": "Post deleted successfully" })))
}
