// src/main.rs

mod config;
mod dtos;
mod errors;
mod handlers;
mod middleware;
mod models;
mod repositories;
mod services;

use std::path::PathBuf;
use std::time::Duration;

use actix_cors::Cors;
use actix_web::{get, middleware::Logger, web, App, HttpResponse, HttpServer, Responder};
use log::info;
use serde_json::json;
use tokio_rusqlite::Connection;

use crate::config::AppConfig;
use crate::handlers::auth_handlers::{login, logout, signup};
use crate::handlers::post_handlers::{
    create_post, delete_post, get_post, list_posts, my_posts, user_posts,
};
use crate::handlers::profile_handlers::{me, public_user, update_me};
use crate::handlers::social_handlers::{
    add_comment, follow_status, like_status, list_comments, toggle_follow, toggle_like,
};
use crate::repositories::db;
use crate::services::auth_services::AuthService;
use crate::services::story_services::StoryGenerator;

/// Shared per-process state: one store handle, created once and cloned into
/// every worker. The handle serializes DB work on its own thread; WAL keeps
/// readers unblocked.
#[derive(Clone)]
pub struct AppState {
    pub db: Connection,
    pub uploads_dir: PathBuf,
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    dotenv::dotenv().ok();

    let cfg = AppConfig::from_env()?;
    std::fs::create_dir_all(&cfg.uploads_dir)?;

    let db = db::open(&cfg.database_path).await?;

    let auth = web::Data::new(AuthService::new(cfg.jwt_secret.clone()));
    let generator = web::Data::new(StoryGenerator::new(
        cfg.python_cmd.clone(),
        cfg.story_script.clone(),
        Duration::from_secs(cfg.story_timeout_secs),
    ));
    let state = web::Data::new(AppState {
        db,
        uploads_dir: cfg.uploads_dir.clone(),
    });

    let allowed_origins = cfg.allowed_origins.clone();
    let bind_address = format!("0.0.0.0:{}", cfg.port);
    info!("Starting server on {}", bind_address);

    HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec!["authorization", "content-type", "accept", "cookie"])
            .supports_credentials()
            .max_age(3600);

        for origin in allowed_origins
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
        {
            cors = cors.allowed_origin(origin);
        }

        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .app_data(state.clone())
            .app_data(auth.clone())
            .app_data(generator.clone())
            .service(health)
            .service(signup)
            .service(login)
            .service(logout)
            .service(me)
            .service(update_me)
            .service(create_post)
            .service(list_posts)
            .service(my_posts)
            .service(get_post)
            .service(delete_post)
            .service(toggle_like)
            .service(like_status)
            .service(add_comment)
            .service(list_comments)
            .service(user_posts)
            .service(toggle_follow)
            .service(follow_status)
            .service(public_user)
    })
    .bind(&bind_address)?
    .run()
    .await?;

    Ok(())
}
