// src/handlers/test_helpers.rs - shared fixtures for handler tests

use std::path::PathBuf;
use std::time::Duration;

use actix_web::dev::ServiceResponse;
use actix_web::http::header;
use actix_web::web;
use tempfile::TempDir;
use tokio_rusqlite::Connection;

use crate::repositories::db;
use crate::services::auth_services::AuthService;
use crate::services::story_services::StoryGenerator;
use crate::AppState;

pub struct TestEnv {
    pub state: web::Data<AppState>,
    pub auth: web::Data<AuthService>,
    pub generator: web::Data<StoryGenerator>,
    pub uploads: TempDir,
}

/// In-memory store, scratch uploads dir, and a generator whose command always
/// exits nonzero so every story is the deterministic fallback.
pub async fn test_env() -> TestEnv {
    let uploads = TempDir::new().unwrap();
    let conn = Connection::open_in_memory().await.unwrap();
    db::migrate(&conn).await.unwrap();

    TestEnv {
        state: web::Data::new(AppState {
            db: conn,
            uploads_dir: uploads.path().to_path_buf(),
        }),
        auth: web::Data::new(AuthService::new("test_secret".into())),
        generator: web::Data::new(StoryGenerator::new(
            "false".into(),
            PathBuf::from("unused.py"),
            Duration::from_secs(5),
        )),
        uploads,
    }
}

/// The `token=...` pair from the response's Set-Cookie, ready to send back
/// in a Cookie header.
pub fn cookie_header<B>(resp: &ServiceResponse<B>) -> String {
    resp.headers()
        .get(header::SET_COOKIE)
        .expect("response should set a session cookie")
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string()
}

pub const BOUNDARY: &str = "----artales-test-boundary";

pub enum Part {
    Text(&'static str, String),
    File(&'static str, &'static str, Vec<u8>),
}

/// Hand-rolled multipart/form-data body for upload endpoints.
pub fn multipart_body(parts: Vec<Part>) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File(name, filename, bytes) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                        name, filename
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(&bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    let content_type = format!("multipart/form-data; boundary={}", BOUNDARY);
    (content_type, body)
}
