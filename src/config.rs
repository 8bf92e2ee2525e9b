use std::env;
use std::path::PathBuf;
use anyhow::{Context, Result};

/// Everything the process reads from the environment, resolved once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub jwt_secret: String,
    pub uploads_dir: PathBuf,
    pub database_path: PathBuf,
    pub python_cmd: String,
    pub story_script: PathBuf,
    pub story_timeout_secs: u64,
    pub allowed_origins: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3001".to_string())
            .parse::<u16>()
            .context("PORT must be a valid port number")?;

        let jwt_secret =
            env::var("JWT_SECRET").unwrap_or_else(|_| "dev_secret_change_me".to_string());

        let uploads_dir =
            PathBuf::from(env::var("UPLOADS_DIR").unwrap_or_else(|_| "uploads".to_string()));

        // DB file lives inside the uploads dir so both persist on the same disk
        let database_path = match env::var("DATABASE_PATH") {
            Ok(p) => PathBuf::from(p),
            Err(_) => uploads_dir.join("data.sqlite"),
        };

        let python_cmd = env::var("PYTHON_CMD").unwrap_or_else(|_| "python3".to_string());
        let story_script = PathBuf::from(
            env::var("STORY_SCRIPT").unwrap_or_else(|_| "generate_story_final.py".to_string()),
        );
        let story_timeout_secs = env::var("STORY_TIMEOUT_SECS")
            .unwrap_or_else(|_| "60".to_string())
            .parse::<u64>()
            .context("STORY_TIMEOUT_SECS must be a number of seconds")?;

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".into());

        Ok(Self {
            port,
            jwt_secret,
            uploads_dir,
            database_path,
            python_cmd,
            story_script,
            story_timeout_secs,
            allowed_origins,
        })
    }
}
