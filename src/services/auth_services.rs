// src/services/auth_services.rs - password hashing, session tokens, cookies

use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const TOKEN_COOKIE: &str = "token";
const TOKEN_TTL_DAYS: i64 = 7;

/// Well-formed PHC string that matches no password. Verified on login when
/// the email is unknown so both miss paths cost a full argon2 run.
pub const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$MDEyMzQ1Njc4OWFiY2RlZg$AAECAwQFBgcICQoLDA0ODxAREhMUFRYXGBkaGxwdHh8";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("failed to hash password")]
    Hash,
    #[error("failed to sign token: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

/// Identity embedded in the session token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub id: i64,
    pub email: String,
    pub exp: usize,
}

#[derive(Clone)]
pub struct AuthService {
    jwt_secret: String,
}

impl AuthService {
    pub fn new(jwt_secret: String) -> Self {
        Self { jwt_secret }
    }

    /// Salted, irreversible PHC-format hash. Plaintext is never stored.
    pub fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(rand::thread_rng());
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|_| AuthError::Hash)
    }

    pub fn verify_password(&self, password: &str, hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }

    /// Sign a token carrying user id and email, expiring in 7 days.
    pub fn create_token(&self, id: i64, email: &str) -> Result<String, AuthError> {
        let exp = (Utc::now() + Duration::days(TOKEN_TTL_DAYS)).timestamp() as usize;
        let claims = Claims {
            id,
            email: email.to_string(),
            exp,
        };
        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )?)
    }

    /// Invalid, tampered or expired tokens yield `None`; the request simply
    /// proceeds unauthenticated.
    pub fn decode_token(&self, token: &str) -> Option<Claims> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .ok()
    }

    /// Session cookie, site-wide. Deliberately neither HttpOnly nor Secure:
    /// page scripts read it, and changing either flag changes observable
    /// behavior for existing clients.
    pub fn session_cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build(TOKEN_COOKIE, token)
            .path("/")
            .same_site(SameSite::Lax)
            .max_age(CookieDuration::days(TOKEN_TTL_DAYS))
            .http_only(false)
            .secure(false)
            .finish()
    }

    pub fn clear_cookie(&self) -> Cookie<'static> {
        Cookie::build(TOKEN_COOKIE, "")
            .path("/")
            .max_age(CookieDuration::ZERO)
            .finish()
    }
}
