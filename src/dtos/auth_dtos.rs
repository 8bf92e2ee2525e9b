use serde::{Deserialize, Serialize};

use crate::models::user::User;

#[derive(Debug, Deserialize)]
pub struct SignupIn {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginIn {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct UserOut {
    pub id: i64,
    pub email: String,
    pub name: Option<String>,
    pub profile_image: Option<String>,
    pub banner_image: Option<String>,
    pub bio: Option<String>,
}

impl From<&User> for UserOut {
    fn from(user: &User) -> Self {
        UserOut {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            profile_image: user.profile_image.clone(),
            banner_image: user.banner_image.clone(),
            bio: user.bio.clone(),
        }
    }
}

/// Responses that wrap the user record, e.g. `{ "user": { ... } }`.
#[derive(Debug, Serialize)]
pub struct UserEnvelope {
    pub user: UserOut,
}
