/// A row from `users` as the repositories read it. The password hash never
/// leaves this struct; wire shapes live in the dtos module.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub name: Option<String>,
    pub profile_image: Option<String>,
    pub banner_image: Option<String>,
    pub bio: Option<String>,
}

/// Fields of a profile update; `None` means "leave as is", `Some("")` clears.
#[derive(Debug, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
    pub banner_image: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.bio.is_none()
            && self.profile_image.is_none()
            && self.banner_image.is_none()
    }
}
