use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CommentIn {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct CommentOut {
    pub id: i64,
    pub content: String,
    pub created_at: Option<String>,
    pub user_id: i64,
    pub user_name: String,
}

#[derive(Debug, Serialize)]
pub struct LikeToggleOut {
    pub liked: bool,
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct LikeStatusOut {
    pub count: i64,
    pub liked: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowToggleOut {
    pub following: bool,
    pub follower_count: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowStatusOut {
    pub follower_count: i64,
    pub following_count: i64,
    pub is_following: bool,
}

/// Public profile, viewable without authentication.
#[derive(Debug, Serialize)]
pub struct PublicUserOut {
    pub id: i64,
    pub name: Option<String>,
    pub email: String,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
    pub banner_image: Option<String>,
}
