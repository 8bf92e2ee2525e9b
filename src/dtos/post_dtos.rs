use serde::Serialize;

/// Feed row: post joined with its author plus aggregate counts. `liked` is
/// only serialized when a viewer identity was attached to the request.
#[derive(Debug, Serialize)]
pub struct PostSummaryOut {
    pub id: i64,
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_path: Option<String>,
    pub audio_path: Option<String>,
    pub created_at: Option<String>,
    pub user_id: i64,
    pub user_name: String,
    pub profile_image: Option<String>,
    pub like_count: i64,
    pub comment_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub liked: Option<bool>,
}

/// Detail view adds the full story text.
#[derive(Debug, Serialize)]
pub struct PostDetailOut {
    pub id: i64,
    pub title: Option<String>,
    pub description: Option<String>,
    pub story: Option<String>,
    pub image_path: Option<String>,
    pub audio_path: Option<String>,
    pub created_at: Option<String>,
    pub user_id: i64,
    pub user_name: String,
    pub profile_image: Option<String>,
    pub like_count: i64,
    pub comment_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub liked: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct CreatePostOut {
    pub id: i64,
    pub image_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_path: Option<String>,
}
