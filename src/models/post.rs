use serde::Serialize;

/// A post row without joins, as returned for an author's own listing.
#[derive(Debug, Serialize)]
pub struct Post {
    pub id: i64,
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_path: Option<String>,
    pub audio_path: Option<String>,
    pub created_at: Option<String>,
}

/// Ownership and media references needed to delete a post.
#[derive(Debug)]
pub struct PostMedia {
    pub user_id: i64,
    pub image_path: Option<String>,
    pub audio_path: Option<String>,
}
