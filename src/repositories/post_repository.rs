// src/repositories/post_repository.rs

use rusqlite::{params, OptionalExtension, Row};
use tokio_rusqlite::Connection;

use crate::dtos::post_dtos::{PostDetailOut, PostSummaryOut};
use crate::models::post::{Post, PostMedia};

pub struct PostRepository;

// Anonymous viewers bind an id that never matches a row.
const NO_VIEWER: i64 = -1;

fn summary_from_row(row: &Row, viewer: Option<i64>) -> rusqlite::Result<PostSummaryOut> {
    let viewer_likes: i64 = row.get(11)?;
    Ok(PostSummaryOut {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        image_path: row.get(3)?,
        audio_path: row.get(4)?,
        created_at: row.get(5)?,
        user_id: row.get(6)?,
        user_name: row.get(7)?,
        profile_image: row.get(8)?,
        like_count: row.get(9)?,
        comment_count: row.get(10)?,
        liked: viewer.map(|_| viewer_likes > 0),
    })
}

fn own_post_from_row(row: &Row) -> rusqlite::Result<Post> {
    Ok(Post {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        image_path: row.get(3)?,
        audio_path: row.get(4)?,
        created_at: row.get(5)?,
    })
}

impl PostRepository {
    /// Persist a newly generated post. Only the generated story is stored;
    /// the raw description/style hints are not.
    pub async fn insert_post(
        conn: &Connection,
        user_id: i64,
        story: String,
        image_path: String,
        audio_path: Option<String>,
    ) -> Result<i64, tokio_rusqlite::Error> {
        conn.call(move |conn| {
            conn.execute(
                "INSERT INTO posts (user_id, story, image_path, audio_path) VALUES (?1, ?2, ?3, ?4)",
                params![user_id, story, image_path, audio_path],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
    }

    /// Newest-first feed with author join and aggregate counts.
    pub async fn list_posts(
        conn: &Connection,
        viewer: Option<i64>,
    ) -> Result<Vec<PostSummaryOut>, tokio_rusqlite::Error> {
        conn.call(move |conn| {
            let mut stmt = conn.prepare(
                r#"
                SELECT p.id, p.title, p.description, p.image_path, p.audio_path, p.created_at,
                       u.id, COALESCE(u.name, u.email), u.profile_image,
                       (SELECT COUNT(*) FROM likes WHERE post_id = p.id),
                       (SELECT COUNT(*) FROM comments WHERE post_id = p.id),
                       (SELECT COUNT(*) FROM likes WHERE post_id = p.id AND user_id = ?1)
                FROM posts p JOIN users u ON u.id = p.user_id
                ORDER BY p.id DESC
                "#,
            )?;
            let rows = stmt
                .query_map(params![viewer.unwrap_or(NO_VIEWER)], |row| {
                    summary_from_row(row, viewer)
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
        .await
    }

    pub async fn get_post(
        conn: &Connection,
        id: i64,
        viewer: Option<i64>,
    ) -> Result<Option<PostDetailOut>, tokio_rusqlite::Error> {
        conn.call(move |conn| {
            let post = conn
                .query_row(
                    r#"
                    SELECT p.id, p.title, p.description, p.story, p.image_path, p.audio_path,
                           p.created_at,
                           u.id, COALESCE(u.name, u.email), u.profile_image,
                           (SELECT COUNT(*) FROM likes WHERE post_id = p.id),
                           (SELECT COUNT(*) FROM comments WHERE post_id = p.id),
                           (SELECT COUNT(*) FROM likes WHERE post_id = p.id AND user_id = ?2)
                    FROM posts p JOIN users u ON u.id = p.user_id
                    WHERE p.id = ?1
                    "#,
                    params![id, viewer.unwrap_or(NO_VIEWER)],
                    |row| {
                        let viewer_likes: i64 = row.get(12)?;
                        Ok(PostDetailOut {
                            id: row.get(0)?,
                            title: row.get(1)?,
                            description: row.get(2)?,
                            story: row.get(3)?,
                            image_path: row.get(4)?,
                            audio_path: row.get(5)?,
                            created_at: row.get(6)?,
                            user_id: row.get(7)?,
                            user_name: row.get(8)?,
                            profile_image: row.get(9)?,
                            like_count: row.get(10)?,
                            comment_count: row.get(11)?,
                            liked: viewer.map(|_| viewer_likes > 0),
                        })
                    },
                )
                .optional()?;
            Ok(post)
        })
        .await
    }

    pub async fn list_posts_by_user(
        conn: &Connection,
        user_id: i64,
    ) -> Result<Vec<Post>, tokio_rusqlite::Error> {
        conn.call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, title, description, image_path, audio_path, created_at
                 FROM posts WHERE user_id = ?1 ORDER BY id DESC",
            )?;
            let rows = stmt
                .query_map(params![user_id], own_post_from_row)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
        .await
    }

    pub async fn find_media(
        conn: &Connection,
        id: i64,
    ) -> Result<Option<PostMedia>, tokio_rusqlite::Error> {
        conn.call(move |conn| {
            let media = conn
                .query_row(
                    "SELECT user_id, image_path, audio_path FROM posts WHERE id = ?1",
                    params![id],
                    |row| {
                        Ok(PostMedia {
                            user_id: row.get(0)?,
                            image_path: row.get(1)?,
                            audio_path: row.get(2)?,
                        })
                    },
                )
                .optional()?;
            Ok(media)
        })
        .await
    }

    /// Delete a post together with its likes and comments, atomically.
    pub async fn delete_cascade(conn: &Connection, id: i64) -> Result<(), tokio_rusqlite::Error> {
        conn.call(move |conn| {
            let tx = conn.transaction()?;
            tx.execute("DELETE FROM comments WHERE post_id = ?1", params![id])?;
            tx.execute("DELETE FROM likes WHERE post_id = ?1", params![id])?;
            tx.execute("DELETE FROM posts WHERE id = ?1", params![id])?;
            tx.commit()?;
            Ok(())
        })
        .await
    }
}
