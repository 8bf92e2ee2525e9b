// src/repositories/social_repository.rs - likes, comments, follows

use rusqlite::{params, ErrorCode, OptionalExtension};
use tokio_rusqlite::Connection;

use crate::dtos::social_dtos::CommentOut;

pub struct SocialRepository;

fn count(conn: &rusqlite::Connection, sql: &str, id: i64) -> rusqlite::Result<i64> {
    conn.query_row(sql, params![id], |row| row.get(0))
}

impl SocialRepository {
    /// Insert the like if absent, remove it otherwise. A concurrent duplicate
    /// insert that trips the unique constraint counts as a no-op; either way
    /// the fresh aggregate is returned.
    pub async fn toggle_like(
        conn: &Connection,
        user_id: i64,
        post_id: i64,
    ) -> Result<(bool, i64), tokio_rusqlite::Error> {
        conn.call(move |conn| {
            let existing: Option<i64> = conn
                .query_row(
                    "SELECT id FROM likes WHERE user_id = ?1 AND post_id = ?2",
                    params![user_id, post_id],
                    |row| row.get(0),
                )
                .optional()?;

            let liked = if existing.is_some() {
                conn.execute(
                    "DELETE FROM likes WHERE user_id = ?1 AND post_id = ?2",
                    params![user_id, post_id],
                )?;
                false
            } else {
                match conn.execute(
                    "INSERT INTO likes (user_id, post_id) VALUES (?1, ?2)",
                    params![user_id, post_id],
                ) {
                    Ok(_) => true,
                    Err(rusqlite::Error::SqliteFailure(e, _))
                        if e.code == ErrorCode::ConstraintViolation =>
                    {
                        true
                    }
                    Err(e) => return Err(e.into()),
                }
            };

            let total = count(conn, "SELECT COUNT(*) FROM likes WHERE post_id = ?1", post_id)?;
            Ok((liked, total))
        })
        .await
    }

    pub async fn like_status(
        conn: &Connection,
        post_id: i64,
        viewer: Option<i64>,
    ) -> Result<(i64, bool), tokio_rusqlite::Error> {
        conn.call(move |conn| {
            let total = count(conn, "SELECT COUNT(*) FROM likes WHERE post_id = ?1", post_id)?;
            let liked = match viewer {
                Some(user_id) => conn
                    .query_row(
                        "SELECT id FROM likes WHERE user_id = ?1 AND post_id = ?2",
                        params![user_id, post_id],
                        |row| row.get::<_, i64>(0),
                    )
                    .optional()?
                    .is_some(),
                None => false,
            };
            Ok((total, liked))
        })
        .await
    }

    /// Content must already be trimmed and non-empty; the created comment is
    /// returned joined with its author's display identity.
    pub async fn add_comment(
        conn: &Connection,
        user_id: i64,
        post_id: i64,
        content: String,
    ) -> Result<CommentOut, tokio_rusqlite::Error> {
        conn.call(move |conn| {
            conn.execute(
                "INSERT INTO comments (user_id, post_id, content) VALUES (?1, ?2, ?3)",
                params![user_id, post_id, content],
            )?;
            let id = conn.last_insert_rowid();
            let comment = conn.query_row(
                r#"
                SELECT c.id, c.content, c.created_at, u.id, COALESCE(u.name, u.email)
                FROM comments c JOIN users u ON u.id = c.user_id
                WHERE c.id = ?1
                "#,
                params![id],
                |row| {
                    Ok(CommentOut {
                        id: row.get(0)?,
                        content: row.get(1)?,
                        created_at: row.get(2)?,
                        user_id: row.get(3)?,
                        user_name: row.get(4)?,
                    })
                },
            )?;
            Ok(comment)
        })
        .await
    }

    pub async fn list_comments(
        conn: &Connection,
        post_id: i64,
    ) -> Result<Vec<CommentOut>, tokio_rusqlite::Error> {
        conn.call(move |conn| {
            let mut stmt = conn.prepare(
                r#"
                SELECT c.id, c.content, c.created_at, u.id, COALESCE(u.name, u.email)
                FROM comments c JOIN users u ON u.id = c.user_id
                WHERE c.post_id = ?1
                ORDER BY c.created_at ASC, c.id ASC
                "#,
            )?;
            let comments = stmt
                .query_map(params![post_id], |row| {
                    Ok(CommentOut {
                        id: row.get(0)?,
                        content: row.get(1)?,
                        created_at: row.get(2)?,
                        user_id: row.get(3)?,
                        user_name: row.get(4)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(comments)
        })
        .await
    }

    /// Symmetric to the like toggle. Self-follow is rejected by the handler
    /// before this is called.
    pub async fn toggle_follow(
        conn: &Connection,
        follower_id: i64,
        following_id: i64,
    ) -> Result<(bool, i64), tokio_rusqlite::Error> {
        conn.call(move |conn| {
            let existing: Option<i64> = conn
                .query_row(
                    "SELECT id FROM follows WHERE follower_id = ?1 AND following_id = ?2",
                    params![follower_id, following_id],
                    |row| row.get(0),
                )
                .optional()?;

            let following = if existing.is_some() {
                conn.execute(
                    "DELETE FROM follows WHERE follower_id = ?1 AND following_id = ?2",
                    params![follower_id, following_id],
                )?;
                false
            } else {
                match conn.execute(
                    "INSERT INTO follows (follower_id, following_id) VALUES (?1, ?2)",
                    params![follower_id, following_id],
                ) {
                    Ok(_) => true,
                    Err(rusqlite::Error::SqliteFailure(e, _))
                        if e.code == ErrorCode::ConstraintViolation =>
                    {
                        true
                    }
                    Err(e) => return Err(e.into()),
                }
            };

            let followers = count(
                conn,
                "SELECT COUNT(*) FROM follows WHERE following_id = ?1",
                following_id,
            )?;
            Ok((following, followers))
        })
        .await
    }

    pub async fn follow_status(
        conn: &Connection,
        target_id: i64,
        viewer: Option<i64>,
    ) -> Result<(i64, i64, bool), tokio_rusqlite::Error> {
        conn.call(move |conn| {
            let followers = count(
                conn,
                "SELECT COUNT(*) FROM follows WHERE following_id = ?1",
                target_id,
            )?;
            let following = count(
                conn,
                "SELECT COUNT(*) FROM follows WHERE follower_id = ?1",
                target_id,
            )?;
            let is_following = match viewer {
                Some(viewer_id) => conn
                    .query_row(
                        "SELECT id FROM follows WHERE follower_id = ?1 AND following_id = ?2",
                        params![viewer_id, target_id],
                        |row| row.get::<_, i64>(0),
                    )
                    .optional()?
                    .is_some(),
                None => false,
            };
            Ok((followers, following, is_following))
        })
        .await
    }
}
