// src/repositories/user_repository.rs

use rusqlite::{params, OptionalExtension, Row, ToSql};
use tokio_rusqlite::Connection;

use crate::models::user::{ProfileUpdate, User};

pub struct UserRepository;

fn user_from_row(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        password_hash: row.get(2)?,
        name: row.get(3)?,
        profile_image: row.get(4)?,
        banner_image: row.get(5)?,
        bio: row.get(6)?,
    })
}

const USER_COLUMNS: &str = "id, email, password_hash, name, profile_image, banner_image, bio";

impl UserRepository {
    pub async fn create_user(
        conn: &Connection,
        email: String,
        password_hash: String,
        name: Option<String>,
    ) -> Result<i64, tokio_rusqlite::Error> {
        conn.call(move |conn| {
            conn.execute(
                "INSERT INTO users (email, password_hash, name) VALUES (?1, ?2, ?3)",
                params![email, password_hash, name],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
    }

    pub async fn find_by_email(
        conn: &Connection,
        email: String,
    ) -> Result<Option<User>, tokio_rusqlite::Error> {
        conn.call(move |conn| {
            let user = conn
                .query_row(
                    &format!("SELECT {} FROM users WHERE email = ?1", USER_COLUMNS),
                    params![email],
                    user_from_row,
                )
                .optional()?;
            Ok(user)
        })
        .await
    }

    pub async fn find_by_id(
        conn: &Connection,
        id: i64,
    ) -> Result<Option<User>, tokio_rusqlite::Error> {
        conn.call(move |conn| {
            let user = conn
                .query_row(
                    &format!("SELECT {} FROM users WHERE id = ?1", USER_COLUMNS),
                    params![id],
                    user_from_row,
                )
                .optional()?;
            Ok(user)
        })
        .await
    }

    /// Apply only the fields present in the update; empty strings clear a
    /// column back to NULL.
    pub async fn update_profile(
        conn: &Connection,
        id: i64,
        update: ProfileUpdate,
    ) -> Result<(), tokio_rusqlite::Error> {
        if update.is_empty() {
            return Ok(());
        }
        conn.call(move |conn| {
            let mut sets: Vec<&str> = Vec::new();
            let mut values: Vec<Box<dyn ToSql>> = Vec::new();

            let nullable = |s: String| if s.is_empty() { None } else { Some(s) };
            if let Some(name) = update.name {
                sets.push("name = ?");
                values.push(Box::new(nullable(name)));
            }
            if let Some(bio) = update.bio {
                sets.push("bio = ?");
                values.push(Box::new(nullable(bio)));
            }
            if let Some(profile_image) = update.profile_image {
                sets.push("profile_image = ?");
                values.push(Box::new(profile_image));
            }
            if let Some(banner_image) = update.banner_image {
                sets.push("banner_image = ?");
                values.push(Box::new(banner_image));
            }

            values.push(Box::new(id));
            let sql = format!("UPDATE users SET {} WHERE id = ?", sets.join(", "));
            let params: Vec<&dyn ToSql> = values.iter().map(|v| v.as_ref()).collect();
            conn.execute(&sql, &params[..])?;
            Ok(())
        })
        .await
    }
}
