// src/repositories/db.rs - SQLite handle + ordered migrations

use std::path::Path;

use rusqlite::ErrorCode;
use tokio_rusqlite::Connection;

/// Ordered migration list. `PRAGMA user_version` records how many have been
/// applied; append new entries, never edit shipped ones.
pub const MIGRATIONS: &[&str] = &[
    // v1: base schema
    r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    email TEXT UNIQUE NOT NULL,
    password_hash TEXT NOT NULL,
    name TEXT
);

CREATE TABLE IF NOT EXISTS posts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL,
    title TEXT,
    description TEXT,
    story TEXT,
    image_path TEXT,
    audio_path TEXT,
    created_at TEXT DEFAULT (datetime('now')),
    FOREIGN KEY(user_id) REFERENCES users(id)
);

CREATE TABLE IF NOT EXISTS likes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL,
    post_id INTEGER NOT NULL,
    created_at TEXT DEFAULT (datetime('now')),
    FOREIGN KEY(user_id) REFERENCES users(id),
    FOREIGN KEY(post_id) REFERENCES posts(id),
    UNIQUE(user_id, post_id)
);

CREATE TABLE IF NOT EXISTS comments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL,
    post_id INTEGER NOT NULL,
    content TEXT NOT NULL,
    created_at TEXT DEFAULT (datetime('now')),
    FOREIGN KEY(user_id) REFERENCES users(id),
    FOREIGN KEY(post_id) REFERENCES posts(id)
);

CREATE TABLE IF NOT EXISTS follows (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    follower_id INTEGER NOT NULL,
    following_id INTEGER NOT NULL,
    created_at TEXT DEFAULT (datetime('now')),
    FOREIGN KEY(follower_id) REFERENCES users(id),
    FOREIGN KEY(following_id) REFERENCES users(id),
    UNIQUE(follower_id, following_id)
);
"#,
    // v2: profile fields
    r#"
ALTER TABLE users ADD COLUMN profile_image TEXT;
ALTER TABLE users ADD COLUMN banner_image TEXT;
ALTER TABLE users ADD COLUMN bio TEXT;
"#,
];

/// Open (or create) the database file and bring the schema up to date.
pub async fn open(path: &Path) -> Result<Connection, tokio_rusqlite::Error> {
    let conn = Connection::open(path).await?;
    migrate(&conn).await?;
    Ok(conn)
}

pub async fn migrate(conn: &Connection) -> Result<(), tokio_rusqlite::Error> {
    conn.call(|conn| {
        // WAL keeps readers unblocked while a writer commits
        conn.pragma_update(None, "journal_mode", "WAL")?;

        let applied: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
        for (idx, migration) in MIGRATIONS.iter().enumerate().skip(applied as usize) {
            let tx = conn.transaction()?;
            tx.execute_batch(migration)?;
            tx.pragma_update(None, "user_version", (idx + 1) as i64)?;
            tx.commit()?;
        }
        Ok(())
    })
    .await
}

/// True when a write was rejected by a UNIQUE constraint.
pub fn is_unique_violation(err: &tokio_rusqlite::Error) -> bool {
    matches!(
        err,
        tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(e, _))
            if e.code == ErrorCode::ConstraintViolation
    )
}
