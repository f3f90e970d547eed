use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::error::AppError;

/// Open (creating if missing) the SQLite database behind `database_url`.
///
/// The pool is capped at a single connection: the app is single-user, and
/// one long-lived connection serializes mutations at the storage layer.
pub async fn connect_pool(database_url: &str) -> Result<SqlitePool, AppError> {
    // SQLite will not create intermediate directories itself.
    if let Some(file) = database_url.strip_prefix("sqlite://") {
        if let Some(parent) = Path::new(file).parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    AppError::Internal(format!(
                        "cannot create database directory {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }
    }

    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Ensure the `todo` table exists with the current schema. Idempotent,
/// called on every startup.
///
/// Older database files predate the `comment` column; those are upgraded in
/// place after an explicit column-existence check, so a failed ALTER is a
/// real error rather than an ignored one.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS todo (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            task TEXT NOT NULL,
            comment TEXT,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            done INTEGER NOT NULL DEFAULT 0
        )",
    )
    .execute(pool)
    .await?;

    if !column_exists(pool, "todo", "comment").await? {
        sqlx::query("ALTER TABLE todo ADD COLUMN comment TEXT")
            .execute(pool)
            .await?;
        tracing::info!("added missing todo.comment column");
    }

    tracing::info!("todo table ready");
    Ok(())
}

async fn column_exists(pool: &SqlitePool, table: &str, column: &str) -> Result<bool, sqlx::Error> {
    let rows = sqlx::query(&format!("PRAGMA table_info({table})"))
        .fetch_all(pool)
        .await?;

    for row in rows {
        let name: String = row.try_get("name")?;
        if name == column {
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn memory_pool() -> SqlitePool {
        connect_pool("sqlite::memory:")
            .await
            .expect("in-memory pool")
    }

    #[tokio::test]
    async fn init_schema_is_idempotent() {
        let pool = memory_pool().await;
        init_schema(&pool).await.unwrap();
        init_schema(&pool).await.unwrap();

        sqlx::query("INSERT INTO todo (task) VALUES ('x')")
            .execute(&pool)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn legacy_table_gains_comment_column_without_data_loss() {
        let pool = memory_pool().await;

        // Pre-comment schema from older deployments.
        sqlx::query(
            "CREATE TABLE todo (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                task TEXT NOT NULL,
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                done INTEGER NOT NULL DEFAULT 0
            )",
        )
        .execute(&pool)
        .await
        .unwrap();
        sqlx::query("INSERT INTO todo (task, done) VALUES ('old row', 1)")
            .execute(&pool)
            .await
            .unwrap();

        assert!(!column_exists(&pool, "todo", "comment").await.unwrap());
        init_schema(&pool).await.unwrap();
        assert!(column_exists(&pool, "todo", "comment").await.unwrap());

        let row = sqlx::query("SELECT task, done, comment FROM todo")
            .fetch_one(&pool)
            .await
            .unwrap();
        let task: String = row.try_get("task").unwrap();
        let done: bool = row.try_get("done").unwrap();
        let comment: Option<String> = row.try_get("comment").unwrap();
        assert_eq!(task, "old row");
        assert!(done);
        assert_eq!(comment, None);
    }
}
