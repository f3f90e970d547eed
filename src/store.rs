use sqlx::SqlitePool;

use crate::db;
use crate::error::AppError;
use crate::models::{DailyCount, Task};

/// Owned handle to the `todo` table, injected into the handlers as axum
/// state. Cloning shares the underlying pool.
#[derive(Clone)]
pub struct TodoStore {
    pool: SqlitePool,
    database_url: String,
}

impl TodoStore {
    /// Open the database and make sure the schema is in place.
    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        let pool = db::connect_pool(database_url).await?;
        db::init_schema(&pool).await?;
        Ok(Self {
            pool,
            database_url: database_url.to_string(),
        })
    }

    /// Where this store lives, for the page header.
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Insert a new task. `created_at` and `done` come from the column
    /// defaults (UTC now, false). An empty comment is stored as NULL.
    pub async fn create(&self, task: &str, comment: Option<&str>) -> Result<i64, AppError> {
        if task.trim().is_empty() {
            return Err(AppError::Validation("task text must not be empty".into()));
        }
        let comment = comment.map(str::trim).filter(|c| !c.is_empty());

        let id = sqlx::query("INSERT INTO todo (task, comment) VALUES (?, ?)")
            .bind(task)
            .bind(comment)
            .execute(&self.pool)
            .await?
            .last_insert_rowid();

        tracing::info!(id, task, comment = comment.unwrap_or(""), "todo created");
        Ok(id)
    }

    /// All rows, newest first. `id` breaks ties between same-second inserts.
    pub async fn list_all(&self) -> Result<Vec<Task>, AppError> {
        let tasks = sqlx::query_as::<_, Task>(
            "SELECT id, task, comment, created_at, done FROM todo
             ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    /// Set the completion flag. A missing `id` is a silent no-op.
    pub async fn set_done(&self, id: i64, done: bool) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE todo SET done = ? WHERE id = ?")
            .bind(done)
            .bind(id)
            .execute(&self.pool)
            .await?;

        tracing::info!(id, done, rows = result.rows_affected(), "todo done flag updated");
        Ok(())
    }

    /// Delete a row. A missing `id` is a silent no-op.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM todo WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        tracing::info!(id, rows = result.rows_affected(), "todo deleted");
        Ok(())
    }

    /// Per-day created/done counts for the chart, ascending by date.
    /// `done_count` counts rows created that date that are done now;
    /// completion dates are not tracked.
    pub async fn daily_counts(&self) -> Result<Vec<DailyCount>, AppError> {
        let counts = sqlx::query_as::<_, DailyCount>(
            "SELECT DATE(created_at) AS date,
                    COUNT(*) AS todo_count,
                    COALESCE(SUM(done), 0) AS done_count
             FROM todo
             GROUP BY DATE(created_at)
             ORDER BY date",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(counts)
    }
}
