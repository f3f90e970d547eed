use askama::Template;
use axum::{
    extract::{Query, State},
    response::Html,
};
use serde::Deserialize;

use crate::{
    error::AppError,
    models::{ChartPoint, Task},
    store::TodoStore,
    timefmt,
};

/// Flash codes carried through the post-redirect-get cycle. Only known
/// codes render; anything else in the query string is ignored.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub msg: Option<String>,
    pub err: Option<String>,
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    database_url: String,
    flash: Option<String>,
    flash_error: Option<String>,
    rows: Vec<TaskRow>,
    list_error: Option<String>,
    chart_data: String,
    chart_error: Option<String>,
}

struct TaskRow {
    id: i64,
    task: String,
    comment: Option<String>,
    created_display: String,
    done: bool,
    next_done: bool,
}

impl From<Task> for TaskRow {
    fn from(t: Task) -> Self {
        Self {
            id: t.id,
            task: t.task,
            comment: t.comment,
            created_display: timefmt::format_for_display(&t.created_at),
            done: t.done,
            next_done: !t.done,
        }
    }
}

fn flash_message(code: &str) -> Option<String> {
    match code {
        "added" => Some("TODOを追加しました".to_string()),
        _ => None,
    }
}

fn flash_error_message(code: &str) -> Option<String> {
    match code {
        "add" => Some("TODO追加に失敗しました".to_string()),
        "toggle" => Some("完了状態の変更に失敗しました".to_string()),
        "delete" => Some("TODO削除に失敗しました".to_string()),
        _ => None,
    }
}

/// The whole page in one pass: add form, task rows, daily chart. A failing
/// section degrades to an inline error while the rest still renders.
pub async fn index(
    State(store): State<TodoStore>,
    Query(params): Query<PageQuery>,
) -> Result<Html<String>, AppError> {
    let flash = params.msg.as_deref().and_then(flash_message);
    let flash_error = params.err.as_deref().and_then(flash_error_message);

    let (rows, list_error) = match store.list_all().await {
        Ok(tasks) => (tasks.into_iter().map(TaskRow::from).collect(), None),
        Err(e) => {
            tracing::error!("todo list query failed: {}", e);
            (Vec::new(), Some("TODO一覧の取得に失敗しました".to_string()))
        }
    };

    let (chart_data, chart_error) = match store.daily_counts().await {
        Ok(counts) => {
            let points: Vec<ChartPoint> = counts.iter().flat_map(|c| c.chart_points()).collect();
            let json = serde_json::to_string(&points)
                .map_err(|e| AppError::Internal(format!("chart serialization: {e}")))?;
            (json, None)
        }
        Err(e) => {
            tracing::error!("daily count query failed: {}", e);
            (
                "[]".to_string(),
                Some("グラフ表示エラー".to_string()),
            )
        }
    };

    let page = IndexTemplate {
        database_url: store.database_url().to_string(),
        flash,
        flash_error,
        rows,
        list_error,
        chart_data,
        chart_error,
    };

    Ok(Html(page.render()?))
}
