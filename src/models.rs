use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// --- Domain models (mapped to DB) ---

/// One to-do row. `created_at` stays the raw stored text (UTC-naive
/// `YYYY-MM-DD HH:MM:SS`) so display formatting can fall back to it
/// verbatim when it does not parse.
#[derive(Debug, Clone, FromRow)]
pub struct Task {
    pub id: i64,
    pub task: String,
    pub comment: Option<String>,
    pub created_at: String,
    pub done: bool,
}

/// Per-day aggregate for the chart: tasks created that date, and how many
/// of those are currently done.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct DailyCount {
    pub date: String,
    pub todo_count: i64,
    pub done_count: i64,
}

// --- Form payloads ---

#[derive(Debug, Deserialize)]
pub struct NewTask {
    pub task: String,
    pub comment: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SetDone {
    pub done: bool,
}

// --- Chart data ---

/// Long-form chart datum; each `DailyCount` contributes one point per kind.
#[derive(Debug, Serialize)]
pub struct ChartPoint {
    pub date: String,
    pub kind: &'static str,
    pub count: i64,
}

pub const KIND_CREATED: &str = "TODO件数";
pub const KIND_COMPLETED: &str = "完了件数";

impl DailyCount {
    pub fn chart_points(&self) -> [ChartPoint; 2] {
        [
            ChartPoint {
                date: self.date.clone(),
                kind: KIND_CREATED,
                count: self.todo_count,
            },
            ChartPoint {
                date: self.date.clone(),
                kind: KIND_COMPLETED,
                count: self.done_count,
            },
        ]
    }
}
