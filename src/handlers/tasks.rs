use axum::{
    extract::{Path, State},
    response::Redirect,
    Form,
};

use crate::{
    models::{NewTask, SetDone},
    store::TodoStore,
};

/// Add a task from the form. Empty task text is ignored outright: no row,
/// no message, just back to the page.
pub async fn create(State(store): State<TodoStore>, Form(payload): Form<NewTask>) -> Redirect {
    let task = payload.task.trim();
    if task.is_empty() {
        return Redirect::to("/");
    }

    match store.create(task, payload.comment.as_deref()).await {
        Ok(_) => Redirect::to("/?msg=added"),
        Err(e) => {
            tracing::error!(task, "todo create failed: {}", e);
            Redirect::to("/?err=add")
        }
    }
}

/// Persist a checkbox change, then send the browser back to `/` so the
/// rendered state is re-read from the store.
pub async fn set_done(
    State(store): State<TodoStore>,
    Path(id): Path<i64>,
    Form(payload): Form<SetDone>,
) -> Redirect {
    match store.set_done(id, payload.done).await {
        Ok(()) => Redirect::to("/"),
        Err(e) => {
            tracing::error!(id, done = payload.done, "todo done update failed: {}", e);
            Redirect::to("/?err=toggle")
        }
    }
}

pub async fn delete(State(store): State<TodoStore>, Path(id): Path<i64>) -> Redirect {
    match store.delete(id).await {
        Ok(()) => Redirect::to("/"),
        Err(e) => {
            tracing::error!(id, "todo delete failed: {}", e);
            Redirect::to("/?err=delete")
        }
    }
}
