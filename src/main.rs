use axum::{
    routing::{get, post},
    Router,
};
use dotenvy::dotenv;
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod db;
mod error;
mod handlers;
mod models;
mod store;
mod timefmt;


use store::TodoStore;

const LOG_FILE: &str = "app.log";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // Console plus append-only app.log.
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(LOG_FILE)?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Arc::new(log_file)),
        )
        .init();

    let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://db/app.db".into());
    let store = match TodoStore::connect(&database_url).await {
        Ok(store) => {
            tracing::info!(%database_url, "database connected");
            store
        }
        Err(e) => {
            tracing::error!(%database_url, "database connection failed: {}", e);
            anyhow::bail!("cannot open database {database_url}: {e}");
        }
    };

    let app = create_app(store);

    let addr: SocketAddr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:8000".into())
        .parse()?;
    tracing::info!("listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

pub fn create_app(store: TodoStore) -> Router {
    Router::new()
        .route("/", get(handlers::pages::index))
        .route("/tasks", post(handlers::tasks::create))
        .route("/tasks/:id/done", post(handlers::tasks::set_done))
        .route("/tasks/:id/delete", post(handlers::tasks::delete))
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}
