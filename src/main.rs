use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use todo_server::{config::Config, store::Store, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .context("invalid log filter")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    server(config).await
}

async fn server(config: Config) -> anyhow::Result<()> {
    let addr = config.addr();

    // Create a new TCP listener.
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("Listening on {}", listener.local_addr()?);

    let state = AppState::new(Store::new());
    todo_server::serve(listener, state, shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
