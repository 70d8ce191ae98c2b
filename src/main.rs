//! users-svc binary.
//!
//! Entry point and error-handling boundary: configuration, logging, store
//! bootstrap, then serve until SIGTERM / Ctrl-C. Any startup failure,
//! including an unreachable store, exits non-zero.

use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use users_svc::config::Config;
use users_svc::{Server, UserService, UserStore, app, db};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(err) = run().await {
        error!("{err:#}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let config = Config::parse();

    let pool = db::connect(&config.database_url, config.max_connections)
        .await
        .with_context(|| format!("could not connect to the store at {}", config.database_url))?;

    let service = UserService::new(UserStore::new(pool.clone()));
    if config.api_token().is_none() {
        warn!("API_TOKEN unset; /users is not authenticated");
    }
    let router = app(service, config.request_timeout(), config.api_token())
        .context("building routes")?;

    let server = Server::bind(config.listen.as_str())
        .await
        .with_context(|| format!("could not bind {}", config.listen))?;
    server.serve(router).await.context("server error")?;

    pool.close().await;
    info!("store connections closed");
    Ok(())
}
