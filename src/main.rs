use std::sync::Arc;

use anyhow::{Context, Result};
use commands_api::{
    app::build_router,
    application::command_service::CommandService,
    config::AppConfig,
    infrastructure::{database, sqlite_command_repository::SqliteCommandRepository},
    state::AppState,
};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().context("failed to load configuration")?;

    let pool = database::connect(&config.database_url, config.db_max_connections)
        .await
        .context("failed to open database")?;
    database::init_schema(&pool)
        .await
        .context("failed to prepare schema")?;

    let repository = Arc::new(SqliteCommandRepository::new(pool));
    let service = Arc::new(CommandService::new(repository));
    let state = AppState::new(service);

    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    info!(
        bind_addr = %config.bind_addr,
        database_url = %config.database_url,
        "commands API started"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("commands_api=debug,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        park_on_error(tokio::signal::ctrl_c().await, "ctrl+c").await;
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => park_on_error(Err(err), "sigterm").await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// A signal source that failed to install must never resolve, otherwise the
/// server would shut down right after starting.
async fn park_on_error(result: std::io::Result<()>, signal_name: &str) {
    if let Err(err) = result {
        error!(error = %err, signal = signal_name, "unable to install signal handler");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn failed_signal_install_never_triggers_shutdown() {
        let failed = park_on_error(Err(std::io::Error::other("no signal driver")), "ctrl+c");

        let parked = tokio::select! {
            biased;
            _ = failed => false,
            _ = std::future::ready(()) => true,
        };
        assert!(parked);
    }

    #[tokio::test]
    async fn delivered_signal_triggers_shutdown() {
        park_on_error(Ok(()), "ctrl+c").await;
    }
}
