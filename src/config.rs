use std::net::SocketAddr;

use anyhow::{Context, Result};

pub const DEFAULT_DATABASE_URL: &str = "sqlite:CommandsDb.db";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub database_url: String,
    pub db_max_connections: u32,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let env_string = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let bind_addr = env_string("COMMANDS_BIND_ADDR", "127.0.0.1:5000")
            .parse::<SocketAddr>()
            .context("COMMANDS_BIND_ADDR must be a valid host:port")?;

        let database_url =
            normalize_database_url(&env_string("COMMANDS_DATABASE_URL", DEFAULT_DATABASE_URL));

        let db_max_connections = env_string("COMMANDS_DB_MAX_CONNECTIONS", "5")
            .parse::<u32>()
            .context("COMMANDS_DB_MAX_CONNECTIONS must be u32")?;

        Ok(Self {
            bind_addr,
            database_url,
            db_max_connections,
        })
    }
}

/// Accepts either a sqlx URL (`sqlite:...`) or an ADO-style connection string
/// such as `Data Source=CommandsDb.db`.
pub fn normalize_database_url(raw: &str) -> String {
    let raw = raw.trim();
    if raw.starts_with("sqlite:") {
        return raw.to_string();
    }

    let data_source = raw.split(';').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("data source")
            .then(|| value.trim().to_string())
    });

    match data_source {
        Some(path) => format!("sqlite:{path}"),
        None => raw.to_string(),
    }
}
