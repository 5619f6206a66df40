use std::str::FromStr;

use axum::http::HeaderValue;
use sqlx::postgres::PgConnectOptions;

/// Startup configuration failure. Reported before any socket is bound.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} has an invalid value '{value}'")]
    Invalid { var: &'static str, value: String },

    #[error("DATABASE_URL is not a valid connection string: {0}")]
    DatabaseUrl(#[from] sqlx::Error),
}

/// Logging and runtime profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AppMode {
    /// Human-readable logs, verbose default filter.
    #[default]
    Debug,
    /// JSON logs at `info`.
    Release,
}

impl FromStr for AppMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "release" => Ok(Self::Release),
            _ => Err(()),
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// Mount point of the event routes (default: `/api`, empty for root).
    pub api_prefix: String,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<HeaderValue>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub mode: AppMode,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `8080`                     |
    /// | `API_PREFIX`           | `/api`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `APP_MODE`             | `debug`                    |
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env_or("HOST", "0.0.0.0");
        let port = parse_env("PORT", "8080")?;
        let api_prefix = normalize_prefix(&env_or("API_PREFIX", "/api"));

        let cors_origins = env_or("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|origin| {
                origin.parse().map_err(|_| ConfigError::Invalid {
                    var: "CORS_ORIGINS",
                    value: origin.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let request_timeout_secs = parse_env("REQUEST_TIMEOUT_SECS", "30")?;
        let mode = parse_env("APP_MODE", "debug")?;

        Ok(Self {
            host,
            port,
            api_prefix,
            cors_origins,
            request_timeout_secs,
            mode,
        })
    }
}

/// Database connection settings.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub connect_options: PgConnectOptions,
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// Load database settings. `DATABASE_URL` wins over the individual parts.
    ///
    /// | Env Var              | Default      |
    /// |----------------------|--------------|
    /// | `DATABASE_URL`       | (unset)      |
    /// | `DB_HOST`            | `localhost`  |
    /// | `DB_PORT`            | `5432`       |
    /// | `DB_NAME`            | `calendar`   |
    /// | `DB_USER`            | `postgres`   |
    /// | `DB_PASSWORD`        | (empty)      |
    /// | `DB_MAX_CONNECTIONS` | `10`         |
    pub fn from_env() -> Result<Self, ConfigError> {
        let max_connections = parse_env("DB_MAX_CONNECTIONS", "10")?;

        let connect_options = match std::env::var("DATABASE_URL") {
            Ok(url) if !url.is_empty() => PgConnectOptions::from_str(&url)?,
            _ => {
                let options = PgConnectOptions::new()
                    .host(&env_or("DB_HOST", "localhost"))
                    .port(parse_env("DB_PORT", "5432")?)
                    .database(&env_or("DB_NAME", "calendar"))
                    .username(&env_or("DB_USER", "postgres"));
                match std::env::var("DB_PASSWORD") {
                    Ok(password) if !password.is_empty() => options.password(&password),
                    _ => options,
                }
            }
        };

        Ok(Self {
            connect_options,
            max_connections,
        })
    }
}

fn env_or(var: &str, default: &str) -> String {
    std::env::var(var).unwrap_or_else(|_| default.into())
}

fn parse_env<T: FromStr>(var: &'static str, default: &str) -> Result<T, ConfigError> {
    let value = env_or(var, default);
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { var, value })
}

/// `api/` and `/api/` both become `/api`; `/` and empty mean "no prefix".
fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}
