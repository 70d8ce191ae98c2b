//! Process configuration: command-line flags, each backed by an environment
//! variable.

use std::time::Duration;

use clap::Parser;

/// HTTP CRUD service for users.
#[derive(Parser, Debug, Clone)]
#[command(name = "users-svc", version)]
pub struct Config {
    /// Address to listen on.
    #[arg(long, env = "USERS_LISTEN", default_value = "0.0.0.0:8000")]
    pub listen: String,

    /// SQLite connection URL; the database file is created if missing.
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://users.db")]
    pub database_url: String,

    /// Upper bound on pooled store connections.
    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = 5)]
    pub max_connections: u32,

    /// Deadline for each store call, in seconds.
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = 5)]
    pub request_timeout_secs: u64,

    /// Static bearer token required on `/users`. Unset disables the check.
    #[arg(long, env = "API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,
}

impl Config {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// The configured token, ignoring an empty value.
    pub fn api_token(&self) -> Option<&str> {
        self.api_token.as_deref().filter(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "users-svc",
            "--listen", "127.0.0.1:9000",
            "--database-url", "sqlite::memory:",
            "--max-connections", "2",
            "--request-timeout-secs", "1",
            "--api-token", "valid-token",
        ])
        .unwrap();

        assert_eq!(config.listen, "127.0.0.1:9000");
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.max_connections, 2);
        assert_eq!(config.request_timeout(), Duration::from_secs(1));
        assert_eq!(config.api_token(), Some("valid-token"));
    }

    #[test]
    fn empty_token_disables_auth() {
        let config = Config::try_parse_from(["users-svc", "--api-token", ""]).unwrap();
        assert_eq!(config.api_token(), None);
    }

    #[test]
    fn rejects_non_numeric_timeout() {
        assert!(Config::try_parse_from(["users-svc", "--request-timeout-secs", "soon"]).is_err());
    }
}
