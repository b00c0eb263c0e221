use ems_core::pagination::{PaginationConfig, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry durations).
    pub jwt: JwtConfig,
    /// Page size defaults handed to every list endpoint.
    pub pagination: PaginationConfig,
    /// Admin account ensured at start-up, if configured.
    pub bootstrap_admin: Option<BootstrapAdmin>,
    /// Key rate limits on `X-Forwarded-For` instead of the peer address.
    /// Enable only behind a proxy that overwrites the header.
    pub trust_proxy: bool,
}

/// Credentials for the admin identity created at start-up.
#[derive(Clone)]
pub struct BootstrapAdmin {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for BootstrapAdmin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BootstrapAdmin")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `PAGE_DEFAULT_LIMIT`   | `10`                       |
    /// | `PAGE_MAX_LIMIT`       | `100`                      |
    /// | `ADMIN_EMAIL`          | unset (no bootstrap)       |
    /// | `ADMIN_PASSWORD`       | unset (no bootstrap)       |
    /// | `ADMIN_NAME`           | `Administrator`            |
    /// | `TRUST_PROXY`          | `false`                    |
    ///
    /// JWT settings are documented on [`JwtConfig::from_env`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let default_limit: i64 = std::env::var("PAGE_DEFAULT_LIMIT")
            .unwrap_or_else(|_| DEFAULT_PAGE_LIMIT.to_string())
            .parse()
            .expect("PAGE_DEFAULT_LIMIT must be a valid i64");

        let max_limit: i64 = std::env::var("PAGE_MAX_LIMIT")
            .unwrap_or_else(|_| MAX_PAGE_LIMIT.to_string())
            .parse()
            .expect("PAGE_MAX_LIMIT must be a valid i64");
        assert!(
            default_limit >= 1 && default_limit <= max_limit,
            "PAGE_DEFAULT_LIMIT must be between 1 and PAGE_MAX_LIMIT"
        );

        let bootstrap_admin = match (
            std::env::var("ADMIN_EMAIL").ok().filter(|v| !v.trim().is_empty()),
            std::env::var("ADMIN_PASSWORD").ok().filter(|v| !v.is_empty()),
        ) {
            (Some(email), Some(password)) => Some(BootstrapAdmin {
                name: std::env::var("ADMIN_NAME").unwrap_or_else(|_| "Administrator".into()),
                email,
                password,
            }),
            _ => None,
        };

        let trust_proxy = std::env::var("TRUST_PROXY")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            pagination: PaginationConfig {
                default_limit,
                max_limit,
            },
            bootstrap_admin,
            trust_proxy,
        }
    }
}
