use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development.
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
    /// Timeout for probing a web resource URL, in seconds (default: `30`).
    pub url_check_timeout_secs: u64,
    /// Public prefix under which uploaded symbols are served (default: `/media/`).
    pub media_url: String,
    /// Where anonymous visitors of admin pages are sent (default: `/admin/account/login/`).
    pub login_url: String,
    /// JWT token configuration.
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                  |
    /// |--------------------------|--------------------------|
    /// | `HOST`                   | `0.0.0.0`                |
    /// | `PORT`                   | `3000`                   |
    /// | `CORS_ORIGINS`           | `http://localhost:5173`  |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`                     |
    /// | `URL_CHECK_TIMEOUT_SECS` | `30`                     |
    /// | `MEDIA_URL`              | `/media/`                |
    /// | `LOGIN_URL`              | `/admin/account/login/`  |
    ///
    /// See [`JwtConfig::from_env`] for the token settings.
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

        let request_timeout_secs = secs_var("REQUEST_TIMEOUT_SECS");
        let url_check_timeout_secs = secs_var("URL_CHECK_TIMEOUT_SECS");

        let media_url = std::env::var("MEDIA_URL").unwrap_or_else(|_| "/media/".into());
        let login_url =
            std::env::var("LOGIN_URL").unwrap_or_else(|_| "/admin/account/login/".into());

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            url_check_timeout_secs,
            media_url,
            login_url,
            jwt: JwtConfig::from_env(),
        }
    }
}

/// Read a seconds value, defaulting to 30.
fn secs_var(name: &str) -> u64 {
    std::env::var(name)
        .unwrap_or_else(|_| "30".into())
        .parse()
        .unwrap_or_else(|_| panic!("{name} must be a valid u64"))
}
