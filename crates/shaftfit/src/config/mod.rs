use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

const DEFAULT_TOKEN_TTL_HOURS: u32 = 24;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub leads: LeadConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let site_url = env::var("LEAD_SITE_URL")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| format!("http://{host}:{port}"));

        let email_from = env::var("LEAD_EMAIL_FROM")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        let token_ttl_hours = match env::var("LEAD_TOKEN_TTL_HOURS") {
            Ok(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|hours| *hours > 0)
                .ok_or(ConfigError::InvalidTokenTtl)?,
            Err(_) => DEFAULT_TOKEN_TTL_HOURS,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            leads: LeadConfig::new(
                site_url,
                email_from,
                token_ttl_hours,
                environment != AppEnvironment::Production,
            ),
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Lead capture and e-mail verification settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadConfig {
    /// Base URL used for verification links and post-verification redirects.
    pub site_url: String,
    /// Sender address. Submissions are refused while this is unset.
    pub email_from: Option<String>,
    pub token_ttl_hours: u32,
    /// Echo the verify link back to the caller (never in production).
    pub expose_debug: bool,
}

impl LeadConfig {
    pub fn new(
        site_url: impl Into<String>,
        email_from: Option<String>,
        token_ttl_hours: u32,
        expose_debug: bool,
    ) -> Self {
        let site_url = site_url.into();
        Self {
            site_url: site_url.trim_end_matches('/').to_string(),
            email_from,
            token_ttl_hours,
            expose_debug,
        }
    }

    /// Names of settings that must be present before a lead can be accepted.
    pub fn missing_settings(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.email_from.is_none() {
            missing.push("LEAD_EMAIL_FROM");
        }
        if self.site_url.is_empty() {
            missing.push("LEAD_SITE_URL");
        }
        missing
    }

    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(i64::from(self.token_ttl_hours))
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidTokenTtl,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidTokenTtl => {
                write!(f, "LEAD_TOKEN_TTL_HOURS must be a positive whole number")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidTokenTtl => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_HOST");
        env::remove_var("APP_PORT");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("LEAD_SITE_URL");
        env::remove_var("LEAD_EMAIL_FROM");
        env::remove_var("LEAD_TOKEN_TTL_HOURS");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.leads.site_url, "http://127.0.0.1:3000");
        assert_eq!(config.leads.token_ttl_hours, 24);
        assert!(config.leads.expose_debug);
        assert_eq!(config.leads.missing_settings(), vec!["LEAD_EMAIL_FROM"]);
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn lead_settings_trim_site_url_and_hide_debug_in_production() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_ENV", "production");
        env::set_var("LEAD_SITE_URL", "https://fit.example.org/");
        env::set_var("LEAD_EMAIL_FROM", "Fit Lab <fit@example.org>");
        env::set_var("LEAD_TOKEN_TTL_HOURS", "48");

        let config = AppConfig::load().expect("config loads");

        assert_eq!(config.leads.site_url, "https://fit.example.org");
        assert_eq!(config.leads.token_ttl(), chrono::Duration::hours(48));
        assert!(!config.leads.expose_debug);
        assert!(config.leads.missing_settings().is_empty());
        reset_env();
    }

    #[test]
    fn rejects_zero_token_ttl() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("LEAD_TOKEN_TTL_HOURS", "0");
        let err = AppConfig::load().expect_err("zero ttl rejected");
        assert!(matches!(err, ConfigError::InvalidTokenTtl));
        reset_env();
    }
}
