//! Config module.

mod drivers;

use std::{env, str::FromStr};

pub use drivers::{ApiDriver, DatabaseDriver, DriverError};

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database driver.
    pub driver: DatabaseDriver,
    /// Postgres options.
    pub pg: DatabasePgConfig,
}

#[derive(Debug, Clone)]
pub struct DatabasePgConfig {
    /// Database URL.
    pub url: String,
    /// Database pool size.
    pub pool_size: u32,
    /// Database connection timeout (in seconds)
    pub connection_timeout: u32,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// API driver.
    pub driver: ApiDriver,
    /// GitHub options.
    pub github: ApiGitHubConfig,
}

#[derive(Debug, Clone)]
pub struct ApiGitHubConfig {
    /// GitHub API connect timeout (in milliseconds).
    pub connect_timeout: u64,
    /// GitHub API request timeout (in milliseconds).
    pub request_timeout: u64,
    /// GitHub API root URL.
    pub root_url: String,
    /// GitHub API personal token.
    pub token: String,
}

#[derive(Debug, Clone)]
pub struct SentryConfig {
    /// Sentry URL.
    pub url: String,
    /// Traces sample rate (between 0 and 1) for Sentry
    pub traces_sample_rate: f32,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Use bunyan logging.
    pub use_bunyan: bool,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server bind IP.
    pub bind_ip: String,
    /// Server bind port.
    pub bind_port: u16,
    /// Server workers count.
    pub workers_count: Option<u16>,
    /// Allowed CORS origin, permissive when empty.
    pub cors_allowed_origin: String,
}

#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// Login of the account posting AI review comments.
    pub reviewer_login: String,
    /// Default lookback window (in days).
    pub default_days: u32,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Database options.
    pub database: DatabaseConfig,
    /// API options.
    pub api: ApiConfig,
    /// Logging options.
    pub logging: LoggingConfig,
    /// Sentry options.
    pub sentry: SentryConfig,
    /// Server options.
    pub server: ServerConfig,
    /// Scraper options.
    pub scraper: ScraperConfig,
    /// App version
    pub version: String,
}

impl Config {
    /// Create configuration from environment.
    pub fn from_env(version: String) -> Result<Config, DriverError> {
        Ok(Config {
            database: DatabaseConfig {
                driver: DatabaseDriver::from_str(&env_to_str("BOT_DATABASE_DRIVER", "pg"))?,
                pg: DatabasePgConfig {
                    url: env_to_str("BOT_DATABASE_PG_URL", ""),
                    pool_size: env_to_u32("BOT_DATABASE_PG_POOL_SIZE", 20),
                    connection_timeout: env_to_u32("BOT_DATABASE_PG_CONNECTION_TIMEOUT", 5),
                },
            },
            api: ApiConfig {
                driver: ApiDriver::from_str(&env_to_str("BOT_API_DRIVER", "github"))?,
                github: ApiGitHubConfig {
                    connect_timeout: env_to_u64("BOT_API_GITHUB_CONNECT_TIMEOUT", 5000),
                    request_timeout: env_to_u64("BOT_API_GITHUB_REQUEST_TIMEOUT", 30000),
                    root_url: env_to_str("BOT_API_GITHUB_ROOT_URL", "https://api.github.com"),
                    token: env_to_str("BOT_API_GITHUB_TOKEN", ""),
                },
            },
            logging: LoggingConfig {
                use_bunyan: env_to_bool("BOT_LOGGING_USE_BUNYAN", false),
            },
            sentry: SentryConfig {
                url: env_to_str("BOT_SENTRY_URL", ""),
                traces_sample_rate: env_to_f32("BOT_SENTRY_TRACES_SAMPLE_RATE", 0.0),
            },
            server: ServerConfig {
                bind_ip: env_to_str("BOT_SERVER_BIND_IP", "127.0.0.1"),
                bind_port: env_to_u16("BOT_SERVER_BIND_PORT", 8000),
                workers_count: env_to_optional_u16("BOT_SERVER_WORKERS_COUNT", None),
                cors_allowed_origin: env_to_str(
                    "BOT_SERVER_CORS_ALLOWED_ORIGIN",
                    "http://localhost:5173",
                ),
            },
            scraper: ScraperConfig {
                reviewer_login: env_to_str("BOT_SCRAPER_REVIEWER_LOGIN", "github-actions[bot]"),
                default_days: env_to_u32("BOT_SCRAPER_DEFAULT_DAYS", 7),
            },
            version,
        })
    }

    pub fn from_env_no_version() -> Result<Self, DriverError> {
        Self::from_env("0.0.0".into())
    }
}

fn env_to_u16(name: &str, default: u16) -> u16 {
    env::var(name)
        .map(|e| e.parse().unwrap_or(default))
        .unwrap_or(default)
}

fn env_to_optional_u16(name: &str, default: Option<u16>) -> Option<u16> {
    env::var(name)
        .map(|e| e.parse::<u16>().map(Some).unwrap_or(default))
        .unwrap_or(default)
}

fn env_to_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .map(|e| e.parse().unwrap_or(default))
        .unwrap_or(default)
}

fn env_to_u32(name: &str, default: u32) -> u32 {
    env::var(name)
        .map(|e| e.parse().unwrap_or(default))
        .unwrap_or(default)
}

fn env_to_f32(name: &str, default: f32) -> f32 {
    env::var(name)
        .map(|e| e.parse().unwrap_or(default))
        .unwrap_or(default)
}

fn env_to_bool(name: &str, default: bool) -> bool {
    env::var(name).map(|e| !e.is_empty()).unwrap_or(default)
}

fn env_to_str(name: &str, default: &str) -> String {
    env::var(name)
        .unwrap_or_else(|_e| default.to_string())
        .replace("\\n", "\n")
}
