//! Validation utilities.

use std::fmt::Write;

use evalbot_config::{ApiDriver, Config, DatabaseDriver};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Errors on environment variables:\n{}", errors)]
    EnvVarsError { errors: String },
}

fn validate_env_vars(config: &Config) -> Result<(), ValidationError> {
    #[inline]
    fn _missing(error: &mut String, name: &str) {
        error.push('\n');
        let _ = write!(error, "  - Missing env. var.: {}", name);
    }

    #[inline]
    fn _invalid(error: &mut String, name: &str, reason: &str) {
        error.push('\n');
        let _ = write!(error, "  - Invalid env. var.: {} ({})", name, reason);
    }

    let mut error = String::new();

    // Check server configuration
    if config.server.bind_ip.is_empty() {
        _missing(&mut error, "BOT_SERVER_BIND_IP");
    }
    if config.server.bind_port == 0 {
        _missing(&mut error, "BOT_SERVER_BIND_PORT");
    }

    // Check PG configuration
    if config.database.driver == DatabaseDriver::Postgres && config.database.pg.url.is_empty() {
        _missing(&mut error, "BOT_DATABASE_PG_URL");
    }

    // Check scraper configuration
    if config.api.driver == ApiDriver::GitHub && config.api.github.root_url.is_empty() {
        _missing(&mut error, "BOT_API_GITHUB_ROOT_URL");
    }
    if config.scraper.reviewer_login.is_empty() {
        _missing(&mut error, "BOT_SCRAPER_REVIEWER_LOGIN");
    }
    if config.scraper.default_days == 0 {
        _invalid(
            &mut error,
            "BOT_SCRAPER_DEFAULT_DAYS",
            "must be at least 1",
        );
    }

    // Check Sentry sampling
    if !(0.0..=1.0).contains(&config.sentry.traces_sample_rate) {
        _invalid(
            &mut error,
            "BOT_SENTRY_TRACES_SAMPLE_RATE",
            "must be between 0 and 1",
        );
    }

    if error.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::EnvVarsError { errors: error })
    }
}

/// Validate configuration.
///
/// A missing GitHub token is not an error: the read API still works and
/// GitHub-backed operations report it on use.
pub fn validate_configuration(config: &Config) -> Result<(), ValidationError> {
    validate_env_vars(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        let mut config = Config::from_env_no_version().unwrap();
        config.database.driver = DatabaseDriver::Memory;
        config.server.bind_ip = "127.0.0.1".into();
        config.server.bind_port = 8000;
        config.scraper.reviewer_login = "github-actions[bot]".into();
        config.scraper.default_days = 7;
        config.sentry.traces_sample_rate = 0.0;
        config
    }

    #[test]
    fn test_valid() {
        assert!(validate_configuration(&valid_config()).is_ok());
    }

    #[test]
    fn test_errors_are_listed() {
        let mut config = valid_config();
        config.database.driver = DatabaseDriver::Postgres;
        config.database.pg.url = String::new();
        config.scraper.default_days = 0;
        config.sentry.traces_sample_rate = 2.0;

        let ValidationError::EnvVarsError { errors } =
            validate_configuration(&config).unwrap_err();
        assert_eq!(
            errors,
            concat!(
                "\n  - Missing env. var.: BOT_DATABASE_PG_URL",
                "\n  - Invalid env. var.: BOT_SCRAPER_DEFAULT_DAYS (must be at least 1)",
                "\n  - Invalid env. var.: BOT_SENTRY_TRACES_SAMPLE_RATE (must be between 0 and 1)",
            )
        );
    }
}
