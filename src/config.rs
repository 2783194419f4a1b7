//! Tool configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup (after `dotenvy` has read any
//! `.env` file) and validated before a command runs.
//!
//! ## API endpoints
//!
//! ```bash
//! export MAIN_API_URL="http://localhost:8000"
//! export TOURNAMENT_API_URL="http://localhost:8000/tournament"
//! ```
//!
//! ## Optional Variables
//!
//! - `API_TIMEOUT_SECS` - Per-request timeout in seconds (default: 30)
//! - `HEALTH_TIMEOUT_SECS` - Health probe timeout in seconds (default: 5)
//! - `HOLE_CARDS_DIR` - Hole card output folder (default: `holecards`)
//! - `TEAM_CARDS_DIR` - Team card output folder (default: `teamcards`)
//! - `SCORECARDS_DIR` - Scorecard output folder (default: `scorecards`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//!
//! ## Email (optional as a group)
//!
//! ```bash
//! export SMTP_HOST="smtp.gmail.com"
//! export SMTP_PORT="587"
//! export SMTP_USERNAME="tournament@example.com"
//! export SMTP_PASSWORD="app-password"
//! export SMTP_FROM="tournament@example.com"
//! ```
//!
//! If `SMTP_HOST` is not set, email commands report a configuration error;
//! everything else works without it.

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use url::Url;
use validator::Validate;

/// Toolset configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the main entity API.
    pub main_api_url: String,
    /// Base URL of the tournament API.
    pub tournament_api_url: String,
    /// Per-request timeout in seconds for regular API calls.
    pub api_timeout_secs: u64,
    /// Timeout in seconds for the pre-flight health probes.
    pub health_timeout_secs: u64,
    pub hole_cards_dir: PathBuf,
    pub team_cards_dir: PathBuf,
    pub scorecards_dir: PathBuf,
    pub log_level: String,
    pub log_format: String,
    /// Mail relay settings; `None` when `SMTP_HOST` is unset.
    pub smtp: Option<SmtpConfig>,
}

/// SMTP relay settings for scorecard distribution.
#[derive(Debug, Clone, Validate)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// Sender address placed in the `From` header.
    #[validate(email)]
    pub from: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the SMTP group is present but incomplete.
    pub fn from_env() -> Result<Self> {
        let main_api_url =
            env::var("MAIN_API_URL").unwrap_or_else(|_| "http://localhost:8000".to_string());
        let tournament_api_url = env::var("TOURNAMENT_API_URL")
            .unwrap_or_else(|_| "http://localhost:8000/tournament".to_string());

        let api_timeout_secs = env::var("API_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        let health_timeout_secs = env::var("HEALTH_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);

        let hole_cards_dir = env::var("HOLE_CARDS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("holecards"));

        let team_cards_dir = env::var("TEAM_CARDS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("teamcards"));

        let scorecards_dir = env::var("SCORECARDS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("scorecards"));

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let smtp = Self::load_smtp().context("Failed to load SMTP configuration")?;

        Ok(Self {
            main_api_url,
            tournament_api_url,
            api_timeout_secs,
            health_timeout_secs,
            hole_cards_dir,
            team_cards_dir,
            scorecards_dir,
            log_level,
            log_format,
            smtp,
        })
    }

    /// Loads the SMTP group, keyed on `SMTP_HOST`.
    ///
    /// Returns `None` when `SMTP_HOST` is unset. When it is set, the login,
    /// password and sender address become required.
    fn load_smtp() -> Result<Option<SmtpConfig>> {
        let Ok(host) = env::var("SMTP_HOST") else {
            return Ok(None);
        };

        let port = env::var("SMTP_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(587);

        let username =
            env::var("SMTP_USERNAME").context("SMTP_USERNAME must be set when SMTP_HOST is")?;
        let password =
            env::var("SMTP_PASSWORD").context("SMTP_PASSWORD must be set when SMTP_HOST is")?;
        let from = env::var("SMTP_FROM").context("SMTP_FROM must be set when SMTP_HOST is")?;

        Ok(Some(SmtpConfig {
            host,
            port,
            username,
            password,
            from,
        }))
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - either API URL does not parse as an absolute http(s) URL
    /// - a timeout is zero
    /// - `log_format` is not `text` or `json`
    /// - the SMTP sender address is not a valid email address
    pub fn validate(&self) -> Result<()> {
        validate_api_url("MAIN_API_URL", &self.main_api_url)?;
        validate_api_url("TOURNAMENT_API_URL", &self.tournament_api_url)?;

        if self.api_timeout_secs == 0 {
            anyhow::bail!("API_TIMEOUT_SECS must be greater than 0");
        }
        if self.health_timeout_secs == 0 {
            anyhow::bail!("HEALTH_TIMEOUT_SECS must be greater than 0");
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if let Some(ref smtp) = self.smtp {
            if smtp.port == 0 {
                anyhow::bail!("SMTP_PORT must be greater than 0");
            }
            smtp.validate()
                .map_err(|e| anyhow::anyhow!("SMTP_FROM is not a valid email address: {}", e))?;
        }

        Ok(())
    }

    /// Returns whether scorecard emailing is configured.
    pub fn is_email_enabled(&self) -> bool {
        self.smtp.is_some()
    }

    /// Logs a configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Main API: {}", self.main_api_url);
        tracing::info!("  Tournament API: {}", self.tournament_api_url);
        tracing::info!("  API timeout: {}s", self.api_timeout_secs);

        if let Some(ref smtp) = self.smtp {
            tracing::info!(
                "  SMTP: {} (from: {})",
                mask_login(&smtp.host, &smtp.username),
                smtp.from
            );
        } else {
            tracing::info!("  SMTP: disabled");
        }

        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Checks that a configured base URL is an absolute http(s) URL.
fn validate_api_url(name: &str, value: &str) -> Result<()> {
    let url = Url::parse(value)
        .map_err(|e| anyhow::anyhow!("{} is not a valid URL ('{}'): {}", name, value, e))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        anyhow::bail!(
            "{} must use http or https, got '{}://'",
            name,
            url.scheme()
        );
    }
    if url.cannot_be_a_base() {
        anyhow::bail!("{} must be a base URL, got '{}'", name, value);
    }

    Ok(())
}

/// Masks the relay login for logging.
///
/// `smtp.gmail.com` + `tournament@example.com` → `tournament@***:smtp.gmail.com`
fn mask_login(host: &str, username: &str) -> String {
    match username.split_once('@') {
        Some((local, _)) => format!("{}@***:{}", local, host),
        None => format!("***:{}", host),
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if required variables are missing or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn base_config() -> Config {
        Config {
            main_api_url: "http://localhost:8000".to_string(),
            tournament_api_url: "http://localhost:8000/tournament".to_string(),
            api_timeout_secs: 30,
            health_timeout_secs: 5,
            hole_cards_dir: PathBuf::from("holecards"),
            team_cards_dir: PathBuf::from("teamcards"),
            scorecards_dir: PathBuf::from("scorecards"),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            smtp: None,
        }
    }

    #[test]
    fn test_mask_login() {
        assert_eq!(
            mask_login("smtp.gmail.com", "tournament@example.com"),
            "tournament@***:smtp.gmail.com"
        );
        assert_eq!(mask_login("relay.local", "plainuser"), "***:relay.local");
    }

    #[test]
    fn test_config_validation() {
        let mut config = base_config();
        assert!(config.validate().is_ok());

        // Bad URL
        config.main_api_url = "not a url".to_string();
        assert!(config.validate().is_err());
        config.main_api_url = "http://localhost:8000".to_string();

        // Wrong scheme
        config.tournament_api_url = "ftp://localhost/tournament".to_string();
        assert!(config.validate().is_err());
        config.tournament_api_url = "http://localhost:8000/tournament".to_string();

        // Zero timeout
        config.api_timeout_secs = 0;
        assert!(config.validate().is_err());
        config.api_timeout_secs = 30;

        // Unknown log format
        config.log_format = "yaml".to_string();
        assert!(config.validate().is_err());
        config.log_format = "json".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_smtp_validation() {
        let mut config = base_config();
        config.smtp = Some(SmtpConfig {
            host: "smtp.gmail.com".to_string(),
            port: 587,
            username: "user@example.com".to_string(),
            password: "app-password".to_string(),
            from: "not-an-email".to_string(),
        });
        assert!(config.validate().is_err());

        if let Some(ref mut smtp) = config.smtp {
            smtp.from = "tournament@example.com".to_string();
        }
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_defaults_without_env() {
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::remove_var("MAIN_API_URL");
            env::remove_var("TOURNAMENT_API_URL");
            env::remove_var("API_TIMEOUT_SECS");
            env::remove_var("SMTP_HOST");
        }

        let config = Config::from_env().unwrap();

        assert_eq!(config.main_api_url, "http://localhost:8000");
        assert_eq!(config.tournament_api_url, "http://localhost:8000/tournament");
        assert_eq!(config.api_timeout_secs, 30);
        assert_eq!(config.hole_cards_dir, PathBuf::from("holecards"));
        assert!(config.smtp.is_none());
    }

    #[test]
    #[serial]
    fn test_smtp_group_requires_credentials() {
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("SMTP_HOST", "smtp.gmail.com");
            env::remove_var("SMTP_USERNAME");
            env::remove_var("SMTP_PASSWORD");
            env::remove_var("SMTP_FROM");
        }

        assert!(Config::from_env().is_err());

        unsafe {
            env::set_var("SMTP_USERNAME", "user@example.com");
            env::set_var("SMTP_PASSWORD", "secret");
            env::set_var("SMTP_FROM", "cards@example.com");
        }

        let config = Config::from_env().unwrap();
        let smtp = config.smtp.expect("smtp group should be present");
        assert_eq!(smtp.host, "smtp.gmail.com");
        assert_eq!(smtp.port, 587);

        // Cleanup
        unsafe {
            env::remove_var("SMTP_HOST");
            env::remove_var("SMTP_USERNAME");
            env::remove_var("SMTP_PASSWORD");
            env::remove_var("SMTP_FROM");
        }
    }

    #[test]
    #[serial]
    fn test_output_dirs_from_env() {
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("HOLE_CARDS_DIR", "/tmp/cards/holes");
            env::set_var("TEAM_CARDS_DIR", "/tmp/cards/teams");
        }

        let config = Config::from_env().unwrap();
        assert_eq!(config.hole_cards_dir, PathBuf::from("/tmp/cards/holes"));
        assert_eq!(config.team_cards_dir, PathBuf::from("/tmp/cards/teams"));

        // Cleanup
        unsafe {
            env::remove_var("HOLE_CARDS_DIR");
            env::remove_var("TEAM_CARDS_DIR");
        }
    }
}
