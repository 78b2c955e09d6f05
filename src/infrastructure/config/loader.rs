use std::env;
use std::path::Path;

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use reqwest::Url;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("GitHub owner is not set. Use github.owner, RELSYNC_GITHUB__OWNER or GITHUB_REPOSITORY")]
    MissingOwner,

    #[error("GitHub repository is not set. Use github.repo, RELSYNC_GITHUB__REPO or GITHUB_REPOSITORY")]
    MissingRepo,

    #[error("GitHub token is not set. Use RELSYNC_GITHUB__TOKEN or GITHUB_TOKEN")]
    MissingToken,

    #[error("Invalid api_base_url: {0}. Must be an http(s) URL")]
    InvalidApiBaseUrl(String),

    #[error("Invalid timeout_secs: {0}. Must be at least 1")]
    InvalidTimeout(u64),

    #[error("Invalid rate limit capacity: {0}. Must be at least 1")]
    InvalidRateLimitCapacity(u32),

    #[error("Invalid rate limit window: {0}s. Must be at least 1")]
    InvalidRateLimitWindow(u64),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .relsync/config.yaml (project config)
    /// 3. .relsync/local.yaml (local overrides, optional)
    /// 4. Environment variables (RELSYNC_* prefix, `__` nests)
    ///
    /// GitHub Actions variables then fill whatever is still unset.
    pub fn load() -> Result<Config> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(".relsync/config.yaml"))
            .merge(Yaml::file(".relsync/local.yaml"));
        Self::finish(figment, "Failed to extract configuration from figment")
    }

    /// Load configuration from a specific file instead of `.relsync/`
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path));
        Self::finish(
            figment,
            &format!("Failed to load config from {}", path.display()),
        )
    }

    fn finish(figment: Figment, context: &str) -> Result<Config> {
        let mut config: Config = figment
            .merge(Env::prefixed("RELSYNC_").split("__"))
            .extract()
            .with_context(|| context.to_string())?;

        Self::apply_actions_env(&mut config);
        Self::validate(&config)?;
        Ok(config)
    }

    /// Fill unset owner, repo and token from the GitHub Actions runner
    /// (`GITHUB_REPOSITORY=owner/repo`, `GITHUB_TOKEN`).
    pub fn apply_actions_env(config: &mut Config) {
        if let Ok(repository) = env::var("GITHUB_REPOSITORY") {
            if let Some((owner, repo)) = repository.split_once('/') {
                if config.github.owner.is_empty() {
                    config.github.owner = owner.to_string();
                }
                if config.github.repo.is_empty() {
                    config.github.repo = repo.to_string();
                }
            }
        }

        if config.github.token.as_deref().is_none_or(str::is_empty) {
            if let Ok(token) = env::var("GITHUB_TOKEN") {
                config.github.token = Some(token);
            }
        }
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.github.owner.trim().is_empty() {
            return Err(ConfigError::MissingOwner);
        }
        if config.github.repo.trim().is_empty() {
            return Err(ConfigError::MissingRepo);
        }
        if config.github.token.as_deref().is_none_or(|t| t.trim().is_empty()) {
            return Err(ConfigError::MissingToken);
        }

        let base_ok = Url::parse(&config.github.api_base_url)
            .is_ok_and(|url| matches!(url.scheme(), "http" | "https") && url.has_host());
        if !base_ok {
            return Err(ConfigError::InvalidApiBaseUrl(
                config.github.api_base_url.clone(),
            ));
        }
        if config.github.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(config.github.timeout_secs));
        }

        if config.rate_limit.capacity == 0 {
            return Err(ConfigError::InvalidRateLimitCapacity(config.rate_limit.capacity));
        }
        if config.rate_limit.window_secs == 0 {
            return Err(ConfigError::InvalidRateLimitWindow(config.rate_limit.window_secs));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        Ok(())
    }
}
