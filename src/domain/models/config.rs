use serde::{Deserialize, Serialize};

/// Main configuration structure for relsync
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// GitHub connection settings
    #[serde(default)]
    pub github: GitHubConfig,

    /// Client-side rate limiting
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Release defaults
    #[serde(default)]
    pub release: ReleaseConfig,
}

/// GitHub connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GitHubConfig {
    /// Repository owner (user or organisation)
    #[serde(default)]
    pub owner: String,

    /// Repository name
    #[serde(default)]
    pub repo: String,

    /// Personal access token or workflow `GITHUB_TOKEN`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Base URL for the REST API; GraphQL lives at `<base>/graphql`
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_base_url() -> String {
    "https://api.github.com".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            owner: String::new(),
            repo: String::new(),
            token: None,
            api_base_url: default_api_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Rate limiting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RateLimitConfig {
    /// Requests allowed per window
    #[serde(default = "default_capacity")]
    pub capacity: u32,

    /// Window length in seconds
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
}

// GitHub allows 5 000 authenticated requests per hour.
const fn default_capacity() -> u32 {
    5_000
}

const fn default_window_secs() -> u64 {
    3_600
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            window_secs: default_window_secs(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// Release defaults, overridable per invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ReleaseConfig {
    /// Branch used when no previous tag is given
    #[serde(default = "default_branch")]
    pub branch: String,

    /// Release title template; `{tag}` is replaced by the release tag
    #[serde(default = "default_title_template")]
    pub title_template: String,
}

fn default_branch() -> String {
    "main".to_string()
}

fn default_title_template() -> String {
    "{tag}".to_string()
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            branch: default_branch(),
            title_template: default_title_template(),
        }
    }
}

impl ReleaseConfig {
    /// Render the release title for `tag`.
    pub fn title_for(&self, tag: &str) -> String {
        self.title_template.replace("{tag}", tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.github.api_base_url, "https://api.github.com");
        assert_eq!(config.rate_limit.capacity, 5_000);
        assert_eq!(config.release.branch, "main");
        assert!(config.github.token.is_none());
    }

    #[test]
    fn test_title_template() {
        let release = ReleaseConfig {
            title_template: "Release {tag}".to_string(),
            ..Default::default()
        };
        assert_eq!(release.title_for("v1.2.0"), "Release v1.2.0");
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = "github:\n  owner: octo-org\n  repo: widgets\nrelease:\n  branch: release\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.github.owner, "octo-org");
        assert_eq!(config.github.timeout_secs, 30);
        assert_eq!(config.release.branch, "release");
        assert_eq!(config.release.title_template, "{tag}");
        assert_eq!(config.logging.format, "pretty");
    }
}
