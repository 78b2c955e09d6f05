//! Subcommand implementations.
//!
//! Every command loads configuration, installs logging and builds one
//! [`GitHubClient`] shared by both ports.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use crate::adapters::github::GitHubClient;
use crate::domain::models::Config;
use crate::infrastructure::config::ConfigLoader;
use crate::infrastructure::logging::LoggerImpl;
use crate::services::{ReleaseRange, ReleaseService};

pub mod issues;
pub mod label;
pub mod notes;
pub mod project;
pub mod release;

/// Release boundaries shared by `release`, `notes` and `issues`.
#[derive(Args, Debug, Clone)]
pub struct RangeArgs {
    /// Tag of the release being built (end of the range)
    #[arg(short, long)]
    pub tag: String,

    /// Tag of the previous release; when omitted the range starts at the
    /// oldest commit of the branch's most recent page
    #[arg(short, long, default_value = "")]
    pub previous_tag: String,

    /// Branch to list when no previous tag is given [default: from config]
    #[arg(short, long)]
    pub branch: Option<String>,
}

impl RangeArgs {
    pub fn to_range(&self, config: &Config) -> ReleaseRange {
        ReleaseRange::new(
            self.previous_tag.clone(),
            self.tag.clone(),
            self.branch.clone().unwrap_or_else(|| config.release.branch.clone()),
        )
    }
}

/// Loaded configuration plus the shared client.
pub struct AppContext {
    pub config: Config,
    pub client: Arc<GitHubClient>,
}

impl AppContext {
    /// Load config (explicit file or `.relsync/`), start logging and build the client.
    pub fn bootstrap(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load()?,
        };
        LoggerImpl::init(&config.logging)?;

        let client = GitHubClient::from_config(&config).context("Failed to build GitHub client")?;
        debug!(
            owner = %config.github.owner,
            repo = %config.github.repo,
            api = %config.github.api_base_url,
            "GitHub client ready"
        );

        Ok(Self {
            config,
            client: Arc::new(client),
        })
    }

    pub fn release_service(&self) -> ReleaseService {
        ReleaseService::new(self.client.clone(), self.client.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_uses_config_branch_by_default() {
        let args = RangeArgs {
            tag: "v1.1.0".to_string(),
            previous_tag: String::new(),
            branch: None,
        };
        let mut config = Config::default();
        config.release.branch = "trunk".to_string();

        assert_eq!(args.to_range(&config), ReleaseRange::new("", "v1.1.0", "trunk"));
    }

    #[test]
    fn test_range_branch_flag_wins() {
        let args = RangeArgs {
            tag: "v1.1.0".to_string(),
            previous_tag: "v1.0.0".to_string(),
            branch: Some("release".to_string()),
        };
        assert_eq!(
            args.to_range(&Config::default()),
            ReleaseRange::new("v1.0.0", "v1.1.0", "release")
        );
    }
}
