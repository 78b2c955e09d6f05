//! `relsync project`: project board commands.

use std::path::Path;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::cli::commands::AppContext;
use crate::cli::output::{output, CommandOutput};
use crate::services::{ProjectFieldUpdate, ProjectFieldUpdater};

#[derive(Args, Debug)]
pub struct ProjectArgs {
    #[command(subcommand)]
    pub command: ProjectCommands,
}

#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    /// Set a field on each issue's project item
    SetField {
        /// Project number (as shown in the project URL)
        #[arg(long)]
        project: u64,

        /// Field name, matched exactly
        #[arg(long)]
        field: String,

        /// Value; `[n]` picks the n-th option, otherwise options match by name
        #[arg(long, allow_hyphen_values = true)]
        value: String,

        /// Issue numbers
        #[arg(required = true, num_args = 1..)]
        issues: Vec<u64>,
    },
}

#[derive(Debug, Serialize)]
pub struct FieldUpdatesOutput {
    pub project: u64,
    pub field: String,
    pub updates: Vec<ProjectFieldUpdate>,
}

impl CommandOutput for FieldUpdatesOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![format!(
            "Updated '{}' on project {} for {} issue(s):",
            self.field,
            self.project,
            self.updates.len()
        )];
        for update in &self.updates {
            lines.push(format!(
                "  #{:<6} {} = {}",
                update.issue, update.key, update.value
            ));
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: ProjectArgs, config_path: Option<&Path>, json_mode: bool) -> Result<()> {
    let ctx = AppContext::bootstrap(config_path)?;
    let updater = ProjectFieldUpdater::new(ctx.client.clone(), ctx.client.clone());

    match args.command {
        ProjectCommands::SetField {
            project,
            field,
            value,
            issues,
        } => {
            let mut updates = Vec::with_capacity(issues.len());
            for issue in issues {
                let update = updater
                    .update_field(project, issue, &field, &value)
                    .await
                    .with_context(|| format!("Failed to update '{field}' on issue #{issue}"))?;
                updates.push(update);
            }

            output(
                &FieldUpdatesOutput {
                    project,
                    field,
                    updates,
                },
                json_mode,
            );
        }
    }
    Ok(())
}
