//! `relsync label`: apply a label to issues.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use crate::cli::commands::AppContext;
use crate::cli::output::{output, CommandOutput};
use crate::services::IssueLabeler;

#[derive(Args, Debug)]
pub struct LabelArgs {
    /// Label to add
    #[arg(short, long)]
    pub label: String,

    /// Issue numbers
    #[arg(required = true, num_args = 1..)]
    pub issues: Vec<u64>,
}

#[derive(Debug, Serialize)]
pub struct LabelOutput {
    pub label: String,
    pub issues: Vec<u64>,
}

impl CommandOutput for LabelOutput {
    fn to_human(&self) -> String {
        let numbers: Vec<String> = self.issues.iter().map(|n| format!("#{n}")).collect();
        format!("Applied '{}' to {}", self.label, numbers.join(", "))
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: LabelArgs, config_path: Option<&Path>, json_mode: bool) -> Result<()> {
    let ctx = AppContext::bootstrap(config_path)?;

    IssueLabeler::new(ctx.client.clone())
        .apply(&args.label, &args.issues)
        .await
        .with_context(|| format!("Failed to apply label '{}'", args.label))?;

    output(
        &LabelOutput {
            label: args.label,
            issues: args.issues,
        },
        json_mode,
    );
    Ok(())
}
