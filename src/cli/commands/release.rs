//! `relsync release`: compose notes, publish and sync issue metadata.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use crate::cli::commands::{AppContext, RangeArgs};
use crate::cli::output::{output, CommandOutput};
use crate::services::{FieldAssignment, ReleaseOutcome, ReleaseRequest};

#[derive(Args, Debug)]
pub struct ReleaseArgs {
    #[command(flatten)]
    pub range: RangeArgs,

    /// Release title [default: from release.title_template]
    #[arg(long)]
    pub title: Option<String>,

    /// Mark the release as a pre-release
    #[arg(long)]
    pub pre_release: bool,

    /// Compose notes and sync metadata without creating the release
    #[arg(long)]
    pub dry_run: bool,

    /// Label to add to every released issue
    #[arg(long)]
    pub label: Option<String>,

    /// Project number whose field is set on every released issue
    #[arg(long, requires_all = ["field", "value"])]
    pub project: Option<u64>,

    /// Project field name
    #[arg(long, requires = "project")]
    pub field: Option<String>,

    /// Project field value
    #[arg(long, requires = "project", allow_hyphen_values = true)]
    pub value: Option<String>,
}

impl ReleaseArgs {
    fn field_assignment(&self) -> Option<FieldAssignment> {
        Some(FieldAssignment {
            project_number: self.project?,
            field: self.field.clone()?,
            value: self.value.clone()?,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ReleaseOutput {
    #[serde(flatten)]
    pub outcome: ReleaseOutcome,
    pub dry_run: bool,
}

impl CommandOutput for ReleaseOutput {
    fn to_human(&self) -> String {
        let outcome = &self.outcome;
        let mut lines = Vec::new();
        if outcome.published {
            lines.push(format!("Created release '{}' ({})", outcome.title, outcome.tag));
        } else {
            lines.push(format!(
                "Dry run: release '{}' ({}) not created",
                outcome.title, outcome.tag
            ));
        }
        lines.push(String::new());
        lines.push(outcome.notes.clone());
        lines.push(String::new());

        if !outcome.labeled.is_empty() {
            lines.push(format!("Labeled {} issue(s)", outcome.labeled.len()));
        }
        if !outcome.field_updates.is_empty() {
            lines.push(format!(
                "Updated project field on {} issue(s)",
                outcome.field_updates.len()
            ));
        }
        for skipped in &outcome.skipped {
            lines.push(format!("Skipped #{}: {}", skipped.issue, skipped.reason));
        }
        lines.join("\n").trim_end().to_string()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: ReleaseArgs, config_path: Option<&Path>, json_mode: bool) -> Result<()> {
    let ctx = AppContext::bootstrap(config_path)?;
    let range = args.range.to_range(&ctx.config);
    let title = args
        .title
        .clone()
        .unwrap_or_else(|| ctx.config.release.title_for(&range.end_tag));

    let request = ReleaseRequest {
        title,
        prerelease: args.pre_release,
        dry_run: args.dry_run,
        label: args.label.clone(),
        field: args.field_assignment(),
        range,
    };

    let outcome = ctx
        .release_service()
        .release(&request)
        .await
        .with_context(|| format!("Release {} failed", request.range.end_tag))?;

    output(
        &ReleaseOutput {
            outcome,
            dry_run: request.dry_run,
        },
        json_mode,
    );
    Ok(())
}
