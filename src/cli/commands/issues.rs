//! `relsync issues`: list the issues a range covers.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use crate::cli::commands::{AppContext, RangeArgs};
use crate::cli::output::{output, truncate, CommandOutput};
use crate::domain::models::IssueOrPr;
use crate::services::NoteGroup;

#[derive(Args, Debug)]
pub struct IssuesArgs {
    #[command(flatten)]
    pub range: RangeArgs,
}

#[derive(Debug, Serialize)]
pub struct IssueEntry {
    pub number: u64,
    pub kind: &'static str,
    pub group: &'static str,
    pub title: String,
    pub labels: Vec<String>,
}

impl From<&IssueOrPr> for IssueEntry {
    fn from(issue: &IssueOrPr) -> Self {
        Self {
            number: issue.number,
            kind: if issue.is_pull_request() { "pr" } else { "issue" },
            group: NoteGroup::classify(issue).heading(),
            title: issue.title.clone(),
            labels: issue.labels.iter().map(|l| l.name().to_string()).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct IssueListOutput {
    pub issues: Vec<IssueEntry>,
    pub total: usize,
}

impl CommandOutput for IssueListOutput {
    fn to_human(&self) -> String {
        if self.issues.is_empty() {
            return "No issues found.".to_string();
        }

        let mut lines = vec![format!("Found {} issue(s):\n", self.total)];
        lines.push(format!(
            "{:<8} {:<6} {:<13} {:<50}",
            "NUMBER", "KIND", "GROUP", "TITLE"
        ));
        lines.push("-".repeat(80));
        for issue in &self.issues {
            lines.push(format!(
                "{:<8} {:<6} {:<13} {:<50}",
                format!("#{}", issue.number),
                issue.kind,
                issue.group,
                truncate(&issue.title, 50)
            ));
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: IssuesArgs, config_path: Option<&Path>, json_mode: bool) -> Result<()> {
    let ctx = AppContext::bootstrap(config_path)?;
    let range = args.range.to_range(&ctx.config);

    let issues = ctx
        .release_service()
        .issues(&range)
        .await
        .with_context(|| format!("Failed to collect issues for {}", range.end_tag))?;

    let entries: Vec<IssueEntry> = issues.iter().map(IssueEntry::from).collect();
    output(
        &IssueListOutput {
            total: entries.len(),
            issues: entries,
        },
        json_mode,
    );
    Ok(())
}
