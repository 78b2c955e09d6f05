//! `relsync notes`: print rendered release notes.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use crate::cli::commands::{AppContext, RangeArgs};
use crate::cli::output::{output, CommandOutput};

#[derive(Args, Debug)]
pub struct NotesArgs {
    #[command(flatten)]
    pub range: RangeArgs,
}

#[derive(Debug, Serialize)]
pub struct NotesOutput {
    pub tag: String,
    pub notes: String,
}

impl CommandOutput for NotesOutput {
    fn to_human(&self) -> String {
        self.notes.clone()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: NotesArgs, config_path: Option<&Path>, json_mode: bool) -> Result<()> {
    let ctx = AppContext::bootstrap(config_path)?;
    let range = args.range.to_range(&ctx.config);

    let notes = ctx
        .release_service()
        .notes(&range)
        .await
        .with_context(|| format!("Failed to compose notes for {}", range.end_tag))?;

    output(
        &NotesOutput {
            tag: range.end_tag,
            notes,
        },
        json_mode,
    );
    Ok(())
}
