//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::commands::issues::IssuesArgs;
use crate::cli::commands::label::LabelArgs;
use crate::cli::commands::notes::NotesArgs;
use crate::cli::commands::project::ProjectArgs;
use crate::cli::commands::release::ReleaseArgs;

#[derive(Parser, Debug)]
#[command(name = "relsync")]
#[command(about = "relsync - GitHub release notes and project sync", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Configuration file to use instead of .relsync/config.yaml
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compose notes, publish a release and sync issue metadata
    Release(ReleaseArgs),

    /// Print the release notes for a range
    Notes(NotesArgs),

    /// List the issues covered by a range
    Issues(IssuesArgs),

    /// Apply a label to issues
    Label(LabelArgs),

    /// Project board commands
    Project(ProjectArgs),
}
