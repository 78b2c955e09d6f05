//! relsync CLI entry point.

use clap::Parser;

use relsync::cli::commands::{issues, label, notes, project, release};
use relsync::cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = cli.config.as_deref();

    let result = match cli.command {
        Commands::Release(args) => release::execute(args, config, cli.json).await,
        Commands::Notes(args) => notes::execute(args, config, cli.json).await,
        Commands::Issues(args) => issues::execute(args, config, cli.json).await,
        Commands::Label(args) => label::execute(args, config, cli.json).await,
        Commands::Project(args) => project::execute(args, config, cli.json).await,
    };

    if let Err(err) = result {
        relsync::cli::handle_error(err, cli.json);
    }
}
