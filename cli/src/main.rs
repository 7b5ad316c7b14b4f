//! pagechat CLI entry point.
//!
//! Binary name: `pagechat`
//!
//! Loads configuration, starts the extension (database, backend client and
//! relay), then dispatches to the selected front end.

mod commands;

use clap::Parser;
use pagechat_core::{Config, Extension};

use commands::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let directive = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    pagechat_core::init_logging(directive);

    let config = Config::load(cli.config.as_deref())?;
    let extension = Extension::new(config)?;

    match cli.command {
        Commands::Chat { url } => {
            commands::chat::run_overlay(&extension, &url, cli.json).await?;
        }
        Commands::Popup { url, forget } => {
            if forget {
                commands::popup::forget(&extension, cli.json)?;
            } else {
                commands::popup::run(&extension, url.as_deref(), cli.json).await?;
            }
        }
        Commands::Scrape { url } => {
            commands::oneshot::scrape(&extension, &url, cli.json).await?;
        }
        Commands::Ask { url, question } => {
            commands::oneshot::ask(&extension, &url, &question, cli.json).await?;
        }
        Commands::Relay => {
            commands::relay::serve(&extension).await?;
        }
    }

    Ok(())
}
