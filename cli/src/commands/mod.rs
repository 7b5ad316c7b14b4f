//! CLI command definitions.

pub mod chat;
pub mod oneshot;
pub mod popup;
pub mod relay;
mod surface;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Ask questions about the web page you are viewing.
#[derive(Parser)]
#[command(name = "pagechat", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file (defaults to <config dir>/pagechat/config.toml).
    #[arg(long, global = true, env = "PAGECHAT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all logging except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Detailed logging (-v for info, -vv for debug).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the in-page chat overlay for a page.
    Chat {
        /// Page URL (http or https).
        url: String,
    },

    /// Open the popup panel. Reuses the remembered document if there is one.
    Popup {
        /// Page URL to process when no document is remembered.
        url: Option<String>,

        /// Forget the remembered document and exit.
        #[arg(long)]
        forget: bool,
    },

    /// Scrape a page once and report the result.
    Scrape {
        url: String,
    },

    /// Scrape a page, then ask one question about it.
    Ask {
        url: String,
        question: String,
    },

    /// Serve relay requests as JSON lines on stdin/stdout.
    Relay,
}
