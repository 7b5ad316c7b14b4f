//! Interactive widget loop shared by the overlay and popup front ends.
//!
//! Lines typed on stdin are questions unless they start with `/`. Relay
//! replies are applied as they arrive, so the prompt never blocks on the
//! backend.

use console::style;
use futures_util::stream::{FuturesUnordered, StreamExt};
use pagechat_core::{Extension, Outstanding, PageContext, Surface, WidgetController};
use tokio::io::{AsyncBufReadExt, BufReader};

use super::surface::TerminalSurface;

#[derive(Debug, PartialEq)]
pub enum SlashCommand {
    Open,
    Close,
    Help,
    Quit,
    Unknown(String),
}

/// Returns `None` if the input is not a slash command.
pub fn parse(input: &str) -> Option<SlashCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let cmd = trimmed.split_whitespace().next().unwrap_or(trimmed).to_lowercase();
    match cmd.as_str() {
        "/open" | "/o" => Some(SlashCommand::Open),
        "/close" | "/c" => Some(SlashCommand::Close),
        "/help" | "/h" | "/?" => Some(SlashCommand::Help),
        "/quit" | "/exit" | "/q" => Some(SlashCommand::Quit),
        other => Some(SlashCommand::Unknown(other.to_string())),
    }
}

fn print_help() {
    println!();
    println!("  {}", style("Available commands:").bold());
    println!("  {}   Open the chat", style("/open").cyan());
    println!("  {}  Close the chat", style("/close").cyan());
    println!("  {}   Show this help message", style("/help").cyan());
    println!("  {}   Exit", style("/quit").cyan());
    println!();
}

pub async fn run_overlay(extension: &Extension, url: &str, json: bool) -> anyhow::Result<()> {
    let page = PageContext::new(url)?;
    let mut widget = extension.overlay(TerminalSurface::new(json), &page);
    widget.mount();
    let first = widget.open();
    run_loop(widget, first).await
}

/// Drive `widget` until stdin closes or the user quits.
pub async fn run_loop<S: Surface>(
    mut widget: WidgetController<S>,
    first: Option<Outstanding>,
) -> anyhow::Result<()> {
    let mut pending = FuturesUnordered::new();
    if let Some(outstanding) = first {
        pending.push(outstanding.settle());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut input_open = true;

    loop {
        tokio::select! {
            Some((ticket, reply)) = pending.next(), if !pending.is_empty() => {
                widget.on_reply(ticket, reply);
            }
            line = lines.next_line(), if input_open => {
                let Some(line) = line? else {
                    input_open = false;
                    continue;
                };

                let outstanding = match parse(&line) {
                    Some(SlashCommand::Open) => widget.open(),
                    Some(SlashCommand::Close) => {
                        widget.close();
                        None
                    }
                    Some(SlashCommand::Help) => {
                        print_help();
                        None
                    }
                    Some(SlashCommand::Quit) => break,
                    Some(SlashCommand::Unknown(cmd)) => {
                        eprintln!("  {} Unknown command {}", style("!").yellow().bold(), cmd);
                        None
                    }
                    None => {
                        let outstanding = widget.submit(&line);
                        if outstanding.is_none() && !line.trim().is_empty() {
                            tracing::debug!(state = %widget.state(), "Input ignored");
                        }
                        outstanding
                    }
                };

                if let Some(outstanding) = outstanding {
                    pending.push(outstanding.settle());
                }
            }
            else => break,
        }
    }

    Ok(())
}
