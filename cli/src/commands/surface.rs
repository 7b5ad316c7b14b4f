//! Terminal rendering of a widget.
//!
//! Styled text by default; with `--json` every visible event is one JSON
//! object per line on stdout.

use console::{style, Term};
use pagechat_core::{ChatMessage, Notice, NoticeLevel, Page, Role, Surface};
use serde_json::json;

pub struct TerminalSurface {
    term: Term,
    json: bool,
    typing_shown: bool,
}

impl TerminalSurface {
    pub fn new(json: bool) -> Self {
        Self {
            term: Term::stdout(),
            json,
            typing_shown: false,
        }
    }

    fn line(&self, text: &str) {
        // Writing to stdout only fails when the reader went away
        let _ = self.term.write_line(text);
    }

    fn event(&self, value: serde_json::Value) {
        self.line(&value.to_string());
    }
}

impl Surface for TerminalSurface {
    fn show_trigger(&mut self) {
        if self.json {
            return;
        }
        self.line(&format!(
            "  {} {}",
            style("[pagechat]").cyan().bold(),
            style("type /open to chat about this page").dim()
        ));
    }

    fn show_shell(&mut self, page: &Page) {
        if self.json {
            self.event(json!({"event": "open", "url": page.url, "title": page.title}));
            return;
        }
        self.line("");
        self.line(&format!(
            "  {} {}",
            style(page.display_title()).bold(),
            style(&page.url).dim()
        ));
        self.line("");
    }

    fn show_notice(&mut self, notice: &Notice) {
        if self.json {
            self.event(json!({"event": "notice", "level": notice.level, "text": notice.text}));
            return;
        }
        let text = match notice.level {
            NoticeLevel::Info => style(notice.text.as_str()).dim(),
            NoticeLevel::Error => style(notice.text.as_str()).red(),
        };
        self.line(&format!("  {}", text));
    }

    fn append_message(&mut self, message: &ChatMessage) {
        if self.json {
            self.event(json!({"event": "message", "message": message}));
            return;
        }
        let label = match message.role {
            Role::User => style("You >").green().bold(),
            Role::Assistant if message.is_error => style("Bot >").red().bold(),
            Role::Assistant => style("Bot >").cyan().bold(),
        };
        self.line(&format!("  {} {}", label, message.content));
    }

    fn show_typing(&mut self) {
        if self.json || !self.term.is_term() {
            return;
        }
        self.line(&format!("  {}", style("Bot is typing...").dim().italic()));
        self.typing_shown = true;
    }

    fn hide_typing(&mut self) {
        if self.typing_shown {
            let _ = self.term.clear_last_lines(1);
            self.typing_shown = false;
        }
    }

    fn teardown(&mut self) {
        self.typing_shown = false;
        if self.json {
            self.event(json!({"event": "close"}));
        } else {
            self.line(&format!("  {}", style("Chat closed.").dim()));
        }
    }
}
