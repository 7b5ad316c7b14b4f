//! Widget session controller
//!
//! The controller never blocks. `open` and `submit` hand back an
//! [`Outstanding`] request; the host awaits it whenever it likes and feeds
//! the result to [`WidgetController::on_reply`]. Replies that arrive after
//! the widget was closed are dropped silently.

use pagechat_relay::{PendingReply, RelayHandle, RelayPayload, RelayRequest, RelayResponse};
use serde::{Deserialize, Serialize};

use crate::document::{DocumentStore, StoredDocument};
use crate::error::WidgetError;
use crate::message::{ChatMessage, Notice, Page};
use crate::state::WidgetState;
use crate::surface::Surface;
use crate::Result;

/// What the overlay does when reopened on a page it already loaded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReopenPolicy {
    /// Every open scrapes again and so creates a new session.
    #[default]
    Rescrape,
    /// Skip the scrape if this widget already loaded the same page.
    Reuse,
}

pub enum Variant {
    Overlay { reopen: ReopenPolicy },
    Popup { store: DocumentStore },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Purpose {
    Load,
    Answer,
}

/// Identifies which widget incarnation a request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    epoch: u64,
    purpose: Purpose,
}

/// A relay request the controller is waiting on.
pub struct Outstanding {
    pub ticket: Ticket,
    reply: PendingReply,
}

impl Outstanding {
    pub async fn settle(self) -> (Ticket, RelayResponse) {
        let response = self.reply.await;
        (self.ticket, response)
    }
}

pub struct WidgetController<S: Surface> {
    relay: RelayHandle,
    surface: S,
    page: Page,
    variant: Variant,
    state: WidgetState,
    log: Vec<ChatMessage>,
    notice: Option<Notice>,
    /// Bumped on close so replies for a torn-down widget can be told apart
    epoch: u64,
    /// URL of the last successful scrape made by this widget
    loaded_url: Option<String>,
    /// The pending load re-ingests a remembered popup document
    restoring: bool,
}

impl<S: Surface> WidgetController<S> {
    pub fn new(relay: RelayHandle, surface: S, page: Page, variant: Variant) -> Self {
        Self {
            relay,
            surface,
            page,
            variant,
            state: WidgetState::Hidden,
            log: Vec::new(),
            notice: None,
            epoch: 0,
            loaded_url: None,
            restoring: false,
        }
    }

    /// Show the entry affordance.
    pub fn mount(&mut self) {
        self.surface.show_trigger();
    }

    pub fn state(&self) -> WidgetState {
        self.state
    }

    pub fn log(&self) -> &[ChatMessage] {
        &self.log
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Open the widget. Returns the scrape request when one is needed.
    pub fn open(&mut self) -> Option<Outstanding> {
        if self.state.is_visible() {
            tracing::debug!(state = %self.state, "Widget already open");
            return None;
        }

        self.restoring = false;
        if let Some(document) = self.restorable_document() {
            self.page = Page::new(document.url).with_title(document.title);
            self.surface.show_shell(&self.page);

            if self.relay.has_session() {
                self.enter_ready(Notice::restored());
                return None;
            }

            // Sessions do not outlive the relay, so a fresh relay has to
            // ingest the remembered document again
            tracing::info!(url = %self.page.url, "Re-scraping remembered document");
            self.restoring = true;
            return Some(self.start_load());
        }

        self.surface.show_shell(&self.page);

        if self.can_reuse_load() {
            self.enter_ready(Notice::loaded());
            return None;
        }

        Some(self.start_load())
    }

    /// Submit a question. Blank input, or input while not `Ready`, is ignored.
    pub fn submit(&mut self, input: &str) -> Option<Outstanding> {
        let question = input.trim();
        if question.is_empty() {
            return None;
        }

        if self.state != WidgetState::Ready {
            tracing::debug!(state = %self.state, "Ignored submit");
            return None;
        }

        self.push(ChatMessage::user(question));
        self.surface.clear_input();
        self.surface.show_typing();
        self.enter(WidgetState::AwaitingAnswer);

        Some(self.send(
            Purpose::Answer,
            RelayRequest::ask(question, self.page.url.clone()),
        ))
    }

    /// Tear the widget down and restore the trigger.
    pub fn close(&mut self) {
        if !self.state.is_visible() {
            return;
        }

        self.enter(WidgetState::Hidden);
        self.epoch += 1;
        self.log.clear();
        self.notice = None;
        self.surface.teardown();
        self.surface.show_trigger();
    }

    /// Apply a relay reply. Stale or unexpected replies are dropped.
    pub fn on_reply(&mut self, ticket: Ticket, response: RelayResponse) {
        if ticket.epoch != self.epoch {
            tracing::debug!(
                ticket_epoch = ticket.epoch,
                epoch = self.epoch,
                "Dropped reply for a closed widget"
            );
            return;
        }

        match (ticket.purpose, self.state) {
            (Purpose::Load, WidgetState::Loading) => self.finish_load(response),
            (Purpose::Answer, WidgetState::AwaitingAnswer) => self.finish_answer(response),
            (purpose, state) => {
                tracing::debug!(?purpose, %state, "Dropped unexpected reply");
            }
        }
    }

    fn start_load(&mut self) -> Outstanding {
        self.enter(WidgetState::Loading);
        self.show_notice(Notice::loading());
        self.send(Purpose::Load, RelayRequest::scrape(self.page.url.clone()))
    }

    fn finish_load(&mut self, response: RelayResponse) {
        let notice = match response {
            RelayResponse::Ok { .. } => {
                self.loaded_url = Some(self.page.url.clone());
                self.remember_document();
                if self.restoring {
                    Notice::restored()
                } else {
                    Notice::loaded()
                }
            }
            RelayResponse::Err { message } => {
                tracing::warn!(url = %self.page.url, error = %message, "Page failed to load");
                self.loaded_url = None;
                Notice::load_failed(&message)
            }
        };

        self.enter_ready(notice);
    }

    fn finish_answer(&mut self, response: RelayResponse) {
        self.surface.hide_typing();

        let message = match response {
            RelayResponse::Ok {
                payload: RelayPayload::Answer(answer),
            } => ChatMessage::assistant(answer),
            RelayResponse::Ok {
                payload: RelayPayload::Scraped,
            } => {
                tracing::warn!(url = %self.page.url, "Question answered with a scrape payload");
                ChatMessage::assistant_error("No response from server")
            }
            RelayResponse::Err { message } => ChatMessage::assistant_error(&message),
        };

        self.push(message);
        self.enter(WidgetState::Ready);
    }

    fn enter_ready(&mut self, notice: Notice) {
        self.enter(WidgetState::Ready);
        self.show_notice(notice);
        self.surface.enable_input();
    }

    fn show_notice(&mut self, notice: Notice) {
        self.surface.show_notice(&notice);
        self.notice = Some(notice);
    }

    fn push(&mut self, message: ChatMessage) {
        self.surface.append_message(&message);
        self.log.push(message);
    }

    fn send(&self, purpose: Purpose, request: RelayRequest) -> Outstanding {
        Outstanding {
            ticket: Ticket {
                epoch: self.epoch,
                purpose,
            },
            reply: self.relay.dispatch(request),
        }
    }

    fn enter(&mut self, target: WidgetState) {
        if let Err(e) = self.transition_to(target) {
            tracing::error!(error = %e, "Widget transition rejected");
        }
    }

    fn transition_to(&mut self, target: WidgetState) -> Result<()> {
        if !self.state.can_transition_to(target) {
            return Err(WidgetError::InvalidTransition {
                from: self.state.to_string(),
                to: target.to_string(),
            });
        }

        tracing::debug!(
            url = %self.page.url,
            from = %self.state,
            to = %target,
            "Widget state transition"
        );

        self.state = target;
        Ok(())
    }

    fn can_reuse_load(&self) -> bool {
        matches!(
            self.variant,
            Variant::Overlay {
                reopen: ReopenPolicy::Reuse
            }
        ) && self.loaded_url.as_deref() == Some(self.page.url.as_str())
    }

    fn restorable_document(&self) -> Option<StoredDocument> {
        let Variant::Popup { store } = &self.variant else {
            return None;
        };

        match store.load() {
            Ok(document) => document,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read popup document, scraping instead");
                None
            }
        }
    }

    fn remember_document(&self) {
        let Variant::Popup { store } = &self.variant else {
            return;
        };

        let document = StoredDocument {
            url: self.page.url.clone(),
            title: self.page.display_title().to_string(),
        };
        if let Err(e) = store.save(&document) {
            tracing::error!(error = %e, "Failed to persist popup document");
        }
    }
}
