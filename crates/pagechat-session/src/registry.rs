//! Session Registry
//!
//! Process-wide source of truth for the current session. The counter and the
//! current pointer sit behind one mutex so an increment and the pointer swap
//! happen as a single step, even when scrapes race.

use parking_lot::Mutex;
use std::sync::Arc;

use crate::session::{Session, SessionId};

#[derive(Debug, Default)]
struct RegistryState {
    counter: u64,
    current: Option<Session>,
}

/// Result of opening a session: the new session plus the one it replaced.
#[derive(Debug, Clone)]
pub struct SessionTicket {
    pub session: Session,
    pub superseded: Option<Session>,
}

impl SessionTicket {
    pub fn id(&self) -> &SessionId {
        &self.session.id
    }
}

pub struct SessionRegistry {
    state: Arc<Mutex<RegistryState>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(RegistryState::default())),
        }
    }

    /// Allocate the next id, make it current and return it. Never fails.
    pub fn create_session(&self, url: &str) -> SessionId {
        self.open_session(url).session.id
    }

    /// Like [`create_session`](Self::create_session) but also reports the
    /// session that was current before, so a caller can roll back.
    pub fn open_session(&self, url: &str) -> SessionTicket {
        let mut state = self.state.lock();
        state.counter += 1;

        let session = Session::new(state.counter, url.to_string());
        let superseded = state.current.replace(session.clone());
        drop(state);

        tracing::info!(
            session_id = %session.id,
            url = %session.source_url,
            superseded = ?superseded.as_ref().map(|s| s.id.as_str()),
            "Created session"
        );

        SessionTicket {
            session,
            superseded,
        }
    }

    /// The most recently created session id, if any scrape ever happened.
    pub fn current_session(&self) -> Option<SessionId> {
        self.state.lock().current.as_ref().map(|s| s.id.clone())
    }

    pub fn current(&self) -> Option<Session> {
        self.state.lock().current.clone()
    }

    /// Restore the pointer the ticket superseded, but only while the
    /// ticket's session is still current. Returns whether anything changed.
    /// The counter is never decremented.
    pub fn rollback(&self, ticket: &SessionTicket) -> bool {
        let mut state = self.state.lock();
        let still_current = state
            .current
            .as_ref()
            .is_some_and(|current| current.id == ticket.session.id);

        if !still_current {
            tracing::debug!(
                session_id = %ticket.session.id,
                "Skipped rollback, a newer session is current"
            );
            return false;
        }

        state.current = ticket.superseded.clone();
        drop(state);

        tracing::info!(
            session_id = %ticket.session.id,
            restored = ?ticket.superseded.as_ref().map(|s| s.id.as_str()),
            "Rolled back session"
        );
        true
    }

    /// Number of sessions issued since startup.
    pub fn issued(&self) -> u64 {
        self.state.lock().counter
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for SessionRegistry {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}
