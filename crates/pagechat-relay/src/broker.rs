//! Relay broker task
//!
//! One task owns the [`Relay`]. Callers hold a cloneable [`RelayHandle`] and
//! get a [`PendingReply`] back for each request. Each reply travels on its
//! own oneshot channel, so a response can only ever reach the caller that
//! sent the request.

use pagechat_session::SessionRegistry;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::{mpsc, oneshot};

use crate::error::RelayError;
use crate::message::{RelayPayload, RelayRequest, RelayResponse};
use crate::relay::{self, Relay};

struct Envelope {
    request: RelayRequest,
    reply: oneshot::Sender<RelayResponse>,
}

#[derive(Clone)]
pub struct RelayHandle {
    tx: mpsc::UnboundedSender<Envelope>,
    /// Read-only view; only the relay task mutates it
    registry: SessionRegistry,
}

/// A response that has not arrived yet.
///
/// Dropping it is how a torn-down widget discards a late reply; the relay
/// finishes the backend call regardless.
pub struct PendingReply {
    rx: oneshot::Receiver<RelayResponse>,
}

impl Future for PendingReply {
    type Output = RelayResponse;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|result| result.unwrap_or_else(|_| RelayError::Unavailable.into()))
    }
}

impl PendingReply {
    /// A reply that is already known, without a round trip through the broker.
    pub fn ready(response: RelayResponse) -> Self {
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(response);
        Self { rx }
    }
}

impl Relay {
    /// Move the relay onto its own task and return a handle to it.
    /// Must be called from within a tokio runtime.
    pub fn spawn(self) -> RelayHandle {
        let (tx, mut rx) = mpsc::unbounded_channel::<Envelope>();
        let registry = self.registry().clone();

        tokio::spawn(async move {
            tracing::info!("Relay started");

            while let Some(Envelope { request, reply }) = rx.recv().await {
                let name = request.name();

                // Registry work happens here, in arrival order
                let call = match self.prepare(request) {
                    Ok(call) => call,
                    Err(err) => {
                        let result: crate::Result<RelayPayload> = Err(err);
                        relay::log_outcome(name, &result);
                        let _ = reply.send(result.into());
                        continue;
                    }
                };

                let (backend, registry, policy) = self.parts();
                tokio::spawn(async move {
                    let result = relay::execute(backend, registry, policy, call).await;
                    relay::log_outcome(name, &result);
                    if reply.send(result.into()).is_err() {
                        tracing::debug!(request = %name, "Caller went away before the reply");
                    }
                });
            }

            tracing::info!("Relay stopped");
        });

        RelayHandle { tx, registry }
    }
}

impl RelayHandle {
    /// Send a request without waiting. The caller decides when (or whether)
    /// to await the reply.
    pub fn dispatch(&self, request: RelayRequest) -> PendingReply {
        let (reply, rx) = oneshot::channel();
        if let Err(mpsc::error::SendError(envelope)) = self.tx.send(Envelope { request, reply }) {
            tracing::error!(request = %envelope.request.name(), "Relay is not running");
            let _ = envelope.reply.send(RelayError::Unavailable.into());
        }
        PendingReply { rx }
    }

    /// Send a request and wait for its reply.
    pub async fn request(&self, request: RelayRequest) -> RelayResponse {
        self.dispatch(request).await
    }

    /// Whether a scrape has made some session current in this relay.
    pub fn has_session(&self) -> bool {
        self.registry.current_session().is_some()
    }

    pub fn is_running(&self) -> bool {
        !self.tx.is_closed()
    }
}
