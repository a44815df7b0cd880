//! Per-account session listener: backfill, then live capture.

use crate::error::IngestResult;
use crate::transport::{NetworkSession, Transport};
use msgvault_core::constants::SOURCE_TELEGRAM;
use msgvault_core::{AccountConfig, NetworkEvent, NewMessage};
use msgvault_store::Repository;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Ingestion knobs shared by all listeners.
#[derive(Debug, Clone)]
pub struct ListenerOptions {
    /// Run a historical backfill pass before live capture.
    pub sync_history_on_start: bool,

    /// Per-conversation backfill limit.
    pub history_per_chat: u32,

    /// Log freshly established session credentials for operator reuse.
    pub print_session_string: bool,
}

impl Default for ListenerOptions {
    fn default() -> Self {
        Self {
            sync_history_on_start: false,
            history_per_chat: msgvault_core::constants::DEFAULT_HISTORY_PER_CHAT,
            print_session_string: false,
        }
    }
}

/// Owns one account's connection lifecycle for the process lifetime.
pub struct SessionListener<T: Transport> {
    account: AccountConfig,
    transport: Arc<T>,
    repo: Arc<Repository>,
    options: ListenerOptions,
}

impl<T: Transport> SessionListener<T> {
    pub fn new(
        account: AccountConfig,
        transport: Arc<T>,
        repo: Arc<Repository>,
        options: ListenerOptions,
    ) -> Self {
        Self {
            account,
            transport,
            repo,
            options,
        }
    }

    /// Connect, backfill once if enabled, then capture live events until
    /// the stream ends or `shutdown` fires.
    ///
    /// Returns an error only for connection-level failures; conversation
    /// and per-event failures are logged and skipped.
    pub async fn run(self, shutdown: CancellationToken) -> IngestResult<()> {
        let label = self.account.label.clone();
        let mut session = self.transport.connect(&self.account).await?;
        info!(account = %label, "connected");

        if self.options.print_session_string && !self.account.has_session() {
            if let Some(token) = session.session_token() {
                info!(account = %label, session = %token, "session credential captured; persist it to skip re-authentication");
            }
        }

        // The account row must exist before any message referencing it.
        self.repo
            .upsert_account(SOURCE_TELEGRAM, &label, &self.account.phone)
            .await?;

        if self.options.sync_history_on_start {
            self.backfill(&mut session, &shutdown).await?;
        }

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    info!(account = %label, "shutdown requested, stopping live capture");
                    break;
                }
                event = session.next_event() => match event? {
                    Some(event) => self.write_event(event).await,
                    None => {
                        info!(account = %label, "event stream ended");
                        break;
                    }
                }
            }
        }

        Ok(())
    }

    /// One bounded replay pass over every known conversation.
    ///
    /// A broken conversation is skipped; it must not abort backfill for
    /// the rest. Failure to enumerate conversations at all is treated as
    /// a connection-level error.
    async fn backfill(
        &self,
        session: &mut T::Session,
        shutdown: &CancellationToken,
    ) -> IngestResult<()> {
        let conversations = session.conversations().await?;
        if conversations.is_empty() {
            warn!(
                account = %self.account.label,
                "backfill requested but the transport reported no conversations"
            );
            return Ok(());
        }

        let limit = self.options.history_per_chat;
        info!(
            account = %self.account.label,
            conversations = conversations.len(),
            per_chat = limit,
            "starting backfill"
        );

        for conversation in conversations {
            if shutdown.is_cancelled() {
                info!(account = %self.account.label, "shutdown requested, stopping backfill");
                break;
            }
            match session.history(&conversation, limit).await {
                Ok(events) => {
                    // Enforce the bound even if the transport over-returns.
                    for event in events.into_iter().take(limit as usize) {
                        self.write_event(event).await;
                    }
                }
                Err(err) => {
                    warn!(
                        account = %self.account.label,
                        conversation = %conversation.id,
                        error = %err,
                        "skipping conversation during backfill"
                    );
                }
            }
        }

        debug!(account = %self.account.label, "backfill complete");
        Ok(())
    }

    /// Normalize and append one event. Write failures are logged and the
    /// event is dropped; there is no buffering or retry layer.
    async fn write_event(&self, event: NetworkEvent) {
        let msg = NewMessage::from_event(&self.account.label, event);
        if let Err(err) = self.repo.append_message(&msg).await {
            warn!(
                account = %self.account.label,
                error = %err,
                "dropping event after store write failure"
            );
        }
    }
}
