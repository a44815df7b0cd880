//! Telegram transport adapter for msgvault.
//!
//! Implements the ingestion [`Transport`] boundary over the Telegram Bot
//! API via teloxide long polling. The account's `api_id`/`api_hash` pair
//! forms the bot token (`<id>:<secret>`).
//!
//! The Bot API delivers live updates only; it exposes no conversation or
//! history enumeration, so [`NetworkSession::conversations`] is empty
//! here and backfill becomes a no-op for this adapter. An MTProto-based
//! adapter slots behind the same trait when full history replay is
//! needed.

pub mod event;

use async_trait::async_trait;
use msgvault_core::{AccountConfig, Conversation, NetworkEvent};
use msgvault_ingest::{NetworkSession, Transport, TransportError};
use teloxide::prelude::*;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Capacity of the inbound update channel per account.
const INBOUND_BUFFER: usize = 100;

/// Transport over the Telegram Bot API.
#[derive(Debug, Default)]
pub struct TelegramTransport;

impl TelegramTransport {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Transport for TelegramTransport {
    type Session = TelegramSession;

    async fn connect(&self, account: &AccountConfig) -> Result<TelegramSession, TransportError> {
        if account.has_session() {
            warn!(
                account = %account.label,
                "persisted session credential is ignored: Bot API authentication is stateless"
            );
        }

        let token = format!("{}:{}", account.api_id, account.api_hash);
        let bot = Bot::new(token);

        // Validate credentials up front so a bad token fails the listener
        // instead of silently polling forever.
        let me = bot
            .get_me()
            .await
            .map_err(|e| TransportError::Auth(format!("getMe failed: {e}")))?;
        info!(account = %account.label, bot = %me.username(), "authenticated with Telegram");

        let (tx, rx) = mpsc::channel(INBOUND_BUFFER);
        let label = account.label.clone();

        let polling = tokio::spawn(async move {
            let handler = Update::filter_message().endpoint(move |msg: Message| {
                let tx = tx.clone();
                async move {
                    if tx.send(event::event_from_message(&msg)).await.is_err() {
                        warn!("inbound channel closed, dropping update");
                    }
                    respond(())
                }
            });

            Dispatcher::builder(bot, handler)
                // Silently ignore non-message updates.
                .default_handler(|_| async {})
                .build()
                .dispatch()
                .await;
        });

        Ok(TelegramSession {
            label,
            rx,
            polling,
        })
    }
}

/// One account's long-polling session.
pub struct TelegramSession {
    label: String,
    rx: mpsc::Receiver<NetworkEvent>,
    polling: tokio::task::JoinHandle<()>,
}

#[async_trait]
impl NetworkSession for TelegramSession {
    fn session_token(&self) -> Option<String> {
        // Bot API authentication is stateless; there is no session
        // credential to hand back to the operator.
        None
    }

    async fn conversations(&mut self) -> Result<Vec<Conversation>, TransportError> {
        warn!(
            account = %self.label,
            "Bot API exposes no conversation enumeration; history backfill is unavailable with this adapter"
        );
        Ok(Vec::new())
    }

    async fn history(
        &mut self,
        _conversation: &Conversation,
        _limit: u32,
    ) -> Result<Vec<NetworkEvent>, TransportError> {
        Ok(Vec::new())
    }

    async fn next_event(&mut self) -> Result<Option<NetworkEvent>, TransportError> {
        Ok(self.rx.recv().await)
    }
}

impl Drop for TelegramSession {
    fn drop(&mut self) {
        self.polling.abort();
    }
}
