//! Interface boundary to the messaging-network client library.
//!
//! The transport owns authentication and the wire connection; the
//! ingestion pipeline only sees conversations and account-scoped events.
//! Concrete adapters live outside this crate (see `msgvault-telegram`);
//! tests use in-memory fakes.

use async_trait::async_trait;
use msgvault_core::{AccountConfig, Conversation, NetworkEvent};
use thiserror::Error;

/// Errors surfaced by a transport implementation.
#[derive(Error, Debug)]
pub enum TransportError {
    /// Authentication failed or the persisted session was rejected.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Connection-level failure.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Failure scoped to a single conversation.
    #[error("Conversation error: {0}")]
    Conversation(String),
}

/// Factory for authenticated network sessions, one per account.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Session type produced by this transport.
    type Session: NetworkSession;

    /// Establish one authenticated session for the account, reusing the
    /// persisted session credential when present.
    async fn connect(&self, account: &AccountConfig) -> Result<Self::Session, TransportError>;
}

/// One live, authenticated connection to the messaging network.
#[async_trait]
pub trait NetworkSession: Send {
    /// Freshly established session credential suitable for operator
    /// reuse, when the connection had to authenticate from scratch.
    fn session_token(&self) -> Option<String>;

    /// All conversations currently known to the account.
    async fn conversations(&mut self) -> Result<Vec<Conversation>, TransportError>;

    /// Up to `limit` most recent historical events for one conversation,
    /// oldest first.
    async fn history(
        &mut self,
        conversation: &Conversation,
        limit: u32,
    ) -> Result<Vec<NetworkEvent>, TransportError>;

    /// Wait for the next live event. `Ok(None)` means the event stream
    /// ended (connection closed cleanly).
    async fn next_event(&mut self) -> Result<Option<NetworkEvent>, TransportError>;
}
