use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::constants::SOURCE_TELEGRAM;

/// One linked identity on the source network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountConfig {
    /// Stable short identifier, unique within the process (e.g. `tg1`).
    pub label: String,

    /// Application identifier issued by the network.
    pub api_id: i64,

    /// Application secret paired with `api_id`.
    pub api_hash: String,

    /// Phone number or handle the account is registered under.
    pub phone: String,

    /// Persisted session credential, when one was captured previously.
    pub session: Option<String>,
}

impl AccountConfig {
    /// Whether a persisted session credential is available for reuse.
    pub fn has_session(&self) -> bool {
        self.session
            .as_deref()
            .map(|s| !s.trim().is_empty())
            .unwrap_or(false)
    }
}

/// Account lifecycle status as persisted in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    /// Account is connected and capturing.
    Active,

    /// Account was externally disabled.
    Disabled,
}

impl AccountStatus {
    /// Database representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Active => "active",
            AccountStatus::Disabled => "disabled",
        }
    }
}

/// One conversation known to an account, as reported by the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    /// Network-native conversation identifier.
    pub id: String,

    /// Display title, when the network provides one.
    pub title: Option<String>,

    /// Public handle, when the network provides one.
    pub handle: Option<String>,
}

/// Raw account-scoped event as delivered by the messaging network,
/// before normalization into a [`NewMessage`].
///
/// Every field except the event itself is best-effort: lookup failures
/// on the origin side surface as `None`, never as errors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkEvent {
    /// Origin-native message identifier.
    pub origin_message_id: Option<i64>,

    /// Conversation/channel identifier.
    pub thread_id: Option<String>,

    /// Sender identifier.
    pub sender_id: Option<String>,

    /// Best-effort sender display name.
    pub sender_name: Option<String>,

    /// Message text; some messages carry none.
    pub text: Option<String>,

    /// Event time as reported by the origin.
    pub timestamp: Option<DateTime<Utc>>,

    /// Chat display title.
    pub chat_title: Option<String>,

    /// Chat public handle.
    pub chat_handle: Option<String>,
}

/// Canonical message record, ready to be appended to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMessage {
    /// Fixed network tag (e.g. `telegram`).
    pub source: String,

    /// Label of the owning account.
    pub account_label: String,

    /// Conversation identifier, when known.
    pub thread_id: Option<String>,

    /// Sender identifier, when known.
    pub sender_id: Option<String>,

    /// Sender display name, when known.
    pub sender_name: Option<String>,

    /// Message text, when the message carries any.
    pub text: Option<String>,

    /// Event time; ingestion time is substituted when the origin omits it.
    pub ts: DateTime<Utc>,

    /// Network-specific fields that do not warrant first-class columns.
    pub metadata: serde_json::Value,
}

impl NewMessage {
    /// Normalize a raw network event into the canonical record.
    ///
    /// Null-handling rules: missing sender/chat lookups yield null columns;
    /// a missing event timestamp is replaced with the ingestion time so the
    /// stored `ts` is always present.
    pub fn from_event(account_label: &str, event: NetworkEvent) -> Self {
        let ts = event.timestamp.unwrap_or_else(Utc::now);
        let metadata = json!({
            "chat_title": event.chat_title,
            "chat_username": event.chat_handle,
            "message_id": event.origin_message_id,
        });

        Self {
            source: SOURCE_TELEGRAM.to_string(),
            account_label: account_label.to_string(),
            thread_id: event.thread_id,
            sender_id: event.sender_id,
            sender_name: event.sender_name,
            text: event.text,
            ts,
            metadata,
        }
    }
}
