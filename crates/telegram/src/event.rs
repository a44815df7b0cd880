//! Mapping from Telegram messages to the network event shape.

use msgvault_core::NetworkEvent;
use teloxide::types::Message;

/// Convert one incoming Telegram message into a [`NetworkEvent`].
///
/// Every lookup is best-effort: messages without a sender (channel
/// posts) fall back to the chat title for the display name, and media
/// captions stand in for missing text.
pub fn event_from_message(msg: &Message) -> NetworkEvent {
    let sender_name = msg
        .from
        .as_ref()
        .map(|user| user.full_name())
        .or_else(|| msg.chat.title().map(str::to_string));

    NetworkEvent {
        origin_message_id: Some(i64::from(msg.id.0)),
        thread_id: Some(msg.chat.id.0.to_string()),
        sender_id: msg.from.as_ref().map(|user| user.id.0.to_string()),
        sender_name,
        text: msg
            .text()
            .map(str::to_string)
            .or_else(|| msg.caption().map(str::to_string)),
        timestamp: Some(msg.date),
        chat_title: msg.chat.title().map(str::to_string),
        chat_handle: msg.chat.username().map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a message from JSON matching the Bot API structure.
    fn message_from_json(json: serde_json::Value) -> Message {
        serde_json::from_value(json).expect("failed to deserialize mock message")
    }

    #[test]
    fn maps_private_text_message() {
        let msg = message_from_json(serde_json::json!({
            "message_id": 7,
            "date": 1_700_000_000i64,
            "chat": {
                "id": 12345i64,
                "type": "private",
                "first_name": "Alice",
            },
            "from": {
                "id": 12345u64,
                "is_bot": false,
                "first_name": "Alice",
                "last_name": "Smith",
            },
            "text": "hello there",
        }));

        let event = event_from_message(&msg);
        assert_eq!(event.origin_message_id, Some(7));
        assert_eq!(event.thread_id.as_deref(), Some("12345"));
        assert_eq!(event.sender_id.as_deref(), Some("12345"));
        assert_eq!(event.sender_name.as_deref(), Some("Alice Smith"));
        assert_eq!(event.text.as_deref(), Some("hello there"));
        assert_eq!(event.timestamp.unwrap().timestamp(), 1_700_000_000);
        assert!(event.chat_title.is_none());
    }

    #[test]
    fn maps_group_message_with_chat_metadata() {
        let msg = message_from_json(serde_json::json!({
            "message_id": 8,
            "date": 1_700_000_100i64,
            "chat": {
                "id": -100123i64,
                "type": "supergroup",
                "title": "Team Room",
                "username": "teamroom",
            },
            "from": {
                "id": 777u64,
                "is_bot": false,
                "first_name": "Bob",
            },
            "text": "ship it",
        }));

        let event = event_from_message(&msg);
        assert_eq!(event.thread_id.as_deref(), Some("-100123"));
        assert_eq!(event.chat_title.as_deref(), Some("Team Room"));
        assert_eq!(event.chat_handle.as_deref(), Some("teamroom"));
        assert_eq!(event.sender_name.as_deref(), Some("Bob"));
    }

    #[test]
    fn sender_falls_back_to_chat_title() {
        let msg = message_from_json(serde_json::json!({
            "message_id": 9,
            "date": 1_700_000_200i64,
            "chat": {
                "id": -100456i64,
                "type": "channel",
                "title": "Announcements",
            },
            "text": "release 1.2 is out",
        }));

        let event = event_from_message(&msg);
        assert!(event.sender_id.is_none());
        assert_eq!(event.sender_name.as_deref(), Some("Announcements"));
    }

    #[test]
    fn caption_stands_in_for_text() {
        let msg = message_from_json(serde_json::json!({
            "message_id": 10,
            "date": 1_700_000_300i64,
            "chat": {
                "id": 12345i64,
                "type": "private",
                "first_name": "Alice",
            },
            "from": {
                "id": 12345u64,
                "is_bot": false,
                "first_name": "Alice",
            },
            "photo": [{
                "file_id": "abc",
                "file_unique_id": "def",
                "width": 100,
                "height": 100,
            }],
            "caption": "holiday photo",
        }));

        let event = event_from_message(&msg);
        assert_eq!(event.text.as_deref(), Some("holiday photo"));
    }
}
