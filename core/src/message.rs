// Message types — what the cache stores and what events it consumes

use serde::{Deserialize, Serialize};

/// A cached text message.
///
/// Immutable once constructed; an edit replaces the whole record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextMessage {
    /// Message ID, unique within its chat
    pub id: i64,
    /// Text or caption content (never empty)
    pub text: String,
}

/// An inbound message event from the chat platform.
///
/// Events arrive fully formed from the client library. Either identifier
/// may be missing on a malformed update; the store treats those as no-ops.
#[derive(Debug, Clone, Default)]
pub struct MessageEvent {
    /// Chat the event belongs to (negative for group chats)
    pub chat_id: Option<i64>,
    /// Message ID within the chat
    pub message_id: Option<i64>,
    /// Primary text content
    pub text: Option<String>,
    /// Media caption, used when `text` is empty
    pub caption: Option<String>,
}

/// A message record in the fixed export/import shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedMessage {
    pub id: i64,
    pub text: String,
}

impl MessageEvent {
    /// Create an event carrying text content
    pub fn text(chat_id: i64, message_id: i64, text: &str) -> Self {
        Self {
            chat_id: Some(chat_id),
            message_id: Some(message_id),
            text: Some(text.to_string()),
            caption: None,
        }
    }

    /// Create an event carrying a media caption
    pub fn caption(chat_id: i64, message_id: i64, caption: &str) -> Self {
        Self {
            chat_id: Some(chat_id),
            message_id: Some(message_id),
            text: None,
            caption: Some(caption.to_string()),
        }
    }

    /// Create an event with no content (delete notifications look like this)
    pub fn bare(chat_id: i64, message_id: i64) -> Self {
        Self {
            chat_id: Some(chat_id),
            message_id: Some(message_id),
            text: None,
            caption: None,
        }
    }

    /// Both identifiers, or `None` if the event is malformed
    pub fn ids(&self) -> Option<(i64, i64)> {
        Some((self.chat_id?, self.message_id?))
    }

    /// Effective content: text if non-empty, else caption if non-empty
    pub fn content(&self) -> Option<&str> {
        non_empty(self.text.as_deref()).or_else(|| non_empty(self.caption.as_deref()))
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

impl TextMessage {
    /// Build a cacheable message from an event, if it carries any content
    pub fn from_event(event: &MessageEvent) -> Option<Self> {
        let id = event.message_id?;
        let text = event.content()?;
        Some(Self {
            id,
            text: text.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_prefers_text() {
        let mut event = MessageEvent::text(1, 10, "hello");
        event.caption = Some("a caption".to_string());
        assert_eq!(event.content(), Some("hello"));
    }

    #[test]
    fn test_content_falls_back_to_caption() {
        let mut event = MessageEvent::caption(1, 10, "a caption");
        assert_eq!(event.content(), Some("a caption"));

        // Empty text counts as absent
        event.text = Some(String::new());
        assert_eq!(event.content(), Some("a caption"));
    }

    #[test]
    fn test_content_absent() {
        let event = MessageEvent::bare(1, 10);
        assert_eq!(event.content(), None);

        let mut empty = MessageEvent::bare(1, 10);
        empty.text = Some(String::new());
        empty.caption = Some(String::new());
        assert_eq!(empty.content(), None);
    }

    #[test]
    fn test_ids_require_both() {
        assert_eq!(MessageEvent::text(1, 10, "hi").ids(), Some((1, 10)));

        let mut no_chat = MessageEvent::text(1, 10, "hi");
        no_chat.chat_id = None;
        assert_eq!(no_chat.ids(), None);

        let mut no_msg = MessageEvent::text(1, 10, "hi");
        no_msg.message_id = None;
        assert_eq!(no_msg.ids(), None);
    }

    #[test]
    fn test_from_event() {
        let msg = TextMessage::from_event(&MessageEvent::text(1, 10, "hello")).unwrap();
        assert_eq!(msg.id, 10);
        assert_eq!(msg.text, "hello");

        assert!(TextMessage::from_event(&MessageEvent::bare(1, 10)).is_none());
    }

    #[test]
    fn test_message_serialization() {
        let msg = TextMessage {
            id: 42,
            text: "hello".to_string(),
        };
        let bytes = bincode::serialize(&msg).unwrap();
        let restored: TextMessage = bincode::deserialize(&bytes).unwrap();
        assert_eq!(msg, restored);
    }
}
