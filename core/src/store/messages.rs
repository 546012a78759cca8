// Bounded per-chat text message cache
//
// Mirrors add/edit/delete events from the chat platform and keeps each
// chat's log under its retention limit. Malformed events (missing ids)
// are silent no-ops; only snapshot I/O can fail.

use crate::config::StoreConfig;
use crate::message::{ExportedMessage, MessageEvent, TextMessage};
use crate::store::snapshot::{self, ChatMap, SnapshotError};
use std::collections::HashMap;
use tracing::{info, warn};

/// Per-chat cache of recent text messages with whole-store snapshotting.
///
/// Single logical execution context only; callers serialize access.
pub struct MessageStore {
    chats: ChatMap,
    config: StoreConfig,
}

impl MessageStore {
    /// Open a store, loading the snapshot blob if one exists.
    ///
    /// A blob that exists but cannot be read or decoded is a fatal
    /// startup error; there is no partial recovery.
    pub fn open(config: StoreConfig) -> Result<Self, SnapshotError> {
        let path = snapshot::snapshot_path(&config.data_dir);
        let chats = match snapshot::read(&path)? {
            Some(chats) => {
                info!("Loaded {} chats from snapshot", chats.len());
                chats
            }
            None => HashMap::new(),
        };
        Ok(Self { chats, config })
    }

    /// Record a message event.
    ///
    /// The chat entry is created even when the event carries no text;
    /// the message itself is stored only if text or caption is non-empty.
    pub fn add_message(&mut self, event: &MessageEvent) {
        let Some((chat_id, _)) = event.ids() else {
            return;
        };
        let log = self.chats.entry(chat_id).or_default();
        if let Some(msg) = TextMessage::from_event(event) {
            log.insert(msg.id, msg);
        }
    }

    /// Mirror an upstream delete. Unknown pairs and malformed events are
    /// no-ops.
    pub fn delete_message(&mut self, event: &MessageEvent) {
        let Some((chat_id, message_id)) = event.ids() else {
            return;
        };
        if let Some(log) = self.chats.get_mut(&chat_id) {
            if log.remove(&message_id).is_some() {
                info!("Deleting message {} from chat {}", message_id, chat_id);
            }
        }
    }

    /// Mirror an upstream edit. An edit that keeps text is an upsert; a
    /// message edited down to no text is treated as deleted.
    pub fn update_message(&mut self, event: &MessageEvent) {
        if event.content().is_some() {
            self.add_message(event);
        } else {
            self.delete_message(event);
        }
    }

    /// Look up a cached message
    pub fn get_message(&self, chat_id: i64, message_id: i64) -> Option<&TextMessage> {
        self.chats.get(&chat_id)?.get(&message_id)
    }

    /// Insert a message directly, bypassing event extraction.
    /// Callers pass ids and non-empty text they already validated.
    pub fn insert_raw(&mut self, chat_id: i64, message_id: i64, text: String) {
        self.chats.entry(chat_id).or_default().insert(
            message_id,
            TextMessage {
                id: message_id,
                text,
            },
        );
    }

    /// Trim every chat down to its retention limit, keeping the messages
    /// with the numerically largest ids. Saves the snapshot when at least
    /// one chat was trimmed. Returns the number of chats trimmed.
    pub fn clean_all(&mut self) -> Result<usize, SnapshotError> {
        let mut cleaned = 0;
        for (&chat_id, log) in self.chats.iter_mut() {
            let limit = self.config.limit_for(chat_id);
            if log.len() <= limit {
                continue;
            }
            if limit == 0 {
                log.clear();
            } else {
                let mut ids: Vec<i64> = log.keys().copied().collect();
                ids.sort_unstable();
                let cutoff = ids[ids.len() - limit];
                log.retain(|&id, _| id >= cutoff);
            }
            warn!("Cleaning messages for chat {}", chat_id);
            cleaned += 1;
        }
        if cleaned > 0 {
            self.save()?;
        }
        Ok(cleaned)
    }

    /// Drop every message in a chat. The chat entry stays; the snapshot
    /// is saved only when something was actually cleared.
    pub fn clear_chat(&mut self, chat_id: i64) -> Result<(), SnapshotError> {
        let Some(log) = self.chats.get_mut(&chat_id) else {
            return Ok(());
        };
        if log.is_empty() {
            return Ok(());
        }
        log.clear();
        warn!("Clearing chat {}", chat_id);
        self.save()
    }

    /// All messages of a chat in the fixed export shape, in the log's
    /// native iteration order
    pub fn export_chat(&self, chat_id: i64) -> Vec<ExportedMessage> {
        self.chats
            .get(&chat_id)
            .map(|log| {
                log.values()
                    .map(|msg| ExportedMessage {
                        id: msg.id,
                        text: msg.text.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Replace a chat's entire log with the given records
    pub fn import_chat(&mut self, chat_id: i64, records: Vec<ExportedMessage>) {
        let log = records
            .into_iter()
            .map(|record| {
                (
                    record.id,
                    TextMessage {
                        id: record.id,
                        text: record.text,
                    },
                )
            })
            .collect();
        self.chats.insert(chat_id, log);
    }

    /// Serialize the whole store to the snapshot blob, overwriting any
    /// previous one
    pub fn save(&self) -> Result<(), SnapshotError> {
        let path = snapshot::snapshot_path(&self.config.data_dir);
        snapshot::write(&path, &self.chats)
    }

    /// Number of chats with an entry (empty logs included)
    pub fn chat_count(&self) -> usize {
        self.chats.len()
    }

    /// Messages cached for one chat (0 for an absent chat)
    pub fn chat_len(&self, chat_id: i64) -> usize {
        self.chats.get(&chat_id).map_or(0, |log| log.len())
    }

    /// Total cached messages across all chats
    pub fn total_count(&self) -> usize {
        self.chats.values().map(|log| log.len()).sum()
    }
}
