// Recall Core — bounded per-chat text message cache
//
// Mirrors message/edit/delete events from a chat platform into an
// in-memory store, caps how much each chat retains, and snapshots the
// whole thing to a single blob on disk.

pub mod config;
pub mod message;
pub mod store;

pub use config::StoreConfig;
pub use message::{ExportedMessage, MessageEvent, TextMessage};
pub use store::{MessageStore, SnapshotError};
