// Store module — bounded message cache and snapshot persistence

pub mod messages;
pub mod snapshot;

pub use messages::MessageStore;
pub use snapshot::SnapshotError;
