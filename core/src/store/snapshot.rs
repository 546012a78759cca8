// Whole-file snapshot persistence
//
// The entire store is one bincode blob on disk. Writes overwrite in
// place; there is no incremental or atomic-rename path. A blob that
// exists but cannot be read or decoded is a fatal startup error.

use crate::message::TextMessage;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Snapshot blob file name inside the data directory
pub const SNAPSHOT_FILE: &str = "msg.p";

/// On-disk shape: chat id → message id → message
pub type ChatMap = HashMap<i64, HashMap<i64, TextMessage>>;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot encoding error: {0}")]
    Codec(#[from] bincode::Error),
}

/// Path of the snapshot blob under a data directory
pub fn snapshot_path(data_dir: &Path) -> PathBuf {
    data_dir.join(SNAPSHOT_FILE)
}

/// Serialize the whole store to `path`, overwriting any previous blob
pub fn write(path: &Path, chats: &ChatMap) -> Result<(), SnapshotError> {
    let bytes = bincode::serialize(chats)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Read a snapshot if one exists. Returns `Ok(None)` when the file is
/// absent; a fresh install starts empty.
pub fn read(path: &Path) -> Result<Option<ChatMap>, SnapshotError> {
    if !path.is_file() {
        return Ok(None);
    }
    let bytes = std::fs::read(path)?;
    let chats = bincode::deserialize(&bytes)?;
    Ok(Some(chats))
}
