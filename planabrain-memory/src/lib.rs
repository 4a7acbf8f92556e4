use std::path::PathBuf;

use thiserror::Error;

pub mod store;

pub use store::{safe_user_id, ChatRole, StoredChatMessage, UserMemoryStore};

#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("failed to access memory file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse memory file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode memory file {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
