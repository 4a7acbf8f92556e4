//! Per-user conversation history kept as one small JSON file per user.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use planabrain_core::Message;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::fs;

use crate::MemoryError;

const MEMORY_FILE_VERSION: u32 = 1;
const MAX_USER_ID_LEN: usize = 200;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    Human,
    Ai,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoredChatMessage {
    pub role: ChatRole,
    pub content: String,
    /// Milliseconds since the Unix epoch.
    pub at: i64,
}

impl StoredChatMessage {
    pub fn human(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Human,
            content: content.into(),
            at: now_millis(),
        }
    }

    pub fn ai(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Ai,
            content: content.into(),
            at: now_millis(),
        }
    }

    pub fn to_message(&self) -> Message {
        match self.role {
            ChatRole::Human => Message::user(self.content.clone()),
            ChatRole::Ai => Message::assistant(self.content.clone()),
        }
    }
}

#[derive(Serialize)]
struct StoredChatFile<'a> {
    version: u32,
    messages: &'a [StoredChatMessage],
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// File-name-safe form of a user id: ASCII alphanumerics, `_` and `-` are
/// kept, everything else becomes `_`, capped at 200 characters.
pub fn safe_user_id(user_id: &str) -> String {
    let safe: String = user_id
        .trim()
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' {
                ch
            } else {
                '_'
            }
        })
        .take(MAX_USER_ID_LEN)
        .collect();

    if safe.is_empty() {
        "default".to_string()
    } else {
        safe
    }
}

// Hand-edited or older files are read leniently: anything without string
// content is dropped rather than failing the whole history.
fn normalize(entry: &Value, now: i64) -> Option<StoredChatMessage> {
    let content = entry.get("content")?.as_str()?;
    if content.trim().is_empty() {
        return None;
    }
    let role = match entry.get("role").and_then(Value::as_str) {
        Some("ai") => ChatRole::Ai,
        _ => ChatRole::Human,
    };
    let at = entry
        .get("at")
        .and_then(|at| at.as_i64().or_else(|| at.as_f64().map(|ms| ms as i64)))
        .unwrap_or(now);

    Some(StoredChatMessage {
        role,
        content: content.to_string(),
        at,
    })
}

fn keep_last(mut messages: Vec<StoredChatMessage>, max_messages: usize) -> Vec<StoredChatMessage> {
    if messages.len() > max_messages {
        messages.drain(..messages.len() - max_messages);
    }
    messages
}

#[derive(Clone, Debug)]
pub struct UserMemoryStore {
    dir: PathBuf,
    max_messages: usize,
}

impl UserMemoryStore {
    pub fn new(dir: impl Into<PathBuf>, max_messages: usize) -> Self {
        Self {
            dir: dir.into(),
            max_messages,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn max_messages(&self) -> usize {
        self.max_messages
    }

    pub fn path_for(&self, user_id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", safe_user_id(user_id)))
    }

    /// The user's most recent `max_messages` messages, oldest first.
    /// A user without a history file has an empty history.
    pub async fn load(&self, user_id: &str) -> Result<Vec<StoredChatMessage>, MemoryError> {
        let path = self.path_for(user_id);
        let raw = match fs::read(&path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(MemoryError::Io { path, source }),
        };

        let parsed: Value = serde_json::from_slice(&raw).map_err(|source| MemoryError::Parse {
            path: path.clone(),
            source,
        })?;

        let now = now_millis();
        let messages = parsed
            .get("messages")
            .and_then(Value::as_array)
            .map(|entries| entries.iter().filter_map(|entry| normalize(entry, now)).collect())
            .unwrap_or_default();

        Ok(keep_last(messages, self.max_messages))
    }

    /// Appends `messages` to the user's history and rewrites the file,
    /// keeping only the newest `max_messages`.
    pub async fn append(
        &self,
        user_id: &str,
        messages: Vec<StoredChatMessage>,
    ) -> Result<(), MemoryError> {
        let mut combined = self.load(user_id).await?;
        combined.extend(
            messages
                .into_iter()
                .filter(|message| !message.content.trim().is_empty()),
        );
        let kept = keep_last(combined, self.max_messages);

        fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| MemoryError::Io {
                path: self.dir.clone(),
                source,
            })?;

        let path = self.path_for(user_id);
        let encoded = serde_json::to_vec(&StoredChatFile {
            version: MEMORY_FILE_VERSION,
            messages: &kept,
        })
        .map_err(|source| MemoryError::Encode {
            path: path.clone(),
            source,
        })?;
        fs::write(&path, encoded)
            .await
            .map_err(|source| MemoryError::Io {
                path: path.clone(),
                source,
            })?;

        tracing::debug!(path = %path.display(), messages = kept.len(), "user memory saved");
        Ok(())
    }

    /// Deletes the user's history. Returns `false` when there was none.
    pub async fn reset(&self, user_id: &str) -> Result<bool, MemoryError> {
        let path = self.path_for(user_id);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(source) => Err(MemoryError::Io { path, source }),
        }
    }
}
