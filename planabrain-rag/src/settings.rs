use std::path::{Path, PathBuf};

use planabrain_memory::UserMemoryStore;
use planabrain_retrieval::{
    RecursiveCharacterTextSplitter, SplitterConfigError, DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE,
};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use crate::DEFAULT_SYSTEM_PROMPT;

pub const DEFAULT_CHAT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_EMBEDDING_MODEL: &str = "gemini-embedding-001";
pub const DEFAULT_INDEX_PATH: &str = ".planabrain/index.json";
pub const DEFAULT_MEMORY_MAX_MESSAGES: usize = 20;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("GOOGLE_API_KEY is required")]
    MissingApiKey,
    #[error("{name} must be a non-negative integer, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },
}

/// Runtime configuration, read from the process environment.
#[derive(Clone, Debug)]
pub struct Settings {
    pub google_api_key: SecretString,
    pub chat_model: String,
    pub embedding_model: String,
    pub index_path: PathBuf,
    pub system_prompt: String,
    pub memory_enabled: bool,
    pub memory_max_messages: usize,
    pub memory_dir: PathBuf,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds settings from any variable source; `from_env` passes the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let google_api_key = lookup("GOOGLE_API_KEY")
            .or_else(|| lookup("GEMINI_API_KEY"))
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let index_path = PathBuf::from(
            lookup("PLANABRAIN_INDEX_PATH").unwrap_or_else(|| DEFAULT_INDEX_PATH.to_string()),
        );

        let memory_enabled = match lookup("PLANABRAIN_MEMORY_ENABLED") {
            None => true,
            Some(raw) => !(raw == "0" || raw.eq_ignore_ascii_case("false")),
        };

        // Garbage disables memory instead of failing startup.
        let memory_max_messages = lookup("PLANABRAIN_MEMORY_MAX_MESSAGES")
            .map(|raw| lenient_count(&raw))
            .unwrap_or(DEFAULT_MEMORY_MAX_MESSAGES);

        let memory_dir = lookup("PLANABRAIN_MEMORY_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| default_memory_dir(&index_path));

        Ok(Self {
            google_api_key: SecretString::new(google_api_key),
            chat_model: lookup("PLANABRAIN_GEMINI_MODEL")
                .unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string()),
            embedding_model: lookup("PLANABRAIN_GEMINI_EMBEDDING_MODEL")
                .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string()),
            index_path,
            system_prompt: lookup("PLANABRAIN_SYSTEM_PROMPT")
                .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
            memory_enabled,
            memory_max_messages,
            memory_dir,
            chunk_size: parse_count(&lookup, "PLANABRAIN_CHUNK_SIZE", DEFAULT_CHUNK_SIZE)?,
            chunk_overlap: parse_count(&lookup, "PLANABRAIN_CHUNK_OVERLAP", DEFAULT_CHUNK_OVERLAP)?,
        })
    }

    pub fn api_key(&self) -> &str {
        self.google_api_key.expose_secret()
    }

    /// Whether the web-search path reads and writes conversation history.
    pub fn memory_active(&self) -> bool {
        self.memory_enabled && self.memory_max_messages > 0
    }

    pub fn memory_store(&self) -> UserMemoryStore {
        UserMemoryStore::new(self.memory_dir.clone(), self.memory_max_messages)
    }

    pub fn splitter(&self) -> Result<RecursiveCharacterTextSplitter, SplitterConfigError> {
        RecursiveCharacterTextSplitter::builder()
            .chunk_size(self.chunk_size)
            .chunk_overlap(self.chunk_overlap)
            .build()
    }
}

fn default_memory_dir(index_path: &Path) -> PathBuf {
    index_path
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join("memory")
}

// Leading digits count, anything else reads as 0; negatives clamp to 0.
fn lenient_count(raw: &str) -> usize {
    let trimmed = raw.trim_start();
    let digits: String = trimmed
        .strip_prefix('+')
        .unwrap_or(trimmed)
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().unwrap_or(0)
}

fn parse_count<F>(lookup: &F, name: &'static str, default: usize) -> Result<usize, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { name, value: raw }),
    }
}
