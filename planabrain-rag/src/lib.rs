//! The planabrain pipelines: ingest a source directory into an index, answer
//! from that index, or answer through the hosted web-search tool with
//! per-user memory.

mod answer;
mod context;
mod error;
mod ingest;
mod prompt;
mod settings;
mod web_search;

pub use answer::{answer_question, Answerer, ANSWER_TOP_K};
pub use context::build_context;
pub use error::RagError;
pub use ingest::{ingest_directory, Ingestor};
pub use prompt::DEFAULT_SYSTEM_PROMPT;
pub use settings::{
    ConfigError, Settings, DEFAULT_CHAT_MODEL, DEFAULT_EMBEDDING_MODEL, DEFAULT_INDEX_PATH,
    DEFAULT_MEMORY_MAX_MESSAGES,
};
pub use web_search::{answer_with_web_search, WebSearchAnswerer};

/// Sampling temperature used for every chat call.
pub const CHAT_TEMPERATURE: f32 = 1.0;
