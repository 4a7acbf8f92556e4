mod document;
mod embedding;
mod error;
mod llm;

pub use document::{Document, SOURCE_KEY};
pub use embedding::Embedding;
pub use error::{EmbeddingError, PlanabrainError};
pub use llm::{ChatModel, LlmRequest, LlmResponse, Message, Role, Tool};

pub type Value = serde_json::Value;
