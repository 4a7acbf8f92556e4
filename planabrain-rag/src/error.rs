use planabrain_core::{EmbeddingError, PlanabrainError};
use planabrain_memory::MemoryError;
use planabrain_retrieval::{RetrievalError, SplitterConfigError};
use thiserror::Error;

use crate::ConfigError;

#[derive(Debug, Error)]
pub enum RagError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Retrieval(#[from] RetrievalError),
    #[error(transparent)]
    Splitter(#[from] SplitterConfigError),
    #[error(transparent)]
    Embedding(#[from] EmbeddingError),
    #[error(transparent)]
    Llm(#[from] PlanabrainError),
    #[error(transparent)]
    Memory(#[from] MemoryError),
    #[error("Embedding count mismatch: texts={texts} embeddings={embeddings}")]
    EmbeddingCountMismatch { texts: usize, embeddings: usize },
    #[error("Embedding dimension invalid ({dimension}). Check embedding model: {model}")]
    InvalidEmbeddingDimension { dimension: usize, model: String },
    #[error("Embedding dimension mismatch at chunk {index}: expected={expected} actual={actual}")]
    EmbeddingDimensionMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },
    #[error(
        "Embedding model mismatch.\nIndex: {index_model}\nCurrent: {current_model}\nRe-run: planabrain ingest <sourceDir>"
    )]
    EmbeddingModelMismatch {
        index_model: String,
        current_model: String,
    },
    #[error("Index embeddings are invalid. Re-run: planabrain ingest <sourceDir>")]
    InvalidIndex,
    #[error(
        "Embedding dimension mismatch.\nIndex: {index}\nQuery: {query}\nRe-run: planabrain ingest <sourceDir>"
    )]
    QueryDimensionMismatch { index: usize, query: usize },
}
