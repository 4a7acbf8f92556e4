use std::path::PathBuf;

use thiserror::Error;

/// Remedy appended to every error that a fresh ingestion fixes.
pub const REINGEST_HINT: &str = "Run: planabrain ingest <sourceDir>";

#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("embedding dimension mismatch: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },
    #[error("Index not found: {}\n{}", .path.display(), REINGEST_HINT)]
    IndexNotFound { path: PathBuf },
    #[error("Unsupported index version: {found} (supported: {supported})\n{}", REINGEST_HINT)]
    UnsupportedVersion { found: String, supported: u32 },
    #[error("No valid embeddings found in index.\n{}", REINGEST_HINT)]
    NoValidEmbeddings,
    #[error("failed to access index {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse index {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode index: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("failed to load source directory {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type RetrievalResult<T> = Result<T, RetrievalError>;
