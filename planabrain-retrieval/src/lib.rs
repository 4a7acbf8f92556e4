//! Retrieval building blocks: the persisted chunk index, cosine similarity,
//! top-k search and the loader/splitter pair that feeds ingestion.
//!
//! ```text
//! source dir -> DirectoryLoader -> RecursiveCharacterTextSplitter -> Chunk
//!                                                                    |
//!                                           save_index / load_index <+
//!                                                    |
//!                        query embedding -> top_k_similar_chunks
//! ```

mod error;
mod index;
mod index_store;
mod loader;
mod search;
mod similarity;
mod splitter;

pub use error::{RetrievalError, RetrievalResult, REINGEST_HINT};
pub use index::{chunk_id, Chunk, Index, INDEX_VERSION};
pub use index_store::{load_index, save_index};
pub use loader::{DirectoryLoader, DEFAULT_EXTENSIONS};
pub use search::{search_with_report, top_k_similar_chunks, ScoredChunk, SearchReport};
pub use similarity::cosine_similarity;
pub use splitter::{
    RecursiveCharacterTextSplitter, RecursiveCharacterTextSplitterBuilder, SplitterConfigError,
    DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE,
};
