use std::path::{Path, PathBuf};

use planabrain_core::{Document, Embedding};
use planabrain_embeddings::GoogleEmbedding;
use planabrain_retrieval::{
    save_index, Chunk, DirectoryLoader, Index, RecursiveCharacterTextSplitter,
};
use tracing::Instrument;

use crate::{RagError, Settings};

/// Turns a source directory into a fresh index, replacing whatever index
/// was at `index_path` before.
pub struct Ingestor<E> {
    embedder: E,
    embedding_model: String,
    index_path: PathBuf,
    loader: DirectoryLoader,
    splitter: RecursiveCharacterTextSplitter,
}

impl<E: Embedding> Ingestor<E> {
    pub fn new(
        embedder: E,
        embedding_model: impl Into<String>,
        index_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            embedder,
            embedding_model: embedding_model.into(),
            index_path: index_path.into(),
            loader: DirectoryLoader::default(),
            splitter: RecursiveCharacterTextSplitter::default(),
        }
    }

    pub fn with_loader(mut self, loader: DirectoryLoader) -> Self {
        self.loader = loader;
        self
    }

    pub fn with_splitter(mut self, splitter: RecursiveCharacterTextSplitter) -> Self {
        self.splitter = splitter;
        self
    }

    /// Loads, splits, embeds and saves. Returns the number of chunks written.
    pub async fn ingest_directory(&self, source_dir: impl AsRef<Path>) -> Result<usize, RagError> {
        let source_dir = source_dir.as_ref();
        let span = tracing::info_span!(
            "ingest",
            source_dir = %source_dir.display(),
            model = %self.embedding_model,
        );

        async move {
            let documents = self.loader.load(source_dir).await?;
            let pieces = self.splitter.split_documents(&documents);
            tracing::debug!(
                documents = documents.len(),
                chunks = pieces.len(),
                "split source documents"
            );

            let index = self.build_index(&pieces).await?;
            save_index(&self.index_path, &index).await?;
            tracing::info!(
                chunks = index.chunks.len(),
                dimension = ?index.embedding_dimension,
                path = %self.index_path.display(),
                "index written"
            );
            Ok::<_, RagError>(index.chunks.len())
        }
        .instrument(span)
        .await
    }

    /// Embeds already-split documents in one batch call and checks that
    /// every vector has the same, non-zero length.
    pub async fn build_index(&self, pieces: &[Document]) -> Result<Index, RagError> {
        if pieces.is_empty() {
            return Err(RagError::InvalidEmbeddingDimension {
                dimension: 0,
                model: self.embedding_model.clone(),
            });
        }

        let texts: Vec<String> = pieces.iter().map(|piece| piece.content.clone()).collect();
        let vectors = self.embedder.embed_batch(&texts).await?;

        if vectors.len() != texts.len() {
            return Err(RagError::EmbeddingCountMismatch {
                texts: texts.len(),
                embeddings: vectors.len(),
            });
        }

        let dimension = vectors.first().map(Vec::len).unwrap_or(0);
        if dimension == 0 {
            return Err(RagError::InvalidEmbeddingDimension {
                dimension,
                model: self.embedding_model.clone(),
            });
        }
        if let Some((index, vector)) = vectors
            .iter()
            .enumerate()
            .find(|(_, vector)| vector.len() != dimension)
        {
            return Err(RagError::EmbeddingDimensionMismatch {
                index,
                expected: dimension,
                actual: vector.len(),
            });
        }

        let chunks = pieces
            .iter()
            .zip(texts)
            .zip(vectors)
            .map(|((piece, text), embedding)| Chunk::new(piece.source(), text, embedding))
            .collect();

        Ok(Index::new(
            self.embedding_model.clone(),
            Some(dimension),
            chunks,
        ))
    }
}

/// Ingests `source_dir` with the Gemini embedder configured in `settings`.
pub async fn ingest_directory(
    source_dir: impl AsRef<Path>,
    settings: &Settings,
) -> Result<usize, RagError> {
    let embedder = GoogleEmbedding::new(settings.api_key(), settings.embedding_model.clone());
    Ingestor::new(
        embedder,
        settings.embedding_model.clone(),
        settings.index_path.clone(),
    )
    .with_splitter(settings.splitter()?)
    .ingest_directory(source_dir)
    .await
}
