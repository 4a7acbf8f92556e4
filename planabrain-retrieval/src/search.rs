use std::cmp::Ordering;

use crate::{cosine_similarity, Chunk, RetrievalError};

/// A chunk paired with its similarity to the query. Never persisted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoredChunk<'a> {
    pub chunk: &'a Chunk,
    pub score: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SearchReport<'a> {
    /// Best matches, highest score first.
    pub matches: Vec<ScoredChunk<'a>>,
    /// Chunks skipped because their embedding length differs from the query.
    pub excluded: usize,
}

/// Returns the `k` chunks most similar to `query_embedding`.
///
/// Chunks whose embedding length differs from the query are skipped, not
/// reported. Equal scores are ordered by chunk id.
pub fn top_k_similar_chunks<'a>(
    query_embedding: &[f32],
    chunks: &'a [Chunk],
    k: usize,
) -> Result<Vec<ScoredChunk<'a>>, RetrievalError> {
    search_with_report(query_embedding, chunks, k).map(|report| report.matches)
}

/// Same as [`top_k_similar_chunks`], also counting the skipped chunks.
pub fn search_with_report<'a>(
    query_embedding: &[f32],
    chunks: &'a [Chunk],
    k: usize,
) -> Result<SearchReport<'a>, RetrievalError> {
    let expected = query_embedding.len();
    let valid: Vec<&Chunk> = chunks
        .iter()
        .filter(|chunk| chunk.embedding.len() == expected)
        .collect();
    let excluded = chunks.len() - valid.len();

    if expected == 0 || valid.is_empty() {
        return Err(RetrievalError::NoValidEmbeddings);
    }
    if excluded > 0 {
        tracing::debug!(
            excluded,
            expected,
            "skipping chunks with mismatched embedding dimension"
        );
    }

    let mut matches = valid
        .into_iter()
        .map(|chunk| {
            let score = cosine_similarity(query_embedding, &chunk.embedding)?;
            Ok(ScoredChunk {
                chunk,
                score: if score.is_nan() {
                    f32::NEG_INFINITY
                } else {
                    score
                },
            })
        })
        .collect::<Result<Vec<_>, RetrievalError>>()?;

    matches.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.chunk.id.cmp(&b.chunk.id))
    });
    matches.truncate(k);

    Ok(SearchReport { matches, excluded })
}
