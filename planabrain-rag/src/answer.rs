use std::path::PathBuf;

use planabrain_core::{ChatModel, Embedding, LlmRequest, Message};
use planabrain_embeddings::GoogleEmbedding;
use planabrain_llm::GoogleClient;
use planabrain_retrieval::{load_index, search_with_report};
use tracing::Instrument;

use crate::{build_context, RagError, Settings, CHAT_TEMPERATURE};

/// How many chunks go into the answer context.
pub const ANSWER_TOP_K: usize = 4;

/// Answers questions from the persisted index.
pub struct Answerer<E, L> {
    embedder: E,
    chat: L,
    embedding_model: String,
    index_path: PathBuf,
    system_prompt: String,
}

impl<E, L> Answerer<E, L>
where
    E: Embedding,
    L: ChatModel,
{
    pub fn new(
        embedder: E,
        chat: L,
        embedding_model: impl Into<String>,
        index_path: impl Into<PathBuf>,
        system_prompt: impl Into<String>,
    ) -> Self {
        Self {
            embedder,
            chat,
            embedding_model: embedding_model.into(),
            index_path: index_path.into(),
            system_prompt: system_prompt.into(),
        }
    }

    pub async fn answer(&self, question: &str) -> Result<String, RagError> {
        let span = tracing::info_span!("answer", model = %self.embedding_model, top_k = ANSWER_TOP_K);

        async move {
            let index = load_index(&self.index_path).await?;
            // Vectors from different models are not comparable; fail before
            // spending an embedding call.
            if index.embedding_model != self.embedding_model {
                return Err(RagError::EmbeddingModelMismatch {
                    index_model: index.embedding_model,
                    current_model: self.embedding_model.clone(),
                });
            }

            let query = self.embedder.embed(question).await?;
            let expected = index.expected_dimension().ok_or(RagError::InvalidIndex)?;
            if query.len() != expected {
                return Err(RagError::QueryDimensionMismatch {
                    index: expected,
                    query: query.len(),
                });
            }

            let report = search_with_report(&query, &index.chunks, ANSWER_TOP_K)?;
            tracing::debug!(
                matches = report.matches.len(),
                excluded = report.excluded,
                "retrieved context"
            );
            let context = build_context(report.matches.iter().map(|scored| scored.chunk));

            let request = LlmRequest::new(vec![
                Message::system(self.system_prompt.clone()),
                Message::user(format!("Question:\n{question}\n\nContext:\n{context}")),
            ])
            .with_temperature(CHAT_TEMPERATURE);

            let response = self.chat.invoke(request).await?;
            Ok(response.content)
        }
        .instrument(span)
        .await
    }
}

/// Answers `question` from the index with the Gemini clients configured in
/// `settings`.
pub async fn answer_question(question: &str, settings: &Settings) -> Result<String, RagError> {
    let embedder = GoogleEmbedding::new(settings.api_key(), settings.embedding_model.clone());
    let chat = GoogleClient::new(settings.api_key(), settings.chat_model.clone());
    Answerer::new(
        embedder,
        chat,
        settings.embedding_model.clone(),
        settings.index_path.clone(),
        settings.system_prompt.clone(),
    )
    .answer(question)
    .await
}
