use planabrain_core::{ChatModel, LlmRequest, Message, Tool};
use planabrain_llm::GoogleClient;
use planabrain_memory::{StoredChatMessage, UserMemoryStore};
use tracing::Instrument;

use crate::{RagError, Settings, CHAT_TEMPERATURE};

const DEFAULT_USER_ID: &str = "default";

/// Answers with the hosted search tool, replaying and extending the user's
/// conversation history when a memory store is attached.
pub struct WebSearchAnswerer<L> {
    chat: L,
    system_prompt: String,
    memory: Option<UserMemoryStore>,
}

impl<L: ChatModel> WebSearchAnswerer<L> {
    pub fn new(chat: L, system_prompt: impl Into<String>) -> Self {
        Self {
            chat,
            system_prompt: system_prompt.into(),
            memory: None,
        }
    }

    pub fn with_memory(mut self, memory: UserMemoryStore) -> Self {
        self.memory = Some(memory);
        self
    }

    pub async fn answer(&self, question: &str, user_id: &str) -> Result<String, RagError> {
        let span = tracing::info_span!(
            "web_search_answer",
            user_id = %user_id,
            memory = self.memory.is_some(),
        );

        async move {
            let history = match &self.memory {
                Some(memory) => memory.load(user_id).await?,
                None => Vec::new(),
            };

            let mut messages = Vec::with_capacity(history.len() + 2);
            messages.push(Message::system(self.system_prompt.clone()));
            messages.extend(history.iter().map(StoredChatMessage::to_message));
            messages.push(Message::user(question));

            let request = LlmRequest::new(messages)
                .with_tool(Tool::GoogleSearch)
                .with_temperature(CHAT_TEMPERATURE);
            let answer = self.chat.invoke(request).await?.content;

            if let Some(memory) = &self.memory {
                memory
                    .append(
                        user_id,
                        vec![
                            StoredChatMessage::human(question),
                            StoredChatMessage::ai(answer.clone()),
                        ],
                    )
                    .await?;
                tracing::debug!(replayed = history.len(), "conversation memory updated");
            }

            Ok::<_, RagError>(answer)
        }
        .instrument(span)
        .await
    }
}

/// Answers `question` through Gemini with Google Search grounding. Memory is
/// used when `settings` enables it; `user_id` defaults to `default`.
pub async fn answer_with_web_search(
    question: &str,
    settings: &Settings,
    user_id: Option<&str>,
) -> Result<String, RagError> {
    let chat = GoogleClient::new(settings.api_key(), settings.chat_model.clone());
    let mut answerer = WebSearchAnswerer::new(chat, settings.system_prompt.clone());
    if settings.memory_active() {
        answerer = answerer.with_memory(settings.memory_store());
    }
    answerer
        .answer(question, user_id.unwrap_or(DEFAULT_USER_ID))
        .await
}
