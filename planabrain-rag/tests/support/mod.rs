#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use planabrain_core::{
    ChatModel, Embedding, EmbeddingError, LlmRequest, LlmResponse, PlanabrainError,
};

/// Embedder that replays fixed vectors and counts every call.
#[derive(Default)]
pub struct ScriptedEmbedder {
    batch: Vec<Vec<f32>>,
    query: Vec<f32>,
    calls: AtomicUsize,
    batch_inputs: Mutex<Vec<String>>,
}

impl ScriptedEmbedder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_batch(mut self, batch: Vec<Vec<f32>>) -> Self {
        self.batch = batch;
        self
    }

    pub fn with_query(mut self, query: Vec<f32>) -> Self {
        self.query = query;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn batch_inputs(&self) -> Vec<String> {
        self.batch_inputs.lock().unwrap().clone()
    }
}

#[async_trait]
impl Embedding for ScriptedEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.query.clone())
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.batch_inputs.lock().unwrap().extend_from_slice(texts);
        Ok(self.batch.clone())
    }
}

/// Chat model that records every request and answers with canned replies,
/// repeating the last one once the script runs out.
pub struct RecordingChat {
    replies: Vec<String>,
    requests: Mutex<Vec<LlmRequest>>,
}

impl RecordingChat {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: replies.into_iter().map(Into::into).collect(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<LlmRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatModel for RecordingChat {
    async fn invoke(&self, request: LlmRequest) -> Result<LlmResponse, PlanabrainError> {
        let mut requests = self.requests.lock().unwrap();
        let turn = requests.len();
        requests.push(request);
        let content = self
            .replies
            .get(turn)
            .or_else(|| self.replies.last())
            .cloned()
            .unwrap_or_default();
        Ok(LlmResponse { content })
    }
}
