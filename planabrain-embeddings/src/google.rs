//! Google Gemini embedding client

use async_trait::async_trait;
use planabrain_core::{Embedding, EmbeddingError};
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// `batchEmbedContents` rejects more requests than this per call.
const MAX_BATCH_SIZE: usize = 100;

#[derive(Clone)]
pub struct GoogleEmbedding {
    base_url: String,
    api_key: String,
    model: String,
    task_type: Option<String>,
    max_batch_size: usize,
    http: Client,
}

impl GoogleEmbedding {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: GEMINI_BASE_URL.to_string(),
            api_key: api_key.into(),
            model: model.into(),
            task_type: None,
            max_batch_size: MAX_BATCH_SIZE,
            http: Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_task_type(mut self, task_type: impl Into<String>) -> Self {
        self.task_type = Some(task_type.into());
        self
    }

    /// Caps how many texts go into one `batchEmbedContents` request.
    pub fn with_max_batch_size(mut self, max_batch_size: usize) -> Self {
        self.max_batch_size = max_batch_size.clamp(1, MAX_BATCH_SIZE);
        self
    }

    fn model_name(&self) -> &str {
        let model = self.model.trim();
        model.strip_prefix("models/").unwrap_or(model)
    }

    fn embed_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:embedContent",
            self.base_url.trim_end_matches('/'),
            self.model_name()
        )
    }

    fn batch_embed_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:batchEmbedContents",
            self.base_url.trim_end_matches('/'),
            self.model_name()
        )
    }

    fn request_for(&self, text: &str, with_model: bool) -> EmbedContentRequest {
        EmbedContentRequest {
            model: with_model.then(|| format!("models/{}", self.model_name())),
            content: Content {
                parts: vec![Part {
                    text: text.to_string(),
                }],
            },
            task_type: self.task_type.clone(),
        }
    }

    // Returns what the service sent; callers compare the count with the input.
    async fn embed_chunk(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let request = BatchEmbedContentsRequest {
            requests: texts.iter().map(|text| self.request_for(text, true)).collect(),
        };

        let response = self
            .http
            .post(self.batch_embed_url())
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|err| EmbeddingError::Provider(err.to_string()))?;

        let response = check_status(response).await?;
        let response = response
            .json::<BatchEmbedContentsResponse>()
            .await
            .map_err(|err| EmbeddingError::InvalidResponse(err.to_string()))?;

        Ok(response
            .embeddings
            .into_iter()
            .map(|embedding| embedding.values)
            .collect())
    }
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EmbedContentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<String>,
    content: Content,
    #[serde(skip_serializing_if = "Option::is_none")]
    task_type: Option<String>,
}

#[derive(Debug, Serialize)]
struct BatchEmbedContentsRequest {
    requests: Vec<EmbedContentRequest>,
}

#[derive(Debug, Deserialize)]
struct EmbedContentResponse {
    embedding: ContentEmbedding,
}

#[derive(Debug, Deserialize)]
struct BatchEmbedContentsResponse {
    #[serde(default)]
    embeddings: Vec<ContentEmbedding>,
}

#[derive(Debug, Deserialize)]
struct ContentEmbedding {
    #[serde(alias = "value")]
    values: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorResponse {
    error: GoogleErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorDetail {
    message: String,
}

async fn check_status(response: Response) -> Result<Response, EmbeddingError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(EmbeddingError::RateLimited { retry_after: None });
    }
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<GoogleErrorResponse>(&body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| format!("HTTP {}: {}", status, body));
    Err(EmbeddingError::Provider(message))
}

#[async_trait]
impl Embedding for GoogleEmbedding {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let request = self.request_for(text, false);

        let response = self
            .http
            .post(self.embed_url())
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|err| EmbeddingError::Provider(err.to_string()))?;

        let response = check_status(response).await?;
        let response = response
            .json::<EmbedContentResponse>()
            .await
            .map_err(|err| EmbeddingError::InvalidResponse(err.to_string()))?;

        Ok(response.embedding.values)
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let mut output = Vec::with_capacity(texts.len());
        for chunk in texts.chunks(self.max_batch_size) {
            tracing::debug!(
                model = %self.model_name(),
                batch = chunk.len(),
                "requesting gemini batch embeddings"
            );
            output.extend(self.embed_chunk(chunk).await?);
        }
        Ok(output)
    }
}
