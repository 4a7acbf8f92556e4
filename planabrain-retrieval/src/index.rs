use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

/// The only on-disk format version this crate reads and writes.
pub const INDEX_VERSION: u32 = 1;

/// Content-addressed chunk id: hex SHA-256 of `source + "\n" + text`.
pub fn chunk_id(source: &str, text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(source.as_bytes());
    hasher.update(b"\n");
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub id: String,
    pub source: String,
    pub text: String,
    pub embedding: Vec<f32>,
}

impl Chunk {
    pub fn new(source: impl Into<String>, text: impl Into<String>, embedding: Vec<f32>) -> Self {
        let source = source.into();
        let text = text.into();
        Self {
            id: chunk_id(&source, &text),
            source,
            text,
            embedding,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Index {
    pub version: u32,
    pub embedding_model: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_dimension"
    )]
    pub embedding_dimension: Option<usize>,
    pub chunks: Vec<Chunk>,
}

impl Index {
    pub fn new(
        embedding_model: impl Into<String>,
        embedding_dimension: Option<usize>,
        chunks: Vec<Chunk>,
    ) -> Self {
        Self {
            version: INDEX_VERSION,
            embedding_model: embedding_model.into(),
            embedding_dimension,
            chunks,
        }
    }

    /// Dimension every query must have: the cached value, or the length of
    /// the first non-empty chunk embedding for indexes written without it.
    pub fn expected_dimension(&self) -> Option<usize> {
        self.embedding_dimension.filter(|dim| *dim > 0).or_else(|| {
            self.chunks
                .iter()
                .map(|chunk| chunk.embedding.len())
                .find(|len| *len > 0)
        })
    }
}

// Absent, null, zero or non-integer values all read as "not cached".
fn lenient_dimension<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .and_then(|value| value.as_u64())
        .filter(|dim| *dim > 0)
        .and_then(|dim| usize::try_from(dim).ok()))
}
