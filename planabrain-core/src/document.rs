use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::Value;

/// Metadata key holding the path a document was loaded from.
pub const SOURCE_KEY: &str = "source";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Document {
    pub content: String,
    #[serde(default)]
    pub metadata: HashMap<String, Value>,
}

impl Document {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            metadata: HashMap::new(),
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.metadata
            .insert(SOURCE_KEY.to_string(), Value::String(source.into()));
        self
    }

    /// The `source` metadata entry rendered as a string, empty when absent.
    pub fn source(&self) -> String {
        match self.metadata.get(SOURCE_KEY) {
            Some(Value::String(source)) => source.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }
}
