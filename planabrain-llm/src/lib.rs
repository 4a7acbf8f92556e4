// Provider-specific clients (feature-gated)
pub mod providers;

pub use planabrain_core::{ChatModel, LlmRequest, LlmResponse, Message, Role, Tool};

#[cfg(feature = "google")]
pub use providers::google::GoogleClient;
