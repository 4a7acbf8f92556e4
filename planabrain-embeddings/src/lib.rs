#[cfg(feature = "google")]
mod google;

#[cfg(feature = "google")]
pub use google::GoogleEmbedding;
