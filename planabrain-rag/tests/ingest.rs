mod support;

use std::sync::Arc;

use planabrain_embeddings::GoogleEmbedding;
use planabrain_rag::{Ingestor, RagError};
use planabrain_retrieval::{chunk_id, load_index, RecursiveCharacterTextSplitter};
use support::ScriptedEmbedder;
use serde_json::json;
use tempfile::tempdir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn ingest_single_file_writes_one_chunk_index() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("src");
    std::fs::create_dir(&source).unwrap();
    std::fs::write(source.join("a.txt"), "hello world").unwrap();
    let index_path = dir.path().join("out").join("index.json");

    let embedder = Arc::new(ScriptedEmbedder::new().with_batch(vec![vec![1.0, 0.0]]));
    let ingestor = Ingestor::new(embedder.clone(), "model-a", &index_path);

    let count = ingestor.ingest_directory(&source).await.unwrap();
    assert_eq!(count, 1);
    assert_eq!(embedder.calls(), 1);
    assert_eq!(embedder.batch_inputs(), vec!["hello world".to_string()]);

    let index = load_index(&index_path).await.unwrap();
    assert_eq!(index.version, 1);
    assert_eq!(index.embedding_model, "model-a");
    assert_eq!(index.embedding_dimension, Some(2));
    assert_eq!(index.chunks.len(), 1);

    let chunk = &index.chunks[0];
    assert!(chunk.source.contains("a.txt"));
    assert_eq!(chunk.text, "hello world");
    assert_eq!(chunk.embedding, vec![1.0, 0.0]);
    assert_eq!(chunk.id, chunk_id(&chunk.source, "hello world"));
}

#[tokio::test]
async fn ingest_rejects_inconsistent_dimensions() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("a.md"), "first file").unwrap();
    std::fs::write(dir.path().join("b.md"), "second file").unwrap();
    let index_path = dir.path().join("index.json");

    let embedder = ScriptedEmbedder::new().with_batch(vec![vec![1.0, 0.0, 0.0], vec![1.0, 0.0]]);
    let err = Ingestor::new(embedder, "model-a", &index_path)
        .ingest_directory(dir.path())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        RagError::EmbeddingDimensionMismatch {
            index: 1,
            expected: 3,
            actual: 2
        }
    ));
    assert!(!index_path.exists());
}

#[tokio::test]
async fn ingest_rejects_count_mismatch() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("a.md"), "first file").unwrap();
    std::fs::write(dir.path().join("b.md"), "second file").unwrap();

    let embedder = ScriptedEmbedder::new().with_batch(vec![vec![1.0, 0.0]]);
    let err = Ingestor::new(embedder, "model-a", dir.path().join("index.json"))
        .ingest_directory(dir.path())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        RagError::EmbeddingCountMismatch {
            texts: 2,
            embeddings: 1
        }
    ));
    assert_eq!(
        err.to_string(),
        "Embedding count mismatch: texts=2 embeddings=1"
    );
}

#[tokio::test]
async fn ingest_rejects_short_batch_from_gemini() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-embedding-001:batchEmbedContents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "embeddings": [ { "values": [0.1, 0.2] } ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let source = dir.path().join("src");
    std::fs::create_dir(&source).unwrap();
    std::fs::write(source.join("a.md"), "first file").unwrap();
    std::fs::write(source.join("b.md"), "second file").unwrap();
    let index_path = dir.path().join("index.json");

    let embedder =
        GoogleEmbedding::new("test-key", "gemini-embedding-001").with_base_url(server.uri());
    let err = Ingestor::new(embedder, "gemini-embedding-001", &index_path)
        .ingest_directory(&source)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        RagError::EmbeddingCountMismatch {
            texts: 2,
            embeddings: 1
        }
    ));
    assert!(!index_path.exists());
}

#[tokio::test]
async fn ingest_rejects_zero_length_embeddings() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("a.md"), "some text").unwrap();

    let embedder = ScriptedEmbedder::new().with_batch(vec![vec![]]);
    let err = Ingestor::new(embedder, "model-a", dir.path().join("index.json"))
        .ingest_directory(dir.path())
        .await
        .unwrap_err();

    assert!(matches!(
        &err,
        RagError::InvalidEmbeddingDimension { dimension: 0, model } if model == "model-a"
    ));
    assert!(err.to_string().contains("Check embedding model: model-a"));
}

#[tokio::test]
async fn ingest_of_empty_directory_fails_without_embedding() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("image.png"), "not ingested").unwrap();

    let embedder = Arc::new(ScriptedEmbedder::new());
    let err = Ingestor::new(embedder.clone(), "model-a", dir.path().join("index.json"))
        .ingest_directory(dir.path())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        RagError::InvalidEmbeddingDimension { dimension: 0, .. }
    ));
    assert_eq!(embedder.calls(), 0);
}

#[tokio::test]
async fn ingest_of_missing_directory_is_a_load_error() {
    let dir = tempdir().unwrap();

    let err = Ingestor::new(ScriptedEmbedder::new(), "model-a", dir.path().join("index.json"))
        .ingest_directory(dir.path().join("missing"))
        .await
        .unwrap_err();

    assert!(matches!(err, RagError::Retrieval(_)));
}

#[tokio::test]
async fn ingest_splits_long_files_and_replaces_previous_index() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("src");
    std::fs::create_dir(&source).unwrap();
    std::fs::write(source.join("notes.md"), "alpha beta gamma delta").unwrap();
    let index_path = dir.path().join("index.json");

    let splitter = RecursiveCharacterTextSplitter::builder()
        .chunk_size(12)
        .chunk_overlap(0)
        .build()
        .unwrap();
    let embedder = ScriptedEmbedder::new().with_batch(vec![vec![1.0], vec![0.5]]);
    let count = Ingestor::new(embedder, "model-a", &index_path)
        .with_splitter(splitter)
        .ingest_directory(&source)
        .await
        .unwrap();
    assert_eq!(count, 2);

    let index = load_index(&index_path).await.unwrap();
    let texts: Vec<&str> = index.chunks.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["alpha beta", "gamma delta"]);

    std::fs::write(source.join("notes.md"), "short").unwrap();
    let embedder = ScriptedEmbedder::new().with_batch(vec![vec![0.25, 0.75]]);
    let count = Ingestor::new(embedder, "model-b", &index_path)
        .ingest_directory(&source)
        .await
        .unwrap();
    assert_eq!(count, 1);

    let index = load_index(&index_path).await.unwrap();
    assert_eq!(index.embedding_model, "model-b");
    assert_eq!(index.embedding_dimension, Some(2));
    assert_eq!(index.chunks.len(), 1);
}
