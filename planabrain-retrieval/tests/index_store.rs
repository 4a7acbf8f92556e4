use planabrain_retrieval::{load_index, save_index, Chunk, Index, RetrievalError};

fn sample_index() -> Index {
    Index::new(
        "gemini-embedding-001",
        Some(3),
        vec![
            Chunk::new("docs/a.md", "alpha", vec![0.1, 0.2, 0.3]),
            Chunk::new("docs/b.md", "beta", vec![-1.5, 0.0, 2.25]),
        ],
    )
}

#[tokio::test]
async fn save_then_load_round_trips() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("index.json");
    let index = sample_index();

    save_index(&path, &index).await.unwrap();
    let loaded = load_index(&path).await.unwrap();

    assert_eq!(loaded, index);
}

#[tokio::test]
async fn save_round_trips_index_without_cached_dimension() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("index.json");
    let index = Index::new("m", None, vec![Chunk::new("s", "t", vec![])]);

    save_index(&path, &index).await.unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(!raw.contains("embeddingDimension"));
    assert_eq!(load_index(&path).await.unwrap(), index);
}

#[tokio::test]
async fn save_creates_missing_parent_directories() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("nested").join(".planabrain").join("index.json");

    save_index(&path, &sample_index()).await.unwrap();

    assert!(path.exists());
}

#[tokio::test]
async fn save_replaces_existing_index_completely() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("index.json");
    save_index(&path, &sample_index()).await.unwrap();

    let replacement = Index::new("other-model", Some(2), vec![Chunk::new("c", "gamma", vec![1.0, 0.0])]);
    save_index(&path, &replacement).await.unwrap();

    let loaded = load_index(&path).await.unwrap();
    assert_eq!(loaded, replacement);
    assert_eq!(loaded.chunks.len(), 1);
    assert!(!dir.path().join("index.json.tmp").exists());
}

#[tokio::test]
async fn save_writes_compact_camel_case_json() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("index.json");
    save_index(&path, &sample_index()).await.unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

    assert!(!raw.contains('\n'));
    assert_eq!(value["version"], 1);
    assert_eq!(value["embeddingModel"], "gemini-embedding-001");
    assert_eq!(value["embeddingDimension"], 3);
    assert_eq!(value["chunks"][0]["source"], "docs/a.md");
    assert_eq!(value["chunks"][0]["text"], "alpha");
}

#[tokio::test]
async fn load_missing_file_reports_index_not_found() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("missing.json");

    let err = load_index(&path).await.unwrap_err();

    assert!(matches!(&err, RetrievalError::IndexNotFound { path: p } if p == &path));
    let message = err.to_string();
    assert!(message.contains(&path.display().to_string()));
    assert!(message.contains("planabrain ingest <sourceDir>"));
}

#[tokio::test]
async fn load_rejects_unsupported_version() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("index.json");
    std::fs::write(
        &path,
        r#"{"version":2,"embeddingModel":"m","chunks":[],"shards":["a"]}"#,
    )
    .unwrap();

    let err = load_index(&path).await.unwrap_err();

    assert!(matches!(
        err,
        RetrievalError::UnsupportedVersion { ref found, supported: 1 } if found == "2"
    ));
}

#[tokio::test]
async fn load_rejects_missing_version() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("index.json");
    std::fs::write(&path, r#"{"embeddingModel":"m","chunks":[]}"#).unwrap();

    let err = load_index(&path).await.unwrap_err();

    assert!(matches!(err, RetrievalError::UnsupportedVersion { .. }));
}

#[tokio::test]
async fn load_reports_structural_parse_errors() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("index.json");
    std::fs::write(&path, r#"{"version":1,"embeddingModel":"m","chunks":[{"id":"x"}]}"#).unwrap();

    let err = load_index(&path).await.unwrap_err();
    assert!(matches!(err, RetrievalError::Parse { .. }));

    std::fs::write(&path, "not json").unwrap();
    let err = load_index(&path).await.unwrap_err();
    assert!(matches!(err, RetrievalError::Parse { .. }));
}

#[tokio::test]
async fn load_accepts_index_written_without_dimension() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("index.json");
    std::fs::write(
        &path,
        r#"{"version":1,"embeddingModel":"m","chunks":[{"id":"1","source":"s","text":"t","embedding":[1,0]}]}"#,
    )
    .unwrap();

    let index = load_index(&path).await.unwrap();

    assert_eq!(index.embedding_dimension, None);
    assert_eq!(index.expected_dimension(), Some(2));
    assert_eq!(index.chunks[0].embedding, vec![1.0, 0.0]);
}

#[tokio::test]
async fn failed_replace_removes_staged_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("index.json");
    std::fs::create_dir(&path).unwrap();
    std::fs::write(path.join("occupied"), "x").unwrap();

    let err = save_index(&path, &sample_index()).await.unwrap_err();

    assert!(matches!(err, RetrievalError::Io { .. }));
    assert!(!dir.path().join("index.json.tmp").exists());
    assert!(path.join("occupied").exists());
}
