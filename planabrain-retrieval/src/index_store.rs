use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use tokio::fs;

use crate::{Index, RetrievalError, INDEX_VERSION};

#[derive(Deserialize)]
struct VersionHeader {
    #[serde(default)]
    version: Value,
}

fn io_error(path: &Path, source: std::io::Error) -> RetrievalError {
    RetrievalError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Writes `index` as a single compact JSON document, replacing whatever was
/// at `path`. Missing parent directories are created.
///
/// The document is staged next to the target and renamed into place, so a
/// reader sees either the previous index or the new one.
pub async fn save_index(path: impl AsRef<Path>, index: &Index) -> Result<(), RetrievalError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .map_err(|source| io_error(parent, source))?;
    }

    let encoded = serde_json::to_vec(index).map_err(RetrievalError::Encode)?;
    let staging = staging_path(path);
    fs::write(&staging, encoded)
        .await
        .map_err(|source| io_error(&staging, source))?;
    if let Err(source) = fs::rename(&staging, path).await {
        if let Err(err) = fs::remove_file(&staging).await {
            tracing::warn!(path = %staging.display(), error = %err, "failed to remove staged index");
        }
        return Err(io_error(path, source));
    }

    tracing::debug!(
        path = %path.display(),
        chunks = index.chunks.len(),
        "index saved"
    );
    Ok(())
}

/// Reads the index at `path`.
///
/// The version is checked before the body is parsed, so an index written by
/// a newer format reports `UnsupportedVersion` rather than a parse error.
/// Chunk contents are not validated here.
pub async fn load_index(path: impl AsRef<Path>) -> Result<Index, RetrievalError> {
    let path = path.as_ref();
    let raw = match fs::read(path).await {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Err(RetrievalError::IndexNotFound {
                path: path.to_path_buf(),
            });
        }
        Err(err) => return Err(io_error(path, err)),
    };

    let parse_error = |source| RetrievalError::Parse {
        path: path.to_path_buf(),
        source,
    };

    let header: VersionHeader = serde_json::from_slice(&raw).map_err(parse_error)?;
    if header.version != Value::from(INDEX_VERSION) {
        return Err(RetrievalError::UnsupportedVersion {
            found: header.version.to_string(),
            supported: INDEX_VERSION,
        });
    }

    let index: Index = serde_json::from_slice(&raw).map_err(parse_error)?;
    tracing::debug!(
        path = %path.display(),
        model = %index.embedding_model,
        chunks = index.chunks.len(),
        "index loaded"
    );
    Ok(index)
}
