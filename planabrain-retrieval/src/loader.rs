use std::path::{Path, PathBuf};

use planabrain_core::Document;
use walkdir::WalkDir;

use crate::RetrievalError;

/// File extensions ingested by default. Everything else is skipped.
pub const DEFAULT_EXTENSIONS: &[&str] = &[
    "md", "txt", "ts", "tsx", "js", "jsx", "json", "rs", "py", "toml", "yaml", "yml",
];

/// Recursively loads text-like files under a directory, one [`Document`]
/// per file with its path under the `source` metadata key.
#[derive(Clone, Debug)]
pub struct DirectoryLoader {
    extensions: Vec<String>,
}

impl Default for DirectoryLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectoryLoader {
    pub fn new() -> Self {
        Self::with_extensions(DEFAULT_EXTENSIONS.iter().copied())
    }

    pub fn with_extensions<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            extensions: extensions
                .into_iter()
                .map(|ext| ext.into().trim_start_matches('.').to_ascii_lowercase())
                .collect(),
        }
    }

    pub fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.extensions.iter().any(|known| known.eq_ignore_ascii_case(ext)))
            .unwrap_or(false)
    }

    /// Walks `dir` in file-name order and reads every accepted file.
    /// Files that are not valid UTF-8 are skipped with a warning.
    pub async fn load(&self, dir: impl AsRef<Path>) -> Result<Vec<Document>, RetrievalError> {
        let dir = dir.as_ref().to_path_buf();
        let paths = {
            let walk_root = dir.clone();
            let loader = self.clone();
            tokio::task::spawn_blocking(move || loader.collect_paths(&walk_root))
                .await
                .map_err(|err| RetrievalError::Load {
                    path: dir.clone(),
                    source: std::io::Error::other(err),
                })??
        };

        let mut documents = Vec::with_capacity(paths.len());
        for path in paths {
            let bytes = tokio::fs::read(&path)
                .await
                .map_err(|source| RetrievalError::Load {
                    path: path.clone(),
                    source,
                })?;
            let content = match String::from_utf8(bytes) {
                Ok(content) => content,
                Err(_) => {
                    tracing::warn!(path = %path.display(), "skipping file that is not valid UTF-8");
                    continue;
                }
            };
            documents.push(Document::new(content).with_source(path.to_string_lossy()));
        }

        tracing::debug!(dir = %dir.display(), documents = documents.len(), "source directory loaded");
        Ok(documents)
    }

    fn collect_paths(&self, dir: &Path) -> Result<Vec<PathBuf>, RetrievalError> {
        let mut paths = Vec::new();
        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry.map_err(|err| RetrievalError::Load {
                path: err
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| dir.to_path_buf()),
                source: err.into(),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            if self.accepts(entry.path()) {
                paths.push(entry.into_path());
            } else {
                tracing::debug!(path = %entry.path().display(), "skipping unsupported file");
            }
        }
        Ok(paths)
    }
}
