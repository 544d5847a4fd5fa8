//! Filesystem access for the `/files` route.
//!
//! All paths are resolved against a single serving directory. The store
//! holds no handles between requests; concurrent reads and writes of the
//! same file are not synchronised (last writer wins).

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use crate::http::error::{HttpError, HttpResult};

#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Joins `relative` onto the root once.
    ///
    /// Returns `None` for an empty name or anything that is not a plain
    /// relative path (`..`, `.`, absolute, empty components), so no request
    /// can address a file outside the root.
    pub fn resolve(&self, relative: &str) -> Option<PathBuf> {
        if relative.is_empty() || relative.split('/').any(str::is_empty) {
            return None;
        }
        let rel = Path::new(relative);
        if !rel.components().all(|c| matches!(c, Component::Normal(_))) {
            return None;
        }
        Some(self.root.join(rel))
    }

    /// Full contents of a regular file; `None` if it is missing or a directory.
    pub async fn read(&self, path: &Path) -> HttpResult<Option<Vec<u8>>> {
        let meta = match tokio::fs::metadata(path).await {
            Ok(meta) => meta,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(HttpError::filesystem(path, e)),
        };
        if meta.is_dir() {
            return Ok(None);
        }

        match tokio::fs::read(path).await {
            Ok(bytes) => Ok(Some(bytes)),
            // Removed between stat and open.
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(HttpError::filesystem(path, e)),
        }
    }

    /// Creates or truncates `path` and writes `contents` verbatim.
    pub async fn write(&self, path: &Path, contents: &[u8]) -> HttpResult<()> {
        tokio::fs::write(path, contents)
            .await
            .map_err(|e| HttpError::filesystem(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_joins_once() {
        let store = FileStore::new("/srv/data");
        assert_eq!(
            store.resolve("a/b.txt"),
            Some(PathBuf::from("/srv/data/a/b.txt"))
        );
    }

    #[test]
    fn resolve_rejects_escapes_and_empty_names() {
        let store = FileStore::new("/srv/data");
        assert_eq!(store.resolve(""), None);
        assert_eq!(store.resolve("../etc/passwd"), None);
        assert_eq!(store.resolve("a/../../b"), None);
        assert_eq!(store.resolve("./a"), None);
        assert_eq!(store.resolve("a//b"), None);
        assert_eq!(store.resolve("dir/"), None);
    }
}
