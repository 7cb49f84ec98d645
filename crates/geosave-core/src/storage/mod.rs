//! Destination directory: record persistence and the run lock.

mod lock;

use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;

use crate::models::GameId;
use crate::{Error, Result};

pub use lock::{RunGuard, LOCK_FILE_NAME};

/// Persistence for downloaded game records (async)
#[allow(async_fn_in_trait)]
pub trait RecordStore {
    /// Write `bytes` verbatim under `id`, replacing any existing record.
    async fn write_record(&self, id: &GameId, bytes: &[u8]) -> Result<()>;
}

/// Stores each record as `<game id>.json` in a local directory.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    /// Open an existing destination directory.
    ///
    /// Fails when the path is missing, not a directory, or cannot be listed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let metadata = std::fs::metadata(&root).map_err(|error| {
            Error::Storage(format!("cannot access {}: {error}", root.display()))
        })?;
        if !metadata.is_dir() {
            return Err(Error::Storage(format!(
                "{} is not a directory",
                root.display()
            )));
        }
        std::fs::read_dir(&root).map_err(|error| {
            Error::Storage(format!("cannot list {}: {error}", root.display()))
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn record_path(&self, id: &GameId) -> Result<PathBuf> {
        Ok(self.root.join(record_file_name(id)?))
    }

    /// Number of `*.json` records currently in the directory.
    pub fn count_records(&self) -> Result<usize> {
        let mut count = 0;
        for entry in std::fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let is_record = entry
                .path()
                .extension()
                .is_some_and(|extension| extension.eq_ignore_ascii_case("json"));
            if is_record {
                count += 1;
            }
        }
        Ok(count)
    }
}

impl RecordStore for DirectoryStore {
    async fn write_record(&self, id: &GameId, bytes: &[u8]) -> Result<()> {
        let path = self.record_path(id)?;
        write_atomic(&path, bytes).await?;
        tracing::debug!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }
}

fn record_file_name(id: &GameId) -> Result<String> {
    let raw = id.as_str();
    let invalid = raw.is_empty()
        || raw == "."
        || raw == ".."
        || raw.contains(['/', '\\'])
        || raw.contains('\0');
    if invalid {
        return Err(Error::InvalidInput(format!(
            "game id {raw:?} cannot be used as a file name"
        )));
    }
    Ok(format!("{raw}.json"))
}

/// Write `bytes` to `path` through a sibling temporary file and a rename.
///
/// Readers observe either the previous contents or the complete new contents.
pub(crate) async fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temp_path = path.with_file_name(format!(".{file_name}.partial"));

    let result = async {
        let mut file = tokio::fs::File::create(&temp_path).await?;
        file.write_all(bytes).await?;
        file.sync_all().await?;
        drop(file);
        tokio::fs::rename(&temp_path, path).await
    }
    .await;

    if result.is_err() {
        let _ = tokio::fs::remove_file(&temp_path).await;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_rejects_missing_and_non_directories() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("file.txt");
        std::fs::write(&file, "x").unwrap();

        assert!(DirectoryStore::open(dir.path().join("missing")).is_err());
        assert!(DirectoryStore::open(&file).is_err());
        assert!(DirectoryStore::open(dir.path()).is_ok());
    }

    #[tokio::test]
    async fn write_record_overwrites_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirectoryStore::open(dir.path()).unwrap();
        let id = GameId::new("abc-123");

        store.write_record(&id, b"{\"v\":1}").await.unwrap();
        store.write_record(&id, b"{ \"v\" : 2 }").await.unwrap();

        let saved = std::fs::read_to_string(dir.path().join("abc-123.json")).unwrap();
        assert_eq!(saved, "{ \"v\" : 2 }");
        assert_eq!(store.count_records().unwrap(), 1);
        assert!(!dir.path().join(".abc-123.json.partial").exists());
    }

    #[tokio::test]
    async fn write_record_rejects_path_like_ids() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirectoryStore::open(dir.path()).unwrap();

        for id in ["../escape", "a/b", "..", ""] {
            let result = store.write_record(&GameId::new(id), b"{}").await;
            assert!(matches!(result, Err(Error::InvalidInput(_))), "{id}");
        }
    }

    #[test]
    fn count_records_ignores_marker_and_directories() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("latest.txt"), "a.json").unwrap();
        std::fs::write(dir.path().join("a.json"), "{}").unwrap();
        std::fs::create_dir(dir.path().join("nested.json")).unwrap();
        let store = DirectoryStore::open(dir.path()).unwrap();

        assert_eq!(store.count_records().unwrap(), 1);
    }
}
