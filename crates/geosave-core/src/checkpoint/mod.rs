//! Durable "last saved game" marker.
//!
//! The marker lives in `latest.txt` inside the destination directory and holds
//! the file name of the most recently saved record (`<game id>.json`). It is
//! rewritten after every individual save so an interrupted run loses at most
//! the game that was in flight.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::models::GameId;
use crate::storage::write_atomic;
use crate::{Error, Result};

/// Marker file name inside the destination directory.
pub const MARKER_FILE_NAME: &str = "latest.txt";

const RECORD_EXTENSION: &str = ".json";

/// Position of the last successfully saved game.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Checkpoint {
    /// Nothing saved yet; sync walks the whole feed.
    #[default]
    Start,
    Saved(GameId),
}

impl Checkpoint {
    /// Parse marker file contents.
    pub fn from_marker(contents: &str) -> Self {
        let trimmed = contents.trim();
        let id = strip_record_extension(trimmed);
        if id.is_empty() {
            Self::Start
        } else {
            Self::Saved(GameId::new(id))
        }
    }

    /// Marker file contents for a saved game.
    pub fn marker_contents(id: &GameId) -> String {
        format!("{id}{RECORD_EXTENSION}")
    }

    pub const fn game_id(&self) -> Option<&GameId> {
        match self {
            Self::Start => None,
            Self::Saved(id) => Some(id),
        }
    }

    /// Whether `id` is the game this checkpoint points at.
    pub fn is_boundary(&self, id: &GameId) -> bool {
        self.game_id() == Some(id)
    }
}

impl fmt::Display for Checkpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("none"),
            Self::Saved(id) => f.write_str(id.short()),
        }
    }
}

fn strip_record_extension(value: &str) -> &str {
    let split = value.len().saturating_sub(RECORD_EXTENSION.len());
    match (value.get(..split), value.get(split..)) {
        (Some(stem), Some(extension)) if extension.eq_ignore_ascii_case(RECORD_EXTENSION) => stem,
        _ => value,
    }
}

/// Storage for the sync checkpoint (async)
#[allow(async_fn_in_trait)]
pub trait CheckpointStore {
    /// Read the marker; `Ok(None)` when no marker exists yet.
    async fn read(&self) -> Result<Option<Checkpoint>>;

    /// Create an empty marker (meaning [`Checkpoint::Start`]).
    async fn initialize(&self) -> Result<()>;

    /// Point the marker at `id`. Must be atomic from the reader's perspective.
    async fn write(&self, id: &GameId) -> Result<()>;
}

/// `latest.txt` marker inside a destination directory.
#[derive(Debug, Clone)]
pub struct FileCheckpointStore {
    path: PathBuf,
}

impl FileCheckpointStore {
    pub fn new(directory: &Path) -> Self {
        Self {
            path: directory.join(MARKER_FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CheckpointStore for FileCheckpointStore {
    async fn read(&self) -> Result<Option<Checkpoint>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => Ok(Some(Checkpoint::from_marker(&contents))),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(Error::Checkpoint(format!(
                "failed to read {}: {error}",
                self.path.display()
            ))),
        }
    }

    async fn initialize(&self) -> Result<()> {
        write_atomic(&self.path, b"").await.map_err(|error| {
            Error::Checkpoint(format!(
                "failed to create {}: {error}",
                self.path.display()
            ))
        })?;
        tracing::info!("Created checkpoint marker {}", self.path.display());
        Ok(())
    }

    async fn write(&self, id: &GameId) -> Result<()> {
        let contents = Checkpoint::marker_contents(id);
        write_atomic(&self.path, contents.as_bytes())
            .await
            .map_err(|error| {
                Error::Checkpoint(format!(
                    "failed to update {}: {error}",
                    self.path.display()
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn marker_parsing_strips_extension_and_whitespace() {
        assert_eq!(
            Checkpoint::from_marker(" abc-1.json\n"),
            Checkpoint::Saved(GameId::new("abc-1"))
        );
        assert_eq!(
            Checkpoint::from_marker("abc-1.JSON"),
            Checkpoint::Saved(GameId::new("abc-1"))
        );
        assert_eq!(
            Checkpoint::from_marker("abc-1"),
            Checkpoint::Saved(GameId::new("abc-1"))
        );
        assert_eq!(Checkpoint::from_marker("  \n"), Checkpoint::Start);
    }

    #[test]
    fn start_checkpoint_never_matches() {
        assert!(!Checkpoint::Start.is_boundary(&GameId::new("")));
        assert!(Checkpoint::Saved(GameId::new("x")).is_boundary(&GameId::new("x")));
    }

    #[tokio::test]
    async fn missing_marker_reads_as_none_until_initialized() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCheckpointStore::new(dir.path());

        assert_eq!(store.read().await.unwrap(), None);
        store.initialize().await.unwrap();
        assert_eq!(store.read().await.unwrap(), Some(Checkpoint::Start));
    }

    #[tokio::test]
    async fn write_replaces_marker_with_record_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCheckpointStore::new(dir.path());

        store.write(&GameId::new("first")).await.unwrap();
        store.write(&GameId::new("second")).await.unwrap();

        let raw = std::fs::read_to_string(dir.path().join(MARKER_FILE_NAME)).unwrap();
        assert_eq!(raw, "second.json");
        assert_eq!(
            store.read().await.unwrap(),
            Some(Checkpoint::Saved(GameId::new("second")))
        );
    }

    #[tokio::test]
    async fn unreadable_marker_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(MARKER_FILE_NAME)).unwrap();
        let store = FileCheckpointStore::new(dir.path());

        assert!(matches!(store.read().await, Err(Error::Checkpoint(_))));
    }
}
