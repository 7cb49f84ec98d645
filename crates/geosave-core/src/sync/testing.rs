//! In-memory fakes of the engine's capabilities.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;

use serde_json::{json, Value};

use crate::api::{ApiError, ApiResult, FeedSource, RecordSource};
use crate::checkpoint::{Checkpoint, CheckpointStore};
use crate::models::{EndpointFamily, FeedPage, GameId, RawEntry};
use crate::storage::RecordStore;
use crate::{Error, Result};

use super::report::{Notifier, Severity};

pub fn game_entry(id: &str, time: &str, mode: &str) -> RawEntry {
    RawEntry::new(
        time,
        Value::String(json!({"gameId": id, "gameMode": mode}).to_string()),
    )
}

pub fn page(entries: Vec<RawEntry>, next_cursor: Option<&str>) -> FeedPage {
    FeedPage {
        entries,
        next_cursor: next_cursor.map(ToString::to_string),
    }
}

/// Feed and record server serving canned responses.
#[derive(Default)]
pub struct FakeRemote {
    pages: Mutex<VecDeque<std::result::Result<FeedPage, String>>>,
    records: HashMap<String, std::result::Result<Vec<u8>, String>>,
    requested_cursors: Mutex<Vec<Option<String>>>,
    fetched_records: Mutex<Vec<(GameId, EndpointFamily)>>,
}

impl FakeRemote {
    pub fn with_page(self, page: FeedPage) -> Self {
        self.pages.lock().unwrap().push_back(Ok(page));
        self
    }

    pub fn with_page_error(self, message: &str) -> Self {
        self.pages.lock().unwrap().push_back(Err(message.to_string()));
        self
    }

    pub fn with_record(mut self, id: &str, body: &[u8]) -> Self {
        self.records.insert(id.to_string(), Ok(body.to_vec()));
        self
    }

    pub fn with_record_error(mut self, id: &str, message: &str) -> Self {
        self.records.insert(id.to_string(), Err(message.to_string()));
        self
    }

    pub fn requested_cursors(&self) -> Vec<Option<String>> {
        self.requested_cursors.lock().unwrap().clone()
    }

    pub fn fetched_records(&self) -> Vec<(GameId, EndpointFamily)> {
        self.fetched_records.lock().unwrap().clone()
    }
}

impl FeedSource for FakeRemote {
    async fn fetch_feed_page(&self, cursor: Option<&str>) -> ApiResult<FeedPage> {
        self.requested_cursors
            .lock()
            .unwrap()
            .push(cursor.map(ToString::to_string));
        match self.pages.lock().unwrap().pop_front() {
            Some(Ok(page)) => Ok(page),
            Some(Err(message)) => Err(ApiError::Api(message)),
            None => Ok(FeedPage::default()),
        }
    }
}

impl RecordSource for FakeRemote {
    async fn fetch_record(&self, id: &GameId, family: EndpointFamily) -> ApiResult<Vec<u8>> {
        self.fetched_records
            .lock()
            .unwrap()
            .push((id.clone(), family));
        match self.records.get(id.as_str()) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(message)) => Err(ApiError::Api(message.clone())),
            None => Err(ApiError::Api(format!("HTTP 404 for {id}"))),
        }
    }
}

#[derive(Default)]
pub struct MemoryCheckpoint {
    value: Mutex<Option<Checkpoint>>,
    writes: Mutex<Vec<String>>,
    initialized: Mutex<bool>,
    fail_writes: bool,
}

impl MemoryCheckpoint {
    pub fn with(checkpoint: Checkpoint) -> Self {
        Self {
            value: Mutex::new(Some(checkpoint)),
            ..Self::default()
        }
    }

    pub fn failing_writes() -> Self {
        Self {
            value: Mutex::new(Some(Checkpoint::Start)),
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn current(&self) -> Option<Checkpoint> {
        self.value.lock().unwrap().clone()
    }

    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().unwrap().clone()
    }

    pub fn was_initialized(&self) -> bool {
        *self.initialized.lock().unwrap()
    }
}

impl CheckpointStore for MemoryCheckpoint {
    async fn read(&self) -> Result<Option<Checkpoint>> {
        Ok(self.current())
    }

    async fn initialize(&self) -> Result<()> {
        *self.initialized.lock().unwrap() = true;
        *self.value.lock().unwrap() = Some(Checkpoint::Start);
        Ok(())
    }

    async fn write(&self, id: &GameId) -> Result<()> {
        if self.fail_writes {
            return Err(Error::Checkpoint("disk full".to_string()));
        }
        self.writes.lock().unwrap().push(id.to_string());
        *self.value.lock().unwrap() = Some(Checkpoint::Saved(id.clone()));
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryRecords {
    saved: Mutex<Vec<(String, Vec<u8>)>>,
    failing: HashSet<String>,
}

impl MemoryRecords {
    pub fn failing_for(ids: &[&str]) -> Self {
        Self {
            failing: ids.iter().map(ToString::to_string).collect(),
            ..Self::default()
        }
    }

    pub fn saved_ids(&self) -> Vec<String> {
        self.saved
            .lock()
            .unwrap()
            .iter()
            .map(|(id, _)| id.clone())
            .collect()
    }

    pub fn saved_body(&self, id: &str) -> Option<Vec<u8>> {
        self.saved
            .lock()
            .unwrap()
            .iter()
            .find(|(saved_id, _)| saved_id == id)
            .map(|(_, body)| body.clone())
    }
}

impl RecordStore for MemoryRecords {
    async fn write_record(&self, id: &GameId, bytes: &[u8]) -> Result<()> {
        if self.failing.contains(id.as_str()) {
            return Err(Error::Storage(format!("cannot write {id}")));
        }
        self.saved
            .lock()
            .unwrap()
            .push((id.to_string(), bytes.to_vec()));
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<(Severity, String)>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|(_, message)| message.clone())
            .collect()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|(level, _)| *level == severity)
            .count()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        self.events
            .lock()
            .unwrap()
            .push((severity, message.to_string()));
    }
}
