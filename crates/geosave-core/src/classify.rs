//! Extraction of game references from raw feed entries.
//!
//! A feed entry's payload is a JSON document (usually string-encoded) holding
//! either one object or a batch of objects. Each object is decoded as one of
//! two game reference shapes or ignored:
//!
//! - direct: `{"gameId": …, "gameMode": …}`, timed by the entry
//! - wrapped: `{"time": …, "payload": {"gameId": …, "gameMode": …}}`, timed by
//!   the wrapper when it carries a time, otherwise by the entry

use serde::Deserialize;
use serde_json::Value;

use crate::checkpoint::Checkpoint;
use crate::models::{GameId, GameMode, RawEntry, SyncCandidate};
use crate::Result;

/// Outcome of classifying one feed entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// References found before the checkpoint, in payload order.
    pub candidates: Vec<SyncCandidate>,
    /// The checkpointed game appeared in this entry; nothing older is new.
    pub reached_checkpoint: bool,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PayloadShape {
    Batch(Vec<Value>),
    Single(Value),
}

#[derive(Debug, Deserialize)]
struct DirectRef {
    #[serde(rename = "gameId")]
    game_id: GameId,
    #[serde(default, rename = "gameMode")]
    game_mode: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WrappedRef {
    #[serde(default)]
    time: Option<String>,
    payload: DirectRef,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GameRef {
    Direct(DirectRef),
    Wrapped(WrappedRef),
    Unrelated(serde::de::IgnoredAny),
}

/// Classify one entry against the checkpoint.
///
/// Returns an error only when the payload is not decodable JSON; the caller
/// treats that entry as producing no candidates.
pub fn classify_entry(entry: &RawEntry, checkpoint: &Checkpoint) -> Result<Classification> {
    let mut classification = Classification {
        candidates: Vec::new(),
        reached_checkpoint: false,
    };

    for item in normalize_payload(&entry.payload)? {
        let Some((id, mode, time)) = decode_reference(item, &entry.time) else {
            continue;
        };

        if checkpoint.is_boundary(&id) {
            classification.reached_checkpoint = true;
            break;
        }

        classification
            .candidates
            .push(SyncCandidate::new(id, time, GameMode::parse(&mode)));
    }

    Ok(classification)
}

fn normalize_payload(payload: &Value) -> Result<Vec<Value>> {
    let shape: PayloadShape = match payload {
        Value::String(encoded) => serde_json::from_str(encoded)?,
        other => PayloadShape::deserialize(other)?,
    };

    Ok(match shape {
        PayloadShape::Batch(items) => items,
        PayloadShape::Single(item) => vec![item],
    })
}

fn decode_reference(item: Value, entry_time: &str) -> Option<(GameId, String, String)> {
    match serde_json::from_value::<GameRef>(item).ok()? {
        GameRef::Direct(reference) => Some((
            reference.game_id,
            reference.game_mode.unwrap_or_default(),
            entry_time.to_string(),
        )),
        GameRef::Wrapped(wrapper) => Some((
            wrapper.payload.game_id,
            wrapper.payload.game_mode.unwrap_or_default(),
            wrapper.time.unwrap_or_else(|| entry_time.to_string()),
        )),
        GameRef::Unrelated(_) => None,
    }
}
