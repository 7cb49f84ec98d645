//! Game reference model

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Canonical game identifier.
///
/// Feed payloads carry ids either as strings or as numbers; both are
/// normalized to their string form and compared exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct GameId(String);

impl GameId {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First dash-separated segment, used in progress messages.
    #[must_use]
    pub fn short(&self) -> &str {
        self.0.split('-').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GameId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for GameId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => Self(text),
            RawId::Number(number) => Self(number.to_string()),
        })
    }
}

/// Game modes reported by the activity feed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameMode {
    Duels,
    TeamDuels,
    BattleRoyaleDistance,
    BattleRoyaleCountries,
    /// Any mode without a download endpoint. Empty when the feed omitted it.
    Other(String),
}

impl GameMode {
    pub fn parse(value: &str) -> Self {
        match value {
            "Duels" => Self::Duels,
            "TeamDuels" => Self::TeamDuels,
            "BattleRoyaleDistance" => Self::BattleRoyaleDistance,
            "BattleRoyaleCountries" => Self::BattleRoyaleCountries,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Duels => "Duels",
            Self::TeamDuels => "TeamDuels",
            Self::BattleRoyaleDistance => "BattleRoyaleDistance",
            Self::BattleRoyaleCountries => "BattleRoyaleCountries",
            Self::Other(name) => name,
        }
    }

    /// Endpoint family serving full records for this mode.
    pub const fn endpoint_family(&self) -> Option<EndpointFamily> {
        match self {
            Self::Duels | Self::TeamDuels => Some(EndpointFamily::Duels),
            Self::BattleRoyaleDistance | Self::BattleRoyaleCountries => {
                Some(EndpointFamily::BattleRoyale)
            }
            Self::Other(_) => None,
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Game server route groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndpointFamily {
    /// Head-to-head modes.
    Duels,
    /// Battle royale modes.
    BattleRoyale,
}

impl EndpointFamily {
    /// Path segment under the game server base URL.
    pub const fn path_segment(self) -> &'static str {
        match self {
            Self::Duels => "duels",
            Self::BattleRoyale => "battle-royale",
        }
    }
}

/// A remote game not yet saved locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncCandidate {
    pub id: GameId,
    /// ISO-8601 timestamp as reported by the feed.
    pub timestamp: String,
    pub mode: GameMode,
}

impl SyncCandidate {
    #[must_use]
    pub fn new(id: impl Into<GameId>, timestamp: impl Into<String>, mode: GameMode) -> Self {
        Self {
            id: id.into(),
            timestamp: timestamp.into(),
            mode,
        }
    }

    /// Parsed timestamp used for download ordering.
    ///
    /// Accepts RFC 3339 as well as ISO 8601 forms without seconds or without
    /// an offset; offset-less times are read as UTC. `None` sorts before every
    /// parsed value.
    pub fn sort_key(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.timestamp)
    }
}

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M%:z", "%Y-%m-%dT%H:%M%z"];
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.with_timezone(&Utc));
    }
    if let Some(timestamp) = OFFSET_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(raw, format).ok())
    {
        return Some(timestamp.with_timezone(&Utc));
    }

    let naive = raw
        .strip_suffix('Z')
        .or_else(|| raw.strip_suffix('z'))
        .unwrap_or(raw);
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(naive, format).ok())
        .map(|timestamp| timestamp.and_utc())
}
