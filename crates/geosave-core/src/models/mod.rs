//! Data models for geosave

mod feed;
mod game;

pub use feed::{FeedPage, RawEntry};
pub use game::{EndpointFamily, GameId, GameMode, SyncCandidate};
