//! Remote transports consumed by the sync engine.

mod client;

use thiserror::Error;

use crate::models::{EndpointFamily, FeedPage, GameId};

pub use client::{GeoGuessrClient, SESSION_COOKIE_NAME};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid API configuration: {0}")]
    InvalidConfiguration(String),
    #[error("API request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error: {0}")]
    Api(String),
    #[error("Invalid API payload: {0}")]
    InvalidPayload(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Authenticated, cursor-paginated activity feed (async)
#[allow(async_fn_in_trait)]
pub trait FeedSource {
    /// Fetch the page after `cursor`; `None` requests the newest page.
    async fn fetch_feed_page(&self, cursor: Option<&str>) -> ApiResult<FeedPage>;
}

/// Authenticated access to full game records (async)
#[allow(async_fn_in_trait)]
pub trait RecordSource {
    /// Fetch the raw record body for `id` from the given endpoint family.
    async fn fetch_record(&self, id: &GameId, family: EndpointFamily) -> ApiResult<Vec<u8>>;
}
