//! `reqwest` client for the GeoGuessr feed and game server APIs.

use reqwest::header::{ACCEPT, COOKIE};
use reqwest::StatusCode;
use serde::Deserialize;

use super::{ApiError, ApiResult, FeedSource, RecordSource};
use crate::config::SyncEndpoints;
use crate::models::{EndpointFamily, FeedPage, GameId};
use crate::util::compact_text;

/// Cookie carrying the logged-in session.
pub const SESSION_COOKIE_NAME: &str = "_ncfa";

#[derive(Clone)]
pub struct GeoGuessrClient {
    endpoints: SyncEndpoints,
    session_cookie: String,
    client: reqwest::Client,
}

impl std::fmt::Debug for GeoGuessrClient {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("GeoGuessrClient")
            .field("endpoints", &self.endpoints)
            .field("session_cookie", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl GeoGuessrClient {
    pub fn new(endpoints: SyncEndpoints, session_cookie: &str) -> ApiResult<Self> {
        let session_cookie = session_cookie.trim();
        if session_cookie.is_empty() {
            return Err(ApiError::InvalidConfiguration(
                "session cookie must not be empty".to_string(),
            ));
        }

        Ok(Self {
            endpoints,
            session_cookie: session_cookie.to_string(),
            client: reqwest::Client::builder()
                .user_agent(concat!("geosave/", env!("CARGO_PKG_VERSION")))
                .build()?,
        })
    }

    /// Full record URL for a game.
    pub fn record_url(&self, id: &GameId, family: EndpointFamily) -> String {
        format!(
            "{}/{}/{}",
            self.endpoints.game_server_base_url,
            family.path_segment(),
            id
        )
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .get(url)
            .header(COOKIE, format!("{SESSION_COOKIE_NAME}={}", self.session_cookie))
            .header(ACCEPT, "application/json")
    }
}

impl FeedSource for GeoGuessrClient {
    async fn fetch_feed_page(&self, cursor: Option<&str>) -> ApiResult<FeedPage> {
        let mut request = self.get(&self.endpoints.feed_url());
        if let Some(cursor) = cursor {
            request = request.query(&[("paginationToken", cursor)]);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Api(parse_api_error(status, &body)));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|error| {
            ApiError::InvalidPayload(format!("feed page could not be decoded: {error}"))
        })
    }
}

impl RecordSource for GeoGuessrClient {
    async fn fetch_record(&self, id: &GameId, family: EndpointFamily) -> ApiResult<Vec<u8>> {
        let response = self.get(&self.record_url(id, family)).send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Api(parse_api_error(status, &body)));
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: Option<String>,
    message: Option<String>,
}

fn parse_api_error(status: StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<ApiErrorBody>(body) {
        if let Some(message) = payload.message.or(payload.error) {
            return format!("{} ({})", message.trim(), status.as_u16());
        }
    }

    let trimmed = compact_text(body);
    if trimmed.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        format!("{} ({})", trimmed, status.as_u16())
    }
}
