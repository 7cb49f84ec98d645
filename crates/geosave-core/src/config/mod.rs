//! Sync engine configuration.
//!
//! Holds the remote endpoints and the pacing applied between requests. The
//! CLI builds a [`SyncConfig`] from its profile file and flags; everything
//! else uses [`SyncConfig::default`].

use std::time::Duration;

use crate::sync::DelayRange;
use crate::util::{is_http_url, normalize_text_option};
use crate::{Error, Result};

/// Public API serving the private activity feed.
pub const DEFAULT_API_BASE_URL: &str = "https://www.geoguessr.com/api";
/// Game server API serving full game records.
pub const DEFAULT_GAME_SERVER_BASE_URL: &str = "https://game-server.geoguessr.com/api";

/// Politeness pause between feed pages.
pub const DEFAULT_PAGE_DELAY: DelayRange =
    DelayRange::new(Duration::from_millis(1000), Duration::from_millis(2000));
/// Politeness pause between record downloads.
pub const DEFAULT_DOWNLOAD_DELAY: DelayRange =
    DelayRange::new(Duration::from_millis(1000), Duration::from_millis(3000));

/// Remote base URLs, without trailing slashes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncEndpoints {
    pub api_base_url: String,
    pub game_server_base_url: String,
}

impl Default for SyncEndpoints {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            game_server_base_url: DEFAULT_GAME_SERVER_BASE_URL.to_string(),
        }
    }
}

impl SyncEndpoints {
    /// Build endpoints from optional overrides, falling back to the defaults.
    pub fn from_overrides(
        api_base_url: Option<String>,
        game_server_base_url: Option<String>,
    ) -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            api_base_url: normalize_base_url(
                normalize_text_option(api_base_url).unwrap_or(defaults.api_base_url),
                "api_base_url",
            )?,
            game_server_base_url: normalize_base_url(
                normalize_text_option(game_server_base_url)
                    .unwrap_or(defaults.game_server_base_url),
                "game_server_base_url",
            )?,
        })
    }

    pub fn feed_url(&self) -> String {
        format!("{}/v4/feed/private", self.api_base_url)
    }
}

/// Tunables for one sync run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    pub endpoints: SyncEndpoints,
    pub page_delay: DelayRange,
    pub download_delay: DelayRange,
    /// Stop paginating after this many pages. `None` walks the whole feed.
    pub max_pages: Option<u32>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            endpoints: SyncEndpoints::default(),
            page_delay: DEFAULT_PAGE_DELAY,
            download_delay: DEFAULT_DOWNLOAD_DELAY,
            max_pages: None,
        }
    }
}

impl SyncConfig {
    /// Disable every politeness pause. Intended for tests and local mirrors.
    #[must_use]
    pub const fn without_delays(mut self) -> Self {
        self.page_delay = DelayRange::ZERO;
        self.download_delay = DelayRange::ZERO;
        self
    }
}

fn normalize_base_url(raw: String, field: &str) -> Result<String> {
    let value = raw.trim();
    if is_http_url(value) {
        Ok(value.trim_end_matches('/').to_string())
    } else {
        Err(Error::InvalidInput(format!(
            "{field} must include http:// or https://"
        )))
    }
}
