//! Feed walk from the newest page back to the checkpoint.

use crate::api::FeedSource;
use crate::checkpoint::Checkpoint;
use crate::classify::classify_entry;
use crate::models::SyncCandidate;

use super::pacing::{delay, DelayRange};
use super::report::{Notifier, Severity};

/// Pagination limits for one walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginateOptions {
    pub page_delay: DelayRange,
    pub max_pages: Option<u32>,
}

/// Collect every candidate newer than `checkpoint`, in discovery order.
///
/// Stops at the checkpoint, at the end of the feed, or after `max_pages`.
/// A failed page fetch ends the walk early; candidates gathered before the
/// failure are still returned.
pub async fn collect_candidates<F, N>(
    feed: &F,
    checkpoint: &Checkpoint,
    options: PaginateOptions,
    notifier: &N,
) -> Vec<SyncCandidate>
where
    F: FeedSource,
    N: Notifier,
{
    let mut candidates = Vec::new();
    let mut cursor: Option<String> = None;
    let mut page_number = 0u32;

    loop {
        page_number += 1;
        if options.max_pages.is_some_and(|limit| page_number > limit) {
            tracing::info!("Reached page limit of {}", page_number - 1);
            break;
        }

        if cursor.is_some() {
            notifier.notify(
                &format!("Fetching games... (page {page_number})"),
                Severity::Info,
            );
        } else {
            notifier.notify("Fetching games...", Severity::Info);
        }

        let page = match feed.fetch_feed_page(cursor.as_deref()).await {
            Ok(page) => page,
            Err(error) => {
                tracing::warn!(
                    "Failed to fetch feed page {page_number}, keeping {} candidate(s): {error}",
                    candidates.len()
                );
                break;
            }
        };
        tracing::debug!(
            "Feed page {page_number} returned {} entries",
            page.entries.len()
        );

        let mut reached_checkpoint = false;
        for (index, entry) in page.entries.iter().enumerate() {
            match classify_entry(entry, checkpoint) {
                Ok(classification) => {
                    candidates.extend(classification.candidates);
                    if classification.reached_checkpoint {
                        reached_checkpoint = true;
                        break;
                    }
                }
                Err(error) => {
                    tracing::warn!(
                        "Skipping malformed feed entry {index} on page {page_number}: {error}"
                    );
                }
            }
        }

        if reached_checkpoint {
            tracing::debug!("Reached checkpoint {checkpoint} on page {page_number}");
            break;
        }

        let Some(next_cursor) = page.next_cursor() else {
            tracing::debug!("Feed exhausted after {page_number} page(s)");
            break;
        };
        cursor = Some(next_cursor.to_string());

        delay(options.page_delay).await;
    }

    candidates
}
