//! The scraper capability set
//!
//! Every content source implements the same three operations: resolve a
//! text query to candidate media, map out the episodes of a series, and
//! turn a candidate into a direct playable URL. The host player only
//! ever talks to `dyn Scraper`, so sources are interchangeable.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{EpisodeMap, EpisodeSelector, Media, Metadata};

/// Search result count requested when the caller has no preference
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Common capability set of all content scrapers
#[async_trait]
pub trait Scraper: Send + Sync {
    /// Registry name of this scraper (e.g. `"vadapav"`)
    fn id(&self) -> &'static str;

    /// Resolve a user query against the content index.
    ///
    /// Returns at most `limit` results. An empty or whitespace-only
    /// query is rejected with `Error::InvalidUrl` before any network
    /// call.
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Metadata>>;

    /// Map out the episode structure of a series.
    ///
    /// Returns season number -> episode count. Movies have no episode
    /// structure and yield an empty map.
    async fn scrape_episodes(&self, metadata: &Metadata) -> Result<EpisodeMap>;

    /// Resolve a search result to a direct playable URL.
    ///
    /// For series, `episode` selects the target; `None` defaults to
    /// S01E01. Any stage that cannot locate its target raises
    /// `Error::MediaNotFound`.
    async fn scrape(&self, metadata: &Metadata, episode: Option<EpisodeSelector>)
        -> Result<Media>;
}
