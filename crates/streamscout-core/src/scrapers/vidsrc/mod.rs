//! Aggregator-embed scraper
//!
//! Scrapes a video-embed aggregator addressed by TMDB id. Resolving a
//! title is a chain: embed page -> opaque source id -> sources JSON ->
//! obfuscated source URL -> keystream deobfuscation -> player-host
//! handshake. Search and episode mapping delegate to TMDB, since the
//! aggregator has no index of its own.

pub mod tmdb;
pub mod vidplay;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::client::HttpClient;
use crate::error::{Error, Result};
use crate::obfuscation;
use crate::parser::embed;
use crate::scraper::Scraper;
use crate::types::{
    EpisodeMap, EpisodeSelector, Media, MediaType, Metadata, Movie, Series,
};

use tmdb::Tmdb;
use vidplay::VidPlay;

/// Production base URL of the embed aggregator
pub const VIDSRC_BASE_URL: &str = "https://vidsrc.to";

/// Source entry title of the player host this scraper can resolve
const PROVIDER_TITLE: &str = "Vidplay";

#[derive(Debug, Deserialize)]
struct SourcesResponse {
    result: Vec<SourceEntry>,
}

#[derive(Debug, Deserialize)]
struct SourceEntry {
    title: String,
    id: String,
}

#[derive(Debug, Deserialize)]
struct SourceResponse {
    result: SourceUrl,
}

#[derive(Debug, Deserialize)]
struct SourceUrl {
    url: String,
}

/// Scraper for the vidsrc embed aggregator
pub struct VidSrcScraper {
    client: Arc<HttpClient>,
    base_url: String,
    tmdb: Tmdb,
    vidplay: VidPlay,
}

impl VidSrcScraper {
    /// Create a scraper against the production hosts.
    pub fn new(client: Arc<HttpClient>) -> Self {
        let tmdb = Tmdb::new(Arc::clone(&client));
        let vidplay = VidPlay::new(Arc::clone(&client));
        Self {
            client,
            base_url: VIDSRC_BASE_URL.to_string(),
            tmdb,
            vidplay,
        }
    }

    /// Create a scraper with every upstream host overridden (tests,
    /// mirror domains).
    pub fn with_endpoints(
        client: Arc<HttpClient>,
        base_url: impl Into<String>,
        tmdb_base_url: impl Into<String>,
        vidplay_base_url: impl Into<String>,
    ) -> Self {
        let tmdb = Tmdb::with_base_url(Arc::clone(&client), tmdb_base_url);
        let vidplay = VidPlay::with_base_url(Arc::clone(&client), vidplay_base_url);
        Self {
            client,
            base_url: base_url.into(),
            tmdb,
            vidplay,
        }
    }

    fn embed_url(&self, metadata: &Metadata, selector: EpisodeSelector) -> String {
        match metadata.media_type {
            MediaType::Movie => format!("{}/embed/movie/{}", self.base_url, metadata.id),
            MediaType::Series => format!(
                "{}/embed/tv/{}/{}/{}",
                self.base_url, metadata.id, selector.season, selector.episode
            ),
        }
    }
}

#[async_trait]
impl Scraper for VidSrcScraper {
    fn id(&self) -> &'static str {
        "vidsrcto"
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Metadata>> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidUrl("Search query cannot be empty".to_string()));
        }
        self.tmdb.search(trimmed, limit).await
    }

    async fn scrape_episodes(&self, metadata: &Metadata) -> Result<EpisodeMap> {
        match metadata.media_type {
            MediaType::Movie => Ok(EpisodeMap::new()),
            MediaType::Series => self.tmdb.episodes(&metadata.id).await,
        }
    }

    async fn scrape(
        &self,
        metadata: &Metadata,
        episode: Option<EpisodeSelector>,
    ) -> Result<Media> {
        let selector = episode.unwrap_or_default();

        let embed_html = self.client.get_text(&self.embed_url(metadata, selector)).await?;
        let data_id = embed::extract_source_id(&embed_html)
            .ok_or_else(|| Error::MediaNotFound(metadata.title.clone()))?;

        let sources: SourcesResponse = self
            .client
            .get_json(&format!(
                "{}/ajax/embed/episode/{}/sources",
                self.base_url, data_id
            ))
            .await?;

        let provider_id = sources
            .result
            .into_iter()
            .find(|source| source.title == PROVIDER_TITLE)
            .map(|source| source.id)
            .ok_or_else(|| Error::MediaNotFound(metadata.title.clone()))?;

        let source: SourceResponse = self
            .client
            .get_json(&format!(
                "{}/ajax/embed/source/{}",
                self.base_url, provider_id
            ))
            .await?;

        let player_url = obfuscation::deobfuscate_url(&source.result.url)?;

        let resolved = self.vidplay.resolve_source(&player_url).await?;
        let url = resolved
            .into_iter()
            .next()
            .ok_or_else(|| Error::MediaNotFound(metadata.title.clone()))?;

        Ok(match metadata.media_type {
            MediaType::Movie => Media::Movie(Movie {
                url,
                title: metadata.title.clone(),
                referrer: None,
                year: metadata.year.clone(),
                subtitles: None,
            }),
            MediaType::Series => Media::Series(Series {
                url,
                title: metadata.title.clone(),
                referrer: None,
                episode: selector,
                subtitles: None,
            }),
        })
    }
}
