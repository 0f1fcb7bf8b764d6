//! Directory-listing scraper
//!
//! Scrapes a browsable file server whose pages are flat lists of
//! directory and file anchors. Movies live in folders named
//! `"Title (YYYY)"` holding one or more media files (and sometimes a
//! subtitle); series folders hold `"Season NN"` subfolders whose files
//! carry `SxxEyy` tags.

use std::sync::Arc;

use async_trait::async_trait;

use crate::client::HttpClient;
use crate::error::{Error, Result};
use crate::parser::listing;
use crate::scraper::Scraper;
use crate::types::{
    EpisodeMap, EpisodeSelector, Media, MediaType, Metadata, Movie, Series, SubtitleMap,
};

/// Production base URL of the file server
pub const VADAPAV_BASE_URL: &str = "https://vadapav.mov";

/// Scraper for the vadapav directory-listing file server
pub struct VadapavScraper {
    client: Arc<HttpClient>,
    base_url: String,
}

impl VadapavScraper {
    /// Create a scraper against the production site.
    pub fn new(client: Arc<HttpClient>) -> Self {
        Self::with_base_url(client, VADAPAV_BASE_URL)
    }

    /// Create a scraper against a custom base URL (mirrors, tests).
    pub fn with_base_url(client: Arc<HttpClient>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    async fn fetch_directory(&self, id: &str) -> Result<String> {
        self.client
            .get_text(&format!("{}/{}", self.base_url, id))
            .await
    }

    async fn scrape_movie(&self, metadata: &Metadata) -> Result<Media> {
        let html = self.fetch_directory(&metadata.id).await?;
        let (subtitles, files): (Vec<_>, Vec<_>) = listing::parse_file_entries(&html)?
            .into_iter()
            .partition(|entry| listing::is_subtitle(&entry.name));

        let best = listing::best_file(&files)
            .ok_or_else(|| Error::MediaNotFound(metadata.title.clone()))?;

        let subtitle_urls = subtitles.first().map(|entry| {
            let mut map = SubtitleMap::new();
            map.insert("en".to_string(), format!("{}{}", self.base_url, entry.href));
            map
        });

        Ok(Media::Movie(Movie {
            url: format!("{}{}", self.base_url, best.href),
            title: metadata.title.clone(),
            referrer: Some(self.base_url.clone()),
            year: metadata.year.clone(),
            subtitles: subtitle_urls,
        }))
    }

    async fn scrape_episode(
        &self,
        metadata: &Metadata,
        selector: EpisodeSelector,
    ) -> Result<Media> {
        let season_dir = listing::season_dir_name(selector.season);
        let tag = listing::episode_tag(selector.season, selector.episode);

        let html = self.fetch_directory(&metadata.id).await?;
        // The first directory anchor is the parent-directory link
        let season = listing::parse_directory_entries(&html)?
            .into_iter()
            .skip(1)
            .find(|entry| entry.name == season_dir)
            .ok_or_else(|| {
                Error::MediaNotFound(format!("{} {}", metadata.title, season_dir))
            })?;

        let season_html = self
            .client
            .get_text(&format!("{}{}", self.base_url, season.href))
            .await?;

        let episode_file = listing::parse_file_entries(&season_html)?
            .into_iter()
            .filter(|entry| !listing::is_subtitle(&entry.name))
            .find(|entry| entry.name.contains(&tag))
            .ok_or_else(|| Error::MediaNotFound(format!("{} {}", metadata.title, tag)))?;

        Ok(Media::Series(Series {
            url: format!("{}{}", self.base_url, episode_file.href),
            title: metadata.title.clone(),
            referrer: Some(self.base_url.clone()),
            episode: selector,
            subtitles: None,
        }))
    }
}

#[async_trait]
impl Scraper for VadapavScraper {
    fn id(&self) -> &'static str {
        "vadapav"
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Metadata>> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidUrl("Search query cannot be empty".to_string()));
        }

        let url = format!("{}/s/{}", self.base_url, urlencoding::encode(trimmed));
        let html = self.client.get_text(&url).await?;

        let results = listing::parse_directory_entries(&html)?
            .into_iter()
            .take(limit)
            .map(|entry| {
                let id = entry.href.trim_matches('/').to_string();
                // Movie folders carry their release year as a suffix
                match listing::split_title_year(&entry.name) {
                    Some((title, year)) => Metadata {
                        id,
                        title,
                        media_type: MediaType::Movie,
                        year: Some(year),
                    },
                    None => Metadata {
                        id,
                        title: entry.name,
                        media_type: MediaType::Series,
                        year: None,
                    },
                }
            })
            .collect();

        Ok(results)
    }

    async fn scrape_episodes(&self, metadata: &Metadata) -> Result<EpisodeMap> {
        if metadata.media_type == MediaType::Movie {
            return Ok(EpisodeMap::new());
        }

        let html = self.fetch_directory(&metadata.id).await?;
        let seasons: Vec<_> = listing::parse_directory_entries(&html)?
            .into_iter()
            .filter(|entry| entry.name.contains("Season"))
            .collect();

        let mut episodes = EpisodeMap::new();
        for (index, season) in seasons.iter().enumerate() {
            let season_html = self
                .client
                .get_text(&format!("{}{}", self.base_url, season.href))
                .await?;
            let count = listing::parse_file_entries(&season_html)?
                .iter()
                .filter(|entry| !listing::is_subtitle(&entry.name))
                .count();
            episodes.insert(index as u32 + 1, count as u32);
        }

        Ok(episodes)
    }

    async fn scrape(
        &self,
        metadata: &Metadata,
        episode: Option<EpisodeSelector>,
    ) -> Result<Media> {
        match metadata.media_type {
            MediaType::Movie => self.scrape_movie(metadata).await,
            MediaType::Series => {
                self.scrape_episode(metadata, episode.unwrap_or_default())
                    .await
            }
        }
    }
}
