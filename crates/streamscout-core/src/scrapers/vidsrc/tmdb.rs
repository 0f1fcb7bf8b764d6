//! TheMovieDB lookup helper
//!
//! The embed aggregator is addressed by TMDB id, so search and episode
//! mapping go through the TMDB v3 REST API rather than the aggregator
//! itself.

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Deserialize;

use crate::client::HttpClient;
use crate::error::Result;
use crate::types::{EpisodeMap, MediaType, Metadata};

/// Production base URL of the TMDB v3 API
pub const TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Bundled API key, shipped base64-wrapped as the upstream plugin
/// distributes it
const API_KEY_B64: &str = "ZDM5MjQ1ZTExMTk0N2ViOTJiOTQ3ZTNhOGFhY2M4OWY=";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<SearchEntry>,
}

#[derive(Debug, Deserialize)]
struct SearchEntry {
    id: u64,
    media_type: Option<String>,
    title: Option<String>,
    name: Option<String>,
    release_date: Option<String>,
    first_air_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TvDetail {
    #[serde(default)]
    seasons: Vec<TvSeason>,
}

#[derive(Debug, Deserialize)]
struct TvSeason {
    season_number: u32,
    #[serde(default)]
    episode_count: u32,
}

/// Client for the TMDB search and TV-detail endpoints
pub struct Tmdb {
    client: Arc<HttpClient>,
    base_url: String,
    api_key: String,
}

impl Tmdb {
    /// Create a helper against the production API.
    pub fn new(client: Arc<HttpClient>) -> Self {
        Self::with_base_url(client, TMDB_BASE_URL)
    }

    /// Create a helper against a custom base URL (tests).
    pub fn with_base_url(client: Arc<HttpClient>, base_url: impl Into<String>) -> Self {
        let api_key = String::from_utf8(STANDARD.decode(API_KEY_B64).unwrap()).unwrap();
        Self {
            client,
            base_url: base_url.into(),
            api_key,
        }
    }

    /// Search movies and TV series by title.
    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<Metadata>> {
        let url = format!(
            "{}/search/multi?api_key={}&query={}",
            self.base_url,
            self.api_key,
            urlencoding::encode(query)
        );
        let response: SearchResponse = self.client.get_json(&url).await?;

        Ok(response
            .results
            .into_iter()
            .filter_map(entry_to_metadata)
            .take(limit)
            .collect())
    }

    /// Map a series id to its season -> episode-count structure.
    ///
    /// TMDB lists specials as season 0; they are skipped.
    pub async fn episodes(&self, series_id: &str) -> Result<EpisodeMap> {
        let url = format!("{}/tv/{}?api_key={}", self.base_url, series_id, self.api_key);
        let detail: TvDetail = self.client.get_json(&url).await?;

        Ok(detail
            .seasons
            .into_iter()
            .filter(|season| season.season_number > 0)
            .map(|season| (season.season_number, season.episode_count))
            .collect())
    }
}

fn entry_to_metadata(entry: SearchEntry) -> Option<Metadata> {
    let media_type = match entry.media_type.as_deref() {
        Some("movie") => MediaType::Movie,
        Some("tv") => MediaType::Series,
        // People and other result kinds are not playable
        _ => return None,
    };

    let title = entry.title.or(entry.name)?;

    let year = entry
        .release_date
        .or(entry.first_air_date)
        .and_then(|date| date.split('-').next().map(str::to_string))
        .filter(|year| !year.is_empty());

    Some(Metadata {
        id: entry.id.to_string(),
        title,
        media_type,
        year,
    })
}
