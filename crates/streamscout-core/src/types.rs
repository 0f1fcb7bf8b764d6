//! Data types for streamscout
//!
//! This module contains the core data structures shared by all scrapers.
//! All types implement Serialize and Deserialize for JSON compatibility
//! with host frontends.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Kind of media a search result refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaType {
    /// Feature film with a single playable file
    Movie,
    /// Multi-episode series organized into seasons
    Series,
}

/// Search result handle returned by [`Scraper::search`](crate::Scraper::search)
///
/// The `id` is scraper-specific and opaque: a directory id for
/// file-server scrapers, a TMDB id for embed scrapers. It is only
/// meaningful when passed back to the scraper that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    /// Scraper-specific identifier
    pub id: String,
    /// Display title
    pub title: String,
    /// Whether this is a movie or a series
    pub media_type: MediaType,
    /// Release year, when the source exposes one
    pub year: Option<String>,
}

/// Identifies a (season, episode) pair for series lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeSelector {
    /// Season number (1-based)
    pub season: u32,
    /// Episode number within the season (1-based)
    pub episode: u32,
}

impl EpisodeSelector {
    /// Create a selector for a specific season and episode
    pub fn new(season: u32, episode: u32) -> Self {
        Self { season, episode }
    }
}

impl Default for EpisodeSelector {
    /// The first episode of the first season
    fn default() -> Self {
        Self {
            season: 1,
            episode: 1,
        }
    }
}

/// Map of language tag to subtitle file URL
pub type SubtitleMap = BTreeMap<String, String>;

/// Map of season number to episode count, ordered by season
pub type EpisodeMap = BTreeMap<u32, u32>;

/// A resolved, directly playable movie
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    /// Direct media URL
    pub url: String,
    /// Display title
    pub title: String,
    /// Referrer header some hosts require for playback
    pub referrer: Option<String>,
    /// Release year
    pub year: Option<String>,
    /// Subtitle URLs by language tag
    pub subtitles: Option<SubtitleMap>,
}

/// A resolved, directly playable series episode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Series {
    /// Direct media URL for the selected episode
    pub url: String,
    /// Display title of the series
    pub title: String,
    /// Referrer header some hosts require for playback
    pub referrer: Option<String>,
    /// The episode this URL plays
    pub episode: EpisodeSelector,
    /// Subtitle URLs by language tag
    pub subtitles: Option<SubtitleMap>,
}

/// Return shape of [`Scraper::scrape`](crate::Scraper::scrape)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Media {
    /// A playable movie
    Movie(Movie),
    /// A playable series episode
    Series(Series),
}

impl Media {
    /// Direct media URL of the resolved item
    pub fn url(&self) -> &str {
        match self {
            Media::Movie(movie) => &movie.url,
            Media::Series(series) => &series.url,
        }
    }

    /// Display title of the resolved item
    pub fn title(&self) -> &str {
        match self {
            Media::Movie(movie) => &movie.title,
            Media::Series(series) => &series.title,
        }
    }

    /// Referrer header required for playback, if any
    pub fn referrer(&self) -> Option<&str> {
        match self {
            Media::Movie(movie) => movie.referrer.as_deref(),
            Media::Series(series) => series.referrer.as_deref(),
        }
    }
}
