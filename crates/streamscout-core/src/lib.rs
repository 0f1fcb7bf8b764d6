//! streamscout core library
//!
//! This crate provides content-source scrapers for a command-line
//! movie/TV player. Each scraper resolves a user search query against a
//! third-party content index and returns a direct playable media URL
//! plus metadata (title, year, subtitles, episode mapping).
//!
//! # Features
//! - Search movies and series across heterogeneous sources
//! - Season -> episode-count mapping for series
//! - Direct playable URL resolution, including deobfuscation of masked
//!   embed sources
//! - Rate-limited HTTP client to avoid server overload

pub mod client;
pub mod error;
pub mod obfuscation;
pub mod parser;
pub mod registry;
pub mod scraper;
pub mod scrapers;
pub mod types;

// Re-export main types for convenience
pub use client::{ClientConfig, HttpClient, RateLimiter};
pub use error::{Error, Result};
pub use registry::{ScraperRegistry, DEFAULT_SCRAPER};
pub use scraper::{Scraper, DEFAULT_SEARCH_LIMIT};
pub use scrapers::{VadapavScraper, VidSrcScraper};
pub use types::{
    EpisodeMap, EpisodeSelector, Media, MediaType, Metadata, Movie, Series, SubtitleMap,
};
