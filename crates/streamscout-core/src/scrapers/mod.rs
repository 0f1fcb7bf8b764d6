//! Content-source scrapers
//!
//! Each submodule targets one third-party content index:
//! - `vadapav`: a browsable directory-listing file server
//! - `vidsrc`: a video-embed aggregator addressed by TMDB id

pub mod vadapav;
pub mod vidsrc;

pub use vadapav::VadapavScraper;
pub use vidsrc::VidSrcScraper;
