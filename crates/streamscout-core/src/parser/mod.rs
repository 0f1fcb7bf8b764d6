//! HTML parsers for the scraped sites
//!
//! This module contains parsers for extracting data from the scraped pages:
//! - `listing`: Parse directory-listing file-server pages
//! - `embed`: Parse embed pages and token handshake responses

pub mod embed;
pub mod listing;

// Re-export main parsing functions
pub use embed::{extract_futoken_key, extract_source_id};
pub use listing::{
    best_file, episode_tag, extract_resolution, is_subtitle, parse_directory_entries,
    parse_file_entries, season_dir_name, split_title_year,
};
