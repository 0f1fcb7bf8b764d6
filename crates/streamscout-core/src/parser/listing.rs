//! Directory-listing parser
//!
//! Parses HTML from browsable file-server pages. Every page is a flat
//! list of anchors: `a.directory-entry` for folders and `a.file-entry`
//! for files. File anchors may carry the real download path in a
//! `data-href` attribute instead of `href`.

use scraper::{Html, Selector};

use crate::error::{Error, Result};

/// A single anchor in a browsable file index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Display name (the anchor text)
    pub name: String,
    /// Relative path, taken from `data-href` when present
    pub href: String,
}

/// Parse all directory entries (folders) from a listing page.
pub fn parse_directory_entries(html: &str) -> Result<Vec<Entry>> {
    parse_entries(html, "a.directory-entry")
}

/// Parse all file entries from a listing page.
pub fn parse_file_entries(html: &str) -> Result<Vec<Entry>> {
    parse_entries(html, "a.file-entry")
}

fn parse_entries(html: &str, selector_str: &str) -> Result<Vec<Entry>> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(selector_str)
        .map_err(|e| Error::Parse(format!("Invalid selector: {e:?}")))?;

    let mut entries = Vec::new();
    for element in document.select(&selector) {
        let href = element
            .value()
            .attr("data-href")
            .or_else(|| element.value().attr("href"));
        let Some(href) = href else { continue };

        let name = element.text().collect::<String>().trim().to_string();
        if name.is_empty() {
            continue;
        }

        entries.push(Entry {
            name,
            href: href.to_string(),
        });
    }

    Ok(entries)
}

/// Whether a file entry is a subtitle file rather than playable media.
pub fn is_subtitle(name: &str) -> bool {
    name.ends_with(".srt")
}

/// Split a `"Title (YYYY)"` directory name into title and year.
///
/// On this site every movie folder is suffixed with its release year,
/// so the suffix is an inexpensive way to tell movies from series.
///
/// # Examples
/// ```
/// use streamscout_core::parser::split_title_year;
///
/// assert_eq!(
///     split_title_year("Heat (1995)"),
///     Some(("Heat".to_string(), "1995".to_string()))
/// );
/// assert_eq!(split_title_year("The Wire"), None);
/// ```
pub fn split_title_year(name: &str) -> Option<(String, String)> {
    let re = regex_lite::Regex::new(r"^(.*)\((\d{4})\)$").ok()?;
    let caps = re.captures(name)?;
    let title = caps.get(1)?.as_str().trim_end().to_string();
    let year = caps.get(2)?.as_str().to_string();
    Some((title, year))
}

/// Extract the resolution of a media file from its name.
///
/// Numeric tokens like `720p` map to their number, `4K` maps to 2160,
/// and a name with no resolution token maps to 0 so it sorts below
/// every tagged file.
///
/// # Examples
/// ```
/// use streamscout_core::parser::extract_resolution;
///
/// assert_eq!(extract_resolution("Heat.1995.1080p.BluRay.mkv"), 1080);
/// assert_eq!(extract_resolution("Heat.1995.4K.HDR.mkv"), 2160);
/// assert_eq!(extract_resolution("Heat.1995.mkv"), 0);
/// ```
pub fn extract_resolution(filename: &str) -> u32 {
    let Ok(re) = regex_lite::Regex::new(r"(\d+)p|4K") else {
        return 0;
    };
    match re.captures(filename) {
        Some(caps) => match caps.get(1) {
            Some(numeric) => numeric.as_str().parse().unwrap_or(0),
            // The token was "4K"
            None => 2160,
        },
        None => 0,
    }
}

/// Select the file with the highest resolution token.
///
/// Ties keep the earliest entry, matching the order the server lists
/// files in.
pub fn best_file(entries: &[Entry]) -> Option<&Entry> {
    let mut best: Option<(&Entry, u32)> = None;
    for entry in entries {
        let resolution = extract_resolution(&entry.name);
        match best {
            Some((_, current)) if resolution <= current => {}
            _ => best = Some((entry, resolution)),
        }
    }
    best.map(|(entry, _)| entry)
}

/// Directory name used for a season, e.g. `"Season 01"`.
pub fn season_dir_name(season: u32) -> String {
    format!("Season {season:02}")
}

/// Episode tag embedded in file names, e.g. `"S01E05"`.
pub fn episode_tag(season: u32, episode: u32) -> String {
    format!("S{season:02}E{episode:02}")
}
