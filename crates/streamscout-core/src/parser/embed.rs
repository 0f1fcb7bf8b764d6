//! Embed-page parser
//!
//! Extracts the opaque identifiers the embed aggregator hides in its
//! player pages and token handshake responses.

use scraper::{Html, Selector};

/// Extract the opaque source id from an embed page.
///
/// The player page carries the id on the first anchor with a `data-id`
/// attribute; every follow-up API call is keyed on it.
pub fn extract_source_id(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("a[data-id]").ok()?;
    let element = document.select(&selector).next()?;
    element.value().attr("data-id").map(str::to_string)
}

/// Extract the handshake key from a token endpoint response.
///
/// The endpoint returns a small script assigning the current key to a
/// variable: `var k='...'`.
pub fn extract_futoken_key(body: &str) -> Option<String> {
    let re = regex_lite::Regex::new(r"var\s+k\s*=\s*'([^']+)'").ok()?;
    let caps = re.captures(body)?;
    Some(caps.get(1)?.as_str().to_string())
}
