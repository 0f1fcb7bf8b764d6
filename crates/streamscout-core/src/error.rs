//! Error types for streamscout
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Error type for scraper operations
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to parse HTML or JSON content
    #[error("Failed to parse content: {0}")]
    Parse(String),

    /// Required HTML element was not found
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Invalid URL or query
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Rate limited by the server (HTTP 429)
    #[error("Rate limited - too many requests")]
    RateLimited,

    /// Requested resource was not found (HTTP 404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// No playable media could be resolved for the given title
    #[error("Media not found: {0}")]
    MediaNotFound(String),

    /// The obfuscated source URL could not be decoded
    #[error("Failed to decode source URL: {0}")]
    Deobfuscation(String),
}

/// Result type alias for scraper operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_parse() {
        let error = Error::Parse("missing element".to_string());
        assert_eq!(error.to_string(), "Failed to parse content: missing element");
    }

    #[test]
    fn test_error_display_element_not_found() {
        let error = Error::ElementNotFound("a.file-entry".to_string());
        assert_eq!(error.to_string(), "Element not found: a.file-entry");
    }

    #[test]
    fn test_error_display_invalid_url() {
        let error = Error::InvalidUrl("not-a-url".to_string());
        assert_eq!(error.to_string(), "Invalid URL: not-a-url");
    }

    #[test]
    fn test_error_display_rate_limited() {
        let error = Error::RateLimited;
        assert_eq!(error.to_string(), "Rate limited - too many requests");
    }

    #[test]
    fn test_error_display_not_found() {
        let error = Error::NotFound("https://example.com/missing".to_string());
        assert_eq!(
            error.to_string(),
            "Resource not found: https://example.com/missing"
        );
    }

    #[test]
    fn test_error_display_media_not_found() {
        let error = Error::MediaNotFound("Breaking Bad".to_string());
        assert_eq!(error.to_string(), "Media not found: Breaking Bad");
    }

    #[test]
    fn test_error_display_deobfuscation() {
        let error = Error::Deobfuscation("invalid base64".to_string());
        assert_eq!(
            error.to_string(),
            "Failed to decode source URL: invalid base64"
        );
    }
}
