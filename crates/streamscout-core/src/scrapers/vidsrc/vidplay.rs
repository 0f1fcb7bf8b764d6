//! Secondary URL-resolution helper
//!
//! The deobfuscated embed URL points at a player host that still hides
//! the real media files behind a short token handshake: fetch the
//! current key from `/futoken`, fold it into the embed id, and ask
//! `/mediainfo` for the playable sources.

use std::sync::Arc;

use serde::Deserialize;

use crate::client::HttpClient;
use crate::error::{Error, Result};
use crate::parser::embed;

/// Production base URL of the player host
pub const VIDPLAY_BASE_URL: &str = "https://vidplay.site";

#[derive(Debug, Deserialize)]
struct MediaInfoResponse {
    result: MediaInfoResult,
}

#[derive(Debug, Deserialize)]
struct MediaInfoResult {
    #[serde(default)]
    sources: Vec<MediaSource>,
}

#[derive(Debug, Deserialize)]
struct MediaSource {
    file: String,
}

/// Resolver turning embed URLs into direct media URLs
pub struct VidPlay {
    client: Arc<HttpClient>,
    base_url: String,
}

impl VidPlay {
    /// Create a resolver against the production host.
    pub fn new(client: Arc<HttpClient>) -> Self {
        Self::with_base_url(client, VIDPLAY_BASE_URL)
    }

    /// Create a resolver against a custom base URL (tests).
    pub fn with_base_url(client: Arc<HttpClient>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Resolve an embed URL (`.../e/{id}?{query}`) to its media URLs.
    ///
    /// The returned list preserves the host's ordering; callers usually
    /// play the first entry.
    pub async fn resolve_source(&self, embed_url: &str) -> Result<Vec<String>> {
        let (path, query) = embed_url.split_once('?').unwrap_or((embed_url, ""));
        let id = path.split("/e/").last().unwrap_or_default();
        if id.is_empty() {
            return Err(Error::InvalidUrl(format!(
                "No embed id in URL: {embed_url}"
            )));
        }

        let futoken_body = self
            .client
            .get_text_with_referer(&format!("{}/futoken", self.base_url), embed_url)
            .await?;
        let key = embed::extract_futoken_key(&futoken_body)
            .ok_or_else(|| Error::ElementNotFound("futoken key".to_string()))?;

        let mut url = format!("{}/mediainfo/{}", self.base_url, encode_token(&key, id));
        if !query.is_empty() {
            url.push('?');
            url.push_str(query);
        }

        let response: MediaInfoResponse =
            self.client.get_json_with_referer(&url, embed_url).await?;

        Ok(response
            .result
            .sources
            .into_iter()
            .map(|source| source.file)
            .collect())
    }
}

/// Fold the handshake key into the embed id.
///
/// The token is the key followed by one decimal per id byte: the sum of
/// that byte and the key byte at the same position (key repeating),
/// all comma-separated.
fn encode_token(key: &str, id: &str) -> String {
    let key_bytes = key.as_bytes();
    let mut parts = Vec::with_capacity(id.len() + 1);
    parts.push(key.to_string());
    for (i, byte) in id.bytes().enumerate() {
        let sum = u32::from(key_bytes[i % key_bytes.len()]) + u32::from(byte);
        parts.push(sum.to_string());
    }
    parts.join(",")
}
