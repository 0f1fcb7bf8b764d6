//! Deobfuscation of embedded source URLs
//!
//! The embed aggregator hides its source URLs behind three layers:
//! URL-safe base64, an RC4-style keystream XOR under a fixed 16-byte
//! key, and percent-encoding. The cipher is symmetric, so the same
//! keystream transform both masks and unmasks a payload.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::{Error, Result};

/// Fixed keystream key used by the embed aggregator
const STREAM_KEY: &[u8; 16] = b"8z5Ag5wgagfsOuhz";

/// Apply the RC4 keystream for `key` to `data` in place.
///
/// Standard 256-byte key schedule followed by keystream XOR. Applying
/// the transform twice with the same key restores the input.
pub fn keystream_transform(key: &[u8], data: &mut [u8]) {
    let mut s: [u8; 256] = [0; 256];
    for (i, slot) in s.iter_mut().enumerate() {
        *slot = i as u8;
    }

    let mut j: u8 = 0;
    for i in 0..256 {
        j = j
            .wrapping_add(s[i])
            .wrapping_add(key[i % key.len()]);
        s.swap(i, j as usize);
    }

    let mut i: u8 = 0;
    let mut k: u8 = 0;
    for byte in data.iter_mut() {
        i = i.wrapping_add(1);
        k = k.wrapping_add(s[i as usize]);
        s.swap(i as usize, k as usize);
        let t = s[i as usize].wrapping_add(s[k as usize]);
        *byte ^= s[t as usize];
    }
}

/// Decode an obfuscated source URL into a plain URL.
///
/// The input is URL-safe base64 (`-`/`_` alphabet); the decoded bytes
/// are XORed with the keystream and the resulting UTF-8 text is
/// percent-decoded.
///
/// # Errors
/// Returns `Error::Deobfuscation` naming the failing stage when the
/// payload is not valid base64, not UTF-8 after decryption, or not
/// valid percent-encoding.
///
/// # Example
/// ```
/// use streamscout_core::obfuscation::deobfuscate_url;
///
/// let url = deobfuscate_url(
///     "VfxvGYo3N8o-U0vTPLDxAq2PE-mPvvNqZjK5NAMn3idupzdWOpGqCP-0LEA_jTOQq2xil7K8FVPvCxOfUa1bzY1RrI-YR9hDcpCboxte",
/// ).unwrap();
/// assert!(url.starts_with("https://"));
/// ```
pub fn deobfuscate_url(encoded: &str) -> Result<String> {
    let standardized = encoded.replace('_', "/").replace('-', "+");

    let mut data = STANDARD
        .decode(&standardized)
        .map_err(|e| Error::Deobfuscation(format!("base64: {e}")))?;

    keystream_transform(STREAM_KEY, &mut data);

    let text = String::from_utf8(data)
        .map_err(|e| Error::Deobfuscation(format!("utf-8: {e}")))?;

    let url = urlencoding::decode(&text)
        .map_err(|e| Error::Deobfuscation(format!("percent-encoding: {e}")))?;

    Ok(url.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_keystream_known_vector() {
        let mut data = b"Hello, World!".to_vec();
        keystream_transform(STREAM_KEY, &mut data);
        assert_eq!(
            data,
            [0x75, 0xed, 0x77, 0x05, 0x96, 0x3e, 0x24, 0xdc, 0x74, 0x13, 0x61, 0x92, 0x2f]
        );
    }

    #[test]
    fn test_keystream_is_symmetric() {
        let original = b"the quick brown fox".to_vec();
        let mut data = original.clone();
        keystream_transform(STREAM_KEY, &mut data);
        assert_ne!(data, original);
        keystream_transform(STREAM_KEY, &mut data);
        assert_eq!(data, original);
    }

    #[test]
    fn test_deobfuscate_url_known_payload() {
        let url = deobfuscate_url(
            "VfxvGYo3N8o-U0vTPLDxAq2PE-mPvvNqZjK5NAMn3idupzdWOpGqCP-0LEA_jTOQq2xil7K8FVPvCxOfUa1bzY1RrI-YR9hDcpCboxte",
        )
        .unwrap();
        assert_eq!(
            url,
            "https://vidplay.site/e/7kq3MNzxq8V4?t=Zmlyc3Q&autostart=true"
        );
    }

    #[test]
    fn test_deobfuscate_url_invalid_base64() {
        let result = deobfuscate_url("not base64 at all!!!");
        match result {
            Err(Error::Deobfuscation(msg)) => assert!(msg.contains("base64")),
            other => panic!("Expected Deobfuscation error, got {other:?}"),
        }
    }

    #[test]
    fn test_deobfuscate_url_garbage_payload() {
        // Valid base64, but the decrypted bytes are not UTF-8 text
        let result = deobfuscate_url("AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA");
        assert!(matches!(result, Err(Error::Deobfuscation(_))));
    }

    proptest! {
        #[test]
        fn prop_keystream_roundtrip(data: Vec<u8>, key in proptest::collection::vec(any::<u8>(), 1..64)) {
            let mut transformed = data.clone();
            keystream_transform(&key, &mut transformed);
            keystream_transform(&key, &mut transformed);
            prop_assert_eq!(transformed, data);
        }
    }
}
