//! Helpers for standard, padded base64 text.
//!
//! Signatures leave [`SignAlgorithm::sign`](crate::SignAlgorithm::sign) as
//! raw bytes but must be handed to
//! [`SignAlgorithm::verify`](crate::SignAlgorithm::verify) as base64 text.
//! [`Base64String`] is the type that sits between the two.

use alloc::{borrow::ToOwned, string::String, vec::Vec};
use core::{fmt, ops::Deref, str::FromStr};

use base64ct::{Base64, Encoding};
use serde::{de::Error, Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Error type indicating that a string is not valid base64.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("the string is not a valid base64 representation")]
pub struct NoBase64String;

/// A wrapper around a [`String`] that guarantees that the inner string is
/// valid, padded base64 using the standard alphabet.
#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize, Default)]
#[repr(transparent)]
#[serde(transparent)]
pub struct Base64String(String);

impl<'de> Deserialize<'de> for Base64String {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let inner = String::deserialize(deserializer)?;
        Base64String::from_str(&inner).map_err(D::Error::custom)
    }
}

impl fmt::Display for Base64String {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Base64String {
    type Err = NoBase64String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Base64::decode_vec(s)
            .map(|_| Self(s.to_owned()))
            .map_err(|_| NoBase64String)
    }
}

impl Base64String {
    /// Encode the given bytes using the standard base64 alphabet with padding.
    #[inline]
    pub fn encode(x: impl AsRef<[u8]>) -> Self {
        Base64String(Base64::encode_string(x.as_ref()))
    }

    /// Decodes this base64 string into its raw byte representation.
    #[inline]
    pub fn decode(&self) -> Vec<u8> {
        Base64::decode_vec(&self.0).expect("Base64String is always valid base64")
    }

    /// Turns this base64 string into the underlying string.
    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Returns the encoded text as bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl Deref for Base64String {
    type Target = str;

    fn deref(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<[u8]> for Base64String {
    fn as_ref(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl From<Base64String> for String {
    fn from(x: Base64String) -> Self {
        x.0
    }
}

/// Decodes base64 text, skipping every byte that is neither part of the
/// alphabet nor padding, e.g. the line breaks of wrapped or folded text.
///
/// The padding itself must still be correct.
pub(crate) fn decode(text: &[u8]) -> Result<Vec<u8>, NoBase64String> {
    let text: String = text
        .iter()
        .filter(|&&b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'/' | b'='))
        .map(|&b| char::from(b))
        .collect();
    Base64::decode_vec(&text).map_err(|_| NoBase64String)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_with_padding() {
        assert_eq!(&*Base64String::encode(b"ab"), "YWI=");
        assert_eq!(&*Base64String::encode([0xfb, 0xff]), "+/8=");
    }

    #[test]
    fn rejects_url_safe_alphabet() {
        assert_eq!(Base64String::from_str("-_8="), Err(NoBase64String));
    }

    #[test]
    fn rejects_missing_padding() {
        assert_eq!(Base64String::from_str("YWI"), Err(NoBase64String));
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let parsed = Base64String::from_str(" YWI=\n").unwrap();
        assert_eq!(parsed.decode(), b"ab");
        assert_eq!(&*parsed, "YWI=");
    }

    #[test]
    fn strict_parsing_rejects_interior_whitespace() {
        assert_eq!(Base64String::from_str("QUJD\nREVG"), Err(NoBase64String));
    }

    #[test]
    fn lenient_decoding_skips_line_breaks() {
        assert_eq!(decode(b"QUJD\nREVG").unwrap(), b"ABCDEF");
        assert_eq!(decode(b" QUJD\r\n REVG\r\n").unwrap(), b"ABCDEF");
        assert_eq!(decode(b"QU*JD\xff").unwrap(), b"ABC");
    }

    #[test]
    fn lenient_decoding_still_checks_padding() {
        assert_eq!(decode(b"YWI"), Err(NoBase64String));
        assert_eq!(decode(b"-_8="), Err(NoBase64String));
        assert_eq!(decode(b"YW\nI=").unwrap(), b"ab");
    }
}
