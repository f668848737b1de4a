use alloc::{string::String, vec::Vec};
use core::fmt;

use crate::{
    base64::Base64String,
    crypto::{Error, Result},
};

/// The data that is signed or verified.
///
/// Text is only accepted if it is 7-bit ASCII, so that its byte
/// representation is unambiguous. Anything else has to be passed as bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload<'a> {
    /// Text that must only contain ASCII characters.
    Text(&'a str),
    /// Raw bytes, used as they are.
    Bytes(&'a [u8]),
}

impl<'a> Payload<'a> {
    /// Returns the raw bytes of this payload.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonAsciiPayload`] if this is text containing non-ASCII
    /// characters.
    pub fn as_bytes(&self) -> Result<&'a [u8]> {
        match *self {
            Self::Text(text) if text.is_ascii() => Ok(text.as_bytes()),
            Self::Text(..) => Err(Error::NonAsciiPayload),
            Self::Bytes(bytes) => Ok(bytes),
        }
    }
}

impl<'a> From<&'a str> for Payload<'a> {
    fn from(x: &'a str) -> Self {
        Self::Text(x)
    }
}

impl<'a> From<&'a String> for Payload<'a> {
    fn from(x: &'a String) -> Self {
        Self::Text(x)
    }
}

impl<'a> From<&'a [u8]> for Payload<'a> {
    fn from(x: &'a [u8]) -> Self {
        Self::Bytes(x)
    }
}

impl<'a> From<&'a Vec<u8>> for Payload<'a> {
    fn from(x: &'a Vec<u8>) -> Self {
        Self::Bytes(x)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Payload<'a> {
    fn from(x: &'a [u8; N]) -> Self {
        Self::Bytes(x)
    }
}

/// The raw bytes returned from a sign operation.
///
/// Note that [`SignAlgorithm::verify`] does **not** accept these bytes
/// directly, it expects them encoded as base64 text. Use
/// [`Signature::to_base64`] before passing a signature to `verify`.
#[derive(Clone, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Signature(Vec<u8>);

impl Signature {
    pub(crate) const fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Encodes this signature as standard, padded base64, the form that
    /// [`SignAlgorithm::verify`] expects.
    pub fn to_base64(&self) -> Base64String {
        Base64String::encode(&self.0)
    }

    /// The length of the signature in bytes, equal to the size of the RSA
    /// modulus.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the signature contains no bytes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Turns this signature into its raw bytes.
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

impl From<Signature> for Vec<u8> {
    fn from(value: Signature) -> Self {
        value.0
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

/// A digital signature algorithm over arbitrary byte payloads.
///
/// Keys are passed per call as opaque PEM or DER encoded bytes and are not
/// retained by the implementation.
///
/// # Encoding asymmetry
///
/// [`sign`](Self::sign) returns the *raw* signature bytes, while
/// [`verify`](Self::verify) expects the signature as *base64 text*. A round
/// trip therefore looks like this:
///
/// ```
/// # use httpsig::{Pss, SignAlgorithm};
/// # fn run(private: &[u8], public: &[u8]) -> httpsig::crypto::Result<()> {
/// let pss = Pss::default();
/// let signature = pss.sign(private, "the quick brown fox".into())?;
/// let valid = pss.verify(
///     public,
///     "the quick brown fox".into(),
///     signature.to_base64().as_bytes(),
/// )?;
/// assert!(valid);
/// # Ok(())
/// # }
/// ```
pub trait SignAlgorithm {
    /// Sign `data` using `private_key` and return the raw signature bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the key can not be imported, the payload is not
    /// representable as bytes, or the signing primitive fails.
    fn sign(&self, private_key: &[u8], data: Payload<'_>) -> Result<Signature>;

    /// Check the base64 encoded `signature` over `data` using `public_key`.
    ///
    /// Bytes outside the base64 alphabet, such as the line breaks of wrapped
    /// text, are skipped before decoding. A signature that does not match, is
    /// not valid base64, or has the wrong size is reported as `Ok(false)`.
    ///
    /// # Errors
    ///
    /// Returns an error only if the verification could not be attempted,
    /// i.e. the key can not be imported or the payload is not representable
    /// as bytes.
    fn verify(&self, public_key: &[u8], data: Payload<'_>, signature: &[u8]) -> Result<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_text_is_used_as_is() {
        let payload = Payload::from("date: Thu, 05 Jan 2014 21:31:40 GMT");
        assert_eq!(
            payload.as_bytes().unwrap(),
            b"date: Thu, 05 Jan 2014 21:31:40 GMT"
        );
    }

    #[test]
    fn non_ascii_text_is_rejected() {
        let payload = Payload::from("caf\u{e9}");
        assert!(matches!(payload.as_bytes(), Err(Error::NonAsciiPayload)));
    }

    #[test]
    fn non_ascii_bytes_are_accepted() {
        let payload = Payload::from("caf\u{e9}".as_bytes());
        assert_eq!(payload.as_bytes().unwrap().len(), 5);
    }

    #[test]
    fn signature_base64() {
        let signature = Signature::new(alloc::vec![0xfb, 0xff, 0x00]);
        assert_eq!(&*signature.to_base64(), "+/8A");
        assert_eq!(signature.len(), 3);
    }
}
