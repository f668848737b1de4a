//! Cryptographic primitives.
//!
//! This module abstracts away the cryptographic library that performs the
//! actual RSA and hash operations. The library is selected at compile time
//! using a feature flag, and everything above this module only talks to the
//! [`interface`](backend::interface) traits.

pub(crate) mod backend;
pub mod rsa;

use alloc::{string::String, vec::Vec};
use core::{error, fmt};

use thiserror::Error;

use self::backend::{interface, Backend};
use crate::hash::HashAlgorithm;

/// The result type used for sign and verify operations.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// The reasons a sign or verify operation could not be attempted.
///
/// A signature that does not match is *not* an error, it is reported as
/// `Ok(false)` by [`SignAlgorithm::verify`](crate::SignAlgorithm::verify).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The key material could not be imported as an RSA key of the required
    /// kind (malformed encoding, wrong key type, or a public key where a
    /// private one is needed).
    #[error("Invalid key.")]
    InvalidKey(#[source] KeyError),
    /// The payload was given as text that is not 7-bit ASCII.
    #[error("payload text must be 7-bit ASCII")]
    NonAsciiPayload,
    /// The padding primitive refused to sign, e.g. because the salt does not
    /// fit into the modulus of the key.
    #[error("the signing operation failed")]
    Signing(#[source] PrimitiveError),
}

/// The reason key material could not be imported.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum KeyError {
    /// The PEM document does not contain an RSA key.
    #[error("unsupported PEM label `{0}`")]
    UnsupportedLabel(String),
    /// The key decoder of the cryptographic backend rejected the material.
    #[error(transparent)]
    Decode(#[from] PrimitiveError),
}

/// The erased error type that is used to generalize all errors that the
/// cryptographic libraries can return.
pub struct PrimitiveError {
    inner: <Backend as interface::Backend>::Error,
}

impl PrimitiveError {
    pub(crate) const fn new(inner: <Backend as interface::Backend>::Error) -> Self {
        Self { inner }
    }
}

impl fmt::Display for PrimitiveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl fmt::Debug for PrimitiveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.inner, f)
    }
}

impl error::Error for PrimitiveError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        error::Error::source(&self.inner)
    }
}

/// Hashes `data` using the given algorithm.
#[inline]
pub(crate) fn digest(alg: &HashAlgorithm, data: &[u8]) -> Result<Vec<u8>, PrimitiveError> {
    <Backend as interface::Backend>::digest(alg, data).map_err(PrimitiveError::new)
}
