//! This backend implements the primitives using the [RustCrypto] ecosystem.
//!
//! [RustCrypto]: https://github.com/RustCrypto

use alloc::vec::Vec;

use digest::Digest as _;
use thiserror::Error;

use super::interface;
use crate::{crypto::PrimitiveError, hash::HashAlgorithm};

mod emsa;
pub(crate) mod rsa;

// The RustCrypto error types only implement `Error` with their `std` feature,
// so without `std` they can only be shown, not chained.

/// The errors that can be produced by the rust crypto backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The hash algorithm has no hash constructor in the registry.
    #[error("hash algorithm `{0}` is not part of the registry")]
    UnsupportedHash(HashAlgorithm),

    /// The digest and salt do not fit into the modulus of the key.
    #[error("the key modulus is too small for the digest and salt")]
    ModulusTooSmall,

    /// RSA operation failed.
    #[cfg_attr(feature = "std", error("an RSA operation failed"))]
    #[cfg_attr(not(feature = "std"), error("an RSA operation failed: {0}"))]
    Rsa(#[cfg_attr(feature = "std", source)] ::rsa::errors::Error),

    /// Decoding a PKCS#1 document failed.
    #[cfg_attr(feature = "std", error("invalid PKCS#1 document"))]
    #[cfg_attr(not(feature = "std"), error("invalid PKCS#1 document: {0}"))]
    Pkcs1(#[cfg_attr(feature = "std", source)] ::rsa::pkcs1::Error),

    /// Decoding a PKCS#8 document failed.
    #[cfg_attr(feature = "std", error("invalid PKCS#8 document"))]
    #[cfg_attr(not(feature = "std"), error("invalid PKCS#8 document: {0}"))]
    Pkcs8(#[cfg_attr(feature = "std", source)] ::rsa::pkcs8::Error),

    /// Decoding a SubjectPublicKeyInfo document failed.
    #[cfg_attr(feature = "std", error("invalid SubjectPublicKeyInfo document"))]
    #[cfg_attr(
        not(feature = "std"),
        error("invalid SubjectPublicKeyInfo document: {0}")
    )]
    Spki(#[cfg_attr(feature = "std", source)] ::rsa::pkcs8::spki::Error),
}

impl From<::rsa::errors::Error> for BackendError {
    fn from(x: ::rsa::errors::Error) -> Self {
        Self::Rsa(x)
    }
}

impl From<::rsa::pkcs1::Error> for BackendError {
    fn from(x: ::rsa::pkcs1::Error) -> Self {
        Self::Pkcs1(x)
    }
}

impl From<::rsa::pkcs8::Error> for BackendError {
    fn from(x: ::rsa::pkcs8::Error) -> Self {
        Self::Pkcs8(x)
    }
}

impl From<::rsa::pkcs8::spki::Error> for BackendError {
    fn from(x: ::rsa::pkcs8::spki::Error) -> Self {
        Self::Spki(x)
    }
}

/// Erases any error of this backend into a [`PrimitiveError`].
fn erase(err: impl Into<BackendError>) -> PrimitiveError {
    PrimitiveError::new(err.into())
}

/// The [RustCrypto] based backend.
///
/// [RustCrypto]: https://github.com/RustCrypto
#[derive(Debug)]
pub enum Backend {}

impl interface::Backend for Backend {
    type Error = BackendError;
    type RsaPrivateKey = rsa::PrivateKey;
    type RsaPublicKey = rsa::PublicKey;

    fn digest(alg: &HashAlgorithm, data: &[u8]) -> Result<Vec<u8>, Self::Error> {
        let hashed = match alg {
            HashAlgorithm::Sha1 => sha1::Sha1::digest(data).to_vec(),
            HashAlgorithm::Sha256 => sha2::Sha256::digest(data).to_vec(),
            HashAlgorithm::Sha512 => sha2::Sha512::digest(data).to_vec(),
            HashAlgorithm::Other(..) => return Err(BackendError::UnsupportedHash(alg.clone())),
        };

        Ok(hashed)
    }
}
