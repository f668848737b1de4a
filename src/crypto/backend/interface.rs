//! Common traits that define the API each backend must implement.

use alloc::vec::Vec;
use core::{error, fmt};

use crate::hash::HashAlgorithm;

pub(crate) mod rsa;

/// The backend trait that all backends must implement.
pub(crate) trait Backend {
    /// The error type that is used by this backend.
    type Error: fmt::Debug + fmt::Display + error::Error + 'static;

    /// The RSA private key type.
    type RsaPrivateKey: rsa::PrivateKey;

    /// The RSA public key type.
    type RsaPublicKey: rsa::PublicKey;

    /// Hashes `data` with the given registry algorithm.
    ///
    /// Fails for algorithms that have no hash constructor.
    fn digest(alg: &HashAlgorithm, data: &[u8]) -> Result<Vec<u8>, Self::Error>;
}
