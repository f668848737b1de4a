//! The registry of hash algorithms that may be named in a configuration.
//!
//! Names are matched case-sensitively. A name that is not part of the registry
//! is still representable through [`HashAlgorithm::Other`], so that a
//! configuration can be deserialized and then rejected with a proper error
//! instead of failing somewhere inside the deserializer.

use alloc::{string::String, vec::Vec};

use crate::crypto::{self, PrimitiveError};

/// The hash algorithm used when none is configured.
pub const DEFAULT_HASH_ALGORITHM: HashAlgorithm = HashAlgorithm::Sha512;

/// A hash algorithm identified by its registry name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum HashAlgorithm {
    /// SHA-1, `"sha1"`
    Sha1,
    /// SHA-256, `"sha256"`
    Sha256,
    /// SHA-512, `"sha512"`
    Sha512,
    /// A name that is not part of the registry.
    Other(String),
}

impl_named_registry!(HashAlgorithm, [
    "sha1" => Self::Sha1; Self::Sha1,
    "sha256" => Self::Sha256; Self::Sha256,
    "sha512" => Self::Sha512; Self::Sha512,
]);

impl HashAlgorithm {
    /// Returns `true` if this algorithm has a hash constructor in the
    /// registry, `false` for [`HashAlgorithm::Other`].
    pub const fn is_registered(&self) -> bool {
        !matches!(self, Self::Other(..))
    }

    /// The output length of this hash function in bytes.
    ///
    /// Returns `None` for names that are not part of the registry.
    pub const fn digest_size(&self) -> Option<usize> {
        match self {
            Self::Sha1 => Some(20),
            Self::Sha256 => Some(32),
            Self::Sha512 => Some(64),
            Self::Other(..) => None,
        }
    }

    /// Hashes `data` with this algorithm.
    ///
    /// # Errors
    ///
    /// Fails for names that are not part of the registry.
    pub fn digest(&self, data: &[u8]) -> Result<Vec<u8>, PrimitiveError> {
        crypto::digest(self, data)
    }
}

impl Default for HashAlgorithm {
    fn default() -> Self {
        DEFAULT_HASH_ALGORITHM
    }
}
