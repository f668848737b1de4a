use super::{Policy, PolicyFail};
use crate::hash::{HashAlgorithm, DEFAULT_HASH_ALGORITHM};

/// The [`Policy`] used unless another one is given explicitly.
///
/// # Included checks
///
/// - only [`DEFAULT_HASH_ALGORITHM`] (`sha512`) is endorsed, every other
///   registered hash is deprecated, including the formerly valid `sha1` and
///   `sha256`
#[non_exhaustive]
#[derive(Debug, Default, Clone)]
pub struct StandardPolicy;

impl StandardPolicy {
    /// Create a [`StandardPolicy`]
    pub const fn new() -> Self {
        Self
    }
}

impl Policy for StandardPolicy {
    fn hash_algorithm(&self, alg: &HashAlgorithm) -> Result<(), PolicyFail> {
        if *alg == DEFAULT_HASH_ALGORITHM {
            Ok(())
        } else {
            Err(PolicyFail::Deprecated {
                endorsed: DEFAULT_HASH_ALGORITHM,
            })
        }
    }
}
