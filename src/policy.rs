//! Decide which registered hash algorithms may be configured.
//!
//! The registry knows every hash the padding primitive can work with, a
//! [`Policy`] narrows that down to the ones that are still endorsed. The two
//! checks are kept apart so that changing the endorsed set never touches the
//! signing path.

mod standard;

use alloc::string::{String, ToString};
use core::fmt::Display;

pub use standard::StandardPolicy;
use thiserror::Error;

use crate::hash::HashAlgorithm;

/// Reasons a [`Policy`] can deny a hash algorithm.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum PolicyFail {
    /// The algorithm was endorsed at some point but must not be used anymore.
    #[error("deprecated in favor of `{endorsed}`")]
    Deprecated {
        /// The algorithm to use instead.
        endorsed: HashAlgorithm,
    },
    /// Used by custom policies.
    #[error("{0}")]
    Custom(String),
}

impl PolicyFail {
    /// Creates a [`PolicyFail::Custom`] from any message.
    pub fn custom<T>(msg: T) -> Self
    where
        T: Display,
    {
        Self::Custom(msg.to_string())
    }
}

/// A set of rules about which hash algorithms are acceptable.
pub trait Policy {
    /// Checks a hash algorithm that is known to be part of the registry.
    ///
    /// # Errors
    ///
    /// This should return an [`Err`] if the algorithm is not accepted (e.g.
    /// because it is considered insecure)
    fn hash_algorithm(&self, alg: &HashAlgorithm) -> Result<(), PolicyFail>;
}

impl<P: Policy + ?Sized> Policy for &P {
    fn hash_algorithm(&self, alg: &HashAlgorithm) -> Result<(), PolicyFail> {
        P::hash_algorithm(self, alg)
    }
}
