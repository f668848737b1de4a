//! Selecting a [`SignAlgorithm`] by its signature scheme identifier.

use alloc::string::ToString;

use crate::{
    crypto::Result,
    pss::{ConfigError, Pss, PssOptions},
    sign::{Payload, SignAlgorithm, Signature},
};

/// The scheme identifier of the HTTP signatures `hs2019` algorithm, which is
/// backed by RSASSA-PSS.
pub const HS2019: &str = "hs2019";

/// All signature algorithms known to this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Algorithm {
    /// RSASSA-PSS
    Pss(Pss),
}

impl Algorithm {
    /// Creates the algorithm registered for `scheme`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsupportedScheme`] for unknown identifiers, and
    /// any error of [`Pss::new`] for invalid options.
    pub fn from_scheme(scheme: &str, options: PssOptions) -> Result<Self, ConfigError> {
        match scheme {
            HS2019 => Pss::new(options).map(Self::Pss),
            _ => {
                log::debug!("unknown signature scheme `{scheme}`");
                Err(ConfigError::UnsupportedScheme(scheme.to_string()))
            }
        }
    }

    /// The scheme identifier of this algorithm.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Pss(..) => HS2019,
        }
    }
}

impl From<Pss> for Algorithm {
    fn from(x: Pss) -> Self {
        Self::Pss(x)
    }
}

impl SignAlgorithm for Algorithm {
    fn sign(&self, private_key: &[u8], data: Payload<'_>) -> Result<Signature> {
        match self {
            Self::Pss(pss) => pss.sign(private_key, data),
        }
    }

    fn verify(&self, public_key: &[u8], data: Payload<'_>, signature: &[u8]) -> Result<bool> {
        match self {
            Self::Pss(pss) => pss.verify(public_key, data, signature),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hs2019_is_pss() {
        let alg = Algorithm::from_scheme("hs2019", PssOptions::default()).unwrap();
        assert_eq!(alg, Algorithm::Pss(Pss::default()));
        assert_eq!(alg.name(), "hs2019");
    }

    #[test]
    fn unknown_scheme() {
        assert_eq!(
            Algorithm::from_scheme("rsa-sha256", PssOptions::default()),
            Err(ConfigError::UnsupportedScheme("rsa-sha256".into()))
        );
    }

    #[test]
    fn options_are_still_checked() {
        let options = PssOptions::new().hash_algorithm(crate::hash::HashAlgorithm::Sha256);
        assert!(matches!(
            Algorithm::from_scheme("hs2019", options),
            Err(ConfigError::DeprecatedHashAlgorithm { .. })
        ));
    }
}
