//! RSASSA-PSS signing as defined in [section 8.1 of RFC 8017].
//!
//! [section 8.1 of RFC 8017]: <https://datatracker.ietf.org/doc/html/rfc8017#section-8.1>

use alloc::{string::String, vec::Vec};
use core::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    base64,
    crypto::{
        rsa::{PaddingContext, PrivateKey, PublicKey},
        Error, Result,
    },
    hash::{HashAlgorithm, DEFAULT_HASH_ALGORITHM},
    policy::{Policy, PolicyFail, StandardPolicy},
    sign::{Payload, SignAlgorithm, Signature},
};

/// The errors raised while constructing an algorithm from its options.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The hash algorithm is not part of the registry.
    #[error("Unsupported hash algorithm")]
    UnsupportedHashAlgorithm(HashAlgorithm),
    /// The hash algorithm is registered, but no longer endorsed.
    #[error("Hash algorithm: {requested} is deprecated. Please use: {endorsed}")]
    DeprecatedHashAlgorithm {
        /// The configured algorithm.
        requested: HashAlgorithm,
        /// The algorithm to use instead.
        endorsed: HashAlgorithm,
    },
    /// The hash algorithm was rejected by a custom [`Policy`].
    #[error("Hash algorithm: {requested} is not allowed: {reason}")]
    RejectedHashAlgorithm {
        /// The configured algorithm.
        requested: HashAlgorithm,
        /// The message of the policy.
        reason: String,
    },
    /// The mask generation function is built on a hash outside the registry.
    #[error("Unsupported mask generation function: {0}")]
    UnsupportedMaskGeneration(MaskGenerationFunction),
    /// The signature scheme identifier is not known.
    #[error("Unsupported signature scheme: {0}")]
    UnsupportedScheme(String),
}

/// The number of random salt bytes mixed into every signature.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<usize>", into = "Option<usize>")]
pub enum SaltLength {
    /// As many bytes as the digest is long, the maximal salt for the hash.
    #[default]
    Auto,
    /// A fixed number of bytes. `0` makes signatures deterministic.
    Fixed(usize),
}

impl SaltLength {
    /// Resolves the salt length for a digest of `digest_size` bytes.
    pub const fn resolve(self, digest_size: usize) -> usize {
        match self {
            Self::Auto => digest_size,
            Self::Fixed(len) => len,
        }
    }
}

impl From<Option<usize>> for SaltLength {
    fn from(x: Option<usize>) -> Self {
        x.map_or(Self::Auto, Self::Fixed)
    }
}

impl From<SaltLength> for Option<usize> {
    fn from(x: SaltLength) -> Self {
        match x {
            SaltLength::Auto => None,
            SaltLength::Fixed(len) => Some(len),
        }
    }
}

/// The mask generation function used inside the PSS encoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum MaskGenerationFunction {
    /// MGF1 as defined in [appendix B.2.1 of RFC 8017], built on the given
    /// hash.
    ///
    /// [appendix B.2.1 of RFC 8017]: <https://datatracker.ietf.org/doc/html/rfc8017#appendix-B.2.1>
    Mgf1(HashAlgorithm),
}

impl fmt::Display for MaskGenerationFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mgf1(hash) => write!(f, "MGF1 with {hash}"),
        }
    }
}

/// The options a [`Pss`] instance is created from.
///
/// All fields are optional when deserializing:
///
/// ```
/// # use httpsig::{pss::{PssOptions, SaltLength}, hash::HashAlgorithm};
/// let options: PssOptions = serde_json::from_str(r#"{ "salt_length": 0 }"#).unwrap();
/// assert_eq!(options.hash_algorithm, HashAlgorithm::Sha512);
/// assert_eq!(options.salt_length, SaltLength::Fixed(0));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[non_exhaustive]
pub struct PssOptions {
    /// The hash applied to the payload, [`DEFAULT_HASH_ALGORITHM`] by default.
    pub hash_algorithm: HashAlgorithm,
    /// The salt length, derived from the digest size by default.
    pub salt_length: SaltLength,
    /// Overrides the mask generation function, which is MGF1 over
    /// [`hash_algorithm`](Self::hash_algorithm) by default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask_generation_function: Option<MaskGenerationFunction>,
}

impl PssOptions {
    /// Creates the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the hash algorithm.
    pub fn hash_algorithm(mut self, hash_algorithm: HashAlgorithm) -> Self {
        self.hash_algorithm = hash_algorithm;
        self
    }

    /// Sets the salt length.
    pub fn salt_length(mut self, salt_length: SaltLength) -> Self {
        self.salt_length = salt_length;
        self
    }

    /// Overrides the mask generation function.
    pub fn mask_generation_function(mut self, mgf: MaskGenerationFunction) -> Self {
        self.mask_generation_function = Some(mgf);
        self
    }
}

/// The RSASSA-PSS [`SignAlgorithm`].
///
/// An instance is immutable once constructed and can be shared between
/// threads. Keys are imported on every call and dropped before it returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pss {
    hash: HashAlgorithm,
    salt_length: SaltLength,
    mgf: MaskGenerationFunction,
}

impl Default for Pss {
    fn default() -> Self {
        Self {
            hash: DEFAULT_HASH_ALGORITHM,
            salt_length: SaltLength::Auto,
            mgf: MaskGenerationFunction::Mgf1(DEFAULT_HASH_ALGORITHM),
        }
    }
}

impl Pss {
    /// Creates a new instance, checking the hash against the
    /// [`StandardPolicy`].
    ///
    /// # Errors
    ///
    /// - [`ConfigError::UnsupportedHashAlgorithm`] if the hash is not part of
    ///   the registry
    /// - [`ConfigError::DeprecatedHashAlgorithm`] if the hash is anything but
    ///   `sha512`
    /// - [`ConfigError::UnsupportedMaskGeneration`] if the mask generation
    ///   function is built on a hash outside the registry
    pub fn new(options: PssOptions) -> Result<Self, ConfigError> {
        Self::with_policy(options, &StandardPolicy::new())
    }

    /// Creates a new instance, checking the hash against the given policy.
    ///
    /// The registry check always runs first, so a policy can not enable a
    /// hash that has no constructor.
    ///
    /// # Errors
    ///
    /// Same as [`Pss::new`], with [`ConfigError::RejectedHashAlgorithm`] for
    /// custom policy failures.
    pub fn with_policy<P>(options: PssOptions, policy: &P) -> Result<Self, ConfigError>
    where
        P: Policy + ?Sized,
    {
        let PssOptions {
            hash_algorithm: hash,
            salt_length,
            mask_generation_function,
        } = options;

        if !hash.is_registered() {
            log::debug!("hash algorithm `{hash}` is not part of the registry");
            return Err(ConfigError::UnsupportedHashAlgorithm(hash));
        }

        if let Err(fail) = policy.hash_algorithm(&hash) {
            log::debug!("hash algorithm `{hash}` denied by policy: {fail}");
            return Err(match fail {
                PolicyFail::Deprecated { endorsed } => ConfigError::DeprecatedHashAlgorithm {
                    requested: hash,
                    endorsed,
                },
                PolicyFail::Custom(reason) => ConfigError::RejectedHashAlgorithm {
                    requested: hash,
                    reason,
                },
            });
        }

        let mgf = mask_generation_function.unwrap_or(MaskGenerationFunction::Mgf1(hash.clone()));
        let MaskGenerationFunction::Mgf1(mgf_hash) = &mgf;
        if !mgf_hash.is_registered() {
            log::debug!("{mgf} is not built on a registered hash");
            return Err(ConfigError::UnsupportedMaskGeneration(mgf));
        }

        log::debug!("configured RSASSA-PSS with {hash}, {mgf}, salt length {salt_length:?}");

        Ok(Self {
            hash,
            salt_length,
            mgf,
        })
    }

    /// The hash applied to the payload.
    pub const fn hash_algorithm(&self) -> &HashAlgorithm {
        &self.hash
    }

    /// The configured salt length.
    pub const fn salt_length(&self) -> SaltLength {
        self.salt_length
    }

    /// The mask generation function.
    pub const fn mask_generation_function(&self) -> &MaskGenerationFunction {
        &self.mgf
    }

    /// Normalizes and hashes the payload, returning the digest and the
    /// effective salt length.
    fn prepare(&self, data: Payload<'_>) -> Result<(Vec<u8>, usize)> {
        let data = data.as_bytes()?;
        let hashed = self.hash.digest(data).map_err(Error::Signing)?;
        let salt_len = self.salt_length.resolve(hashed.len());
        Ok((hashed, salt_len))
    }
}

impl SignAlgorithm for Pss {
    fn sign(&self, private_key: &[u8], data: Payload<'_>) -> Result<Signature> {
        let (hashed, salt_len) = self.prepare(data)?;
        let key = PrivateKey::import(private_key)?;

        PaddingContext::new(key, &self.hash, &self.mgf, salt_len).sign(&hashed)
    }

    fn verify(&self, public_key: &[u8], data: Payload<'_>, signature: &[u8]) -> Result<bool> {
        let (hashed, salt_len) = self.prepare(data)?;
        let key = PublicKey::import(public_key)?;
        let context = PaddingContext::new(key, &self.hash, &self.mgf, salt_len);

        let Ok(signature) = base64::decode(signature) else {
            log::debug!("signature is not valid base64");
            return Ok(false);
        };

        Ok(context.verify(&hashed, &signature))
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn default_options_are_accepted() {
        let pss = Pss::new(PssOptions::default()).unwrap();
        assert_eq!(pss, Pss::default());
        assert_eq!(pss.hash_algorithm(), &HashAlgorithm::Sha512);
        assert_eq!(pss.salt_length(), SaltLength::Auto);
        assert_eq!(
            pss.mask_generation_function(),
            &MaskGenerationFunction::Mgf1(HashAlgorithm::Sha512)
        );
    }

    #[test]
    fn unknown_hash_is_unsupported() {
        let options = PssOptions::new().hash_algorithm("sha123".parse().unwrap());
        let err = Pss::new(options).unwrap_err();
        assert_eq!(err.to_string(), "Unsupported hash algorithm");
    }

    #[test]
    fn registered_hashes_other_than_sha512_are_deprecated() {
        let err = Pss::new(PssOptions::new().hash_algorithm(HashAlgorithm::Sha256)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Hash algorithm: sha256 is deprecated. Please use: sha512"
        );

        let err = Pss::new(PssOptions::new().hash_algorithm(HashAlgorithm::Sha1)).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::DeprecatedHashAlgorithm {
                requested: HashAlgorithm::Sha1,
                endorsed: HashAlgorithm::Sha512,
            }
        ));
    }

    #[test]
    fn registry_check_runs_before_policy() {
        struct AllowEverything;
        impl Policy for AllowEverything {
            fn hash_algorithm(&self, _: &HashAlgorithm) -> Result<(), PolicyFail> {
                Ok(())
            }
        }

        let options = PssOptions::new().hash_algorithm("sha999".parse().unwrap());
        assert!(matches!(
            Pss::with_policy(options, &AllowEverything),
            Err(ConfigError::UnsupportedHashAlgorithm(..))
        ));
    }

    #[test]
    fn custom_policy_failures_are_reported() {
        struct DenyEverything;
        impl Policy for DenyEverything {
            fn hash_algorithm(&self, _: &HashAlgorithm) -> Result<(), PolicyFail> {
                Err(PolicyFail::custom("nothing is allowed"))
            }
        }

        let err = Pss::with_policy(PssOptions::new(), &DenyEverything).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Hash algorithm: sha512 is not allowed: nothing is allowed"
        );
    }

    #[test]
    fn mgf1_over_a_different_hash_is_accepted() {
        let options = PssOptions::new()
            .mask_generation_function(MaskGenerationFunction::Mgf1(HashAlgorithm::Sha256));
        let pss = Pss::new(options).unwrap();
        assert_eq!(pss.hash_algorithm(), &HashAlgorithm::Sha512);
        assert_eq!(
            pss.mask_generation_function(),
            &MaskGenerationFunction::Mgf1(HashAlgorithm::Sha256)
        );
    }

    #[test]
    fn mgf1_over_an_unknown_hash_is_rejected() {
        let mgf = MaskGenerationFunction::Mgf1("sha999".parse().unwrap());
        let options = PssOptions::new().mask_generation_function(mgf.clone());
        assert_eq!(
            Pss::new(options),
            Err(ConfigError::UnsupportedMaskGeneration(mgf))
        );
    }

    #[test]
    fn explicit_default_mgf_is_accepted() {
        let options = PssOptions::new()
            .mask_generation_function(MaskGenerationFunction::Mgf1(HashAlgorithm::Sha512));
        assert!(Pss::new(options).is_ok());
    }

    #[test]
    fn salt_length_resolution() {
        assert_eq!(SaltLength::Auto.resolve(64), 64);
        assert_eq!(SaltLength::Fixed(0).resolve(64), 0);
        assert_eq!(SaltLength::Fixed(20).resolve(64), 20);
    }

    #[test]
    fn options_from_json() {
        let options: PssOptions = serde_json::from_str(
            r#"{
                "hash_algorithm": "sha512",
                "salt_length": 32,
                "mask_generation_function": { "mgf1": "sha512" }
            }"#,
        )
        .unwrap();

        assert_eq!(
            options,
            PssOptions::new()
                .salt_length(SaltLength::Fixed(32))
                .mask_generation_function(MaskGenerationFunction::Mgf1(HashAlgorithm::Sha512))
        );

        let options: PssOptions = serde_json::from_str(r#"{ "salt_length": null }"#).unwrap();
        assert_eq!(options, PssOptions::default());
    }

    #[test]
    fn unknown_hash_name_survives_deserialization() {
        let options: PssOptions =
            serde_json::from_str(r#"{ "hash_algorithm": "sha999" }"#).unwrap();
        assert_eq!(
            Pss::new(options),
            Err(ConfigError::UnsupportedHashAlgorithm(HashAlgorithm::Other(
                "sha999".into()
            )))
        );
    }

    #[test]
    fn verify_with_garbage_key_is_a_key_error() {
        // the key is imported before the signature is decoded
        let pss = Pss::default();
        assert!(matches!(
            pss.verify(b"not a key", "data".into(), b"!!!"),
            Err(Error::InvalidKey(..))
        ));
    }

    #[test]
    fn non_ascii_text_fails_before_key_import() {
        let pss = Pss::default();
        assert!(matches!(
            pss.sign(b"not a key", "\u{1f980}".into()),
            Err(Error::NonAsciiPayload)
        ));
    }
}
