//! The interfaces for RSA.

use alloc::vec::Vec;

use crate::{crypto::PrimitiveError, hash::HashAlgorithm, pss::MaskGenerationFunction};

/// The parameters of a single RSASSA-PSS operation.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PssParams<'a> {
    /// The hash that produced the message digest.
    pub digest: &'a HashAlgorithm,
    /// The mask generation function used inside the encoding.
    pub mgf: &'a MaskGenerationFunction,
    /// The number of salt bytes.
    pub salt_len: usize,
}

/// The common operations for an RSA private key.
pub(crate) trait PrivateKey: Sized {
    /// The signature type that is produced by this key.
    type Signature: Into<Vec<u8>> + AsRef<[u8]>;

    /// The public key type.
    type PublicKey: PublicKey;

    /// Parses a PEM encoded `PRIVATE KEY` (PKCS#8) document.
    fn from_pkcs8_pem(pem: &str) -> Result<Self, PrimitiveError>;

    /// Parses a PEM encoded `RSA PRIVATE KEY` (PKCS#1) document.
    fn from_pkcs1_pem(pem: &str) -> Result<Self, PrimitiveError>;

    /// Parses a DER encoded PKCS#8 `PrivateKeyInfo`.
    fn from_pkcs8_der(der: &[u8]) -> Result<Self, PrimitiveError>;

    /// Parses a DER encoded PKCS#1 `RSAPrivateKey`.
    fn from_pkcs1_der(der: &[u8]) -> Result<Self, PrimitiveError>;

    /// Creates a new public key from this private key.
    fn to_public_key(&self) -> Self::PublicKey;

    /// The size of the modulus in bytes.
    fn size(&self) -> usize;

    /// Signs the already hashed message using RSASSA-PSS.
    ///
    /// The salt is drawn from a cryptographically secure random source on
    /// every call.
    fn sign_pss(&self, params: PssParams<'_>, hashed: &[u8])
        -> Result<Self::Signature, PrimitiveError>;
}

/// The common operations for an RSA public key.
pub(crate) trait PublicKey: Sized {
    /// Parses a PEM encoded `PUBLIC KEY` (SubjectPublicKeyInfo) document.
    fn from_spki_pem(pem: &str) -> Result<Self, PrimitiveError>;

    /// Parses a PEM encoded `RSA PUBLIC KEY` (PKCS#1) document.
    fn from_pkcs1_pem(pem: &str) -> Result<Self, PrimitiveError>;

    /// Parses a DER encoded `SubjectPublicKeyInfo`.
    fn from_spki_der(der: &[u8]) -> Result<Self, PrimitiveError>;

    /// Parses a DER encoded PKCS#1 `RSAPublicKey`.
    fn from_pkcs1_der(der: &[u8]) -> Result<Self, PrimitiveError>;

    /// The size of the modulus in bytes.
    fn size(&self) -> usize;

    /// Verifies the RSASSA-PSS signature over the already hashed message.
    ///
    /// Returns `true` if the signature is valid, `false` otherwise. Any
    /// structural problem with the signature is reported as `false`.
    fn verify_pss(&self, params: PssParams<'_>, hashed: &[u8], signature: &[u8]) -> bool;
}
