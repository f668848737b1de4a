use alloc::vec::Vec;

use ::rsa::{
    hazmat::{rsa_decrypt_and_check, rsa_encrypt},
    pkcs1::{DecodeRsaPrivateKey as _, DecodeRsaPublicKey as _},
    pkcs8::{DecodePrivateKey as _, DecodePublicKey as _},
    traits::PublicKeyParts as _,
    BigUint, Pss, RsaPrivateKey, RsaPublicKey,
};
use rand_core::RngCore as _;

use super::{
    emsa::{left_pad, Emsa},
    erase, BackendError,
};
use crate::{
    crypto::{
        backend::interface::rsa::{self, PssParams},
        PrimitiveError,
    },
    hash::HashAlgorithm,
    pss::MaskGenerationFunction,
};

/// Returns `true` if MGF1 runs over the message digest, which is the only
/// combination the PSS padding of the `rsa` crate supports.
fn mgf_matches_digest(params: PssParams<'_>) -> bool {
    let MaskGenerationFunction::Mgf1(mgf) = params.mgf;
    mgf == params.digest
}

/// Builds the padding scheme for one operation with MGF1 over the digest.
fn padding(params: PssParams<'_>, blinded: bool) -> Result<Pss, BackendError> {
    let salt_len = params.salt_len;
    let pad = match (params.digest, blinded) {
        (HashAlgorithm::Sha1, false) => Pss::new_with_salt::<sha1::Sha1>(salt_len),
        (HashAlgorithm::Sha1, true) => Pss::new_blinded_with_salt::<sha1::Sha1>(salt_len),
        (HashAlgorithm::Sha256, false) => Pss::new_with_salt::<sha2::Sha256>(salt_len),
        (HashAlgorithm::Sha256, true) => Pss::new_blinded_with_salt::<sha2::Sha256>(salt_len),
        (HashAlgorithm::Sha512, false) => Pss::new_with_salt::<sha2::Sha512>(salt_len),
        (HashAlgorithm::Sha512, true) => Pss::new_blinded_with_salt::<sha2::Sha512>(salt_len),
        (HashAlgorithm::Other(..), _) => {
            return Err(BackendError::UnsupportedHash(params.digest.clone()))
        }
    };

    Ok(pad)
}

/// A low level private RSA key.
#[derive(Clone)]
#[repr(transparent)]
pub(crate) struct PrivateKey {
    inner: RsaPrivateKey,
}

impl PrivateKey {
    /// RSASSA-PSS with an MGF1 hash that differs from the digest.
    fn sign_pss_with_mgf(
        &self,
        params: PssParams<'_>,
        hashed: &[u8],
    ) -> Result<Vec<u8>, BackendError> {
        let mut rng = rand_core::OsRng;
        let mut salt = alloc::vec![0; params.salt_len];
        rng.fill_bytes(&mut salt);

        let em_bits = self.inner.n().bits() - 1;
        let em = Emsa::new(params)?.encode(hashed, em_bits, &salt)?;

        let signature = rsa_decrypt_and_check(
            &self.inner,
            Some(&mut rng),
            &BigUint::from_bytes_be(&em),
        )?;
        left_pad(signature.to_bytes_be(), self.inner.size()).ok_or(BackendError::ModulusTooSmall)
    }
}

impl rsa::PrivateKey for PrivateKey {
    type PublicKey = PublicKey;
    type Signature = Vec<u8>;

    fn from_pkcs8_pem(pem: &str) -> Result<Self, PrimitiveError> {
        let inner = RsaPrivateKey::from_pkcs8_pem(pem).map_err(erase)?;
        Ok(Self { inner })
    }

    fn from_pkcs1_pem(pem: &str) -> Result<Self, PrimitiveError> {
        let inner = RsaPrivateKey::from_pkcs1_pem(pem).map_err(erase)?;
        Ok(Self { inner })
    }

    fn from_pkcs8_der(der: &[u8]) -> Result<Self, PrimitiveError> {
        let inner = RsaPrivateKey::from_pkcs8_der(der).map_err(erase)?;
        Ok(Self { inner })
    }

    fn from_pkcs1_der(der: &[u8]) -> Result<Self, PrimitiveError> {
        let inner = RsaPrivateKey::from_pkcs1_der(der).map_err(erase)?;
        Ok(Self { inner })
    }

    fn to_public_key(&self) -> Self::PublicKey {
        PublicKey {
            inner: self.inner.to_public_key(),
        }
    }

    fn size(&self) -> usize {
        self.inner.size()
    }

    fn sign_pss(
        &self,
        params: PssParams<'_>,
        hashed: &[u8],
    ) -> Result<Self::Signature, PrimitiveError> {
        if !mgf_matches_digest(params) {
            return self.sign_pss_with_mgf(params, hashed).map_err(erase);
        }

        let pad = padding(params, true).map_err(erase)?;
        let mut rng = rand_core::OsRng;

        let signature = self
            .inner
            .sign_with_rng(&mut rng, pad, hashed)
            .map_err(erase)?;
        Ok(signature)
    }
}

/// A low level public RSA key.
#[derive(Clone)]
#[repr(transparent)]
pub(crate) struct PublicKey {
    inner: RsaPublicKey,
}

impl PublicKey {
    /// RSASSA-PSS verification with an MGF1 hash that differs from the
    /// digest.
    fn verify_pss_with_mgf(&self, params: PssParams<'_>, hashed: &[u8], signature: &[u8]) -> bool {
        let emsa = match Emsa::new(params) {
            Ok(emsa) => emsa,
            Err(e) => {
                log::debug!("refusing to verify: {e}");
                return false;
            }
        };

        if signature.len() != self.inner.size() {
            log::debug!("RSASSA-PSS verification failed: signature has the wrong size");
            return false;
        }
        let s = BigUint::from_bytes_be(signature);
        if s >= *self.inner.n() {
            log::debug!("RSASSA-PSS verification failed: signature out of range");
            return false;
        }

        let em_bits = self.inner.n().bits() - 1;
        let em = rsa_encrypt(&self.inner, &s)
            .ok()
            .and_then(|m| left_pad(m.to_bytes_be(), em_bits.div_ceil(8)));
        let valid = em.is_some_and(|em| emsa.verify(hashed, &em, em_bits, params.salt_len));

        if !valid {
            log::debug!("RSASSA-PSS verification failed: inconsistent encoding");
        }
        valid
    }
}

impl rsa::PublicKey for PublicKey {
    fn from_spki_pem(pem: &str) -> Result<Self, PrimitiveError> {
        let inner = RsaPublicKey::from_public_key_pem(pem).map_err(erase)?;
        Ok(Self { inner })
    }

    fn from_pkcs1_pem(pem: &str) -> Result<Self, PrimitiveError> {
        let inner = RsaPublicKey::from_pkcs1_pem(pem).map_err(erase)?;
        Ok(Self { inner })
    }

    fn from_spki_der(der: &[u8]) -> Result<Self, PrimitiveError> {
        let inner = RsaPublicKey::from_public_key_der(der).map_err(erase)?;
        Ok(Self { inner })
    }

    fn from_pkcs1_der(der: &[u8]) -> Result<Self, PrimitiveError> {
        let inner = RsaPublicKey::from_pkcs1_der(der).map_err(erase)?;
        Ok(Self { inner })
    }

    fn size(&self) -> usize {
        self.inner.size()
    }

    fn verify_pss(&self, params: PssParams<'_>, hashed: &[u8], signature: &[u8]) -> bool {
        if !mgf_matches_digest(params) {
            return self.verify_pss_with_mgf(params, hashed, signature);
        }

        let pad = match padding(params, false) {
            Ok(pad) => pad,
            Err(e) => {
                log::debug!("refusing to verify: {e}");
                return false;
            }
        };

        match self.inner.verify(pad, hashed, signature) {
            Ok(()) => true,
            Err(e) => {
                log::debug!("RSASSA-PSS verification failed: {e}");
                false
            }
        }
    }
}
