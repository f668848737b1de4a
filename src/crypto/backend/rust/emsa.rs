//! EMSA-PSS encoding as defined in [section 9.1 of RFC 8017] for the case
//! where MGF1 runs over a different hash than the message digest, which the
//! PSS padding of the `rsa` crate can not express.
//!
//! [section 9.1 of RFC 8017]: <https://datatracker.ietf.org/doc/html/rfc8017#section-9.1>

use alloc::{boxed::Box, vec, vec::Vec};

use digest::DynDigest;
use subtle::ConstantTimeEq as _;

use super::BackendError;
use crate::{
    crypto::backend::interface::rsa::PssParams, hash::HashAlgorithm,
    pss::MaskGenerationFunction,
};

fn hasher(alg: &HashAlgorithm) -> Result<Box<dyn DynDigest>, BackendError> {
    Ok(match alg {
        HashAlgorithm::Sha1 => Box::new(sha1::Sha1::default()),
        HashAlgorithm::Sha256 => Box::new(sha2::Sha256::default()),
        HashAlgorithm::Sha512 => Box::new(sha2::Sha512::default()),
        HashAlgorithm::Other(..) => return Err(BackendError::UnsupportedHash(alg.clone())),
    })
}

/// Left pads `bytes` with zeros to exactly `len` bytes.
///
/// Returns `None` if `bytes` is already longer than that.
pub(super) fn left_pad(bytes: Vec<u8>, len: usize) -> Option<Vec<u8>> {
    let padding = len.checked_sub(bytes.len())?;
    let mut out = vec![0; padding];
    out.extend_from_slice(&bytes);
    Some(out)
}

pub(super) struct Emsa {
    digest: Box<dyn DynDigest>,
    mgf: Box<dyn DynDigest>,
}

impl Emsa {
    pub(super) fn new(params: PssParams<'_>) -> Result<Self, BackendError> {
        let MaskGenerationFunction::Mgf1(mgf) = params.mgf;
        Ok(Self {
            digest: hasher(params.digest)?,
            mgf: hasher(mgf)?,
        })
    }

    /// `H = Hash(0x00 * 8 || mHash || salt)`
    fn hash_prime(&mut self, m_hash: &[u8], salt: &[u8]) -> Box<[u8]> {
        self.digest.update(&[0; 8]);
        self.digest.update(m_hash);
        self.digest.update(salt);
        self.digest.finalize_reset()
    }

    /// XORs MGF1 over `seed` into `db`.
    fn mask(&mut self, seed: &[u8], db: &mut [u8]) {
        let block_len = self.mgf.output_size();
        for (counter, chunk) in (0u32..).zip(db.chunks_mut(block_len)) {
            self.mgf.update(seed);
            self.mgf.update(&counter.to_be_bytes());
            let block = self.mgf.finalize_reset();
            chunk.iter_mut().zip(block.iter()).for_each(|(b, m)| *b ^= m);
        }
    }

    /// Encodes the message digest into an `emBits` long message
    /// representative.
    pub(super) fn encode(
        mut self,
        m_hash: &[u8],
        em_bits: usize,
        salt: &[u8],
    ) -> Result<Vec<u8>, BackendError> {
        let h_len = self.digest.output_size();
        let s_len = salt.len();
        let em_len = em_bits.div_ceil(8);

        if m_hash.len() != h_len {
            return Err(::rsa::errors::Error::InputNotHashed.into());
        }
        if em_len < h_len + s_len + 2 {
            return Err(BackendError::ModulusTooSmall);
        }

        let h = self.hash_prime(m_hash, salt);

        // EM = maskedDB || H || 0xbc with DB = PS || 0x01 || salt
        let mut em = vec![0; em_len];
        let (db, tail) = em.split_at_mut(em_len - h_len - 1);
        let ps_len = db.len() - s_len - 1;
        db[ps_len] = 0x01;
        db[ps_len + 1..].copy_from_slice(salt);
        self.mask(&h, db);
        db[0] &= 0xffu8 >> (8 * em_len - em_bits);

        tail[..h_len].copy_from_slice(&h);
        tail[h_len] = 0xbc;

        Ok(em)
    }

    /// Checks that `em` is a valid encoding of the message digest with a salt
    /// of exactly `s_len` bytes.
    pub(super) fn verify(mut self, m_hash: &[u8], em: &[u8], em_bits: usize, s_len: usize) -> bool {
        let h_len = self.digest.output_size();
        let em_len = em_bits.div_ceil(8);

        if m_hash.len() != h_len || em.len() != em_len || em_len < h_len + s_len + 2 {
            return false;
        }
        let Some((&0xbc, rest)) = em.split_last() else {
            return false;
        };

        let (masked_db, h) = rest.split_at(em_len - h_len - 1);
        let top = 0xffu8 >> (8 * em_len - em_bits);
        if masked_db[0] & !top != 0 {
            return false;
        }

        let mut db = masked_db.to_vec();
        self.mask(h, &mut db);
        db[0] &= top;

        let (ps, rest) = db.split_at(db.len() - s_len - 1);
        if ps.iter().any(|&b| b != 0) || rest[0] != 0x01 {
            return false;
        }

        let expected = self.hash_prime(m_hash, &rest[1..]);
        expected.ct_eq(h).into()
    }
}
