//! Pluggable signature algorithms for signing and verifying byte payloads,
//! such as the canonicalized components of an HTTP message.
//!
//! The only algorithm right now is [RSASSA-PSS](Pss), registered under the
//! `hs2019` scheme identifier. It hashes the payload with SHA-512, the only
//! hash that is still endorsed, and uses a salt as long as the digest unless
//! configured otherwise.
//!
//! ```
//! use httpsig::{Pss, PssOptions, SignAlgorithm};
//!
//! # fn run(private: &[u8], public: &[u8]) -> Result<(), Box<dyn std::error::Error>> {
//! let pss = Pss::new(PssOptions::default())?;
//!
//! let signature = pss.sign(private, "(request-target): post /foo".into())?;
//! assert_eq!(signature.len(), 256);
//!
//! // `verify` takes the signature as base64 text, not as raw bytes
//! let encoded = signature.to_base64();
//! assert!(pss.verify(public, "(request-target): post /foo".into(), encoded.as_bytes())?);
//! assert!(!pss.verify(public, "tampered".into(), encoded.as_bytes())?);
//! # Ok(())
//! # }
//! ```
#![warn(
    missing_docs,
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    explicit_outlives_requirements,
    clippy::missing_const_for_fn,
    clippy::missing_errors_doc
)]
#![deny(
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    macro_use_extern_crate,
    non_ascii_idents,
    elided_lifetimes_in_paths
)]
#![forbid(unsafe_code)]
#![no_std]

extern crate alloc;

#[macro_use]
mod macros;

mod sign;
pub use sign::*;

pub mod base64;
pub mod crypto;
pub mod hash;
pub mod policy;
pub mod pss;
pub mod scheme;

pub use pss::{ConfigError, Pss, PssOptions};
pub use scheme::Algorithm;
