//! The actual implementations for the cryptographic backends.

pub(crate) mod interface;

cfg_if::cfg_if! {
    if #[cfg(feature = "crypto-rustcrypto")] {
        mod rust;
        pub(crate) use rust::*;
    } else {
        compile_error!("no cryptographic backend selected, enable the `crypto-rustcrypto` feature");
    }
}
