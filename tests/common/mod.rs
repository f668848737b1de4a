//! Common test helpers.

#![allow(dead_code)]

pub type TestResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// The message that the signatures in `tests/vectors/signatures` were created
/// over.
pub const MESSAGE: &str = "the quick brown fox";

/// Reads a key file from the `tests/vectors/keys` directory.
pub fn read_key(name: &str) -> TestResult<Vec<u8>> {
    let key = std::fs::read(format!(
        "{}/tests/vectors/keys/{name}",
        env!("CARGO_MANIFEST_DIR"),
    ))?;

    Ok(key)
}

/// Reads a base64 encoded signature from the `tests/vectors/signatures`
/// directory.
pub fn read_signature(name: &str) -> TestResult<String> {
    let signature = std::fs::read_to_string(format!(
        "{}/tests/vectors/signatures/{name}.b64",
        env!("CARGO_MANIFEST_DIR"),
    ))?;

    Ok(signature)
}
