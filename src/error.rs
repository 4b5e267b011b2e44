use thiserror::Error;

/// Failures from a `KeyValueStore` backend.
///
/// These pass through the session layer untranslated.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("keychain error: {0}")]
    Keychain(#[from] keyring::Error),

    #[error("could not determine a cache directory")]
    NoCacheDir,
}

/// Failures from `AuthSessionStore` operations.
#[derive(Error, Debug)]
pub enum SessionError {
    /// The stored info value is not valid JSON (or the caller's info value
    /// could not be serialized).
    #[error("session info is not valid JSON: {0}")]
    MalformedInfo(#[from] serde_json::Error),

    /// A refresh or aggregate set was given an expiration that could not be
    /// resolved to an instant. The plain `set_expiration` reports the same
    /// condition as `Ok(false)` instead.
    #[error("invalid expiration value: {0}")]
    InvalidExpiration(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}
