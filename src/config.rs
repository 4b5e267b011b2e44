//! Session store configuration.
//!
//! The prefix and threshold are plain fields on an explicitly constructed
//! instance, injected into `AuthSessionStore::with_config` — there is no
//! process-wide configuration.

use serde::{Deserialize, Serialize};

/// Default key-namespace prefix
pub const DEFAULT_KEY_PREFIX: &str = "jwt";

/// Default number of seconds before expiry at which status becomes `Expiring`
pub const DEFAULT_EXPIRING_DIFF_SECONDS: i64 = 300;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Prefix for the derived storage keys
    /// (`{prefix}_auth_token`, `{prefix}_auth_info`, `{prefix}_auth_expiration`)
    pub key_prefix: String,
    /// Remaining-seconds threshold at which a still-valid session is
    /// reported as `Expiring`
    pub expiring_diff_seconds: i64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            expiring_diff_seconds: DEFAULT_EXPIRING_DIFF_SECONDS,
        }
    }
}
