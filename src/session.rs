//! The auth session store: token, info, and expiration over a key-value
//! backend, plus expiry-derived status.

use std::fmt;

use chrono::Local;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::config::SessionConfig;
use crate::error::{SessionError, StoreError};
use crate::expiration::{format_instant, parse_instant, ExpiresAt};
use crate::store::KeyValueStore;

/// Coarse session status derived from the stored expiration and the wall
/// clock at the moment of the call. Never stored, never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// No expiration stored, or the instant has passed
    Expired,
    /// Still valid, but within the configured threshold of expiring
    Expiring,
    Valid,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SessionStatus::Expired => "expired",
            SessionStatus::Expiring => "expiring",
            SessionStatus::Valid => "valid",
        };
        write!(f, "{}", label)
    }
}

/// Aggregate read of the three session fields. Each is independently
/// present or absent; no integrity between them is enforced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData {
    pub token: Option<String>,
    pub expiration: Option<String>,
    pub info: Option<Value>,
}

/// Persists an auth token, opaque caller info, and an expiration timestamp
/// under three derived keys in a `KeyValueStore`.
///
/// The store itself holds only fixed configuration, so concurrent callers
/// simply race on the backend under its own guarantees.
pub struct AuthSessionStore<S: KeyValueStore> {
    store: S,
    token_key: String,
    info_key: String,
    expiration_key: String,
    expiring_diff_seconds: i64,
}

impl<S: KeyValueStore> AuthSessionStore<S> {
    /// Create a store with the default config (`jwt` prefix, 300s threshold).
    pub fn new(store: S) -> Self {
        Self::with_config(store, SessionConfig::default())
    }

    pub fn with_config(store: S, config: SessionConfig) -> Self {
        Self {
            store,
            token_key: format!("{}_auth_token", config.key_prefix),
            info_key: format!("{}_auth_info", config.key_prefix),
            expiration_key: format!("{}_auth_expiration", config.key_prefix),
            expiring_diff_seconds: config.expiring_diff_seconds,
        }
    }

    // ===== Token =====

    pub fn token(&self) -> Result<Option<String>, StoreError> {
        self.store.get(&self.token_key)
    }

    pub fn set_token(&self, token: &str) -> Result<(), StoreError> {
        self.store.set(&self.token_key, token)?;
        debug!(key = %self.token_key, "updated auth token");
        Ok(())
    }

    pub fn remove_token(&self) -> Result<(), StoreError> {
        self.store.remove(&self.token_key)
    }

    // ===== Info =====

    /// Read and deserialize the stored info value.
    ///
    /// A storage miss is `Ok(None)`; a stored string that is not valid JSON
    /// is a hard `MalformedInfo` error.
    pub fn info<T: DeserializeOwned>(&self) -> Result<Option<T>, SessionError> {
        match self.store.get(&self.info_key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn set_info<T: Serialize + ?Sized>(&self, info: &T) -> Result<(), SessionError> {
        let raw = serde_json::to_string(info)?;
        self.store.set(&self.info_key, &raw)?;
        Ok(())
    }

    pub fn remove_info(&self) -> Result<(), StoreError> {
        self.store.remove(&self.info_key)
    }

    // ===== Expiration =====

    /// Raw stored expiration string (`YYYY-MM-DD HH:mm:ss`), not parsed.
    pub fn expiration(&self) -> Result<Option<String>, StoreError> {
        self.store.get(&self.expiration_key)
    }

    /// Resolve and store an expiration instant.
    ///
    /// Returns `Ok(false)` without writing anything if the value is a string
    /// that does not parse as a date/time. This is deliberately softer than
    /// `refresh_token_and_expiration`, which escalates the same condition to
    /// an error.
    pub fn set_expiration(&self, value: impl Into<ExpiresAt>) -> Result<bool, StoreError> {
        match value.into().resolve() {
            Some(instant) => {
                self.store
                    .set(&self.expiration_key, &format_instant(&instant))?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn remove_expiration(&self) -> Result<(), StoreError> {
        self.store.remove(&self.expiration_key)
    }

    // ===== Session lifecycle =====

    /// Aggregate read of token, expiration, and info. Absent info is `None`;
    /// only malformed stored JSON errors.
    pub fn session_data(&self) -> Result<SessionData, SessionError> {
        Ok(SessionData {
            token: self.token()?,
            expiration: self.expiration()?,
            info: self.info()?,
        })
    }

    /// Login: store token and expiration, then info.
    ///
    /// Fails like `refresh_token_and_expiration` if `expiration` is present
    /// but invalid; in that case the info is not written.
    pub fn set_session_data<T: Serialize + ?Sized>(
        &self,
        token: &str,
        info: &T,
        expiration: Option<ExpiresAt>,
    ) -> Result<(), SessionError> {
        self.refresh_token_and_expiration(token, expiration)?;
        self.set_info(info)
    }

    /// Logout: remove all three keys.
    ///
    /// Every removal is attempted even if an earlier one fails; the first
    /// error (if any) is reported afterwards. There is no rollback.
    pub fn remove_session_data(&self) -> Result<(), StoreError> {
        let removals = [
            self.store.remove(&self.token_key),
            self.store.remove(&self.info_key),
            self.store.remove(&self.expiration_key),
        ];
        debug!(token_key = %self.token_key, "cleared session data");
        removals.into_iter().collect()
    }

    /// Token refresh: write the token, then update the expiration.
    ///
    /// `None` leaves the stored expiration untouched. A `Some` value that
    /// fails to resolve is an `InvalidExpiration` error; the token has
    /// already been written at that point, so a failed refresh still
    /// updates the token.
    pub fn refresh_token_and_expiration(
        &self,
        token: &str,
        expiration: Option<ExpiresAt>,
    ) -> Result<(), SessionError> {
        self.set_token(token)?;
        if let Some(value) = expiration {
            let shown = value.to_string();
            if !self.set_expiration(value)? {
                return Err(SessionError::InvalidExpiration(shown));
            }
        }
        Ok(())
    }

    // ===== Status =====

    /// Derive the session status from the stored expiration and the clock.
    pub fn status(&self) -> Result<SessionStatus, StoreError> {
        let remaining = match self.remaining()? {
            Some(secs) => secs,
            None => return Ok(SessionStatus::Expired),
        };
        if remaining < 0 {
            Ok(SessionStatus::Expired)
        } else if remaining <= self.expiring_diff_seconds {
            Ok(SessionStatus::Expiring)
        } else {
            Ok(SessionStatus::Valid)
        }
    }

    /// Whole seconds until expiry, truncated toward zero; may be negative.
    /// 0 when no expiration is stored.
    pub fn remaining_seconds(&self) -> Result<i64, StoreError> {
        Ok(self.remaining()?.unwrap_or(0))
    }

    /// Seconds until the stored expiration, `None` when absent. A stored
    /// value that no longer parses (external corruption) counts as absent.
    fn remaining(&self) -> Result<Option<i64>, StoreError> {
        let Some(raw) = self.expiration()? else {
            return Ok(None);
        };
        let Some(instant) = parse_instant(&raw) else {
            debug!(value = %raw, "stored expiration is unparseable, treating as absent");
            return Ok(None);
        };
        Ok(Some((instant - Local::now()).num_seconds()))
    }
}

// ============================================================================
// Tests
// ============================================================================
