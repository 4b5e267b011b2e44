//! Client-side persistence of an authentication session.
//!
//! This crate provides:
//! - `AuthSessionStore`: get/set/remove access to a token, its metadata, and
//!   its expiration timestamp, plus a derived `valid`/`expiring`/`expired`
//!   status
//! - `KeyValueStore`: the pluggable storage seam, with in-memory,
//!   filesystem, and OS-keychain backends
//!
//! The session store holds no mutable state of its own; everything lives in
//! the backing key-value store, so two status calls can disagree without any
//! write in between as the wall clock advances.

pub mod config;
pub mod error;
pub mod expiration;
pub mod session;
pub mod store;

pub use config::SessionConfig;
pub use error::{SessionError, StoreError};
pub use expiration::{ExpiresAt, EXPIRATION_FORMAT};
pub use session::{AuthSessionStore, SessionData, SessionStatus};
pub use store::{FileStore, KeyValueStore, KeyringStore, MemoryStore};
