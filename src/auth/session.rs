//! Session flag over the key-value port.
//!
//! A single persisted boolean under `isAuth`, the same key the web client
//! uses. It is a logged-in marker, not a security token: anything with
//! access to the store file can flip it.

use crate::store::{KeyValueStore, StoreError};
use std::sync::Arc;

/// Store key holding the session flag literal.
pub const IS_AUTH_KEY: &str = "isAuth";

/// Read/write access to the session flag.
#[derive(Clone)]
pub struct Session {
    kv: Arc<dyn KeyValueStore>,
}

impl Session {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// True only when the stored literal is exactly `"true"`.
    ///
    /// `"false"`, the empty string, an absent key and any other value are
    /// all unauthenticated. A store read failure is treated the same way
    /// rather than surfaced: the gate fails closed.
    pub fn is_authenticated(&self) -> bool {
        match self.kv.get(IS_AUTH_KEY) {
            Ok(value) => value.as_deref() == Some("true"),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read session flag, treating as logged out");
                false
            }
        }
    }

    /// Persist the flag as the literal `"true"` or `"false"`.
    pub fn set_authenticated(&self, value: bool) -> Result<(), StoreError> {
        let literal = if value { "true" } else { "false" };
        self.kv.set(IS_AUTH_KEY, literal)?;
        tracing::info!(authenticated = value, "Session flag updated");
        Ok(())
    }
}
