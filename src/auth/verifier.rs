//! Credential verification strategy.
//!
//! The login screen talks to a [`CredentialVerifier`] trait object, so a
//! real backend verifier can replace the shipped one without touching the
//! view. What ships is [`StaticCredentials`]: a single fixed pair, taken
//! from config.

use secrecy::{ExposeSecret, SecretString};

/// Decides whether a submitted username/password pair is valid.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, username: &str, password: &str) -> bool;
}

/// A single hard-wired credential pair.
///
/// The password is held as a [`SecretString`] so it never appears in
/// `Debug` output or logs.
pub struct StaticCredentials {
    username: String,
    password: SecretString,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }
}

impl Default for StaticCredentials {
    fn default() -> Self {
        Self::new("admin", "12345")
    }
}

impl CredentialVerifier for StaticCredentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        username == self.username && password == self.password.expose_secret()
    }
}

impl std::fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
