//! Registration client.
//!
//! The only outbound HTTP call in the client: `POST {base}/register` with
//! a JSON `{username, password}` body. The backend's contract is
//! status-only — 200 created, 409 duplicate username, anything else is a
//! failure; no response body is consumed.

use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// Request timeout. The UI stays responsive while waiting, but a hung
/// server must not leave the submit spinner up forever.
const REGISTER_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum RegisterError {
    #[error("Username already exists (409)")]
    Conflict,
    #[error("Registration rejected: status {0}")]
    Rejected(u16),
    #[error("Request timed out after 10s")]
    Timeout,
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),
}

impl RegisterError {
    /// The message shown to the user, in the client's language.
    pub fn user_message(&self) -> &'static str {
        match self {
            RegisterError::Conflict => "Пользователь с таким именем уже существует",
            RegisterError::Rejected(_) => "Ошибка регистрации. Проверьте данные!",
            // The request never reached the server, or the server never
            // answered — same message either way.
            RegisterError::Timeout | RegisterError::Network(_) | RegisterError::InvalidBaseUrl(_) => {
                "Сервер не отвечает."
            }
        }
    }
}

#[derive(Serialize)]
struct RegisterBody<'a> {
    username: &'a str,
    password: &'a str,
}

/// Submit a registration request.
///
/// Success is status 200 exactly; the backend does not use other 2xx
/// codes. 409 maps to [`RegisterError::Conflict`], every other status to
/// [`RegisterError::Rejected`].
pub async fn register(
    client: &reqwest::Client,
    base_url: &str,
    username: &str,
    password: &str,
) -> Result<(), RegisterError> {
    let base = url::Url::parse(base_url)
        .map_err(|e| RegisterError::InvalidBaseUrl(format!("{}: {}", base_url, e)))?;
    let endpoint = base
        .join("register")
        .map_err(|e| RegisterError::InvalidBaseUrl(format!("{}: {}", base_url, e)))?;

    tracing::debug!(endpoint = %endpoint, username, "Submitting registration");

    let response = tokio::time::timeout(
        REGISTER_TIMEOUT,
        client
            .post(endpoint)
            .json(&RegisterBody { username, password })
            .send(),
    )
    .await
    .map_err(|_| RegisterError::Timeout)?
    .map_err(RegisterError::Network)?;

    match response.status().as_u16() {
        200 => {
            tracing::info!(username, "Registration accepted");
            Ok(())
        }
        409 => Err(RegisterError::Conflict),
        status => {
            tracing::warn!(status, "Registration rejected");
            Err(RegisterError::Rejected(status))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        assert_eq!(
            RegisterError::Conflict.user_message(),
            "Пользователь с таким именем уже существует"
        );
        assert_eq!(
            RegisterError::Rejected(500).user_message(),
            "Ошибка регистрации. Проверьте данные!"
        );
        assert_eq!(RegisterError::Timeout.user_message(), "Сервер не отвечает.");
        assert_eq!(
            RegisterError::InvalidBaseUrl("nope".into()).user_message(),
            "Сервер не отвечает."
        );
    }

    #[tokio::test]
    async fn test_invalid_base_url_rejected_without_request() {
        let client = reqwest::Client::new();
        let result = register(&client, "not a url", "user", "pass").await;
        assert!(matches!(result, Err(RegisterError::InvalidBaseUrl(_))));
    }
}
