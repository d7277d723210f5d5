//! Authentication boundary.
//!
//! Sign-in is delegated to an external identity backend behind the
//! [`AuthClient`] trait; this module only owns the message translation the
//! UI needs. Two backend error messages are well known and get localized
//! strings; everything else passes through with its raw message. Sign-up
//! is disabled at the product level.

use std::sync::Arc;

use async_trait::async_trait;
use log::{info, warn};
use thiserror::Error;

/// Informational message shown when a sign-up is attempted.
pub const SIGN_UP_DISABLED_MESSAGE: &str =
    "Die Registrierung ist deaktiviert. Bitte wenden Sie sich an den Betreiber.";

const INVALID_CREDENTIALS_MESSAGE: &str = "Ungültige E-Mail oder Passwort";
const EMAIL_NOT_CONFIRMED_MESSAGE: &str =
    "E-Mail noch nicht bestätigt. Bitte überprüfen Sie Ihr Postfach.";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AuthError {
    #[error("{0}")]
    Backend(String),
    #[error("{}", SIGN_UP_DISABLED_MESSAGE)]
    SignUpDisabled,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuthSession {
    pub user_email: String,
}

/// Interface to the hosted identity backend. Email+password only.
#[async_trait]
pub trait AuthClient: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError>;
    async fn sign_out(&self) -> Result<(), AuthError>;
}

/// Translate known backend error messages into user-facing strings.
/// Unknown messages pass through untouched.
pub fn translate_auth_error(message: &str) -> String {
    if message.contains("Invalid login credentials") {
        INVALID_CREDENTIALS_MESSAGE.to_string()
    } else if message.contains("Email not confirmed") {
        EMAIL_NOT_CONFIRMED_MESSAGE.to_string()
    } else {
        message.to_string()
    }
}

#[derive(Clone)]
pub struct AuthService {
    client: Arc<dyn AuthClient>,
}

impl AuthService {
    pub fn new(client: Arc<dyn AuthClient>) -> Self {
        Self { client }
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        match self.client.sign_in(email, password).await {
            Ok(session) => {
                info!("Sign-in successful for {}", session.user_email);
                Ok(session)
            }
            Err(AuthError::Backend(message)) => {
                warn!("Sign-in failed: {}", message);
                Err(AuthError::Backend(translate_auth_error(&message)))
            }
            Err(other) => Err(other),
        }
    }

    /// Sign-up is disabled; callers get the informational message only.
    pub fn sign_up(&self) -> Result<(), AuthError> {
        Err(AuthError::SignUpDisabled)
    }

    pub async fn sign_out(&self) -> Result<(), AuthError> {
        self.client.sign_out().await
    }
}
