//! Confirmation phrase gate for destructive operations.
//!
//! A deliberately low bar against accidental clicks, not a security
//! boundary: the operator must type a fixed shared phrase before a bulk
//! delete runs. There is no per-user identity here; real access control is
//! the authentication layer's job.

use anyhow::{anyhow, Result};
use log::warn;

/// Default phrase operators must type to confirm a bulk delete.
pub const DEFAULT_CONFIRMATION_PHRASE: &str = "123456";

#[derive(Debug, Clone)]
pub struct ConfirmationGate {
    phrase: String,
}

impl Default for ConfirmationGate {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfirmationGate {
    pub fn new() -> Self {
        Self {
            phrase: DEFAULT_CONFIRMATION_PHRASE.to_string(),
        }
    }

    pub fn with_phrase(phrase: impl Into<String>) -> Self {
        Self {
            phrase: phrase.into(),
        }
    }

    /// Exact match; no trimming or case folding.
    pub fn verify(&self, attempt: &str) -> bool {
        attempt == self.phrase
    }

    /// Gate an operation: error before any I/O if the phrase is wrong.
    pub fn require(&self, attempt: &str) -> Result<()> {
        if self.verify(attempt) {
            Ok(())
        } else {
            warn!("Confirmation phrase mismatch (length {})", attempt.len());
            Err(anyhow!("Confirmation phrase does not match"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_phrase_is_accepted() {
        let gate = ConfirmationGate::new();
        assert!(gate.verify(DEFAULT_CONFIRMATION_PHRASE));
        assert!(gate.require(DEFAULT_CONFIRMATION_PHRASE).is_ok());
    }

    #[test]
    fn test_wrong_phrase_is_rejected() {
        let gate = ConfirmationGate::new();
        assert!(!gate.verify("654321"));
        assert!(gate.require("654321").is_err());
    }

    #[test]
    fn test_match_is_exact() {
        let gate = ConfirmationGate::with_phrase("delete june");
        assert!(gate.verify("delete june"));
        assert!(!gate.verify(" delete june"));
        assert!(!gate.verify("Delete June"));
        assert!(!gate.verify(""));
    }
}
