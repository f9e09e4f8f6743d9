//! PSK authentication gate.
//!
//! Queries authenticate by carrying the configured pre-shared key as
//! an exact prefix of the query line, with no delimiter between the
//! key and the search term.

use crate::core::error::{LineQueryError, Result};

/// Validates the PSK prefix on incoming queries.
///
/// When authentication is disabled every query passes through
/// unchanged.
#[derive(Debug, Clone)]
pub struct AuthGate {
    psk: Option<String>,
}

impl AuthGate {
    /// Create a gate from the configured auth flag and key.
    pub fn new(psk_auth: bool, psk: &str) -> Self {
        Self {
            psk: psk_auth.then(|| psk.to_string()),
        }
    }

    /// Whether PSK authentication is enforced.
    pub fn enabled(&self) -> bool {
        self.psk.is_some()
    }

    /// Check the PSK prefix and return the search term.
    ///
    /// The comparison is a plain prefix match, not constant-time.
    pub fn authenticate<'a>(&self, query: &'a str) -> Result<&'a str> {
        match &self.psk {
            None => Ok(query),
            Some(psk) => query
                .strip_prefix(psk.as_str())
                .ok_or(LineQueryError::AuthFailed),
        }
    }
}
