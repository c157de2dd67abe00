//! Session cookie handling

use crate::error::AocError;
use reqwest::header::HeaderValue;
use std::fmt;
use zeroize::{Zeroize, Zeroizing};

/// Environment variable holding the session cookie
pub const SESSION_ENV_VAR: &str = "AOC_SESSION";

/// The `session` cookie value proving a site login
///
/// The value is zeroized on drop and never shows up in `Debug` output.
#[derive(Clone)]
pub struct Credential {
    session: Zeroizing<String>,
}

impl Credential {
    /// Wrap a session cookie value (without the `session=` prefix)
    pub fn new(session: impl Into<String>) -> Self {
        Self {
            session: Zeroizing::new(session.into()),
        }
    }

    /// Read the session cookie from `AOC_SESSION`
    ///
    /// # Errors
    ///
    /// Returns `AocError::Config` if the variable is unset or empty.
    pub fn from_env() -> Result<Self, AocError> {
        let session = std::env::var(SESSION_ENV_VAR)
            .map_err(|e| AocError::Config(format!("{}: {}", SESSION_ENV_VAR, e)))?;
        if session.trim().is_empty() {
            return Err(AocError::Config(format!("{} is empty", SESSION_ENV_VAR)));
        }
        Ok(Self::new(session.trim()))
    }

    /// Build the `Cookie` header value
    ///
    /// The header is flagged sensitive and the temporary string is zeroized.
    pub(crate) fn cookie_header(&self) -> Result<HeaderValue, AocError> {
        let mut cookie_string = format!("session={}", self.session.as_str());
        let header_value = HeaderValue::from_bytes(cookie_string.as_bytes());
        cookie_string.zeroize();

        let mut header_value = header_value
            .map_err(|_| AocError::ClientInit("Invalid session cookie format".to_string()))?;
        header_value.set_sensitive(true);
        Ok(header_value)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("session", &"<redacted>")
            .finish()
    }
}
