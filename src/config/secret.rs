//! Access token handling
//!
//! The Figma personal access token is held in a [`SecretString`]. Its memory
//! is zeroed on drop and `Debug` prints `[REDACTED]`; the client reads it with
//! `expose_secret()` only where the `X-FIGMA-TOKEN` header is built.
//!
//! # Example
//!
//! ```rust
//! use figma_exporter::config::secret_string;
//! use secrecy::ExposeSecret;
//!
//! let token = secret_string("figd_abc".to_string());
//! assert_eq!(token.expose_secret().as_ref(), "figd_abc");
//! assert!(!format!("{token:?}").contains("figd_abc"));
//! ```

use secrecy::{CloneableSecret, DebugSecret, Secret, SerializableSecret};
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

/// Raw token text, only reachable through [`secrecy::ExposeSecret`]
#[derive(Clone, Debug, Serialize, Deserialize, Zeroize)]
#[serde(transparent)]
#[zeroize(drop)]
pub struct TokenValue(String);

impl CloneableSecret for TokenValue {}
impl DebugSecret for TokenValue {}
impl SerializableSecret for TokenValue {}

impl From<String> for TokenValue {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl AsRef<str> for TokenValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for TokenValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl TokenValue {
    /// True for an empty or whitespace-only token
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

pub type SecretString = Secret<TokenValue>;

/// Wrap a token in a [`SecretString`]
#[inline]
pub fn secret_string(value: String) -> SecretString {
    Secret::new(TokenValue::from(value))
}
