//! Opaque wrapper for ZeroBug tokens and admin keys

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

const REDACTED: &str = "****";

/// A credential that never shows up in logs, debug output or JSON.
///
/// The raw value is only reachable through [`SecretToken::reveal`].
#[derive(Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct SecretToken(String);

impl SecretToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the cleartext value.
    pub fn reveal(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for SecretToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretToken({})", REDACTED)
    }
}

impl fmt::Display for SecretToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl Serialize for SecretToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(REDACTED)
    }
}

/// Picks the per-build token, falling back to the configured default when
/// the build did not supply one (or supplied a blank one).
pub fn resolve_token(
    per_build: Option<SecretToken>,
    default: Option<&SecretToken>,
) -> Option<SecretToken> {
    per_build
        .filter(|token| !token.is_blank())
        .or_else(|| default.cloned())
}
