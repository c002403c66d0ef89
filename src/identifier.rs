//! Day-granularity build identifier shared with the ZeroBug service

use chrono::NaiveDate;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fmt;

use crate::secret::SecretToken;

/// Number of hex characters in an identifier (128 bits).
pub const IDENTIFIER_LEN: usize = 32;

/// Date layout fed into the hash.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Uppercase hex digest of `token + site + date`.
///
/// The same (token, site, day) always produces the same identifier, so two
/// builds of one site on one day share it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct BuildIdentifier(String);

impl BuildIdentifier {
    pub fn derive(token: &SecretToken, site: &str, date: NaiveDate) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(token.reveal().as_bytes());
        hasher.update(site.as_bytes());
        hasher.update(date.format(DATE_FORMAT).to_string().as_bytes());
        let digest = hasher.finalize();

        Self(hex::encode_upper(&digest[..IDENTIFIER_LEN / 2]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BuildIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn identical_inputs_yield_identical_identifier() {
        let token = SecretToken::new("token-123");
        let a = BuildIdentifier::derive(&token, "http://www.jenkins.com", day(2024, 3, 1));
        let b = BuildIdentifier::derive(&token, "http://www.jenkins.com", day(2024, 3, 1));
        assert_eq!(a, b);
    }

    #[test]
    fn identifier_is_32_uppercase_hex_chars() {
        let id = BuildIdentifier::derive(&SecretToken::new("t"), "site", day(2024, 1, 1));
        assert_eq!(id.as_str().len(), IDENTIFIER_LEN);
        assert!(
            id.as_str()
                .chars()
                .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c))
        );
    }

    #[test]
    fn distinct_days_give_distinct_identifiers() {
        let token = SecretToken::new("token");
        let start = day(2024, 1, 1);
        let ids: HashSet<_> = (0..60)
            .map(|offset| {
                let date = start + chrono::Days::new(offset);
                BuildIdentifier::derive(&token, "http://www.java.com", date)
            })
            .collect();
        assert_eq!(ids.len(), 60);
    }

    #[test]
    fn token_and_site_both_feed_the_hash() {
        let date = day(2024, 6, 15);
        let base = BuildIdentifier::derive(&SecretToken::new("a"), "site", date);
        assert_ne!(base, BuildIdentifier::derive(&SecretToken::new("b"), "site", date));
        assert_ne!(base, BuildIdentifier::derive(&SecretToken::new("a"), "other", date));
    }
}
