//! Team token issuance
//!
//! Tokens authenticate a team to the rest of the platform. They are drawn from the
//! operating system's CSPRNG and are never accepted from user input.

use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use super::validation::TeamValidationError;

/// Number of random bytes behind each token
pub const TOKEN_BYTES: usize = 8;

/// Length of the hex-encoded token
pub const TOKEN_LENGTH: usize = TOKEN_BYTES * 2;

/// Secret team credential: 16 lowercase hex characters
///
/// `Debug` output is redacted so tokens cannot leak through logs or panics.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TeamToken(String);

impl TeamToken {
    /// Issue a fresh token
    ///
    /// Panics if the OS entropy source is unavailable; there is no safe fallback.
    pub fn generate() -> Self {
        let mut bytes = [0u8; TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        Self(hex::encode(bytes))
    }

    /// Get the secret value
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Compare against a presented token without short-circuiting
    pub fn matches(&self, presented: &str) -> bool {
        constant_time_compare(&self.0, presented)
    }

    fn parse(value: String) -> Result<Self, TeamValidationError> {
        let well_formed = value.len() == TOKEN_LENGTH
            && value
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));

        if !well_formed {
            return Err(TeamValidationError::InvalidToken(TOKEN_LENGTH));
        }

        Ok(Self(value))
    }
}

impl TryFrom<String> for TeamToken {
    type Error = TeamValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<TeamToken> for String {
    fn from(token: TeamToken) -> Self {
        token.0
    }
}

impl std::fmt::Debug for TeamToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("TeamToken([REDACTED])")
    }
}

/// Constant-time string comparison to prevent timing attacks
pub(crate) fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.bytes()
        .zip(b.bytes())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn is_lower_hex(s: &str) -> bool {
        s.bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
    }

    #[test]
    fn test_generate_format() {
        for _ in 0..1_000 {
            let token = TeamToken::generate();
            assert_eq!(token.as_str().len(), 16);
            assert!(is_lower_hex(token.as_str()), "bad token {}", token.as_str());
        }
    }

    #[test]
    fn test_generate_uniqueness() {
        let tokens: HashSet<String> = (0..10_000)
            .map(|_| TeamToken::generate().as_str().to_string())
            .collect();

        assert_eq!(tokens.len(), 10_000);
    }

    #[test]
    fn test_generate_concurrently() {
        let handles: Vec<_> = (0..8)
            .map(|_| std::thread::spawn(|| (0..250).map(|_| TeamToken::generate()).collect::<Vec<_>>()))
            .collect();

        let tokens: HashSet<TeamToken> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();

        assert_eq!(tokens.len(), 2_000);
    }

    #[test]
    fn test_debug_is_redacted() {
        let token = TeamToken::generate();
        let debug = format!("{:?}", token);

        assert!(!debug.contains(token.as_str()));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn test_deserialize_valid() {
        let token: TeamToken = serde_json::from_str("\"0123456789abcdef\"").unwrap();
        assert_eq!(token.as_str(), "0123456789abcdef");
    }

    #[test]
    fn test_deserialize_rejects_malformed() {
        assert!(serde_json::from_str::<TeamToken>("\"0123456789ABCDEF\"").is_err());
        assert!(serde_json::from_str::<TeamToken>("\"0123\"").is_err());
        assert!(serde_json::from_str::<TeamToken>("\"zzzzzzzzzzzzzzzz\"").is_err());
    }

    #[test]
    fn test_matches() {
        let token = TeamToken::try_from("00112233aabbccdd".to_string()).unwrap();

        assert!(token.matches("00112233aabbccdd"));
        assert!(!token.matches("00112233aabbccde"));
        assert!(!token.matches("00112233"));
    }

    #[test]
    fn test_constant_time_compare() {
        assert!(constant_time_compare("hello", "hello"));
        assert!(!constant_time_compare("hello", "world"));
        assert!(!constant_time_compare("hello", "hell"));
    }
}
