use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use rand::{distributions::Alphanumeric, thread_rng, Rng};

/// Length of a session token in characters.
pub const SESSION_TOKEN_LEN: usize = 64;

/// Generate a cryptographically secure random session token.
pub fn generate_session_token() -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SESSION_TOKEN_LEN)
        .map(char::from)
        .collect()
}

/// Expiry timestamp for a session starting now, in fixed-width RFC 3339.
#[must_use]
pub fn session_expiry(ttl: Duration) -> String {
    let ttl = chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX);
    let expires = Utc::now().checked_add_signed(ttl).unwrap_or(DateTime::<Utc>::MAX_UTC);
    expires.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Whether a stored expiry timestamp is in the past. Unparseable values
/// count as expired.
#[must_use]
pub fn is_expired(expires_at: &str) -> bool {
    DateTime::parse_from_rfc3339(expires_at)
        .map_or(true, |expires| expires.with_timezone(&Utc) <= Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_session_token() {
        let token1 = generate_session_token();
        let token2 = generate_session_token();

        assert_eq!(token1.len(), 64);
        assert_eq!(token2.len(), 64);
        assert_ne!(token1, token2); // Should be unique
        assert!(token1.chars().all(|c| c.is_alphanumeric()));
    }

    #[test]
    fn test_session_expiry() {
        let expiry = session_expiry(Duration::from_secs(3600));
        assert!(expiry.ends_with('Z'));
        assert!(!is_expired(&expiry));

        assert!(is_expired("2000-01-01T00:00:00Z"));
        assert!(is_expired("garbage"));
    }
}
