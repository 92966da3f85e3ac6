use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Utc};
use fractic_server_error::ServerError;

use crate::{
    entities::{AuthSessionCache, SessionClaims},
    errors::InvalidSessionToken,
};

pub(crate) fn decode_claims(token: &str) -> Result<SessionClaims, ServerError> {
    let mut parts = token.trim().split('.');
    let payload = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(_), Some(payload), Some(_), None) if !payload.is_empty() => payload,
        _ => return Err(InvalidSessionToken::new("expected three dot-separated parts")),
    };
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| InvalidSessionToken::with_debug("payload is not base64url", &e))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| InvalidSessionToken::with_debug("payload is not a JSON object", &e))
}

impl AuthSessionCache {
    pub fn new(access_token: String, refresh_token: Option<String>) -> Self {
        let expires_at = decode_claims(&access_token)
            .ok()
            .and_then(|c| c.expires_at());
        Self {
            access_token: Some(access_token),
            refresh_token,
            expires_at,
        }
    }

    pub fn claims(&self) -> Result<SessionClaims, ServerError> {
        match self.access_token.as_deref() {
            Some(token) => decode_claims(token),
            None => Err(InvalidSessionToken::new("no access token cached")),
        }
    }

    /// A cached session worth restoring: a token whose expiry is still ahead.
    pub fn usable_token(&self, now: DateTime<Utc>) -> Option<&str> {
        let token = self.access_token.as_deref()?;
        let expires_at = self
            .expires_at
            .or_else(|| decode_claims(token).ok().and_then(|c| c.expires_at()));
        match expires_at {
            Some(at) if at > now => Some(token),
            _ => None,
        }
    }
}

#[cfg(test)]
pub(crate) fn fake_token(email: &str, exp: i64) -> String {
    let payload = serde_json::json!({ "sub": "user-1", "email": email, "exp": exp });
    format!(
        "eyJhbGciOiJIUzI1NiJ9.{}.c2lnbmF0dXJl",
        URL_SAFE_NO_PAD.encode(payload.to_string())
    )
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone as _;

    use super::*;

    #[test]
    fn reads_claims_from_token() {
        let cache = AuthSessionCache::new(fake_token("ana@example.com", 1_717_243_200), None);
        let claims = cache.claims().unwrap();
        assert_eq!(claims.email.as_deref(), Some("ana@example.com"));
        assert_eq!(claims.sub.as_deref(), Some("user-1"));
        assert_eq!(
            cache.expires_at,
            Some(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap())
        );
    }

    #[test]
    fn rejects_malformed_tokens() {
        assert!(decode_claims("abc").is_err());
        assert!(decode_claims("a.!!!.c").is_err());
        assert!(decode_claims("a.b.c.d").is_err());
        assert!(AuthSessionCache::default().claims().is_err());
    }

    #[test]
    fn only_unexpired_tokens_are_usable() {
        let cache = AuthSessionCache::new(fake_token("ana@example.com", 1_717_243_200), None);
        let before = Utc.with_ymd_and_hms(2024, 6, 1, 11, 0, 0).unwrap();
        let after = Utc.with_ymd_and_hms(2024, 6, 1, 13, 0, 0).unwrap();
        assert!(cache.usable_token(before).is_some());
        assert!(cache.usable_token(after).is_none());
        assert!(AuthSessionCache::default().usable_token(before).is_none());
    }
}
