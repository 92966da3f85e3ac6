use chrono::{DateTime, Utc};

/// The claims the desk reads from a Supabase access token. The token is not
/// verified locally; the backend does that on every request.
#[derive(Debug, Clone, Default, PartialEq, serde_derive::Deserialize)]
pub struct SessionClaims {
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Expiry, seconds since the epoch.
    #[serde(default)]
    pub exp: Option<i64>,
}

impl SessionClaims {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|s| DateTime::from_timestamp(s, 0))
    }
}
