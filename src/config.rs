use std::{env, path::PathBuf, time::Duration};

use fractic_server_error::ServerError;

use crate::errors::{InvalidConfigValue, MissingConfigValue};

pub const DEFAULT_BUCKET: &str = "rc-docs";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 20;
pub const DEFAULT_OFFLINE_THRESHOLD: u32 = 3;

#[derive(Clone, Debug)]
pub struct DeskConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub org_id: String,
    pub bucket: String,
    /// Overrides the per-OS preferences directory.
    pub prefs_dir: Option<PathBuf>,
    pub http_timeout: Duration,
    pub offline_threshold: u32,
}

impl DeskConfig {
    /// Reads the process environment, after loading `.env` if present.
    pub fn from_env() -> Result<Self, ServerError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ServerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let required = |key: &str| get(key).ok_or_else(|| MissingConfigValue::new(key));

        let supabase_url = required("SUPABASE_URL")?;
        if !supabase_url.starts_with("http://") && !supabase_url.starts_with("https://") {
            return Err(InvalidConfigValue::new("SUPABASE_URL", &supabase_url));
        }

        let http_timeout_secs = match get("ANVISA_DESK_HTTP_TIMEOUT_SECS") {
            Some(v) => v
                .parse::<u64>()
                .ok()
                .filter(|s| *s > 0)
                .ok_or_else(|| InvalidConfigValue::new("ANVISA_DESK_HTTP_TIMEOUT_SECS", &v))?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };
        let offline_threshold = match get("ANVISA_DESK_OFFLINE_THRESHOLD") {
            Some(v) => v
                .parse::<u32>()
                .ok()
                .filter(|t| *t > 0)
                .ok_or_else(|| InvalidConfigValue::new("ANVISA_DESK_OFFLINE_THRESHOLD", &v))?,
            None => DEFAULT_OFFLINE_THRESHOLD,
        };

        Ok(DeskConfig {
            supabase_url: supabase_url.trim_end_matches('/').to_string(),
            supabase_anon_key: required("SUPABASE_ANON_KEY")?,
            org_id: required("ANVISA_DESK_ORG_ID")?,
            bucket: get("ANVISA_DESK_BUCKET").unwrap_or_else(|| DEFAULT_BUCKET.to_string()),
            prefs_dir: get("ANVISA_DESK_PREFS_DIR").map(PathBuf::from),
            http_timeout: Duration::from_secs(http_timeout_secs),
            offline_threshold,
        })
    }
}
