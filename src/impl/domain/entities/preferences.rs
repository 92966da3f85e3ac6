use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};

/// Which client list columns are visible, keyed by column name. Columns
/// missing from the map are visible.
#[derive(Debug, Clone, Default, PartialEq, serde_derive::Serialize, serde_derive::Deserialize)]
pub struct ColumnVisibility {
    #[serde(default)]
    pub columns: BTreeMap<String, bool>,
}

#[derive(Debug, Clone, Default, PartialEq, serde_derive::Serialize, serde_derive::Deserialize)]
pub struct LoginPrefs {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub remember: bool,
}

#[derive(Debug, Clone, Default, PartialEq, serde_derive::Serialize, serde_derive::Deserialize)]
pub struct AuthSessionCache {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, serde_derive::Serialize, serde_derive::Deserialize)]
pub struct LastFolder {
    #[serde(default)]
    pub path: Option<String>,
}

/// Expand/collapse state of the document browser, as the set of expanded
/// folder keys.
#[derive(Debug, Clone, Default, PartialEq, serde_derive::Serialize, serde_derive::Deserialize)]
pub struct BrowserState {
    #[serde(default)]
    pub expanded: BTreeSet<String>,
}

// --

impl ColumnVisibility {
    pub fn is_visible(&self, column: &str) -> bool {
        self.columns.get(column).copied().unwrap_or(true)
    }

    pub fn set_visible(&mut self, column: impl Into<String>, visible: bool) {
        self.columns.insert(column.into(), visible);
    }
}

impl AuthSessionCache {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(expires_at) => expires_at <= now,
            None => true,
        }
    }
}

impl BrowserState {
    pub fn toggle(&mut self, key: &str) -> bool {
        if self.expanded.remove(key) {
            false
        } else {
            self.expanded.insert(key.to_string());
            true
        }
    }
}
