use std::{
    fs,
    path::{Path, PathBuf},
};

use fractic_server_error::ServerError;
use serde::{de::DeserializeOwned, Serialize};

use crate::errors::WriteError;

const APP_DIR_NAME: &str = "anvisa-desk";

/// Per-OS application data directory: `%APPDATA%` on Windows,
/// `$XDG_CONFIG_HOME` or `~/.config` elsewhere.
pub(crate) fn default_prefs_dir() -> PathBuf {
    let base = if cfg!(windows) {
        std::env::var_os("APPDATA").map(PathBuf::from)
    } else {
        std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))
    };
    base.unwrap_or_else(std::env::temp_dir).join(APP_DIR_NAME)
}

pub(crate) trait PreferencesDatasource: Send + Sync {
    /// Best effort: a missing or corrupt file yields `T::default()`.
    fn read<T>(&self, name: &str) -> T
    where
        T: DeserializeOwned + Default;

    fn write<T>(&self, name: &str, value: &T) -> Result<(), ServerError>
    where
        T: Serialize;

    fn remove(&self, name: &str) -> Result<(), ServerError>;
}

pub(crate) struct JsonFilePreferencesDatasource {
    dir: PathBuf,
}

impl JsonFilePreferencesDatasource {
    pub(crate) fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }
}

fn display(path: &Path) -> String {
    path.display().to_string()
}

impl PreferencesDatasource for JsonFilePreferencesDatasource {
    fn read<T>(&self, name: &str) -> T
    where
        T: DeserializeOwned + Default,
    {
        let path = self.path(name);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return T::default(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "could not read preference file");
                return T::default();
            }
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "ignoring corrupt preference file");
            T::default()
        })
    }

    fn write<T>(&self, name: &str, value: &T) -> Result<(), ServerError>
    where
        T: Serialize,
    {
        let path = self.path(name);
        fs::create_dir_all(&self.dir).map_err(|e| WriteError::with_debug(&display(&self.dir), &e))?;
        let json =
            serde_json::to_string_pretty(value).map_err(|e| WriteError::with_debug(&display(&path), &e))?;
        // Write to a sibling first so a crash never leaves a truncated file.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| WriteError::with_debug(&display(&tmp), &e))?;
        fs::rename(&tmp, &path).map_err(|e| WriteError::with_debug(&display(&path), &e))?;
        Ok(())
    }

    fn remove(&self, name: &str) -> Result<(), ServerError> {
        let path = self.path(name);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(WriteError::with_debug(&display(&path), &e)),
        }
    }
}
