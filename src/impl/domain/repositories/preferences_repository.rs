use fractic_server_error::ServerError;

use crate::entities::{AuthSessionCache, BrowserState, ColumnVisibility, LastFolder, LoginPrefs};

/// Local preference storage. Loads never fail: missing or unreadable data
/// yields the default value.
pub trait PreferencesRepository: Send + Sync {
    fn load_column_visibility(&self) -> ColumnVisibility;
    fn save_column_visibility(&self, value: &ColumnVisibility) -> Result<(), ServerError>;

    fn load_login_prefs(&self) -> LoginPrefs;
    fn save_login_prefs(&self, value: &LoginPrefs) -> Result<(), ServerError>;

    fn load_auth_session(&self) -> AuthSessionCache;
    fn save_auth_session(&self, value: &AuthSessionCache) -> Result<(), ServerError>;
    fn clear_auth_session(&self) -> Result<(), ServerError>;

    fn load_last_folder(&self) -> LastFolder;
    fn save_last_folder(&self, value: &LastFolder) -> Result<(), ServerError>;

    fn load_browser_state(&self) -> BrowserState;
    fn save_browser_state(&self, value: &BrowserState) -> Result<(), ServerError>;
}
