use fractic_server_error::ServerError;

use crate::{
    data::datasources::preferences_datasource::{
        JsonFilePreferencesDatasource, PreferencesDatasource,
    },
    domain::repositories::preferences_repository::PreferencesRepository,
    entities::{AuthSessionCache, BrowserState, ColumnVisibility, LastFolder, LoginPrefs},
};

const COLUMNS_FILE: &str = "client_columns";
const LOGIN_FILE: &str = "login_prefs";
const AUTH_SESSION_FILE: &str = "auth_session";
const LAST_FOLDER_FILE: &str = "last_folder";
const BROWSER_STATE_FILE: &str = "browser_state";

pub(crate) struct PreferencesRepositoryImpl<DS = JsonFilePreferencesDatasource>
where
    DS: PreferencesDatasource,
{
    datasource: DS,
}

impl<DS: PreferencesDatasource> PreferencesRepositoryImpl<DS> {
    pub(crate) fn with_datasource(datasource: DS) -> Self {
        Self { datasource }
    }
}

impl PreferencesRepositoryImpl {
    pub(crate) fn new(dir: impl Into<std::path::PathBuf>) -> Self {
        Self::with_datasource(JsonFilePreferencesDatasource::new(dir))
    }
}

impl<DS: PreferencesDatasource> PreferencesRepository for PreferencesRepositoryImpl<DS> {
    fn load_column_visibility(&self) -> ColumnVisibility {
        self.datasource.read(COLUMNS_FILE)
    }

    fn save_column_visibility(&self, value: &ColumnVisibility) -> Result<(), ServerError> {
        self.datasource.write(COLUMNS_FILE, value)
    }

    fn load_login_prefs(&self) -> LoginPrefs {
        self.datasource.read(LOGIN_FILE)
    }

    fn save_login_prefs(&self, value: &LoginPrefs) -> Result<(), ServerError> {
        self.datasource.write(LOGIN_FILE, value)
    }

    fn load_auth_session(&self) -> AuthSessionCache {
        self.datasource.read(AUTH_SESSION_FILE)
    }

    fn save_auth_session(&self, value: &AuthSessionCache) -> Result<(), ServerError> {
        self.datasource.write(AUTH_SESSION_FILE, value)
    }

    fn clear_auth_session(&self) -> Result<(), ServerError> {
        self.datasource.remove(AUTH_SESSION_FILE)
    }

    fn load_last_folder(&self) -> LastFolder {
        self.datasource.read(LAST_FOLDER_FILE)
    }

    fn save_last_folder(&self, value: &LastFolder) -> Result<(), ServerError> {
        self.datasource.write(LAST_FOLDER_FILE, value)
    }

    fn load_browser_state(&self) -> BrowserState {
        self.datasource.read(BROWSER_STATE_FILE)
    }

    fn save_browser_state(&self, value: &BrowserState) -> Result<(), ServerError> {
        self.datasource.write(BROWSER_STATE_FILE, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preferences_survive_reload() {
        let dir = tempfile::tempdir().unwrap();
        let repo = PreferencesRepositoryImpl::new(dir.path());

        let mut columns = repo.load_column_visibility();
        assert!(columns.is_visible("cnpj"));
        columns.set_visible("cnpj", false);
        repo.save_column_visibility(&columns).unwrap();

        let mut browser = BrowserState::default();
        assert!(browser.toggle("GERAL/anvisa"));
        repo.save_browser_state(&browser).unwrap();

        let reloaded = PreferencesRepositoryImpl::new(dir.path());
        assert!(!reloaded.load_column_visibility().is_visible("cnpj"));
        assert!(reloaded.load_browser_state().expanded.contains("GERAL/anvisa"));
    }

    #[test]
    fn clearing_session_resets_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let repo = PreferencesRepositoryImpl::new(dir.path());
        repo.save_auth_session(&AuthSessionCache {
            access_token: Some("t".into()),
            ..Default::default()
        })
        .unwrap();
        repo.clear_auth_session().unwrap();
        assert_eq!(repo.load_auth_session(), AuthSessionCache::default());
    }
}
