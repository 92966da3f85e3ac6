use std::sync::Arc;

use chrono::Utc;
use fractic_server_error::ServerError;
use tokio::task::JoinHandle;

use crate::{
    config::DeskConfig,
    data::{
        datasources::{
            postgrest_datasource::RemoteSession, preferences_datasource::default_prefs_dir,
        },
        repositories::{
            clients_repository_impl::ClientsRepositoryImpl,
            demands_repository_impl::DemandsRepositoryImpl, file_storage_impl::FileStorageImpl,
            notifications_repository_impl::NotificationsRepositoryImpl,
            preferences_repository_impl::PreferencesRepositoryImpl,
        },
    },
    domain::{
        repositories::preferences_repository::PreferencesRepository,
        usecases::{
            clients_usecase::{ClientsUsecase, ClientsUsecaseImpl},
            demands_usecase::{DemandsUsecase, DemandsUsecaseImpl},
            notifications_usecase::{NotificationsUsecase, NotificationsUsecaseImpl},
        },
    },
    entities::{AuthSessionCache, Client, LoginPrefs, SessionClaims},
    presentation::{
        background_loader::{BackgroundLoader, LoadOutcome},
        connectivity::{ConnectivitySnapshot, ConnectivityStateManager},
        controllers::{ClientsController, DemandsController, NotificationsController},
    },
};

/// Entry point for a front-end: wires the Supabase-backed repositories to the
/// use cases and hands out controllers bound to the signed-in user.
pub struct AnvisaDesk {
    config: DeskConfig,
    session: RemoteSession,
    clients: Arc<dyn ClientsUsecase>,
    demands: Arc<dyn DemandsUsecase>,
    notifications: Arc<dyn NotificationsUsecase>,
    preferences: Arc<dyn PreferencesRepository>,
    connectivity: ConnectivityStateManager,
    loader: BackgroundLoader,
    actor: String,
}

impl AnvisaDesk {
    pub fn new(config: DeskConfig) -> Result<Self, ServerError> {
        let session = RemoteSession::new(
            &config.supabase_url,
            &config.supabase_anon_key,
            config.http_timeout,
        )?;
        let org_id = config.org_id.as_str();

        let clients =
            ClientsUsecaseImpl::new(ClientsRepositoryImpl::new(session.clone(), org_id));
        let demands = DemandsUsecaseImpl::new(
            DemandsRepositoryImpl::new(session.clone(), org_id),
            NotificationsRepositoryImpl::new(session.clone(), org_id),
            FileStorageImpl::new(session.clone(), &config.bucket),
            org_id,
        );
        let notifications =
            NotificationsUsecaseImpl::new(NotificationsRepositoryImpl::new(session.clone(), org_id));
        let preferences = PreferencesRepositoryImpl::new(
            config.prefs_dir.clone().unwrap_or_else(default_prefs_dir),
        );

        tracing::info!(org_id, bucket = %config.bucket, "desk initialized");
        Ok(Self {
            connectivity: ConnectivityStateManager::new(config.offline_threshold),
            clients: Arc::new(clients),
            demands: Arc::new(demands),
            notifications: Arc::new(notifications),
            preferences: Arc::new(preferences),
            loader: BackgroundLoader::new(),
            actor: String::new(),
            session,
            config,
        })
    }

    pub fn from_env() -> Result<Self, ServerError> {
        Self::new(DeskConfig::from_env()?)
    }

    pub fn config(&self) -> &DeskConfig {
        &self.config
    }

    /// E-mail (or user id) of the signed-in user, stamped on audit fields.
    pub fn actor(&self) -> &str {
        &self.actor
    }

    pub fn is_signed_in(&self) -> bool {
        !self.actor.is_empty()
    }

    /// Adopts a session obtained by the front-end's login flow. With
    /// `remember`, the session and e-mail are cached for the next start.
    pub fn sign_in_with_session(
        &mut self,
        access_token: String,
        refresh_token: Option<String>,
        remember: bool,
    ) -> Result<SessionClaims, ServerError> {
        let cache = AuthSessionCache::new(access_token, refresh_token);
        let claims = cache.claims()?;
        self.adopt(&cache, &claims);

        if remember {
            self.preferences.save_auth_session(&cache)?;
            self.preferences.save_login_prefs(&LoginPrefs {
                email: claims.email.clone(),
                remember: true,
            })?;
        } else {
            self.preferences.clear_auth_session()?;
        }
        Ok(claims)
    }

    /// Re-uses a cached session when its token has not expired yet.
    pub fn restore_session(&mut self) -> Option<SessionClaims> {
        let cache = self.preferences.load_auth_session();
        cache.usable_token(Utc::now())?;
        let claims = cache.claims().ok()?;
        self.adopt(&cache, &claims);
        Some(claims)
    }

    pub fn sign_out(&mut self) -> Result<(), ServerError> {
        tracing::info!(org_id = %self.config.org_id, actor = %self.actor, "signed out");
        self.session.set_access_token(None);
        self.actor.clear();
        self.preferences.clear_auth_session()
    }

    fn adopt(&mut self, cache: &AuthSessionCache, claims: &SessionClaims) {
        self.session.set_access_token(cache.access_token.clone());
        self.actor = claims
            .email
            .clone()
            .or_else(|| claims.sub.clone())
            .unwrap_or_default();
        tracing::info!(org_id = %self.config.org_id, actor = %self.actor, "session adopted");
    }

    pub fn preferences(&self) -> &dyn PreferencesRepository {
        self.preferences.as_ref()
    }

    pub fn clients(&self) -> ClientsController<'_> {
        ClientsController::new(self.clients.as_ref(), &self.config.org_id, &self.actor)
    }

    pub fn demands(&self) -> DemandsController<'_> {
        DemandsController::new(self.demands.as_ref(), &self.config.org_id, &self.actor)
    }

    pub fn notifications(&self) -> NotificationsController<'_> {
        NotificationsController::new(self.notifications.as_ref(), &self.config.org_id)
    }

    pub fn clients_usecase(&self) -> &dyn ClientsUsecase {
        self.clients.as_ref()
    }

    /// Fetches the active clients on the background worker. Only the
    /// latest refresh comes back as [`LoadOutcome::Applied`].
    pub fn spawn_client_refresh(&self) -> JoinHandle<LoadOutcome<Vec<Client>>> {
        let clients = Arc::clone(&self.clients);
        self.loader
            .spawn(move || async move { clients.list_active().await })
    }

    /// Checks that the backend answers and feeds the result to the
    /// connectivity state.
    pub async fn probe(&mut self) -> ConnectivitySnapshot {
        let url = format!("{}/auth/v1/health", self.session.base_url);
        let reachable = match self.session.authorize(self.session.client.get(&url)).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!(error = %e, "connectivity probe failed");
                false
            }
        };
        self.connectivity.record_probe(reachable)
    }

    pub fn connectivity(&self) -> ConnectivitySnapshot {
        self.connectivity.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use wiremock::{
        matchers::{header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    use super::*;
    use crate::{domain::logic::session_impl::fake_token, entities::Connectivity};

    fn desk(server: &MockServer, prefs: &tempfile::TempDir) -> AnvisaDesk {
        AnvisaDesk::new(DeskConfig {
            supabase_url: server.uri(),
            supabase_anon_key: "anon-key".into(),
            org_id: "org-1".into(),
            bucket: "rc-docs".into(),
            prefs_dir: Some(prefs.path().to_path_buf()),
            http_timeout: Duration::from_secs(5),
            offline_threshold: 1,
        })
        .unwrap()
    }

    // A year far enough ahead that the token stays valid.
    const FAR_FUTURE: i64 = 4_102_444_800;

    #[tokio::test]
    async fn signed_in_requests_use_the_user_token() {
        let server = MockServer::start().await;
        let prefs = tempfile::tempdir().unwrap();
        let token = fake_token("ana@example.com", FAR_FUTURE);
        Mock::given(method("GET"))
            .and(path("/rest/v1/clients"))
            .and(header("authorization", format!("Bearer {token}").as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": 1, "razao_social": "Farmácia Central", "cnpj": "11222333000181" }
            ])))
            .mount(&server)
            .await;

        let mut desk = desk(&server, &prefs);
        let claims = desk.sign_in_with_session(token.clone(), None, true).unwrap();
        assert_eq!(claims.email.as_deref(), Some("ana@example.com"));
        assert_eq!(desk.actor(), "ana@example.com");

        let clients = desk.clients().list_active().await.ok().unwrap();
        assert_eq!(clients[0].razao_social, "Farmácia Central");

        match desk.spawn_client_refresh().await.unwrap() {
            LoadOutcome::Applied(rows) => assert_eq!(rows.len(), 1),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn remembered_session_is_restored_until_sign_out() {
        let server = MockServer::start().await;
        let prefs = tempfile::tempdir().unwrap();
        let token = fake_token("ana@example.com", FAR_FUTURE);

        let mut first = desk(&server, &prefs);
        first.sign_in_with_session(token, None, true).unwrap();
        assert_eq!(
            first.preferences().load_login_prefs().email.as_deref(),
            Some("ana@example.com")
        );

        let mut second = desk(&server, &prefs);
        assert!(second.restore_session().is_some());
        assert!(second.is_signed_in());

        second.sign_out().unwrap();
        assert!(!second.is_signed_in());
        assert!(desk(&server, &prefs).restore_session().is_none());
    }

    #[tokio::test]
    async fn probe_tracks_connectivity() {
        let server = MockServer::start().await;
        let prefs = tempfile::tempdir().unwrap();
        let mut desk = desk(&server, &prefs);

        let snapshot = desk.probe().await;
        assert_eq!(snapshot.state, Connectivity::Offline);

        Mock::given(method("GET"))
            .and(path("/auth/v1/health"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        let snapshot = desk.probe().await;
        assert_eq!(snapshot.state, Connectivity::Online);
        assert!(snapshot.changed);
    }
}
