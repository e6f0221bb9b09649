//! FoodwebContext - one wired-up client
//!
//! Owns the configuration and every stateful component: durable storage,
//! the shared session, the tab manager, the router, the API client and the
//! session store. Independent contexts share nothing, so several can live in
//! one process (tests do this constantly).

use crate::auth::{SessionStore, SharedSession};
use crate::config::ClientConfig;
use crate::error::FoodwebResult;
use crate::http::{ApiClient, ReqwestTransport, Transport};
use crate::navigation::Navigator;
use crate::notify::{Notifier, TracingNotifier};
use crate::router::AppRouter;
use crate::tabs::TagsStore;
use foodweb_session::{LocalFileStorage, LocalStorage};
use std::sync::Arc;
use tracing::debug;

/// Builder for [`FoodwebContext`]
///
/// Anything not supplied is built from the configuration: a reqwest
/// transport, file storage under `storage_dir` and a tracing notifier.
#[derive(Default)]
pub struct FoodwebContextBuilder {
    config: Option<ClientConfig>,
    transport: Option<Arc<dyn Transport>>,
    storage: Option<Arc<dyn LocalStorage>>,
    notifier: Option<Arc<dyn Notifier>>,
}

impl FoodwebContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn with_storage(mut self, storage: Arc<dyn LocalStorage>) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Validate the configuration and wire the components
    pub fn build(self) -> FoodwebResult<FoodwebContext> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(&config)?),
        };
        let storage: Arc<dyn LocalStorage> = match self.storage {
            Some(storage) => storage,
            None => Arc::new(LocalFileStorage::with_path(config.storage_dir.clone())),
        };
        let notifier = self
            .notifier
            .unwrap_or_else(|| Arc::new(TracingNotifier));

        let session = SharedSession::default();
        let tabs = Arc::new(TagsStore::new());
        let router = Arc::new(AppRouter::new(session.clone(), tabs.clone()));
        let client = ApiClient::new(
            config.base_url.clone(),
            transport,
            storage.clone(),
            session.clone(),
            router.clone() as Arc<dyn Navigator>,
        );
        let sessions = SessionStore::new(
            session.clone(),
            storage.clone(),
            client.clone(),
            notifier.clone(),
        );

        debug!("Built client context for {}", config.base_url);
        Ok(FoodwebContext {
            config,
            storage,
            session,
            tabs,
            router,
            client,
            sessions,
            notifier,
        })
    }
}

/// A complete client: configuration, state and the components acting on it
pub struct FoodwebContext {
    config: ClientConfig,
    storage: Arc<dyn LocalStorage>,
    session: SharedSession,
    tabs: Arc<TagsStore>,
    router: Arc<AppRouter>,
    client: ApiClient,
    sessions: SessionStore,
    notifier: Arc<dyn Notifier>,
}

impl FoodwebContext {
    pub fn builder() -> FoodwebContextBuilder {
        FoodwebContextBuilder::new()
    }

    /// Build a context and restore any stored session into it
    pub async fn open(config: ClientConfig) -> FoodwebResult<Self> {
        let context = Self::builder().with_config(config).build()?;
        context.sessions.restore().await;
        Ok(context)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn storage(&self) -> &Arc<dyn LocalStorage> {
        &self.storage
    }

    pub fn session(&self) -> &SharedSession {
        &self.session
    }

    pub fn tabs(&self) -> &Arc<TagsStore> {
        &self.tabs
    }

    pub fn router(&self) -> &Arc<AppRouter> {
        &self.router
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Session store (login, logout, restore)
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn notifier(&self) -> &Arc<dyn Notifier> {
        &self.notifier
    }
}

impl std::fmt::Debug for FoodwebContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FoodwebContext")
            .field("config", &self.config)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingNotifier, StubTransport};
    use foodweb_session::MemoryStorage;

    fn context() -> FoodwebContext {
        FoodwebContext::builder()
            .with_transport(Arc::new(StubTransport::new()))
            .with_storage(Arc::new(MemoryStorage::new()))
            .with_notifier(Arc::new(RecordingNotifier::new()))
            .build()
            .unwrap()
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let result = FoodwebContext::builder()
            .with_config(ClientConfig::new("ftp://backend"))
            .with_transport(Arc::new(StubTransport::new()))
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_contexts_are_independent() {
        let first = context();
        let second = context();

        first
            .session()
            .replace(foodweb_session::Session::authenticated(
                "t",
                foodweb_session::UserInfo::new(1, "a", foodweb_session::Role::Admin),
            ));
        first.router().navigate("/admin").unwrap();

        assert!(!second.session().is_logged_in());
        assert!(second.tabs().visited_views().is_empty());
        assert_eq!(first.tabs().visited_views().len(), 1);
    }

    #[test]
    fn test_components_share_one_session() {
        let ctx = context();
        ctx.session().replace(foodweb_session::Session::authenticated(
            "t",
            foodweb_session::UserInfo::new(3, "u", foodweb_session::Role::User),
        ));
        assert!(ctx.sessions().is_logged_in());
        assert_eq!(ctx.sessions().user_id(), Some(3));
    }
}
