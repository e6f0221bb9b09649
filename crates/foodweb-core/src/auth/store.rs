//! Session store: login, logout and restore

use super::SharedSession;
use crate::error::{FoodwebError, FoodwebResult};
use crate::http::ApiClient;
use crate::notify::Notifier;
use crate::services;
use crate::types::LoginRequest;
use foodweb_session::{LocalStorage, Session, TOKEN_KEY, USER_INFO_KEY, UserInfo};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

const LOGIN_SUCCEEDED: &str = "login successful";
const LOGIN_FAILED: &str = "login failed";
const LOGGED_OUT: &str = "logged out";

/// Owner of the session lifecycle
///
/// The in-memory [`SharedSession`] and the `token`/`userInfo` storage keys
/// are always updated together: a login that cannot be persisted leaves the
/// session empty, and every clear drops both token and user.
pub struct SessionStore {
    session: SharedSession,
    storage: Arc<dyn LocalStorage>,
    client: ApiClient,
    notifier: Arc<dyn Notifier>,
    busy: AtomicBool,
}

/// Resets the busy flag however the login attempt ends.
struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn engage(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl SessionStore {
    pub fn new(
        session: SharedSession,
        storage: Arc<dyn LocalStorage>,
        client: ApiClient,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            session,
            storage,
            client,
            notifier,
            busy: AtomicBool::new(false),
        }
    }

    /// Shared in-memory session
    pub fn session(&self) -> &SharedSession {
        &self.session
    }

    /// Whether a login call is in flight
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_logged_in()
    }

    pub fn is_admin(&self) -> bool {
        self.session.is_admin()
    }

    pub fn user_id(&self) -> Option<i64> {
        self.session.user_id()
    }

    pub fn user(&self) -> Option<UserInfo> {
        self.session.user()
    }

    pub fn token(&self) -> Option<String> {
        self.session.token()
    }

    /// Re-hydrate the session from durable storage
    ///
    /// Unreadable or malformed stored user data is discarded, as is a user
    /// stored without a token. Nothing here is fatal.
    pub async fn restore(&self) -> Session {
        let token = match self.storage.get_item(TOKEN_KEY).await {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!("Could not read stored token: {}", e);
                None
            }
        };

        let mut user = self.read_stored_user().await;
        if token.is_none() && user.is_some() {
            debug!("Discarding stored user without a token");
            self.remove_quietly(USER_INFO_KEY).await;
            user = None;
        }

        let restored = Session { token, user };
        debug!(
            "Restored session: logged_in={}, admin={}",
            restored.is_logged_in(),
            restored.is_admin()
        );
        self.session.replace(restored.clone());
        restored
    }

    async fn read_stored_user(&self) -> Option<UserInfo> {
        let raw = match self.storage.get_item(USER_INFO_KEY).await {
            Ok(raw) => raw?,
            Err(e) => {
                warn!("Could not read stored user: {}", e);
                return None;
            }
        };

        match serde_json::from_str::<UserInfo>(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!("Discarding malformed stored user: {}", e);
                self.remove_quietly(USER_INFO_KEY).await;
                None
            }
        }
    }

    /// Sign in
    ///
    /// Returns `true` on success. Failures are reported through the
    /// notifier and never returned to the caller.
    pub async fn login(&self, credentials: &LoginRequest) -> bool {
        let _busy = BusyGuard::engage(&self.busy);

        match self.try_login(credentials).await {
            Ok(user) => {
                info!("Logged in as {} ({})", user.username, user.role);
                self.notifier.success(LOGIN_SUCCEEDED);
                true
            }
            Err(e) => {
                warn!("Login failed: {}", e);
                let message = if e.message().trim().is_empty() {
                    LOGIN_FAILED
                } else {
                    e.message()
                };
                self.notifier.error(message);
                false
            }
        }
    }

    async fn try_login(&self, credentials: &LoginRequest) -> FoodwebResult<UserInfo> {
        let response = self.client.send(services::user::login(credentials)).await?;
        let user = response.user_info();

        self.persist(&response.token, &user).await?;
        self.session
            .replace(Session::authenticated(response.token, user.clone()));
        Ok(user)
    }

    async fn persist(&self, token: &str, user: &UserInfo) -> FoodwebResult<()> {
        let user_json = serde_json::to_string(user)?;

        let written = async {
            self.storage.set_item(TOKEN_KEY, token).await?;
            self.storage.set_item(USER_INFO_KEY, &user_json).await
        }
        .await;

        if let Err(e) = written {
            self.remove_quietly(TOKEN_KEY).await;
            self.remove_quietly(USER_INFO_KEY).await;
            return Err(FoodwebError::from(e));
        }
        Ok(())
    }

    /// Sign out locally; the backend is not contacted
    pub async fn logout(&self) {
        self.session.clear();
        self.remove_quietly(TOKEN_KEY).await;
        self.remove_quietly(USER_INFO_KEY).await;
        info!("Logged out");
        self.notifier.success(LOGGED_OUT);
    }

    async fn remove_quietly(&self, key: &str) {
        if let Err(e) = self.storage.remove_item(key).await {
            warn!("Failed to remove '{}' from storage: {}", key, e);
        }
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("session", &self.session)
            .field("busy", &self.is_busy())
            .finish_non_exhaustive()
    }
}
