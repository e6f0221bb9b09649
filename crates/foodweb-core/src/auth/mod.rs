//! Client-side authentication state
//!
//! [`SharedSession`] is the in-memory session every component reads from.
//! [`SessionStore`] owns the operations that change it (login, logout,
//! restore) and keeps durable storage in step.

mod store;

pub use store::SessionStore;

use foodweb_session::{Session, UserInfo};
use parking_lot::RwLock;
use std::sync::Arc;

/// Read access to the session, as the route guard needs it
pub trait SessionView {
    fn is_logged_in(&self) -> bool;
    fn is_admin(&self) -> bool;
}

impl SessionView for Session {
    fn is_logged_in(&self) -> bool {
        Session::is_logged_in(self)
    }

    fn is_admin(&self) -> bool {
        Session::is_admin(self)
    }
}

/// In-memory session shared between the session store, the API client and
/// the router
///
/// Clones share the same state. Token and user are always cleared together.
#[derive(Debug, Clone, Default)]
pub struct SharedSession {
    inner: Arc<RwLock<Session>>,
}

impl SharedSession {
    pub fn new(session: Session) -> Self {
        Self {
            inner: Arc::new(RwLock::new(session)),
        }
    }

    /// Copy of the current session
    pub fn snapshot(&self) -> Session {
        self.inner.read().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.inner.read().token.clone()
    }

    pub fn user(&self) -> Option<UserInfo> {
        self.inner.read().user.clone()
    }

    pub fn user_id(&self) -> Option<i64> {
        self.inner.read().user_id()
    }

    pub fn is_logged_in(&self) -> bool {
        self.inner.read().is_logged_in()
    }

    pub fn is_admin(&self) -> bool {
        self.inner.read().is_admin()
    }

    /// Replace the whole session
    pub fn replace(&self, session: Session) {
        *self.inner.write() = session;
    }

    /// Drop token and user
    pub fn clear(&self) {
        self.inner.write().clear();
    }
}

impl SessionView for SharedSession {
    fn is_logged_in(&self) -> bool {
        SharedSession::is_logged_in(self)
    }

    fn is_admin(&self) -> bool {
        SharedSession::is_admin(self)
    }
}
