//! Session data structures
//!
//! Defines the client-side view of an authenticated user:
//! - Role: backend account role
//! - UserInfo: the user summary kept after sign-in
//! - Session: token plus user summary

use serde::{Deserialize, Serialize};

/// Account role as reported by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Back-office administrator
    Admin,
    /// Regular account
    #[default]
    User,
}

impl Role {
    /// Parse a backend role string.
    ///
    /// Anything other than `ADMIN` is treated as a regular user, so an
    /// unexpected value never grants admin access.
    pub fn parse_lossy(value: &str) -> Self {
        if value.eq_ignore_ascii_case("ADMIN") {
            Role::Admin
        } else {
            Role::User
        }
    }

    /// Backend spelling of the role
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::User => "USER",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User summary kept in memory and under the `userInfo` storage key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    /// Backend user identifier
    pub user_id: i64,

    /// Login name
    pub username: String,

    /// Account role
    pub role: Role,

    /// Email address; empty when derived from a login response
    #[serde(default)]
    pub email: String,
}

impl UserInfo {
    /// Create a user summary
    pub fn new(user_id: i64, username: impl Into<String>, role: Role) -> Self {
        Self {
            user_id,
            username: username.into(),
            role,
            email: String::new(),
        }
    }

    /// Set the email address
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Whether this user holds the admin role
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Client session: bearer token plus the signed-in user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// Opaque bearer token
    pub token: Option<String>,

    /// Signed-in user summary
    pub user: Option<UserInfo>,
}

impl Session {
    /// Create a populated session
    pub fn authenticated(token: impl Into<String>, user: UserInfo) -> Self {
        Self {
            token: Some(token.into()),
            user: Some(user),
        }
    }

    /// A session counts as logged in while it holds a token
    pub fn is_logged_in(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Admin check; no user means no admin
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(UserInfo::is_admin)
    }

    /// Identifier of the signed-in user
    pub fn user_id(&self) -> Option<i64> {
        self.user.as_ref().map(|u| u.user_id)
    }

    /// Drop token and user together
    pub fn clear(&mut self) {
        self.token = None;
        self.user = None;
    }
}
