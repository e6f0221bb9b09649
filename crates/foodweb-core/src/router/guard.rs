//! Navigation guard
//!
//! Rules are checked in order and the first that matches decides:
//! 1. auth required while signed out: go to sign-in, remembering the target
//! 2. admin required without the admin role: go home
//! 3. guest-only while signed in: go home

use super::routes::{HOME, LOGIN, Location, REDIRECT_QUERY_KEY, ResolvedRoute};
use crate::auth::SessionView;

/// Result of running the guard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationDecision {
    Proceed,
    Redirect(Location),
}

/// A single guard rule
pub struct GuardRule {
    pub name: &'static str,
    applies: fn(&ResolvedRoute, &dyn SessionView) -> bool,
    redirect: fn(&ResolvedRoute) -> Location,
}

impl std::fmt::Debug for GuardRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GuardRule").field("name", &self.name).finish()
    }
}

pub static GUARD_RULES: [GuardRule; 3] = [
    GuardRule {
        name: "requires-auth",
        applies: |route, session| route.meta.requires_auth && !session.is_logged_in(),
        redirect: |route| {
            Location::named(LOGIN).with_query(REDIRECT_QUERY_KEY, route.full_path.clone())
        },
    },
    GuardRule {
        name: "requires-admin",
        applies: |route, session| route.meta.is_admin && !session.is_admin(),
        redirect: |_| Location::named(HOME),
    },
    GuardRule {
        name: "guest-only",
        applies: |route, session| route.meta.guest && session.is_logged_in(),
        redirect: |_| Location::named(HOME),
    },
];

/// Decide whether navigation to `route` may proceed
pub fn evaluate(route: &ResolvedRoute, session: &dyn SessionView) -> NavigationDecision {
    GUARD_RULES
        .iter()
        .find(|rule| (rule.applies)(route, session))
        .map(|rule| {
            tracing::debug!("Guard rule '{}' redirects {}", rule.name, route.full_path);
            NavigationDecision::Redirect((rule.redirect)(route))
        })
        .unwrap_or(NavigationDecision::Proceed)
}
