//! Client-side router
//!
//! [`AppRouter`] resolves locations against the [`RouteTable`], sets the
//! display title, runs the guard and follows its redirects. It is also the
//! [`Navigator`] the HTTP layer and the tab manager push to.

pub mod guard;
pub mod routes;

pub use guard::{GUARD_RULES, GuardRule, NavigationDecision, evaluate};
pub use routes::{
    Location, REDIRECT_QUERY_KEY, Resolution, ResolvedRoute, RouteMeta, RouteRecord, RouteTable,
};

use crate::auth::SharedSession;
use crate::error::{FoodwebError, FoodwebResult};
use crate::navigation::Navigator;
use crate::tabs::{TagView, TagsStore};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, warn};

/// Upper bound on redirects followed for one navigation
pub const MAX_REDIRECTS: usize = 10;

/// Where a navigation ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationOutcome {
    pub requested: String,
    pub route: ResolvedRoute,
    /// Intermediate locations, in the order they were visited
    pub redirects: Vec<String>,
    pub title: Option<String>,
}

impl NavigationOutcome {
    pub fn was_redirected(&self) -> bool {
        !self.redirects.is_empty()
    }
}

#[derive(Debug, Default)]
struct RouterState {
    current: Option<ResolvedRoute>,
    title: Option<String>,
}

/// Route table, guard and current location
#[derive(Debug)]
pub struct AppRouter {
    table: RouteTable,
    session: SharedSession,
    tabs: Arc<TagsStore>,
    state: RwLock<RouterState>,
}

impl AppRouter {
    pub fn new(session: SharedSession, tabs: Arc<TagsStore>) -> Self {
        Self::with_table(RouteTable::standard(), session, tabs)
    }

    pub fn with_table(table: RouteTable, session: SharedSession, tabs: Arc<TagsStore>) -> Self {
        Self {
            table,
            session,
            tabs,
            state: RwLock::new(RouterState::default()),
        }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Route the last navigation landed on
    pub fn current(&self) -> Option<ResolvedRoute> {
        self.state.read().current.clone()
    }

    /// Display title, as last set by a navigation
    pub fn title(&self) -> Option<String> {
        self.state.read().title.clone()
    }

    /// Navigate to a location string such as `/admin/dishes?page=2`
    pub fn navigate(&self, location: &str) -> FoodwebResult<NavigationOutcome> {
        let mut target = location.to_string();
        let mut redirects = Vec::new();

        loop {
            let route = match self.table.resolve(&target) {
                Resolution::Matched(route) => route,
                Resolution::Redirect(fallback) => {
                    debug!("No route for {}, redirecting to {}", target, fallback);
                    target = self.hop(&mut redirects, target, fallback, location)?;
                    continue;
                }
            };

            if let Some(title) = route.title() {
                self.state.write().title = Some(title.to_string());
            }

            match evaluate(&route, &self.session) {
                NavigationDecision::Proceed => return Ok(self.land(location, route, redirects)),
                NavigationDecision::Redirect(next) => {
                    let href = self.table.href(&next).ok_or_else(|| {
                        FoodwebError::invalid_input(format!("unknown route in redirect: {}", next))
                    })?;
                    target = self.hop(&mut redirects, target, href, location)?;
                }
            }
        }
    }

    fn hop(
        &self,
        redirects: &mut Vec<String>,
        from: String,
        to: String,
        requested: &str,
    ) -> FoodwebResult<String> {
        redirects.push(from);
        if redirects.len() > MAX_REDIRECTS {
            return Err(FoodwebError::invalid_input(format!(
                "navigation to {} exceeded {} redirects",
                requested, MAX_REDIRECTS
            )));
        }
        Ok(to)
    }

    fn land(
        &self,
        requested: &str,
        route: ResolvedRoute,
        redirects: Vec<String>,
    ) -> NavigationOutcome {
        if route.in_admin_layout {
            self.tabs.add_view(TagView::from_route(&route));
        }

        let mut state = self.state.write();
        state.current = Some(route.clone());
        debug!("Navigated to {} ({})", route.full_path, route.name);

        NavigationOutcome {
            requested: requested.to_string(),
            route,
            redirects,
            title: state.title.clone(),
        }
    }
}

impl Navigator for AppRouter {
    fn push(&self, path: &str) {
        if let Err(e) = self.navigate(path) {
            warn!("Navigation to {} failed: {}", path, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use foodweb_session::{Role, Session, UserInfo};

    fn router_with(session: Session) -> (AppRouter, Arc<TagsStore>) {
        let tabs = Arc::new(TagsStore::new());
        let router = AppRouter::new(SharedSession::new(session), tabs.clone());
        (router, tabs)
    }

    fn admin() -> Session {
        Session::authenticated("t", UserInfo::new(1, "root", Role::Admin))
    }

    fn member() -> Session {
        Session::authenticated("t", UserInfo::new(2, "diner", Role::User))
    }

    #[test]
    fn test_public_navigation() {
        let (router, tabs) = router_with(Session::default());
        let outcome = router.navigate("/dish/5").unwrap();

        assert_eq!(outcome.route.name, "dish-detail");
        assert!(!outcome.was_redirected());
        assert_eq!(
            router.title().as_deref(),
            Some("Dish Details - Food Recommendation")
        );
        assert_eq!(router.current().unwrap().full_path, "/dish/5");
        assert!(tabs.visited_views().is_empty());
    }

    #[test]
    fn test_signed_out_admin_lands_on_login_with_return_target() {
        let (router, _) = router_with(Session::default());
        let outcome = router.navigate("/admin/users").unwrap();

        assert_eq!(outcome.route.name, "login");
        assert_eq!(outcome.redirects, vec!["/admin/users".to_string()]);
        assert_eq!(
            outcome.route.query_value(REDIRECT_QUERY_KEY),
            Some("/admin/users")
        );
        assert_eq!(
            outcome.title.as_deref(),
            Some("Sign In - Food Recommendation")
        );
    }

    #[test]
    fn test_member_is_sent_home_from_admin() {
        let (router, tabs) = router_with(member());
        let outcome = router.navigate("/admin").unwrap();

        assert_eq!(outcome.route.name, "home");
        assert!(tabs.visited_views().is_empty());
    }

    #[test]
    fn test_signed_in_user_skips_login() {
        let (router, _) = router_with(member());
        let outcome = router.navigate("/login").unwrap();
        assert_eq!(outcome.route.name, "home");
        assert_eq!(outcome.title.as_deref(), Some("Home - Food Recommendation"));
    }

    #[test]
    fn test_unknown_path_redirects_home() {
        let (router, _) = router_with(Session::default());
        let outcome = router.navigate("/missing/page").unwrap();
        assert_eq!(outcome.route.name, "home");
        assert_eq!(outcome.redirects, vec!["/missing/page".to_string()]);
    }

    #[test]
    fn test_admin_navigation_opens_tabs() {
        let (router, tabs) = router_with(admin());
        router.navigate("/admin").unwrap();
        router.navigate("/admin/dishes/edit/9?draft=1").unwrap();
        router.navigate("/admin").unwrap();

        let views = tabs.visited_views();
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].title, "Dashboard - Food Recommendation Admin");
        assert_eq!(views[1].path, "/admin/dishes/edit/9");
        assert_eq!(views[1].full_path, "/admin/dishes/edit/9?draft=1");
        assert_eq!(
            tabs.cached_views(),
            vec!["dashboard".to_string(), "dish-edit".to_string()]
        );
    }

    #[test]
    fn test_redirect_loop_is_bounded() {
        // With no routes even the fallback is unknown, so every hop redirects.
        let router = AppRouter::with_table(
            RouteTable::empty(),
            SharedSession::default(),
            Arc::new(TagsStore::new()),
        );

        let err = router.navigate("/anywhere").unwrap_err();
        assert!(err.message().contains("exceeded"));
        assert_eq!(router.current(), None);
    }
}
