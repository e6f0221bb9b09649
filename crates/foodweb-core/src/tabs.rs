//! Tab manager for the admin shell
//!
//! Keeps the ordered list of visited views and the names of views whose
//! rendered instance may be reused. A view is keyed by its path; the list
//! never holds two views with the same path.

use crate::navigation::{ADMIN_HOME_PATH, Navigator};
use crate::router::ResolvedRoute;
use parking_lot::Mutex;
use tracing::debug;

/// Title used when a view is added without one
pub const UNTITLED: &str = "untitled page";

/// One open tab
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagView {
    pub path: String,
    pub title: String,
    pub name: String,
    pub full_path: String,
    pub icon: Option<String>,
    /// Pinned tabs survive bulk closes
    pub fixed: bool,
    pub no_cache: bool,
}

impl TagView {
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            full_path: path.clone(),
            path,
            title: String::new(),
            name: name.into(),
            icon: None,
            fixed: false,
            no_cache: false,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_full_path(mut self, full_path: impl Into<String>) -> Self {
        self.full_path = full_path.into();
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn fixed(mut self) -> Self {
        self.fixed = true;
        self
    }

    pub fn no_cache(mut self) -> Self {
        self.no_cache = true;
        self
    }

    /// Named and not opted out of caching
    pub fn cacheable(&self) -> bool {
        !self.name.is_empty() && !self.no_cache
    }

    pub fn from_route(route: &ResolvedRoute) -> Self {
        Self {
            path: route.path.clone(),
            title: route.title().unwrap_or_default().to_string(),
            name: route.name.clone(),
            full_path: route.full_path.clone(),
            icon: None,
            fixed: false,
            no_cache: route.meta.no_cache,
        }
    }
}

#[derive(Debug, Default)]
struct TagsState {
    visited: Vec<TagView>,
    cached: Vec<String>,
}

/// Visited and cached views behind a lock
#[derive(Debug, Default)]
pub struct TagsStore {
    state: Mutex<TagsState>,
}

impl TagsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visited_views(&self) -> Vec<TagView> {
        self.state.lock().visited.clone()
    }

    pub fn cached_views(&self) -> Vec<String> {
        self.state.lock().cached.clone()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.state.lock().visited.iter().any(|v| v.path == path)
    }

    /// Open a tab unless one with the same path is already open
    pub fn add_view(&self, view: TagView) {
        let mut state = self.state.lock();
        if state.visited.iter().any(|v| v.path == view.path) {
            return;
        }

        let mut view = view;
        if view.title.is_empty() {
            view.title = UNTITLED.to_string();
        }
        if view.cacheable() && !state.cached.contains(&view.name) {
            state.cached.push(view.name.clone());
        }
        debug!("Opened tab {}", view.path);
        state.visited.push(view);
    }

    /// Close the tab with the view's path
    ///
    /// Only the path identifies the tab; the cache entry dropped is the
    /// stored tab's name.
    pub fn remove_view(&self, view: &TagView) {
        let mut state = self.state.lock();
        let Some(index) = state.visited.iter().position(|v| v.path == view.path) else {
            return;
        };
        let removed = state.visited.remove(index);
        debug!("Closed tab {}", removed.path);

        if removed.name.is_empty() {
            return;
        }
        let still_used = state
            .visited
            .iter()
            .any(|v| v.cacheable() && v.name == removed.name);
        if !still_used {
            state.cached.retain(|name| name != &removed.name);
        }
    }

    /// Keep pinned tabs and the given one
    pub fn remove_others(&self, view: &TagView) {
        let mut state = self.state.lock();
        state.visited.retain(|v| v.fixed || v.path == view.path);
        let kept = state
            .visited
            .iter()
            .find(|v| v.path == view.path && v.cacheable())
            .map(|v| v.name.clone());
        state.cached.retain(|name| Some(name) == kept.as_ref());
    }

    /// Keep pinned tabs only
    pub fn remove_all(&self) {
        let mut state = self.state.lock();
        state.visited.retain(|v| v.fixed);
        state.cached.clear();
    }

    /// Close a tab and move to the last remaining one, or the admin home
    pub fn close_and_navigate(&self, view: &TagView, navigator: &dyn Navigator) {
        self.remove_view(view);
        // The lock must be released before navigating: the router opens tabs.
        let target = self
            .state
            .lock()
            .visited
            .last()
            .map(|v| v.full_path.clone())
            .unwrap_or_else(|| ADMIN_HOME_PATH.to_string());
        navigator.push(&target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::MockNavigator;
    use crate::testing::RecordingNavigator;
    use mockall::predicate::eq;

    fn view(path: &str, name: &str) -> TagView {
        TagView::new(path, name).with_title(name)
    }

    fn paths(store: &TagsStore) -> Vec<String> {
        store.visited_views().into_iter().map(|v| v.path).collect()
    }

    /// Names of currently visited cacheable views, deduplicated in order
    fn expected_cache(store: &TagsStore) -> Vec<String> {
        let mut names = Vec::new();
        for v in store.visited_views() {
            if v.cacheable() && !names.contains(&v.name) {
                names.push(v.name);
            }
        }
        names
    }

    #[test]
    fn test_add_view_ignores_duplicate_paths() {
        let store = TagsStore::new();
        store.add_view(view("/admin/users", "users-manage"));
        let before = store.visited_views();

        store.add_view(view("/admin/users", "other").with_title("Changed"));

        assert_eq!(store.visited_views(), before);
        assert_eq!(store.cached_views(), vec!["users-manage".to_string()]);
    }

    #[test]
    fn test_add_view_defaults_title() {
        let store = TagsStore::new();
        store.add_view(TagView::new("/admin", "dashboard"));
        assert_eq!(store.visited_views()[0].title, UNTITLED);
    }

    #[test]
    fn test_uncacheable_views_are_not_cached() {
        let store = TagsStore::new();
        store.add_view(view("/admin/a", "a").no_cache());
        store.add_view(TagView::new("/admin/b", ""));
        assert_eq!(paths(&store), vec!["/admin/a", "/admin/b"]);
        assert!(store.cached_views().is_empty());
    }

    #[test]
    fn test_remove_view_keeps_shared_name() {
        let store = TagsStore::new();
        store.add_view(view("/admin/dishes/edit/1", "dish-edit"));
        store.add_view(view("/admin/dishes/edit/2", "dish-edit"));
        assert_eq!(store.cached_views(), vec!["dish-edit".to_string()]);

        store.remove_view(&view("/admin/dishes/edit/1", "dish-edit"));
        assert_eq!(store.cached_views(), vec!["dish-edit".to_string()]);

        store.remove_view(&view("/admin/dishes/edit/2", "dish-edit"));
        assert!(store.cached_views().is_empty());
        assert!(store.visited_views().is_empty());
    }

    #[test]
    fn test_remove_missing_view_is_noop() {
        let store = TagsStore::new();
        store.add_view(view("/admin", "dashboard"));
        store.remove_view(&view("/admin/users", "users-manage"));
        assert_eq!(paths(&store), vec!["/admin"]);
        assert_eq!(store.cached_views(), vec!["dashboard".to_string()]);
    }

    #[test]
    fn test_cache_tracks_visited_views_through_add_and_remove() {
        let store = TagsStore::new();
        let views = [
            view("/admin", "dashboard"),
            view("/admin/users", "users-manage"),
            view("/admin/dishes/edit/1", "dish-edit"),
            view("/admin/dishes/edit/2", "dish-edit"),
            view("/admin/dishes", "dishes-manage").no_cache(),
            TagView::new("/admin/anon", ""),
        ];

        // Deterministic walk over adds and removes, including repeats.
        let ops: [(bool, usize); 14] = [
            (true, 0),
            (true, 2),
            (true, 3),
            (true, 4),
            (false, 2),
            (true, 1),
            (true, 2),
            (true, 5),
            (false, 3),
            (false, 0),
            (true, 0),
            (false, 2),
            (false, 4),
            (true, 3),
        ];
        for (add, index) in ops {
            if add {
                store.add_view(views[index].clone());
            } else {
                store.remove_view(&views[index]);
            }
            let mut cached = store.cached_views();
            let mut expected = expected_cache(&store);
            cached.sort();
            expected.sort();
            assert_eq!(cached, expected, "after {:?}", (add, index));
        }
    }

    #[test]
    fn test_remove_others_keeps_fixed_and_target() {
        let store = TagsStore::new();
        store.add_view(view("/admin", "dashboard").fixed());
        store.add_view(view("/admin/users", "users-manage"));
        store.add_view(view("/admin/dishes", "dishes-manage"));
        store.add_view(view("/admin/categories", "categories-manage").fixed());

        store.remove_others(&view("/admin/dishes", "dishes-manage"));

        assert_eq!(
            paths(&store),
            vec!["/admin", "/admin/dishes", "/admin/categories"]
        );
        assert_eq!(store.cached_views(), vec!["dishes-manage".to_string()]);
    }

    #[test]
    fn test_remove_others_with_absent_target() {
        let store = TagsStore::new();
        store.add_view(view("/admin", "dashboard").fixed());
        store.add_view(view("/admin/users", "users-manage"));

        store.remove_others(&view("/admin/dishes", "dishes-manage"));

        assert_eq!(paths(&store), vec!["/admin"]);
        assert!(store.cached_views().is_empty());
    }

    #[test]
    fn test_remove_all_keeps_fixed_in_order() {
        let store = TagsStore::new();
        store.add_view(view("/admin/a", "a").fixed());
        store.add_view(view("/admin/b", "b"));
        store.add_view(view("/admin/c", "c").fixed());
        store.add_view(view("/admin/d", "d"));

        store.remove_all();

        assert_eq!(paths(&store), vec!["/admin/a", "/admin/c"]);
        assert!(store.cached_views().is_empty());
    }

    #[test]
    fn test_close_and_navigate_goes_to_last_tab() {
        let store = TagsStore::new();
        store.add_view(view("/admin/users", "users-manage"));
        store.add_view(
            view("/admin/dishes/edit/4", "dish-edit")
                .with_full_path("/admin/dishes/edit/4?tab=body"),
        );
        store.add_view(view("/admin/categories", "categories-manage"));

        let navigator = RecordingNavigator::new();
        store.close_and_navigate(
            &view("/admin/categories", "categories-manage"),
            &navigator,
        );

        assert_eq!(navigator.paths(), vec!["/admin/dishes/edit/4?tab=body"]);
    }

    #[test]
    fn test_close_last_tab_navigates_to_admin_home() {
        let store = TagsStore::new();
        store.add_view(view("/admin/users", "users-manage"));

        let mut navigator = MockNavigator::new();
        navigator
            .expect_push()
            .with(eq(ADMIN_HOME_PATH))
            .times(1)
            .return_const(());

        store.close_and_navigate(&view("/admin/users", "users-manage"), &navigator);
        assert!(store.visited_views().is_empty());
    }

    #[test]
    fn test_remove_view_by_path_drops_stored_name() {
        let store = TagsStore::new();
        store.add_view(view("/admin/users", "users-manage"));

        store.remove_view(&TagView::new("/admin/users", ""));

        assert!(store.visited_views().is_empty());
        assert!(store.cached_views().is_empty());
    }

    #[test]
    fn test_remove_missing_view_leaves_cache_alone() {
        let store = TagsStore::new();
        store.add_view(view("/admin/users", "users-manage"));

        // Same name, different path: nothing is closed
        store.remove_view(&view("/admin/other", "users-manage"));

        assert_eq!(paths(&store), vec!["/admin/users"]);
        assert_eq!(store.cached_views(), vec!["users-manage".to_string()]);
    }

    #[test]
    fn test_close_and_navigate_with_mismatched_name() {
        let store = TagsStore::new();
        store.add_view(view("/admin", "dashboard"));
        store.add_view(view("/admin/users", "users-manage"));

        let navigator = RecordingNavigator::new();
        store.close_and_navigate(&TagView::new("/admin/users", "x"), &navigator);

        assert_eq!(paths(&store), vec!["/admin"]);
        assert_eq!(store.cached_views(), vec!["dashboard".to_string()]);
        assert_eq!(navigator.paths(), vec!["/admin"]);
    }

    #[test]
    fn test_remove_others_keeps_stored_name_of_target() {
        let store = TagsStore::new();
        store.add_view(view("/admin", "dashboard").fixed());
        store.add_view(view("/admin/users", "users-manage"));

        store.remove_others(&TagView::new("/admin/users", ""));

        assert_eq!(paths(&store), vec!["/admin", "/admin/users"]);
        assert_eq!(store.cached_views(), vec!["users-manage".to_string()]);
    }
}
