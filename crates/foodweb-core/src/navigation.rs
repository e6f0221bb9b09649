//! Navigation seam
//!
//! Components that need to move the user somewhere (the HTTP layer after a
//! 401, the tab manager after closing a tab) depend on [`Navigator`] rather
//! than on the router itself.

/// Path of the sign-in page
pub const LOGIN_PATH: &str = "/login";

/// Path of the public landing page
pub const HOME_PATH: &str = "/";

/// Landing path of the admin back-office
pub const ADMIN_HOME_PATH: &str = "/admin";

/// Something that can move the user to a path
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    /// Navigate to `path`, which may carry a query string
    fn push(&self, path: &str);
}
