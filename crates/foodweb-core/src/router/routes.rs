//! Route table and location resolution
//!
//! Paths are matched segment by segment. Static segments compare
//! ASCII-case-insensitively, `:name` segments capture a value, and a
//! trailing slash is ignored. Anything the table does not know is sent to
//! `/` by the catch-all.

use std::collections::BTreeMap;
use url::form_urlencoded;

pub const HOME: &str = "home";
pub const LOGIN: &str = "login";
pub const DASHBOARD: &str = "dashboard";

/// Query key carrying the path to return to after signing in
pub const REDIRECT_QUERY_KEY: &str = "redirect";

/// Declared requirements and display data of a route
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteMeta {
    pub title: Option<&'static str>,
    pub requires_auth: bool,
    pub is_admin: bool,
    /// Only reachable while signed out
    pub guest: bool,
    pub no_cache: bool,
}

impl RouteMeta {
    fn titled(title: &'static str) -> Self {
        Self {
            title: Some(title),
            ..Self::default()
        }
    }

    fn guest(mut self) -> Self {
        self.guest = true;
        self
    }

    /// Child metadata wins field by field; flags are inherited
    fn inherit(self, parent: RouteMeta) -> Self {
        Self {
            title: self.title.or(parent.title),
            requires_auth: self.requires_auth || parent.requires_auth,
            is_admin: self.is_admin || parent.is_admin,
            guest: self.guest || parent.guest,
            no_cache: self.no_cache || parent.no_cache,
        }
    }
}

/// One named entry of the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRecord {
    pub name: &'static str,
    pub path: String,
    pub meta: RouteMeta,
    /// Rendered inside the admin shell, which keeps tabs
    pub in_admin_layout: bool,
}

impl RouteRecord {
    fn new(name: &'static str, path: impl Into<String>, meta: RouteMeta) -> Self {
        Self {
            name,
            path: path.into(),
            meta,
            in_admin_layout: false,
        }
    }

    fn matches(&self, segments: &[&str]) -> Option<BTreeMap<String, String>> {
        let pattern = split_segments(&self.path);
        if pattern.len() != segments.len() {
            return None;
        }

        let mut params = BTreeMap::new();
        for (expected, actual) in pattern.iter().zip(segments) {
            match expected.strip_prefix(':') {
                Some(param) => {
                    params.insert(param.to_string(), (*actual).to_string());
                }
                None if expected.eq_ignore_ascii_case(actual) => {}
                None => return None,
            }
        }
        Some(params)
    }
}

/// Where to go: a raw path or a named route, plus query parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Path(String),
    Named {
        name: &'static str,
        query: Vec<(String, String)>,
    },
}

impl Location {
    pub fn path(path: impl Into<String>) -> Self {
        Self::Path(path.into())
    }

    pub fn named(name: &'static str) -> Self {
        Self::Named {
            name,
            query: Vec::new(),
        }
    }

    /// Add a query parameter; ignored for raw paths, which carry their own
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let Self::Named { query, .. } = &mut self {
            query.push((key.into(), value.into()));
        }
        self
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path),
            Self::Named { name, query } if query.is_empty() => write!(f, "{{name: {}}}", name),
            Self::Named { name, query } => {
                write!(f, "{{name: {}, query: {}}}", name, encode_query(query))
            }
        }
    }
}

/// A location matched against the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute {
    pub name: String,
    /// Path without query or hash
    pub path: String,
    /// Path with query and hash as requested
    pub full_path: String,
    pub params: BTreeMap<String, String>,
    pub query: BTreeMap<String, String>,
    pub meta: RouteMeta,
    pub in_admin_layout: bool,
}

impl ResolvedRoute {
    pub fn title(&self) -> Option<&'static str> {
        self.meta.title
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }
}

/// Outcome of looking a location up in the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Matched(ResolvedRoute),
    /// Unknown location; the catch-all sends it here
    Redirect(String),
}

/// The application's routes
#[derive(Debug, Clone)]
pub struct RouteTable {
    records: Vec<RouteRecord>,
    fallback: String,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl RouteTable {
    /// Public pages, guest pages and the admin shell
    pub fn standard() -> Self {
        let mut records = vec![
            RouteRecord::new(HOME, "/", RouteMeta::titled("Home - Food Recommendation")),
            RouteRecord::new(
                "dish-list",
                "/dishes",
                RouteMeta::titled("Discover Dishes - Food Recommendation"),
            ),
            RouteRecord::new(
                "dish-detail",
                "/dish/:id",
                RouteMeta::titled("Dish Details - Food Recommendation"),
            ),
            RouteRecord::new(
                LOGIN,
                "/login",
                RouteMeta::titled("Sign In - Food Recommendation").guest(),
            ),
            RouteRecord::new(
                "register",
                "/register",
                RouteMeta::titled("Register - Food Recommendation").guest(),
            ),
            RouteRecord::new(
                "about",
                "/about",
                RouteMeta::titled("About Us - Food Recommendation"),
            ),
        ];

        let layout = RouteMeta {
            requires_auth: true,
            is_admin: true,
            ..RouteMeta::default()
        };
        records.extend(Self::layout(
            "/admin",
            layout,
            vec![
                RouteRecord::new(
                    DASHBOARD,
                    "",
                    RouteMeta::titled("Dashboard - Food Recommendation Admin"),
                ),
                RouteRecord::new(
                    "users-manage",
                    "users",
                    RouteMeta::titled("User Management - Food Recommendation Admin"),
                ),
                RouteRecord::new(
                    "categories-manage",
                    "categories",
                    RouteMeta::titled("Category Management - Food Recommendation Admin"),
                ),
                RouteRecord::new(
                    "dishes-manage",
                    "dishes",
                    RouteMeta::titled("Dish Management - Food Recommendation Admin"),
                ),
                RouteRecord::new(
                    "dish-add",
                    "dishes/add",
                    RouteMeta::titled("Add Dish - Food Recommendation Admin"),
                ),
                RouteRecord::new(
                    "dish-edit",
                    "dishes/edit/:id",
                    RouteMeta::titled("Edit Dish - Food Recommendation Admin"),
                ),
            ],
        ));

        Self {
            records,
            fallback: "/".to_string(),
        }
    }

    #[cfg(test)]
    pub(crate) fn empty() -> Self {
        Self {
            records: Vec::new(),
            fallback: "/".to_string(),
        }
    }

    /// Mount children under a shared layout path and metadata
    fn layout(prefix: &str, meta: RouteMeta, children: Vec<RouteRecord>) -> Vec<RouteRecord> {
        children
            .into_iter()
            .map(|child| {
                let path = if child.path.is_empty() {
                    prefix.to_string()
                } else {
                    format!("{}/{}", prefix.trim_end_matches('/'), child.path)
                };
                RouteRecord {
                    name: child.name,
                    path,
                    meta: child.meta.inherit(meta),
                    in_admin_layout: true,
                }
            })
            .collect()
    }

    pub fn records(&self) -> &[RouteRecord] {
        &self.records
    }

    pub fn by_name(&self, name: &str) -> Option<&RouteRecord> {
        self.records.iter().find(|r| r.name == name)
    }

    /// Turn a location into the path string it stands for
    pub fn href(&self, location: &Location) -> Option<String> {
        match location {
            Location::Path(path) => Some(path.clone()),
            Location::Named { name, query } => {
                let record = self.by_name(name)?;
                if query.is_empty() {
                    Some(record.path.clone())
                } else {
                    Some(format!("{}?{}", record.path, encode_query(query)))
                }
            }
        }
    }

    /// Match a location string such as `/dish/4?from=home`
    pub fn resolve(&self, location: &str) -> Resolution {
        let full_path = normalize(location);
        let (before_hash, _hash) = split_once_or_all(&full_path, '#');
        let (path, query_string) = split_once_or_all(before_hash, '?');
        let segments = split_segments(path);

        for record in &self.records {
            if let Some(params) = record.matches(&segments) {
                return Resolution::Matched(ResolvedRoute {
                    name: record.name.to_string(),
                    path: path.to_string(),
                    full_path: full_path.clone(),
                    params,
                    query: parse_query(query_string),
                    meta: record.meta,
                    in_admin_layout: record.in_admin_layout,
                });
            }
        }

        Resolution::Redirect(self.fallback.clone())
    }
}

fn normalize(location: &str) -> String {
    let trimmed = location.trim();
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

fn split_once_or_all(value: &str, separator: char) -> (&str, &str) {
    value.split_once(separator).unwrap_or((value, ""))
}

fn split_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

fn parse_query(query: &str) -> BTreeMap<String, String> {
    form_urlencoded::parse(query.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

fn encode_query(pairs: &[(String, String)]) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}
