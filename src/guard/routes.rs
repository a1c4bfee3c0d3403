// guard/routes.rs - static route classification consulted by the access guard

/// A path pattern on the guard's trigger surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutePattern {
    /// Matches the path exactly.
    Exact(String),
    /// Matches the prefix itself and anything below `prefix/`.
    Subtree(String),
}

impl RoutePattern {
    pub fn exact(path: impl Into<String>) -> Self {
        RoutePattern::Exact(path.into())
    }

    pub fn subtree(prefix: impl Into<String>) -> Self {
        RoutePattern::Subtree(prefix.into())
    }

    pub fn matches(&self, path: &str) -> bool {
        match self {
            RoutePattern::Exact(exact) => path == exact,
            RoutePattern::Subtree(prefix) => match path.strip_prefix(prefix.as_str()) {
                Some(rest) => rest.is_empty() || rest.starts_with('/'),
                None => false,
            },
        }
    }
}

impl std::fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoutePattern::Exact(path) => f.write_str(path),
            RoutePattern::Subtree(prefix) => write!(f, "{}/*", prefix),
        }
    }
}

/// Paths and prefixes the guard decides on.
///
/// Rule prefixes are compared with plain `starts_with`; the trigger surface
/// decides which requests reach the rules at all.
#[derive(Debug, Clone)]
pub struct RouteTable {
    pub verify_path: String,
    pub login_path: String,
    pub home_path: String,
    pub admin_landing: String,

    /// Prefixes that require any credential.
    pub protected_prefixes: Vec<String>,
    pub admin_prefix: String,
    pub creator_prefix: String,
    pub dashboard_prefix: String,

    /// Paths only anonymous visitors should see.
    pub anonymous_paths: Vec<String>,
    pub anonymous_prefixes: Vec<String>,

    pub trigger_surface: Vec<RoutePattern>,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self {
            verify_path: "/verify".to_string(),
            login_path: "/login".to_string(),
            home_path: "/".to_string(),
            admin_landing: "/admin".to_string(),
            protected_prefixes: vec![
                "/dashboard".to_string(),
                "/admin".to_string(),
                "/creator".to_string(),
            ],
            admin_prefix: "/admin".to_string(),
            creator_prefix: "/creator".to_string(),
            dashboard_prefix: "/dashboard".to_string(),
            anonymous_paths: vec!["/login".to_string()],
            anonymous_prefixes: vec!["/signup".to_string()],
            trigger_surface: vec![
                RoutePattern::subtree("/admin"),
                RoutePattern::subtree("/dashboard"),
                RoutePattern::subtree("/creator"),
                RoutePattern::subtree("/account"),
                RoutePattern::exact("/login"),
                RoutePattern::subtree("/signup"),
                RoutePattern::exact("/verify"),
            ],
        }
    }
}

impl RouteTable {
    /// Whether the guard runs for this path at all.
    pub fn is_guarded(&self, path: &str) -> bool {
        self.trigger_surface.iter().any(|pattern| pattern.matches(path))
    }

    pub fn is_protected(&self, path: &str) -> bool {
        self.protected_prefixes
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
    }

    pub fn is_admin_area(&self, path: &str) -> bool {
        path.starts_with(self.admin_prefix.as_str())
    }

    pub fn is_creator_area(&self, path: &str) -> bool {
        path.starts_with(self.creator_prefix.as_str())
    }

    pub fn is_dashboard(&self, path: &str) -> bool {
        path.starts_with(self.dashboard_prefix.as_str())
    }

    pub fn is_anonymous_only(&self, path: &str) -> bool {
        self.anonymous_paths.iter().any(|exact| path == exact)
            || self
                .anonymous_prefixes
                .iter()
                .any(|prefix| path.starts_with(prefix.as_str()))
    }
}
