//! Minimal route table: maps a request path to the backend route that serves it.
//!
//! The matched route is attached to the request extensions so later stages
//! (authentication, proxy, fallback) can read it without re-matching.
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayRoute {
    /// Logical service name, e.g. `wallet-service`.
    pub id: String,
    pub path_prefix: String,
    pub upstream: Url,
}

impl GatewayRoute {
    pub fn new(id: impl Into<String>, path_prefix: impl Into<String>, upstream: Url) -> Self {
        Self {
            id: id.into(),
            path_prefix: path_prefix.into(),
            upstream,
        }
    }

    fn matches(&self, path: &str) -> bool {
        match path.strip_prefix(self.path_prefix.as_str()) {
            Some(rest) => {
                rest.is_empty() || rest.starts_with('/') || self.path_prefix.ends_with('/')
            }
            None => false,
        }
    }
}

/// Route identity attached by the routing layer. Read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedRoute(pub String);

impl MatchedRoute {
    pub fn id(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<GatewayRoute>,
}

impl RouteTable {
    pub fn new(routes: Vec<GatewayRoute>) -> Self {
        Self { routes }
    }

    /// Longest matching prefix wins; a prefix only matches on a segment boundary.
    pub fn match_path(&self, path: &str) -> Option<&GatewayRoute> {
        self.routes
            .iter()
            .filter(|route| route.matches(path))
            .max_by_key(|route| route.path_prefix.len())
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
