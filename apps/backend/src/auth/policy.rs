//! Per-route authentication policy.
//!
//! Policies are declared in an explicit table built once at startup, next to
//! route registration; no runtime reflection. A per-route entry (method +
//! path pattern) takes precedence over a scope-level prefix entry, mirroring
//! method-level markers overriding type-level ones. Routes with no entry are
//! unauthenticated.

use actix_web::http::Method;

/// Declarative authentication marker for a route or scope.
#[derive(Debug, Clone)]
pub struct AuthPolicy {
    /// Whether authentication is enforced.
    pub required: bool,
    /// Message returned when a guarded route is called without a token.
    pub message: String,
    /// Best-effort anonymous access. Carried in the model but not wired into
    /// enforcement; see DESIGN.md.
    pub allow_anonymous: bool,
}

impl Default for AuthPolicy {
    fn default() -> Self {
        Self {
            required: true,
            message: "请先登录".to_string(),
            allow_anonymous: false,
        }
    }
}

struct RouteRule {
    method: Method,
    pattern: String,
    policy: AuthPolicy,
}

struct ScopeRule {
    prefix: String,
    policy: AuthPolicy,
}

/// Route-to-policy resolution table.
pub struct PolicyRegistry {
    routes: Vec<RouteRule>,
    scopes: Vec<ScopeRule>,
}

impl PolicyRegistry {
    pub fn builder() -> PolicyRegistryBuilder {
        PolicyRegistryBuilder {
            routes: Vec::new(),
            scopes: Vec::new(),
        }
    }

    /// Resolve the policy for a request. Route entries win over scope
    /// entries; among scopes the longest matching prefix wins.
    pub fn resolve(&self, method: &Method, path: &str) -> Option<&AuthPolicy> {
        if let Some(rule) = self
            .routes
            .iter()
            .find(|rule| rule.method == *method && pattern_matches(&rule.pattern, path))
        {
            return Some(&rule.policy);
        }

        self.scopes
            .iter()
            .filter(|rule| prefix_matches(&rule.prefix, path))
            .max_by_key(|rule| rule.prefix.len())
            .map(|rule| &rule.policy)
    }
}

pub struct PolicyRegistryBuilder {
    routes: Vec<RouteRule>,
    scopes: Vec<ScopeRule>,
}

impl PolicyRegistryBuilder {
    /// Guard a single route. `pattern` uses the route syntax, e.g.
    /// `/api/v1/categories/{categoryId}`.
    pub fn route(mut self, method: Method, pattern: &str, policy: AuthPolicy) -> Self {
        self.routes.push(RouteRule {
            method,
            pattern: pattern.to_string(),
            policy,
        });
        self
    }

    /// Guard every route under a path prefix.
    pub fn scope(mut self, prefix: &str, policy: AuthPolicy) -> Self {
        self.scopes.push(ScopeRule {
            prefix: prefix.trim_end_matches('/').to_string(),
            policy,
        });
        self
    }

    pub fn build(self) -> PolicyRegistry {
        PolicyRegistry {
            routes: self.routes,
            scopes: self.scopes,
        }
    }
}

/// Segment-wise match of a concrete path against a route pattern, where
/// `{name}` segments match any single non-empty segment.
fn pattern_matches(pattern: &str, path: &str) -> bool {
    let pattern_segments: Vec<&str> = pattern.trim_matches('/').split('/').collect();
    let path_segments: Vec<&str> = path.trim_matches('/').split('/').collect();

    if pattern_segments.len() != path_segments.len() {
        return false;
    }

    pattern_segments
        .iter()
        .zip(&path_segments)
        .all(|(pattern_segment, path_segment)| {
            if pattern_segment.starts_with('{') && pattern_segment.ends_with('}') {
                !path_segment.is_empty()
            } else {
                pattern_segment == path_segment
            }
        })
}

/// Prefix match on segment boundaries: `/api/v1/categories` matches
/// `/api/v1/categories` and `/api/v1/categories/3`, not `/api/v1/categoriesx`.
fn prefix_matches(prefix: &str, path: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unregistered_route_has_no_policy() {
        let registry = PolicyRegistry::builder().build();
        assert!(registry.resolve(&Method::GET, "/api/auth/miniapp/login").is_none());
    }

    #[test]
    fn test_scope_guards_nested_paths() {
        let registry = PolicyRegistry::builder()
            .scope("/api/v1/categories", AuthPolicy::default())
            .build();

        assert!(registry.resolve(&Method::GET, "/api/v1/categories/all").is_some());
        assert!(registry.resolve(&Method::DELETE, "/api/v1/categories/3").is_some());
        assert!(registry.resolve(&Method::GET, "/api/v1/categoriesx").is_none());
        assert!(registry.resolve(&Method::GET, "/api/v1").is_none());
    }

    #[test]
    fn test_route_entry_overrides_scope_entry() {
        let open = AuthPolicy {
            required: false,
            ..AuthPolicy::default()
        };
        let registry = PolicyRegistry::builder()
            .scope("/api/v1/categories", AuthPolicy::default())
            .route(Method::GET, "/api/v1/categories/all", open)
            .build();

        let resolved = registry
            .resolve(&Method::GET, "/api/v1/categories/all")
            .unwrap();
        assert!(!resolved.required);

        // Other routes in the scope keep the scope policy.
        let resolved = registry
            .resolve(&Method::POST, "/api/v1/categories/addCategory")
            .unwrap();
        assert!(resolved.required);
    }

    #[test]
    fn test_route_pattern_parameters() {
        let registry = PolicyRegistry::builder()
            .route(
                Method::PUT,
                "/api/v1/categories/{categoryId}",
                AuthPolicy::default(),
            )
            .build();

        assert!(registry.resolve(&Method::PUT, "/api/v1/categories/42").is_some());
        assert!(registry.resolve(&Method::PUT, "/api/v1/categories").is_none());
        assert!(registry.resolve(&Method::GET, "/api/v1/categories/42").is_none());
    }

    #[test]
    fn test_longest_scope_prefix_wins() {
        let open = AuthPolicy {
            required: false,
            ..AuthPolicy::default()
        };
        let registry = PolicyRegistry::builder()
            .scope("/api", AuthPolicy::default())
            .scope("/api/public", open)
            .build();

        assert!(registry.resolve(&Method::GET, "/api/thing").unwrap().required);
        assert!(!registry.resolve(&Method::GET, "/api/public/thing").unwrap().required);
    }

    #[test]
    fn test_default_policy_values() {
        let policy = AuthPolicy::default();
        assert!(policy.required);
        assert!(!policy.allow_anonymous);
        assert_eq!(policy.message, "请先登录");
    }
}
