//! Route specification, compiled descriptors, and the tree compiler.

use std::collections::HashMap;

use crate::path::PathPattern;

pub mod compiler;
pub mod spec;

pub use compiler::compile;
pub use spec::{PageRoute, RedirectRoute, RouteSpec, RouteTree, NOT_FOUND_KEY};

/// A compiled, flattened, render-ready record for one route.
///
/// One descriptor is emitted per spec node, in depth-first pre-order with
/// parents before children and `notFound` entries last among their siblings.
/// The exposed `path` has `$name` environment markers rewritten to `:name`
/// so the rendering layer's own parameter extraction still works on it.
#[derive(Debug, Clone)]
pub struct RouteDescriptor {
    /// Sibling key this route was registered under.
    pub key: String,

    /// Absolute path with placeholders normalized to the `:name` marker.
    /// `None` for pathless routes, which match every location.
    pub path: Option<String>,

    /// Compiled match pattern for the absolute path.
    pub pattern: Option<PathPattern>,

    /// Placeholder names appearing in the path, in order.
    pub params: Vec<String>,

    /// Resolved authentication requirement (explicit value or inherited).
    pub auth: bool,

    /// Exact-match flag for the rendering layer.
    pub exact: bool,

    /// Strict trailing-slash flag for the rendering layer.
    pub strict: bool,

    /// Case-sensitive matching flag for the rendering layer.
    pub sensitive: bool,

    /// Opaque component handle, if this route renders.
    pub component: Option<String>,

    /// Navigation target, if this route redirects. May still contain `$name`
    /// markers; they are resolved at navigation time.
    pub redirect: Option<String>,

    /// Pass-through props from the spec node.
    pub props: HashMap<String, String>,
}

impl RouteDescriptor {
    /// Whether this descriptor structurally matches a location path.
    ///
    /// Pathless descriptors match everything, which is why catch-all nodes
    /// are ordered last in the flattened list.
    pub fn matches(&self, path: &str) -> bool {
        match &self.pattern {
            Some(pattern) => pattern.is_match(path),
            None => true,
        }
    }

    /// Whether this route redirects instead of rendering.
    pub fn is_redirect(&self) -> bool {
        self.redirect.is_some()
    }
}

/// Result of matching a location against a group's flattened route list.
///
/// Parameters are carried on the match itself, never stored in shared
/// state, so concurrent matches cannot clobber each other.
#[derive(Debug, Clone)]
pub struct RouteMatch {
    /// The matched route.
    pub route: RouteDescriptor,

    /// Extracted parameters from the path, keyed by placeholder name.
    pub params: HashMap<String, String>,
}

impl RouteMatch {
    pub(crate) fn new(route: &RouteDescriptor, path: &str) -> Self {
        let values = route
            .pattern
            .as_ref()
            .and_then(|pattern| pattern.capture_values(path))
            .unwrap_or_default();

        let params = route
            .params
            .iter()
            .cloned()
            .zip(values)
            .collect::<HashMap<_, _>>();

        Self {
            route: route.clone(),
            params,
        }
    }
}
