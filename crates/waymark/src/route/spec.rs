//! Author-facing route specification: a tagged, recursive description of the
//! route tree, validated by construction rather than inferred from which
//! optional fields happen to be present.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Reserved sibling key for catch-all routes.
///
/// A node stored under this key is reordered to the end of its sibling list
/// at compile time, so it is always the last match attempt at that level.
pub const NOT_FOUND_KEY: &str = "notFound";

/// One routable location in the tree.
///
/// The two variants are structurally distinct on purpose: a redirect route
/// cannot carry children, a component, or its own auth requirement, and the
/// type system enforces that instead of a runtime validation pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RouteSpec {
    /// A renderable route, optionally with nested children.
    Page(PageRoute),
    /// A route that navigates away instead of rendering.
    Redirect(RedirectRoute),
}

impl From<PageRoute> for RouteSpec {
    fn from(page: PageRoute) -> Self {
        RouteSpec::Page(page)
    }
}

impl From<RedirectRoute> for RouteSpec {
    fn from(redirect: RedirectRoute) -> Self {
        RouteSpec::Redirect(redirect)
    }
}

/// A renderable route node.
///
/// Every field is optional; a bare `PageRoute::new()` is a valid pathless
/// node that the rendering layer treats as always matching.
///
/// # Examples
///
/// ```
/// use waymark::route::{PageRoute, RouteTree};
///
/// let settings = PageRoute::at("/settings")
///     .with_component("SettingsPage")
///     .with_auth(true)
///     .with_children(
///         RouteTree::new().route("profile", PageRoute::at("/profile").with_component("ProfilePage")),
///     );
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageRoute {
    /// Path template, absolute within the parent's base. May contain `:name`
    /// parameters and `$name` environment placeholders.
    #[serde(default)]
    pub path: Option<String>,

    /// Opaque component handle, resolved by the rendering layer.
    #[serde(default)]
    pub component: Option<String>,

    /// Authentication requirement. `None` inherits the nearest ancestor's
    /// resolved value; the root default is `false`.
    #[serde(default)]
    pub auth: Option<bool>,

    /// Exact-match flag for the rendering layer (default `false`).
    #[serde(default)]
    pub exact: Option<bool>,

    /// Strict trailing-slash flag for the rendering layer.
    #[serde(default)]
    pub strict: Option<bool>,

    /// Case-sensitive matching flag for the rendering layer.
    #[serde(default)]
    pub sensitive: Option<bool>,

    /// Display title. Defaults to the node's key, capitalized.
    #[serde(default)]
    pub title: Option<String>,

    /// Arbitrary pass-through props delivered with the compiled descriptor.
    #[serde(default)]
    pub props: HashMap<String, String>,

    /// Nested routes. An empty tree makes this a leaf.
    #[serde(default)]
    pub children: RouteTree,
}

impl PageRoute {
    /// Creates an empty, pathless route node.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a route node at the given path template.
    pub fn at(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Sets the component handle.
    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    /// Sets an explicit authentication requirement.
    pub fn with_auth(mut self, auth: bool) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Sets the exact-match flag.
    pub fn with_exact(mut self, exact: bool) -> Self {
        self.exact = Some(exact);
        self
    }

    /// Sets the strict trailing-slash flag.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = Some(strict);
        self
    }

    /// Sets the case-sensitive matching flag.
    pub fn with_sensitive(mut self, sensitive: bool) -> Self {
        self.sensitive = Some(sensitive);
        self
    }

    /// Sets an explicit display title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Adds one pass-through prop.
    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    /// Attaches the nested route tree.
    pub fn with_children(mut self, children: RouteTree) -> Self {
        self.children = children;
        self
    }
}

/// A route that issues a one-shot navigation instead of rendering.
///
/// The target may contain `$name` environment placeholders, resolved at
/// navigation time against the live env map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedirectRoute {
    /// Path template this redirect is mounted at.
    pub path: String,

    /// Navigation target.
    pub target: String,

    /// Exact-match flag. Redirect routes default to exact matching.
    #[serde(default)]
    pub exact: Option<bool>,

    /// Strict trailing-slash flag (default `false`).
    #[serde(default)]
    pub strict: Option<bool>,
}

impl RedirectRoute {
    /// Creates a redirect from `path` to `target`.
    ///
    /// # Examples
    ///
    /// ```
    /// use waymark::route::RedirectRoute;
    ///
    /// let legacy = RedirectRoute::new("/old-settings", "/settings");
    /// assert_eq!(legacy.resolved_exact(), true);
    /// ```
    pub fn new(path: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            target: target.into(),
            exact: None,
            strict: None,
        }
    }

    /// Overrides the exact-match default.
    pub fn with_exact(mut self, exact: bool) -> Self {
        self.exact = Some(exact);
        self
    }

    /// Sets the strict trailing-slash flag.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = Some(strict);
        self
    }

    /// Exact flag with the redirect default applied.
    pub fn resolved_exact(&self) -> bool {
        self.exact.unwrap_or(true)
    }
}

/// Insertion-ordered mapping from sibling key to [`RouteSpec`].
///
/// Sibling order is significant: the flattened descriptor list is matched
/// first-match-wins, and the [`NOT_FOUND_KEY`] entry is moved behind its
/// siblings during compilation.
///
/// # Examples
///
/// ```
/// use waymark::route::{PageRoute, RouteTree};
///
/// let tree = RouteTree::new()
///     .route("home", PageRoute::at("/").with_component("HomePage"))
///     .route("about", PageRoute::at("/about").with_component("AboutPage"));
///
/// assert_eq!(tree.len(), 2);
/// assert!(tree.get("home").is_some());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteTree {
    entries: Vec<(String, RouteSpec)>,
}

impl RouteTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a route under `key`, builder-style.
    pub fn route(mut self, key: impl Into<String>, spec: impl Into<RouteSpec>) -> Self {
        self.insert(key, spec);
        self
    }

    /// Adds a route under `key`.
    pub fn insert(&mut self, key: impl Into<String>, spec: impl Into<RouteSpec>) {
        self.entries.push((key.into(), spec.into()));
    }

    /// Looks up a route by key.
    pub fn get(&self, key: &str) -> Option<&RouteSpec> {
        self.entries
            .iter()
            .find(|(entry_key, _)| entry_key == key)
            .map(|(_, spec)| spec)
    }

    /// Number of routes at this level.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether this level holds no routes.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RouteSpec)> {
        self.entries.iter().map(|(key, spec)| (key.as_str(), spec))
    }

    /// Iterates entries in compile order: insertion order, with any
    /// [`NOT_FOUND_KEY`] entry moved last. The relative order of the other
    /// siblings is preserved.
    pub(crate) fn ordered(&self) -> impl Iterator<Item = (&str, &RouteSpec)> {
        let (rest, not_found): (Vec<_>, Vec<_>) = self
            .entries
            .iter()
            .partition(|(key, _)| key != NOT_FOUND_KEY);

        rest.into_iter()
            .chain(not_found)
            .map(|(key, spec)| (key.as_str(), spec))
    }
}
