//! Recursive route-tree compiler.
//!
//! Walks the author-supplied [`RouteTree`] and produces, in one pass:
//!
//! 1. the flat, ordered [`RouteDescriptor`] list consumed by the rendering
//!    layer (depth-first pre-order, parents before children, `notFound`
//!    entries last among their siblings), and
//! 2. the linked [`ViewNode`] graph used for path construction and
//!    current-view lookup.
//!
//! Both sides synthesize their match patterns through the same path algebra,
//! so route matching and view lookup always agree on a URL.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::group::RouteGroup;
use crate::path::{self, EnvMap, PathPattern};
use crate::route::{RouteDescriptor, RouteSpec, RouteTree};
use crate::view::ViewNode;

/// Compiles a route tree into a [`RouteGroup`].
///
/// The env map handle is cloned into every compiled view, so `$name`
/// placeholders resolve against live values at path-build time.
///
/// There are no error conditions: malformed path templates silently compile
/// into patterns that match nothing.
///
/// # Examples
///
/// ```
/// use waymark::path::env_map;
/// use waymark::route::{compile, PageRoute, RouteTree};
///
/// let tree = RouteTree::new()
///     .route("home", PageRoute::at("/").with_component("HomePage"))
///     .route(
///         "settings",
///         PageRoute::at("/settings")
///             .with_component("SettingsPage")
///             .with_auth(true)
///             .with_children(
///                 RouteTree::new()
///                     .route("profile", PageRoute::at("/profile").with_component("ProfilePage")),
///             ),
///     );
///
/// let group = compile(&tree, env_map());
///
/// assert_eq!(group.routes().len(), 3);
/// assert_eq!(group.routes()[2].path.as_deref(), Some("/settings/profile"));
/// assert!(group.routes()[2].auth);
/// ```
pub fn compile(tree: &RouteTree, envs: EnvMap) -> RouteGroup {
    let mut routes = Vec::new();
    let mut views_list = Vec::new();

    let views = walk(tree, "", false, &[], &envs, &mut routes, &mut views_list);

    RouteGroup::new(routes, views, views_list, tree.clone())
}

/// Compiles one sibling level, appending descriptors and views in emission
/// order and returning the per-key view map for this level.
fn walk(
    tree: &RouteTree,
    base_path: &str,
    inherited_auth: bool,
    ancestors: &[Arc<ViewNode>],
    envs: &EnvMap,
    routes: &mut Vec<RouteDescriptor>,
    views_list: &mut Vec<Arc<ViewNode>>,
) -> HashMap<String, Arc<ViewNode>> {
    let mut views = HashMap::new();

    for (key, spec) in tree.ordered() {
        match spec {
            RouteSpec::Page(page) => {
                let absolute = page.path.as_ref().map(|p| format!("{base_path}{p}"));
                let auth = page.auth.unwrap_or(inherited_auth);

                let descriptor = RouteDescriptor {
                    key: key.to_string(),
                    path: absolute.as_deref().map(path::remove_envs),
                    pattern: absolute.as_deref().map(PathPattern::compile),
                    params: absolute
                        .as_deref()
                        .map(path::param_names)
                        .unwrap_or_default(),
                    auth,
                    exact: page.exact.unwrap_or(false),
                    strict: page.strict.unwrap_or(false),
                    sensitive: page.sensitive.unwrap_or(false),
                    component: page.component.clone(),
                    redirect: None,
                    props: page.props.clone(),
                };
                debug!(key, path = ?descriptor.path, auth, "compiled route");

                let title = page.title.clone().unwrap_or_else(|| capitalize(key));
                let view = ViewNode::new(key, title, absolute.clone(), ancestors, envs.clone());

                routes.push(descriptor);
                views_list.push(view.clone());
                views.insert(key.to_string(), view.clone());

                if !page.children.is_empty() {
                    // A node's base for its children is its own compiled path
                    // with the trailing separator stripped; pathless parents
                    // pass their own base through unchanged.
                    let child_base = absolute
                        .as_deref()
                        .map(path::normalize_base)
                        .unwrap_or_else(|| base_path.to_string());

                    let mut chain = ancestors.to_vec();
                    chain.push(view.clone());

                    let children =
                        walk(&page.children, &child_base, auth, &chain, envs, routes, views_list);
                    view.attach_children(children);
                }
            }
            RouteSpec::Redirect(redirect) => {
                let absolute = format!("{base_path}{}", redirect.path);

                let descriptor = RouteDescriptor {
                    key: key.to_string(),
                    path: Some(path::remove_envs(&absolute)),
                    pattern: Some(PathPattern::compile(&absolute)),
                    params: path::param_names(&absolute),
                    auth: inherited_auth,
                    exact: redirect.resolved_exact(),
                    strict: redirect.strict.unwrap_or(false),
                    sensitive: false,
                    component: None,
                    redirect: Some(redirect.target.clone()),
                    props: HashMap::new(),
                };
                debug!(key, path = ?descriptor.path, target = %redirect.target, "compiled redirect");

                let view =
                    ViewNode::new(key, capitalize(key), Some(absolute), ancestors, envs.clone());

                routes.push(descriptor);
                views_list.push(view.clone());
                views.insert(key.to_string(), view);
            }
        }
    }

    views
}

/// Default title for a node: its key with the first character uppercased.
fn capitalize(key: &str) -> String {
    let mut chars = key.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
