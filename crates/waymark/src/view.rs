//! Compiled view graph: nodes offering path-construction helpers and
//! ancestor linkage.
//!
//! The compiler exclusively owns construction. A [`ViewNode`] is immutable
//! after it is built, except for the children map, which the compiler
//! attaches exactly once after the subtree below it has been compiled.

use std::collections::HashMap;
use std::sync::{Arc, Weak};

use once_cell::sync::OnceCell;

use crate::path::{self, EnvMap, PathPattern};

/// Options for [`ViewNode::handler_path`]: parameter substitution, sub-path
/// appending, and query building, applied in that fixed order.
///
/// # Examples
///
/// ```
/// use waymark::view::PathOptions;
///
/// let options = PathOptions::new()
///     .with_param("id", "42")
///     .with_append("edit")
///     .with_query("tab", "profile");
/// ```
#[derive(Debug, Clone, Default)]
pub struct PathOptions {
    params: HashMap<String, String>,
    append: Option<String>,
    queries: Vec<(String, String)>,
}

impl PathOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one `:name` parameter substitution.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Appends a sub-path after parameter substitution.
    pub fn with_append(mut self, segment: impl Into<String>) -> Self {
        self.append = Some(segment.into());
        self
    }

    /// Adds one query pair, encoded in insertion order.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.queries.push((key.into(), value.into()));
        self
    }
}

/// A compiled graph node for one route key.
///
/// Path-building methods return `None` for pathless nodes; everything else
/// is identity-preserving string algebra over the node's absolute template.
#[derive(Debug)]
pub struct ViewNode {
    key: String,
    title: String,
    path: Option<String>,
    pattern: Option<PathPattern>,
    parents: Vec<Weak<ViewNode>>,
    children: OnceCell<HashMap<String, Arc<ViewNode>>>,
    envs: EnvMap,
}

impl ViewNode {
    pub(crate) fn new(
        key: impl Into<String>,
        title: impl Into<String>,
        path: Option<String>,
        ancestors: &[Arc<ViewNode>],
        envs: EnvMap,
    ) -> Arc<Self> {
        let pattern = path.as_deref().map(PathPattern::compile);

        Arc::new(Self {
            key: key.into(),
            title: title.into(),
            path,
            pattern,
            parents: ancestors.iter().map(Arc::downgrade).collect(),
            children: OnceCell::new(),
            envs,
        })
    }

    /// Attaches the compiled children map. Called once by the compiler.
    pub(crate) fn attach_children(&self, children: HashMap<String, Arc<ViewNode>>) {
        // A second attach for the same node would be a compiler bug; the
        // stale map is simply dropped.
        let _ = self.children.set(children);
    }

    /// Sibling key this view was registered under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Display title: the explicit spec value, or the key capitalized.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Absolute path template before environment substitution.
    pub fn path_template(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Regex source used for current-view lookup.
    pub fn path_pattern(&self) -> Option<&str> {
        self.pattern.as_ref().map(|pattern| pattern.as_str())
    }

    /// Resolved absolute path, with `$name` placeholders substituted from
    /// the live env map. `:name` parameters are left intact.
    pub fn path(&self) -> Option<String> {
        let template = self.path.as_deref()?;
        let envs = self.envs.read().unwrap_or_else(|e| e.into_inner());

        Some(path::resolve_envs(template, &envs))
    }

    /// Resolved path with a sub-path appended through the `/` separator.
    pub fn append_path(&self, segment: &str) -> Option<String> {
        self.append_path_with(segment, '/')
    }

    /// Resolved path with a sub-path appended through a custom separator.
    pub fn append_path_with(&self, segment: &str, separator: char) -> Option<String> {
        self.path()
            .map(|base| path::append_with(&base, segment, separator))
    }

    /// Resolved path with `:name` parameters substituted. Unresolved
    /// placeholders are left intact.
    pub fn set_params(&self, params: &HashMap<String, String>) -> Option<String> {
        self.path().map(|base| path::set_params(&base, params))
    }

    /// Resolved path with a query string appended.
    pub fn set_query_params<K, V>(&self, queries: &[(K, V)]) -> Option<String>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.path().map(|base| path::set_queries(&base, queries))
    }

    /// Builds a full path from [`PathOptions`]: params, then append, then
    /// queries.
    pub fn handler_path(&self, options: &PathOptions) -> Option<String> {
        let mut built = self.path()?;

        if !options.params.is_empty() {
            built = path::set_params(&built, &options.params);
        }

        if let Some(segment) = &options.append {
            built = path::append(&built, segment);
        }

        if !options.queries.is_empty() {
            built = path::set_queries(&built, &options.queries);
        }

        Some(built)
    }

    /// Looks up a child view by key.
    ///
    /// This is the explicit replacement for namespaced fall-through lookup:
    /// one hop per call, so `view.resolve("a").and_then(|a| a.resolve("b"))`
    /// delegates level by level.
    pub fn resolve(&self, key: &str) -> Option<Arc<ViewNode>> {
        self.children.get()?.get(key).cloned()
    }

    /// Compiled children, if this node has any.
    pub fn children(&self) -> Option<&HashMap<String, Arc<ViewNode>>> {
        self.children.get()
    }

    /// Ancestor chain, root first.
    pub fn parents(&self) -> Vec<Arc<ViewNode>> {
        self.parents
            .iter()
            .filter_map(Weak::upgrade)
            .collect()
    }

    /// Whether a location path structurally matches this view's pattern.
    /// Pathless views never match.
    pub fn matches(&self, location: &str) -> bool {
        self.pattern
            .as_ref()
            .is_some_and(|pattern| pattern.is_match(location))
    }

    /// Segment depth of the path template, used to rank match specificity.
    pub(crate) fn depth(&self) -> usize {
        self.path
            .as_deref()
            .map(|path| path.split('/').filter(|s| !s.is_empty()).count())
            .unwrap_or(0)
    }
}
