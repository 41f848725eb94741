//! A compiled route group: the flattened descriptor list, the view graph,
//! and location-based lookup over both.

use std::collections::HashMap;
use std::sync::Arc;

use crate::route::{RouteDescriptor, RouteMatch, RouteTree};
use crate::view::ViewNode;

/// Everything a compile call produces for one named group.
///
/// Groups are immutable once compiled; recompiling under the same registry
/// name replaces the whole entry, never merges into it.
#[derive(Debug)]
pub struct RouteGroup {
    routes: Vec<RouteDescriptor>,
    views: HashMap<String, Arc<ViewNode>>,
    views_list: Vec<Arc<ViewNode>>,
    tree: RouteTree,
}

impl RouteGroup {
    pub(crate) fn new(
        routes: Vec<RouteDescriptor>,
        views: HashMap<String, Arc<ViewNode>>,
        views_list: Vec<Arc<ViewNode>>,
        tree: RouteTree,
    ) -> Self {
        Self {
            routes,
            views,
            views_list,
            tree,
        }
    }

    /// Flattened route descriptors in match-attempt order.
    pub fn routes(&self) -> &[RouteDescriptor] {
        &self.routes
    }

    /// Top-level views keyed by sibling key. Nested views are reached
    /// through [`ViewNode::resolve`].
    pub fn views(&self) -> &HashMap<String, Arc<ViewNode>> {
        &self.views
    }

    /// Looks up a top-level view by key.
    pub fn view(&self, key: &str) -> Option<&Arc<ViewNode>> {
        self.views.get(key)
    }

    /// All views of the group, flattened in compile order.
    pub fn views_list(&self) -> &[Arc<ViewNode>] {
        &self.views_list
    }

    /// The original spec tree this group was compiled from.
    pub fn tree(&self) -> &RouteTree {
        &self.tree
    }

    /// Resolves the view for the active location path.
    ///
    /// When several patterns match the same location (a parent and a child
    /// both covering `/a/b`, say), the **deepest** view wins; among equally
    /// deep candidates the later entry in the flattened list is chosen.
    ///
    /// Returns `None` when nothing matches.
    pub fn current_view(&self, location: &str) -> Option<&Arc<ViewNode>> {
        self.views_list
            .iter()
            .enumerate()
            .filter(|(_, view)| view.matches(location))
            .max_by_key(|(index, view)| (view.depth(), *index))
            .map(|(_, view)| view)
    }

    /// Matches a location against the flattened descriptor list,
    /// first-match-wins, extracting named parameters.
    ///
    /// Pathless descriptors match every location, which is why `notFound`
    /// catch-alls sit last in the list.
    pub fn match_route(&self, location: &str) -> Option<RouteMatch> {
        self.routes
            .iter()
            .find(|route| route.matches(location))
            .map(|route| RouteMatch::new(route, location))
    }
}
