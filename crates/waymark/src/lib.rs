//! # Waymark
//!
//! A declarative route-tree compiler and navigation-state manager for
//! single-page front ends. Given a nested description of views, it produces:
//!
//! - a flat list of routable path entries for a rendering layer,
//! - a queryable view graph with path construction (parameter substitution,
//!   query-string building, path appending),
//! - authentication gating per route with inherited defaults, and
//! - current-view resolution from the active location.
//!
//! The rendering/mounting library stays outside: it is modeled as a
//! [`Navigator`] capability (reactive current location plus `push`/`replace`
//! primitives), and the authentication check is an externally supplied
//! callback — waymark never fetches or validates credentials itself.
//!
//! ## Path templates
//!
//! Two placeholder markers coexist:
//!
//! - `:name` — a named parameter, extracted per match and substitutable via
//!   [`path::set_params`].
//! - `$name` — an environment placeholder, resolved against the registry's
//!   env map at path-build time and rewritten to `:name` in the path exposed
//!   to the rendering layer.
//!
//! ## Example
//!
//! ```
//! use waymark::{PageRoute, Registry, RouteTree};
//!
//! let mut registry = Registry::new();
//! let group = registry.create_routes(
//!     "app",
//!     RouteTree::new()
//!         .route("home", PageRoute::at("/").with_component("HomePage"))
//!         .route(
//!             "settings",
//!             PageRoute::at("/settings")
//!                 .with_component("SettingsPage")
//!                 .with_auth(true)
//!                 .with_children(RouteTree::new().route(
//!                     "profile",
//!                     PageRoute::at("/profile").with_component("ProfilePage"),
//!                 )),
//!         ),
//! );
//!
//! // One flat descriptor per tree node, parents before children.
//! assert_eq!(group.routes().len(), 3);
//!
//! // Auth is inherited down the tree.
//! assert!(group.routes()[2].auth);
//!
//! // Current-view resolution picks the most specific match.
//! let view = group.current_view("/settings/profile").unwrap();
//! assert_eq!(view.key(), "profile");
//! assert_eq!(view.title(), "Profile");
//! ```

pub mod error;
pub mod gate;
pub mod group;
pub mod nav;
pub mod path;
pub mod registry;
pub mod route;
pub mod view;

pub use error::{Error, Result};
pub use gate::{AuthFuture, AuthOutcome, Authenticator, Gate, GateState};
pub use group::RouteGroup;
pub use nav::{GoTarget, MountOutcome, NavAction, Navigator, RouteHandle};
pub use registry::Registry;
pub use route::{
    compile, PageRoute, RedirectRoute, RouteDescriptor, RouteMatch, RouteSpec, RouteTree,
    NOT_FOUND_KEY,
};
pub use view::{PathOptions, ViewNode};
