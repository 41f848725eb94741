//! Navigation facade: the rendering-layer capability trait and the
//! per-group accessor that ties routes, views, env resolution, and the
//! auth gate together.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::gate::{Authenticator, Gate, GateState};
use crate::group::RouteGroup;
use crate::path::{self, EnvMap};
use crate::route::{RouteDescriptor, RouteMatch};
use crate::view::ViewNode;

/// Capability the rendering/mounting library must expose: a reactive
/// current location and a programmatic navigation primitive.
///
/// The library never fetches or renders anything itself; everything
/// outward-facing goes through this trait.
pub trait Navigator: Send + Sync {
    /// The active location path.
    fn current_path(&self) -> String;

    /// Pushes a new history entry.
    fn push(&self, path: &str);

    /// Replaces the current history entry.
    fn replace(&self, path: &str);
}

/// Which navigation primitive [`RouteHandle::go_to_with`] invokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavAction {
    #[default]
    Push,
    Replace,
}

/// Target of a [`RouteHandle::go_to`] call: a literal path, or a function
/// of the group's view map that produces one.
pub enum GoTarget {
    /// Navigate to this path as given.
    Path(String),
    /// Build the path from the compiled views.
    View(Box<dyn Fn(&HashMap<String, Arc<ViewNode>>) -> String + Send + Sync>),
}

impl GoTarget {
    /// Builds the target from the view map at navigation time.
    pub fn view<F>(build: F) -> Self
    where
        F: Fn(&HashMap<String, Arc<ViewNode>>) -> String + Send + Sync + 'static,
    {
        GoTarget::View(Box::new(build))
    }
}

impl From<&str> for GoTarget {
    fn from(path: &str) -> Self {
        GoTarget::Path(path.to_string())
    }
}

impl From<String> for GoTarget {
    fn from(path: String) -> Self {
        GoTarget::Path(path)
    }
}

/// What a mount resolves to once the gate has run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MountOutcome {
    /// Render the route's component (if it has one).
    Render(Option<String>),
    /// The route declared a redirect override; the (env-resolved) one-shot
    /// navigation has been issued.
    Redirect(String),
    /// Authentication denied; the not-auth navigation has been issued.
    Denied(String),
    /// The gate was unmounted before its check resolved.
    Pending,
}

/// Accessor for one compiled group, bound to a live [`Navigator`].
///
/// Obtained from [`crate::Registry::use_routes_with`].
pub struct RouteHandle {
    group: Arc<RouteGroup>,
    navigator: Arc<dyn Navigator>,
    authenticator: Option<Authenticator>,
    not_auth_path: String,
    envs: EnvMap,
}

// The navigator and authenticator are trait objects with nothing useful to
// print; format the group and config fields only.
impl std::fmt::Debug for RouteHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteHandle")
            .field("group", &self.group)
            .field("not_auth_path", &self.not_auth_path)
            .finish_non_exhaustive()
    }
}

impl RouteHandle {
    pub(crate) fn new(
        group: Arc<RouteGroup>,
        navigator: Arc<dyn Navigator>,
        authenticator: Option<Authenticator>,
        not_auth_path: String,
        envs: EnvMap,
    ) -> Self {
        Self {
            group,
            navigator,
            authenticator,
            not_auth_path,
            envs,
        }
    }

    /// The compiled group behind this handle.
    pub fn group(&self) -> &Arc<RouteGroup> {
        &self.group
    }

    /// Navigates with the default `push` action.
    pub fn go_to(&self, target: impl Into<GoTarget>) {
        self.go_to_with(target, NavAction::default());
    }

    /// Navigates to a literal path or a view-derived one.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # fn demo(handle: &waymark::RouteHandle) {
    /// use waymark::{GoTarget, NavAction};
    ///
    /// handle.go_to("/settings");
    /// handle.go_to_with(
    ///     GoTarget::view(|views| views["settings"].path().unwrap_or_default()),
    ///     NavAction::Replace,
    /// );
    /// # }
    /// ```
    pub fn go_to_with(&self, target: impl Into<GoTarget>, action: NavAction) {
        let path = match target.into() {
            GoTarget::Path(path) => path,
            GoTarget::View(build) => build(self.group.views()),
        };

        debug!(%path, ?action, "navigating");
        match action {
            NavAction::Push => self.navigator.push(&path),
            NavAction::Replace => self.navigator.replace(&path),
        }
    }

    /// Resolves the view for the navigator's current location.
    pub fn current_view(&self) -> Option<Arc<ViewNode>> {
        self.group
            .current_view(&self.navigator.current_path())
            .cloned()
    }

    /// Matches the navigator's current location against the flattened
    /// route list, extracting parameters for this match alone.
    pub fn current_match(&self) -> Option<RouteMatch> {
        self.group.match_route(&self.navigator.current_path())
    }

    /// Creates a gate for mounting `route`, to be driven by
    /// [`RouteHandle::mount_with`]. Useful when the host needs to unmount
    /// or observe state transitions mid-flight.
    pub fn gate_for(&self, route: &RouteDescriptor) -> Arc<Gate> {
        Gate::new(route.auth)
    }

    /// Mounts a route: runs the gate to completion and reports the outcome.
    pub async fn mount(&self, route: &RouteDescriptor) -> MountOutcome {
        let gate = self.gate_for(route);
        self.mount_with(&gate, route).await
    }

    /// Mounts a route through a caller-held gate.
    ///
    /// Redirect-override routes resolve to a one-shot `replace` navigation
    /// to the env-resolved target once auth passes (or is bypassed);
    /// everything else renders or is denied per the gate.
    pub async fn mount_with(&self, gate: &Arc<Gate>, route: &RouteDescriptor) -> MountOutcome {
        let location = self.navigator.current_path();

        gate.clone()
            .check(
                self.authenticator.clone(),
                self.navigator.clone(),
                self.not_auth_path.clone(),
            )
            .await;

        match gate.state() {
            GateState::Pending => MountOutcome::Pending,
            GateState::Denied => {
                MountOutcome::Denied(format!("{}?redirect={location}", self.not_auth_path))
            }
            GateState::Authenticated => match &route.redirect {
                Some(target) => {
                    let resolved = {
                        let envs = self.envs.read().unwrap_or_else(|e| e.into_inner());
                        path::resolve_envs(target, &envs)
                    };

                    debug!(%resolved, "redirect route mounted");
                    self.navigator.replace(&resolved);
                    MountOutcome::Redirect(resolved)
                }
                None => MountOutcome::Render(route.component.clone()),
            },
        }
    }
}
