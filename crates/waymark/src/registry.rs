//! Registry: named storage of compiled route groups plus the shared
//! configuration (authenticator, not-authenticated path, env map).
//!
//! The registry is an explicit context object the host owns and passes
//! around, not a process-wide singleton. Setup writes take `&mut self`;
//! steady-state reads take `&self`, so the written-at-startup,
//! read-thereafter contract is enforced by the borrow checker. The env map
//! alone lives behind a shared lock, because compiled views resolve `$name`
//! placeholders against it at path-build time.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::error::{Error, Result};
use crate::gate::{AuthOutcome, Authenticator};
use crate::group::RouteGroup;
use crate::nav::{Navigator, RouteHandle};
use crate::path::{env_map, EnvMap};
use crate::route::{compile, RouteTree};

/// Default redirect target when authentication is denied.
const DEFAULT_NOT_AUTH_PATH: &str = "/login";

/// Named storage of compiled route groups and global navigation config.
///
/// # Examples
///
/// ```
/// use waymark::{PageRoute, Registry, RouteTree};
///
/// let mut registry = Registry::new();
/// registry.create_routes(
///     "app",
///     RouteTree::new().route("home", PageRoute::at("/").with_component("HomePage")),
/// );
///
/// let group = registry.use_routes("app").unwrap();
/// assert_eq!(group.routes().len(), 1);
/// assert!(registry.use_routes("missing").is_err());
/// ```
pub struct Registry {
    groups: HashMap<String, Arc<RouteGroup>>,
    authenticator: Option<Authenticator>,
    not_auth_path: String,
    envs: EnvMap,
}

impl Registry {
    /// Creates an empty registry with the default not-auth path.
    pub fn new() -> Self {
        Self {
            groups: HashMap::new(),
            authenticator: None,
            not_auth_path: DEFAULT_NOT_AUTH_PATH.to_string(),
            envs: env_map(),
        }
    }

    /// Compiles a route tree and stores it under `name`, replacing any
    /// prior entry wholesale.
    ///
    /// Returns the newly compiled group rather than the whole registry map;
    /// the full map stays reachable through [`Registry::groups`].
    pub fn create_routes(&mut self, name: impl Into<String>, tree: RouteTree) -> Arc<RouteGroup> {
        let name = name.into();
        let group = Arc::new(compile(&tree, self.envs.clone()));

        debug!(group = %name, routes = group.routes().len(), "compiled route group");
        self.groups.insert(name, group.clone());
        group
    }

    /// Looks up a compiled group.
    ///
    /// Unknown names are a fatal, synchronous error — the registry rejects
    /// rather than returning an empty group, so startup fails fast.
    pub fn use_routes(&self, name: &str) -> Result<Arc<RouteGroup>> {
        self.groups
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnknownGroup(name.to_string()))
    }

    /// Looks up a compiled group and binds it to a live navigator.
    pub fn use_routes_with(
        &self,
        name: &str,
        navigator: Arc<dyn Navigator>,
    ) -> Result<RouteHandle> {
        let group = self.use_routes(name)?;

        Ok(RouteHandle::new(
            group,
            navigator,
            self.authenticator.clone(),
            self.not_auth_path.clone(),
            self.envs.clone(),
        ))
    }

    /// Installs the authentication check and the denial redirect target.
    /// Later calls fully overwrite both.
    pub fn set_authenticator<F>(&mut self, authenticate: F, not_auth_path: impl Into<String>)
    where
        F: Fn() -> AuthOutcome + Send + Sync + 'static,
    {
        self.authenticator = Some(Arc::new(authenticate));
        self.not_auth_path = not_auth_path.into();
    }

    /// The installed authenticator, if any.
    pub fn authenticator(&self) -> Option<&Authenticator> {
        self.authenticator.as_ref()
    }

    /// The denial redirect target.
    pub fn not_auth_path(&self) -> &str {
        &self.not_auth_path
    }

    /// Shallow-merges entries into the env map. Existing keys are
    /// overwritten; keys not mentioned are kept. Views compiled earlier see
    /// the new values immediately.
    pub fn set_envs(&mut self, envs: HashMap<String, String>) {
        self.envs
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .extend(envs);
    }

    /// A snapshot of the env map.
    pub fn get_envs(&self) -> HashMap<String, String> {
        self.envs.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// All compiled groups, by name.
    pub fn groups(&self) -> &HashMap<String, Arc<RouteGroup>> {
        &self.groups
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
