//! Authentication gate: a small async state machine guarding a protected
//! route's render.
//!
//! States: `Pending → Authenticated | Denied`. The machine only engages when
//! the route requires auth; unprotected routes bypass it entirely. Denial
//! triggers exactly one navigation side effect to the registry's
//! not-authenticated path with the current location carried as a `redirect`
//! query parameter.
//!
//! The check runs at most once per mount. Unmounting before it resolves
//! raises a liveness flag that discards the stale result instead of applying
//! it — no state update, no navigation.
//!
//! No timeout is enforced: callers must supply a bounded authenticator or
//! the gate stays `Pending` indefinitely.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::nav::Navigator;

/// Boxed future yielded by an asynchronous authentication check.
pub type AuthFuture = Pin<Box<dyn Future<Output = anyhow::Result<bool>> + Send>>;

/// Result of invoking the authenticator: either immediately known, or an
/// asynchronous task to await.
///
/// This is an explicit sum rather than runtime duck-typing of a "thenable";
/// both arms resolve through the single [`AuthOutcome::resolve`] contract.
pub enum AuthOutcome {
    /// Synchronous verdict.
    Ready(bool),
    /// Asynchronous check. An `Err` result counts as a denial.
    Deferred(AuthFuture),
}

impl AuthOutcome {
    /// Wraps a synchronous verdict.
    pub fn ready(ok: bool) -> Self {
        AuthOutcome::Ready(ok)
    }

    /// Wraps an asynchronous check.
    pub fn deferred<F>(future: F) -> Self
    where
        F: Future<Output = anyhow::Result<bool>> + Send + 'static,
    {
        AuthOutcome::Deferred(Box::pin(future))
    }

    /// Awaits the verdict. A failed check logs and resolves to `false`;
    /// the underlying error is swallowed, never propagated.
    pub async fn resolve(self) -> bool {
        match self {
            AuthOutcome::Ready(ok) => ok,
            AuthOutcome::Deferred(future) => match future.await {
                Ok(ok) => ok,
                Err(error) => {
                    warn!(%error, "authentication check failed");
                    false
                }
            },
        }
    }
}

/// Zero-argument authentication check supplied by the application.
pub type Authenticator = Arc<dyn Fn() -> AuthOutcome + Send + Sync>;

/// Observable gate state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// Check in flight. Initial state of a protected mount.
    Pending,
    /// Terminal: protected content may render.
    Authenticated,
    /// Terminal for this mount: the redirect side effect has been issued.
    Denied,
}

/// One mounted gate instance.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use waymark::gate::{AuthOutcome, Authenticator, Gate, GateState};
/// use waymark::nav::Navigator;
///
/// struct NullNav;
/// impl Navigator for NullNav {
///     fn current_path(&self) -> String { "/secret".into() }
///     fn push(&self, _path: &str) {}
///     fn replace(&self, _path: &str) {}
/// }
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let gate = Gate::new(true);
/// let auth: Authenticator = Arc::new(|| AuthOutcome::ready(true));
///
/// gate.clone()
///     .check(Some(auth), Arc::new(NullNav), "/login".into())
///     .await;
/// assert_eq!(gate.state(), GateState::Authenticated);
/// # });
/// ```
pub struct Gate {
    required: bool,
    alive: AtomicBool,
    started: AtomicBool,
    state: watch::Sender<GateState>,
}

impl Gate {
    /// Creates a gate for one mount. Unprotected mounts start (and stay)
    /// `Authenticated`; protected mounts start `Pending`.
    pub fn new(required: bool) -> Arc<Self> {
        let initial = if required {
            GateState::Pending
        } else {
            GateState::Authenticated
        };
        let (state, _) = watch::channel(initial);

        Arc::new(Self {
            required,
            alive: AtomicBool::new(true),
            started: AtomicBool::new(false),
            state,
        })
    }

    /// Whether the guarded route requires authentication.
    pub fn required(&self) -> bool {
        self.required
    }

    /// Current state.
    pub fn state(&self) -> GateState {
        *self.state.borrow()
    }

    /// Subscribes to state transitions.
    pub fn subscribe(&self) -> watch::Receiver<GateState> {
        self.state.subscribe()
    }

    /// Marks this mount as gone. A check result arriving afterwards is
    /// discarded: no state update, no navigation.
    pub fn unmount(&self) {
        self.alive.store(false, Ordering::SeqCst);
    }

    /// Runs the authentication check, at most once per mount.
    ///
    /// A truthy verdict transitions to `Authenticated`. A falsy or failed
    /// verdict transitions to `Denied` and issues exactly one `replace`
    /// navigation to `{not_auth_path}?redirect={current_path}`. A missing
    /// authenticator on a protected route counts as a denial.
    pub async fn check(
        self: Arc<Self>,
        authenticator: Option<Authenticator>,
        navigator: Arc<dyn Navigator>,
        not_auth_path: String,
    ) {
        if !self.required {
            return;
        }
        if self.started.swap(true, Ordering::SeqCst) {
            return;
        }

        let ok = match authenticator {
            Some(authenticate) => authenticate().resolve().await,
            None => {
                warn!("route requires auth but no authenticator is configured");
                false
            }
        };

        if !self.alive.load(Ordering::SeqCst) {
            debug!("gate unmounted before the check resolved; result discarded");
            return;
        }

        if ok {
            debug!("authentication succeeded");
            self.state.send_replace(GateState::Authenticated);
        } else {
            self.state.send_replace(GateState::Denied);
            let target = format!("{not_auth_path}?redirect={}", navigator.current_path());
            debug!(%target, "authentication denied; redirecting");
            navigator.replace(&target);
        }
    }
}
