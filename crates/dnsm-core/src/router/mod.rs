//! Route table, navigation guard and the router that applies them.
//!
//! The router owns the current location and display title. Every
//! navigation, whether requested by the user or scheduled by the API
//! pipeline as an `Effect`, goes through `NavigationGuard::evaluate`.

pub mod guard;
pub mod routes;

use std::sync::{Arc, Mutex};

use thiserror::Error;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::api::{Effect, EffectReceiver};

pub use guard::{Decision, NavigationGuard, Verdict};
pub use routes::{
    menu, normalize, resolve, RouteDescriptor, ADMIN_ROUTE, DEFAULT_TITLE, DNS_ROUTE,
    FORBIDDEN_ROUTE, LANDING_ROUTE, LOGIN_ROUTE, LOGOUT_ROUTE, ROUTES,
};

/// Maximum number of redirects followed for one navigation
const MAX_REDIRECTS: usize = 8;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum NavigationError {
    #[error("Too many redirects navigating to {0}")]
    RedirectLoop(String),
}

/// Where the router currently is
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    pub title: String,
}

#[derive(Debug, Default)]
struct RouterState {
    current: Option<Location>,
    reloads: u32,
}

/// Clone is cheap - clones share the same location.
#[derive(Clone)]
pub struct Router {
    guard: NavigationGuard,
    state: Arc<Mutex<RouterState>>,
}

impl Router {
    pub fn new(guard: NavigationGuard) -> Self {
        Self {
            guard,
            state: Arc::new(Mutex::new(RouterState::default())),
        }
    }

    pub fn current(&self) -> Option<Location> {
        self.lock().current.clone()
    }

    /// Number of view resets applied so far
    pub fn reloads(&self) -> u32 {
        self.lock().reloads
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, RouterState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Navigate to `path`, following guard redirects. Returns where we landed.
    pub async fn push(&self, path: &str) -> Result<Location, NavigationError> {
        let mut target = normalize(path);

        for _ in 0..=MAX_REDIRECTS {
            let verdict = self.guard.evaluate(&target).await;
            // The title is applied whatever the outcome
            self.set_title(&verdict.title);

            match verdict.decision {
                Decision::Allow => {
                    let location = Location {
                        path: target,
                        title: verdict.title,
                    };
                    debug!(path = %location.path, "Navigation complete");
                    self.lock().current = Some(location.clone());
                    return Ok(location);
                }
                Decision::Redirect(to) => {
                    debug!(from = %target, to = %to, "Navigation redirected");
                    target = to;
                }
            }
        }

        warn!(path = %path, "Navigation aborted after too many redirects");
        Err(NavigationError::RedirectLoop(path.to_string()))
    }

    fn set_title(&self, title: &str) {
        let mut state = self.lock();
        match state.current {
            Some(ref mut location) => location.title = title.to_string(),
            None => {
                state.current = Some(Location {
                    path: String::new(),
                    title: title.to_string(),
                })
            }
        }
    }

    /// Re-run the guard for the current location
    pub async fn reload(&self) -> Result<Location, NavigationError> {
        let path = {
            let mut state = self.lock();
            state.reloads += 1;
            state
                .current
                .as_ref()
                .map(|l| l.path.clone())
                .filter(|p| !p.is_empty())
                .unwrap_or_else(|| LOGIN_ROUTE.to_string())
        };
        self.push(&path).await
    }

    pub async fn apply(&self, effect: Effect) -> Result<Location, NavigationError> {
        match effect {
            Effect::Navigate { to, after } => {
                if !after.is_zero() {
                    sleep(after).await;
                }
                self.push(&to).await
            }
            Effect::Reload => self.reload().await,
        }
    }

    /// Apply every effect queued so far, in order
    pub async fn drain(&self, effects: &mut EffectReceiver) -> Result<(), NavigationError> {
        while let Ok(effect) = effects.try_recv() {
            self.apply(effect).await?;
        }
        Ok(())
    }
}
