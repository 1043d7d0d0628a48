//! Process-wide holder of the current [`NavState`].
//!
//! # Thread Safety
//!
//! - `current()` clones the `Arc<NavState>` under a short read lock
//! - `reload()` normalizes outside any lock and swaps only on success
//! - reloads are serialized by a separate mutex so swaps happen in call order
//!
//! Readers holding an older `Arc<NavState>` keep seeing that snapshot; no
//! reader ever observes a partially built tree.

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use docnav_config::{ConfigError, RawNavigationConfig};

use crate::normalize::normalize;
use crate::state::NavState;

/// Atomically swappable navigation state.
pub struct NavStore {
    /// Serializes reload operations.
    reload_lock: Mutex<()>,
    /// Current snapshot.
    current: RwLock<Arc<NavState>>,
}

impl NavStore {
    /// Create a store publishing `initial`.
    #[must_use]
    pub fn new(initial: NavState) -> Self {
        Self {
            reload_lock: Mutex::new(()),
            current: RwLock::new(Arc::new(initial)),
        }
    }

    /// Normalize `raw` and create a store publishing the result.
    ///
    /// # Errors
    ///
    /// Returns the first normalization error.
    pub fn load(raw: RawNavigationConfig) -> Result<Self, ConfigError> {
        normalize(raw).map(Self::new)
    }

    /// Current snapshot.
    #[must_use]
    pub fn current(&self) -> Arc<NavState> {
        let current = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*current)
    }

    /// Rebuild from a fresh raw config and publish it.
    ///
    /// On failure the previously published state stays in place, so callers
    /// can keep serving the last known-good navigation.
    ///
    /// # Errors
    ///
    /// Returns the first normalization error.
    pub fn reload(&self, raw: RawNavigationConfig) -> Result<Arc<NavState>, ConfigError> {
        let _guard = self.reload_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let state = match normalize(raw) {
            Ok(state) => Arc::new(state),
            Err(e) => {
                tracing::debug!("Keeping previous navigation after failed reload");
                return Err(e);
            }
        };

        self.publish(Arc::clone(&state));
        tracing::info!(sections = state.sidebar().len(), "Navigation reloaded");
        Ok(state)
    }

    /// Publish an already normalized state.
    ///
    /// Returns the state it replaced.
    pub fn replace(&self, state: NavState) -> Arc<NavState> {
        let _guard = self.reload_lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.publish(Arc::new(state))
    }

    fn publish(&self, state: Arc<NavState>) -> Arc<NavState> {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *current, state)
    }
}
