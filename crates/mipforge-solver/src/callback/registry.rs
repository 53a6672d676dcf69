//! Single-slot callback registry.

use std::fmt::{self, Debug};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use mipforge_core::MipError;

use super::MipCallback;

#[derive(Default)]
struct Slot {
    callback: Option<Arc<dyn MipCallback>>,
    solving: bool,
}

/// Attachment point holding at most one callback for a solver.
///
/// The registry is owned by one solver instance and shared through `Arc`
/// so that other threads, or the callback itself, can observe whether a
/// solve is in progress. The slot and the in-progress flag live behind the
/// same lock: an `attach` either completes before a solve starts or is
/// refused.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use mipforge_solver::callback::{CallbackRegistry, CountingCallback};
///
/// let registry = CallbackRegistry::new();
/// registry.attach(Arc::new(CountingCallback::new())).unwrap();
/// assert!(registry.is_attached());
///
/// registry.detach();
/// registry.detach();
/// assert!(!registry.is_attached());
/// ```
#[derive(Default)]
pub struct CallbackRegistry {
    slot: Mutex<Slot>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches `callback`, replacing any previously attached one.
    ///
    /// # Errors
    ///
    /// Returns [`MipError::InvalidState`] while a solve is in progress.
    pub fn attach(&self, callback: Arc<dyn MipCallback>) -> Result<(), MipError> {
        let mut slot = self.lock();
        if slot.solving {
            return Err(MipError::InvalidState(
                "cannot attach a callback while a solve is in progress".to_string(),
            ));
        }
        if slot.callback.replace(callback).is_some() {
            tracing::debug!("Replaced previously attached callback");
        }
        Ok(())
    }

    /// Clears the slot, returning the detached callback. Idempotent.
    pub fn detach(&self) -> Option<Arc<dyn MipCallback>> {
        self.lock().callback.take()
    }

    /// Returns the attached callback, if any.
    pub fn current(&self) -> Option<Arc<dyn MipCallback>> {
        self.lock().callback.clone()
    }

    pub fn is_attached(&self) -> bool {
        self.lock().callback.is_some()
    }

    /// Returns true while a solve owning this registry is running.
    pub fn is_solving(&self) -> bool {
        self.lock().solving
    }

    /// Marks the start of a solve; the returned guard marks its end on drop.
    pub(crate) fn begin_solve(&self) -> Result<SolveGuard<'_>, MipError> {
        let mut slot = self.lock();
        if slot.solving {
            return Err(MipError::InvalidState(
                "a solve is already in progress".to_string(),
            ));
        }
        slot.solving = true;
        Ok(SolveGuard { registry: self })
    }

    // A callback that panicked while holding its own locks cannot poison
    // this mutex; recover the slot regardless.
    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Debug for CallbackRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slot = self.lock();
        f.debug_struct("CallbackRegistry")
            .field("callback", &slot.callback)
            .field("solving", &slot.solving)
            .finish()
    }
}

/// Clears the in-progress flag of a [`CallbackRegistry`] when dropped.
pub(crate) struct SolveGuard<'a> {
    registry: &'a CallbackRegistry,
}

impl Drop for SolveGuard<'_> {
    fn drop(&mut self) {
        self.registry.lock().solving = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::callback::CountingCallback;

    #[test]
    fn test_attach_replaces_previous() {
        let registry = CallbackRegistry::new();
        let first: Arc<dyn MipCallback> = Arc::new(CountingCallback::new());
        let second: Arc<dyn MipCallback> = Arc::new(CountingCallback::new());

        registry.attach(first.clone()).unwrap();
        registry.attach(second.clone()).unwrap();

        let current = registry.current().unwrap();
        assert!(Arc::ptr_eq(&current, &second));
        assert!(!Arc::ptr_eq(&current, &first));
    }

    #[test]
    fn test_detach_is_idempotent() {
        let registry = CallbackRegistry::new();
        registry.attach(Arc::new(CountingCallback::new())).unwrap();

        assert!(registry.detach().is_some());
        assert!(registry.detach().is_none());
        assert!(registry.current().is_none());
    }

    #[test]
    fn test_attach_refused_while_solving() {
        let registry = CallbackRegistry::new();
        let guard = registry.begin_solve().unwrap();
        assert!(registry.is_solving());

        let err = registry
            .attach(Arc::new(CountingCallback::new()))
            .unwrap_err();
        assert!(matches!(err, MipError::InvalidState(_)));
        assert!(!registry.is_attached());

        drop(guard);
        assert!(!registry.is_solving());
        assert!(registry.attach(Arc::new(CountingCallback::new())).is_ok());
    }

    #[test]
    fn test_nested_solve_refused() {
        let registry = CallbackRegistry::new();
        let _guard = registry.begin_solve().unwrap();
        assert!(registry.begin_solve().is_err());
    }
}
