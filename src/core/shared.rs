use std::sync::{Arc, Mutex, PoisonError};

/// Cloneable handle that serializes every access to one store behind a single lock.
///
/// Each `read`/`write` closure runs to completion under the lock, so a relation edit
/// and the views derived from it are never observed half applied. Stores are
/// independent; wrap each one in its own `Shared`.
pub struct Shared<S> {
    inner: Arc<Mutex<S>>,
}

impl<S> Shared<S> {
    pub fn new(store: S) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    pub fn read<T>(&self, f: impl FnOnce(&S) -> T) -> T {
        let guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&*guard)
    }

    pub fn write<T>(&self, f: impl FnOnce(&mut S) -> T) -> T {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut *guard)
    }
}

impl<S> Clone for Shared<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
