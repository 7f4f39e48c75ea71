//! Write access to caller-owned collections
//!
//! The engine never holds the zone list or the observation feed. It hands a
//! transform to a `Mutator`, and the owner applies it to whatever storage it
//! uses.

use std::sync::Arc;

use parking_lot::Mutex;

/// Applies a read-modify-write transform to an owned collection
///
/// Implementations must apply the transform exactly once and atomically with
/// respect to other readers of the collection. A panicking transform is a
/// caller error and is not caught.
pub trait Mutator<T>: Send + Sync {
    fn apply(&self, transform: &mut dyn FnMut(&[T]) -> Vec<T>);
}

impl<T, M: Mutator<T> + ?Sized> Mutator<T> for Arc<M> {
    fn apply(&self, transform: &mut dyn FnMut(&[T]) -> Vec<T>) {
        (**self).apply(transform)
    }
}

/// Mutex-guarded vector shared between an owner and the engine
#[derive(Debug)]
pub struct Shared<T> {
    inner: Arc<Mutex<Vec<T>>>,
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Shared<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(items)),
        }
    }

    /// Run `f` against the current contents under the lock
    pub fn read<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        let guard = self.inner.lock();
        f(guard.as_slice())
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

impl<T: Clone> Shared<T> {
    pub fn snapshot(&self) -> Vec<T> {
        self.inner.lock().clone()
    }
}

impl<T: Send> Mutator<T> for Shared<T> {
    fn apply(&self, transform: &mut dyn FnMut(&[T]) -> Vec<T>) {
        let mut guard = self.inner.lock();
        let next = transform(guard.as_slice());
        *guard = next;
    }
}
