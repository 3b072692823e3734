use crate::{Command, Invoker, Result, Slot};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

struct Inner<C: Command, S> {
    target: C::Target,
    invoker: Invoker<C, S>,
}

/// A target and its invoker behind a single lock.
///
/// Every call takes the lock once, so running a command and recording it, or
/// popping a command and undoing it, happens as one step for all threads.
/// Cloning a `Shared` returns another handle to the same target.
///
/// # Examples
/// ```
/// # use rewind::{editor::{Append, Editor}, Shared};
/// # use std::thread;
/// let shared = Shared::new(Editor::new());
/// let handles: Vec<_> = (0..4)
///     .map(|_| {
///         let shared = shared.clone();
///         thread::spawn(move || shared.run(Append::new("x")))
///     })
///     .collect();
/// for handle in handles {
///     assert!(handle.join().unwrap());
/// }
/// assert_eq!(shared.with_target(|e| e.text().to_string()), "xxxx");
/// while let Some(result) = shared.undo_last() {
///     result.unwrap();
/// }
/// assert_eq!(shared.with_target(|e| e.text().len()), 0);
/// ```
pub struct Shared<C: Command, S = ()> {
    inner: Arc<Mutex<Inner<C, S>>>,
}

impl<C: Command> Shared<C> {
    /// Returns a new shared target with an empty invoker.
    pub fn new(target: C::Target) -> Shared<C> {
        Shared::from_parts(target, Invoker::new())
    }
}

impl<C: Command, S> Shared<C, S> {
    /// Returns a new shared target that uses `invoker`.
    pub fn from_parts(target: C::Target, invoker: Invoker<C, S>) -> Shared<C, S> {
        Shared {
            inner: Arc::new(Mutex::new(Inner { target, invoker })),
        }
    }

    /// Calls `f` with a reference to the target.
    pub fn with_target<R>(&self, f: impl FnOnce(&C::Target) -> R) -> R {
        f(&self.lock().target)
    }

    /// Calls `f` with a reference to the invoker.
    pub fn with_invoker<R>(&self, f: impl FnOnce(&Invoker<C, S>) -> R) -> R {
        f(&self.lock().invoker)
    }

    // A panic inside a command can not leave the stacks half updated,
    // so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, Inner<C, S>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<C: Command, S: Slot> Shared<C, S> {
    /// Calls [`Invoker::run`] while holding the lock.
    pub fn run(&self, command: C) -> bool {
        let mut inner = self.lock();
        let Inner { target, invoker } = &mut *inner;
        invoker.run(target, command)
    }

    /// Calls [`Invoker::undo_last`] while holding the lock.
    pub fn undo_last(&self) -> Option<Result> {
        let mut inner = self.lock();
        let Inner { target, invoker } = &mut *inner;
        invoker.undo_last(target)
    }

    /// Calls [`Invoker::redo_last`] while holding the lock.
    pub fn redo_last(&self) -> Option<Result> {
        let mut inner = self.lock();
        let Inner { target, invoker } = &mut *inner;
        invoker.redo_last(target)
    }
}

impl<C: Command, S> Clone for Shared<C, S> {
    fn clone(&self) -> Self {
        Shared {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: Command, S> fmt::Debug for Shared<C, S>
where
    C: fmt::Debug,
    C::Target: fmt::Debug,
    S: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let inner = self.lock();
        f.debug_struct("Shared")
            .field("target", &inner.target)
            .field("invoker", &inner.invoker)
            .finish()
    }
}
