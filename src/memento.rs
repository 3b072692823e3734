//! Snapshots of a target that can be restored later.
//!
//! An [`Originator`] produces mementos of its own state and knows how to get
//! back to them. A [`Caretaker`] keeps a stack of mementos without looking
//! inside them, and a [`Snapshot`] command acts as a caretaker for a single
//! change.

use crate::{Command, Result};
use std::fmt;

/// A target that can save its state and restore it later.
pub trait Originator {
    /// The saved state.
    type Memento;

    /// Returns a memento of the current state.
    fn save(&self) -> Self::Memento;

    /// Restores the state saved in `memento`.
    ///
    /// Returns [`Error::InvalidTarget`](crate::Error::InvalidTarget) if the memento
    /// was not produced by this originator.
    fn restore(&mut self, memento: &Self::Memento) -> Result;
}

/// Keeps a stack of mementos for an originator.
///
/// # Examples
/// ```
/// # use rewind::{editor::Editor, Caretaker};
/// let mut editor = Editor::from("a");
/// let mut caretaker = Caretaker::new();
/// caretaker.backup(&editor);
/// editor.set_text("b");
/// caretaker.backup(&editor);
/// editor.set_text("c");
///
/// caretaker.undo(&mut editor).unwrap().unwrap();
/// assert_eq!(editor.text(), "b");
/// caretaker.undo(&mut editor).unwrap().unwrap();
/// assert_eq!(editor.text(), "a");
/// assert!(caretaker.undo(&mut editor).is_none());
/// ```
pub struct Caretaker<O: Originator> {
    mementos: Vec<O::Memento>,
}

impl<O: Originator> Caretaker<O> {
    /// Returns a new caretaker.
    pub fn new() -> Caretaker<O> {
        Caretaker {
            mementos: Vec::new(),
        }
    }

    /// Saves the current state of the originator.
    pub fn backup(&mut self, originator: &O) {
        self.mementos.push(originator.save());
    }

    /// Restores the most recently saved state.
    ///
    /// Returns `None` if there is nothing to restore. The memento is kept if
    /// restoring fails.
    pub fn undo(&mut self, originator: &mut O) -> Option<Result> {
        let memento = self.mementos.last()?;
        if let Err(err) = originator.restore(memento) {
            log::warn!("memento could not be restored: {}", err);
            return Some(Err(err));
        }
        self.mementos.pop();
        Some(Ok(()))
    }

    /// Returns the number of saved states.
    pub fn len(&self) -> usize {
        self.mementos.len()
    }

    /// Returns `true` if there are no saved states.
    pub fn is_empty(&self) -> bool {
        self.mementos.is_empty()
    }

    /// Removes all saved states.
    pub fn clear(&mut self) {
        self.mementos.clear();
    }
}

impl<O: Originator> Default for Caretaker<O> {
    fn default() -> Self {
        Caretaker::new()
    }
}

impl<O: Originator> fmt::Debug for Caretaker<O> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Caretaker")
            .field("len", &self.mementos.len())
            .finish()
    }
}

/// Command that takes a memento of its target right before calling a function.
///
/// Works like [`FromFn`](crate::FromFn) but only saves what the
/// [`Originator`] puts in its memento, and surfaces a failed restore.
///
/// # Examples
/// ```
/// # use rewind::{editor::Editor, Invoker, Snapshot};
/// let mut editor = Editor::from("draft");
/// let mut invoker = Invoker::new();
/// invoker.run(&mut editor, Snapshot::new(|e: &mut Editor| {
///     e.set_text("final");
///     true
/// }));
/// assert_eq!(editor.text(), "final");
/// invoker.undo_last(&mut editor).unwrap().unwrap();
/// assert_eq!(editor.text(), "draft");
/// ```
pub struct Snapshot<F, O: Originator> {
    f: F,
    backup: Option<O::Memento>,
}

impl<F, O: Originator> Snapshot<F, O> {
    /// Creates a new `Snapshot` from `f`.
    pub fn new(f: F) -> Self {
        Snapshot { f, backup: None }
    }
}

impl<F, O> Command for Snapshot<F, O>
where
    F: FnMut(&mut O) -> bool,
    O: Originator,
{
    type Target = O;

    fn execute(&mut self, target: &mut O) -> bool {
        let memento = target.save();
        if (self.f)(target) {
            self.backup = Some(memento);
            return true;
        }
        if let Err(err) = target.restore(&memento) {
            log::warn!("rejected change could not be rolled back: {}", err);
        }
        false
    }

    fn undo(&mut self, target: &mut O) -> Result {
        if let Some(memento) = &self.backup {
            target.restore(memento)?;
            self.backup = None;
        }
        Ok(())
    }
}

impl<F, O: Originator> fmt::Debug for Snapshot<F, O>
where
    O::Memento: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Snapshot")
            .field("backup", &self.backup)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::Editor;
    use crate::{Error, Invoker};

    #[derive(Debug, PartialEq)]
    struct Counter {
        id: u32,
        value: i64,
    }

    impl Originator for Counter {
        type Memento = (u32, i64);

        fn save(&self) -> (u32, i64) {
            (self.id, self.value)
        }

        fn restore(&mut self, &(id, value): &(u32, i64)) -> Result {
            if id != self.id {
                return Err(Error::InvalidTarget(format!("counter {} is not {}", self.id, id)));
            }
            self.value = value;
            Ok(())
        }
    }

    #[test]
    fn snapshot_round_trip() {
        let mut counter = Counter { id: 1, value: 0 };
        let mut invoker = Invoker::new();
        for i in 1..=3 {
            invoker.run(
                &mut counter,
                Snapshot::new(move |c: &mut Counter| {
                    c.value += i;
                    true
                }),
            );
        }
        assert_eq!(counter.value, 6);
        while let Some(result) = invoker.undo_last(&mut counter) {
            result.unwrap();
        }
        assert_eq!(counter.value, 0);
    }

    #[test]
    fn snapshot_rejected() {
        let mut counter = Counter { id: 1, value: 5 };
        let mut invoker = Invoker::new();
        let ran = invoker.run(
            &mut counter,
            Snapshot::new(|c: &mut Counter| {
                c.value -= 10;
                c.value >= 0
            }),
        );
        assert!(!ran);
        assert_eq!(counter.value, 5);
    }

    #[test]
    fn caretaker_keeps_memento_on_failure() {
        let mut counter = Counter { id: 1, value: 5 };
        let mut caretaker = Caretaker::new();
        caretaker.backup(&counter);
        let mut other = Counter { id: 2, value: 9 };
        assert!(caretaker.undo(&mut other).unwrap().is_err());
        assert_eq!(caretaker.len(), 1);
        counter.value = 7;
        caretaker.undo(&mut counter).unwrap().unwrap();
        assert_eq!(counter.value, 5);
        assert!(caretaker.is_empty());
    }

    #[test]
    fn snapshot_on_replaced_editor() {
        let mut editor = Editor::from("a");
        let mut invoker = Invoker::new();
        invoker.run(
            &mut editor,
            Snapshot::new(|e: &mut Editor| {
                e.set_text("b");
                true
            }),
        );
        let mut replacement = Editor::new();
        let err = invoker.undo_last(&mut replacement).unwrap().unwrap_err();
        assert!(matches!(err, Error::InvalidTarget(_)));
    }
}
