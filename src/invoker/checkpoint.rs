use super::Queue;
use crate::{Command, Entry, Invoker, Result, Slot};

#[derive(Debug)]
enum CheckpointEntry<C> {
    Run(Option<usize>, Vec<Entry<C>>),
    Undo,
    Redo,
}

/// Wraps an invoker and gives it checkpoint functionality.
///
/// Everything done through the checkpoint can be reverted with
/// [`cancel`](Checkpoint::cancel). Commands run through a checkpoint are never
/// merged, so each of them can be undone on its own.
///
/// # Examples
/// ```
/// # use rewind::{editor::{Append, Editor}, Invoker};
/// let mut editor = Editor::new();
/// let mut invoker = Invoker::new();
/// invoker.run(&mut editor, Append::new("a"));
///
/// let mut cp = invoker.checkpoint();
/// cp.run(&mut editor, Append::new("b"));
/// cp.run(&mut editor, Append::new("c"));
/// assert_eq!(editor.text(), "abc");
/// cp.cancel(&mut editor).unwrap();
/// assert_eq!(editor.text(), "a");
/// ```
#[derive(Debug)]
pub struct Checkpoint<'a, C, S> {
    invoker: &'a mut Invoker<C, S>,
    entries: Vec<CheckpointEntry<C>>,
}

impl<C, S> Checkpoint<'_, C, S> {
    /// Returns a queue.
    pub fn queue(&mut self) -> Queue<'_, C, S> {
        self.invoker.queue()
    }

    /// Returns a checkpoint.
    pub fn checkpoint(&mut self) -> Checkpoint<'_, C, S> {
        self.invoker.checkpoint()
    }
}

impl<C: Command, S: Slot> Checkpoint<'_, C, S> {
    /// Calls the [`Invoker::run`] method.
    pub fn run(&mut self, target: &mut C::Target, command: C) -> bool {
        let saved = self.invoker.saved();
        match self.invoker.__run(target, command, false) {
            Some((tail, evicted)) => {
                // Positions shift down when the oldest command is evicted.
                let saved = if evicted {
                    saved.and_then(|saved| saved.checked_sub(1))
                } else {
                    saved
                };
                self.entries.push(CheckpointEntry::Run(saved, tail));
                true
            }
            None => false,
        }
    }

    /// Calls the [`Invoker::undo_last`] method.
    pub fn undo_last(&mut self, target: &mut C::Target) -> Option<Result> {
        let result = self.invoker.undo_last(target)?;
        if result.is_ok() {
            self.entries.push(CheckpointEntry::Undo);
        }
        Some(result)
    }

    /// Calls the [`Invoker::redo_last`] method.
    pub fn redo_last(&mut self, target: &mut C::Target) -> Option<Result> {
        let result = self.invoker.redo_last(target)?;
        if result.is_ok() {
            self.entries.push(CheckpointEntry::Redo);
        }
        Some(result)
    }

    /// Commits the changes and consumes the checkpoint.
    pub fn commit(self) {}

    /// Cancels the changes and consumes the checkpoint.
    ///
    /// # Errors
    /// If an error occur when reverting a change, it stops and the error is returned.
    pub fn cancel(self, target: &mut C::Target) -> Result {
        for entry in self.entries.into_iter().rev() {
            match entry {
                CheckpointEntry::Run(saved, tail) => {
                    if let Some(result) = self.invoker.undo_last(target) {
                        result?;
                        self.invoker.forget_redo();
                    }
                    self.invoker.restore_redo(tail, saved);
                }
                CheckpointEntry::Undo => {
                    if let Some(result) = self.invoker.redo_last(target) {
                        result?;
                    }
                }
                CheckpointEntry::Redo => {
                    if let Some(result) = self.invoker.undo_last(target) {
                        result?;
                    }
                }
            }
        }
        Ok(())
    }
}

impl<'a, C, S> From<&'a mut Invoker<C, S>> for Checkpoint<'a, C, S> {
    fn from(invoker: &'a mut Invoker<C, S>) -> Self {
        Checkpoint {
            invoker,
            entries: Vec::new(),
        }
    }
}
