use super::Checkpoint;
use crate::{Command, Invoker, Result, Slot};

#[derive(Debug)]
enum QueueEntry<C> {
    Run(C),
    Undo,
    Redo,
}

/// Wraps an invoker and gives it batch queue functionality.
///
/// # Examples
/// ```
/// # use rewind::{editor::{Append, Editor}, Invoker};
/// let mut editor = Editor::new();
/// let mut invoker = Invoker::new();
/// let mut queue = invoker.queue();
///
/// queue.run(Append::new("a"));
/// queue.run(Append::new("b"));
/// queue.run(Append::new("c"));
/// assert_eq!(editor.text(), "");
///
/// queue.commit(&mut editor).unwrap();
/// assert_eq!(editor.text(), "abc");
/// ```
#[derive(Debug)]
pub struct Queue<'a, C, S> {
    invoker: &'a mut Invoker<C, S>,
    entries: Vec<QueueEntry<C>>,
}

impl<C, S> Queue<'_, C, S> {
    /// Queues a [`run`](Invoker::run) call.
    pub fn run(&mut self, command: C) {
        self.entries.push(QueueEntry::Run(command));
    }

    /// Queues an [`undo_last`](Invoker::undo_last) call.
    pub fn undo_last(&mut self) {
        self.entries.push(QueueEntry::Undo);
    }

    /// Queues a [`redo_last`](Invoker::redo_last) call.
    pub fn redo_last(&mut self) {
        self.entries.push(QueueEntry::Redo);
    }

    /// Returns the number of queued calls.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cancels the queued calls.
    pub fn cancel(self) {}

    /// Returns a queue.
    pub fn queue(&mut self) -> Queue<'_, C, S> {
        self.invoker.queue()
    }

    /// Returns a checkpoint.
    pub fn checkpoint(&mut self) -> Checkpoint<'_, C, S> {
        self.invoker.checkpoint()
    }
}

impl<C: Command, S: Slot> Queue<'_, C, S> {
    /// Applies the queued calls in order.
    ///
    /// Commands that do not change the target and undo or redo calls with
    /// nothing to undo or redo are skipped.
    ///
    /// # Errors
    /// If an error occurs, it stops applying the calls and returns the error.
    pub fn commit(self, target: &mut C::Target) -> Result {
        for entry in self.entries {
            match entry {
                QueueEntry::Run(command) => {
                    self.invoker.run(target, command);
                }
                QueueEntry::Undo => self.invoker.undo_last(target).transpose().map(drop)?,
                QueueEntry::Redo => self.invoker.redo_last(target).transpose().map(drop)?,
            }
        }
        Ok(())
    }
}

impl<'a, C, S> From<&'a mut Invoker<C, S>> for Queue<'a, C, S> {
    fn from(invoker: &'a mut Invoker<C, S>) -> Self {
        Queue {
            invoker,
            entries: Vec::new(),
        }
    }
}
