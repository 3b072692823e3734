//! Runs commands and records the ones that changed the target.

mod builder;
mod checkpoint;
mod display;
mod queue;

pub use builder::Builder;
pub use checkpoint::Checkpoint;
pub use display::Display;
pub use queue::Queue;

use crate::slot::Socket;
use crate::{Command, Entry, Error, History, Merged, Result, Signal, Slot};
use std::fmt;

/// Runs commands and keeps an undo and a redo stack.
///
/// A command is recorded in the history only when running it changed the
/// target. Undone commands are moved onto the redo stack, which is discarded
/// as soon as a new command changes the target.
///
/// The invoker never owns the target, it is passed to every call.
///
/// # Examples
/// ```
/// # use rewind::{editor::{Append, Copy, Edit, Editor}, Invoker};
/// let mut editor = Editor::from("ab");
/// let mut invoker: Invoker<Edit> = Invoker::new();
///
/// assert!(invoker.run(&mut editor, Append::new("c").into()));
/// assert!(invoker.run(&mut editor, Append::new("d").into()));
/// assert!(!invoker.run(&mut editor, Copy.into()));
/// assert_eq!(editor.text(), "abcd");
/// assert_eq!(invoker.len(), 2);
///
/// invoker.undo_last(&mut editor).unwrap().unwrap();
/// invoker.undo_last(&mut editor).unwrap().unwrap();
/// assert_eq!(editor.text(), "ab");
/// assert!(invoker.undo_last(&mut editor).is_none());
/// ```
pub struct Invoker<C, S = ()> {
    history: History<C>,
    redo: Vec<Entry<C>>,
    saved: Option<usize>,
    socket: Socket<S>,
}

impl<C> Invoker<C> {
    /// Returns a new invoker.
    pub fn new() -> Invoker<C> {
        Invoker::builder().build()
    }
}

impl<C, S> Invoker<C, S> {
    /// Returns a new invoker builder.
    pub fn builder() -> Builder<C, S> {
        Builder::default()
    }

    /// Reserves capacity for at least `additional` more commands.
    ///
    /// # Panics
    /// Panics if the new capacity overflows usize.
    pub fn reserve(&mut self, additional: usize) {
        self.history.reserve(additional);
    }

    /// Returns the number of commands that can be undone.
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Returns `true` if no command can be undone.
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Returns the number of commands that can be redone.
    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    /// Returns the limit of the invoker.
    pub fn limit(&self) -> usize {
        self.history.limit()
    }

    /// Returns `true` if the invoker can undo.
    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    /// Returns `true` if the invoker can redo.
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Returns `true` if the target is in a saved state, `false` otherwise.
    pub fn is_saved(&self) -> bool {
        self.saved == Some(self.head())
    }

    /// Returns the position of the target, counted in commands from the oldest recorded one.
    pub fn head(&self) -> usize {
        self.history.len()
    }

    /// Returns the saved position, if any.
    pub fn saved(&self) -> Option<usize> {
        self.saved
    }

    /// Returns the undo history.
    pub fn history(&self) -> &History<C> {
        &self.history
    }

    /// Returns an iterator over the commands that can be redone, the next one first.
    pub fn redo_commands(&self) -> impl Iterator<Item = &C> + '_ {
        self.redo.iter().rev().map(Entry::get)
    }

    /// Sets how the signal should be handled when the state changes.
    ///
    /// The previous slot is returned if it exists.
    pub fn connect(&mut self, slot: S) -> Option<S> {
        self.socket.connect(Some(slot))
    }

    /// Removes and returns the slot if it exists.
    pub fn disconnect(&mut self) -> Option<S> {
        self.socket.disconnect()
    }

    /// Returns a checkpoint.
    pub fn checkpoint(&mut self) -> Checkpoint<'_, C, S> {
        Checkpoint::from(self)
    }

    /// Returns a queue.
    pub fn queue(&mut self) -> Queue<'_, C, S> {
        Queue::from(self)
    }

    /// Returns a structure for configurable formatting of the invoker.
    pub fn display(&self) -> Display<'_, C, S> {
        Display::from(self)
    }

    pub(crate) fn redo_entries(&self) -> &[Entry<C>] {
        &self.redo
    }
}

impl<C: Command, S: Slot> Invoker<C, S> {
    /// Runs the command on the target and records it if the target was changed.
    ///
    /// Returns the result of [`execute`](Command::execute). A command that did not
    /// change the target is dropped. A command that did change it discards
    /// every command that could be redone.
    pub fn run(&mut self, target: &mut C::Target, command: C) -> bool {
        self.__run(target, command, true).is_some()
    }

    /// Returns the discarded redo branch and whether the oldest command was evicted,
    /// or `None` if the command did not change the target.
    pub(crate) fn __run(
        &mut self,
        target: &mut C::Target,
        mut command: C,
        merge: bool,
    ) -> Option<(Vec<Entry<C>>, bool)> {
        if !command.execute(target) {
            log::trace!("command left the target unchanged, not recorded");
            return None;
        }
        let head = self.head();
        let could_undo = self.can_undo();
        let could_redo = self.can_redo();
        let was_saved = self.is_saved();
        let tail = std::mem::take(&mut self.redo);
        if !tail.is_empty() {
            log::debug!("discarding {} redoable commands", tail.len());
        }
        // Check if the saved state was discarded with the redo branch.
        self.saved = self.saved.filter(|&saved| saved <= head);
        // Try to merge commands unless the target is in a saved state.
        let mut evicted = false;
        let merged = match self.history.peek_entry_mut() {
            Some(last) if merge && !was_saved => last.get_mut().merge(command),
            _ => Merged::No(command),
        };
        match merged {
            Merged::Yes => log::debug!("command merged into the previous one"),
            Merged::Annul => {
                log::debug!("command annulled the previous one");
                self.history.pop_entry();
            }
            Merged::No(command) => {
                if self.history.push_entry(Entry::from(command)).is_some() {
                    evicted = true;
                    log::debug!("limit of {} reached, oldest command evicted", self.limit());
                    self.saved = self.saved.and_then(|saved| saved.checked_sub(1));
                }
            }
        }
        log::trace!("command recorded, {} in history", self.len());
        let can_undo = self.can_undo();
        self.socket
            .emit_if(could_undo != can_undo, Signal::Undo(can_undo));
        self.socket.emit_if(could_redo, Signal::Redo(false));
        let is_saved = self.is_saved();
        self.socket
            .emit_if(was_saved != is_saved, Signal::Saved(is_saved));
        Some((tail, evicted))
    }

    /// Pops the most recent command and calls its [`undo`](Command::undo) method.
    ///
    /// Returns `None` if there is nothing to undo. If the undo fails the
    /// command is discarded together with the redo stack and the error is returned.
    pub fn undo_last(&mut self, target: &mut C::Target) -> Option<Result> {
        let mut entry = self.history.pop_entry()?;
        let head = self.head() + 1;
        let was_saved = self.saved == Some(head);
        let could_redo = self.can_redo();
        if let Err(err) = entry.get_mut().undo(target) {
            log::warn!("undo failed, command discarded: {}", err);
            // The target is not at any recorded position anymore, so nothing
            // above the remaining history can be reached again.
            if could_redo {
                log::debug!("discarding {} redoable commands", self.redo.len());
                self.redo.clear();
            }
            let head = self.head();
            self.saved = self.saved.filter(|&saved| saved < head);
            self.socket.emit_if(!self.can_undo(), Signal::Undo(false));
            self.socket.emit_if(could_redo, Signal::Redo(false));
            self.socket.emit_if(was_saved, Signal::Saved(false));
            return Some(Err(err));
        }
        self.redo.push(entry);
        log::trace!("command undone, {} left in history", self.len());
        let is_saved = self.is_saved();
        self.socket.emit_if(!self.can_undo(), Signal::Undo(false));
        self.socket.emit_if(!could_redo, Signal::Redo(true));
        self.socket
            .emit_if(was_saved != is_saved, Signal::Saved(is_saved));
        Some(Ok(()))
    }

    /// Pops the most recently undone command and calls its [`redo`](Command::redo) method.
    ///
    /// Returns `None` if there is nothing to redo. If the command refuses to run
    /// again, it is discarded together with the rest of the redo stack and
    /// [`Error::RedoRejected`] is returned.
    pub fn redo_last(&mut self, target: &mut C::Target) -> Option<Result> {
        let mut entry = self.redo.pop()?;
        let could_undo = self.can_undo();
        let was_saved = self.is_saved();
        if !entry.get_mut().redo(target) {
            let discarded = self.redo.len() + 1;
            log::warn!("redo rejected, discarding {} redoable commands", discarded);
            self.redo.clear();
            let head = self.head();
            self.saved = self.saved.filter(|&saved| saved <= head);
            self.socket.emit(Signal::Redo(false));
            return Some(Err(Error::RedoRejected));
        }
        if self.history.push_entry(entry).is_some() {
            self.saved = self.saved.and_then(|saved| saved.checked_sub(1));
        }
        log::trace!("command redone, {} in history", self.len());
        let is_saved = self.is_saved();
        self.socket.emit_if(!could_undo, Signal::Undo(true));
        self.socket.emit_if(!self.can_redo(), Signal::Redo(false));
        self.socket
            .emit_if(was_saved != is_saved, Signal::Saved(is_saved));
        Some(Ok(()))
    }

    /// Marks the target as currently being in a saved or unsaved state.
    pub fn set_saved(&mut self, saved: bool) {
        let was_saved = self.is_saved();
        if saved {
            self.saved = Some(self.head());
            self.socket.emit_if(!was_saved, Signal::Saved(true));
        } else {
            self.saved = None;
            self.socket.emit_if(was_saved, Signal::Saved(false));
        }
    }

    /// Removes all commands from the invoker without undoing them.
    pub fn clear(&mut self) {
        let could_undo = self.can_undo();
        let could_redo = self.can_redo();
        let was_saved = self.is_saved();
        self.history.clear();
        self.redo.clear();
        self.saved = was_saved.then_some(0);
        self.socket.emit_if(could_undo, Signal::Undo(false));
        self.socket.emit_if(could_redo, Signal::Redo(false));
    }

    /// Repeatedly calls [`undo_last`](Invoker::undo_last) or [`redo_last`](Invoker::redo_last)
    /// until the head is at `position`.
    ///
    /// Returns `None` if `position` can not be reached.
    ///
    /// # Errors
    /// If an error occur when undoing or redoing, it stops and the error is returned.
    pub fn go_to(&mut self, target: &mut C::Target, position: usize) -> Option<Result> {
        if position > self.head() + self.redo_len() {
            return None;
        }
        let could_undo = self.can_undo();
        let could_redo = self.can_redo();
        let was_saved = self.is_saved();
        // Temporarily remove slot so they are not called each iteration.
        let slot = self.socket.disconnect();
        // Decide if we need to undo or redo to reach position.
        let step = if position > self.head() {
            Invoker::redo_last
        } else {
            Invoker::undo_last
        };
        let mut result = Ok(());
        while self.head() != position {
            match step(self, target) {
                Some(Ok(())) => (),
                Some(Err(err)) => {
                    result = Err(err);
                    break;
                }
                None => break,
            }
        }
        // Add slot back.
        self.socket.connect(slot);
        let can_undo = self.can_undo();
        let can_redo = self.can_redo();
        let is_saved = self.is_saved();
        self.socket
            .emit_if(could_undo != can_undo, Signal::Undo(can_undo));
        self.socket
            .emit_if(could_redo != can_redo, Signal::Redo(can_redo));
        self.socket
            .emit_if(was_saved != is_saved, Signal::Saved(is_saved));
        Some(result)
    }

    /// Revert the changes done to the target since the saved state.
    pub fn revert(&mut self, target: &mut C::Target) -> Option<Result> {
        self.saved.and_then(|saved| self.go_to(target, saved))
    }

    /// Puts back a redo branch that a checkpoint run discarded.
    pub(crate) fn restore_redo(&mut self, tail: Vec<Entry<C>>, saved: Option<usize>) {
        let could_redo = self.can_redo();
        self.redo = tail;
        self.saved = saved;
        self.socket
            .emit_if(could_redo != self.can_redo(), Signal::Redo(self.can_redo()));
    }

    /// Drops the command that was most recently undone.
    pub(crate) fn forget_redo(&mut self) -> Option<Entry<C>> {
        self.redo.pop()
    }
}

impl<C: fmt::Display, S> Invoker<C, S> {
    /// Returns the string of the command which will be undone
    /// in the next call to [`undo_last`](Invoker::undo_last).
    pub fn undo_text(&self) -> Option<String> {
        self.history.peek().map(ToString::to_string)
    }

    /// Returns the string of the command which will be redone
    /// in the next call to [`redo_last`](Invoker::redo_last).
    pub fn redo_text(&self) -> Option<String> {
        self.redo.last().map(ToString::to_string)
    }
}

impl<C> Default for Invoker<C> {
    fn default() -> Invoker<C> {
        Invoker::new()
    }
}

impl<C: fmt::Debug, S: fmt::Debug> fmt::Debug for Invoker<C, S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Invoker")
            .field("history", &self.history)
            .field("redo", &self.redo)
            .field("saved", &self.saved)
            .field("socket", &self.socket)
            .finish()
    }
}
