//! Module used to communicate changes in the invoker.

use std::mem;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::sync::mpsc::{Sender, SyncSender};

/// Slot wrapper that adds some additional functionality.
#[derive(Clone, Debug)]
pub(crate) struct Socket<S>(Option<S>);

impl<S> Socket<S> {
    pub const fn new(slot: S) -> Socket<S> {
        Socket(Some(slot))
    }

    pub fn connect(&mut self, slot: Option<S>) -> Option<S> {
        mem::replace(&mut self.0, slot)
    }

    pub fn disconnect(&mut self) -> Option<S> {
        self.0.take()
    }
}

impl<S> Default for Socket<S> {
    fn default() -> Self {
        Socket(None)
    }
}

impl<S: Slot> Socket<S> {
    pub fn emit(&mut self, signal: Signal) {
        if let Some(slot) = &mut self.0 {
            slot.on_emit(signal);
        }
    }

    pub fn emit_if(&mut self, cond: bool, signal: Signal) {
        if cond {
            self.emit(signal);
        }
    }
}

/// The `Signal` describes the state change done to the invoker.
///
/// For example, if the invoker can no longer redo any commands,
/// it sends a `Redo(false)` signal to tell the user.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
pub enum Signal {
    /// Emitted when the invoker's ability to undo has changed.
    Undo(bool),
    /// Emitted when the invoker's ability to redo has changed.
    Redo(bool),
    /// Emitted when the saved state has changed.
    Saved(bool),
}

/// Use this to handle signals emitted.
///
/// This allows you to trigger events on certain state changes.
///
/// # Examples
/// ```
/// # use std::sync::mpsc;
/// # use rewind::{editor::{Append, Editor}, Invoker, Signal};
/// let (sender, receiver) = mpsc::channel();
/// let mut iter = receiver.try_iter();
///
/// let mut editor = Editor::new();
/// let mut invoker = Invoker::builder().connect(sender).build();
///
/// invoker.run(&mut editor, Append::new("a"));
/// assert_eq!(iter.next(), Some(Signal::Undo(true)));
/// assert_eq!(iter.next(), Some(Signal::Saved(false)));
/// assert_eq!(iter.next(), None);
///
/// invoker.undo_last(&mut editor);
/// assert_eq!(iter.next(), Some(Signal::Undo(false)));
/// assert_eq!(iter.next(), Some(Signal::Redo(true)));
/// assert_eq!(iter.next(), Some(Signal::Saved(true)));
/// assert_eq!(iter.next(), None);
/// ```
pub trait Slot {
    /// Receives a signal that describes the state change done to the invoker.
    fn on_emit(&mut self, signal: Signal);
}

impl Slot for () {
    fn on_emit(&mut self, _: Signal) {}
}

impl<F: FnMut(Signal)> Slot for F {
    fn on_emit(&mut self, signal: Signal) {
        self(signal)
    }
}

impl Slot for Sender<Signal> {
    fn on_emit(&mut self, signal: Signal) {
        self.send(signal).ok();
    }
}

impl Slot for SyncSender<Signal> {
    fn on_emit(&mut self, signal: Signal) {
        self.send(signal).ok();
    }
}
