//! Command stacks with undo-redo functionality.
//!
//! All modifications to a target are done by running commands that know how to
//! reverse the change they make. The commands that actually changed the target
//! are recorded, which makes it easy to undo and redo them later.
//!
//! # Features
//!
//! * [`Command`] provides the base functionality for all commands.
//! * [`History`] is the LIFO stack that stores executed commands.
//! * [`Invoker`] runs commands, records the ones that changed the target
//!   and provides undo and redo on top of the recorded commands.
//! * [`Checkpoint`] and [`Queue`] wrap an [`Invoker`] and give it
//!   cancellable groups and batched operations.
//! * [`FromFn`] and [`Snapshot`] create commands from closures by backing up the target.
//! * [`Originator`] and [`Caretaker`] provide snapshots of a target that can be restored.
//! * [`Shared`] puts a target and its invoker behind a single lock.
//! * Commands can be merged after being run by implementing [`Command::merge`].
//! * The target can be marked as saved and the invoker notifies a [`Slot`] when
//!   the saved state or the ability to undo or redo changes.
//! * Time stamps are provided when the `chrono` feature is enabled.
//! * Colored display output is provided when the `colored` feature is enabled.
//!
//! # Examples
//!
//! ```
//! use rewind::{Command, Invoker};
//!
//! struct Push(char);
//!
//! impl Command for Push {
//!     type Target = String;
//!
//!     fn execute(&mut self, s: &mut String) -> bool {
//!         s.push(self.0);
//!         true
//!     }
//!
//!     fn undo(&mut self, s: &mut String) -> rewind::Result {
//!         self.0 = s
//!             .pop()
//!             .ok_or_else(|| rewind::Error::InvalidTarget("string is empty".into()))?;
//!         Ok(())
//!     }
//! }
//!
//! let mut target = String::new();
//! let mut invoker = Invoker::new();
//! invoker.run(&mut target, Push('a'));
//! invoker.run(&mut target, Push('b'));
//! invoker.run(&mut target, Push('c'));
//! assert_eq!(target, "abc");
//! invoker.undo_last(&mut target).unwrap().unwrap();
//! invoker.undo_last(&mut target).unwrap().unwrap();
//! invoker.undo_last(&mut target).unwrap().unwrap();
//! assert_eq!(target, "");
//! assert!(invoker.undo_last(&mut target).is_none());
//! invoker.redo_last(&mut target).unwrap().unwrap();
//! assert_eq!(target, "a");
//! ```

#![deny(missing_docs)]

pub mod editor;
mod entry;
mod error;
mod format;
mod from_fn;
mod history;
pub mod invoker;
pub mod memento;
mod shared;
mod slot;

pub use entry::{Entries, Entry};
pub use error::{Error, Result};
pub use from_fn::FromFn;
#[cfg(feature = "arrayvec")]
pub use history::ArrayHistory;
pub use history::History;
pub use invoker::{Checkpoint, Invoker, Queue};
pub use memento::{Caretaker, Originator, Snapshot};
pub use shared::Shared;
pub use slot::{Signal, Slot};

/// Base functionality for all commands.
pub trait Command {
    /// The target type.
    type Target;

    /// Runs the command on the target and returns `true` if the target was changed.
    ///
    /// Commands that only read the target, or that can not be applied to it,
    /// return `false` and must leave the target untouched. Those commands are
    /// never recorded.
    fn execute(&mut self, target: &mut Self::Target) -> bool;

    /// Restores the target to the state it had before [`execute`](Command::execute) was called.
    ///
    /// Returns [`Error::InvalidTarget`] if the target no longer matches the
    /// backup taken by the command. Calling `undo` twice without an execute in
    /// between is a no-op by convention.
    fn undo(&mut self, target: &mut Self::Target) -> Result;

    /// Runs the command again after it has been undone.
    ///
    /// The default implementation uses the [`execute`](Command::execute) implementation.
    fn redo(&mut self, target: &mut Self::Target) -> bool {
        self.execute(target)
    }

    /// Used for manual merging of commands.
    ///
    /// Called on the most recent command with the command that was just run.
    /// When commands are merged, undoing and redoing them are done in one step.
    fn merge(&mut self, other: Self) -> Merged<Self>
    where
        Self: Sized,
    {
        Merged::No(other)
    }
}

impl<C: Command + ?Sized> Command for Box<C> {
    type Target = C::Target;

    fn execute(&mut self, target: &mut C::Target) -> bool {
        (**self).execute(target)
    }

    fn undo(&mut self, target: &mut C::Target) -> Result {
        (**self).undo(target)
    }

    fn redo(&mut self, target: &mut C::Target) -> bool {
        (**self).redo(target)
    }
}

/// Says if the command has been merged with another command.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
pub enum Merged<C> {
    /// The commands have been merged.
    ///
    /// This means that the `other` command will not be added to the stack.
    Yes,
    /// The commands have not been merged.
    ///
    /// We need to return the `other` command so it can be added to the stack.
    No(C),
    /// The two commands cancels each other out.
    ///
    /// This means that both commands will be removed from the stack.
    Annul,
}

#[cfg(test)]
mod tests {
    use crate::{Command, Invoker};

    pub(crate) fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    struct Push(char);

    impl Command for Push {
        type Target = String;

        fn execute(&mut self, s: &mut String) -> bool {
            s.push(self.0);
            true
        }

        fn undo(&mut self, s: &mut String) -> crate::Result {
            s.pop();
            Ok(())
        }
    }

    #[test]
    fn boxed_commands() {
        init_logger();
        let mut target = String::new();
        let mut invoker: Invoker<Box<dyn Command<Target = String>>> = Invoker::new();
        invoker.run(&mut target, Box::new(Push('a')));
        invoker.run(&mut target, Box::new(crate::FromFn::new(|s: &mut String| {
            s.push('b');
            true
        })));
        assert_eq!(target, "ab");
        invoker.undo_last(&mut target).unwrap().unwrap();
        invoker.undo_last(&mut target).unwrap().unwrap();
        assert_eq!(target, "");
    }
}
