#[cfg(feature = "arrayvec")]
use arrayvec::ArrayVec;
#[cfg(feature = "chrono")]
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::fmt::{self, Display, Formatter};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Wrapper around a command that contains additional metadata.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct Entry<C> {
    command: C,
    #[cfg(feature = "chrono")]
    timestamp: DateTime<Utc>,
}

impl<C> Entry<C> {
    /// Returns a reference to the command.
    pub fn get(&self) -> &C {
        &self.command
    }

    /// Returns a mutable reference to the command.
    pub fn get_mut(&mut self) -> &mut C {
        &mut self.command
    }

    /// Consumes the entry and returns the command.
    pub fn into_inner(self) -> C {
        self.command
    }

    /// Returns the time the command was recorded.
    #[cfg(feature = "chrono")]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl<C> From<C> for Entry<C> {
    fn from(command: C) -> Self {
        Entry {
            command,
            #[cfg(feature = "chrono")]
            timestamp: Utc::now(),
        }
    }
}

impl<C: Display> Display for Entry<C> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        (&self.command as &dyn Display).fmt(f)
    }
}

/// Storage used by a [`History`](crate::History).
///
/// Entries are only ever added and removed at the back, except when the
/// oldest entry is evicted from the front.
pub trait Entries {
    /// The command type stored.
    type Command;

    /// Returns the largest number of entries the storage can hold.
    fn max_len(&self) -> usize;

    /// Returns the number of entries.
    fn len(&self) -> usize;

    /// Returns `true` if there are no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the entry at `index`, where `0` is the oldest entry.
    fn get(&self, index: usize) -> Option<&Entry<Self::Command>>;

    /// Returns the newest entry.
    fn back(&self) -> Option<&Entry<Self::Command>> {
        self.len().checked_sub(1).and_then(|i| self.get(i))
    }

    /// Returns the newest entry mutably.
    fn back_mut(&mut self) -> Option<&mut Entry<Self::Command>>;

    /// Adds an entry at the back.
    fn push_back(&mut self, entry: Entry<Self::Command>);

    /// Removes the newest entry.
    fn pop_back(&mut self) -> Option<Entry<Self::Command>>;

    /// Removes the oldest entry.
    fn pop_front(&mut self) -> Option<Entry<Self::Command>>;

    /// Removes all entries.
    fn clear(&mut self);
}

impl<C> Entries for VecDeque<Entry<C>> {
    type Command = C;

    fn max_len(&self) -> usize {
        usize::MAX
    }

    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn get(&self, index: usize) -> Option<&Entry<C>> {
        VecDeque::get(self, index)
    }

    fn back_mut(&mut self) -> Option<&mut Entry<C>> {
        VecDeque::back_mut(self)
    }

    fn push_back(&mut self, entry: Entry<C>) {
        VecDeque::push_back(self, entry);
    }

    fn pop_back(&mut self) -> Option<Entry<C>> {
        VecDeque::pop_back(self)
    }

    fn pop_front(&mut self) -> Option<Entry<C>> {
        VecDeque::pop_front(self)
    }

    fn clear(&mut self) {
        VecDeque::clear(self);
    }
}

#[cfg(feature = "arrayvec")]
impl<C, const N: usize> Entries for ArrayVec<Entry<C>, N> {
    type Command = C;

    fn max_len(&self) -> usize {
        N
    }

    fn len(&self) -> usize {
        ArrayVec::len(self)
    }

    fn get(&self, index: usize) -> Option<&Entry<C>> {
        self.as_slice().get(index)
    }

    fn back_mut(&mut self) -> Option<&mut Entry<C>> {
        self.as_mut_slice().last_mut()
    }

    fn push_back(&mut self, entry: Entry<C>) {
        self.push(entry);
    }

    fn pop_back(&mut self) -> Option<Entry<C>> {
        self.pop()
    }

    // Shifts every remaining entry, fine for the small N this is meant for.
    fn pop_front(&mut self) -> Option<Entry<C>> {
        (!ArrayVec::is_empty(self)).then(|| self.remove(0))
    }

    fn clear(&mut self) {
        ArrayVec::clear(self);
    }
}
