//! A LIFO stack of executed commands.

use crate::{Entries, Entry};
#[cfg(feature = "arrayvec")]
use arrayvec::ArrayVec;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::marker::PhantomData;
use std::num::NonZeroUsize;

/// A history with fixed capacity that lives on the stack.
#[cfg(feature = "arrayvec")]
pub type ArrayHistory<C, const N: usize> = History<C, ArrayVec<Entry<C>, N>>;

/// An ordered stack of executed commands.
///
/// Commands are only added and removed at the top. The top of the stack is
/// always the most recently pushed command. When the limit is reached the
/// oldest command is evicted to make room.
///
/// # Examples
/// ```
/// # use rewind::History;
/// let mut history = History::new();
/// history.push("c1");
/// history.push("c2");
/// history.push("c3");
/// assert_eq!(history.pop(), Some("c3"));
/// assert_eq!(history.pop(), Some("c2"));
/// assert_eq!(history.peek(), Some(&"c1"));
/// ```
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(bound(serialize = "S: Serialize", deserialize = "S: Deserialize<'de>"))
)]
#[derive(Clone, Debug)]
pub struct History<C, S = VecDeque<Entry<C>>> {
    entries: S,
    limit: NonZeroUsize,
    #[cfg_attr(feature = "serde", serde(skip))]
    pd: PhantomData<fn() -> C>,
}

impl<C> History<C> {
    /// Returns a new, unbounded history.
    pub fn new() -> History<C> {
        History::default()
    }

    /// Returns a new history that holds at most `limit` commands.
    ///
    /// # Panics
    /// Panics if `limit` is `0`.
    pub fn with_limit(limit: usize) -> History<C> {
        History {
            entries: VecDeque::new(),
            limit: NonZeroUsize::new(limit).expect("limit can not be `0`"),
            pd: PhantomData,
        }
    }

    /// Reserves capacity for at least `additional` more commands.
    ///
    /// # Panics
    /// Panics if the new capacity overflows usize.
    pub fn reserve(&mut self, additional: usize) {
        self.entries.reserve(additional);
    }

    pub(crate) fn set_limit(&mut self, limit: NonZeroUsize) {
        self.limit = limit;
    }
}

impl<C, S: Entries<Command = C>> History<C, S> {
    /// Returns the number of commands in the history.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the history is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the largest number of commands the history keeps.
    pub fn limit(&self) -> usize {
        self.limit.get().min(self.entries.max_len())
    }

    /// Pushes the command on top of the history.
    ///
    /// If the limit was reached, the oldest command is evicted and returned.
    pub fn push(&mut self, command: C) -> Option<C> {
        self.push_entry(Entry::from(command)).map(Entry::into_inner)
    }

    /// Removes the most recent command and returns it,
    /// or `None` if the history is empty.
    pub fn pop(&mut self) -> Option<C> {
        self.pop_entry().map(Entry::into_inner)
    }

    /// Returns the most recent command without removing it.
    pub fn peek(&self) -> Option<&C> {
        self.entries.back().map(Entry::get)
    }

    /// Removes all commands from the history.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns an iterator over the commands, from the oldest to the newest.
    pub fn iter(&self) -> impl Iterator<Item = &C> + '_ {
        self.entries().map(Entry::get)
    }

    /// Returns an iterator over the entries, from the oldest to the newest.
    pub fn entries(&self) -> impl Iterator<Item = &Entry<C>> + '_ {
        (0..self.entries.len()).filter_map(move |i| self.entries.get(i))
    }

    pub(crate) fn push_entry(&mut self, entry: Entry<C>) -> Option<Entry<C>> {
        if self.limit() == 0 {
            return Some(entry);
        }
        let evicted = if self.len() >= self.limit() {
            self.entries.pop_front()
        } else {
            None
        };
        self.entries.push_back(entry);
        evicted
    }

    pub(crate) fn pop_entry(&mut self) -> Option<Entry<C>> {
        self.entries.pop_back()
    }

    pub(crate) fn peek_entry_mut(&mut self) -> Option<&mut Entry<C>> {
        self.entries.back_mut()
    }

    pub(crate) fn get_entry(&self, index: usize) -> Option<&Entry<C>> {
        self.entries.get(index)
    }
}

impl<C, S: Default> Default for History<C, S> {
    fn default() -> Self {
        History {
            entries: S::default(),
            limit: NonZeroUsize::MAX,
            pd: PhantomData,
        }
    }
}
