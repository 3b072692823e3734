use crate::slot::Socket;
use crate::{History, Invoker};
use std::marker::PhantomData;
use std::num::NonZeroUsize;

/// Builder for an [`Invoker`].
///
/// # Examples
/// ```
/// # use rewind::{editor::{Append, Editor}, Invoker, Signal};
/// # let mut editor = Editor::new();
/// let mut invoker = Invoker::builder()
///     .limit(100)
///     .capacity(100)
///     .connect(|s: Signal| { dbg!(s); })
///     .build();
/// # invoker.run(&mut editor, Append::new("a"));
/// ```
#[derive(Debug)]
pub struct Builder<C, S = ()> {
    capacity: usize,
    limit: NonZeroUsize,
    saved: bool,
    socket: Socket<S>,
    pd: PhantomData<C>,
}

impl<C, S> Builder<C, S> {
    /// Sets the capacity for the invoker.
    pub fn capacity(mut self, capacity: usize) -> Builder<C, S> {
        self.capacity = capacity;
        self
    }

    /// Sets the `limit` of the invoker.
    ///
    /// # Panics
    /// Panics if `limit` is `0`.
    pub fn limit(mut self, limit: usize) -> Builder<C, S> {
        self.limit = NonZeroUsize::new(limit).expect("limit can not be `0`");
        self
    }

    /// Sets if the target is initially in a saved state.
    /// By default the target is in a saved state.
    pub fn saved(mut self, saved: bool) -> Builder<C, S> {
        self.saved = saved;
        self
    }

    /// Connects the slot.
    pub fn connect(mut self, slot: S) -> Builder<C, S> {
        self.socket = Socket::new(slot);
        self
    }

    /// Builds the invoker.
    pub fn build(self) -> Invoker<C, S> {
        let mut history = History::new();
        history.set_limit(self.limit);
        history.reserve(self.capacity);
        Invoker {
            history,
            redo: Vec::new(),
            saved: self.saved.then_some(0),
            socket: self.socket,
        }
    }
}

impl<C, S> Default for Builder<C, S> {
    fn default() -> Self {
        Builder {
            capacity: 0,
            limit: NonZeroUsize::MAX,
            saved: true,
            socket: Socket::default(),
            pd: PhantomData,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::editor::{Append, Editor};
    use crate::Invoker;

    #[test]
    fn unsaved_start() {
        let mut editor = Editor::new();
        let mut invoker: Invoker<Append> = Invoker::builder().saved(false).build();
        assert!(!invoker.is_saved());
        invoker.run(&mut editor, Append::new("a"));
        invoker.undo_last(&mut editor).unwrap().unwrap();
        assert!(!invoker.is_saved());
        assert!(invoker.revert(&mut editor).is_none());
    }

    #[test]
    fn limit_and_capacity() {
        let invoker: Invoker<Append> = Invoker::builder().limit(10).capacity(4).build();
        assert_eq!(invoker.limit(), 10);
        assert!(invoker.is_empty());
    }
}
