use crate::{Command, Result};
use std::mem;

/// Command made from a function.
///
/// The undo functionality is provided by cloning the target before calling the
/// function. The function returns `true` if it changed the target. When it
/// returns `false` the target is restored from the clone, so a rejected change
/// never leaves the target half edited.
///
/// # Examples
/// ```
/// # use rewind::{FromFn, Invoker};
/// let mut target = String::new();
/// let mut invoker: Invoker<FromFn<fn(&mut String) -> bool, String>> = Invoker::new();
/// invoker.run(&mut target, FromFn::new(|s: &mut String| {
///     s.push('a');
///     true
/// }));
/// invoker.run(&mut target, FromFn::new(|s: &mut String| {
///     s.push('!');
///     false
/// }));
/// assert_eq!(target, "a");
/// invoker.undo_last(&mut target).unwrap().unwrap();
/// assert_eq!(target, "");
/// ```
#[derive(Clone, Debug)]
pub struct FromFn<F, T> {
    f: F,
    target: Option<T>,
}

impl<F, T> FromFn<F, T> {
    /// Creates a new `FromFn` from `f`.
    pub const fn new(f: F) -> Self {
        FromFn { f, target: None }
    }
}

impl<F, T> Command for FromFn<F, T>
where
    F: FnMut(&mut T) -> bool,
    T: Clone,
{
    type Target = T;

    fn execute(&mut self, target: &mut T) -> bool {
        let old = target.clone();
        if (self.f)(target) {
            self.target = Some(old);
            true
        } else {
            *target = old;
            false
        }
    }

    fn undo(&mut self, target: &mut T) -> Result {
        if let Some(old) = self.target.as_mut() {
            mem::swap(old, target);
        }
        Ok(())
    }

    fn redo(&mut self, target: &mut T) -> bool {
        match self.target.as_mut() {
            Some(new) => {
                mem::swap(new, target);
                true
            }
            None => self.execute(target),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{FromFn, Invoker};

    fn push(c: char) -> FromFn<impl FnMut(&mut String) -> bool, String> {
        FromFn::new(move |s: &mut String| {
            s.push(c);
            true
        })
    }

    #[test]
    fn round_trip() {
        let mut target = String::new();
        let mut invoker = Invoker::new();
        invoker.run(&mut target, push('a'));
        invoker.run(&mut target, push('b'));
        invoker.run(&mut target, push('c'));
        assert_eq!(target, "abc");
        invoker.undo_last(&mut target).unwrap().unwrap();
        invoker.undo_last(&mut target).unwrap().unwrap();
        invoker.undo_last(&mut target).unwrap().unwrap();
        assert_eq!(target, "");
        invoker.redo_last(&mut target).unwrap().unwrap();
        invoker.redo_last(&mut target).unwrap().unwrap();
        invoker.redo_last(&mut target).unwrap().unwrap();
        assert_eq!(target, "abc");
    }

    #[test]
    fn rejected_change_is_rolled_back() {
        let mut target = vec![1, 2];
        let mut invoker = Invoker::new();
        let ran = invoker.run(
            &mut target,
            FromFn::new(|v: &mut Vec<i32>| {
                v.push(3);
                v.iter().sum::<i32>() < 5
            }),
        );
        assert!(!ran);
        assert_eq!(target, [1, 2]);
        assert!(invoker.is_empty());
    }
}
