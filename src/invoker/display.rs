use crate::format::Format;
use crate::{Entry, Invoker};
use std::fmt::{self, Write};

/// Configurable display formatting for the [`Invoker`].
///
/// Lists every command, the ones that can be redone first, down to the
/// position before the oldest recorded command.
///
/// # Examples
/// ```
/// # use rewind::{editor::{Append, Editor}, Invoker};
/// let mut editor = Editor::new();
/// let mut invoker = Invoker::new();
/// invoker.run(&mut editor, Append::new("a"));
/// invoker.run(&mut editor, Append::new("b"));
/// invoker.undo_last(&mut editor);
///
/// let mut display = invoker.display();
/// # #[cfg(feature = "colored")]
/// # display.colored(false);
/// display.detailed(false);
/// assert_eq!(display.to_string(), "2 append `b`\n1 append `a` [HEAD]\n0 [SAVED]\n");
/// ```
pub struct Display<'a, C, S> {
    invoker: &'a Invoker<C, S>,
    format: Format,
}

impl<C, S> Display<'_, C, S> {
    /// Show colored output (on by default).
    ///
    /// Requires the `colored` feature to be enabled.
    #[cfg(feature = "colored")]
    pub fn colored(&mut self, on: bool) -> &mut Self {
        self.format.colored = on;
        self
    }

    /// Show detailed output (on by default).
    pub fn detailed(&mut self, on: bool) -> &mut Self {
        self.format.detailed = on;
        self
    }

    /// Show the current position in the output (on by default).
    pub fn head(&mut self, on: bool) -> &mut Self {
        self.format.head = on;
        self
    }

    /// Show the position of the command (on by default).
    pub fn position(&mut self, on: bool) -> &mut Self {
        self.format.position = on;
        self
    }

    /// Show the saved command (on by default).
    pub fn saved(&mut self, on: bool) -> &mut Self {
        self.format.saved = on;
        self
    }
}

impl<C: fmt::Display, S> Display<'_, C, S> {
    fn fmt_list(&self, f: &mut fmt::Formatter, at: usize, entry: Option<&Entry<C>>) -> fmt::Result {
        self.format.position(f, at)?;

        #[cfg(feature = "chrono")]
        if let Some(entry) = entry {
            if self.format.detailed {
                self.format.timestamp(f, &entry.timestamp())?;
            }
        }

        if let Some(entry) = entry {
            if !self.format.detailed {
                self.format.message(f, entry)?;
            }
        }

        self.format
            .labels(f, at, self.invoker.head(), self.invoker.saved())?;

        match entry {
            Some(entry) if self.format.detailed => {
                writeln!(f)?;
                self.format.message(f, entry)
            }
            _ => f.write_char('\n'),
        }
    }
}

impl<'a, C, S> From<&'a Invoker<C, S>> for Display<'a, C, S> {
    fn from(invoker: &'a Invoker<C, S>) -> Self {
        Display {
            invoker,
            format: Format::default(),
        }
    }
}

impl<C: fmt::Display, S> fmt::Display for Display<'_, C, S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let head = self.invoker.head();
        let redo = self.invoker.redo_entries();
        for (i, entry) in redo.iter().enumerate() {
            self.fmt_list(f, head + redo.len() - i, Some(entry))?;
        }
        let history = self.invoker.history();
        for i in (0..head).rev() {
            self.fmt_list(f, i + 1, history.get_entry(i))?;
        }
        self.fmt_list(f, 0, None)
    }
}
