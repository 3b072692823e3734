#![cfg_attr(not(feature = "colored"), allow(unused_variables))]

#[cfg(feature = "chrono")]
use chrono::{DateTime, Local, Utc};
#[cfg(feature = "colored")]
use colored::{Color, Colorize};
use std::fmt::{self, Write};

#[derive(Copy, Clone, Debug)]
pub(crate) struct Format {
    #[cfg(feature = "colored")]
    pub colored: bool,
    pub detailed: bool,
    pub head: bool,
    pub position: bool,
    pub saved: bool,
}

impl Default for Format {
    fn default() -> Self {
        Format {
            #[cfg(feature = "colored")]
            colored: true,
            detailed: true,
            head: true,
            position: true,
            saved: true,
        }
    }
}

/// A part of a line that gets its own color.
#[derive(Copy, Clone)]
enum Part {
    Position,
    Label,
    Bracket,
    Timestamp,
}

#[cfg(feature = "colored")]
impl Part {
    fn paint(self, text: &str, label_color: Color) -> colored::ColoredString {
        match self {
            Part::Position => text.yellow().bold(),
            Part::Label => text.color(label_color).bold(),
            Part::Bracket | Part::Timestamp => text.yellow(),
        }
    }
}

impl Format {
    /// Writes the command text. Detailed output keeps every line, indented below the header.
    pub fn message(self, f: &mut fmt::Formatter, command: &impl ToString) -> fmt::Result {
        let text = command.to_string();
        if self.detailed {
            return text
                .lines()
                .try_for_each(|line| writeln!(f, "  {}", line.trim()));
        }
        match text.lines().map(str::trim).find(|line| !line.is_empty()) {
            Some(line) => write!(f, " {line}"),
            None => Ok(()),
        }
    }

    pub fn position(self, f: &mut fmt::Formatter, at: usize) -> fmt::Result {
        if self.position {
            self.write(f, Part::Position, &at.to_string())?;
        }
        Ok(())
    }

    /// Writes ` [HEAD]`, ` [SAVED]` or both when `at` is one of those positions.
    pub fn labels(
        self,
        f: &mut fmt::Formatter,
        at: usize,
        head: usize,
        saved: Option<usize>,
    ) -> fmt::Result {
        let labels = [
            (self.head && at == head, "HEAD"),
            (self.saved && saved == Some(at), "SAVED"),
        ];
        let mut shown = labels.iter().filter(|(on, _)| *on).map(|&(_, l)| l).peekable();
        if shown.peek().is_none() {
            return Ok(());
        }
        f.write_char(' ')?;
        self.write(f, Part::Bracket, "[")?;
        let mut first = true;
        for label in shown {
            if !first {
                self.write(f, Part::Bracket, ",")?;
                f.write_char(' ')?;
            }
            first = false;
            self.write(f, Part::Label, label)?;
        }
        self.write(f, Part::Bracket, "]")
    }

    #[cfg(feature = "chrono")]
    pub fn timestamp(self, f: &mut fmt::Formatter, timestamp: &DateTime<Utc>) -> fmt::Result {
        f.write_char(' ')?;
        let local = timestamp.with_timezone(&Local).to_rfc2822();
        self.write(f, Part::Timestamp, &local)
    }

    fn write(self, f: &mut fmt::Formatter, part: Part, text: &str) -> fmt::Result {
        #[cfg(feature = "colored")]
        if self.colored {
            let color = if text == "HEAD" { Color::Cyan } else { Color::Green };
            return write!(f, "{}", part.paint(text, color));
        }
        f.write_str(text)
    }
}
