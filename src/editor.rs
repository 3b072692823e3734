//! A small text editor and the commands that edit it.
//!
//! The editor owns the text, a selection and a clipboard. Commands that
//! change the text or the selection are recorded, [`Copy`] only fills the
//! clipboard and is never recorded.
//!
//! # Examples
//! ```
//! # use rewind::{editor::*, Invoker};
//! let mut editor = Editor::from("hello world");
//! let mut invoker: Invoker<Edit> = Invoker::new();
//!
//! invoker.run(&mut editor, Select::new(0..6).into());
//! invoker.run(&mut editor, Cut::default().into());
//! assert_eq!(editor.text(), "world");
//! invoker.run(&mut editor, Select::new(5..5).into());
//! invoker.run(&mut editor, Paste::default().into());
//! assert_eq!(editor.text(), "worldhello ");
//!
//! invoker.undo_last(&mut editor).unwrap().unwrap();
//! invoker.undo_last(&mut editor).unwrap().unwrap();
//! invoker.undo_last(&mut editor).unwrap().unwrap();
//! assert_eq!(editor.text(), "hello world");
//! ```

use crate::{Command, Error, Originator, Result};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::ops::Range;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

fn next_id() -> u64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// A text buffer with a selection and a clipboard.
///
/// Every editor created with [`Editor::new`] or `From` gets its own identity,
/// clones share it. Commands refuse to undo on an editor with another identity.
///
/// The identity is not serialized, a deserialized editor is a new document.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "EditorData")
)]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Editor {
    #[cfg_attr(feature = "serde", serde(skip_serializing))]
    id: u64,
    text: String,
    selection: Range<usize>,
    clipboard: String,
}

impl Editor {
    /// Returns a new empty editor.
    pub fn new() -> Editor {
        Editor::from(String::new())
    }

    /// Returns the identity of the editor.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Returns the text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the selected byte range.
    pub fn selection(&self) -> Range<usize> {
        self.selection.clone()
    }

    /// Returns the selected text.
    pub fn selected(&self) -> &str {
        &self.text[self.selection.clone()]
    }

    /// Returns the clipboard contents.
    pub fn clipboard(&self) -> &str {
        &self.clipboard
    }

    /// Replaces the clipboard contents.
    pub fn set_clipboard(&mut self, text: impl Into<String>) {
        self.clipboard = text.into();
    }

    /// Replaces the whole text and moves the selection to the end.
    ///
    /// This change can not be undone.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.selection = self.text.len()..self.text.len();
    }

    /// Returns `true` if `range` can be selected.
    pub fn is_valid_selection(&self, range: &Range<usize>) -> bool {
        is_valid_range(&self.text, range)
    }

    /// Selects `range` and returns `true`, or returns `false` if the range is invalid.
    pub fn set_selection(&mut self, range: Range<usize>) -> bool {
        if !self.is_valid_selection(&range) {
            return false;
        }
        self.selection = range;
        true
    }

    fn push_str(&mut self, text: &str) {
        self.text.push_str(text);
    }

    fn truncate(&mut self, len: usize) {
        self.text.truncate(len);
        let end = self.selection.end.min(len);
        let start = self.selection.start.min(end);
        self.selection = start..end;
    }

    fn delete_selection(&mut self) {
        self.replace_selection("");
    }

    fn replace_selection(&mut self, text: &str) {
        let start = self.selection.start;
        self.text.replace_range(self.selection.clone(), text);
        self.selection = start + text.len()..start + text.len();
    }

    fn check_id(&self, id: Option<u64>) -> Result {
        match id {
            Some(id) if id != self.id => Err(Error::InvalidTarget(format!(
                "editor {} was replaced by editor {}",
                id, self.id
            ))),
            _ => Ok(()),
        }
    }
}

impl Default for Editor {
    fn default() -> Self {
        Editor::new()
    }
}

impl From<String> for Editor {
    fn from(text: String) -> Self {
        let end = text.len();
        Editor {
            id: next_id(),
            text,
            selection: end..end,
            clipboard: String::new(),
        }
    }
}

impl From<&str> for Editor {
    fn from(text: &str) -> Self {
        Editor::from(text.to_string())
    }
}

fn is_valid_range(text: &str, range: &Range<usize>) -> bool {
    range.start <= range.end
        && range.end <= text.len()
        && text.is_char_boundary(range.start)
        && text.is_char_boundary(range.end)
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct EditorData {
    text: String,
    selection: Range<usize>,
    #[serde(default)]
    clipboard: String,
}

#[cfg(feature = "serde")]
impl TryFrom<EditorData> for Editor {
    type Error = Error;

    fn try_from(data: EditorData) -> Result<Editor> {
        let mut editor = Editor::from(data.text);
        if !editor.set_selection(data.selection.clone()) {
            return Err(Error::InvalidTarget(format!(
                "selection {:?} is out of bounds",
                data.selection
            )));
        }
        editor.clipboard = data.clipboard;
        Ok(editor)
    }
}

/// The saved text and selection of an [`Editor`].
///
/// The clipboard is not part of the snapshot.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EditorSnapshot {
    id: u64,
    text: String,
    selection: Range<usize>,
}

impl Originator for Editor {
    type Memento = EditorSnapshot;

    fn save(&self) -> EditorSnapshot {
        EditorSnapshot {
            id: self.id,
            text: self.text.clone(),
            selection: self.selection.clone(),
        }
    }

    fn restore(&mut self, snapshot: &EditorSnapshot) -> Result {
        self.check_id(Some(snapshot.id))?;
        if !is_valid_range(&snapshot.text, &snapshot.selection) {
            return Err(Error::InvalidTarget(format!(
                "snapshot selection {:?} is out of bounds",
                snapshot.selection
            )));
        }
        self.text.clone_from(&snapshot.text);
        self.selection = snapshot.selection.clone();
        Ok(())
    }
}

/// Appends text at the end of the editor.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Append {
    text: String,
    editor: Option<u64>,
}

impl Append {
    /// Returns a command that appends `text`.
    pub fn new(text: impl Into<String>) -> Append {
        Append {
            text: text.into(),
            editor: None,
        }
    }
}

impl Command for Append {
    type Target = Editor;

    fn execute(&mut self, editor: &mut Editor) -> bool {
        if self.text.is_empty() {
            return false;
        }
        editor.push_str(&self.text);
        self.editor = Some(editor.id());
        true
    }

    fn undo(&mut self, editor: &mut Editor) -> Result {
        editor.check_id(self.editor)?;
        if !editor.text().ends_with(&self.text) {
            return Err(Error::InvalidTarget(format!(
                "text does not end with `{}`",
                self.text
            )));
        }
        editor.truncate(editor.text().len() - self.text.len());
        Ok(())
    }
}

impl Display for Append {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "append `{}`", self.text)
    }
}

/// Changes the selection.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Select {
    range: Range<usize>,
    backup: Option<EditorSnapshot>,
}

impl Select {
    /// Returns a command that selects `range`.
    pub fn new(range: Range<usize>) -> Select {
        Select {
            range,
            backup: None,
        }
    }
}

impl Command for Select {
    type Target = Editor;

    fn execute(&mut self, editor: &mut Editor) -> bool {
        if editor.selection() == self.range {
            return false;
        }
        let backup = editor.save();
        if !editor.set_selection(self.range.clone()) {
            log::debug!("selection {:?} is out of bounds", self.range);
            return false;
        }
        self.backup = Some(backup);
        true
    }

    fn undo(&mut self, editor: &mut Editor) -> Result {
        if let Some(backup) = &self.backup {
            editor.check_id(Some(backup.id))?;
            if !editor.set_selection(backup.selection.clone()) {
                return Err(Error::InvalidTarget("selection no longer fits".into()));
            }
            self.backup = None;
        }
        Ok(())
    }
}

impl Display for Select {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "select {}..{}", self.range.start, self.range.end)
    }
}

/// Copies the selection to the clipboard.
///
/// The text is not changed so the command is never recorded.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Copy;

impl Command for Copy {
    type Target = Editor;

    fn execute(&mut self, editor: &mut Editor) -> bool {
        let selected = editor.selected().to_string();
        editor.set_clipboard(selected);
        false
    }

    fn undo(&mut self, _: &mut Editor) -> Result {
        Ok(())
    }
}

impl Display for Copy {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str("copy")
    }
}

/// Moves the selection to the clipboard.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Cut {
    backup: Option<EditorSnapshot>,
}

impl Command for Cut {
    type Target = Editor;

    fn execute(&mut self, editor: &mut Editor) -> bool {
        if editor.selection().is_empty() {
            return false;
        }
        self.backup = Some(editor.save());
        let selected = editor.selected().to_string();
        editor.set_clipboard(selected);
        editor.delete_selection();
        true
    }

    fn undo(&mut self, editor: &mut Editor) -> Result {
        restore(&mut self.backup, editor)
    }
}

impl Display for Cut {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str("cut")
    }
}

/// Replaces the selection with the clipboard contents.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Paste {
    backup: Option<EditorSnapshot>,
}

impl Command for Paste {
    type Target = Editor;

    fn execute(&mut self, editor: &mut Editor) -> bool {
        if editor.clipboard().is_empty() {
            return false;
        }
        self.backup = Some(editor.save());
        let clipboard = editor.clipboard().to_string();
        editor.replace_selection(&clipboard);
        true
    }

    fn undo(&mut self, editor: &mut Editor) -> Result {
        restore(&mut self.backup, editor)
    }
}

impl Display for Paste {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str("paste")
    }
}

// The backup is kept when restoring fails so the caller can retry on the right editor.
fn restore(backup: &mut Option<EditorSnapshot>, editor: &mut Editor) -> Result {
    if let Some(snapshot) = backup.as_ref() {
        editor.restore(snapshot)?;
        *backup = None;
    }
    Ok(())
}

/// Any of the editor commands.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Edit {
    /// See [`Append`].
    Append(Append),
    /// See [`Select`].
    Select(Select),
    /// See [`Copy`].
    Copy(Copy),
    /// See [`Cut`].
    Cut(Cut),
    /// See [`Paste`].
    Paste(Paste),
}

impl Command for Edit {
    type Target = Editor;

    fn execute(&mut self, editor: &mut Editor) -> bool {
        match self {
            Edit::Append(c) => c.execute(editor),
            Edit::Select(c) => c.execute(editor),
            Edit::Copy(c) => c.execute(editor),
            Edit::Cut(c) => c.execute(editor),
            Edit::Paste(c) => c.execute(editor),
        }
    }

    fn undo(&mut self, editor: &mut Editor) -> Result {
        match self {
            Edit::Append(c) => c.undo(editor),
            Edit::Select(c) => c.undo(editor),
            Edit::Copy(c) => c.undo(editor),
            Edit::Cut(c) => c.undo(editor),
            Edit::Paste(c) => c.undo(editor),
        }
    }
}

impl Display for Edit {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Edit::Append(c) => Display::fmt(c, f),
            Edit::Select(c) => Display::fmt(c, f),
            Edit::Copy(c) => Display::fmt(c, f),
            Edit::Cut(c) => Display::fmt(c, f),
            Edit::Paste(c) => Display::fmt(c, f),
        }
    }
}

impl From<Append> for Edit {
    fn from(c: Append) -> Self {
        Edit::Append(c)
    }
}

impl From<Select> for Edit {
    fn from(c: Select) -> Self {
        Edit::Select(c)
    }
}

impl From<Copy> for Edit {
    fn from(c: Copy) -> Self {
        Edit::Copy(c)
    }
}

impl From<Cut> for Edit {
    fn from(c: Cut) -> Self {
        Edit::Cut(c)
    }
}

impl From<Paste> for Edit {
    fn from(c: Paste) -> Self {
        Edit::Paste(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Invoker;

    #[test]
    fn copy_is_not_recorded() {
        let mut editor = Editor::from("abc");
        let mut invoker: Invoker<Edit> = Invoker::new();
        assert!(invoker.run(&mut editor, Select::new(1..3).into()));
        assert!(!invoker.run(&mut editor, Copy.into()));
        assert_eq!(editor.clipboard(), "bc");
        assert_eq!(invoker.len(), 1);
    }

    #[test]
    fn cut_and_paste() {
        crate::tests::init_logger();
        let mut editor = Editor::from("abcd");
        let mut invoker: Invoker<Edit> = Invoker::new();
        invoker.run(&mut editor, Select::new(0..2).into());
        invoker.run(&mut editor, Cut::default().into());
        assert_eq!(editor.text(), "cd");
        assert_eq!(editor.clipboard(), "ab");
        assert_eq!(editor.selection(), 0..0);
        invoker.run(&mut editor, Paste::default().into());
        invoker.run(&mut editor, Paste::default().into());
        assert_eq!(editor.text(), "ababcd");
        invoker.undo_last(&mut editor).unwrap().unwrap();
        assert_eq!(editor.text(), "abcd");
        invoker.undo_last(&mut editor).unwrap().unwrap();
        invoker.undo_last(&mut editor).unwrap().unwrap();
        assert_eq!(editor.text(), "abcd");
        assert_eq!(editor.selection(), 0..2);
        invoker.redo_last(&mut editor).unwrap().unwrap();
        assert_eq!(editor.text(), "cd");
    }

    #[test]
    fn rejected_input() {
        let mut editor = Editor::from("é");
        let mut invoker: Invoker<Edit> = Invoker::new();
        assert!(!invoker.run(&mut editor, Select::new(0..1).into()));
        assert!(!invoker.run(&mut editor, Select::new(0..9).into()));
        assert!(!invoker.run(&mut editor, Cut::default().into()));
        assert!(!invoker.run(&mut editor, Paste::default().into()));
        assert!(!invoker.run(&mut editor, Append::new("").into()));
        assert!(invoker.is_empty());
        assert_eq!(editor.text(), "é");
    }

    #[test]
    fn replaced_editor() {
        let mut editor = Editor::from("ab");
        let mut invoker: Invoker<Edit> = Invoker::new();
        invoker.run(&mut editor, Append::new("c").into());
        invoker.run(&mut editor, Select::new(0..1).into());
        invoker.run(&mut editor, Cut::default().into());
        let mut replacement = Editor::from(editor.text());
        let err = invoker.undo_last(&mut replacement).unwrap().unwrap_err();
        assert!(matches!(err, Error::InvalidTarget(_)));
        assert_eq!(replacement.text(), "bc");
        assert_eq!(invoker.len(), 2);
    }

    #[test]
    fn clone_keeps_identity() {
        let editor = Editor::from("a");
        let mut copy = editor.clone();
        assert_eq!(editor.id(), copy.id());
        assert_ne!(editor.id(), Editor::new().id());
        copy.set_text("b");
        copy.restore(&editor.save()).unwrap();
        assert_eq!(copy, editor);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialize_checks_selection() {
        let editor: Editor =
            serde_json::from_str(r#"{"text":"héllo","selection":[0,3],"clipboard":"x"}"#).unwrap();
        assert_eq!(editor.selected(), "hé");
        assert_eq!(editor.clipboard(), "x");
        assert_ne!(editor.id(), Editor::new().id());

        let out_of_bounds = r#"{"text":"ab","selection":[1,5],"clipboard":""}"#;
        assert!(serde_json::from_str::<Editor>(out_of_bounds).is_err());
        let inside_char = r#"{"text":"é","selection":[0,1],"clipboard":""}"#;
        assert!(serde_json::from_str::<Editor>(inside_char).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serialized_editor_is_a_new_document() {
        let mut editor = Editor::from("abc");
        editor.set_selection(1..2);
        let json = serde_json::to_string(&editor).unwrap();
        assert!(!json.contains("\"id\""));
        let copy: Editor = serde_json::from_str(&json).unwrap();
        assert_eq!(copy.text(), "abc");
        assert_eq!(copy.selection(), 1..2);
        assert_ne!(copy.id(), editor.id());
    }

    #[test]
    fn restore_rejects_invalid_snapshot() {
        let mut editor = Editor::from("é");
        let mut snapshot = editor.save();
        snapshot.selection = 0..1;
        assert!(matches!(editor.restore(&snapshot), Err(Error::InvalidTarget(_))));
        assert_eq!(editor.selection(), 2..2);
    }

    #[test]
    fn display() {
        assert_eq!(Edit::from(Append::new("x")).to_string(), "append `x`");
        assert_eq!(Edit::from(Select::new(1..2)).to_string(), "select 1..2");
        assert_eq!(Edit::from(Cut::default()).to_string(), "cut");
    }
}
