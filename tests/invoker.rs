use rewind::editor::{Append, Copy, Cut, Edit, Editor, Paste, Select};
use rewind::{Error, Invoker, Signal};
use std::sync::mpsc;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn append_then_undo() {
    init_logger();
    let mut editor = Editor::new();
    let mut invoker = Invoker::new();
    assert!(invoker.run(&mut editor, Append::new("a")));
    assert!(invoker.run(&mut editor, Append::new("b")));
    assert_eq!(editor.text(), "ab");
    assert_eq!(invoker.len(), 2);

    invoker.undo_last(&mut editor).unwrap().unwrap();
    assert_eq!(editor.text(), "a");
    assert_eq!(invoker.len(), 1);
    invoker.undo_last(&mut editor).unwrap().unwrap();
    assert_eq!(editor.text(), "");
    assert!(invoker.undo_last(&mut editor).is_none());
    assert_eq!(editor.text(), "");
}

#[test]
fn append_to_existing_text() {
    init_logger();
    let mut editor = Editor::from("ab");
    let mut invoker = Invoker::new();
    assert!(invoker.run(&mut editor, Append::new("c")));
    assert!(invoker.run(&mut editor, Append::new("d")));
    assert_eq!(editor.text(), "abcd");

    invoker.undo_last(&mut editor).unwrap().unwrap();
    assert_eq!(editor.text(), "abc");
    invoker.undo_last(&mut editor).unwrap().unwrap();
    assert_eq!(editor.text(), "ab");
    assert!(invoker.undo_last(&mut editor).is_none());
    assert_eq!(editor.text(), "ab");
    assert!(invoker.is_empty());
}

#[test]
fn copy_on_empty_history() {
    init_logger();
    let mut editor = Editor::from("text");
    editor.set_selection(0..2);
    let mut invoker: Invoker<Edit> = Invoker::new();
    assert!(!invoker.run(&mut editor, Copy.into()));
    assert!(invoker.is_empty());
    assert!(!invoker.can_undo());
    assert!(invoker.is_saved());
    assert_eq!(editor.clipboard(), "te");
    assert!(invoker.undo_last(&mut editor).is_none());
    assert_eq!(editor.text(), "text");
}

#[test]
fn copy_is_never_recorded() {
    init_logger();
    let mut editor = Editor::from("hello");
    let mut invoker: Invoker<Edit> = Invoker::new();
    assert!(invoker.run(&mut editor, Select::new(0..4).into()));
    assert_eq!(invoker.len(), 1);
    assert!(!invoker.run(&mut editor, Copy.into()));
    assert_eq!(invoker.len(), 1);
    assert_eq!(editor.clipboard(), "hell");
    assert_eq!(invoker.undo_text().as_deref(), Some("select 0..4"));
}

#[test]
fn undo_runs_in_reverse_order() {
    init_logger();
    let mut editor = Editor::new();
    let mut invoker = Invoker::new();
    invoker.run(&mut editor, Append::new("1"));
    invoker.run(&mut editor, Append::new("2"));
    invoker.run(&mut editor, Append::new("3"));
    assert_eq!(invoker.undo_text().as_deref(), Some("append `3`"));
    invoker.undo_last(&mut editor).unwrap().unwrap();
    assert_eq!(invoker.undo_text().as_deref(), Some("append `2`"));
    invoker.undo_last(&mut editor).unwrap().unwrap();
    assert_eq!(editor.text(), "1");
}

#[test]
fn full_round_trip() {
    init_logger();
    let mut editor = Editor::from("start ");
    let mut invoker: Invoker<Edit> = Invoker::new();
    let commands: Vec<Edit> = vec![
        Append::new("one two").into(),
        Select::new(6..9).into(),
        Cut::default().into(),
        Select::new(0..0).into(),
        Paste::default().into(),
        Append::new("!").into(),
    ];
    for command in commands {
        assert!(invoker.run(&mut editor, command));
    }
    assert_eq!(editor.text(), "onestart  two!");
    assert_eq!(invoker.len(), 6);

    while let Some(result) = invoker.undo_last(&mut editor) {
        result.unwrap();
    }
    assert_eq!(editor.text(), "start ");
    assert_eq!(editor.selection(), 6..6);
    assert_eq!(invoker.redo_len(), 6);

    while let Some(result) = invoker.redo_last(&mut editor) {
        result.unwrap();
    }
    assert_eq!(editor.text(), "onestart  two!");
}

#[test]
fn undo_on_replaced_editor() {
    init_logger();
    let mut editor = Editor::new();
    let mut invoker = Invoker::new();
    invoker.run(&mut editor, Append::new("a"));
    let mut other = Editor::from("a");
    let err = invoker.undo_last(&mut other).unwrap().unwrap_err();
    assert!(matches!(err, Error::InvalidTarget(_)));
    assert_eq!(other.text(), "a");
    assert!(invoker.is_empty());
}

#[test]
fn new_command_drops_redo() {
    init_logger();
    let mut editor = Editor::new();
    let mut invoker = Invoker::new();
    invoker.run(&mut editor, Append::new("a"));
    invoker.run(&mut editor, Append::new("b"));
    invoker.undo_last(&mut editor).unwrap().unwrap();
    assert!(invoker.can_redo());
    invoker.run(&mut editor, Append::new("c"));
    assert!(!invoker.can_redo());
    assert!(invoker.redo_last(&mut editor).is_none());
    assert_eq!(editor.text(), "ac");
}

#[test]
fn go_to() {
    init_logger();
    let mut editor = Editor::new();
    let mut invoker = Invoker::new();
    for s in ["a", "b", "c", "d", "e"] {
        invoker.run(&mut editor, Append::new(s));
    }
    invoker.go_to(&mut editor, 0).unwrap().unwrap();
    assert_eq!(invoker.head(), 0);
    assert_eq!(editor.text(), "");
    invoker.go_to(&mut editor, 5).unwrap().unwrap();
    assert_eq!(editor.text(), "abcde");
    invoker.go_to(&mut editor, 2).unwrap().unwrap();
    assert_eq!(editor.text(), "ab");
    invoker.go_to(&mut editor, 4).unwrap().unwrap();
    assert_eq!(editor.text(), "abcd");
    assert!(invoker.go_to(&mut editor, 6).is_none());
    assert_eq!(invoker.head(), 4);
}

#[test]
fn signals_over_channel() {
    init_logger();
    let (sender, receiver) = mpsc::channel::<Signal>();
    let mut editor = Editor::new();
    let mut invoker = Invoker::builder().connect(sender).build();
    invoker.run(&mut editor, Append::new("a"));
    invoker.undo_last(&mut editor).unwrap().unwrap();
    let signals: Vec<_> = receiver.try_iter().collect();
    assert_eq!(
        signals,
        [
            Signal::Undo(true),
            Signal::Saved(false),
            Signal::Undo(false),
            Signal::Redo(true),
            Signal::Saved(true),
        ]
    );
}
