use rewind::editor::{Append, Copy, Editor};
use rewind::{Command, History};

#[test]
fn pops_in_reverse_order() {
    let mut history = History::new();
    assert!(history.is_empty());
    history.push("c1");
    history.push("c2");
    history.push("c3");
    assert_eq!(history.len(), 3);
    assert_eq!(history.pop(), Some("c3"));
    assert_eq!(history.pop(), Some("c2"));
    assert_eq!(history.len(), 1);
    assert_eq!(history.pop(), Some("c1"));
    assert_eq!(history.pop(), None);
    assert_eq!(history.peek(), None);
}

#[test]
fn peek_does_not_remove() {
    let mut history = History::new();
    history.push(1);
    history.push(2);
    assert_eq!(history.peek(), Some(&2));
    assert_eq!(history.peek(), Some(&2));
    assert_eq!(history.len(), 2);
}

#[test]
fn manual_undo() {
    let mut editor = Editor::new();
    let mut history = History::new();
    for s in ["x", "y", "z"] {
        let mut append = Append::new(s);
        if append.execute(&mut editor) {
            history.push(append);
        }
    }
    assert_eq!(editor.text(), "xyz");
    while let Some(mut append) = history.pop() {
        append.undo(&mut editor).unwrap();
    }
    assert_eq!(editor.text(), "");
}

#[test]
fn only_changes_are_pushed() {
    let mut editor = Editor::from("abc");
    let mut history = History::new();
    let mut copy = Copy;
    if copy.execute(&mut editor) {
        history.push(copy);
    }
    assert!(history.is_empty());

    history.push(Copy);
    let mut copy = Copy;
    if copy.execute(&mut editor) {
        history.push(copy);
    }
    assert_eq!(history.len(), 1);
}
