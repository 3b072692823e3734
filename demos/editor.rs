use rewind::editor::{Append, Copy, Cut, Edit, Editor, Paste, Select};
use rewind::{Invoker, Signal};

fn main() {
    env_logger::init();

    let mut editor = Editor::new();
    let mut invoker: Invoker<Edit, _> = Invoker::builder()
        .limit(16)
        .connect(|signal: Signal| println!("signal: {:?}", signal))
        .build();

    let commands: Vec<Edit> = vec![
        Append::new("Hello, world").into(),
        Select::new(0..5).into(),
        Copy.into(),
        Select::new(7..12).into(),
        Cut::default().into(),
        Paste::default().into(),
        Append::new("!").into(),
    ];
    for command in commands {
        let label = command.to_string();
        if !invoker.run(&mut editor, command) {
            println!("{} did not change the text", label);
        }
    }
    println!("text: {:?}", editor.text());
    println!("{}", invoker.display());

    invoker.set_saved(true);
    while let Some(result) = invoker.undo_last(&mut editor) {
        if let Err(err) = result {
            eprintln!("undo failed: {}", err);
            break;
        }
        println!("undo -> {:?}", editor.text());
    }
    println!("{}", invoker.display());

    if let Some(Err(err)) = invoker.revert(&mut editor) {
        eprintln!("revert failed: {}", err);
    }
    println!("reverted: {:?}", editor.text());
}
