use pretty_assertions::assert_eq;
use tempfile::TempDir;
use turnabout_core::{Dialect, Engine, Position};
use turnabout_repl::repl::{Repl, ReplCommand};

fn index_of(repl: &Repl, transform: &str) -> usize {
    repl.actions()
        .unwrap()
        .iter()
        .find(|action| action.transform == transform)
        .map(|action| action.index)
        .unwrap_or_else(|| panic!("{transform} not offered"))
}

#[test]
fn test_load_apply_write() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("app.js");
    std::fs::write(&path, "var ac, b = 3\n").unwrap();

    let mut repl = Repl::new(Engine::default());
    let loaded = repl.load_file(&path, None).unwrap();
    assert!(loaded.contains("javascript"));

    let index = index_of(&repl, "split_declaration");
    repl.handle_command(ReplCommand::Apply(index)).unwrap();
    assert_eq!(repl.source(), Some("var ac\nvar b = 3\n"));

    let result = repl.handle_command(ReplCommand::Write(None)).unwrap();
    assert!(result.starts_with("Wrote"));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "var ac\nvar b = 3\n");
}

#[test]
fn test_write_to_another_path() {
    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path().join("out.js");

    let mut repl = Repl::new(Engine::default());
    repl.load_source("do { step() } while (n)", Dialect::JavaScript)
        .unwrap();
    assert!(repl.handle_command(ReplCommand::Write(None)).is_err());

    let index = index_of(&repl, "do_while_to_while");
    repl.apply_action(index).unwrap();
    repl.handle_command(ReplCommand::Write(Some(out.display().to_string())))
        .unwrap();
    assert_eq!(std::fs::read_to_string(&out).unwrap(), "while (n) { step() }");
}

#[test]
fn test_dialect_follows_extension() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("cast.ts");
    std::fs::write(&path, "const n = value as number;\n").unwrap();

    let mut repl = Repl::new(Engine::default());
    let loaded = repl.load_file(&path, None).unwrap();
    assert!(loaded.contains("typescript"));
    assert!(!loaded.contains("syntax errors"));
}

#[test]
fn test_chained_rewrites() {
    let mut repl = Repl::new(Engine::default());
    repl.load_source("if (ready) { go(); log() }", Dialect::JavaScript)
        .unwrap();
    repl.set_selection(Position::new(0, 13), Position::new(0, 13));

    let index = index_of(&repl, "if_to_binary");
    repl.apply_action(index).unwrap();
    assert_eq!(repl.source(), Some("ready && (go(), log())"));

    repl.set_selection(Position::new(0, 0), Position::new(0, 0));
    let index = index_of(&repl, "binary_to_if");
    repl.apply_action(index).unwrap();
    assert_eq!(repl.source(), Some("if (ready) {\ngo()\nlog()\n}"));
}
