use std::collections::{HashMap, HashSet};

use anyhow::Result;
use pretty_assertions::assert_eq;
use tree_sitter::Node;
use turnabout_core::{
    syntax, ByteRange, Dialect, Document, Engine, EngineConfig, Registry, Replacement,
};

const MIXED: &str = r#"
function handler(req) {
  var status, body = `hi ${req.user}`;
  if (req.method == 'GET') { send(body) } else if (req.method == 'PUT') { status = 201 } else { status = 405 }
  ready || (finish(), log('done'));
  do { step() } while (pending > 0)
  const pick = (x) => x ? first(x) : fallback;
  return status ? 'ok' : 'failed' + status;
}
"#;

const LOOKALIKES: &str = r#"
while (n) { n-- }
say`tagged ${n}`;
x = function named() { return this };
export const a = 1, b = 2;
for (let i = 0, j = 1; i < j; i++) {}
outer: switch (k) { case 1: break outer }
class C { m() { return () => super.m() } }
y = p ? q : r;
"#;

const BROKEN: &str = "if (a { b() } else c ? : d;\nwhile (x) { `t${ }` }\nconst = => ;";

#[test]
fn test_path_kinds_are_distinct_and_innermost_first() -> Result<()> {
    let doc = Document::parse(MIXED, Dialect::JavaScript)?;
    let engine = Engine::default();
    let offset = MIXED.find("status = 201").unwrap_or(0);
    let path = engine.path_at(&doc, ByteRange::cursor(offset));

    let kinds = path.kinds();
    let distinct: HashSet<_> = kinds.iter().collect();
    assert_eq!(distinct.len(), kinds.len());
    assert_eq!(kinds.last(), Some(&"program"));

    let nodes = path.nodes();
    for pair in nodes.windows(2) {
        assert!(pair[1].start_byte() <= pair[0].start_byte());
        assert!(pair[1].end_byte() >= pair[0].end_byte());
    }
    Ok(())
}

#[test]
fn test_actions_run_innermost_first() -> Result<()> {
    let source = "while (go) { if (a) { b() } }";
    let doc = Document::parse(source, Dialect::JavaScript)?;
    let titles: Vec<_> = Engine::default()
        .actions_at(&doc, ByteRange::cursor(source.find("b()").unwrap_or(0)))
        .iter()
        .map(|a| a.title().to_string())
        .collect();

    let first_if = titles.iter().position(|t| t.ends_with("(if_statement)"));
    let first_while = titles.iter().position(|t| t.ends_with("(while_statement)"));
    assert!(first_if.is_some() && first_while.is_some());
    assert!(first_if < first_while);
    assert_eq!(titles.first().map(String::as_str), Some("wrap_in_cast(call_expression)"));
    Ok(())
}

#[test]
fn test_discovery_is_deterministic() -> Result<()> {
    let doc = Document::parse(MIXED, Dialect::JavaScript)?;
    let engine = Engine::default();
    for needle in ["status = 201", "finish", "step", "first(x)", "'failed'"] {
        let range = ByteRange::cursor(MIXED.find(needle).unwrap_or(0));
        let once: Vec<_> = engine.actions_at(&doc, range).iter().map(|a| a.apply()).collect();
        let twice: Vec<_> = engine.actions_at(&doc, range).iter().map(|a| a.apply()).collect();
        assert_eq!(once, twice, "at {needle:?}");
    }
    Ok(())
}

#[test]
fn test_every_offset_materializes_without_panicking() -> Result<()> {
    let engine = Engine::default();
    for source in [MIXED, BROKEN] {
        let doc = Document::parse(source, Dialect::JavaScript)?;
        let before = syntax::error_count(doc.root());
        for offset in 0..=source.len() {
            for action in engine.actions_at(&doc, ByteRange::cursor(offset)) {
                let Some(edit) = action.apply() else {
                    continue;
                };
                assert_eq!(edit.range, ByteRange::of(action.target()));
                if let Replacement::Text(_) = edit.replacement {
                    let after = Document::parse(edit.apply_to(source), Dialect::JavaScript)?;
                    assert!(
                        syntax::error_count(after.root()) <= before,
                        "{} broke the document at {offset}",
                        action.title()
                    );
                }
            }
        }
    }
    Ok(())
}

#[test]
fn test_broken_targets_are_declined() -> Result<()> {
    let doc = Document::parse(BROKEN, Dialect::JavaScript)?;
    let engine = Engine::new(EngineConfig {
        verify_output: false,
        ..Default::default()
    });
    for offset in 0..=BROKEN.len() {
        for action in engine.actions_at(&doc, ByteRange::cursor(offset)) {
            if action.target().has_error() {
                assert!(action.apply().is_none(), "{} ran on a broken node", action.title());
            }
        }
    }
    Ok(())
}

#[test]
fn test_positions_match_byte_ranges() -> Result<()> {
    let source = "let a = 1;\nx = a ? b : c;\n";
    let doc = Document::parse(source, Dialect::JavaScript)?;
    let engine = Engine::default();
    let at_positions = engine.actions_at_positions(
        &doc,
        turnabout_core::Position::new(1, 8),
        turnabout_core::Position::new(1, 8),
    )?;
    let at_offset = engine.actions_at(&doc, ByteRange::cursor(source.find('b').unwrap_or(0)));

    let titles = |actions: &[turnabout_core::CandidateAction<'_>]| -> Vec<String> {
        actions.iter().map(|a| a.title().to_string()).collect()
    };
    assert_eq!(titles(&at_positions), titles(&at_offset));
    Ok(())
}

fn all_nodes<'t>(node: Node<'t>, out: &mut Vec<Node<'t>>) {
    out.push(node);
    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    for child in children {
        all_nodes(child, out);
    }
}

#[test]
fn test_transforms_decline_nodes_of_other_kinds() -> Result<()> {
    let registry = Registry::standard();
    let mut accepted: HashMap<&str, HashSet<&str>> = HashMap::new();
    for kind in registry.kinds() {
        for transform in registry.transforms_for(kind) {
            accepted.entry(transform.name).or_default().insert(kind);
        }
    }

    for source in [MIXED, LOOKALIKES] {
        let doc = Document::parse(source, Dialect::JavaScript)?;
        assert!(!doc.root().has_error());
        let mut nodes = Vec::new();
        all_nodes(doc.root(), &mut nodes);

        for node in nodes {
            for kind in registry.kinds() {
                for transform in registry.transforms_for(kind) {
                    let result = (transform.apply)(node, source);
                    if !accepted[transform.name].contains(node.kind()) {
                        assert!(result.is_none(), "{}({}) produced {result:?}", transform.name, node.kind());
                    }
                }
            }
            for transform in registry.generic_transforms() {
                let result = (transform.apply)(node, source);
                if !Registry::is_expression_shaped(node.kind()) {
                    assert!(result.is_none(), "{}({}) produced {result:?}", transform.name, node.kind());
                }
            }
        }
    }
    Ok(())
}
