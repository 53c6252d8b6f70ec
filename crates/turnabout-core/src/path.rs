/*!
# Ancestor Path Resolution

Finds the constructs enclosing a cursor or selection, innermost first, with
one entry per syntactic kind.
*/

use std::collections::HashSet;

use tree_sitter::Node;

use crate::parser::{ByteRange, Document};

/// Distinct enclosing kinds around a range, innermost first
#[derive(Debug, Clone, Default)]
pub struct TypePath<'tree> {
    nodes: Vec<Node<'tree>>,
}

impl<'tree> TypePath<'tree> {
    pub fn nodes(&self) -> &[Node<'tree>] {
        &self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Kinds along the path, innermost first
    pub fn kinds(&self) -> Vec<&'static str> {
        self.nodes.iter().map(|node| node.kind()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = Node<'tree>> + '_ {
        self.nodes.iter().copied()
    }
}

/// Resolve the deduplicated type path for `range` in `document`
pub fn resolve_path(document: &Document, range: ByteRange) -> TypePath<'_> {
    if range.end > document.source().len() {
        return TypePath::default();
    }
    let chain = ancestor_chain(document.root(), range);
    let path = TypePath {
        nodes: dedup_by_kind(&chain),
    };
    tracing::trace!(?range, kinds = ?path.kinds(), "resolved type path");
    path
}

/// Chain from `root` down to the smallest node covering `range`, root first.
///
/// Narrowing descends into the first child (named or not) that fully
/// contains the range. The root stands for the whole document, including
/// surrounding whitespace it does not span. Empty if the range is inverted.
pub fn ancestor_chain(root: Node<'_>, range: ByteRange) -> Vec<Node<'_>> {
    if range.start > range.end {
        return Vec::new();
    }

    let mut chain = vec![root];
    let mut node = root;
    loop {
        let mut cursor = node.walk();
        let covering = node
            .children(&mut cursor)
            .find(|child| ByteRange::of(*child).contains(range));
        match covering {
            Some(child) => {
                chain.push(child);
                node = child;
            }
            None => break,
        }
    }
    chain
}

/// Keep the innermost node of each kind, ordered leaf to root
pub fn dedup_by_kind<'tree>(chain: &[Node<'tree>]) -> Vec<Node<'tree>> {
    let mut seen = HashSet::new();
    chain
        .iter()
        .rev()
        .filter(|node| seen.insert(node.kind()))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Dialect;

    fn doc(source: &str) -> Document {
        Document::parse(source, Dialect::JavaScript).unwrap()
    }

    #[test]
    fn test_chain_is_root_first() {
        let doc = doc("while (x) { a = 1 }");
        let offset = doc.source().find("a =").unwrap();
        let chain = ancestor_chain(doc.root(), ByteRange::cursor(offset));

        assert_eq!(chain.first().unwrap().kind(), "program");
        assert_eq!(chain.last().unwrap().kind(), "identifier");
        let kinds: Vec<_> = chain.iter().map(|n| n.kind()).collect();
        assert!(kinds.contains(&"while_statement"));
        assert!(kinds.contains(&"assignment_expression"));
    }

    #[test]
    fn test_dedup_keeps_innermost() {
        let doc = doc("a + b + c;");
        let chain = ancestor_chain(doc.root(), ByteRange::cursor(0));
        let binaries: Vec<_> = chain.iter().filter(|n| n.kind() == "binary_expression").collect();
        assert_eq!(binaries.len(), 2);

        let path = resolve_path(&doc, ByteRange::cursor(0));
        let kept: Vec<_> = path.iter().filter(|n| n.kind() == "binary_expression").collect();
        assert_eq!(kept.len(), 1);
        assert_eq!(doc.text(kept[0]), "a + b");
    }

    #[test]
    fn test_path_is_innermost_first() {
        let doc = doc("while (x) { if (y) { z() } }");
        let offset = doc.source().find("z()").unwrap();
        let kinds = resolve_path(&doc, ByteRange::cursor(offset)).kinds();

        let if_pos = kinds.iter().position(|k| *k == "if_statement").unwrap();
        let while_pos = kinds.iter().position(|k| *k == "while_statement").unwrap();
        assert!(if_pos < while_pos);
        assert_eq!(kinds.last(), Some(&"program"));
    }

    #[test]
    fn test_selection_covering_two_statements() {
        let doc = doc("if (a) { b(); c() }");
        let start = doc.source().find("b()").unwrap();
        let end = doc.source().find("c()").unwrap() + 3;
        let path = resolve_path(&doc, ByteRange::new(start, end));
        assert_eq!(path.kinds().first(), Some(&"statement_block"));
    }

    #[test]
    fn test_out_of_bounds_range_is_empty() {
        let doc = doc("a;");
        assert!(resolve_path(&doc, ByteRange::new(0, 50)).is_empty());
        assert!(resolve_path(&doc, ByteRange::new(2, 1)).is_empty());
    }
}
