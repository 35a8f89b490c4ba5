use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use super::graph::{NodeSet, ParsedGraph};

static NODE_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""([^"]+)"\s*\[label="([^"]+)"\]"#).expect("node pattern is valid")
});

static EDGE_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""([^"]+)"\s*->\s*"([^"]+)""#).expect("edge pattern is valid")
});

enum Statement<'a> {
    Node { id: &'a str, label: &'a str },
    Edge { from: &'a str, to: &'a str },
}

fn classify_line(line: &str) -> Option<Statement<'_>> {
    if let Some(captures) = NODE_DECL.captures(line) {
        let (_, [id, label]) = captures.extract();
        return Some(Statement::Node { id, label });
    }

    EDGE_DECL.captures(line).map(|captures| {
        let (_, [from, to]) = captures.extract();
        Statement::Edge { from, to }
    })
}

/// Parses the node and edge statements of a DOT-like call graph.
///
/// Anything that is not a node or edge statement is skipped. Edges are
/// resolved after every node line has been seen, so forward references work;
/// edges naming an id that never gets declared are dropped.
pub fn parse_graph(text: &str) -> ParsedGraph {
    let mut nodes = NodeSet::new();
    let mut pending_edges = Vec::new();

    for line in text.lines() {
        match classify_line(line) {
            Some(Statement::Node { id, label }) => {
                nodes.upsert(id, label);
            }
            Some(Statement::Edge { from, to }) => pending_edges.push((from, to)),
            None => {}
        }
    }

    let mut edges = Vec::with_capacity(pending_edges.len());
    let mut dropped_edges = 0usize;
    for (from, to) in pending_edges {
        match (nodes.index_of(from), nodes.index_of(to)) {
            (Some(from), Some(to)) => edges.push((from, to)),
            _ => dropped_edges += 1,
        }
    }

    debug!(
        "parsed call graph: {} nodes, {} edges, {} dangling edges dropped",
        nodes.len(),
        edges.len(),
        dropped_edges
    );

    ParsedGraph {
        nodes,
        edges,
        dropped_edges,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label<'a>(graph: &'a ParsedGraph, id: &str) -> Option<&'a str> {
        let index = graph.nodes.index_of(id)?;
        graph.nodes.by_index(index).map(|node| node.label.as_str())
    }

    #[test]
    fn parses_nodes_and_edges() {
        let graph = parse_graph("\"a\" [label=\"main\"];\n\"b\" [label=\"helper\"];\n\"a\" -> \"b\";");

        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.nodes.index_of("a"), Some(0));
        assert_eq!(graph.nodes.index_of("b"), Some(1));
        assert_eq!(graph.edges, vec![(0, 1)]);
        assert_eq!(graph.dropped_edges, 0);
    }

    #[test]
    fn captures_ids_and_labels_verbatim() {
        let graph = parse_graph(
            "  \"crate::app::<impl Foo for Bar>::run\"   [label=\"run [hot] -> cold\"];",
        );

        assert_eq!(
            label(&graph, "crate::app::<impl Foo for Bar>::run"),
            Some("run [hot] -> cold")
        );
        assert!(graph.edges.is_empty());
    }

    #[test]
    fn node_pattern_wins_over_edge_pattern() {
        // Both shapes appear on one line; only the node is taken.
        let graph = parse_graph("\"a\" [label=\"x\"] \"a\" -> \"a\";");
        assert_eq!(graph.nodes.len(), 1);
        assert!(graph.edges.is_empty());
        assert_eq!(graph.dropped_edges, 0);
    }

    #[test]
    fn last_label_wins_without_moving_slot() {
        let graph = parse_graph(
            "\"a\" [label=\"old\"];\n\"b\" [label=\"b\"];\n\"a\" [label=\"new\"];",
        );

        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.nodes.index_of("a"), Some(0));
        assert_eq!(label(&graph, "a"), Some("new"));
    }

    #[test]
    fn edges_resolve_forward_references() {
        let graph = parse_graph("\"a\" -> \"b\";\n\"a\" [label=\"a\"];\n\"b\" [label=\"b\"];");
        assert_eq!(graph.edges, vec![(0, 1)]);
    }

    #[test]
    fn dangling_edges_are_dropped() {
        let graph = parse_graph("\"a\" [label=\"a\"];\n\"a\" -> \"ghost\";\n\"ghost\" -> \"a\";");
        assert!(graph.edges.is_empty());
        assert_eq!(graph.dropped_edges, 2);
    }

    #[test]
    fn repeated_edges_are_kept() {
        let graph = parse_graph(
            "\"a\" [label=\"a\"];\n\"b\" [label=\"b\"];\n\"a\" -> \"b\";\n\"a\" -> \"b\";",
        );
        assert_eq!(graph.edges, vec![(0, 1), (0, 1)]);
    }

    #[test]
    fn ignores_malformed_lines() {
        let text = "digraph G {\n  rankdir=LR;\n  node [shape=box];\n  \"a\" [label=\"a\"];\n  \"\" -> \"a\";\n  a -> b;\n}\n";
        let graph = parse_graph(text);
        assert_eq!(graph.nodes.len(), 1);
        assert!(graph.edges.is_empty());
        assert_eq!(graph.dropped_edges, 0);
    }

    #[test]
    fn accepts_crlf_line_endings() {
        let graph = parse_graph("\"a\" [label=\"a\"];\r\n\"b\" [label=\"b\"];\r\n\"a\" -> \"b\";\r\n");
        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.edges.len(), 1);
    }

    #[test]
    fn counts_match_declarations() {
        let mut text = String::new();
        for index in 0..12 {
            text.push_str(&format!("\"n{index}\" [label=\"fn_{index}\"];\n"));
        }
        // Redeclarations do not add nodes.
        text.push_str("\"n3\" [label=\"renamed\"];\n");
        for index in 0..12 {
            text.push_str(&format!("\"n{index}\" -> \"n{}\";\n", (index + 1) % 14));
        }

        let graph = parse_graph(&text);
        assert_eq!(graph.nodes.len(), 12);
        // n10 -> n11 resolves, n11 -> n12 does not; n12 and n13 never exist.
        assert_eq!(graph.edges.len(), 11);
        assert_eq!(graph.dropped_edges, 1);
    }

    #[test]
    fn empty_input_has_no_nodes() {
        let graph = parse_graph("");
        assert!(graph.nodes.is_empty());
        assert!(graph.edges.is_empty());
    }
}
