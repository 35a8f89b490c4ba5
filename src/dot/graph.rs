use std::collections::HashMap;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
}

/// Nodes in first-seen order with an id lookup index.
///
/// Slot order is what the grid layout walks, so it must never depend on
/// hashing. `index_by_id` only answers "where is this id".
#[derive(Clone, Debug, Default)]
pub struct NodeSet {
    nodes: Vec<GraphNode>,
    index_by_id: HashMap<String, usize>,
}

impl NodeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a node or relabels an existing one. The slot of an existing id
    /// is kept.
    pub fn upsert(&mut self, id: &str, label: &str) -> usize {
        if let Some(&index) = self.index_by_id.get(id) {
            self.nodes[index].label = label.to_owned();
            return index;
        }

        let index = self.nodes.len();
        self.nodes.push(GraphNode {
            id: id.to_owned(),
            label: label.to_owned(),
        });
        self.index_by_id.insert(id.to_owned(), index);
        index
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index_by_id.get(id).copied()
    }

    pub fn by_index(&self, index: usize) -> Option<&GraphNode> {
        self.nodes.get(index)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.iter()
    }
}

#[derive(Clone, Debug, Default)]
pub struct ParsedGraph {
    pub nodes: NodeSet,
    /// Edges whose endpoints both resolved, in file order.
    pub edges: Vec<(usize, usize)>,
    pub dropped_edges: usize,
}
