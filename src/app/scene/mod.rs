use std::collections::HashSet;

use eframe::egui::{Pos2, Rect};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::dot::{GraphNode, NodeSet};

mod build;
mod export;

pub use export::scene_to_json;

pub const INITIAL_MESSAGE: &str = "Open a call graph file\nto visualize it";
pub const NO_NODES_MESSAGE: &str = "No nodes found in the call graph";
pub const LABEL_FONT_SIZE: f32 = 13.0;
pub const PLACEHOLDER_FONT_SIZE: f32 = 16.0;

/// World-space draw commands for one scene. Built once per load and read by
/// the renderer every frame.
#[derive(Clone, Debug, Default)]
pub struct DrawList {
    pub edges: Vec<EdgeShape>,
    pub nodes: Vec<NodeShape>,
    pub placeholder: Option<PlaceholderShape>,
}

#[derive(Clone, Debug)]
pub struct EdgeShape {
    pub from: usize,
    pub to: usize,
    pub start: Pos2,
    pub end: Pos2,
    /// Tip first, then the two back corners.
    pub arrow: [Pos2; 3],
}

#[derive(Clone, Debug)]
pub struct NodeShape {
    pub slot: usize,
    pub rect: Rect,
    pub label: String,
}

#[derive(Clone, Debug)]
pub struct PlaceholderShape {
    pub message: String,
    pub center: Pos2,
    pub font_size: f32,
}

enum SceneContent {
    Placeholder {
        message: String,
    },
    Graph {
        nodes: NodeSet,
        edges: Vec<(usize, usize)>,
    },
}

pub struct SceneModel {
    content: SceneContent,
    draw_list: DrawList,
    content_bounds: Rect,
}

/// Borrowed view of one node in the current scene.
#[derive(Clone, Copy, Debug)]
pub struct SceneNode<'a> {
    pub id: &'a str,
    pub label: &'a str,
    pub display_label: &'a str,
    pub rect: Rect,
}

impl Default for SceneModel {
    fn default() -> Self {
        Self::placeholder(INITIAL_MESSAGE)
    }
}

impl SceneModel {
    pub fn is_placeholder(&self) -> bool {
        matches!(self.content, SceneContent::Placeholder { .. })
    }

    pub fn placeholder_message(&self) -> Option<&str> {
        match &self.content {
            SceneContent::Placeholder { message } => Some(message),
            SceneContent::Graph { .. } => None,
        }
    }

    pub fn node_count(&self) -> usize {
        match &self.content {
            SceneContent::Placeholder { .. } => 0,
            SceneContent::Graph { nodes, .. } => nodes.len(),
        }
    }

    pub fn edge_count(&self) -> usize {
        match &self.content {
            SceneContent::Placeholder { .. } => 0,
            SceneContent::Graph { edges, .. } => edges.len(),
        }
    }

    pub fn draw_list(&self) -> &DrawList {
        &self.draw_list
    }

    /// Bounding box of everything the scene draws, in world space.
    pub fn content_bounds(&self) -> Rect {
        self.content_bounds
    }

    pub fn node(&self, id: &str) -> Option<SceneNode<'_>> {
        let SceneContent::Graph { nodes, .. } = &self.content else {
            return None;
        };
        self.node_by_slot(nodes.index_of(id)?)
    }

    pub fn node_by_slot(&self, slot: usize) -> Option<SceneNode<'_>> {
        let SceneContent::Graph { nodes, .. } = &self.content else {
            return None;
        };
        let node = nodes.by_index(slot)?;
        let shape = self.draw_list.nodes.get(slot)?;
        Some(SceneNode {
            id: &node.id,
            label: &node.label,
            display_label: &shape.label,
            rect: shape.rect,
        })
    }

    pub fn nodes(&self) -> impl Iterator<Item = SceneNode<'_>> {
        (0..self.node_count()).filter_map(|slot| self.node_by_slot(slot))
    }

    pub fn edges(&self) -> impl Iterator<Item = (&GraphNode, &GraphNode)> {
        let (nodes, edges) = match &self.content {
            SceneContent::Graph { nodes, edges, .. } => (Some(nodes), edges.as_slice()),
            SceneContent::Placeholder { .. } => (None, &[][..]),
        };
        edges.iter().filter_map(move |&(from, to)| {
            let nodes = nodes?;
            Some((nodes.by_index(from)?, nodes.by_index(to)?))
        })
    }

    /// Topmost node whose box contains `world`.
    pub fn node_at(&self, world: Pos2) -> Option<usize> {
        self.draw_list
            .nodes
            .iter()
            .rev()
            .find(|shape| shape.rect.contains(world))
            .map(|shape| shape.slot)
    }

    pub fn matching_nodes(&self, query: &str) -> HashSet<usize> {
        let query = query.trim();
        let SceneContent::Graph { nodes, .. } = &self.content else {
            return HashSet::new();
        };
        if query.is_empty() {
            return HashSet::new();
        }

        let matcher = SkimMatcherV2::default();
        nodes
            .iter()
            .enumerate()
            .filter_map(|(slot, node)| {
                let hit = fuzzy_match_score(&matcher, &node.label, query)
                    .or_else(|| fuzzy_match_score(&matcher, &node.id, query));
                hit.map(|_| slot)
            })
            .collect()
    }
}

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_lowercase(), &query.to_lowercase()))
}
