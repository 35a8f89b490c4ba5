use std::f32::consts::FRAC_PI_6;
use std::path::Path;

use eframe::egui::{Pos2, Rect, vec2};
use log::{debug, info, warn};

use crate::dot::{ParsedGraph, parse_graph, read_graph_source};
use crate::layout::{NODE_SIZE, grid_layout};
use crate::util::{display_label, estimate_text_size};

use super::{
    DrawList, EdgeShape, NO_NODES_MESSAGE, NodeShape, PLACEHOLDER_FONT_SIZE, PlaceholderShape,
    SceneContent, SceneModel,
};

const ARROW_SIZE: f32 = 10.0;

/// Line from the bottom centre of `from` to the top centre of `to`, and the
/// arrowhead triangle at `to`.
fn edge_geometry(from: Rect, to: Rect) -> (Pos2, Pos2, [Pos2; 3]) {
    let start = from.center_bottom();
    let end = to.center_top();
    let angle = (end.y - start.y).atan2(end.x - start.x);

    let back_left = end - vec2((angle - FRAC_PI_6).cos(), (angle - FRAC_PI_6).sin()) * ARROW_SIZE;
    let back_right = end - vec2((angle + FRAC_PI_6).cos(), (angle + FRAC_PI_6).sin()) * ARROW_SIZE;

    (start, end, [end, back_left, back_right])
}

impl SceneModel {
    pub fn placeholder(message: impl Into<String>) -> Self {
        let message = message.into();
        let text_size = estimate_text_size(&message, PLACEHOLDER_FONT_SIZE);
        let content_bounds = Rect::from_center_size(Pos2::ZERO, text_size);

        Self {
            draw_list: DrawList {
                placeholder: Some(PlaceholderShape {
                    message: message.clone(),
                    center: Pos2::ZERO,
                    font_size: PLACEHOLDER_FONT_SIZE,
                }),
                ..DrawList::default()
            },
            content: SceneContent::Placeholder { message },
            content_bounds,
        }
    }

    /// Turns a parsed graph and its layout into a scene. A graph without nodes
    /// becomes the "no nodes" placeholder.
    pub fn build(parsed: ParsedGraph, positions: &[Pos2]) -> Self {
        if parsed.nodes.is_empty() {
            return Self::placeholder(NO_NODES_MESSAGE);
        }

        let node_shapes = parsed
            .nodes
            .iter()
            .enumerate()
            .map(|(slot, node)| {
                let min = positions.get(slot).copied().unwrap_or(Pos2::ZERO);
                NodeShape {
                    slot,
                    rect: Rect::from_min_size(min, NODE_SIZE),
                    label: display_label(&node.label),
                }
            })
            .collect::<Vec<_>>();

        let edge_shapes = parsed
            .edges
            .iter()
            .filter_map(|&(from, to)| {
                let from_rect = node_shapes.get(from)?.rect;
                let to_rect = node_shapes.get(to)?.rect;
                let (start, end, arrow) = edge_geometry(from_rect, to_rect);
                Some(EdgeShape {
                    from,
                    to,
                    start,
                    end,
                    arrow,
                })
            })
            .collect::<Vec<_>>();

        let mut content_bounds = Rect::NOTHING;
        for shape in &node_shapes {
            content_bounds = content_bounds.union(shape.rect);
        }
        for shape in &edge_shapes {
            for point in [shape.start, shape.end].iter().chain(shape.arrow.iter()) {
                content_bounds.extend_with(*point);
            }
        }

        Self {
            content: SceneContent::Graph {
                nodes: parsed.nodes,
                edges: parsed.edges,
            },
            draw_list: DrawList {
                edges: edge_shapes,
                nodes: node_shapes,
                placeholder: None,
            },
            content_bounds,
        }
    }

    pub fn from_dot_text(text: &str) -> Self {
        let parsed = parse_graph(text);
        if parsed.dropped_edges > 0 {
            debug!(
                "skipped {} edges that name undeclared nodes",
                parsed.dropped_edges
            );
        }
        let positions = grid_layout(&parsed.nodes);
        Self::build(parsed, &positions)
    }

    /// Loads a graph file. Unreadable files become a placeholder naming the
    /// path.
    pub fn from_dot_file(path: &Path) -> Self {
        match read_graph_source(path) {
            Ok(text) => {
                let scene = Self::from_dot_text(&text);
                info!(
                    "loaded {}: {} nodes, {} edges",
                    path.display(),
                    scene.node_count(),
                    scene.edge_count()
                );
                scene
            }
            Err(error) => {
                warn!("{error:#}");
                Self::placeholder(format!("Failed to open output file:\n{}", path.display()))
            }
        }
    }
}
