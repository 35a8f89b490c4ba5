use eframe::egui::{Pos2, Vec2, pos2, vec2};

use crate::dot::NodeSet;

pub const GRID_COLUMNS: usize = 5;
pub const COLUMN_SPACING: f32 = 200.0;
pub const ROW_SPACING: f32 = 80.0;
pub const NODE_SIZE: Vec2 = vec2(150.0, 40.0);

/// Top-left corner of the node in slot `index`.
pub fn grid_position(index: usize) -> Pos2 {
    let column = index % GRID_COLUMNS;
    let row = index / GRID_COLUMNS;
    pos2(column as f32 * COLUMN_SPACING, row as f32 * ROW_SPACING)
}

/// Places nodes row by row in first-seen order, wrapping every
/// [`GRID_COLUMNS`] nodes.
pub fn grid_layout(nodes: &NodeSet) -> Vec<Pos2> {
    (0..nodes.len()).map(grid_position).collect()
}
