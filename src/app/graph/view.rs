use std::collections::HashSet;

use eframe::egui::{Align2, FontId, Painter, Pos2, Rect, Shape, Stroke, StrokeKind, vec2};

use super::super::agents::{Agent, Facing};
use super::super::render_utils::{
    AGENT_BODY, AGENT_EYE, EDGE, HOVER_BORDER, MATCH_BORDER, MUTED_TEXT, NODE_BORDER, NODE_FILL,
    NODE_TEXT, blend_color, dim_color, draw_background, edge_visible, rect_visible,
};
use super::super::scene::{DrawList, LABEL_FONT_SIZE};
use super::super::viewport::Viewport;

/// Below this on-screen size labels are skipped.
const MIN_LABEL_PX: f32 = 4.0;

pub(in crate::app) struct NodeHighlights<'a> {
    pub hovered: Option<usize>,
    pub matches: &'a HashSet<usize>,
}

/// Paints one frame: grid, edges, nodes, placeholder, then agents on top.
pub(in crate::app) fn paint_scene(
    painter: &Painter,
    viewport: &Viewport,
    draw_list: &DrawList,
    highlights: &NodeHighlights<'_>,
    agents: &[Agent],
) {
    draw_background(painter, viewport);

    let canvas = viewport.canvas();
    let zoom = viewport.zoom();
    paint_edges(painter, viewport, draw_list, highlights.hovered, canvas, zoom);
    paint_nodes(painter, viewport, draw_list, highlights, canvas, zoom);

    if let Some(placeholder) = &draw_list.placeholder {
        painter.text(
            viewport.world_to_screen(placeholder.center),
            Align2::CENTER_CENTER,
            &placeholder.message,
            FontId::proportional(placeholder.font_size * zoom),
            MUTED_TEXT,
        );
    }

    for agent in agents {
        paint_agent(painter, canvas.min, agent);
    }
}

fn paint_edges(
    painter: &Painter,
    viewport: &Viewport,
    draw_list: &DrawList,
    hovered: Option<usize>,
    canvas: Rect,
    zoom: f32,
) {
    let width = (1.5 * zoom).clamp(0.5, 3.0);
    for edge in &draw_list.edges {
        let start = viewport.world_to_screen(edge.start);
        let end = viewport.world_to_screen(edge.end);
        if !edge_visible(canvas, start, end, 12.0 * zoom) {
            continue;
        }

        // Calls into and out of the hovered function stand out.
        let touches_hovered = hovered.is_some_and(|slot| edge.from == slot || edge.to == slot);
        let color = if touches_hovered { HOVER_BORDER } else { EDGE };
        painter.line_segment([start, end], Stroke::new(width, color));
        let arrow = edge
            .arrow
            .iter()
            .map(|point| viewport.world_to_screen(*point))
            .collect::<Vec<_>>();
        painter.add(Shape::convex_polygon(arrow, color, Stroke::NONE));
    }
}

fn paint_nodes(
    painter: &Painter,
    viewport: &Viewport,
    draw_list: &DrawList,
    highlights: &NodeHighlights<'_>,
    canvas: Rect,
    zoom: f32,
) {
    let searching = !highlights.matches.is_empty();
    let font_size = LABEL_FONT_SIZE * zoom;

    for node in &draw_list.nodes {
        let rect = viewport.world_rect_to_screen(node.rect);
        if !rect_visible(canvas, rect) {
            continue;
        }

        let is_hovered = highlights.hovered == Some(node.slot);
        let is_match = highlights.matches.contains(&node.slot);

        let (fill, border, text) = if is_match {
            (blend_color(NODE_FILL, MATCH_BORDER, 0.18), MATCH_BORDER, NODE_TEXT)
        } else if searching {
            (dim_color(NODE_FILL, 0.6), dim_color(NODE_BORDER, 0.45), dim_color(NODE_TEXT, 0.5))
        } else {
            (NODE_FILL, NODE_BORDER, NODE_TEXT)
        };
        let border = if is_hovered { HOVER_BORDER } else { border };

        let corner = (rect.height() * 0.5).min(255.0);
        let stroke_width = (2.0 * zoom).clamp(0.5, 4.0) + if is_hovered { 1.0 } else { 0.0 };
        painter.rect_filled(rect, corner, fill);
        painter.rect_stroke(rect, corner, Stroke::new(stroke_width, border), StrokeKind::Inside);

        if font_size >= MIN_LABEL_PX {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                &node.label,
                FontId::proportional(font_size),
                text,
            );
        }
    }
}

fn paint_agent(painter: &Painter, origin: Pos2, agent: &Agent) {
    let rect = agent.rect().translate(origin.to_vec2());
    let center = rect.center() + vec2(0.0, 2.0);
    let radius = rect.height() * 0.38;
    let leg = Stroke::new(1.5, AGENT_BODY);

    for side in [-1.0_f32, 1.0] {
        for offset in [-4.0_f32, 2.0] {
            let from = center + vec2(side * radius * 0.7, offset);
            let to = from + vec2(side * radius * 0.8, offset * 0.5 + 4.0);
            painter.line_segment([from, to], leg);
        }
        let claw = center + vec2(side * radius * 1.45, -radius * 0.6);
        painter.circle_filled(claw, radius * 0.32, AGENT_BODY);
    }

    painter.circle_filled(center, radius, AGENT_BODY);

    let look = match agent.facing {
        Facing::Left => -1.0,
        Facing::Right => 1.0,
    };
    for eye in [-2.5_f32, 2.5] {
        let eye_pos = center + vec2(eye + look * 2.5, -radius * 0.45);
        painter.circle_filled(eye_pos, 1.6, AGENT_EYE);
    }
}
