use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke};

use super::viewport::Viewport;

pub(super) const GRID_CELL: f32 = 50.0;

pub(super) const BACKGROUND: Color32 = Color32::from_rgb(0x11, 0x11, 0x1b);
pub(super) const GRID_LINE: Color32 = Color32::from_rgb(0x1e, 0x1e, 0x2e);
pub(super) const NODE_FILL: Color32 = Color32::from_rgb(0x31, 0x32, 0x44);
pub(super) const NODE_BORDER: Color32 = Color32::from_rgb(0x89, 0xb4, 0xfa);
pub(super) const NODE_TEXT: Color32 = Color32::from_rgb(0xcd, 0xd6, 0xf4);
pub(super) const EDGE: Color32 = Color32::from_rgb(0xa6, 0xad, 0xc8);
pub(super) const MUTED_TEXT: Color32 = Color32::from_rgb(0x6c, 0x70, 0x86);
pub(super) const HOVER_BORDER: Color32 = Color32::from_rgb(0xf5, 0xc2, 0xe7);
pub(super) const MATCH_BORDER: Color32 = Color32::from_rgb(0xf9, 0xe2, 0xaf);
pub(super) const AGENT_BODY: Color32 = Color32::from_rgb(0xfa, 0xb3, 0x87);
pub(super) const AGENT_EYE: Color32 = Color32::from_rgb(0x1e, 0x1e, 0x2e);

fn mix_channel(from: u8, to: u8, amount: f32) -> u8 {
    let (from, to) = (f32::from(from), f32::from(to));
    (from + (to - from) * amount).round().clamp(0.0, 255.0) as u8
}

pub(super) fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let base = base.to_srgba_unmultiplied();
    let overlay = overlay.to_srgba_unmultiplied();
    let [r, g, b, a]: [u8; 4] =
        std::array::from_fn(|channel| mix_channel(base[channel], overlay[channel], amount));
    Color32::from_rgba_unmultiplied(r, g, b, a)
}

/// Darkens toward black; alpha fades more gently so dimmed nodes stay legible.
pub(super) fn dim_color(color: Color32, factor: f32) -> Color32 {
    let factor = factor.clamp(0.0, 1.0);
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    let dim = |channel| mix_channel(0, channel, factor);
    Color32::from_rgba_unmultiplied(dim(r), dim(g), dim(b), mix_channel(0, a, 0.45 + factor * 0.55))
}

/// World coordinates of the grid lines crossing `visible`, anchored at 0.
pub(super) fn grid_lines(visible: Rect, cell: f32) -> (Vec<f32>, Vec<f32>) {
    fn axis(from: f32, to: f32, cell: f32) -> Vec<f32> {
        if !(from.is_finite() && to.is_finite()) || to < from {
            return Vec::new();
        }
        let first = (from / cell).ceil() as i64;
        let last = (to / cell).floor() as i64;
        (first..=last).map(|index| index as f32 * cell).collect()
    }

    (
        axis(visible.left(), visible.right(), cell),
        axis(visible.top(), visible.bottom(), cell),
    )
}

pub(super) fn draw_background(painter: &Painter, viewport: &Viewport) {
    let canvas = viewport.canvas();
    painter.rect_filled(canvas, 0.0, BACKGROUND);

    let stroke = Stroke::new(0.5_f32.max(0.5 * viewport.zoom()).min(1.5), GRID_LINE);
    let (xs, ys) = grid_lines(viewport.visible_world_rect(), GRID_CELL);
    for x in xs {
        let screen_x = viewport.world_to_screen(Pos2::new(x, 0.0)).x;
        painter.line_segment(
            [
                Pos2::new(screen_x, canvas.top()),
                Pos2::new(screen_x, canvas.bottom()),
            ],
            stroke,
        );
    }
    for y in ys {
        let screen_y = viewport.world_to_screen(Pos2::new(0.0, y)).y;
        painter.line_segment(
            [
                Pos2::new(canvas.left(), screen_y),
                Pos2::new(canvas.right(), screen_y),
            ],
            stroke,
        );
    }
}

pub(super) fn rect_visible(canvas: Rect, rect: Rect) -> bool {
    canvas.intersects(rect)
}

pub(super) fn edge_visible(canvas: Rect, start: Pos2, end: Pos2, padding: f32) -> bool {
    let min_x = start.x.min(end.x) - padding;
    let max_x = start.x.max(end.x) + padding;
    let min_y = start.y.min(end.y) - padding;
    let max_y = start.y.max(end.y) + padding;

    !(max_x < canvas.left()
        || min_x > canvas.right()
        || max_y < canvas.top()
        || min_y > canvas.bottom())
}
