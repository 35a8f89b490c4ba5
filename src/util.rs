use eframe::egui::{Vec2, vec2};

pub const LABEL_MAX_CHARS: usize = 20;
pub const ELLIPSIS: &str = "...";

/// Keeps the tail of long labels, where qualified names carry the function name.
pub fn display_label(label: &str) -> String {
    let char_count = label.chars().count();
    if char_count <= LABEL_MAX_CHARS {
        return label.to_owned();
    }

    let tail = label
        .char_indices()
        .nth(char_count - LABEL_MAX_CHARS)
        .map(|(offset, _)| &label[offset..])
        .unwrap_or(label);
    format!("{ELLIPSIS}{tail}")
}

/// Rough text extent for layout decisions made before egui can lay out a galley.
pub fn estimate_text_size(text: &str, font_size: f32) -> Vec2 {
    let widest = text.lines().map(|line| line.chars().count()).max().unwrap_or(0);
    let lines = text.lines().count().max(1);
    vec2(
        widest as f32 * font_size * 0.55,
        lines as f32 * font_size * 1.3,
    )
}
