use eframe::egui::{self, Rect, Ui};

use super::GraphView;

impl GraphView {
    pub(in crate::app) fn handle_graph_zoom(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
    ) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());
        let steps = if scroll > 0.0 { 1 } else { -1 };
        self.viewport.zoom_steps(steps, pointer);
    }

    pub(in crate::app) fn handle_graph_pan(&mut self, response: &egui::Response) {
        if response.dragged() {
            self.viewport.pan_by(response.drag_delta());
        }
    }

    pub(in crate::app) fn hovered_slot(&self, ui: &Ui, response: &egui::Response) -> Option<usize> {
        if !response.hovered() || response.dragged() {
            return None;
        }

        let pointer = ui.input(|input| input.pointer.hover_pos())?;
        self.scene.node_at(self.viewport.screen_to_world(pointer))
    }
}
