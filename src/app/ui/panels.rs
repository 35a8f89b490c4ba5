use eframe::egui::{self, Align, Context, Key, Layout, RichText};

use super::super::CallGraphApp;

impl CallGraphApp {
    pub(in crate::app) fn draw_top_bar(&mut self, ctx: &Context) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("callgraph-view");
                    ui.separator();

                    ui.label("graph file");
                    let path_field = ui.add(
                        egui::TextEdit::singleline(&mut self.path_input)
                            .hint_text("path/to/callgraph.dot")
                            .desired_width(280.0),
                    );
                    let submitted =
                        path_field.lost_focus() && ui.input(|input| input.key_pressed(Key::Enter));
                    if ui.button("Open").clicked() || submitted {
                        self.open_requested_path();
                    }

                    let can_reload = self.view.source().is_some();
                    if ui
                        .add_enabled(can_reload, egui::Button::new("Reload"))
                        .clicked()
                    {
                        self.view.reload();
                    }
                    if ui.button("Fit").clicked() {
                        self.view.fit_to_content();
                    }
                    ui.separator();

                    ui.label("search");
                    let search_field = ui.add(
                        egui::TextEdit::singleline(&mut self.search)
                            .hint_text("function name")
                            .desired_width(160.0),
                    );
                    if search_field.changed() {
                        self.view.set_search(&self.search);
                    }
                    if search_field.lost_focus() && ui.input(|input| input.key_pressed(Key::Enter))
                    {
                        self.view.focus_first_match();
                    }
                    ui.checkbox(self.view.show_agents_mut(), "agents");

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(self.status_text());
                    });
                });
            });
    }

    fn status_text(&self) -> RichText {
        let scene = self.view.scene();
        if let Some(node) = self.view.hovered_node() {
            return RichText::new(format!("{}  |  {}", node.label, node.id)).strong();
        }

        let mut text = format!("nodes: {}  edges: {}", scene.node_count(), scene.edge_count());
        if !self.search.trim().is_empty() {
            text.push_str(&format!("  matches: {}", self.view.search_match_count()));
        }
        RichText::new(text)
    }
}
