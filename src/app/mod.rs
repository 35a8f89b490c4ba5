use std::path::PathBuf;

use eframe::egui::{self, Context};

mod agents;
mod graph;
mod render_utils;
mod scene;
mod ui;
mod viewport;

use graph::GraphView;
pub use graph::GraphViewConfig;
pub use scene::{SceneModel, scene_to_json};

pub struct CallGraphApp {
    view: GraphView,
    path_input: String,
    search: String,
}

impl CallGraphApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: &GraphViewConfig,
        dot_file: Option<PathBuf>,
    ) -> Self {
        let mut view = GraphView::new(config);
        let path_input = match &dot_file {
            Some(path) => {
                view.load_dot_file(path);
                path.display().to_string()
            }
            None => String::new(),
        };

        Self {
            view,
            path_input,
            search: String::new(),
        }
    }

    fn open_requested_path(&mut self) {
        let trimmed = self.path_input.trim();
        if trimmed.is_empty() {
            self.view.clear();
            return;
        }
        self.view.load_dot_file(&PathBuf::from(trimmed));
    }
}

impl eframe::App for CallGraphApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.draw_top_bar(ctx);

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| self.view.show(ui));
    }
}
