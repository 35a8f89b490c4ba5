use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use eframe::egui::{Sense, Ui};
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::agents::{AnimationController, SystemClock, TickScheduler};
use super::scene::{INITIAL_MESSAGE, SceneModel, SceneNode};
use super::viewport::Viewport;
use view::{NodeHighlights, paint_scene};

mod interaction;
mod view;

#[derive(Clone, Debug)]
pub struct GraphViewConfig {
    pub agent_count: usize,
    pub tick_period: Duration,
    pub seed: Option<u64>,
}

impl Default for GraphViewConfig {
    fn default() -> Self {
        Self {
            agent_count: 6,
            tick_period: Duration::from_millis(50),
            seed: None,
        }
    }
}

/// The interactive canvas: the current scene, the camera over it and the
/// ambient agents.
pub struct GraphView {
    scene: SceneModel,
    viewport: Viewport,
    agents: AnimationController,
    scheduler: TickScheduler<SystemClock>,
    show_agents: bool,
    search: String,
    search_matches: HashSet<usize>,
    hovered: Option<usize>,
    source: Option<PathBuf>,
}

impl GraphView {
    pub fn new(config: &GraphViewConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let mut view = Self {
            scene: SceneModel::default(),
            viewport: Viewport::default(),
            agents: AnimationController::new(config.agent_count, rng),
            scheduler: TickScheduler::new(SystemClock::default(), config.tick_period),
            show_agents: config.agent_count > 0,
            search: String::new(),
            search_matches: HashSet::new(),
            hovered: None,
            source: None,
        };
        view.frame_scene();
        view
    }

    pub fn scene(&self) -> &SceneModel {
        &self.scene
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn hovered_node(&self) -> Option<SceneNode<'_>> {
        self.scene.node_by_slot(self.hovered?)
    }

    pub fn search_match_count(&self) -> usize {
        self.search_matches.len()
    }

    pub fn show_agents_mut(&mut self) -> &mut bool {
        &mut self.show_agents
    }

    /// Replaces the scene with the graph in `path`. Unreadable or empty graphs
    /// end up as a placeholder message.
    pub fn load_dot_file(&mut self, path: &Path) {
        self.source = Some(path.to_path_buf());
        self.set_scene(SceneModel::from_dot_file(path));
    }

    pub fn reload(&mut self) {
        if let Some(path) = self.source.clone() {
            self.load_dot_file(&path);
        }
    }

    pub fn clear(&mut self) {
        self.source = None;
        self.set_scene(SceneModel::placeholder(INITIAL_MESSAGE));
    }

    pub fn set_search(&mut self, query: &str) {
        if query == self.search {
            return;
        }
        self.search = query.to_owned();
        self.search_matches = self.scene.matching_nodes(query);
    }

    /// Centres the camera on the node with `id`. Returns false when the
    /// current scene has no such node.
    pub fn focus_node(&mut self, id: &str) -> bool {
        let Some(center) = self.scene.node(id).map(|node| node.rect.center()) else {
            return false;
        };
        self.viewport.center_on(center);
        true
    }

    /// Centres on the earliest declared node matching the search.
    pub fn focus_first_match(&mut self) -> bool {
        let Some(&slot) = self.search_matches.iter().min() else {
            return false;
        };
        let Some(id) = self.scene.node_by_slot(slot).map(|node| node.id.to_owned()) else {
            return false;
        };
        self.focus_node(&id)
    }

    fn set_scene(&mut self, scene: SceneModel) {
        self.scene = scene;
        self.hovered = None;
        self.search_matches = self.scene.matching_nodes(&self.search);
        self.frame_scene();
    }

    fn frame_scene(&mut self) {
        let bounds = self.scene.content_bounds();
        if self.scene.is_placeholder() {
            self.viewport.frame_placeholder(bounds);
        } else {
            self.viewport.frame_graph(bounds);
        }
    }

    pub fn fit_to_content(&mut self) {
        self.frame_scene();
    }

    pub fn show(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        self.viewport.set_canvas(rect);
        self.agents.resize(rect.size());

        self.handle_graph_zoom(ui, rect, &response);
        self.handle_graph_pan(&response);
        self.hovered = self.hovered_slot(ui, &response);

        let due = self.scheduler.due_ticks();
        if self.show_agents {
            for _ in 0..due {
                self.agents.tick(self.scheduler.period());
            }
            ui.ctx().request_repaint_after(self.scheduler.until_next_tick());
        }

        let highlights = NodeHighlights {
            hovered: self.hovered,
            matches: &self.search_matches,
        };
        let agents = if self.show_agents {
            self.agents.agents()
        } else {
            &[]
        };

        let painter = ui.painter_at(rect);
        paint_scene(
            &painter,
            &self.viewport,
            self.scene.draw_list(),
            &highlights,
            agents,
        );
    }
}
