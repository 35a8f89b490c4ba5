use eframe::egui::{Pos2, Rect, Vec2};

pub const ZOOM_STEP: f32 = 1.1;
pub const FIT_ZOOM_OUT: f32 = 0.9;
pub const SCENE_MARGIN: f32 = 50.0;
pub const PLACEHOLDER_MARGIN: f32 = 100.0;
const MIN_ZOOM: f32 = 0.02;
const MAX_ZOOM: f32 = 40.0;

/// Camera over the world plane: `screen = canvas.center() + pan + world * zoom`.
#[derive(Clone, Debug)]
pub struct Viewport {
    zoom: f32,
    pan: Vec2,
    canvas: Rect,
    scene_bounds: Rect,
    content_bounds: Rect,
    /// Scale of the last fit. Zooming out may always reach it, even below
    /// `MIN_ZOOM`.
    fit_zoom: f32,
    pending_fit: bool,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan: Vec2::ZERO,
            canvas: Rect::ZERO,
            scene_bounds: Rect::NOTHING,
            content_bounds: Rect::NOTHING,
            fit_zoom: 1.0,
            pending_fit: false,
        }
    }
}

impl Viewport {
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn canvas(&self) -> Rect {
        self.canvas
    }

    pub fn world_to_screen(&self, world: Pos2) -> Pos2 {
        self.canvas.center() + self.pan + world.to_vec2() * self.zoom
    }

    pub fn screen_to_world(&self, screen: Pos2) -> Pos2 {
        ((screen - self.canvas.center() - self.pan) / self.zoom).to_pos2()
    }

    pub fn world_rect_to_screen(&self, world: Rect) -> Rect {
        Rect::from_min_max(self.world_to_screen(world.min), self.world_to_screen(world.max))
    }

    /// World-space rectangle currently shown on the canvas.
    pub fn visible_world_rect(&self) -> Rect {
        Rect::from_min_max(
            self.screen_to_world(self.canvas.min),
            self.screen_to_world(self.canvas.max),
        )
    }

    fn center_world(&self) -> Pos2 {
        (-self.pan / self.zoom).to_pos2()
    }

    fn look_at(&mut self, world: Pos2) {
        self.pan = -world.to_vec2() * self.zoom;
    }

    /// Records the canvas rectangle for this frame. The world point at the
    /// canvas centre is unaffected, so repeated calls do not drift.
    pub fn set_canvas(&mut self, canvas: Rect) {
        if canvas == self.canvas {
            return;
        }
        self.canvas = canvas;

        if self.pending_fit && has_area(canvas) {
            self.fit_content();
        }
    }

    /// Frames a freshly built graph: the scene bounds get a margin, the view is
    /// fitted to the bare content and then zoomed out slightly.
    pub fn frame_graph(&mut self, content: Rect) {
        self.content_bounds = content;
        self.scene_bounds = content.expand(SCENE_MARGIN);
        self.fit_content();
    }

    /// Centres a placeholder message at its natural size.
    pub fn frame_placeholder(&mut self, content: Rect) {
        self.content_bounds = content;
        self.scene_bounds = content.expand(PLACEHOLDER_MARGIN);
        self.pending_fit = false;
        self.zoom = 1.0;
        self.fit_zoom = 1.0;
        self.look_at(content.center());
    }

    /// Fits the content rectangle into the canvas keeping its aspect ratio.
    /// Deferred until the canvas has a size.
    pub fn fit_content(&mut self) {
        if !has_area(self.canvas) {
            self.pending_fit = true;
            return;
        }
        self.pending_fit = false;

        let content = self.content_bounds;
        if !content.is_finite() || content.is_negative() {
            return;
        }

        let scale_x = (content.width() > 0.0).then(|| self.canvas.width() / content.width());
        let scale_y = (content.height() > 0.0).then(|| self.canvas.height() / content.height());
        let fit = match (scale_x, scale_y) {
            (Some(x), Some(y)) => x.min(y),
            (Some(scale), None) | (None, Some(scale)) => scale,
            (None, None) => 1.0,
        };

        self.fit_zoom = fit * FIT_ZOOM_OUT;
        self.zoom = self.fit_zoom.min(MAX_ZOOM);
        self.look_at(content.center());
    }

    /// Applies `steps` wheel notches (positive zooms in) keeping the world
    /// point under `anchor` fixed on screen.
    pub fn zoom_steps(&mut self, steps: i32, anchor: Pos2) {
        if steps == 0 {
            return;
        }

        let world_before = self.screen_to_world(anchor);
        self.zoom = (self.zoom * ZOOM_STEP.powi(steps)).clamp(self.min_zoom(), MAX_ZOOM);
        // Unclamped to the scene: the anchor must stay under the cursor.
        self.pan = anchor - self.canvas.center() - world_before.to_vec2() * self.zoom;
    }

    fn min_zoom(&self) -> f32 {
        MIN_ZOOM.min(self.fit_zoom)
    }

    /// Moves the camera so `world` sits at the canvas centre, keeping zoom.
    pub fn center_on(&mut self, world: Pos2) {
        self.look_at(world);
        self.clamp_to_scene();
    }

    pub fn pan_by(&mut self, delta: Vec2) {
        self.pan += delta;
        self.clamp_to_scene();
    }

    fn clamp_to_scene(&mut self) {
        let bounds = self.scene_bounds;
        if !bounds.is_finite() || bounds.is_negative() {
            return;
        }

        let center = self.center_world();
        let clamped = center.clamp(bounds.min, bounds.max);
        if clamped != center {
            self.look_at(clamped);
        }
    }
}

fn has_area(rect: Rect) -> bool {
    rect.width() > 0.0 && rect.height() > 0.0
}
