//! 3D viewport panel with OpenGL rendering

mod gl_renderer;
pub use musclemap_gui_lib::viewport::{camera, mesh, picking};

use std::sync::{Arc, Mutex};

use egui::Ui;

use crate::i18n::{self, t};
use crate::scene::SceneGraph;
use crate::state::AppState;
use gl_renderer::{GlRenderer, NodeDraw};

/// 3D viewport panel with OpenGL rendering
pub struct ViewportPanel {
    gl_renderer: Option<Arc<Mutex<GlRenderer>>>,
    /// Screen rectangle of the last frame, used to crop screenshots
    last_rect: Option<egui::Rect>,
}

impl ViewportPanel {
    pub fn new() -> Self {
        Self {
            gl_renderer: None,
            last_rect: None,
        }
    }

    /// Initialize GL renderer (must be called with a GL context)
    pub fn init_gl(&mut self, gl: &glow::Context, scene: Option<&SceneGraph>) {
        match GlRenderer::new(gl, scene) {
            Ok(renderer) => self.gl_renderer = Some(Arc::new(Mutex::new(renderer))),
            Err(e) => tracing::error!("GL renderer init failed: {}", e),
        }
    }

    pub fn destroy(&mut self, gl: &glow::Context) {
        if let Some(renderer) = self.gl_renderer.take() {
            if let Ok(mut r) = renderer.lock() {
                r.destroy(gl);
            }
        }
    }

    pub fn last_rect(&self) -> Option<egui::Rect> {
        self.last_rect
    }

    pub fn show(&mut self, ui: &mut Ui, state: &mut AppState) {
        let (rect, response) =
            ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());
        self.last_rect = Some(rect);

        if let Some(err) = &state.load_error {
            let painter = ui.painter_at(rect);
            painter.rect_filled(rect, 0.0, ui.visuals().extreme_bg_color);
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                format!("{}\n{}", t(state.lang, "err.model"), err),
                egui::FontId::proportional(16.0),
                ui.visuals().error_fg_color,
            );
            return;
        }

        self.handle_camera(&response, ui, state);

        // ── Part selection via click ───────────────────────────
        if response.clicked_by(egui::PointerButton::Primary) {
            if let Some(pos) = response.interact_pointer_pos() {
                state.click_part(pos, rect);
            }
        }

        if !ui.is_rect_visible(rect) {
            return;
        }

        self.render_gl(ui, rect, state);
        self.draw_hover_label(ui, &response, rect, state);
    }

    fn handle_camera(&mut self, response: &egui::Response, ui: &Ui, state: &mut AppState) {
        if response.drag_started() {
            state.begin_camera_drag();
        }

        let camera = &mut state.view.camera;
        if response.dragged_by(egui::PointerButton::Primary)
            || response.dragged_by(egui::PointerButton::Middle)
        {
            let delta = response.drag_delta();
            camera.rotate(delta.x * 0.5, delta.y * 0.5);
        }
        if response.dragged_by(egui::PointerButton::Secondary) {
            let delta = response.drag_delta();
            camera.pan(delta.x * 0.01, delta.y * 0.01);
        }

        // ── Scroll zoom ─────────────────────────────
        if response.hovered() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll.abs() > 0.1 {
                state.view.animator.cancel();
                state.view.camera.zoom(scroll * 0.01);
            }
        }
    }

    fn draw_hover_label(
        &self,
        ui: &Ui,
        response: &egui::Response,
        rect: egui::Rect,
        state: &AppState,
    ) {
        let (Some(pos), Some(scene)) = (response.hover_pos(), state.scene.as_ref()) else {
            return;
        };
        let Some(hit) = picking::resolve(pos, rect, &state.view.camera, scene) else {
            return;
        };
        let label = i18n::part_display_name(state.lang, &hit.name);
        ui.painter_at(rect).text(
            pos + egui::vec2(14.0, -14.0),
            egui::Align2::LEFT_BOTTOM,
            label,
            egui::FontId::proportional(14.0),
            ui.visuals().strong_text_color(),
        );
    }

    fn render_gl(&self, ui: &mut Ui, rect: egui::Rect, state: &AppState) {
        let Some(gl_renderer) = &self.gl_renderer else {
            ui.painter_at(rect).text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                t(state.lang, "err.no_gl"),
                egui::FontId::proportional(16.0),
                ui.visuals().error_fg_color,
            );
            return;
        };

        let renderer_clone = gl_renderer.clone();
        let camera = state.view.camera.clone();
        let grid_settings = state.settings.grid.clone();
        let bg_color = state.settings.viewport.background_color;
        let nodes: Vec<NodeDraw> = state
            .scene
            .as_ref()
            .map(|scene| {
                scene
                    .nodes
                    .iter()
                    .enumerate()
                    .map(|(index, node)| {
                        let material = node.appearance.effective();
                        NodeDraw {
                            index,
                            visible: node.visible,
                            tint: material.base_color,
                            roughness: material.roughness,
                        }
                    })
                    .collect()
            })
            .unwrap_or_default();

        let callback = egui::PaintCallback {
            rect,
            callback: Arc::new(egui_glow::CallbackFn::new(move |info, painter| {
                let gl = painter.gl();
                let clip = info.clip_rect_in_pixels();
                let viewport = [
                    clip.left_px as f32,
                    clip.from_bottom_px as f32,
                    clip.width_px as f32,
                    clip.height_px as f32,
                ];

                if let Ok(mut r) = renderer_clone.lock() {
                    r.update_grid(gl, &grid_settings);
                    let params = gl_renderer::RenderParams {
                        viewport,
                        grid_visible: grid_settings.visible,
                        bg_color,
                        nodes: nodes.clone(),
                    };
                    r.paint(gl, &camera, &params);
                }
            })),
        };

        ui.painter().add(callback);
    }
}
