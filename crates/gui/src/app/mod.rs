//! Main application module

mod keyboard;
mod styles;

use std::sync::Arc;

use eframe::egui;

use crate::asset::AssetError;
use crate::export;
use crate::i18n::t;
use crate::scene::SceneGraph;
use crate::state::{AppSettings, AppState};
use crate::ui::{calendar_panel, severity_panel, status_bar, top_bar};
use crate::viewport::ViewportPanel;

/// Main application
pub struct MusclemapApp {
    state: AppState,
    viewport: ViewportPanel,
    /// Last applied font size (to detect changes)
    last_font_size: f32,
    /// A screenshot was requested for export
    export_pending: bool,
}

impl MusclemapApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        model: Result<SceneGraph, AssetError>,
        settings: AppSettings,
    ) -> Self {
        let persisted = AppState::stored_record(cc.storage);
        let today = chrono::Local::now().date_naive();
        let state = AppState::new(model, persisted.as_deref(), settings, today);

        styles::configure_styles(&cc.egui_ctx, state.settings.ui.font_size);

        let mut viewport = ViewportPanel::new();
        if let Some(gl) = cc.gl.as_ref() {
            viewport.init_gl(gl, state.scene.as_ref());
        }

        let last_font_size = state.settings.ui.font_size;
        Self {
            state,
            viewport,
            last_font_size,
            export_pending: false,
        }
    }

    fn request_export(&mut self, ctx: &egui::Context) {
        self.export_pending = true;
        ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(egui::UserData::default()));
    }

    fn handle_screenshot(&mut self, ctx: &egui::Context) {
        if !self.export_pending {
            return;
        }
        let image: Option<Arc<egui::ColorImage>> = ctx.input(|i| {
            i.raw.events.iter().find_map(|e| match e {
                egui::Event::Screenshot { image, .. } => Some(image.clone()),
                _ => None,
            })
        });
        let Some(image) = image else {
            return;
        };
        self.export_pending = false;

        let Some(rect) = self.viewport.last_rect() else {
            return;
        };
        let cropped = export::crop_to_viewport(&image, rect, ctx.pixels_per_point());
        let file_name = export::snapshot_file_name(&self.state.selection.date_key());
        let lang = self.state.lang;

        let Some(path) = rfd::FileDialog::new()
            .set_title(t(lang, "top.export_title"))
            .set_file_name(file_name)
            .add_filter("PNG", &["png"])
            .save_file()
        else {
            return;
        };

        self.state.notice = Some(match export::save_png(&cropped, &path) {
            Ok(()) => format!("{}: {}", t(lang, "status.saved"), path.display()),
            Err(e) => {
                tracing::error!("Snapshot export failed: {}", e);
                format!("{}: {}", t(lang, "err.export"), e)
            }
        });
    }
}

impl eframe::App for MusclemapApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        // Apply font size if changed
        if self.state.settings.ui.font_size != self.last_font_size {
            styles::apply_font_size(ctx, self.state.settings.ui.font_size);
            self.last_font_size = self.state.settings.ui.font_size;
        }

        if self.state.tick_camera(ctx.input(|i| i.time)) {
            ctx.request_repaint();
        }

        keyboard::handle_keyboard(ctx, &mut self.state);
        self.handle_screenshot(ctx);

        // ── Top bar ───────────────────────────────────────────
        let mut export_clicked = false;
        egui::TopBottomPanel::top("top_bar")
            .frame(
                egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(8, 4)),
            )
            .show(ctx, |ui| {
                export_clicked = top_bar::show(ui, &mut self.state);
            });
        if export_clicked {
            self.request_export(ctx);
        }

        // ── Status bar ───────────────────────────────────────
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(22.0)
            .frame(
                egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(8, 2)),
            )
            .show(ctx, |ui| {
                status_bar::show(ui, &self.state);
            });

        // ── Left panel: calendar ─────────────────────────────
        egui::SidePanel::left("calendar")
            .default_width(280.0)
            .resizable(false)
            .frame(egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::same(8)))
            .show(ctx, |ui| {
                calendar_panel::show(ui, &mut self.state);
            });

        // ── Severity panel (floating, while a part is selected) ─
        severity_panel::show(ctx, &mut self.state);

        // ── Central panel: 3D viewport ───────────────────────
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                self.viewport.show(ui, &mut self.state);
            });

        if let Some(storage) = frame.storage_mut() {
            self.state.persist_if_changed(storage);
        }
        self.state.save_settings_if_changed();
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.state.persist_if_changed(storage);
    }

    fn on_exit(&mut self, gl: Option<&glow::Context>) {
        if let Some(gl) = gl {
            self.viewport.destroy(gl);
        }
    }
}
