//! Title, camera presets, image export and language toggle.

use egui::Ui;

use crate::i18n::t;
use crate::state::AppState;
use crate::viewport::camera::ViewPreset;

/// Draw the top bar. Returns true when image export was requested.
pub fn show(ui: &mut Ui, state: &mut AppState) -> bool {
    let lang = state.lang;
    let now = ui.input(|i| i.time);
    let mut export = false;

    ui.horizontal(|ui| {
        ui.heading(t(lang, "app.title"));
        ui.separator();

        ui.add_enabled_ui(state.is_ready(), |ui| {
            if ui.button(t(lang, "top.front")).on_hover_text(t(lang, "tip.front")).clicked() {
                state.reset_camera(ViewPreset::Front, now);
            }
            if ui.button(t(lang, "top.back")).on_hover_text(t(lang, "tip.back")).clicked() {
                state.reset_camera(ViewPreset::Back, now);
            }
            ui.separator();
            export = ui
                .button(t(lang, "top.export"))
                .on_hover_text(t(lang, "tip.export"))
                .clicked();
        });

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button(lang.toggle_label()).clicked() {
                state.toggle_language();
            }
        });
    });

    export
}
