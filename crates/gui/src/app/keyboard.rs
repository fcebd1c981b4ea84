//! Keyboard shortcut handling

use eframe::egui;

use crate::state::AppState;
use crate::viewport::camera::ViewPreset;

/// Handle keyboard shortcuts for the application
pub fn handle_keyboard(ctx: &egui::Context, state: &mut AppState) {
    // Don't handle shortcuts when a text field is focused
    if ctx.memory(|m| m.focused().is_some()) {
        return;
    }

    let now = ctx.input(|i| i.time);
    let pressed = |key: egui::Key| ctx.input(|i| i.key_pressed(key) && !i.modifiers.command);

    // Escape: close the severity panel
    if pressed(egui::Key::Escape) {
        state.close_panel();
    }
    if pressed(egui::Key::F) {
        state.reset_camera(ViewPreset::Front, now);
    }
    if pressed(egui::Key::B) {
        state.reset_camera(ViewPreset::Back, now);
    }
    if pressed(egui::Key::ArrowLeft) {
        state.prev_month();
    }
    if pressed(egui::Key::ArrowRight) {
        state.next_month();
    }
    if pressed(egui::Key::T) {
        state.select_today();
    }
    if pressed(egui::Key::L) {
        state.toggle_language();
    }
}
