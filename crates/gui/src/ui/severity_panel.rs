//! Floating severity picker for the selected part.

use shared::Severity;

use crate::appearance::severity_color32;
use crate::i18n::{self, t};
use crate::state::AppState;

const BUTTON_SIZE: egui::Vec2 = egui::vec2(64.0, 32.0);

/// Show the picker while a part is selected.
pub fn show(ctx: &egui::Context, state: &mut AppState) {
    let Some(part) = state.selection.part().map(str::to_owned) else {
        return;
    };
    let lang = state.lang;
    let current = state.severity_of(&part);
    let mut open = true;
    let mut pressed: Option<Severity> = None;
    let mut close = false;

    egui::Window::new(t(lang, "panel.title"))
        .id(egui::Id::new("severity_panel"))
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-12.0, 12.0))
        .show(ctx, |ui| {
            ui.label(egui::RichText::new(i18n::part_display_name(lang, &part)).strong());
            ui.weak(state.selection.date_key().as_str());
            ui.add_space(4.0);

            ui.horizontal(|ui| {
                for severity in Severity::ALL {
                    if severity_button(ui, lang, severity, severity == current).clicked() {
                        pressed = Some(severity);
                    }
                }
            });

            ui.add_space(4.0);
            close = ui.button(t(lang, "panel.close")).clicked();
        });

    if let Some(severity) = pressed {
        if let Err(e) = state.set_selected_severity(severity.level()) {
            tracing::warn!("Severity not applied: {}", e);
        }
    }
    if close || !open {
        state.close_panel();
    }
}

fn severity_button(
    ui: &mut egui::Ui,
    lang: i18n::Lang,
    severity: Severity,
    current: bool,
) -> egui::Response {
    let label = i18n::severity_label(lang, severity);
    let mut button = egui::Button::new(label).min_size(BUTTON_SIZE);
    if let Some(color) = severity_color32(severity) {
        let text = if severity == Severity::Weak {
            egui::Color32::BLACK
        } else {
            egui::Color32::WHITE
        };
        button = egui::Button::new(egui::RichText::new(label).color(text))
            .min_size(BUTTON_SIZE)
            .fill(color);
    }
    if current {
        button = button.stroke(egui::Stroke::new(2.0, ui.visuals().strong_text_color()));
    }
    ui.add(button)
}
