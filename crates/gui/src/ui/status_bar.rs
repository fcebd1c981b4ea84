use egui::Ui;

use crate::i18n::t;
use crate::state::AppState;

pub fn show(ui: &mut Ui, state: &AppState) {
    let lang = state.lang;
    ui.horizontal(|ui| {
        let key = state.selection.date_key();
        ui.weak(format!("{}: {}", t(lang, "status.date"), key.as_str()));
        ui.separator();

        let recorded = state.store.get(&key).len();
        ui.weak(format!("{}: {recorded}", t(lang, "status.recorded")));
        ui.separator();
        ui.weak(format!("{}: {}", t(lang, "status.days"), state.store.len()));
        ui.separator();

        if let Some(err) = &state.load_error {
            ui.colored_label(ui.visuals().error_fg_color, format!("{}: {err}", t(lang, "err.model")));
        } else if let Some(notice) = &state.notice {
            ui.label(notice);
        } else {
            ui.weak(t(lang, "status.hint"));
        }

        // Right-aligned version
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.weak(concat!("musclemap v", env!("CARGO_PKG_VERSION")));
        });
    });
}
