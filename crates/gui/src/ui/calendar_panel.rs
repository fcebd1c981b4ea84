//! Month calendar: navigation, day selection and recorded-day markers.

use egui::Ui;

use crate::calendar::{DayCell, MonthGrid};
use crate::i18n::{self, t};
use crate::state::AppState;

const CELL_SIZE: egui::Vec2 = egui::vec2(34.0, 30.0);
const DATA_DOT: egui::Color32 = egui::Color32::from_rgb(230, 80, 60);

pub fn show(ui: &mut Ui, state: &mut AppState) {
    let lang = state.lang;

    ui.add_enabled_ui(state.is_ready(), |ui| {
        ui.horizontal(|ui| {
            if ui.button(t(lang, "cal.prev")).on_hover_text(t(lang, "tip.prev_month")).clicked() {
                state.prev_month();
            }
            ui.strong(i18n::month_header(lang, state.cursor.year(), state.cursor.month()));
            if ui.button(t(lang, "cal.next")).on_hover_text(t(lang, "tip.next_month")).clicked() {
                state.next_month();
            }
            if ui.button(t(lang, "cal.today")).clicked() {
                state.select_today();
            }
        });
        ui.add_space(6.0);

        let store = &state.store;
        let grid = MonthGrid::build(state.cursor, state.selection.date, state.today, |key| {
            store.has_data(key)
        });

        let mut picked = None;
        egui::Grid::new("month_grid")
            .spacing(egui::vec2(2.0, 2.0))
            .show(ui, |ui| {
                for label in i18n::weekday_labels(lang) {
                    ui.weak(label);
                }
                ui.end_row();

                for week in grid.weeks() {
                    for slot in week {
                        match slot {
                            Some(cell) => {
                                if day_cell(ui, cell).clicked() {
                                    picked = Some(cell.date);
                                }
                            }
                            None => {
                                ui.allocate_exact_size(CELL_SIZE, egui::Sense::hover());
                            }
                        }
                    }
                    ui.end_row();
                }
            });

        if let Some(date) = picked {
            state.select_date(date);
        }

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            let (rect, _) = ui.allocate_exact_size(egui::vec2(10.0, 10.0), egui::Sense::hover());
            ui.painter().circle_filled(rect.center(), 3.0, DATA_DOT);
            ui.weak(t(lang, "cal.legend_data"));
        });
    });
}

fn day_cell(ui: &mut Ui, cell: &DayCell) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(CELL_SIZE, egui::Sense::click());
    if !ui.is_rect_visible(rect) {
        return response;
    }

    let visuals = ui.visuals();
    let painter = ui.painter();
    let fill = if cell.selected {
        visuals.selection.bg_fill
    } else if response.hovered() {
        visuals.widgets.hovered.weak_bg_fill
    } else {
        egui::Color32::TRANSPARENT
    };
    painter.rect_filled(rect, 4.0, fill);
    if cell.today {
        painter.rect_stroke(
            rect.shrink(1.0),
            4.0,
            egui::Stroke::new(1.5, visuals.warn_fg_color),
            egui::StrokeKind::Inside,
        );
    }

    painter.text(
        rect.center() - egui::vec2(0.0, 3.0),
        egui::Align2::CENTER_CENTER,
        cell.day().to_string(),
        egui::TextStyle::Body.resolve(ui.style()),
        visuals.text_color(),
    );
    if cell.has_data {
        painter.circle_filled(rect.center_bottom() - egui::vec2(0.0, 5.0), 2.5, DATA_DOT);
    }

    response.on_hover_text(cell.key.as_str())
}
