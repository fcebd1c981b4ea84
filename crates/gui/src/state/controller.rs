//! Event handlers: calendar, part clicks, severity buttons, camera resets.

use chrono::NaiveDate;
use shared::{PainError, PartName, Severity};

use super::AppState;
use crate::appearance;
use crate::calendar::MonthCursor;
use crate::i18n::Lang;
use crate::viewport::camera::{AnimationToken, ViewPreset};
use crate::viewport::picking;

impl AppState {
    /// Make `date` current and repaint the body for it.
    pub fn select_date(&mut self, date: NaiveDate) {
        if self.selection.date == date {
            return;
        }
        self.selection.date = date;
        if !self.cursor.contains(date) {
            self.cursor = MonthCursor::containing(date);
        }
        tracing::debug!("Selected date {}", self.selection.date_key());
        self.repaint_all();
    }

    /// Jump the calendar and selection to the real current date.
    pub fn select_today(&mut self) {
        self.select_date(self.today);
        self.cursor = MonthCursor::containing(self.today);
    }

    /// Resolve a click in the viewport. On a hit the part becomes selected
    /// and its severity panel opens; a miss changes nothing.
    pub fn click_part(&mut self, pointer: egui::Pos2, rect: egui::Rect) -> Option<PartName> {
        let scene = self.scene.as_ref()?;
        let hit = picking::resolve(pointer, rect, &self.view.camera, scene)?;
        self.selection.select_part(hit.name.clone());
        Some(hit.name)
    }

    /// Select a part by name, as a click on it would.
    pub fn select_part_named(&mut self, name: &str) -> bool {
        match self.scene.as_ref().and_then(|s| s.part(name)) {
            Some(_) => {
                self.selection.select_part(name);
                true
            }
            None => false,
        }
    }

    /// Record `level` for the selected part on the selected date.
    ///
    /// Returns `Ok(false)` when no part is selected. Levels outside 0..=3
    /// are rejected before anything is touched.
    pub fn set_selected_severity(&mut self, level: u8) -> Result<bool, PainError> {
        let severity = Severity::from_level(level)?;
        let Some(part) = self.selection.part().map(str::to_owned) else {
            return Ok(false);
        };
        let Some(scene) = self.scene.as_mut() else {
            return Ok(false);
        };

        let key = self.selection.date_key();
        self.store.set_severity(&key, &part, severity);
        for node in scene.parts_named_mut(&part) {
            appearance::apply(&mut node.appearance, severity);
        }
        tracing::info!("{} {} -> {}", key, part, severity);
        Ok(true)
    }

    /// Close the severity panel. Recorded data is left as is.
    pub fn close_panel(&mut self) {
        self.selection.clear_part();
    }

    pub fn set_language(&mut self, lang: Lang) {
        if self.lang != lang {
            self.lang = lang;
            self.settings.ui.language = lang;
            self.settings_dirty = true;
        }
    }

    pub fn toggle_language(&mut self) {
        self.set_language(self.lang.toggled());
    }

    pub fn prev_month(&mut self) {
        self.cursor = self.cursor.prev();
    }

    pub fn next_month(&mut self) {
        self.cursor = self.cursor.next();
    }

    /// Start animating the camera to a preset, replacing any running reset.
    pub fn reset_camera(&mut self, preset: ViewPreset, now: f64) -> AnimationToken {
        let from = self.view.camera.pose();
        let mut to = self.preset_pose(preset);
        // Take the short way round
        let delta = (to.yaw - from.yaw + std::f32::consts::PI).rem_euclid(std::f32::consts::TAU)
            - std::f32::consts::PI;
        to.yaw = from.yaw + delta;

        let duration = self.settings.viewport.camera_reset_secs;
        self.view.animator.start(from, to, now, duration)
    }

    /// Advance the camera animation. True while it is still running.
    pub fn tick_camera(&mut self, now: f64) -> bool {
        self.view.animator.tick(now, &mut self.view.camera)
    }

    /// The user grabbed the camera; stop any reset in flight.
    pub fn begin_camera_drag(&mut self) {
        self.view.animator.cancel();
    }
}
