//! Headless test harness driving the application state like the GUI does.
//!
//! Clicks go through the real camera and picking path: a part is clicked by
//! projecting its bounds centre into a fixed-size viewport.

use chrono::NaiveDate;
use shared::{DateKey, DayRecord, PainError, PartName, Severity};

use crate::calendar::MonthGrid;
use crate::fixtures::{self, MemoryStorage};
use crate::state::AppState;
use crate::viewport::camera::{AnimationToken, ViewPreset};

/// Headless harness: application state, in-memory storage and a clock
pub struct TestHarness {
    pub state: AppState,
    pub storage: MemoryStorage,
    /// Viewport rectangle clicks are resolved in
    pub rect: egui::Rect,
    /// Host clock in seconds
    now: f64,
}

impl TestHarness {
    /// Harness over the sample body with "today" set to `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self::with_storage(today, MemoryStorage::default())
    }

    /// Harness starting from previously persisted storage.
    pub fn with_storage(today: NaiveDate, storage: MemoryStorage) -> Self {
        let state = fixtures::mannequin_state_from(today, Some(&storage));
        Self {
            state,
            storage,
            rect: egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(1024.0, 768.0)),
            now: 0.0,
        }
    }

    /// Simulate an application restart over the same storage.
    pub fn restart(self) -> Self {
        let today = self.state.today;
        Self::with_storage(today, self.storage)
    }

    // ── Calendar ──────────────────────────────────────────────

    pub fn select_date(&mut self, date: NaiveDate) {
        self.state.select_date(date);
    }

    pub fn month_grid(&self) -> MonthGrid {
        let store = &self.state.store;
        MonthGrid::build(self.state.cursor, self.state.selection.date, self.state.today, |key| {
            store.has_data(key)
        })
    }

    // ── Picking ───────────────────────────────────────────────

    /// Screen position of a part's bounds centre, if it is on screen.
    pub fn part_screen_pos(&self, name: &str) -> Option<egui::Pos2> {
        let aabb = self.state.scene.as_ref()?.part(name)?.aabb?;
        self.state.view.camera.project(aabb.center(), self.rect)
    }

    /// Click at a screen position in the viewport.
    pub fn click_at(&mut self, pos: egui::Pos2) -> Option<PartName> {
        self.state.click_part(pos, self.rect)
    }

    /// Click where a part appears on screen.
    pub fn click_part_named(&mut self, name: &str) -> Option<PartName> {
        let pos = self.part_screen_pos(name)?;
        self.click_at(pos)
    }

    /// Click the empty top-left corner of the viewport.
    pub fn click_empty(&mut self) -> Option<PartName> {
        self.click_at(self.rect.min + egui::vec2(4.0, 4.0))
    }

    pub fn selected_part(&self) -> Option<&str> {
        self.state.selection.part()
    }

    // ── Recording ─────────────────────────────────────────────

    /// Press a severity button, then persist like the frame loop does.
    pub fn set_severity(&mut self, level: u8) -> Result<bool, PainError> {
        let applied = self.state.set_selected_severity(level)?;
        self.state.persist_if_changed(&mut self.storage);
        Ok(applied)
    }

    pub fn close_panel(&mut self) {
        self.state.close_panel();
    }

    pub fn day(&self, date: NaiveDate) -> DayRecord {
        self.state.store.get(&DateKey::from_date(date))
    }

    pub fn has_data(&self, date: NaiveDate) -> bool {
        self.state.store.has_data(&DateKey::from_date(date))
    }

    /// Severity currently shown on the selected date
    pub fn severity(&self, part: &str) -> Severity {
        self.state.severity_of(part)
    }

    /// Whether a part is drawn with a severity colour
    pub fn is_painted(&self, part: &str) -> bool {
        self.state
            .scene
            .as_ref()
            .and_then(|s| s.part(part))
            .is_some_and(|n| n.appearance.is_overridden())
    }

    /// Raw persisted blob
    pub fn persisted(&self) -> Option<&str> {
        self.storage.values.get(shared::STORAGE_KEY).map(String::as_str)
    }

    // ── Camera ────────────────────────────────────────────────

    pub fn reset_camera(&mut self, preset: ViewPreset) -> AnimationToken {
        self.state.reset_camera(preset, self.now)
    }

    /// Advance the clock and tick the camera. True while still animating.
    pub fn advance(&mut self, secs: f64) -> bool {
        self.now += secs;
        self.state.tick_camera(self.now)
    }

    /// Tick until the running animation finishes.
    pub fn finish_animation(&mut self) {
        while self.advance(1.0 / 60.0) {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn test_every_part_is_clickable_from_its_side() {
        let mut h = TestHarness::new(today());
        for name in ["head", "chest", "left_forearm", "right_thigh", "left_foot"] {
            assert_eq!(h.click_part_named(name).as_deref(), Some(name));
        }
    }

    #[test]
    fn test_empty_corner_hits_nothing() {
        let mut h = TestHarness::new(today());
        assert_eq!(h.click_empty(), None);
        assert_eq!(h.selected_part(), None);
    }

    #[test]
    fn test_back_view_still_resolves_parts() {
        let mut h = TestHarness::new(today());
        h.reset_camera(ViewPreset::Back);
        h.finish_animation();
        assert_eq!(h.click_part_named("pelvis").as_deref(), Some("pelvis"));
    }

    #[test]
    fn test_restart_keeps_record() {
        let mut h = TestHarness::new(today());
        h.click_part_named("neck");
        h.set_severity(2).unwrap();

        let h = h.restart();
        assert_eq!(h.severity("neck"), Severity::Medium);
        assert!(h.is_painted("neck"));
    }
}
