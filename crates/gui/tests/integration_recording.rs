//! End-to-end recording scenarios through the headless harness.

use chrono::NaiveDate;
use glam::Vec3;
use musclemap_gui_lib::fixtures::{self, MemoryStorage};
use musclemap_gui_lib::harness::TestHarness;
use musclemap_gui_lib::viewport::camera::ViewPreset;
use musclemap_gui_lib::viewport::picking::{self, Ray};
use shared::Severity;

fn may_first() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
}

#[test]
fn test_record_forearm_pain() {
    let mut h = TestHarness::new(may_first());
    assert_eq!(h.click_part_named("left_forearm").as_deref(), Some("left_forearm"));
    assert!(h.set_severity(2).unwrap());

    let day = h.day(may_first());
    assert_eq!(day.len(), 1);
    assert_eq!(day.get("left_forearm"), Some(&Severity::Medium));
    assert!(h.has_data(may_first()));
    assert!(h.is_painted("left_forearm"));
    assert_eq!(h.persisted(), Some(r#"{"2024-05-01":{"left_forearm":2}}"#));
}

#[test]
fn test_severity_zero_clears_entry_and_day() {
    let mut h = TestHarness::new(may_first());
    h.click_part_named("left_forearm");
    h.set_severity(2).unwrap();
    h.set_severity(0).unwrap();

    assert!(h.day(may_first()).is_empty());
    assert!(!h.has_data(may_first()));
    assert!(!h.is_painted("left_forearm"));
    assert_eq!(h.persisted(), Some("{}"));
}

#[test]
fn test_miss_click_changes_nothing() {
    let mut h = TestHarness::new(may_first());
    assert_eq!(h.click_empty(), None);
    assert_eq!(h.selected_part(), None);
    assert!(!h.set_severity(3).unwrap());
    assert!(h.day(may_first()).is_empty());
    assert_eq!(h.persisted(), None);
}

#[test]
fn test_out_of_range_severity_is_rejected() {
    let mut h = TestHarness::new(may_first());
    h.click_part_named("neck");
    h.set_severity(1).unwrap();

    assert!(h.set_severity(4).is_err());
    assert_eq!(h.severity("neck"), Severity::Weak);
}

#[test]
fn test_close_panel_keeps_record() {
    let mut h = TestHarness::new(may_first());
    h.click_part_named("chest");
    h.set_severity(3).unwrap();
    h.close_panel();

    assert_eq!(h.selected_part(), None);
    assert_eq!(h.severity("chest"), Severity::Strong);
}

#[test]
fn test_colours_follow_selected_date() {
    let mut h = TestHarness::new(may_first());
    h.click_part_named("right_calf");
    h.set_severity(3).unwrap();

    let next_day = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
    h.select_date(next_day);
    assert!(!h.is_painted("right_calf"));
    assert_eq!(h.severity("right_calf"), Severity::None);

    h.select_date(may_first());
    assert!(h.is_painted("right_calf"));
}

#[test]
fn test_restart_round_trip() {
    let mut h = TestHarness::new(may_first());
    h.click_part_named("left_thigh");
    h.set_severity(1).unwrap();
    h.select_date(NaiveDate::from_ymd_opt(2024, 4, 28).unwrap());
    h.click_part_named("head");
    h.set_severity(3).unwrap();

    let h = h.restart();
    assert_eq!(h.day(may_first()).get("left_thigh"), Some(&Severity::Weak));
    assert_eq!(
        h.day(NaiveDate::from_ymd_opt(2024, 4, 28).unwrap()).get("head"),
        Some(&Severity::Strong)
    );
    // Restart opens on today
    assert!(h.is_painted("left_thigh"));
    assert!(!h.is_painted("head"));
}

#[test]
fn test_corrupt_storage_starts_empty() {
    let mut storage = MemoryStorage::default();
    storage
        .values
        .insert(shared::STORAGE_KEY.to_string(), "{not json".to_string());

    let mut h = TestHarness::with_storage(may_first(), storage);
    assert!(h.state.store.is_empty());

    // The next change overwrites the corrupt blob
    h.click_part_named("neck");
    h.set_severity(2).unwrap();
    assert_eq!(h.persisted(), Some(r#"{"2024-05-01":{"neck":2}}"#));
}

#[test]
fn test_environment_is_never_picked() {
    let scene = fixtures::occluded_scene();
    let ray = Ray {
        origin: Vec3::new(0.0, 0.9, 5.0),
        direction: Vec3::new(0.0, 0.0, -1.0),
    };

    let all = picking::intersect_scene(&ray, &scene);
    assert_eq!(all.len(), 2);
    assert_eq!(scene.nodes[all[0].0].name, "glass");

    let hit = picking::resolve_ray(&ray, &scene).unwrap();
    assert_eq!(hit.name, "target");
}

#[test]
fn test_calendar_marks_today_and_recorded_days() {
    let today = NaiveDate::from_ymd_opt(2024, 5, 15).unwrap();
    let mut h = TestHarness::new(today);
    h.select_date(may_first());
    h.click_part_named("pelvis");
    h.set_severity(2).unwrap();

    let grid = h.month_grid();
    assert_eq!(grid.month, 5);
    // 2024-05-01 is a Wednesday
    assert_eq!(grid.leading_blanks, 3);
    let marked: Vec<u32> = grid.cells.iter().filter(|c| c.has_data).map(|c| c.day()).collect();
    assert_eq!(marked, vec![1]);
    assert!(grid.cells[14].today);
    assert!(grid.cells[0].selected);
}

#[test]
fn test_failed_model_disables_recording() {
    let mut state = fixtures::failed_state(may_first());
    assert!(!state.is_ready());
    assert!(state.load_error.is_some());

    let rect = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(800.0, 600.0));
    assert_eq!(state.click_part(rect.center(), rect), None);
    assert!(!state.set_selected_severity(2).unwrap());
}

#[test]
fn test_back_view_click_records_same_part() {
    let mut h = TestHarness::new(may_first());
    h.reset_camera(ViewPreset::Back);
    h.finish_animation();

    assert_eq!(h.click_part_named("right_shoulder").as_deref(), Some("right_shoulder"));
    h.set_severity(1).unwrap();
    assert_eq!(h.severity("right_shoulder"), Severity::Weak);
}
