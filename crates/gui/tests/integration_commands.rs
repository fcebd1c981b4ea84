//! Scripted sessions through the JSON command protocol.

use chrono::NaiveDate;
use musclemap_gui_lib::command::{execute_json, execute_json_batch};
use musclemap_gui_lib::harness::TestHarness;

fn harness() -> TestHarness {
    TestHarness::new(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap())
}

#[test]
fn test_batch_session() {
    let mut h = harness();
    let script = r#"[
        {"command": "select_date", "date": "2024-05-03"},
        {"command": "click_part", "part": "left_calf"},
        {"command": "set_severity", "level": 3},
        {"command": "close_panel"},
        {"command": "inspect"}
    ]"#;

    let responses = execute_json_batch(&mut h, script).unwrap();
    assert_eq!(responses.len(), 5);
    assert!(responses.iter().all(|r| r.success));

    let inspect = responses[4].data.as_ref().unwrap();
    assert_eq!(inspect["date"], "2024-05-03");
    assert_eq!(inspect["day"]["left_calf"], 3);
    assert_eq!(inspect["days_with_data"][0], "2024-05-03");
    assert!(inspect["selected_part"].is_null());
}

#[test]
fn test_export_record_matches_storage() {
    let mut h = harness();
    execute_json(&mut h, r#"{"command": "click_part", "part": "head"}"#).unwrap();
    execute_json(&mut h, r#"{"command": "set_severity", "level": 1}"#).unwrap();

    let resp = execute_json(&mut h, r#"{"command": "export_record"}"#).unwrap();
    let data = resp.data.unwrap();
    assert_eq!(data["record_json"], r#"{"2024-05-01":{"head":1}}"#);
    assert_eq!(h.persisted(), Some(r#"{"2024-05-01":{"head":1}}"#));
}

#[test]
fn test_month_navigation_and_language() {
    let mut h = harness();
    let script = r#"[
        {"command": "set_language", "lang": "en"},
        {"command": "prev_month"},
        {"command": "prev_month"},
        {"command": "inspect"}
    ]"#;
    let responses = execute_json_batch(&mut h, script).unwrap();
    let inspect = responses[3].data.as_ref().unwrap();
    assert_eq!(inspect["month"], "March 2024");
    // Navigating months does not change the selected date
    assert_eq!(inspect["date"], "2024-05-01");

    let resp = execute_json(&mut h, r#"{"command": "toggle_language"}"#).unwrap();
    assert_eq!(resp.data.unwrap()["lang"], "ja");
}

#[test]
fn test_click_on_empty_space_reports_no_hit() {
    let mut h = harness();
    let resp = execute_json(&mut h, r#"{"command": "click_at", "x": 2.0, "y": 2.0}"#).unwrap();
    assert!(resp.success);
    assert!(resp.data.unwrap()["hit"].is_null());
}
