//! JSON command protocol for scripted sessions.
//!
//! Each command maps onto one controller operation, executed against a
//! [`TestHarness`], so a session can be replayed without a window.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::harness::TestHarness;
use crate::i18n::{self, Lang};
use crate::viewport::camera::ViewPreset;

/// A command a script can execute.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum AgentCommand {
    /// Make a date current (`YYYY-MM-DD`).
    SelectDate { date: NaiveDate },
    /// Jump to today.
    Today,
    /// Click where a named part appears on screen.
    ClickPart { part: String },
    /// Click at a viewport position in pixels.
    ClickAt { x: f32, y: f32 },
    /// Press a severity button (0-3).
    SetSeverity { level: u8 },
    /// Close the severity panel.
    ClosePanel,
    SetLanguage { lang: Lang },
    ToggleLanguage,
    PrevMonth,
    NextMonth,
    /// Animate the camera to a preset view and wait for it to finish.
    ResetCamera { view: ViewPreset },
    /// Report the current date, selection and record.
    Inspect,
    /// Return the persisted record blob.
    ExportRecord,
}

/// Response from executing a command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
            data: None,
        }
    }

    fn ok_with_data(data: serde_json::Value) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(msg.into()),
            data: None,
        }
    }
}

/// Execute a single command on the harness.
pub fn execute_command(harness: &mut TestHarness, cmd: AgentCommand) -> CommandResponse {
    match cmd {
        AgentCommand::SelectDate { date } => {
            harness.select_date(date);
            CommandResponse::ok()
        }

        AgentCommand::Today => {
            harness.state.select_today();
            CommandResponse::ok()
        }

        AgentCommand::ClickPart { part } => {
            let hit = harness.click_part_named(&part);
            CommandResponse::ok_with_data(serde_json::json!({ "hit": hit }))
        }

        AgentCommand::ClickAt { x, y } => {
            let hit = harness.click_at(egui::pos2(x, y));
            CommandResponse::ok_with_data(serde_json::json!({ "hit": hit }))
        }

        AgentCommand::SetSeverity { level } => match harness.set_severity(level) {
            Ok(applied) => CommandResponse::ok_with_data(serde_json::json!({ "applied": applied })),
            Err(e) => CommandResponse::err(e.to_string()),
        },

        AgentCommand::ClosePanel => {
            harness.close_panel();
            CommandResponse::ok()
        }

        AgentCommand::SetLanguage { lang } => {
            harness.state.set_language(lang);
            CommandResponse::ok()
        }

        AgentCommand::ToggleLanguage => {
            harness.state.toggle_language();
            CommandResponse::ok_with_data(serde_json::json!({ "lang": harness.state.lang }))
        }

        AgentCommand::PrevMonth => {
            harness.state.prev_month();
            CommandResponse::ok()
        }

        AgentCommand::NextMonth => {
            harness.state.next_month();
            CommandResponse::ok()
        }

        AgentCommand::ResetCamera { view } => {
            harness.reset_camera(view);
            harness.finish_animation();
            CommandResponse::ok()
        }

        AgentCommand::Inspect => {
            let state = &harness.state;
            let key = state.selection.date_key();
            let day: serde_json::Map<String, serde_json::Value> = state
                .store
                .get(&key)
                .into_iter()
                .map(|(part, severity)| (part, serde_json::json!(severity.level())))
                .collect();
            let days: Vec<&str> = state.store.dates_with_data().map(|k| k.as_str()).collect();
            CommandResponse::ok_with_data(serde_json::json!({
                "date": key.as_str(),
                "lang": state.lang,
                "month": i18n::month_header(state.lang, state.cursor.year(), state.cursor.month()),
                "selected_part": state.selection.part(),
                "day": day,
                "days_with_data": days,
                "part_count": state.scene.as_ref().map_or(0, |s| s.part_count()),
            }))
        }

        AgentCommand::ExportRecord => match harness.state.store.serialize() {
            Ok(json) => CommandResponse::ok_with_data(serde_json::json!({ "record_json": json })),
            Err(e) => CommandResponse::err(e.to_string()),
        },
    }
}

/// Parse and execute a single JSON command string.
pub fn execute_json(harness: &mut TestHarness, json: &str) -> Result<CommandResponse, String> {
    let cmd: AgentCommand =
        serde_json::from_str(json).map_err(|e| format!("Invalid command JSON: {e}"))?;
    Ok(execute_command(harness, cmd))
}

/// Parse and execute multiple JSON commands (array).
pub fn execute_json_batch(
    harness: &mut TestHarness,
    json: &str,
) -> Result<Vec<CommandResponse>, String> {
    let cmds: Vec<AgentCommand> =
        serde_json::from_str(json).map_err(|e| format!("Invalid commands JSON: {e}"))?;
    Ok(cmds
        .into_iter()
        .map(|cmd| execute_command(harness, cmd))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn harness() -> TestHarness {
        TestHarness::new(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap())
    }

    #[test]
    fn test_command_serde_select_date() {
        let json = r#"{"command": "select_date", "date": "2024-05-03"}"#;
        let cmd: AgentCommand = serde_json::from_str(json).unwrap();
        match cmd {
            AgentCommand::SelectDate { date } => assert_eq!(date, NaiveDate::from_ymd_opt(2024, 5, 3).unwrap()),
            _ => panic!("Expected SelectDate"),
        }
    }

    #[test]
    fn test_command_serde_reset_camera() {
        let json = r#"{"command": "reset_camera", "view": "back"}"#;
        let cmd: AgentCommand = serde_json::from_str(json).unwrap();
        assert!(matches!(cmd, AgentCommand::ResetCamera { view: ViewPreset::Back }));
    }

    #[test]
    fn test_bad_date_is_a_parse_error() {
        let mut h = harness();
        assert!(execute_json(&mut h, r#"{"command": "select_date", "date": "2024-02-30"}"#).is_err());
    }

    #[test]
    fn test_execute_click_then_severity() {
        let mut h = harness();
        let resp = execute_json(&mut h, r#"{"command": "click_part", "part": "left_forearm"}"#).unwrap();
        assert_eq!(resp.data.unwrap()["hit"], "left_forearm");

        let resp = execute_json(&mut h, r#"{"command": "set_severity", "level": 2}"#).unwrap();
        assert!(resp.success);
        assert_eq!(resp.data.unwrap()["applied"], true);
    }

    #[test]
    fn test_execute_out_of_range_severity_fails() {
        let mut h = harness();
        execute_json(&mut h, r#"{"command": "click_part", "part": "neck"}"#).unwrap();
        let resp = execute_json(&mut h, r#"{"command": "set_severity", "level": 9}"#).unwrap();
        assert!(!resp.success);
        assert!(resp.error.unwrap().contains("invalid argument"));
    }

    #[test]
    fn test_execute_inspect() {
        let mut h = harness();
        execute_json(&mut h, r#"{"command": "set_language", "lang": "en"}"#).unwrap();
        let resp = execute_json(&mut h, r#"{"command": "inspect"}"#).unwrap();
        let data = resp.data.unwrap();
        assert_eq!(data["date"], "2024-05-01");
        assert_eq!(data["month"], "May 2024");
        assert_eq!(data["lang"], "en");
        assert!(data["selected_part"].is_null());
    }

    #[test]
    fn test_execute_invalid_json() {
        let mut h = harness();
        assert!(execute_json(&mut h, "not valid json").is_err());
    }
}
