//! Factory functions for test data.
//!
//! Provides the sample body scene, ready-made application states and an
//! in-memory `eframe::Storage`, shared by unit tests, integration tests and
//! the command interface.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use glam::{Mat4, Vec3};

use crate::appearance::Material;
use crate::asset::{self, mannequin, AssetError};
use crate::scene::{NodeKind, SceneGraph};
use crate::state::{AppSettings, AppState};
use crate::viewport::mesh;

// ── Scenes ──────────────────────────────────────────────────────

/// The procedural sample body, loaded through the GLB path.
pub fn mannequin_scene() -> Result<SceneGraph, AssetError> {
    asset::body_model_from_glb(&mannequin::mannequin_glb()?)
}

/// One body part with an environment panel between it and a front camera.
pub fn occluded_scene() -> SceneGraph {
    let mut scene = SceneGraph::new();
    scene.add_body_part(
        "target",
        mesh::cube(0.4, 0.4, 0.4, [1.0; 3]).transformed(&Mat4::from_translation(Vec3::new(0.0, 0.9, 0.0))),
        Arc::new(Material::default()),
    );
    scene.add_environment(
        "glass",
        NodeKind::Mesh,
        Some(mesh::cube(1.0, 1.0, 0.02, [1.0; 3]).transformed(&Mat4::from_translation(Vec3::new(0.0, 0.9, 1.0)))),
        Arc::new(Material::default()),
    );
    scene
}

// ── States ──────────────────────────────────────────────────────

/// State over the sample body with an empty record and default settings.
pub fn mannequin_state(today: NaiveDate) -> AppState {
    AppState::new(mannequin_scene(), None, AppSettings::default(), today)
}

/// State over the sample body, reading the record from `storage`.
pub fn mannequin_state_from(today: NaiveDate, storage: Option<&MemoryStorage>) -> AppState {
    let persisted = AppState::stored_record(storage.map(|s| s as &dyn eframe::Storage));
    AppState::new(mannequin_scene(), persisted.as_deref(), AppSettings::default(), today)
}

/// State whose body model failed to load.
pub fn failed_state(today: NaiveDate) -> AppState {
    AppState::new(
        Err(AssetError::InvalidContainer("missing glTF magic".into())),
        None,
        AppSettings::default(),
        today,
    )
}

// ── Convenience helpers ───────────────────────────────────────

/// Calendar date from parts, `None` when it does not exist.
pub fn date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Key-value storage kept in memory, counting flushes.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    pub values: HashMap<String, String>,
    pub flushes: usize,
}

impl eframe::Storage for MemoryStorage {
    fn get_string(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set_string(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }

    fn flush(&mut self) {
        self.flushes += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mannequin_state_is_ready() {
        let state = mannequin_state(date(2024, 5, 1).unwrap());
        assert!(state.is_ready());
        assert!(state.load_error.is_none());
        assert_eq!(state.scene.as_ref().unwrap().part_count(), mannequin::PART_NAMES.len());
    }

    #[test]
    fn test_failed_state_keeps_message() {
        let state = failed_state(date(2024, 5, 1).unwrap());
        assert!(!state.is_ready());
        assert!(state.load_error.as_deref().unwrap().contains("magic"));
    }

    #[test]
    fn test_occluded_scene_roles() {
        let scene = occluded_scene();
        assert_eq!(scene.part_count(), 1);
        assert_eq!(scene.nodes.len(), 2);
    }

    #[test]
    fn test_date_rejects_impossible_days() {
        assert!(date(2023, 2, 29).is_none());
        assert!(date(2024, 2, 29).is_some());
    }
}
