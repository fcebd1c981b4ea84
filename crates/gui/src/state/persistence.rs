//! Writing the pain record through the host's key-value storage

use shared::STORAGE_KEY;

use super::AppState;

impl AppState {
    /// Read the persisted record blob, if any.
    pub fn stored_record(storage: Option<&dyn eframe::Storage>) -> Option<String> {
        storage.and_then(|s| s.get_string(STORAGE_KEY))
    }

    /// Whether the record changed since it was last written
    pub fn has_unsaved_changes(&self) -> bool {
        self.store.version() != self.saved_version
    }

    /// Write the record under [`STORAGE_KEY`] if it changed since the last
    /// write, then flush. Returns true if something was written.
    pub fn persist_if_changed(&mut self, storage: &mut dyn eframe::Storage) -> bool {
        if !self.has_unsaved_changes() {
            return false;
        }
        match self.store.serialize() {
            Ok(json) => {
                storage.set_string(STORAGE_KEY, json);
                storage.flush();
                self.saved_version = self.store.version();
                tracing::debug!("Persisted pain record (version {})", self.saved_version);
                true
            }
            Err(e) => {
                tracing::error!("Failed to serialize pain record: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use eframe::Storage;
    use shared::{DateKey, Severity};

    use crate::fixtures::{self, MemoryStorage};

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn test_nothing_written_without_mutation() {
        let mut state = fixtures::mannequin_state(day());
        let mut storage = MemoryStorage::default();
        assert!(!state.persist_if_changed(&mut storage));
        assert_eq!(storage.get_string(shared::STORAGE_KEY), None);
    }

    #[test]
    fn test_written_once_per_change() {
        let mut state = fixtures::mannequin_state(day());
        let mut storage = MemoryStorage::default();
        state.select_part_named("left_calf");
        state.set_selected_severity(2).unwrap();

        assert!(state.persist_if_changed(&mut storage));
        assert!(!state.persist_if_changed(&mut storage));
        assert_eq!(storage.flushes, 1);
        assert_eq!(
            storage.get_string(shared::STORAGE_KEY).as_deref(),
            Some(r#"{"2024-05-01":{"left_calf":2}}"#)
        );
    }

    #[test]
    fn test_setting_same_value_does_not_rewrite() {
        let mut state = fixtures::mannequin_state(day());
        let mut storage = MemoryStorage::default();
        state.select_part_named("neck");
        state.set_selected_severity(1).unwrap();
        state.persist_if_changed(&mut storage);

        state.set_selected_severity(1).unwrap();
        assert!(!state.persist_if_changed(&mut storage));
    }

    #[test]
    fn test_reload_restores_record_and_colours() {
        let mut storage = MemoryStorage::default();
        {
            let mut state = fixtures::mannequin_state(day());
            state.select_part_named("head");
            state.set_selected_severity(3).unwrap();
            state.persist_if_changed(&mut storage);
        }

        let state = fixtures::mannequin_state_from(day(), Some(&storage));
        assert_eq!(state.store.severity(&DateKey::from_date(day()), "head"), Severity::Strong);
        assert!(state.scene.as_ref().unwrap().part("head").unwrap().appearance.is_overridden());
        assert!(!state.has_unsaved_changes());
    }

    #[test]
    fn test_corrupt_blob_gives_empty_record() {
        let mut storage = MemoryStorage::default();
        storage.set_string(shared::STORAGE_KEY, "{\"2024-05-01\": [1, 2]}".to_string());
        let state = fixtures::mannequin_state_from(day(), Some(&storage));
        assert!(state.store.is_empty());
    }
}
