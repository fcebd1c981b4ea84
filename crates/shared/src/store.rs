//! Per-day pain record: date key → (part name → severity).

use std::collections::BTreeMap;

use crate::date_key::DateKey;
use crate::error::{PainError, Result};
use crate::severity::Severity;

/// Name of a paintable mesh part in the loaded body model.
pub type PartName = String;

/// Severities recorded for one day.
pub type DayRecord = BTreeMap<PartName, Severity>;

/// Sparse in-memory pain record.
///
/// Absence means [`Severity::None`]. A day that is present always holds at
/// least one part.
#[derive(Debug, Clone, Default)]
pub struct PainStore {
    days: BTreeMap<DateKey, DayRecord>,
    /// Monotonically increasing mutation counter
    version: u64,
}

impl PainStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Severities for a day; empty when nothing was recorded.
    pub fn get(&self, date: &DateKey) -> DayRecord {
        self.days.get(date).cloned().unwrap_or_default()
    }

    /// Severity of a single part on a day.
    pub fn severity(&self, date: &DateKey, part: &str) -> Severity {
        self.days
            .get(date)
            .and_then(|day| day.get(part))
            .copied()
            .unwrap_or_default()
    }

    /// Record a severity. `Severity::None` removes the entry, and the day with it
    /// once the day is empty.
    pub fn set_severity(&mut self, date: &DateKey, part: &str, severity: Severity) {
        let changed = if severity.is_none() {
            let Some(day) = self.days.get_mut(date) else {
                return;
            };
            let removed = day.remove(part).is_some();
            if day.is_empty() {
                self.days.remove(date);
            }
            removed
        } else {
            let previous = self
                .days
                .entry(date.clone())
                .or_default()
                .insert(part.to_string(), severity);
            previous != Some(severity)
        };

        if changed {
            self.version += 1;
            tracing::debug!("pain record: {date} {part} = {severity}");
        }
    }

    /// Integer entry point used by UI and command input.
    pub fn set_severity_level(&mut self, date: &DateKey, part: &str, level: u8) -> Result<()> {
        let severity = Severity::from_level(level)?;
        self.set_severity(date, part, severity);
        Ok(())
    }

    /// Whether anything is recorded for the day.
    pub fn has_data(&self, date: &DateKey) -> bool {
        self.days.get(date).is_some_and(|day| !day.is_empty())
    }

    /// Days that hold at least one entry, in ascending order.
    pub fn dates_with_data(&self) -> impl Iterator<Item = &DateKey> {
        self.days.keys()
    }

    /// Number of days with data
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Current version (increments on every effective mutation)
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Snapshot the whole record as JSON.
    pub fn serialize(&self) -> Result<String> {
        serde_json::to_string(&self.days)
            .map_err(|e| PainError::Serialize(e.to_string()))
    }

    /// Parse a JSON snapshot.
    ///
    /// The payload must be an object of objects whose values are levels 1..=3
    /// keyed by canonical date keys. Empty day objects are dropped.
    pub fn deserialize(payload: &str) -> Result<Self> {
        let raw: BTreeMap<String, BTreeMap<String, u8>> = serde_json::from_str(payload)
            .map_err(|e| PainError::CorruptData(format!("not a pain record: {e}")))?;

        let mut days = BTreeMap::new();
        for (raw_key, raw_day) in raw {
            let key = DateKey::parse(&raw_key)?;
            let mut day = DayRecord::new();
            for (part, level) in raw_day {
                let severity = match Severity::from_level(level) {
                    Ok(s) if !s.is_none() => s,
                    _ => {
                        return Err(PainError::CorruptData(format!(
                            "invalid severity {level} for '{part}' on {key}"
                        )))
                    }
                };
                day.insert(part, severity);
            }
            if !day.is_empty() {
                days.insert(key, day);
            }
        }

        Ok(Self { days, version: 0 })
    }

    /// Deserialize a stored payload, falling back to an empty record when it is
    /// missing or unreadable.
    pub fn load_or_empty(payload: Option<&str>) -> Self {
        match payload {
            None => Self::new(),
            Some(json) => match Self::deserialize(json) {
                Ok(store) => {
                    tracing::info!("Loaded pain record ({} days)", store.len());
                    store
                }
                Err(e) => {
                    tracing::warn!("Discarding stored pain record: {e}");
                    Self::new()
                }
            },
        }
    }
}

/// Records compare by content; the version counter is bookkeeping.
impl PartialEq for PainStore {
    fn eq(&self, other: &Self) -> bool {
        self.days == other.days
    }
}

impl Eq for PainStore {}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(raw: &str) -> DateKey {
        DateKey::parse(raw).unwrap()
    }

    #[test]
    fn test_set_then_get() {
        let mut store = PainStore::new();
        let day = key("2024-05-01");
        store.set_severity(&day, "forearm", Severity::Medium);

        let record = store.get(&day);
        assert_eq!(record.len(), 1);
        assert_eq!(record["forearm"], Severity::Medium);
        assert!(store.has_data(&day));
    }

    #[test]
    fn test_get_missing_day_is_empty() {
        let store = PainStore::new();
        assert!(store.get(&key("2024-01-01")).is_empty());
        assert!(!store.has_data(&key("2024-01-01")));
    }

    #[test]
    fn test_zero_removes_entry_and_prunes_day() {
        let mut store = PainStore::new();
        let day = key("2024-05-01");
        store.set_severity(&day, "forearm", Severity::Medium);
        store.set_severity(&day, "forearm", Severity::None);

        assert!(!store.get(&day).contains_key("forearm"));
        assert!(!store.has_data(&day));
        assert!(store.is_empty());
    }

    #[test]
    fn test_zero_keeps_other_parts() {
        let mut store = PainStore::new();
        let day = key("2024-05-01");
        store.set_severity(&day, "forearm", Severity::Weak);
        store.set_severity(&day, "calf", Severity::Strong);
        store.set_severity(&day, "forearm", Severity::None);

        assert_eq!(store.get(&day).len(), 1);
        assert!(store.has_data(&day));
    }

    #[test]
    fn test_invalid_level_rejected_without_mutation() {
        let mut store = PainStore::new();
        let day = key("2024-05-01");
        let err = store.set_severity_level(&day, "forearm", 4).unwrap_err();
        assert!(matches!(err, PainError::InvalidArgument(_)));
        assert!(store.is_empty());
        assert_eq!(store.version(), 0);
    }

    #[test]
    fn test_version_counts_effective_changes_only() {
        let mut store = PainStore::new();
        let day = key("2024-05-01");
        store.set_severity(&day, "neck", Severity::Weak);
        store.set_severity(&day, "neck", Severity::Weak);
        store.set_severity(&day, "calf", Severity::None);
        assert_eq!(store.version(), 1);
        store.set_severity(&day, "neck", Severity::Strong);
        assert_eq!(store.version(), 2);
    }

    #[test]
    fn test_serialize_roundtrip() {
        let mut store = PainStore::new();
        store.set_severity(&key("2024-05-01"), "forearm", Severity::Medium);
        store.set_severity(&key("2024-05-01"), "neck", Severity::Weak);
        store.set_severity(&key("2024-06-12"), "left_calf", Severity::Strong);
        store.set_severity(&key("2024-06-13"), "chest", Severity::Weak);
        store.set_severity(&key("2024-06-13"), "chest", Severity::None);

        let json = store.serialize().unwrap();
        let back = PainStore::deserialize(&json).unwrap();
        assert_eq!(back, store);
        assert_eq!(back.len(), 2);
    }

    #[test]
    fn test_serialized_shape() {
        let mut store = PainStore::new();
        store.set_severity(&key("2024-05-01"), "forearm", Severity::Medium);
        assert_eq!(store.serialize().unwrap(), r#"{"2024-05-01":{"forearm":2}}"#);
    }

    #[test]
    fn test_error_classes_are_distinct() {
        let err = PainError::Serialize("key must be a string".into());
        assert_eq!(err.to_string(), "cannot serialize pain data: key must be a string");
        assert_ne!(err, PainError::InvalidArgument("key must be a string".into()));
        assert!(matches!(PainStore::deserialize("[]"), Err(PainError::CorruptData(_))));
    }

    #[test]
    fn test_deserialize_rejects_wrong_shapes() {
        for payload in [
            "not json",
            "[]",
            r#"{"2024-05-01": 2}"#,
            r#"{"2024-05-01": {"forearm": "2"}}"#,
            r#"{"2024-05-01": {"forearm": 4}}"#,
            r#"{"2024-05-01": {"forearm": 0}}"#,
            r#"{"2024-05-01": {"forearm": -1}}"#,
            r#"{"May 1st": {"forearm": 1}}"#,
        ] {
            assert!(
                matches!(PainStore::deserialize(payload), Err(PainError::CorruptData(_))),
                "{payload}"
            );
        }
    }

    #[test]
    fn test_deserialize_prunes_empty_days() {
        let store = PainStore::deserialize(r#"{"2024-05-01": {}, "2024-05-02": {"neck": 1}}"#).unwrap();
        assert!(!store.has_data(&key("2024-05-01")));
        assert!(store.has_data(&key("2024-05-02")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_load_or_empty_falls_back() {
        assert!(PainStore::load_or_empty(Some("{broken")).is_empty());
        assert!(PainStore::load_or_empty(None).is_empty());
        let store = PainStore::load_or_empty(Some(r#"{"2024-05-02": {"neck": 3}}"#));
        assert_eq!(store.severity(&key("2024-05-02"), "neck"), Severity::Strong);
    }
}
