use chrono::NaiveDate;
use shared::{DateKey, PartName};

/// Current calendar date and the part whose severity panel is open
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectionState {
    /// Exactly one date is always selected
    pub date: NaiveDate,
    /// Set by a part click, cleared when the panel closes
    part: Option<PartName>,
}

impl SelectionState {
    pub fn new(date: NaiveDate) -> Self {
        Self { date, part: None }
    }

    pub fn date_key(&self) -> DateKey {
        DateKey::from_date(self.date)
    }

    pub fn part(&self) -> Option<&str> {
        self.part.as_deref()
    }

    pub fn has_part(&self) -> bool {
        self.part.is_some()
    }

    pub fn select_part(&mut self, name: impl Into<PartName>) {
        self.part = Some(name.into());
    }

    pub fn clear_part(&mut self) {
        self.part = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_selection_lifecycle() {
        let mut sel = SelectionState::new(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert!(!sel.has_part());
        assert_eq!(sel.date_key().as_str(), "2024-05-01");

        sel.select_part("left_forearm");
        assert_eq!(sel.part(), Some("left_forearm"));

        sel.clear_part();
        assert_eq!(sel.part(), None);
        assert_eq!(sel.date, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
    }
}
