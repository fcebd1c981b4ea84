//! Canonical `YYYY-MM-DD` keys for calendar days.

use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use crate::error::PainError;

/// Key identifying one calendar day, independent of time of day.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateKey(String);

impl DateKey {
    /// Encode a calendar date. Month and day are zero-padded.
    pub fn from_date(date: NaiveDate) -> Self {
        Self(format!(
            "{:04}-{:02}-{:02}",
            date.year(),
            date.month(),
            date.day()
        ))
    }

    /// Encode the calendar date of a point in time, as seen in its own time zone.
    pub fn from_datetime<Tz: TimeZone>(datetime: &DateTime<Tz>) -> Self {
        Self::from_date(datetime.date_naive())
    }

    /// Validate a persisted key. Only used when loading stored records.
    pub fn parse(raw: &str) -> Result<Self, PainError> {
        let well_formed = raw.len() == 10
            && raw
                .bytes()
                .enumerate()
                .all(|(i, b)| if i == 4 || i == 7 { b == b'-' } else { b.is_ascii_digit() });
        if !well_formed {
            return Err(PainError::CorruptData(format!("malformed date key '{raw}'")));
        }
        let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|e| PainError::CorruptData(format!("invalid date key '{raw}': {e}")))?;
        Ok(Self::from_date(date))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self::from_date(date)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, NaiveTime, Utc};

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_zero_pads_month_and_day() {
        assert_eq!(DateKey::from_date(date(2024, 5, 1)).as_str(), "2024-05-01");
        assert_eq!(DateKey::from_date(date(2023, 12, 31)).as_str(), "2023-12-31");
    }

    #[test]
    fn test_time_of_day_is_ignored() {
        let tz = FixedOffset::east_opt(9 * 3600).unwrap();
        let morning = tz.from_local_datetime(&date(2024, 5, 1).and_time(NaiveTime::from_hms_opt(0, 0, 1).unwrap())).unwrap();
        let night = tz.from_local_datetime(&date(2024, 5, 1).and_time(NaiveTime::from_hms_opt(23, 59, 59).unwrap())).unwrap();
        assert_eq!(DateKey::from_datetime(&morning), DateKey::from_datetime(&night));
        assert_eq!(DateKey::from_datetime(&morning).as_str(), "2024-05-01");
    }

    #[test]
    fn test_uses_date_of_the_datetimes_own_zone() {
        // 23:30 in UTC+9 is still 14:30 UTC on the same day, but 00:30 in UTC+9
        // belongs to the previous UTC day.
        let tz = FixedOffset::east_opt(9 * 3600).unwrap();
        let early = tz.from_local_datetime(&date(2024, 5, 2).and_time(NaiveTime::from_hms_opt(0, 30, 0).unwrap())).unwrap();
        assert_eq!(DateKey::from_datetime(&early).as_str(), "2024-05-02");
        assert_eq!(DateKey::from_datetime(&early.with_timezone(&Utc)).as_str(), "2024-05-01");
    }

    #[test]
    fn test_parse_accepts_canonical_keys_only() {
        assert_eq!(DateKey::parse("2024-02-29").unwrap().as_str(), "2024-02-29");
        for bad in ["2024-2-29", "2023-02-29", "2024/02/01", "", "20240201", "2024-13-01"] {
            assert!(matches!(DateKey::parse(bad), Err(PainError::CorruptData(_))), "{bad}");
        }
    }
}
