//! Month grid model behind the calendar panel.

use chrono::{Datelike, Months, NaiveDate};
use shared::DateKey;

/// The month currently displayed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonthCursor {
    /// Always the first day of the displayed month
    first: NaiveDate,
}

impl MonthCursor {
    /// Cursor on the month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first: date.with_day(1).unwrap_or(date),
        }
    }

    /// Cursor on `year`/`month` (1-based). `None` if out of range.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| Self { first })
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    /// 1-based month
    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    /// Previous month; January wraps to December of the previous year.
    pub fn prev(&self) -> Self {
        self.first
            .checked_sub_months(Months::new(1))
            .map(|first| Self { first })
            .unwrap_or(*self)
    }

    /// Next month; December wraps to January of the next year.
    pub fn next(&self) -> Self {
        self.first
            .checked_add_months(Months::new(1))
            .map(|first| Self { first })
            .unwrap_or(*self)
    }

    pub fn days_in_month(&self) -> u32 {
        match self.first.checked_add_months(Months::new(1)) {
            Some(next) => (next - self.first).num_days() as u32,
            None => 31,
        }
    }
}

/// One day of the grid
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub key: DateKey,
    pub has_data: bool,
    pub selected: bool,
    pub today: bool,
}

impl DayCell {
    pub fn day(&self) -> u32 {
        self.date.day()
    }
}

/// Rendered month: leading blanks then one cell per day
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    /// Blank cells before day 1 (its weekday index, Sunday = 0)
    pub leading_blanks: usize,
    pub cells: Vec<DayCell>,
}

impl MonthGrid {
    pub fn build<F>(cursor: MonthCursor, selected: NaiveDate, today: NaiveDate, has_data: F) -> Self
    where
        F: Fn(&DateKey) -> bool,
    {
        let cells = cursor
            .first_day()
            .iter_days()
            .take(cursor.days_in_month() as usize)
            .map(|date| {
                let key = DateKey::from_date(date);
                DayCell {
                    has_data: has_data(&key),
                    selected: date == selected,
                    today: date == today,
                    key,
                    date,
                }
            })
            .collect();

        Self {
            year: cursor.year(),
            month: cursor.month(),
            leading_blanks: cursor.first_day().weekday().num_days_from_sunday() as usize,
            cells,
        }
    }

    /// Rows of seven slots; `None` is a blank pad cell.
    pub fn weeks(&self) -> Vec<Vec<Option<&DayCell>>> {
        let slots: Vec<Option<&DayCell>> = std::iter::repeat(None)
            .take(self.leading_blanks)
            .chain(self.cells.iter().map(Some))
            .collect();
        slots
            .chunks(7)
            .map(|week| {
                let mut row = week.to_vec();
                row.resize(7, None);
                row
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_prev_next_wrap_years() {
        let jan = MonthCursor::new(2024, 1).unwrap();
        assert_eq!((jan.prev().year(), jan.prev().month()), (2023, 12));
        let dec = MonthCursor::new(2024, 12).unwrap();
        assert_eq!((dec.next().year(), dec.next().month()), (2025, 1));
        assert_eq!(dec.next().prev(), dec);
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(MonthCursor::new(2024, 2).unwrap().days_in_month(), 29);
        assert_eq!(MonthCursor::new(2023, 2).unwrap().days_in_month(), 28);
        assert_eq!(MonthCursor::new(2024, 4).unwrap().days_in_month(), 30);
        assert_eq!(MonthCursor::new(2024, 12).unwrap().days_in_month(), 31);
    }

    #[test]
    fn test_leading_blanks_align_first_weekday() {
        // 2024-05-01 is a Wednesday
        let grid = MonthGrid::build(MonthCursor::new(2024, 5).unwrap(), date(2024, 5, 1), date(2024, 5, 1), |_| false);
        assert_eq!(grid.leading_blanks, 3);
        assert_eq!(grid.cells.len(), 31);
        // 2023-10-01 is a Sunday
        let grid = MonthGrid::build(MonthCursor::new(2023, 10).unwrap(), date(2023, 10, 1), date(2023, 10, 1), |_| false);
        assert_eq!(grid.leading_blanks, 0);
    }

    #[test]
    fn test_today_marked_once_in_its_month_only() {
        let today = date(2024, 5, 17);
        let grid = MonthGrid::build(MonthCursor::containing(today), today, today, |_| false);
        assert_eq!(grid.cells.iter().filter(|c| c.today).count(), 1);

        let other = MonthGrid::build(MonthCursor::containing(today).next(), today, today, |_| false);
        assert_eq!(other.cells.iter().filter(|c| c.today).count(), 0);
    }

    #[test]
    fn test_selected_and_has_data_flags() {
        let selected = date(2024, 5, 3);
        let grid = MonthGrid::build(MonthCursor::new(2024, 5).unwrap(), selected, date(2030, 1, 1), |k| {
            k.as_str() == "2024-05-10"
        });
        let sel: Vec<u32> = grid.cells.iter().filter(|c| c.selected).map(|c| c.day()).collect();
        let data: Vec<u32> = grid.cells.iter().filter(|c| c.has_data).map(|c| c.day()).collect();
        assert_eq!(sel, vec![3]);
        assert_eq!(data, vec![10]);
    }

    #[test]
    fn test_weeks_are_padded_rows_of_seven() {
        let grid = MonthGrid::build(MonthCursor::new(2024, 5).unwrap(), date(2024, 5, 1), date(2024, 5, 1), |_| false);
        let weeks = grid.weeks();
        assert!(weeks.iter().all(|w| w.len() == 7));
        assert_eq!(weeks[0][3].map(|c| c.day()), Some(1));
        assert!(weeks[0][2].is_none());
        assert_eq!(weeks.iter().flatten().flatten().count(), 31);
    }
}
