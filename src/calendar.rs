//! Month grid for the calendar view.
//!
//! The grid is a pure projection of the document: the viewed month is the
//! current month shifted by the persisted signed offset, and each day is
//! flagged when it is today or has activity (a to-do, sleep entry, or mood
//! check-in dated that day).

use crate::models::Document;
use crate::{Error, Result};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::HashSet;

/// One day cell in the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCell {
    /// Day of month, 1-based
    pub day: u32,
    pub is_today: bool,
    pub has_activity: bool,
}

/// A rendered month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthGrid {
    pub year: i32,
    /// Month of year, 1-12
    pub month: u32,
    /// Empty cells before day 1 in a Sunday-first week
    pub leading_blanks: u32,
    pub days: Vec<DayCell>,
}

/// Shift a (year, month) position by a signed number of months.
pub fn shift_month(year: i32, month: u32, offset: i32) -> (i32, u32) {
    let total = i64::from(year) * 12 + i64::from(month) - 1 + i64::from(offset);
    let shifted_year = total.div_euclid(12);
    let shifted_month = total.rem_euclid(12) + 1;
    (shifted_year as i32, shifted_month as u32)
}

impl MonthGrid {
    /// Build the grid for the month `offset` months away from `today`.
    pub fn build(today: NaiveDate, offset: i32, doc: &Document) -> Result<Self> {
        let (year, month) = shift_month(today.year(), today.month(), offset);
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            Error::InvalidInput(format!("Calendar position out of range (offset {})", offset))
        })?;

        let mut activity: HashSet<NaiveDate> = HashSet::new();
        activity.extend(doc.todos.iter().map(|t| t.date));
        activity.extend(doc.sleep.iter().map(|s| s.date));
        activity.extend(doc.mood.iter().map(|m| m.date));

        let mut days = Vec::new();
        let mut cursor = first;
        while cursor.year() == year && cursor.month() == month {
            days.push(DayCell {
                day: cursor.day(),
                is_today: cursor == today,
                has_activity: activity.contains(&cursor),
            });
            match cursor.succ_opt() {
                Some(next) => cursor = next,
                None => break,
            }
        }

        Ok(Self {
            year,
            month,
            leading_blanks: first.weekday().num_days_from_sunday(),
            days,
        })
    }

    /// Month title, e.g. "August 2026".
    pub fn title(&self) -> String {
        const NAMES: [&str; 12] = [
            "January",
            "February",
            "March",
            "April",
            "May",
            "June",
            "July",
            "August",
            "September",
            "October",
            "November",
            "December",
        ];
        format!("{} {}", NAMES[(self.month - 1) as usize], self.year)
    }

    /// Render the grid as text.
    ///
    /// Today is bracketed, days with activity get a trailing `*`; brackets
    /// win when both apply.
    pub fn render(&self) -> String {
        let mut lines = Vec::new();
        lines.push(format!("{:^28}", self.title()).trim_end().to_string());
        lines.push("  Su  Mo  Tu  We  Th  Fr  Sa".to_string());

        let mut row = String::new();
        let mut column = 0;
        for _ in 0..self.leading_blanks {
            row.push_str("    ");
            column += 1;
        }
        for cell in &self.days {
            let rendered = if cell.is_today {
                format!("[{:>2}]", cell.day)
            } else if cell.has_activity {
                format!("{:>3}*", cell.day)
            } else {
                format!("{:>3} ", cell.day)
            };
            row.push_str(&rendered);
            column += 1;
            if column == 7 {
                lines.push(row.trim_end().to_string());
                row = String::new();
                column = 0;
            }
        }
        if !row.is_empty() {
            lines.push(row.trim_end().to_string());
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Priority, Todo};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_shift_month_identity() {
        assert_eq!(shift_month(2026, 8, 0), (2026, 8));
    }

    #[test]
    fn test_shift_month_forward_carry() {
        assert_eq!(shift_month(2026, 8, 5), (2027, 1));
        assert_eq!(shift_month(2026, 12, 1), (2027, 1));
        assert_eq!(shift_month(2026, 8, 24), (2028, 8));
    }

    #[test]
    fn test_shift_month_backward_borrow() {
        assert_eq!(shift_month(2026, 8, -8), (2025, 12));
        assert_eq!(shift_month(2026, 1, -1), (2025, 12));
        assert_eq!(shift_month(2026, 8, -20), (2024, 12));
    }

    #[test]
    fn test_build_month_shape() {
        let today = day(2026, 8, 26);
        let grid = MonthGrid::build(today, 0, &Document::default()).unwrap();
        assert_eq!(grid.year, 2026);
        assert_eq!(grid.month, 8);
        // August 1, 2026 is a Saturday
        assert_eq!(grid.leading_blanks, 6);
        assert_eq!(grid.days.len(), 31);
    }

    #[test]
    fn test_build_february_leap_years() {
        let today = day(2026, 8, 26);
        let grid = MonthGrid::build(today, -6, &Document::default()).unwrap();
        assert_eq!((grid.year, grid.month), (2026, 2));
        assert_eq!(grid.days.len(), 28);

        let grid = MonthGrid::build(today, -30, &Document::default()).unwrap();
        assert_eq!((grid.year, grid.month), (2024, 2));
        assert_eq!(grid.days.len(), 29);
    }

    #[test]
    fn test_build_marks_today_only_in_current_month() {
        let today = day(2026, 8, 26);
        let grid = MonthGrid::build(today, 0, &Document::default()).unwrap();
        let marked: Vec<u32> = grid
            .days
            .iter()
            .filter(|c| c.is_today)
            .map(|c| c.day)
            .collect();
        assert_eq!(marked, vec![26]);

        let grid = MonthGrid::build(today, 1, &Document::default()).unwrap();
        assert!(grid.days.iter().all(|c| !c.is_today));
    }

    #[test]
    fn test_build_marks_activity() {
        let today = day(2026, 8, 26);
        let mut doc = Document::default();
        doc.todos.push(Todo::new(
            "todo-1-abc".to_string(),
            "Water the plants".to_string(),
            Priority::Medium,
            day(2026, 8, 3),
        ));
        let grid = MonthGrid::build(today, 0, &doc).unwrap();
        assert!(grid.days[2].has_activity);
        assert!(!grid.days[3].has_activity);
    }

    #[test]
    fn test_render_layout() {
        let today = day(2026, 8, 26);
        let mut doc = Document::default();
        doc.todos.push(Todo::new(
            "todo-1-abc".to_string(),
            "Water the plants".to_string(),
            Priority::Medium,
            day(2026, 8, 3),
        ));
        let grid = MonthGrid::build(today, 0, &doc).unwrap();
        let text = grid.render();
        assert!(text.contains("August 2026"));
        assert!(text.contains("Su  Mo  Tu  We  Th  Fr  Sa"));
        assert!(text.contains("[26]"));
        assert!(text.contains("3*"));
        // Saturday start: first week row holds only day 1
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[2].trim(), "1");
    }

    #[test]
    fn test_build_rejects_absurd_offset() {
        let today = day(2026, 8, 26);
        let err = MonthGrid::build(today, i32::MAX, &Document::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }
}
