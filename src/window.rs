//! Reporting window
//!
//! Monday-to-Sunday calendar windows that scope every report query.

use chrono::{Datelike, Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Week navigation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDirection {
    Prev,
    Next,
}

/// The active reporting period: an inclusive seven-day calendar window
/// paired with its offset in whole weeks from the current week.
///
/// `to` is always `from + 6 days`; the pair is never set independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub week_offset: i32,
}

/// Monday of the week containing `date`. Sunday belongs to the week
/// that started six days earlier, never to the following one.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Whole-week distance between the week containing `from` and the week
/// containing `today`. Inverse of [`DateWindow::for_offset_from`] for
/// Monday-aligned starts.
pub fn offset_for_date(from: NaiveDate, today: NaiveDate) -> i32 {
    let days = (week_start(from) - week_start(today)).num_days();
    // Both ends are snapped to Monday, so the distance is an exact
    // multiple of seven.
    (days / 7) as i32
}

impl DateWindow {
    /// The window for the week containing today
    pub fn current() -> Self {
        Self::for_offset(0)
    }

    /// The window `offset_weeks` whole weeks away from the current week
    pub fn for_offset(offset_weeks: i32) -> Self {
        Self::for_offset_from(offset_weeks, Local::now().date_naive())
    }

    /// Same as [`DateWindow::for_offset`] with an explicit "today"
    pub fn for_offset_from(offset_weeks: i32, today: NaiveDate) -> Self {
        let from = week_start(today) + Duration::weeks(offset_weeks as i64);
        Self {
            from,
            to: from + Duration::days(6),
            week_offset: offset_weeks,
        }
    }

    /// The window produced by a manual edit of the "From" date.
    ///
    /// The start is kept exactly as given (it need not be a Monday); the
    /// end and the week offset are recomputed so the window stays a full
    /// seven days.
    pub fn for_start(from: NaiveDate) -> Self {
        Self::for_start_from(from, Local::now().date_naive())
    }

    /// Same as [`DateWindow::for_start`] with an explicit "today"
    pub fn for_start_from(from: NaiveDate, today: NaiveDate) -> Self {
        Self {
            from,
            to: from + Duration::days(6),
            week_offset: offset_for_date(from, today),
        }
    }

    /// The adjacent window one week before or after this one
    pub fn navigate(&self, direction: NavDirection) -> Self {
        self.navigate_from(direction, Local::now().date_naive())
    }

    /// Same as [`DateWindow::navigate`] with an explicit "today"
    pub fn navigate_from(&self, direction: NavDirection, today: NaiveDate) -> Self {
        let offset = match direction {
            NavDirection::Prev => self.week_offset - 1,
            NavDirection::Next => self.week_offset + 1,
        };
        Self::for_offset_from(offset, today)
    }

    /// True when the window bounds are ordered
    pub fn is_valid(&self) -> bool {
        self.from <= self.to
    }

    /// True when `date` falls inside the window, both ends inclusive
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }

    /// Number of calendar days the window spans
    pub fn span_days(&self) -> i64 {
        (self.to - self.from).num_days() + 1
    }

    /// Human-readable position relative to the current week
    pub fn label(&self) -> String {
        match self.week_offset {
            0 => "This Week".to_string(),
            n if n < 0 => {
                let weeks = -n;
                format!("{} Week{} Ago", weeks, if weeks > 1 { "s" } else { "" })
            }
            n => format!("Next {} Week{}", n, if n > 1 { "s" } else { "" }),
        }
    }
}

impl Default for DateWindow {
    fn default() -> Self {
        Self::current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // 2025-10-08 is a Wednesday
    const TODAY: (i32, u32, u32) = (2025, 10, 8);

    fn today() -> NaiveDate {
        date(TODAY.0, TODAY.1, TODAY.2)
    }

    #[test]
    fn test_week_start_is_monday() {
        for delta in 0..14 {
            let d = today() + Duration::days(delta);
            assert_eq!(week_start(d).weekday(), Weekday::Mon);
        }
    }

    #[test]
    fn test_week_start_sunday_goes_back_six_days() {
        let sunday = date(2025, 10, 12);
        assert_eq!(week_start(sunday), date(2025, 10, 6));
    }

    #[test]
    fn test_window_spans_seven_days_from_monday() {
        for offset in -8..=8 {
            let window = DateWindow::for_offset_from(offset, today());
            assert_eq!(window.from.weekday(), Weekday::Mon);
            assert_eq!(window.to, window.from + Duration::days(6));
            assert_eq!(window.span_days(), 7);
        }
    }

    #[test]
    fn test_current_week_window() {
        let window = DateWindow::for_offset_from(0, today());
        assert_eq!(window.from, date(2025, 10, 6));
        assert_eq!(window.to, date(2025, 10, 12));
        assert_eq!(window.week_offset, 0);
    }

    #[test]
    fn test_offset_round_trip() {
        // offset_for_date(for_offset(o).from) == o, whatever weekday
        // today falls on
        for day in 6..=12 {
            let today = date(2025, 10, day);
            for offset in -8..=8 {
                let window = DateWindow::for_offset_from(offset, today);
                assert_eq!(offset_for_date(window.from, today), offset);
            }
        }
    }

    #[test]
    fn test_manual_start_keeps_date_and_recomputes_pair() {
        // Editing "From" to a Thursday keeps the Thursday
        let from = date(2025, 10, 16);
        let window = DateWindow::for_start_from(from, today());
        assert_eq!(window.from, from);
        assert_eq!(window.to, date(2025, 10, 22));
        assert_eq!(window.week_offset, 1);
    }

    #[test]
    fn test_manual_start_previous_week() {
        let window = DateWindow::for_start_from(date(2025, 9, 30), today());
        assert_eq!(window.week_offset, -1);
    }

    #[test]
    fn test_navigate_next_then_prev_is_identity() {
        let original = DateWindow::for_offset_from(0, today());
        let round_trip = original
            .navigate_from(NavDirection::Next, today())
            .navigate_from(NavDirection::Prev, today());
        assert_eq!(round_trip, original);
    }

    #[test]
    fn test_navigate_crosses_month_boundary() {
        let window = DateWindow::for_offset_from(-1, today());
        assert_eq!(window.from, date(2025, 9, 29));
        assert_eq!(window.to, date(2025, 10, 5));
    }

    #[test]
    fn test_contains_is_inclusive_on_both_ends() {
        let window = DateWindow::for_offset_from(0, today());
        assert!(window.contains(window.from));
        assert!(window.contains(window.to));
        assert!(!window.contains(window.from - Duration::days(1)));
        assert!(!window.contains(window.to + Duration::days(1)));
    }

    #[test]
    fn test_is_valid() {
        let window = DateWindow::for_offset_from(0, today());
        assert!(window.is_valid());

        let broken = DateWindow {
            from: window.to,
            to: window.from,
            week_offset: 0,
        };
        assert!(!broken.is_valid());
    }

    #[test]
    fn test_label() {
        assert_eq!(DateWindow::for_offset_from(0, today()).label(), "This Week");
        assert_eq!(
            DateWindow::for_offset_from(-1, today()).label(),
            "1 Week Ago"
        );
        assert_eq!(
            DateWindow::for_offset_from(-3, today()).label(),
            "3 Weeks Ago"
        );
        assert_eq!(
            DateWindow::for_offset_from(1, today()).label(),
            "Next 1 Week"
        );
        assert_eq!(
            DateWindow::for_offset_from(2, today()).label(),
            "Next 2 Weeks"
        );
    }
}
