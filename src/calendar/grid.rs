use chrono::{Datelike, Duration, Months, NaiveDate};

use crate::calendar::dates::{days_in_month, first_weekday_of_month};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarViewMode {
    Month,
    Week,
}

/// Month grid cells in reading order. Leading `None` placeholders pad the
/// first row so day 1 lands under its weekday header; every grid therefore
/// renders as whole weeks against a fixed Sunday-first header.
pub fn month_grid(year: i32, month0: u32) -> Vec<Option<NaiveDate>> {
    let lead = first_weekday_of_month(year, month0);
    let days = days_in_month(year, month0);
    let mut cells = Vec::with_capacity((lead + days) as usize);
    for _ in 0..lead {
        cells.push(None);
    }
    for day in 1..=days {
        cells.push(Some(NaiveDate::from_ymd_opt(year, month0 + 1, day).unwrap()));
    }
    cells
}

/// The seven consecutive dates of the week containing `reference`,
/// starting on Sunday.
pub fn week_days(reference: NaiveDate) -> Vec<NaiveDate> {
    let start = reference - Duration::days(reference.weekday().num_days_from_sunday() as i64);
    (0..7).map(|offset| start + Duration::days(offset)).collect()
}

/// Navigation state shared by the month and week views. `current` anchors
/// what is rendered, `selected` is the day the agenda shows.
#[derive(Debug, Clone, Copy)]
pub struct CalendarCursor {
    pub current: NaiveDate,
    pub selected: NaiveDate,
    pub mode: CalendarViewMode,
}

impl CalendarCursor {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            current: today,
            selected: today,
            mode: CalendarViewMode::Month,
        }
    }

    /// One month back, or seven days back in week mode. Month arithmetic
    /// clamps to the end of shorter months.
    pub fn prev(&mut self) {
        self.current = match self.mode {
            CalendarViewMode::Month => self.current.checked_sub_months(Months::new(1)).unwrap(),
            CalendarViewMode::Week => self.current - Duration::days(7),
        };
    }

    pub fn next(&mut self) {
        self.current = match self.mode {
            CalendarViewMode::Month => self.current.checked_add_months(Months::new(1)).unwrap(),
            CalendarViewMode::Week => self.current + Duration::days(7),
        };
    }

    /// Switching views keeps the selected date.
    pub fn set_mode(&mut self, mode: CalendarViewMode) {
        self.mode = mode;
    }

    /// Selecting a day also re-anchors the grid, so a later switch to week
    /// mode opens on the same week.
    pub fn select(&mut self, date: NaiveDate) {
        self.selected = date;
        self.current = date;
    }

    pub fn month_grid(&self) -> Vec<Option<NaiveDate>> {
        month_grid(self.current.year(), self.current.month0())
    }

    pub fn week_days(&self) -> Vec<NaiveDate> {
        week_days(self.current)
    }
}
