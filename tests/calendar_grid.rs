use chrono::{Datelike, Duration, NaiveDate, Weekday};

use familyHub::calendar::dates::{days_in_month, first_weekday_of_month};
use familyHub::calendar::grid::{CalendarCursor, CalendarViewMode, month_grid, week_days};

#[test]
fn leap_february_has_twenty_nine_days() {
    assert_eq!(days_in_month(2024, 1), 29);
    assert_eq!(days_in_month(2023, 1), 28);
}

#[test]
fn month_grid_pads_with_placeholders_then_counts_up() {
    for (year, month0) in [(2024, 1), (2024, 8), (2025, 0), (1999, 11), (2023, 5)] {
        let lead = first_weekday_of_month(year, month0) as usize;
        let grid = month_grid(year, month0);

        assert_eq!(
            grid.len(),
            lead + days_in_month(year, month0) as usize,
            "grid length for {}-{}",
            year,
            month0 + 1
        );
        assert!(grid[..lead].iter().all(Option::is_none));
        for (offset, cell) in grid[lead..].iter().enumerate() {
            let date = cell.expect("date cell after the placeholders");
            assert_eq!(date.day() as usize, offset + 1);
            assert_eq!(date.month0(), month0);
        }
    }
}

#[test]
fn first_date_cell_lands_under_its_weekday() {
    // September 2024 starts on a Sunday, so there is no padding at all.
    assert!(month_grid(2024, 8)[0].is_some());
    // March 2024 starts on a Friday: five placeholders.
    let march = month_grid(2024, 2);
    assert_eq!(march.iter().take_while(|c| c.is_none()).count(), 5);
}

#[test]
fn week_days_are_seven_consecutive_dates_containing_the_reference() {
    let references = [
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
        NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
        NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2026, 7, 4).unwrap(),
    ];
    for reference in references {
        let week = week_days(reference);
        assert_eq!(week.len(), 7);
        assert_eq!(week[0].weekday(), Weekday::Sun);
        for pair in week.windows(2) {
            assert_eq!(pair[1], pair[0] + Duration::days(1));
        }
        assert!(week.contains(&reference));
    }
}

#[test]
fn month_navigation_shifts_one_month_and_clamps() {
    let mut cursor = CalendarCursor::new(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
    cursor.next();
    assert_eq!(cursor.current, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    cursor.prev();
    assert_eq!(cursor.current, NaiveDate::from_ymd_opt(2024, 1, 29).unwrap());
}

#[test]
fn week_navigation_shifts_seven_days() {
    let mut cursor = CalendarCursor::new(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
    cursor.set_mode(CalendarViewMode::Week);
    cursor.next();
    assert_eq!(cursor.current, NaiveDate::from_ymd_opt(2024, 3, 17).unwrap());
    cursor.prev();
    cursor.prev();
    assert_eq!(cursor.current, NaiveDate::from_ymd_opt(2024, 3, 3).unwrap());
}

#[test]
fn mode_switches_preserve_the_selected_date() {
    let mut cursor = CalendarCursor::new(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    let picked = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    cursor.select(picked);
    cursor.set_mode(CalendarViewMode::Week);
    assert_eq!(cursor.selected, picked);
    cursor.set_mode(CalendarViewMode::Month);
    assert_eq!(cursor.selected, picked);
}

#[test]
fn selecting_a_day_reanchors_the_grid() {
    let mut cursor = CalendarCursor::new(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    let picked = NaiveDate::from_ymd_opt(2024, 4, 20).unwrap();
    cursor.select(picked);
    assert_eq!(cursor.current, picked);
    cursor.set_mode(CalendarViewMode::Week);
    assert!(cursor.week_days().contains(&picked));
}
