use chrono::{DateTime, Datelike, NaiveDate, Utc};
use chrono_tz::Tz;

/// Day count for a month, taken as the day before the first of the next
/// month, so leap years fall out of the calendar itself rather than a
/// lookup table. `month0` is zero-based (January = 0), matching the grid
/// coordinates used everywhere in this module.
pub fn days_in_month(year: i32, month0: u32) -> u32 {
    let (next_year, next_month0) = if month0 >= 11 {
        (year + 1, 0)
    } else {
        (year, month0 + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month0 + 1, 1)
        .unwrap()
        .pred_opt()
        .unwrap()
        .day()
}

/// Sunday-based weekday index of the first of the month.
pub fn first_weekday_of_month(year: i32, month0: u32) -> u32 {
    NaiveDate::from_ymd_opt(year, month0 + 1, 1)
        .unwrap()
        .weekday()
        .num_days_from_sunday()
}

/// Civil date of an instant in the household timezone.
pub fn local_date(t: DateTime<Utc>, tz: Tz) -> NaiveDate {
    t.with_timezone(&tz).date_naive()
}

pub fn is_same_day(a: DateTime<Utc>, b: DateTime<Utc>, tz: Tz) -> bool {
    local_date(a, tz) == local_date(b, tz)
}

pub fn is_today(t: DateTime<Utc>, tz: Tz) -> bool {
    is_same_day(t, Utc::now(), tz)
}

/// True when the instant falls on the given civil date.
pub fn falls_on(t: DateTime<Utc>, day: NaiveDate, tz: Tz) -> bool {
    local_date(t, tz) == day
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::America::New_York;
    use chrono_tz::Tz::UTC;

    #[test]
    fn february_day_counts() {
        assert_eq!(days_in_month(2024, 1), 29);
        assert_eq!(days_in_month(2023, 1), 28);
        assert_eq!(days_in_month(2100, 1), 28);
        assert_eq!(days_in_month(2000, 1), 29);
    }

    #[test]
    fn december_rolls_into_next_year() {
        assert_eq!(days_in_month(2024, 11), 31);
        assert_eq!(days_in_month(2024, 10), 30);
    }

    #[test]
    fn first_weekday_matches_known_months() {
        // March 2024 began on a Friday, September 2024 on a Sunday.
        assert_eq!(first_weekday_of_month(2024, 2), 5);
        assert_eq!(first_weekday_of_month(2024, 8), 0);
    }

    #[test]
    fn same_day_ignores_time_of_day() {
        let morning = Utc.with_ymd_and_hms(2024, 3, 10, 8, 0, 0).unwrap();
        let night = Utc.with_ymd_and_hms(2024, 3, 10, 23, 59, 0).unwrap();
        let next = Utc.with_ymd_and_hms(2024, 3, 11, 0, 0, 0).unwrap();
        assert!(is_same_day(morning, night, UTC));
        assert!(!is_same_day(night, next, UTC));
    }

    #[test]
    fn same_day_respects_household_zone() {
        // 03:00 UTC is still the previous evening in New York.
        let late = Utc.with_ymd_and_hms(2024, 3, 10, 3, 0, 0).unwrap();
        let prior_evening = Utc.with_ymd_and_hms(2024, 3, 9, 22, 0, 0).unwrap();
        assert!(is_same_day(late, prior_evening, New_York));
        assert!(!is_same_day(late, prior_evening, UTC));
    }
}
