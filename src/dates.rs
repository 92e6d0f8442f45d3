//! Calendar-day arithmetic shared by the grid builder, the task index and
//! the navigation controller.
//!
//! All functions work on local wall-clock days (`NaiveDate`). The `*_at`
//! variants take `today` explicitly; the plain variants read the local clock.

use chrono::{Datelike, Local, NaiveDate};

pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
pub const WEEKDAY_INITIALS: [&str; 7] = ["S", "M", "T", "W", "T", "F", "S"];

const ISO_FORMAT: &str = "%Y-%m-%d";

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Number of days in the month containing `date`, leap years included.
pub fn days_in_month(date: NaiveDate) -> u32 {
    // Day 0 of the following month.
    let (year, month) = next_month(date.year(), date.month());
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(31)
}

pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn month_end(date: NaiveDate) -> NaiveDate {
    date.with_day(days_in_month(date)).unwrap_or(date)
}

/// First day of `date`'s month backed up to the preceding Sunday.
///
/// This is the anchor of the month grid, not the start of the week that
/// contains `date`.
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    let first = month_start(date);
    let back = first.weekday().num_days_from_sunday();
    first
        .checked_sub_days(chrono::Days::new(u64::from(back)))
        .unwrap_or(first)
}

pub fn is_today(date: NaiveDate) -> bool {
    is_today_at(date, today())
}

pub fn is_today_at(date: NaiveDate, today: NaiveDate) -> bool {
    date.day() == today.day() && date.month() == today.month() && date.year() == today.year()
}

/// True when `date` is strictly before today. A date that is today is never past.
pub fn is_past(date: NaiveDate) -> bool {
    is_past_at(date, today())
}

pub fn is_past_at(date: NaiveDate, today: NaiveDate) -> bool {
    date < today
}

/// Zero-padded `YYYY-MM-DD`; the join key between grid cells and tasks.
pub fn format_iso_date(date: NaiveDate) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

pub fn parse_iso_date(input: &str) -> Option<NaiveDate> {
    let raw = input.trim();
    if raw.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(raw, ISO_FORMAT).ok()
}

/// First day of the month `delta` months away from `date`'s month.
pub fn add_months(date: NaiveDate, delta: i32) -> NaiveDate {
    let index = date.year() * 12 + date.month0() as i32 + delta;
    let year = index.div_euclid(12);
    let month = index.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(date)
}

/// First day of the same month `delta` years away.
pub fn add_years(date: NaiveDate, delta: i32) -> NaiveDate {
    add_months(date, delta * 12)
}

fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(ymd(2024, 1, 15)), 31);
        assert_eq!(days_in_month(ymd(2024, 2, 1)), 29);
        assert_eq!(days_in_month(ymd(2023, 2, 28)), 28);
        assert_eq!(days_in_month(ymd(1900, 2, 3)), 28);
        assert_eq!(days_in_month(ymd(2000, 2, 3)), 29);
        assert_eq!(days_in_month(ymd(2024, 4, 30)), 30);
        assert_eq!(days_in_month(ymd(2024, 12, 31)), 31);
    }

    #[test]
    fn test_month_bounds() {
        assert_eq!(month_start(ymd(2024, 3, 17)), ymd(2024, 3, 1));
        assert_eq!(month_end(ymd(2024, 3, 17)), ymd(2024, 3, 31));
        assert_eq!(month_end(ymd(2024, 2, 2)), ymd(2024, 2, 29));
    }

    #[test]
    fn test_start_of_week() {
        // 2024-03-01 is a Friday.
        let start = start_of_week(ymd(2024, 3, 20));
        assert_eq!(start, ymd(2024, 2, 25));
        assert_eq!(start.weekday(), Weekday::Sun);
        // 2024-09-01 is a Sunday.
        assert_eq!(start_of_week(ymd(2024, 9, 30)), ymd(2024, 9, 1));
    }

    #[test]
    fn test_today_and_past() {
        let now = ymd(2024, 3, 5);
        assert!(is_today_at(now, now));
        assert!(!is_past_at(now, now));
        assert!(is_past_at(ymd(2024, 3, 4), now));
        assert!(!is_past_at(ymd(2024, 3, 6), now));
        assert!(!is_today_at(ymd(2023, 3, 5), now));
    }

    #[test]
    fn test_today_with_clock() {
        let now = today();
        assert!(is_today(now));
        assert!(!is_past(now));
        assert!(is_past(now.pred_opt().unwrap()));
        assert!(!is_past(now.succ_opt().unwrap()));
    }

    #[test]
    fn test_format_iso_date() {
        assert_eq!(format_iso_date(ymd(2024, 3, 5)), "2024-03-05");
        assert_eq!(format_iso_date(ymd(987, 11, 30)), "0987-11-30");
    }

    #[test]
    fn test_iso_round_trip() {
        let mut date = ymd(2023, 12, 25);
        for _ in 0..800 {
            let key = format_iso_date(date);
            assert_eq!(parse_iso_date(&key).map(format_iso_date), Some(key));
            date = date.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(parse_iso_date("2024-3-5"), None);
        assert_eq!(parse_iso_date("2024-02-30"), None);
        assert_eq!(parse_iso_date("not a date"), None);
        assert_eq!(parse_iso_date(" 2024-03-05 "), Some(ymd(2024, 3, 5)));
    }

    #[test]
    fn test_add_months() {
        assert_eq!(add_months(ymd(2024, 1, 31), 1), ymd(2024, 2, 1));
        assert_eq!(add_months(ymd(2024, 1, 10), -1), ymd(2023, 12, 1));
        assert_eq!(add_months(ymd(2024, 12, 10), 1), ymd(2025, 1, 1));
        assert_eq!(add_months(ymd(2024, 5, 10), -17), ymd(2022, 12, 1));
        assert_eq!(add_years(ymd(2024, 2, 29), 1), ymd(2025, 2, 1));
    }
}
