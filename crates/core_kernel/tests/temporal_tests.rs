//! Unit tests for the calendar types

use chrono::NaiveDate;
use core_kernel::{DateRange, TemporalError, YearMonth};
use core_kernel::temporal::add_months_clamped;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

mod year_month {
    use super::*;

    #[test]
    fn test_from_date() {
        let ym = YearMonth::from_date(date(2024, 3, 17));
        assert_eq!(ym.year(), 2024);
        assert_eq!(ym.month(), 3);
    }

    #[test]
    fn test_display_and_parse() {
        let ym = YearMonth::new(2024, 3).unwrap();
        assert_eq!(ym.to_string(), "2024-03");
        assert_eq!("2024-03".parse::<YearMonth>().unwrap(), ym);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!("2024".parse::<YearMonth>(), Err(TemporalError::Parse(_))));
        assert!(matches!("2024-00".parse::<YearMonth>(), Err(TemporalError::InvalidMonth(0))));
        assert!(matches!(
            "2147483647-12".parse::<YearMonth>(),
            Err(TemporalError::InvalidYear(i32::MAX))
        ));
    }

    #[test]
    fn test_months_until_crosses_year() {
        let start = YearMonth::new(2023, 11).unwrap();
        let end = YearMonth::new(2024, 2).unwrap();
        let months: Vec<String> = start.months_until(end).map(|m| m.to_string()).collect();
        assert_eq!(months, vec!["2023-11", "2023-12", "2024-01", "2024-02"]);
    }

    #[test]
    fn test_months_until_empty_when_reversed() {
        let start = YearMonth::new(2024, 2).unwrap();
        let end = YearMonth::new(2024, 1).unwrap();
        assert_eq!(start.months_until(end).count(), 0);
    }

    #[test]
    fn test_plus_months_and_between() {
        let start = YearMonth::new(2024, 11).unwrap();
        let later = start.plus_months(3).unwrap();
        assert_eq!(later, YearMonth::new(2025, 2).unwrap());
        assert_eq!(start.months_between(&later), 3);
        assert_eq!(later.months_between(&start), -3);
    }

    #[test]
    fn test_serde_as_string() {
        let ym = YearMonth::new(2024, 7).unwrap();
        let json = serde_json::to_string(&ym).unwrap();
        assert_eq!(json, "\"2024-07\"");
        let back: YearMonth = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ym);
    }
}

mod date_range {
    use super::*;

    #[test]
    fn test_new_rejects_reversed_range() {
        let result = DateRange::new(date(2024, 2, 1), date(2024, 1, 1));
        assert!(matches!(result, Err(TemporalError::InvalidPeriod { .. })));
    }

    #[test]
    fn test_single_day_range() {
        let range = DateRange::new(date(2024, 2, 1), date(2024, 2, 1)).unwrap();
        assert_eq!(range.days(), 1);
    }

    #[test]
    fn test_for_month() {
        let range = DateRange::for_month(YearMonth::new(2023, 2).unwrap());
        assert_eq!(range.start, date(2023, 2, 1));
        assert_eq!(range.end, date(2023, 2, 28));
    }

    #[test]
    fn test_trailing_months() {
        let range = DateRange::trailing_months(YearMonth::new(2024, 2).unwrap(), 3);
        assert_eq!(range.start, date(2023, 12, 1));
        assert_eq!(range.end, date(2024, 2, 29));
    }

    #[test]
    fn test_trailing_months_stop_at_first_supported_month() {
        let first = YearMonth::from_date(NaiveDate::MIN);
        let range = DateRange::trailing_months(first.plus_months(1).unwrap(), 12);
        assert_eq!(range.start, NaiveDate::MIN);
    }
}

#[test]
fn test_add_months_clamps_to_month_end() {
    assert_eq!(add_months_clamped(date(2024, 1, 31), 1), Some(date(2024, 2, 29)));
    assert_eq!(add_months_clamped(date(2023, 1, 31), 1), Some(date(2023, 2, 28)));
}
