use chrono::NaiveDate;

/// A range is valid unless both ends are present and the end precedes the start.
pub fn is_date_range_valid(start: Option<NaiveDate>, end: Option<NaiveDate>) -> bool {
    match (start, end) {
        (Some(start), Some(end)) => start <= end,
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_both_absent_is_valid() {
        assert!(is_date_range_valid(None, None));
    }

    #[test]
    fn test_one_side_absent_is_valid() {
        assert!(is_date_range_valid(date(2024, 1, 1), None));
        assert!(is_date_range_valid(None, date(2024, 1, 1)));
    }

    #[test]
    fn test_reversed_range_is_invalid() {
        assert!(!is_date_range_valid(date(2024, 1, 1), date(2023, 1, 1)));
    }

    #[test]
    fn test_ordered_range_is_valid() {
        assert!(is_date_range_valid(date(2023, 1, 1), date(2024, 1, 1)));
    }

    #[test]
    fn test_single_day_range_is_valid() {
        assert!(is_date_range_valid(date(2023, 6, 15), date(2023, 6, 15)));
    }
}
