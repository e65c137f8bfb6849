//! 12-hour clock strings as the tracker stores them ("08:15 PM").

use chrono::{NaiveTime, Timelike};

const TWELVE_HOUR: &str = "%I:%M %p";
const MINUTES_PER_DAY: u32 = 24 * 60;

/// Parses "HH:MM AM/PM". The hour may be one or two digits and the
/// meridiem is case-insensitive.
pub fn parse_clock(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw.trim(), TWELVE_HOUR).ok()
}

pub fn format_clock(time: NaiveTime) -> String {
    time.format(TWELVE_HOUR).to_string()
}

/// Minutes from `start` to `end`; an end before the start is taken to be on
/// the following day.
pub fn minutes_between(start: NaiveTime, end: NaiveTime) -> u32 {
    let start = start.hour() * 60 + start.minute();
    let end = end.hour() * 60 + end.minute();

    if end < start {
        end + MINUTES_PER_DAY - start
    } else {
        end - start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_parse_variants() {
        assert_eq!(parse_clock("08:00 AM"), Some(hm(8, 0)));
        assert_eq!(parse_clock("7:15 pm"), Some(hm(19, 15)));
        assert_eq!(parse_clock("12:00 AM"), Some(hm(0, 0)));
        assert_eq!(parse_clock("12:30 PM"), Some(hm(12, 30)));
        assert_eq!(parse_clock("13:00 PM"), None);
        assert_eq!(parse_clock("08:00"), None);
    }

    #[test]
    fn test_format_is_zero_padded() {
        assert_eq!(format_clock(hm(7, 5)), "07:05 AM");
        assert_eq!(format_clock(hm(21, 30)), "09:30 PM");
    }

    #[test]
    fn test_minutes_between_wraps_midnight() {
        assert_eq!(minutes_between(hm(13, 0), hm(14, 30)), 90);
        assert_eq!(minutes_between(hm(22, 30), hm(7, 0)), 510);
        assert_eq!(minutes_between(hm(9, 0), hm(9, 0)), 0);
    }
}
