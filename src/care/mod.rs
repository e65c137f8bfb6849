//! Puppy-care rules that do not depend on storage or transport.

pub mod age;
pub mod clock;
pub mod feeding;
pub mod potty;
pub mod schedule;
pub mod sleep;
pub mod training;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

/// Calendar day of an instant as seen in `tz`.
pub fn local_day<Tz: TimeZone>(instant: &DateTime<Utc>, tz: &Tz) -> NaiveDate {
    instant.with_timezone(tz).date_naive()
}

pub fn same_day<Tz: TimeZone>(a: &DateTime<Utc>, b: &DateTime<Utc>, tz: &Tz) -> bool {
    local_day(a, tz) == local_day(b, tz)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn test_same_day_depends_on_zone() {
        let late = Utc.with_ymd_and_hms(2025, 11, 10, 23, 30, 0).unwrap();
        let early = Utc.with_ymd_and_hms(2025, 11, 11, 0, 30, 0).unwrap();

        assert!(!same_day(&late, &early, &Utc));

        let pacific = FixedOffset::west_opt(8 * 3600).unwrap();
        assert!(same_day(&late, &early, &pacific));
    }
}
