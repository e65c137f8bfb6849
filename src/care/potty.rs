use chrono::{Datelike, NaiveDate, TimeZone};
use serde::Serialize;

use super::local_day;
use crate::models::PottyEntry;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PottyStats {
    pub outside: usize,
    pub accidents: usize,
    pub total: usize,
    /// Share of trips that happened outside, rounded to a whole percent.
    pub success_rate: u32,
}

/// The Sunday that starts the week containing `day`.
pub fn week_start(day: NaiveDate) -> NaiveDate {
    day - chrono::Duration::days(i64::from(day.weekday().num_days_from_sunday()))
}

/// Stats over the Sunday-to-Saturday week containing `day`.
pub fn weekly_stats<Tz: TimeZone>(entries: &[PottyEntry], day: NaiveDate, tz: &Tz) -> PottyStats {
    let start = week_start(day);
    let end = start + chrono::Duration::days(7);
    let week: Vec<&PottyEntry> = entries
        .iter()
        .filter(|entry| (start..end).contains(&local_day(&entry.date, tz)))
        .collect();

    let total = week.len();
    let accidents = week.iter().filter(|entry| entry.is_accident()).count();
    let outside = total - accidents;
    let success_rate = if total > 0 {
        ((outside as f64 / total as f64) * 100.0).round() as u32
    } else {
        0
    };

    PottyStats {
        outside,
        accidents,
        total,
        success_rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PottyLocation, PottyType};
    use chrono::Utc;

    fn potty(day: u32, location: PottyLocation) -> PottyEntry {
        PottyEntry {
            id: format!("p{}-{:?}", day, location),
            date: Utc.with_ymd_and_hms(2025, 11, day, 9, 0, 0).unwrap(),
            time: "09:00 AM".to_string(),
            kind: PottyType::Pee,
            location,
            context: None,
            notes: None,
        }
    }

    #[test]
    fn test_week_starts_on_sunday() {
        // 2025-11-12 is a Wednesday.
        let wednesday = NaiveDate::from_ymd_opt(2025, 11, 12).unwrap();
        assert_eq!(week_start(wednesday), NaiveDate::from_ymd_opt(2025, 11, 9).unwrap());
        let sunday = NaiveDate::from_ymd_opt(2025, 11, 9).unwrap();
        assert_eq!(week_start(sunday), sunday);
    }

    #[test]
    fn test_weekly_stats_ignore_last_week() {
        let entries = vec![
            potty(8, PottyLocation::Inside),
            potty(10, PottyLocation::Outside),
            potty(11, PottyLocation::Outside),
            potty(12, PottyLocation::Inside),
        ];
        let today = NaiveDate::from_ymd_opt(2025, 11, 12).unwrap();
        let stats = weekly_stats(&entries, today, &Utc);

        assert_eq!(stats.total, 3);
        assert_eq!(stats.outside, 2);
        assert_eq!(stats.accidents, 1);
        assert_eq!(stats.success_rate, 67);
    }

    #[test]
    fn test_weekly_stats_for_past_week_skip_later_entries() {
        let entries = vec![
            potty(3, PottyLocation::Outside),
            potty(8, PottyLocation::Inside),
            potty(9, PottyLocation::Outside),
            potty(12, PottyLocation::Outside),
        ];
        // Week of Sunday 2025-11-02 through Saturday 2025-11-08.
        let day = NaiveDate::from_ymd_opt(2025, 11, 5).unwrap();
        let stats = weekly_stats(&entries, day, &Utc);

        assert_eq!(stats.total, 2);
        assert_eq!(stats.accidents, 1);
        assert_eq!(stats.success_rate, 50);
    }

    #[test]
    fn test_empty_week() {
        let today = NaiveDate::from_ymd_opt(2025, 11, 12).unwrap();
        assert_eq!(weekly_stats(&[], today, &Utc), PottyStats::default());
    }
}
