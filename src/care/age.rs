use chrono::NaiveDate;

/// Whole weeks between `birth` and `day`; zero for days before birth.
pub fn age_in_weeks(birth: NaiveDate, day: NaiveDate) -> u32 {
    let days = day.signed_duration_since(birth).num_days().max(0);
    u32::try_from(days / 7).unwrap_or(u32::MAX)
}
