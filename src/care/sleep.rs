//! How much a puppy should sleep, and how a day's total measures up.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepGuideline {
    pub age_weeks: u32,
    pub age_range: &'static str,
    pub hours_per_day: f64,
    pub min_hours: f64,
    pub max_hours: f64,
    pub nap_frequency: &'static str,
}

pub const SLEEP_GUIDELINES: [SleepGuideline; 5] = [
    SleepGuideline { age_weeks: 8, age_range: "8-12 weeks", hours_per_day: 19.0, min_hours: 18.0, max_hours: 20.0, nap_frequency: "Every 1-2 hours after activity" },
    SleepGuideline { age_weeks: 12, age_range: "12-16 weeks", hours_per_day: 18.0, min_hours: 16.0, max_hours: 19.0, nap_frequency: "Every 2-3 hours after activity" },
    SleepGuideline { age_weeks: 16, age_range: "16-24 weeks", hours_per_day: 16.0, min_hours: 14.0, max_hours: 18.0, nap_frequency: "Every 3-4 hours after activity" },
    SleepGuideline { age_weeks: 24, age_range: "24-52 weeks", hours_per_day: 14.0, min_hours: 12.0, max_hours: 16.0, nap_frequency: "2-3 naps per day" },
    SleepGuideline { age_weeks: 52, age_range: "Adult (1+ years)", hours_per_day: 12.0, min_hours: 10.0, max_hours: 14.0, nap_frequency: "1-2 naps per day" },
];

pub fn guideline_for_age(age_weeks: u32) -> &'static SleepGuideline {
    let index = match age_weeks {
        0..=11 => 0,
        12..=15 => 1,
        16..=23 => 2,
        24..=51 => 3,
        _ => 4,
    };
    &SLEEP_GUIDELINES[index]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SleepStatus {
    Excellent,
    Good,
    Low,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SleepEvaluation {
    pub met: bool,
    pub status: SleepStatus,
    pub message: String,
}

/// Grades a day's total sleep against the guideline for `age_weeks`.
pub fn evaluate_daily_sleep(total_minutes: f64, age_weeks: u32) -> SleepEvaluation {
    let guideline = guideline_for_age(age_weeks);
    let hours = total_minutes / 60.0;
    let missing = guideline.min_hours - hours;

    if hours >= guideline.hours_per_day {
        SleepEvaluation {
            met: true,
            status: SleepStatus::Excellent,
            message: format!(
                "Great! {:.1} hours meets the {}h goal",
                hours, guideline.hours_per_day
            ),
        }
    } else if hours >= guideline.min_hours {
        SleepEvaluation {
            met: true,
            status: SleepStatus::Good,
            message: format!(
                "Good! {:.1} hours is within range ({}-{}h)",
                hours, guideline.min_hours, guideline.max_hours
            ),
        }
    } else if hours >= guideline.min_hours - 2.0 {
        SleepEvaluation {
            met: false,
            status: SleepStatus::Low,
            message: format!("Low: {:.1} hours - needs {:.1}h more", hours, missing),
        }
    } else {
        SleepEvaluation {
            met: false,
            status: SleepStatus::Critical,
            message: format!("Critical: Only {:.1} hours - needs {:.1}h more!", hours, missing),
        }
    }
}

/// `45s`, `30m`, `2h` or `1h 30m`.
pub fn format_duration(minutes: f64) -> String {
    if minutes < 1.0 {
        return format!("{}s", (minutes * 60.0).round() as i64);
    }

    let mut hours = (minutes / 60.0).floor() as i64;
    let mut mins = (minutes % 60.0).round() as i64;
    if mins == 60 {
        hours += 1;
        mins = 0;
    }

    match (hours, mins) {
        (0, m) => format!("{}m", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {}m", h, m),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guideline_brackets() {
        assert_eq!(guideline_for_age(8).age_weeks, 8);
        assert_eq!(guideline_for_age(11).age_weeks, 8);
        assert_eq!(guideline_for_age(12).age_weeks, 12);
        assert_eq!(guideline_for_age(30).age_weeks, 24);
        assert_eq!(guideline_for_age(80).age_weeks, 52);
    }

    #[test]
    fn test_evaluation_grades() {
        assert_eq!(evaluate_daily_sleep(19.0 * 60.0, 8).status, SleepStatus::Excellent);
        assert_eq!(evaluate_daily_sleep(18.5 * 60.0, 8).status, SleepStatus::Good);
        assert_eq!(evaluate_daily_sleep(16.5 * 60.0, 8).status, SleepStatus::Low);

        let critical = evaluate_daily_sleep(10.0 * 60.0, 8);
        assert_eq!(critical.status, SleepStatus::Critical);
        assert!(!critical.met);
        assert!(critical.message.contains("8.0h more"));
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0.75), "45s");
        assert_eq!(format_duration(30.0), "30m");
        assert_eq!(format_duration(120.0), "2h");
        assert_eq!(format_duration(90.0), "1h 30m");
        assert_eq!(format_duration(119.7), "2h");
    }
}
