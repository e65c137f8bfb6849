use serde::Serialize;

use crate::models::FeedingTime;

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedingGuideline {
    pub age_weeks: u32,
    pub age_range: &'static str,
    pub meals_per_day: u32,
    pub cups_per_day: f64,
    pub cups_per_meal: f64,
    pub weight_range: &'static str,
}

pub const FEEDING_GUIDELINES: [FeedingGuideline; 6] = [
    FeedingGuideline { age_weeks: 8, age_range: "8-12 weeks", meals_per_day: 4, cups_per_day: 1.5, cups_per_meal: 0.375, weight_range: "10-15 lbs" },
    FeedingGuideline { age_weeks: 12, age_range: "12-16 weeks", meals_per_day: 3, cups_per_day: 2.0, cups_per_meal: 0.67, weight_range: "15-25 lbs" },
    FeedingGuideline { age_weeks: 16, age_range: "16-24 weeks", meals_per_day: 3, cups_per_day: 2.5, cups_per_meal: 0.83, weight_range: "25-35 lbs" },
    FeedingGuideline { age_weeks: 24, age_range: "24-32 weeks", meals_per_day: 2, cups_per_day: 3.0, cups_per_meal: 1.5, weight_range: "35-45 lbs" },
    FeedingGuideline { age_weeks: 32, age_range: "32-52 weeks", meals_per_day: 2, cups_per_day: 3.5, cups_per_meal: 1.75, weight_range: "45-55 lbs" },
    FeedingGuideline { age_weeks: 52, age_range: "12+ months (Adult)", meals_per_day: 2, cups_per_day: 3.0, cups_per_meal: 1.5, weight_range: "50-60 lbs (female), 55-65 lbs (male)" },
];

pub fn guideline_for_age(age_weeks: u32) -> &'static FeedingGuideline {
    let index = match age_weeks {
        0..=11 => 0,
        12..=15 => 1,
        16..=23 => 2,
        24..=31 => 3,
        32..=51 => 4,
        _ => 5,
    };
    &FEEDING_GUIDELINES[index]
}

fn meal_labels(meals_per_day: u32) -> &'static [&'static str] {
    match meals_per_day {
        4 => &["Breakfast", "Lunch", "Afternoon Snack", "Dinner"],
        3 => &["Breakfast", "Lunch", "Dinner"],
        _ => &["Breakfast", "Dinner"],
    }
}

/// Open feeding slots for one day, portioned for a puppy of `age_weeks`.
pub fn feeding_slots(age_weeks: u32) -> Vec<FeedingTime> {
    let guideline = guideline_for_age(age_weeks);

    meal_labels(guideline.meals_per_day)
        .iter()
        .map(|label| FeedingTime {
            time: label.to_string(),
            completed: false,
            amount: Some(guideline.cups_per_meal),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slots_follow_meals_per_day() {
        let young = feeding_slots(9);
        assert_eq!(young.len(), 4);
        assert_eq!(young[0].amount, Some(0.375));

        assert_eq!(feeding_slots(14).len(), 3);
        assert_eq!(feeding_slots(40).len(), 2);
        assert_eq!(guideline_for_age(100).age_weeks, 52);
    }
}
