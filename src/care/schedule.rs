//! Recommended daily routine for an 8-16 week old husky, and the checklist
//! built from it.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{DailyTodoEntry, TodoItem};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScheduleCategory {
    Feeding,
    Potty,
    Training,
    Exercise,
    Sleep,
    Play,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleItem {
    pub id: &'static str,
    pub time: &'static str,
    pub activity: &'static str,
    pub description: &'static str,
    pub category: ScheduleCategory,
    pub duration: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub training_task_id: Option<&'static str>,
}

const fn item(
    id: &'static str,
    time: &'static str,
    activity: &'static str,
    description: &'static str,
    category: ScheduleCategory,
    duration: &'static str,
) -> ScheduleItem {
    ScheduleItem {
        id,
        time,
        activity,
        description,
        category,
        duration,
        training_task_id: None,
    }
}

const fn training(
    id: &'static str,
    time: &'static str,
    activity: &'static str,
    description: &'static str,
    duration: &'static str,
    task: &'static str,
) -> ScheduleItem {
    ScheduleItem {
        id,
        time,
        activity,
        description,
        category: ScheduleCategory::Training,
        duration,
        training_task_id: Some(task),
    }
}

use ScheduleCategory::*;

pub const DAILY_SCHEDULE: &[ScheduleItem] = &[
    item("wake-potty", "7:00 AM", "Wake Up & Potty Break", "Take puppy outside immediately. Praise when they go potty.", Potty, "5-10 min"),
    item("breakfast", "7:15 AM", "Breakfast (Meal 1)", "Feed measured portion. Remove bowl after 15 minutes.", Feeding, "15 min"),
    item("post-breakfast-potty", "7:30 AM", "Post-Meal Potty", "Take outside within 15 minutes of eating. Establish routine.", Potty, "5-10 min"),
    item("morning-play", "7:45 AM", "Morning Play Session", "Interactive play with toys. Build bond and burn energy.", Play, "15-20 min"),
    training("morning-training", "8:00 AM", "Morning Training: Crate & Name", "Practice crate training and name recognition. Make it fun!", "5-10 min", "week1-crate-intro"),
    item("morning-nap", "8:15 AM", "Crate Time / Nap", "Puppies need lots of sleep! Crate with safe toy.", Sleep, "1.5-2 hours"),
    item("mid-morning-potty", "10:00 AM", "Potty Break", "Take outside immediately after waking up.", Potty, "5-10 min"),
    item("mid-morning-play", "10:15 AM", "Mid-Morning Play", "Gentle play, exploration, or cuddle time.", Play, "20 min"),
    training("mid-morning-training", "10:45 AM", "Training: Leash & Walking", "Practice leash walking indoors. Get used to collar/harness.", "5-10 min", "week1-leash-intro"),
    item("pre-lunch-potty", "11:00 AM", "Potty Break", "Regular potty schedule prevents accidents.", Potty, "5-10 min"),
    item("late-morning-nap", "11:15 AM", "Nap Time", "Back to crate for rest. Puppies sleep 18-20 hours daily!", Sleep, "1.5-2 hours"),
    item("lunch", "1:00 PM", "Lunch & Potty (Meal 2)", "Feed second meal, then immediate potty break.", Feeding, "20 min total"),
    item("midday-exercise", "1:30 PM", "Midday Exercise", "Short walk (10-15 min) or play in yard. Avoid overexertion.", Exercise, "15-20 min"),
    training("afternoon-training", "2:00 PM", "Training: Sit & Stay Basics", "Practice sit command and basic stay. Use treats and praise.", "10-15 min", "week1-sit-command"),
    item("afternoon-nap", "2:30 PM", "Afternoon Nap", "Long rest period. Quiet time for puppy.", Sleep, "2-3 hours"),
    item("late-afternoon-potty", "5:00 PM", "Potty Break", "Wake up and outside immediately.", Potty, "5-10 min"),
    item("afternoon-snack", "5:15 PM", "Afternoon Snack (Meal 3)", "Third meal of the day for young puppies.", Feeding, "15 min"),
    item("post-snack-potty", "5:30 PM", "Post-Meal Potty", "Consistent routine after every meal.", Potty, "5-10 min"),
    item("active-play", "5:45 PM", "Active Play Time", "Fetch, tug-of-war, or interactive play. Most energetic time!", Play, "20-30 min"),
    training("evening-training-1", "6:15 PM", "Training: Recall Practice", "Practice \"come\" command in safe area. Always reward!", "10 min", "week1-recall-start"),
    item("quiet-time", "6:30 PM", "Quiet Time / Nap", "Wind down before dinner. Calm activities or rest.", Sleep, "1 hour"),
    item("pre-dinner-potty", "7:30 PM", "Potty Break", "Pre-dinner potty break.", Potty, "5-10 min"),
    item("dinner", "7:45 PM", "Dinner (Meal 4)", "Final meal of the day. Same routine as other meals.", Feeding, "15 min"),
    item("post-dinner-potty", "8:00 PM", "Post-Dinner Potty", "Outside after eating.", Potty, "5-10 min"),
    item("family-time", "8:15 PM", "Family Time", "Gentle play, cuddles, bonding time with family.", Play, "30-45 min"),
    training("evening-training-2", "9:00 PM", "Training: Review Session", "Review commands learned today. Short and positive!", "5-10 min", "daily-review"),
    item("evening-potty", "9:15 PM", "Potty Break", "Regular evening potty break.", Potty, "5-10 min"),
    item("wind-down", "9:30 PM", "Wind Down Time", "Calm activities, chew toys, settle for evening.", Play, "30 min"),
    item("bedtime-potty", "10:00 PM", "Potty Break", "Pre-bedtime potty break.", Potty, "5-10 min"),
    item("bedtime-routine", "10:15 PM", "Bedtime Routine", "Last chance for water, gentle settling, into crate.", Sleep, "15 min"),
    item("lights-out", "10:30 PM", "Lights Out", "Crate near bedroom. May need 1-2 night potty breaks initially.", Sleep, "Until 7 AM"),
    item("night-potty-1", "12:00 AM", "Night Potty Break (Optional)", "For very young puppies (8-10 weeks). Quick and quiet - no play!", Potty, "5 min"),
    item("night-potty-2", "3:00 AM", "Night Potty Break (If Needed)", "Only if puppy whines. Keep lights dim, no interaction.", Potty, "5 min"),
];

pub fn find_item(id: &str) -> Option<&'static ScheduleItem> {
    DAILY_SCHEDULE.iter().find(|item| item.id == id)
}

pub fn items_in(category: ScheduleCategory) -> impl Iterator<Item = &'static ScheduleItem> {
    DAILY_SCHEDULE.iter().filter(move |item| item.category == category)
}

/// A fresh checklist for `date` with every schedule item open.
pub fn blank_todo_entry(id: String, date: DateTime<Utc>) -> DailyTodoEntry {
    DailyTodoEntry {
        id,
        date,
        items: DAILY_SCHEDULE
            .iter()
            .map(|item| TodoItem {
                schedule_item_id: item.id.to_string(),
                completed: false,
                completed_at: None,
            })
            .collect(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompletionStats {
    pub completed: usize,
    pub total: usize,
    pub percentage: u32,
}

pub fn completion_stats(entry: &DailyTodoEntry) -> CompletionStats {
    let total = entry.items.len();
    let completed = entry.items.iter().filter(|item| item.completed).count();
    let percentage = if total > 0 {
        ((completed as f64 / total as f64) * 100.0).round() as u32
    } else {
        0
    };

    CompletionStats {
        completed,
        total,
        percentage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::care::clock;
    use std::collections::HashSet;

    #[test]
    fn test_schedule_ids_are_unique_and_times_parse() {
        let ids: HashSet<_> = DAILY_SCHEDULE.iter().map(|item| item.id).collect();
        assert_eq!(ids.len(), DAILY_SCHEDULE.len());
        assert_eq!(DAILY_SCHEDULE.len(), 33);

        for item in DAILY_SCHEDULE {
            assert!(clock::parse_clock(item.time).is_some(), "{}", item.time);
        }
    }

    #[test]
    fn test_training_items_link_tasks() {
        assert_eq!(items_in(Training).count(), 5);
        assert!(items_in(Training).all(|item| item.training_task_id.is_some()));
        assert_eq!(items_in(Feeding).count(), 4);
    }

    #[test]
    fn test_blank_entry_and_stats() {
        let mut entry = blank_todo_entry("t1".to_string(), Utc::now());
        assert_eq!(entry.items.len(), DAILY_SCHEDULE.len());

        entry.items[0].completed = true;
        entry.items[1].completed = true;
        let stats = completion_stats(&entry);

        assert_eq!(stats.completed, 2);
        assert_eq!(stats.total, 33);
        assert_eq!(stats.percentage, 6);
    }

    #[test]
    fn test_empty_entry_has_zero_percent() {
        let entry = DailyTodoEntry {
            id: "t".to_string(),
            date: Utc::now(),
            items: Vec::new(),
        };
        assert_eq!(completion_stats(&entry).percentage, 0);
    }
}
