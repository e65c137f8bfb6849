use chrono::{NaiveDate, NaiveTime, TimeZone};
use std::cmp::Reverse;

use crate::care::{clock, local_day, training};
use crate::models::{
    ActiveNap, DailyTodoEntry, FoodEntry, PottyEntry, PuppyInfo, SleepEntry, SyncSnapshot,
    TrainingProgram,
};

/// Whether the last exchange with the server succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connection {
    Online,
    Offline,
}

/// Everything the client shows, newest entries first.
#[derive(Debug, Clone, PartialEq)]
pub struct CareState {
    pub training: TrainingProgram,
    pub food_entries: Vec<FoodEntry>,
    pub potty_entries: Vec<PottyEntry>,
    pub sleep_entries: Vec<SleepEntry>,
    pub todo_entries: Vec<DailyTodoEntry>,
    pub puppy_info: PuppyInfo,
    pub active_nap: Option<ActiveNap>,
    pub connection: Connection,
}

impl Default for CareState {
    fn default() -> Self {
        Self {
            training: training::default_program(),
            food_entries: Vec::new(),
            potty_entries: Vec::new(),
            sleep_entries: Vec::new(),
            todo_entries: Vec::new(),
            puppy_info: PuppyInfo::default(),
            active_nap: None,
            connection: Connection::Offline,
        }
    }
}

impl CareState {
    /// Folds a server snapshot into the state.
    ///
    /// The server wins everywhere except the todo list while a local todo
    /// save is still in flight; that round keeps the local list.
    pub fn reconcile<Tz: TimeZone>(&mut self, snapshot: SyncSnapshot, todo_in_flight: bool, tz: &Tz) {
        self.training =
            training::merge_with_defaults(&snapshot.training_tasks, &training::default_program());

        self.food_entries = snapshot.food_entries;
        sort_food(&mut self.food_entries);

        self.potty_entries = snapshot.potty_entries;
        sort_potty(&mut self.potty_entries, tz);

        self.sleep_entries = snapshot.sleep_entries;
        sort_sleep(&mut self.sleep_entries, tz);

        if !todo_in_flight {
            self.todo_entries = snapshot.todo_entries;
        }

        self.puppy_info = snapshot.puppy_info;
        self.active_nap = snapshot.active_nap;
        self.connection = Connection::Online;
    }

    /// The checklist for `day`, compared by calendar day in `tz`.
    pub fn todo_on<Tz: TimeZone>(&self, day: NaiveDate, tz: &Tz) -> Option<&DailyTodoEntry> {
        self.todo_entries
            .iter()
            .find(|entry| local_day(&entry.date, tz) == day)
    }

    pub fn puppy_age_weeks(&self, day: NaiveDate) -> Option<u32> {
        self.puppy_info.age_weeks_on(day)
    }
}

// Unparseable clock strings sort as midnight so they sink within their day.
fn time_key(raw: &str) -> NaiveTime {
    clock::parse_clock(raw).unwrap_or(NaiveTime::MIN)
}

pub fn sort_food(entries: &mut [FoodEntry]) {
    entries.sort_by_key(|entry| Reverse(entry.date));
}

pub fn sort_potty<Tz: TimeZone>(entries: &mut [PottyEntry], tz: &Tz) {
    entries.sort_by_key(|entry| Reverse((local_day(&entry.date, tz), time_key(&entry.time))));
}

pub fn sort_sleep<Tz: TimeZone>(entries: &mut [SleepEntry], tz: &Tz) {
    entries.sort_by_key(|entry| Reverse((local_day(&entry.date, tz), time_key(&entry.start_time))));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PottyLocation, PottyType, TodoItem};
    use chrono::Utc;

    fn potty(id: &str, day: u32, hour: u32, time: &str) -> PottyEntry {
        PottyEntry {
            id: id.to_string(),
            date: Utc.with_ymd_and_hms(2025, 11, day, hour, 0, 0).unwrap(),
            time: time.to_string(),
            kind: PottyType::Pee,
            location: PottyLocation::Outside,
            context: None,
            notes: None,
        }
    }

    fn todo(id: &str) -> DailyTodoEntry {
        DailyTodoEntry {
            id: id.to_string(),
            date: Utc.with_ymd_and_hms(2025, 11, 10, 0, 0, 0).unwrap(),
            items: vec![TodoItem {
                schedule_item_id: "breakfast".to_string(),
                completed: true,
                completed_at: None,
            }],
        }
    }

    #[test]
    fn test_potty_sorted_by_day_then_clock() {
        let mut entries = vec![
            potty("a", 10, 8, "08:00 AM"),
            potty("b", 11, 7, "07:00 AM"),
            potty("c", 10, 20, "08:00 PM"),
            potty("d", 11, 1, "12:30 AM"),
        ];
        sort_potty(&mut entries, &Utc);

        let ids: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["b", "d", "c", "a"]);
    }

    #[test]
    fn test_reconcile_merges_training_and_goes_online() {
        let mut saved = training::default_program();
        saved.find_mut("w1t1").unwrap().completed = true;

        let mut state = CareState::default();
        state.reconcile(
            SyncSnapshot {
                training_tasks: saved,
                ..SyncSnapshot::default()
            },
            false,
            &Utc,
        );

        assert_eq!(state.connection, Connection::Online);
        let week_one = &state.training.0[&1];
        assert_eq!(week_one.len(), 4);
        assert!(week_one[0].completed);
        assert!(week_one[1..].iter().all(|task| !task.completed));
    }

    #[test]
    fn test_in_flight_todo_is_kept() {
        let mut state = CareState {
            todo_entries: vec![todo("local")],
            ..CareState::default()
        };

        state.reconcile(SyncSnapshot::default(), true, &Utc);
        assert_eq!(state.todo_entries, vec![todo("local")]);

        state.reconcile(
            SyncSnapshot {
                todo_entries: vec![todo("server")],
                ..SyncSnapshot::default()
            },
            false,
            &Utc,
        );
        assert_eq!(state.todo_entries, vec![todo("server")]);
    }

    #[test]
    fn test_todo_lookup_by_calendar_day() {
        let state = CareState {
            todo_entries: vec![todo("t")],
            ..CareState::default()
        };
        let day = NaiveDate::from_ymd_opt(2025, 11, 10).unwrap();

        assert!(state.todo_on(day, &Utc).is_some());
        assert!(state.todo_on(day.succ_opt().unwrap(), &Utc).is_none());
    }
}
