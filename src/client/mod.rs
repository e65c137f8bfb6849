//! Headless client: keeps a local copy of the tracker's data in step with the
//! server and applies user actions optimistically.

pub mod api;
pub mod mirror;
pub mod poller;
pub mod progress;
pub mod state;

pub use api::{ClientError, ClientResult, HttpApi};
pub use mirror::{LocalMirror, MirrorKey};
pub use poller::PollHandle;
pub use progress::ProgressFile;
pub use state::{CareState, Connection};

use chrono::{DateTime, FixedOffset, Local, NaiveDate, TimeZone, Utc};
use serde::Serialize;
use std::future::Future;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;

use crate::care::{
    clock, feeding, local_day,
    potty::{self, PottyStats},
    schedule::{self, CompletionStats},
    sleep::{self, SleepEvaluation},
    training,
};
use crate::config::ClientConfig;
use crate::models::{
    ActiveNap, Collection, DailyTodoEntry, FoodEntry, PottyEntry, PuppyInfo, Record, SleepEntry,
    SyncSnapshot, TrainingProgram,
};

/// Age assumed for portions and sleep targets until a birth date is set.
const FALLBACK_AGE_WEEKS: u32 = 8;

/// What a call to [`SyncClient::sync`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Synced,
    /// The server was unreachable; state was restored from the mirror.
    Offline,
    /// Another sync was already running.
    Skipped,
}

/// Today at a glance.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    pub day: NaiveDate,
    pub age_weeks: Option<u32>,
    pub potty_this_week: PottyStats,
    pub sleep_minutes: f64,
    pub sleep: SleepEvaluation,
    pub feedings_done: usize,
    pub feedings_planned: usize,
    pub checklist: Option<CompletionStats>,
    pub nap_running: bool,
}

struct Inner {
    api: HttpApi,
    mirror: LocalMirror,
    state: RwLock<CareState>,
    tz: FixedOffset,
    sync_gate: Mutex<()>,
    todo_in_flight: AtomicUsize,
    // Bumped under the state lock whenever a todo save starts.
    todo_generation: AtomicU64,
}

/// Decrements the in-flight todo counter when the save task ends, even on panic.
struct TodoSaveGuard(Arc<Inner>);

impl Drop for TodoSaveGuard {
    fn drop(&mut self) {
        self.0.todo_in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

#[derive(Clone)]
pub struct SyncClient {
    inner: Arc<Inner>,
}

impl SyncClient {
    pub fn new(api: HttpApi, mirror: LocalMirror, tz: FixedOffset) -> Self {
        Self {
            inner: Arc::new(Inner {
                api,
                mirror,
                state: RwLock::new(CareState::default()),
                tz,
                sync_gate: Mutex::new(()),
                todo_in_flight: AtomicUsize::new(0),
                todo_generation: AtomicU64::new(0),
            }),
        }
    }

    /// Builds a client for the configured server, using the machine's
    /// current UTC offset for calendar days.
    pub async fn connect(config: &ClientConfig) -> ClientResult<Self> {
        let api = HttpApi::new(config.api_url.clone(), config.request_timeout)?;
        let mirror = LocalMirror::open(config.mirror_dir.clone()).await?;
        Ok(Self::new(api, mirror, *Local::now().offset()))
    }

    pub fn api(&self) -> &HttpApi {
        &self.inner.api
    }

    pub async fn state(&self) -> CareState {
        self.inner.state.read().await.clone()
    }

    pub async fn connection(&self) -> Connection {
        self.inner.state.read().await.connection
    }

    pub fn today(&self) -> NaiveDate {
        local_day(&Utc::now(), &self.inner.tz)
    }

    // ===== SYNC =====

    /// Pulls `/api/sync` and reconciles it into local state. Falls back to the
    /// mirror when the server cannot be reached.
    pub async fn sync(&self) -> SyncOutcome {
        let Ok(_gate) = self.inner.sync_gate.try_lock() else {
            tracing::debug!("Sync already running, skipping");
            return SyncOutcome::Skipped;
        };

        let generation = self.inner.todo_generation.load(Ordering::SeqCst);
        let busy_at_start = self.inner.todo_in_flight.load(Ordering::SeqCst) > 0;

        match self.inner.api.sync().await {
            Ok(snapshot) => {
                let state = {
                    let mut state = self.inner.state.write().await;
                    // The snapshot may predate any todo save that overlapped the fetch.
                    let todo_busy = busy_at_start
                        || self.inner.todo_in_flight.load(Ordering::SeqCst) > 0
                        || self.inner.todo_generation.load(Ordering::SeqCst) != generation;
                    if todo_busy {
                        tracing::debug!("Todo save in flight, keeping local checklist");
                    }
                    state.reconcile(snapshot, todo_busy, &self.inner.tz);
                    state.clone()
                };
                self.mirror_all(&state).await;
                SyncOutcome::Synced
            }
            Err(e) => {
                tracing::warn!(error = %e, "Sync failed, using local mirror");
                self.restore_from_mirror().await;
                SyncOutcome::Offline
            }
        }
    }

    /// Probes `/api/health` and records the result as the connection state.
    pub async fn check_health(&self) -> Connection {
        let connection = match self.inner.api.health().await {
            Ok(_) => Connection::Online,
            Err(e) => {
                tracing::warn!(error = %e, "Health check failed");
                Connection::Offline
            }
        };
        self.inner.state.write().await.connection = connection;
        connection
    }

    async fn restore_from_mirror(&self) {
        let mirror = &self.inner.mirror;
        let program: Option<TrainingProgram> = self.load_mirrored(MirrorKey::Training).await;
        let food: Option<Vec<FoodEntry>> = self.load_mirrored(MirrorKey::Food).await;
        let potty: Option<Vec<PottyEntry>> = self.load_mirrored(MirrorKey::Potty).await;
        let sleep: Option<Vec<SleepEntry>> = self.load_mirrored(MirrorKey::Sleep).await;
        let todo: Option<Vec<DailyTodoEntry>> = self.load_mirrored(MirrorKey::Todo).await;
        let puppy: Option<PuppyInfo> = self.load_mirrored(MirrorKey::Puppy).await;
        let nap: Option<Option<ActiveNap>> = self.load_mirrored(MirrorKey::ActiveNap).await;

        let mut current = self.inner.state.write().await;
        if let Some(saved) = program {
            current.training = training::merge_with_defaults(&saved, &training::default_program());
        }
        if let Some(mut entries) = food {
            state::sort_food(&mut entries);
            current.food_entries = entries;
        }
        if let Some(mut entries) = potty {
            state::sort_potty(&mut entries, &self.inner.tz);
            current.potty_entries = entries;
        }
        if let Some(mut entries) = sleep {
            state::sort_sleep(&mut entries, &self.inner.tz);
            current.sleep_entries = entries;
        }
        if let Some(entries) = todo {
            current.todo_entries = entries;
        }
        if let Some(info) = puppy {
            current.puppy_info = info;
        }
        if let Some(nap) = nap {
            current.active_nap = nap;
        }
        current.connection = Connection::Offline;

        tracing::debug!(dir = %mirror.dir().display(), "State restored from mirror");
    }

    async fn load_mirrored<T: serde::de::DeserializeOwned>(&self, key: MirrorKey) -> Option<T> {
        match self.inner.mirror.load(key).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key = key.name(), error = %e, "Ignoring unreadable mirror entry");
                None
            }
        }
    }

    async fn mirror<T: Serialize + ?Sized>(&self, key: MirrorKey, value: &T) {
        if let Err(e) = self.inner.mirror.store(key, value).await {
            tracing::warn!(key = key.name(), error = %e, "Failed to update local mirror");
        }
    }

    async fn mirror_all(&self, state: &CareState) {
        self.mirror(MirrorKey::Training, &state.training).await;
        self.mirror(MirrorKey::Food, &state.food_entries).await;
        self.mirror(MirrorKey::Potty, &state.potty_entries).await;
        self.mirror(MirrorKey::Sleep, &state.sleep_entries).await;
        self.mirror(MirrorKey::Todo, &state.todo_entries).await;
        self.mirror(MirrorKey::Puppy, &state.puppy_info).await;
        self.mirror(MirrorKey::ActiveNap, &state.active_nap).await;
    }

    /// Runs a server write in the background; failures are logged only.
    fn spawn_write<F>(&self, operation: &'static str, write: F) -> JoinHandle<()>
    where
        F: Future<Output = ClientResult<()>> + Send + 'static,
    {
        tokio::spawn(async move {
            if let Err(e) = write.await {
                tracing::warn!(operation, error = %e, "Server write failed");
            }
        })
    }

    // ===== TRAINING =====

    /// Flips a task's completion. `None` when the task id is unknown.
    pub async fn toggle_training_task(&self, task_id: &str) -> Option<JoinHandle<()>> {
        let program = {
            let mut state = self.inner.state.write().await;
            let task = state.training.find_mut(task_id)?;
            task.completed = !task.completed;
            state.training.clone()
        };
        self.mirror(MirrorKey::Training, &program).await;

        let inner = self.inner.clone();
        Some(self.spawn_write("save training tasks", async move {
            inner.api.save_training(&program).await
        }))
    }

    // ===== FOOD =====

    /// A blank entry for `date` with the day's feeding slots portioned for
    /// the puppy's age.
    pub async fn new_food_entry_for(&self, date: DateTime<Utc>) -> FoodEntry {
        let day = local_day(&date, &self.inner.tz);
        let age_weeks = self.inner.state.read().await.puppy_age_weeks(day);

        FoodEntry {
            id: uuid::Uuid::new_v4().to_string(),
            date,
            puppy_age_weeks: age_weeks,
            feeding_times: feeding::feeding_slots(age_weeks.unwrap_or(FALLBACK_AGE_WEEKS)),
            notes: None,
        }
    }

    pub async fn add_food_entry(&self, mut entry: FoodEntry) -> JoinHandle<()> {
        entry.ensure_id();
        let entries = {
            let mut state = self.inner.state.write().await;
            upsert_local(&mut state.food_entries, entry.clone());
            state::sort_food(&mut state.food_entries);
            state.food_entries.clone()
        };
        self.mirror(MirrorKey::Food, &entries).await;
        self.post(entry)
    }

    pub async fn update_food_entry(&self, entry: FoodEntry) -> Option<JoinHandle<()>> {
        let entries = {
            let mut state = self.inner.state.write().await;
            replace_local(&mut state.food_entries, entry.clone())?;
            state::sort_food(&mut state.food_entries);
            state.food_entries.clone()
        };
        self.mirror(MirrorKey::Food, &entries).await;
        Some(self.put(entry))
    }

    /// Marks one feeding slot done or not done.
    pub async fn set_feeding_completed(
        &self,
        entry_id: &str,
        slot: usize,
        completed: bool,
    ) -> Option<JoinHandle<()>> {
        let (entry, entries) = {
            let mut state = self.inner.state.write().await;
            let entry = state.food_entries.iter_mut().find(|e| e.id == entry_id)?;
            entry.feeding_times.get_mut(slot)?.completed = completed;
            let entry = entry.clone();
            (entry, state.food_entries.clone())
        };
        self.mirror(MirrorKey::Food, &entries).await;
        Some(self.put(entry))
    }

    pub async fn delete_food_entry(&self, id: &str) -> JoinHandle<()> {
        let entries = {
            let mut state = self.inner.state.write().await;
            state.food_entries.retain(|e| e.id != id);
            state.food_entries.clone()
        };
        self.mirror(MirrorKey::Food, &entries).await;
        self.delete(Collection::Food, id)
    }

    pub async fn clear_food_entries(&self) -> JoinHandle<()> {
        self.inner.state.write().await.food_entries.clear();
        self.mirror(MirrorKey::Food, &Vec::<FoodEntry>::new()).await;
        self.clear(Collection::Food)
    }

    // ===== POTTY =====

    pub async fn add_potty_entry(&self, mut entry: PottyEntry) -> JoinHandle<()> {
        entry.ensure_id();
        let entries = {
            let mut state = self.inner.state.write().await;
            upsert_local(&mut state.potty_entries, entry.clone());
            state::sort_potty(&mut state.potty_entries, &self.inner.tz);
            state.potty_entries.clone()
        };
        self.mirror(MirrorKey::Potty, &entries).await;
        self.post(entry)
    }

    pub async fn update_potty_entry(&self, entry: PottyEntry) -> Option<JoinHandle<()>> {
        let entries = {
            let mut state = self.inner.state.write().await;
            replace_local(&mut state.potty_entries, entry.clone())?;
            state::sort_potty(&mut state.potty_entries, &self.inner.tz);
            state.potty_entries.clone()
        };
        self.mirror(MirrorKey::Potty, &entries).await;
        Some(self.put(entry))
    }

    pub async fn delete_potty_entry(&self, id: &str) -> JoinHandle<()> {
        let entries = {
            let mut state = self.inner.state.write().await;
            state.potty_entries.retain(|e| e.id != id);
            state.potty_entries.clone()
        };
        self.mirror(MirrorKey::Potty, &entries).await;
        self.delete(Collection::Potty, id)
    }

    pub async fn clear_potty_entries(&self) -> JoinHandle<()> {
        self.inner.state.write().await.potty_entries.clear();
        self.mirror(MirrorKey::Potty, &Vec::<PottyEntry>::new()).await;
        self.clear(Collection::Potty)
    }

    // ===== SLEEP =====

    pub async fn add_sleep_entry(&self, mut entry: SleepEntry) -> JoinHandle<()> {
        entry.ensure_id();
        self.insert_sleep_locally(entry.clone()).await;
        self.post(entry)
    }

    pub async fn update_sleep_entry(&self, entry: SleepEntry) -> Option<JoinHandle<()>> {
        let entries = {
            let mut state = self.inner.state.write().await;
            replace_local(&mut state.sleep_entries, entry.clone())?;
            state::sort_sleep(&mut state.sleep_entries, &self.inner.tz);
            state.sleep_entries.clone()
        };
        self.mirror(MirrorKey::Sleep, &entries).await;
        Some(self.put(entry))
    }

    pub async fn delete_sleep_entry(&self, id: &str) -> JoinHandle<()> {
        let entries = {
            let mut state = self.inner.state.write().await;
            state.sleep_entries.retain(|e| e.id != id);
            state.sleep_entries.clone()
        };
        self.mirror(MirrorKey::Sleep, &entries).await;
        self.delete(Collection::Sleep, id)
    }

    async fn insert_sleep_locally(&self, entry: SleepEntry) {
        let entries = {
            let mut state = self.inner.state.write().await;
            upsert_local(&mut state.sleep_entries, entry);
            state::sort_sleep(&mut state.sleep_entries, &self.inner.tz);
            state.sleep_entries.clone()
        };
        self.mirror(MirrorKey::Sleep, &entries).await;
    }

    // ===== DAILY TODO =====

    /// The checklist for `day`, created from the default schedule (and saved)
    /// when none exists yet.
    pub async fn todo_for(&self, day: NaiveDate) -> DailyTodoEntry {
        let (entry, _save) = self.todo_with(day, |_| false).await;
        entry
    }

    /// Toggles one schedule item on `day`'s checklist. Only today's
    /// checklist is editable; other days and unknown items give `None`.
    pub async fn toggle_todo_item(
        &self,
        day: NaiveDate,
        schedule_item_id: &str,
    ) -> Option<JoinHandle<()>> {
        if day != self.today() {
            tracing::debug!(%day, "Checklist is read-only outside today");
            return None;
        }

        let now = Utc::now();
        let (_, save) = self
            .todo_with(day, |entry| entry.toggle(schedule_item_id, now))
            .await;
        save
    }

    /// Finds or creates `day`'s entry, applies `change`, and saves the entry
    /// when it was created or `change` reports a modification.
    async fn todo_with<F>(&self, day: NaiveDate, change: F) -> (DailyTodoEntry, Option<JoinHandle<()>>)
    where
        F: FnOnce(&mut DailyTodoEntry) -> bool,
    {
        let (entry, entries, guard) = {
            let mut state = self.inner.state.write().await;
            let tz = &self.inner.tz;

            let (index, created) = match state
                .todo_entries
                .iter()
                .position(|entry| local_day(&entry.date, tz) == day)
            {
                Some(index) => (index, false),
                None => {
                    let entry = schedule::blank_todo_entry(
                        uuid::Uuid::new_v4().to_string(),
                        start_of_day(day, tz),
                    );
                    state.todo_entries.push(entry);
                    (state.todo_entries.len() - 1, true)
                }
            };

            let changed = change(&mut state.todo_entries[index]);
            // Counted and guarded under the lock, so a caller dropped past this
            // point still releases the count.
            let guard = (created || changed).then(|| {
                self.inner.todo_in_flight.fetch_add(1, Ordering::SeqCst);
                self.inner.todo_generation.fetch_add(1, Ordering::SeqCst);
                TodoSaveGuard(self.inner.clone())
            });

            (state.todo_entries[index].clone(), state.todo_entries.clone(), guard)
        };

        let Some(guard) = guard else {
            return (entry, None);
        };

        // Spawned before the mirror write, which is the next await point.
        let inner = self.inner.clone();
        let payload = entry.clone();
        let save = self.spawn_write("save todo entry", async move {
            let _guard = guard;
            inner.api.save_record(&payload).await
        });

        self.mirror(MirrorKey::Todo, &entries).await;

        (entry, Some(save))
    }

    // ===== PUPPY =====

    pub async fn save_puppy_info(&self, info: PuppyInfo) -> JoinHandle<()> {
        self.inner.state.write().await.puppy_info = info.clone();
        self.mirror(MirrorKey::Puppy, &info).await;

        let inner = self.inner.clone();
        self.spawn_write("save puppy info", async move { inner.api.save_puppy(&info).await })
    }

    // ===== NAP =====

    /// Starts a nap timer locally and on the server. The server assigns its
    /// own id; the next sync adopts it.
    pub async fn start_nap(&self) -> (ActiveNap, JoinHandle<()>) {
        let nap = ActiveNap::start_now();
        self.inner.state.write().await.active_nap = Some(nap.clone());
        self.mirror(MirrorKey::ActiveNap, &Some(&nap)).await;

        let inner = self.inner.clone();
        let write = self.spawn_write("start nap", async move {
            inner.api.start_nap().await.map(|_| ())
        });
        (nap, write)
    }

    /// Ends the running nap and logs it as a sleep entry. The entry is `None`
    /// when no nap was running locally or it lasted no time at all.
    pub async fn stop_nap(&self) -> (Option<SleepEntry>, JoinHandle<()>) {
        let now = Utc::now();
        let entry = match self.take_nap().await {
            Some(nap) => self.sleep_entry_for(nap, now).await,
            None => None,
        };
        if let Some(entry) = &entry {
            self.insert_sleep_locally(entry.clone()).await;
        }

        // Stopping the timer and logging the sleep succeed or fail independently.
        let inner = self.inner.clone();
        let stop = self.spawn_write("stop nap", async move {
            inner.api.stop_nap().await.map(|_| ())
        });
        let log = entry.clone().map(|entry| self.post(entry));

        let write = tokio::spawn(async move {
            for handle in std::iter::once(stop).chain(log) {
                if let Err(e) = handle.await {
                    tracing::warn!(error = %e, "Nap write task failed");
                }
            }
        });

        (entry, write)
    }

    /// Drops the running nap without logging any sleep.
    pub async fn cancel_nap(&self) -> JoinHandle<()> {
        if let Some(nap) = self.take_nap().await {
            tracing::debug!(nap_id = %nap.id, "Nap cancelled");
        }

        let inner = self.inner.clone();
        self.spawn_write("cancel nap", async move { inner.api.cancel_nap().await })
    }

    async fn take_nap(&self) -> Option<ActiveNap> {
        let nap = self.inner.state.write().await.active_nap.take();
        self.mirror(MirrorKey::ActiveNap, &None::<ActiveNap>).await;
        nap
    }

    async fn sleep_entry_for(&self, nap: ActiveNap, end: DateTime<Utc>) -> Option<SleepEntry> {
        let tz = &self.inner.tz;
        let ended = nap.end_at(end);
        if ended.duration_minutes <= 0.0 {
            tracing::debug!(nap_id = %ended.id, "Nap too short to log");
            return None;
        }
        let age_weeks = self
            .inner
            .state
            .read()
            .await
            .puppy_age_weeks(local_day(&ended.start_time, tz))
            .unwrap_or(FALLBACK_AGE_WEEKS);

        Some(SleepEntry {
            id: uuid::Uuid::new_v4().to_string(),
            date: ended.start_time,
            start_time: clock::format_clock(ended.start_time.with_timezone(tz).time()),
            end_time: clock::format_clock(ended.end_time.with_timezone(tz).time()),
            duration: ended.duration_minutes,
            quality: Default::default(),
            location: Default::default(),
            puppy_age_weeks: age_weeks,
            notes: None,
        })
    }

    // ===== SUMMARY =====

    pub async fn summary(&self, day: NaiveDate) -> DailySummary {
        let state = self.inner.state.read().await;
        let tz = &self.inner.tz;
        let age_weeks = state.puppy_age_weeks(day);

        let sleep_minutes: f64 = state
            .sleep_entries
            .iter()
            .filter(|entry| local_day(&entry.date, tz) == day)
            .map(|entry| entry.duration)
            .sum();

        let (feedings_done, feedings_planned) = state
            .food_entries
            .iter()
            .filter(|entry| local_day(&entry.date, tz) == day)
            .flat_map(|entry| &entry.feeding_times)
            .fold((0, 0), |(done, planned), slot| {
                (done + usize::from(slot.completed), planned + 1)
            });

        DailySummary {
            day,
            age_weeks,
            potty_this_week: potty::weekly_stats(&state.potty_entries, day, tz),
            sleep_minutes,
            sleep: sleep::evaluate_daily_sleep(
                sleep_minutes,
                age_weeks.unwrap_or(FALLBACK_AGE_WEEKS),
            ),
            feedings_done,
            feedings_planned,
            checklist: state.todo_on(day, tz).map(schedule::completion_stats),
            nap_running: state.active_nap.is_some(),
        }
    }

    // ===== WRITES =====

    fn post<T: Record>(&self, record: T) -> JoinHandle<()> {
        let inner = self.inner.clone();
        self.spawn_write("save record", async move { inner.api.save_record(&record).await })
    }

    fn put<T: Record>(&self, record: T) -> JoinHandle<()> {
        let inner = self.inner.clone();
        self.spawn_write("update record", async move { inner.api.update_record(&record).await })
    }

    fn delete(&self, collection: Collection, id: &str) -> JoinHandle<()> {
        let inner = self.inner.clone();
        let id = id.to_string();
        self.spawn_write("delete record", async move {
            inner.api.delete_record(collection, &id).await
        })
    }

    fn clear(&self, collection: Collection) -> JoinHandle<()> {
        let inner = self.inner.clone();
        self.spawn_write("clear collection", async move {
            inner.api.clear_collection(collection).await
        })
    }

    /// Replaces local state with `snapshot` as if it came from the server.
    /// Used when seeding a client without a reachable server.
    pub async fn apply_snapshot(&self, snapshot: SyncSnapshot) {
        let state = {
            let mut state = self.inner.state.write().await;
            state.reconcile(snapshot, false, &self.inner.tz);
            state.connection = Connection::Offline;
            state.clone()
        };
        self.mirror_all(&state).await;
    }
}

fn upsert_local<T: Record>(records: &mut Vec<T>, record: T) {
    match records.iter_mut().find(|existing| existing.id() == record.id()) {
        Some(existing) => *existing = record,
        None => records.push(record),
    }
}

fn replace_local<T: Record>(records: &mut [T], record: T) -> Option<()> {
    let existing = records.iter_mut().find(|existing| existing.id() == record.id())?;
    *existing = record;
    Some(())
}

fn start_of_day<Tz: TimeZone>(day: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    let midnight = day.and_time(chrono::NaiveTime::MIN);
    tz.from_local_datetime(&midnight)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .unwrap_or_else(|| midnight.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    async fn offline_client() -> SyncClient {
        // Nothing listens on port 9; every request fails fast.
        let api = HttpApi::new("http://127.0.0.1:9", std::time::Duration::from_millis(200)).unwrap();
        let dir = std::env::temp_dir().join(format!("puppy-client-{}", uuid::Uuid::new_v4()));
        let mirror = LocalMirror::open(dir).await.unwrap();
        SyncClient::new(api, mirror, FixedOffset::east_opt(0).unwrap())
    }

    #[test]
    fn test_start_of_day_in_offset() {
        let day = NaiveDate::from_ymd_opt(2025, 11, 10).unwrap();
        let pacific = FixedOffset::west_opt(8 * 3600).unwrap();
        assert_eq!(
            start_of_day(day, &pacific),
            Utc.with_ymd_and_hms(2025, 11, 10, 8, 0, 0).unwrap()
        );
    }

    #[tokio::test]
    async fn test_todo_for_creates_once() {
        let client = offline_client().await;
        let day = NaiveDate::from_ymd_opt(2025, 11, 10).unwrap();

        let first = client.todo_for(day).await;
        let second = client.todo_for(day).await;

        assert_eq!(first.id, second.id);
        assert_eq!(first.items.len(), schedule::DAILY_SCHEDULE.len());
        assert_eq!(client.state().await.todo_entries.len(), 1);
    }

    #[tokio::test]
    async fn test_toggle_unknown_item_is_none() {
        let client = offline_client().await;
        let day = client.today();
        client.todo_for(day).await;

        assert!(client.toggle_todo_item(day, "no-such-item").await.is_none());
    }

    #[tokio::test]
    async fn test_only_today_is_editable() {
        let client = offline_client().await;
        let item = schedule::DAILY_SCHEDULE[0].id;
        let today = client.today();

        for day in [today - Duration::days(1), today + Duration::days(1)] {
            assert!(client.toggle_todo_item(day, item).await.is_none());
        }
        assert!(client.state().await.todo_entries.is_empty());

        let save = client.toggle_todo_item(today, item).await;
        assert!(save.is_some());
        let state = client.state().await;
        assert!(state.todo_on(today, &Utc).unwrap().items[0].completed);
    }

    #[tokio::test]
    async fn test_dropped_todo_call_releases_in_flight_count() {
        let client = offline_client().await;
        let day = client.today();

        // Drop the call after its first poll, as a timeout or select would.
        tokio::select! {
            biased;
            _ = client.todo_for(day) => {}
            _ = async {} => {}
        }

        // The save was already spawned; it fails against the dead server and
        // drops its guard.
        for _ in 0..50 {
            if client.inner.todo_in_flight.load(Ordering::SeqCst) == 0 {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        }
        assert_eq!(client.inner.todo_in_flight.load(Ordering::SeqCst), 0);
        assert_eq!(client.state().await.todo_entries.len(), 1);
    }

    #[tokio::test]
    async fn test_stopped_nap_is_logged_cancelled_is_not() {
        let client = offline_client().await;

        let (nap, write) = client.start_nap().await;
        write.await.unwrap();
        assert_eq!(client.state().await.active_nap, Some(nap));
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        let (entry, write) = client.stop_nap().await;
        write.await.unwrap();
        let entry = entry.unwrap();
        assert!(entry.duration > 0.0);
        assert!(clock::parse_clock(&entry.start_time).is_some());

        let state = client.state().await;
        assert!(state.active_nap.is_none());
        assert_eq!(state.sleep_entries, vec![entry]);

        client.start_nap().await.1.await.unwrap();
        client.cancel_nap().await.await.unwrap();

        let state = client.state().await;
        assert!(state.active_nap.is_none());
        assert_eq!(state.sleep_entries.len(), 1);
    }

    #[tokio::test]
    async fn test_summary_counts_today_only() {
        let client = offline_client().await;
        let day = NaiveDate::from_ymd_opt(2025, 11, 10).unwrap();
        let noon = Utc.with_ymd_and_hms(2025, 11, 10, 12, 0, 0).unwrap();

        let mut entry = client.new_food_entry_for(noon).await;
        entry.feeding_times[0].completed = true;
        client.add_food_entry(entry).await.await.unwrap();

        let mut yesterday = client.new_food_entry_for(noon - Duration::days(1)).await;
        yesterday.feeding_times[0].completed = true;
        client.add_food_entry(yesterday).await.await.unwrap();

        let summary = client.summary(day).await;
        assert_eq!(summary.feedings_done, 1);
        assert_eq!(summary.feedings_planned, 4);
        assert!(summary.checklist.is_none());
        assert!(!summary.nap_running);
    }
}
