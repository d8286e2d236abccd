//! The authoritative activity collection and every mutation applied to it.
//!
//! Each successful mutation is written through to the key-value store before
//! returning. If that write fails the in-memory collection keeps the change and
//! the caller receives [`StoreError::Persistence`].

use crate::clock::Clock;
use crate::errors::{Result, StoreError};
use crate::models::{
    Activity, ActivityId, ActivityKind, CompletionPolicy, DayRecord, DayValue, LogInput,
};
use crate::storage::KeyValueStore;
use crate::streak;
use chrono::{NaiveDate, Utc};
use tracing::{error, info, warn};

pub const ACTIVITIES_KEY: &str = "activities";

/// Reads the stored collection. Missing or unreadable data yields an empty list.
pub fn load_activities(storage: &dyn KeyValueStore) -> Vec<Activity> {
    let raw = match storage.get_item(ACTIVITIES_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(err) => {
            error!("failed to read activities: {err}");
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<Activity>>(&raw) {
        Ok(activities) => activities,
        Err(err) => {
            error!("failed to parse activities: {err}");
            Vec::new()
        }
    }
}

pub fn save_activities(storage: &mut dyn KeyValueStore, activities: &[Activity]) -> Result<()> {
    let payload = serde_json::to_string(activities)?;
    storage.set_item(ACTIVITIES_KEY, &payload)
}

pub struct ActivityStore {
    storage: Box<dyn KeyValueStore>,
    clock: Box<dyn Clock>,
    activities: Vec<Activity>,
    last_issued: u64,
}

impl ActivityStore {
    pub fn open(storage: Box<dyn KeyValueStore>, clock: Box<dyn Clock>) -> Self {
        let mut store = Self {
            storage,
            clock,
            activities: Vec::new(),
            last_issued: 0,
        };
        store.load();
        store
    }

    /// Replaces the in-memory collection with what is currently stored.
    /// Another writer's changes win over anything unsaved here.
    pub fn load(&mut self) -> &[Activity] {
        self.activities = load_activities(self.storage.as_ref());
        self.refresh_streaks();
        info!("loaded {} activities", self.activities.len());
        &self.activities
    }

    pub fn save(&mut self) -> Result<()> {
        save_activities(self.storage.as_mut(), &self.activities).inspect_err(|err| {
            error!("failed to save activities: {err}");
        })
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    pub fn get(&self, id: ActivityId) -> Option<&Activity> {
        self.activities.iter().find(|activity| activity.id == id)
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn storage(&self) -> &dyn KeyValueStore {
        self.storage.as_ref()
    }

    pub fn storage_mut(&mut self) -> &mut dyn KeyValueStore {
        self.storage.as_mut()
    }

    pub fn create(
        &mut self,
        name: &str,
        kind: ActivityKind,
        policy: CompletionPolicy,
        goal: u64,
    ) -> Result<Activity> {
        let name = self.validate_name(name, None)?;
        let id = self.next_id()?;
        let activity = Activity::new(id, name, kind, policy, goal);
        self.activities.push(activity.clone());
        info!("created activity {id} ({})", activity.name);
        self.save()?;
        Ok(activity)
    }

    pub fn update(
        &mut self,
        id: ActivityId,
        name: &str,
        kind: ActivityKind,
        policy: CompletionPolicy,
        goal: u64,
    ) -> Result<Activity> {
        let index = self.index_of(id)?;
        let name = self.validate_name(name, Some(id))?;

        let activity = &mut self.activities[index];
        activity.name = name;
        activity.kind = kind;
        activity.policy = policy;
        activity.goal = goal;
        streak::refresh(activity, self.clock.as_ref());
        let updated = activity.clone();

        info!("updated activity {id}");
        self.save()?;
        Ok(updated)
    }

    /// Removes the activity and its history. Returns whether anything was removed.
    pub fn delete(&mut self, id: ActivityId) -> Result<bool> {
        let before = self.activities.len();
        self.activities.retain(|activity| activity.id != id);
        if self.activities.len() == before {
            return Ok(false);
        }

        info!("deleted activity {id}");
        self.save()?;
        Ok(true)
    }

    /// Overwrites today's value and notes. Invalid input leaves the stored record untouched.
    pub fn record_today(&mut self, id: ActivityId, value: LogInput, notes: &str) -> Result<DayRecord> {
        let index = self.index_of(id)?;
        let value = decode_value(self.activities[index].kind, value).inspect_err(|err| {
            warn!("rejected log for activity {id}: {err}");
        })?;

        self.write_today(index, |record| {
            record.value = value;
            record.notes = notes.to_string();
        })
    }

    /// Flips today's done flag on a boolean activity and stores `notes` with it.
    pub fn toggle_today(&mut self, id: ActivityId, notes: &str) -> Result<DayRecord> {
        let index = self.index_of(id)?;
        if self.activities[index].kind != ActivityKind::Boolean {
            return Err(StoreError::validation(
                "only done/not-done activities can be toggled",
            ));
        }

        self.write_today(index, |record| {
            let done = record.value.resolve(ActivityKind::Boolean) == DayValue::Done(true);
            record.value = DayValue::Done(!done);
            record.notes = notes.to_string();
        })
    }

    pub fn set_today_notes(&mut self, id: ActivityId, notes: &str) -> Result<DayRecord> {
        let index = self.index_of(id)?;
        self.write_today(index, |record| record.notes = notes.to_string())
    }

    /// Gives every activity a default record for today if it has none yet.
    pub fn ensure_today(&mut self) -> Result<()> {
        let today = self.clock.today();
        let mut inserted = false;
        for activity in &mut self.activities {
            if !activity.history.contains_key(&today) {
                activity.record_mut(today);
                streak::refresh(activity, self.clock.as_ref());
                inserted = true;
            }
        }

        if inserted {
            self.save()?;
        }
        Ok(())
    }

    /// Recomputes cached streaks for the current date. Nothing is persisted.
    pub fn refresh_streaks(&mut self) {
        for activity in &mut self.activities {
            streak::refresh(activity, self.clock.as_ref());
        }
    }

    fn write_today(
        &mut self,
        index: usize,
        apply: impl FnOnce(&mut DayRecord),
    ) -> Result<DayRecord> {
        let today = self.clock.today();
        let activity = &mut self.activities[index];
        let record = activity.record_mut(today);
        apply(record);
        let record = record.clone();
        streak::refresh(activity, self.clock.as_ref());

        self.save()?;
        Ok(record)
    }

    fn index_of(&self, id: ActivityId) -> Result<usize> {
        self.activities
            .iter()
            .position(|activity| activity.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    fn validate_name(&self, name: &str, editing: Option<ActivityId>) -> Result<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::validation("activity name must not be empty"));
        }
        let taken = self
            .activities
            .iter()
            .any(|activity| activity.name == name && Some(activity.id) != editing);
        if taken {
            return Err(StoreError::validation(format!(
                "an activity named '{name}' already exists"
            )));
        }
        Ok(name.to_string())
    }

    fn next_id(&mut self) -> Result<ActivityId> {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        let highest = self
            .activities
            .iter()
            .map(|activity| activity.id.0)
            .max()
            .unwrap_or(0);
        let floor = highest
            .max(self.last_issued)
            .checked_add(1)
            .ok_or_else(|| StoreError::Persistence("activity ids exhausted".to_string()))?;
        let id = now.max(floor);
        self.last_issued = id;
        Ok(ActivityId(id))
    }
}

fn decode_value(kind: ActivityKind, input: LogInput) -> Result<DayValue> {
    match (kind, input) {
        (ActivityKind::Boolean, LogInput::Flag(done)) => Ok(DayValue::Done(done)),
        (ActivityKind::Boolean, _) => Err(StoreError::validation(
            "done/not-done activities take true or false",
        )),
        (ActivityKind::Quantity, LogInput::Flag(_)) => {
            Err(StoreError::validation("quantity must be a number"))
        }
        (ActivityKind::Quantity, LogInput::Number(count)) => non_negative(count),
        (ActivityKind::Quantity, LogInput::Fraction(count)) => Err(StoreError::validation(
            format!("{count} is not a whole number"),
        )),
        (ActivityKind::Quantity, LogInput::Text(text)) => {
            let count = text
                .trim()
                .parse::<i64>()
                .map_err(|_| StoreError::validation(format!("'{text}' is not a whole number")))?;
            non_negative(count)
        }
    }
}

fn non_negative(count: i64) -> Result<DayValue> {
    u64::try_from(count)
        .map(DayValue::Count)
        .map_err(|_| StoreError::validation("quantity must not be negative"))
}
