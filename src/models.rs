use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::{collections::BTreeMap, fmt};

/// Opaque activity identifier. Persisted as a plain JSON number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityId(pub u64);

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Boolean,
    Quantity,
}

impl ActivityKind {
    pub fn default_value(self) -> DayValue {
        match self {
            Self::Boolean => DayValue::Done(false),
            Self::Quantity => DayValue::Count(0),
        }
    }
}

/// Which daily outcome counts toward a streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompletionPolicy {
    #[default]
    CountIfDone,
    CountIfNotDone,
}

/// A logged value. Which variant is valid depends on the owning activity's kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DayValue {
    Done(bool),
    Count(u64),
}

impl DayValue {
    /// Coerces the value into the variant matching `kind`.
    pub fn resolve(self, kind: ActivityKind) -> Self {
        match (kind, self) {
            (ActivityKind::Boolean, Self::Count(count)) => Self::Done(count != 0),
            (ActivityKind::Quantity, Self::Done(done)) => Self::Count(u64::from(done)),
            (_, value) => value,
        }
    }

    pub fn as_count(self) -> u64 {
        match self {
            Self::Done(done) => u64::from(done),
            Self::Count(count) => count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRecord {
    pub value: DayValue,
    #[serde(default, deserialize_with = "null_as_default")]
    pub notes: String,
}

impl DayRecord {
    pub fn empty(kind: ActivityKind) -> Self {
        Self {
            value: kind.default_value(),
            notes: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: ActivityId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    #[serde(rename = "countType", default)]
    pub policy: CompletionPolicy,
    #[serde(default, deserialize_with = "lenient_goal")]
    pub goal: u64,
    #[serde(default)]
    pub history: BTreeMap<NaiveDate, DayRecord>,
    #[serde(default)]
    pub current_streak: u32,
    #[serde(default)]
    pub longest_streak: u32,
}

impl Activity {
    pub fn new(
        id: ActivityId,
        name: String,
        kind: ActivityKind,
        policy: CompletionPolicy,
        goal: u64,
    ) -> Self {
        Self {
            id,
            name,
            kind,
            policy,
            goal,
            history: BTreeMap::new(),
            current_streak: 0,
            longest_streak: 0,
        }
    }

    /// The value logged on `date`, read as the activity's current kind. Stored
    /// values are never rewritten, so a kind change can be reverted losslessly.
    pub fn value_on(&self, date: NaiveDate) -> Option<DayValue> {
        self.history
            .get(&date)
            .map(|record| record.value.resolve(self.kind))
    }

    pub fn record_mut(&mut self, date: NaiveDate) -> &mut DayRecord {
        let kind = self.kind;
        self.history
            .entry(date)
            .or_insert_with(|| DayRecord::empty(kind))
    }

    pub fn goal_met(&self, date: NaiveDate) -> bool {
        if self.goal == 0 || self.kind != ActivityKind::Quantity {
            return false;
        }
        self.value_on(date)
            .is_some_and(|value| value.as_count() >= self.goal)
    }
}

/// Raw value submitted for today's log, before it is checked against the activity kind.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LogInput {
    Flag(bool),
    Number(i64),
    Fraction(f64),
    Text(String),
}

#[derive(Debug, Deserialize)]
pub struct ActivityForm {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    #[serde(rename = "countType", default)]
    pub policy: CompletionPolicy,
    #[serde(default, deserialize_with = "lenient_goal")]
    pub goal: u64,
}

#[derive(Debug, Deserialize)]
pub struct RecordRequest {
    pub value: LogInput,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct NotesRequest {
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StreakSummary {
    pub id: ActivityId,
    pub name: String,
    pub current_streak: u32,
    pub longest_streak: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TodayEntry {
    pub id: ActivityId,
    pub name: String,
    pub kind: ActivityKind,
    pub goal: u64,
    pub value: DayValue,
    pub notes: String,
    pub completed: bool,
    pub goal_met: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TodayResponse {
    pub date: String,
    pub entries: Vec<TodayEntry>,
}

#[derive(Debug, Serialize)]
pub struct HistoryEntry {
    pub date: String,
    pub status: String,
    pub notes: String,
}

#[derive(Debug, Serialize)]
pub struct ActivityHistory {
    pub id: ActivityId,
    pub name: String,
    pub entries: Vec<HistoryEntry>,
}

#[derive(Debug, Serialize)]
pub struct ChartBar {
    pub date: String,
    pub weekday: String,
    pub value: u64,
    pub height_percent: f64,
}

#[derive(Debug, Serialize)]
pub struct WeeklyPoint {
    pub week: String,
    pub start_date: String,
    pub end_date: String,
    pub streak_days: u8,
    pub logged_days: u8,
}

#[derive(Debug, Serialize)]
pub struct ActivityStats {
    pub id: ActivityId,
    pub name: String,
    pub last_7_days: Vec<ChartBar>,
    pub weekly_totals: Vec<WeeklyPoint>,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub activities: Vec<ActivityStats>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// Older data may carry `null` (an unparsable goal) or a negative number.
fn lenient_goal<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let goal = Option::<i64>::deserialize(deserializer)?;
    Ok(goal.map_or(0, |goal| goal.max(0).unsigned_abs()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activity_reads_persisted_shape() {
        let raw = r#"{
            "id": 1700000000000,
            "name": "Read",
            "type": "quantity",
            "countType": "count-if-not-done",
            "goal": null,
            "history": {"2024-01-02": {"value": 3, "notes": "ch. 4"}},
            "currentStreak": 0,
            "longestStreak": 0
        }"#;
        let activity: Activity = serde_json::from_str(raw).unwrap();
        assert_eq!(activity.id, ActivityId(1_700_000_000_000));
        assert_eq!(activity.kind, ActivityKind::Quantity);
        assert_eq!(activity.policy, CompletionPolicy::CountIfNotDone);
        assert_eq!(activity.goal, 0);
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        assert_eq!(activity.history[&date].value, DayValue::Count(3));
        assert_eq!(activity.history[&date].notes, "ch. 4");
    }

    #[test]
    fn activity_writes_persisted_field_names() {
        let activity = Activity::new(
            ActivityId(7),
            "Walk".into(),
            ActivityKind::Boolean,
            CompletionPolicy::CountIfDone,
            0,
        );
        let value = serde_json::to_value(&activity).unwrap();
        assert_eq!(value["type"], "boolean");
        assert_eq!(value["countType"], "count-if-done");
        assert_eq!(value["currentStreak"], 0);
        assert_eq!(value["longestStreak"], 0);
        assert!(value["history"].as_object().unwrap().is_empty());
    }

    #[test]
    fn values_are_read_by_kind_without_rewriting() {
        let raw = r#"{"id": 1, "name": "Run", "type": "boolean",
            "history": {"2024-01-01": {"value": 0}, "2024-01-02": {"value": 1}}}"#;
        let activity: Activity = serde_json::from_str(raw).unwrap();
        let jan1 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let jan2 = jan1.succ_opt().unwrap();
        assert_eq!(activity.value_on(jan1), Some(DayValue::Done(false)));
        assert_eq!(activity.value_on(jan2), Some(DayValue::Done(true)));
        assert_eq!(activity.value_on(jan2.succ_opt().unwrap()), None);
        assert_eq!(activity.history[&jan2].value, DayValue::Count(1));
    }

    #[test]
    fn log_input_accepts_fractions_for_later_rejection() {
        let input: LogInput = serde_json::from_str("2.5").unwrap();
        assert_eq!(input, LogInput::Fraction(2.5));
        let input: LogInput = serde_json::from_str("1e3").unwrap();
        assert_eq!(input, LogInput::Fraction(1000.0));
        let input: LogInput = serde_json::from_str("-1").unwrap();
        assert_eq!(input, LogInput::Number(-1));
    }

    #[test]
    fn goal_met_only_for_quantity_with_goal() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let mut activity = Activity::new(
            ActivityId(1),
            "Pushups".into(),
            ActivityKind::Quantity,
            CompletionPolicy::CountIfDone,
            5,
        );
        activity.record_mut(date).value = DayValue::Count(4);
        assert!(!activity.goal_met(date));
        activity.record_mut(date).value = DayValue::Count(5);
        assert!(activity.goal_met(date));

        activity.goal = 0;
        assert!(!activity.goal_met(date));
    }
}
