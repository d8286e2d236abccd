//! Current and longest streak computation over an activity's history.
//!
//! The two counts deliberately walk the history differently. The longest
//! streak scans the records that exist in date order, so a date with no
//! record is skipped rather than breaking the run. The current streak steps
//! back one calendar day at a time from today, so any missing day ends it.

use crate::clock::Clock;
use crate::models::{Activity, ActivityKind, CompletionPolicy, DayValue};
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Streaks {
    pub current: u32,
    pub longest: u32,
}

/// Whether the record logged on `date` counts toward a streak. Absent days never count.
pub fn is_streak_day(activity: &Activity, date: NaiveDate) -> bool {
    activity
        .history
        .get(&date)
        .is_some_and(|record| value_counts(activity.kind, activity.policy, record.value))
}

fn value_counts(kind: ActivityKind, policy: CompletionPolicy, value: DayValue) -> bool {
    let done = match value.resolve(kind) {
        DayValue::Done(done) => done,
        DayValue::Count(count) => count > 0,
    };
    match policy {
        CompletionPolicy::CountIfDone => done,
        CompletionPolicy::CountIfNotDone => !done,
    }
}

pub fn longest_streak(activity: &Activity) -> u32 {
    let mut longest = 0;
    let mut running = 0u32;
    for record in activity.history.values() {
        if value_counts(activity.kind, activity.policy, record.value) {
            running = running.saturating_add(1);
            longest = longest.max(running);
        } else {
            running = 0;
        }
    }
    longest
}

pub fn current_streak(activity: &Activity, clock: &dyn Clock) -> u32 {
    let today = clock.today();
    if !is_streak_day(activity, today) {
        return 0;
    }

    let mut count = 1u32;
    let mut cursor = today;
    while let Some(previous) = clock.yesterday_of(cursor) {
        if !is_streak_day(activity, previous) {
            break;
        }
        count = count.saturating_add(1);
        cursor = previous;
    }
    count
}

pub fn compute(activity: &Activity, clock: &dyn Clock) -> Streaks {
    Streaks {
        current: current_streak(activity, clock),
        longest: longest_streak(activity),
    }
}

/// Writes freshly computed streaks into the activity's cached fields.
pub fn refresh(activity: &mut Activity, clock: &dyn Clock) {
    let streaks = compute(activity, clock);
    activity.current_streak = streaks.current;
    activity.longest_streak = streaks.longest;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::models::{ActivityId, DayRecord};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn activity(kind: ActivityKind, policy: CompletionPolicy) -> Activity {
        Activity::new(ActivityId(1), "habit".into(), kind, policy, 0)
    }

    fn log(activity: &mut Activity, date: NaiveDate, value: DayValue) {
        activity.history.insert(
            date,
            DayRecord {
                value,
                notes: String::new(),
            },
        );
    }

    #[test]
    fn empty_history_has_no_streaks() {
        let clock = FixedClock(day(2024, 1, 3));
        for policy in [CompletionPolicy::CountIfDone, CompletionPolicy::CountIfNotDone] {
            for kind in [ActivityKind::Boolean, ActivityKind::Quantity] {
                assert_eq!(compute(&activity(kind, policy), &clock), Streaks::default());
            }
        }
    }

    #[test]
    fn unbroken_run_through_today_counts_every_day() {
        let clock = FixedClock(day(2024, 3, 2));
        let mut run = activity(ActivityKind::Boolean, CompletionPolicy::CountIfDone);
        // spans the leap day
        for date in day(2024, 2, 25).iter_days().take(7) {
            log(&mut run, date, DayValue::Done(true));
        }
        assert_eq!(current_streak(&run, &clock), 7);
        assert_eq!(longest_streak(&run), 7);
    }

    #[test]
    fn map_gap_does_not_break_longest_but_breaks_current() {
        let clock = FixedClock(day(2024, 1, 3));
        let mut habit = activity(ActivityKind::Boolean, CompletionPolicy::CountIfDone);
        log(&mut habit, day(2024, 1, 1), DayValue::Done(true));
        log(&mut habit, day(2024, 1, 3), DayValue::Done(true));

        assert_eq!(
            compute(&habit, &clock),
            Streaks {
                current: 1,
                longest: 2
            }
        );
    }

    #[test]
    fn not_done_policy_inverts_boolean_outcome() {
        let clock = FixedClock(day(2024, 5, 10));
        let mut abstain = activity(ActivityKind::Boolean, CompletionPolicy::CountIfNotDone);
        for date in day(2024, 5, 7).iter_days().take(4) {
            log(&mut abstain, date, DayValue::Done(false));
        }
        assert_eq!(current_streak(&abstain, &clock), 4);

        abstain.policy = CompletionPolicy::CountIfDone;
        assert_eq!(current_streak(&abstain, &clock), 0);
        assert_eq!(longest_streak(&abstain), 0);
    }

    #[test]
    fn quantity_counts_any_positive_value_regardless_of_goal() {
        let date = day(2024, 6, 1);
        let clock = FixedClock(date);
        let mut reps = activity(ActivityKind::Quantity, CompletionPolicy::CountIfDone);
        reps.goal = 5;
        log(&mut reps, date, DayValue::Count(1));
        assert!(is_streak_day(&reps, date));
        assert_eq!(current_streak(&reps, &clock), 1);

        reps.policy = CompletionPolicy::CountIfNotDone;
        assert!(!is_streak_day(&reps, date));
        log(&mut reps, date, DayValue::Count(0));
        assert!(is_streak_day(&reps, date));
    }

    #[test]
    fn missing_today_means_no_current_streak() {
        let clock = FixedClock(day(2024, 1, 10));
        let mut habit = activity(ActivityKind::Boolean, CompletionPolicy::CountIfNotDone);
        log(&mut habit, day(2024, 1, 9), DayValue::Done(false));
        assert!(!is_streak_day(&habit, day(2024, 1, 10)));
        assert_eq!(current_streak(&habit, &clock), 0);
        assert_eq!(longest_streak(&habit), 1);
    }

    #[test]
    fn failing_day_resets_longest_run() {
        let clock = FixedClock(day(2024, 1, 6));
        let mut habit = activity(ActivityKind::Quantity, CompletionPolicy::CountIfDone);
        let values = [3, 1, 0, 2, 2, 2];
        for (date, value) in day(2024, 1, 1).iter_days().zip(values) {
            log(&mut habit, date, DayValue::Count(value));
        }
        assert_eq!(longest_streak(&habit), 3);
        assert_eq!(current_streak(&habit, &clock), 3);
    }

    #[test]
    fn mistyped_values_are_resolved_by_kind() {
        let date = day(2024, 2, 2);
        let mut habit = activity(ActivityKind::Boolean, CompletionPolicy::CountIfNotDone);
        log(&mut habit, date, DayValue::Count(0));
        assert!(is_streak_day(&habit, date));
    }

    #[test]
    fn refresh_updates_cached_fields() {
        let clock = FixedClock(day(2024, 1, 2));
        let mut habit = activity(ActivityKind::Boolean, CompletionPolicy::CountIfDone);
        log(&mut habit, day(2024, 1, 1), DayValue::Done(true));
        log(&mut habit, day(2024, 1, 2), DayValue::Done(true));
        refresh(&mut habit, &clock);
        assert_eq!((habit.current_streak, habit.longest_streak), (2, 2));
    }
}
