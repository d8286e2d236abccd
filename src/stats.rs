use crate::models::{
    Activity, ActivityHistory, ActivityKind, ActivityStats, ChartBar, DayValue, HistoryEntry,
    StatsResponse, StreakSummary, TodayEntry, WeeklyPoint,
};
use crate::streak::is_streak_day;
use chrono::{Datelike, Duration, NaiveDate};

const CHART_DAYS: i64 = 7;
const WEEK_COUNT: usize = 8;

pub fn today_entries(today: NaiveDate, activities: &[Activity]) -> Vec<TodayEntry> {
    activities
        .iter()
        .map(|activity| {
            let record = activity.history.get(&today).cloned();
            let value = activity
                .value_on(today)
                .unwrap_or_else(|| activity.kind.default_value());
            TodayEntry {
                id: activity.id,
                name: activity.name.clone(),
                kind: activity.kind,
                goal: activity.goal,
                value,
                notes: record.map(|record| record.notes).unwrap_or_default(),
                completed: value.as_count() > 0,
                goal_met: activity.goal_met(today),
            }
        })
        .collect()
}

pub fn streak_summaries(activities: &[Activity]) -> Vec<StreakSummary> {
    activities
        .iter()
        .map(|activity| StreakSummary {
            id: activity.id,
            name: activity.name.clone(),
            current_streak: activity.current_streak,
            longest_streak: activity.longest_streak,
        })
        .collect()
}

/// Logged days per activity, newest first. Activities with no records are left out.
pub fn history(activities: &[Activity]) -> Vec<ActivityHistory> {
    activities
        .iter()
        .filter(|activity| !activity.history.is_empty())
        .map(|activity| ActivityHistory {
            id: activity.id,
            name: activity.name.clone(),
            entries: activity
                .history
                .iter()
                .rev()
                .map(|(date, record)| HistoryEntry {
                    date: date.to_string(),
                    status: status_text(activity.kind, record.value),
                    notes: record.notes.clone(),
                })
                .collect(),
        })
        .collect()
}

pub fn build_stats_at(today: NaiveDate, activities: &[Activity]) -> StatsResponse {
    StatsResponse {
        activities: activities
            .iter()
            .map(|activity| ActivityStats {
                id: activity.id,
                name: activity.name.clone(),
                last_7_days: chart_bars(today, activity),
                weekly_totals: weekly_totals(today, activity),
            })
            .collect(),
    }
}

fn chart_bars(today: NaiveDate, activity: &Activity) -> Vec<ChartBar> {
    let window: Vec<(NaiveDate, u64)> = (0..CHART_DAYS)
        .rev()
        .map(|offset| {
            let date = today - Duration::days(offset);
            (date, chart_value(activity, date))
        })
        .collect();

    let scale = if activity.goal > 0 {
        activity.goal
    } else if activity.kind == ActivityKind::Boolean {
        1
    } else {
        window.iter().map(|(_, value)| *value).max().unwrap_or(0).max(10)
    };

    window
        .into_iter()
        .map(|(date, value)| ChartBar {
            date: date.to_string(),
            weekday: date.format("%a").to_string(),
            value,
            height_percent: (value as f64 / scale as f64 * 100.0).min(100.0),
        })
        .collect()
}

fn chart_value(activity: &Activity, date: NaiveDate) -> u64 {
    activity.value_on(date).map_or(0, DayValue::as_count)
}

fn weekly_totals(today: NaiveDate, activity: &Activity) -> Vec<WeeklyPoint> {
    let current_week_start = week_start(today);
    let mut weekly = Vec::with_capacity(WEEK_COUNT);

    for offset in (0..WEEK_COUNT).rev() {
        let start = current_week_start - Duration::weeks(offset as i64);
        let end = start + Duration::days(6);

        let mut streak_days = 0u8;
        let mut logged_days = 0u8;
        for date in start.iter_days().take(7) {
            if activity.history.contains_key(&date) {
                logged_days += 1;
            }
            if is_streak_day(activity, date) {
                streak_days += 1;
            }
        }

        weekly.push(WeeklyPoint {
            week: week_label(start),
            start_date: start.to_string(),
            end_date: end.to_string(),
            streak_days,
            logged_days,
        });
    }

    weekly
}

fn status_text(kind: ActivityKind, value: DayValue) -> String {
    match value.resolve(kind) {
        DayValue::Done(true) => "Done".to_string(),
        DayValue::Done(false) => "Not Done".to_string(),
        DayValue::Count(count) => count.to_string(),
    }
}

fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

fn week_label(date: NaiveDate) -> String {
    let iso = date.iso_week();
    format!("{}-W{:02}", iso.year(), iso.week())
}
