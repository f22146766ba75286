use crate::daily_log::DailyLogStore;
use crate::models::{TrainingSessionCounts, WeekDay, WeekStrip, WeeklySummary};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use std::collections::HashSet;

/// Consecutive committed days ending at `date`.
///
/// `date` itself always counts as one, whether or not it was committed;
/// the walk back starts from the day before and stops at the first gap.
pub fn streak(store: &impl DailyLogStore, date: NaiveDate) -> u32 {
    let completed: HashSet<NaiveDate> = store.completed_dates().into_iter().collect();
    let mut count = 1u32;
    let mut check = date.pred_opt();
    while let Some(day) = check.filter(|day| completed.contains(day)) {
        count = count.saturating_add(1);
        check = day.pred_opt();
    }
    count
}

pub fn weekly_summary(store: &impl DailyLogStore, date: NaiveDate) -> WeeklySummary {
    let start = week_start(date);
    let completed: HashSet<NaiveDate> = store.completed_dates().into_iter().collect();

    let mut days_logged = 0u32;
    let mut steps_total = 0f64;
    let mut days_with_steps = 0u32;
    let mut training_sessions = TrainingSessionCounts::default();
    let mut total_meals_logged = 0u32;

    for date in week_dates(start) {
        if completed.contains(&date) {
            days_logged += 1;
        }

        let Some(record) = store.stored_day(date) else {
            continue;
        };
        if let Some(steps) = record.steps_value() {
            steps_total += steps;
            days_with_steps += 1;
        }
        training_sessions.record(record.training_type);
        total_meals_logged += record.meals_logged() as u32;
    }

    let steps_average = if days_with_steps > 0 {
        (steps_total / f64::from(days_with_steps)).round().max(0.0) as u64
    } else {
        0
    };

    WeeklySummary {
        week: week_label(start),
        week_start: start,
        week_end: start + Duration::days(6),
        days_logged,
        steps_average,
        training_sessions,
        total_meals_logged,
    }
}

/// The seven days of `date`'s week for the calendar strip.
pub fn week_strip(store: &impl DailyLogStore, date: NaiveDate, today: NaiveDate) -> WeekStrip {
    let start = week_start(date);
    let completed: HashSet<NaiveDate> = store.completed_dates().into_iter().collect();
    let days = week_dates(start)
        .map(|day| WeekDay {
            date: day,
            weekday: day.format("%a").to_string(),
            completed: completed.contains(&day),
            is_today: day == today,
        })
        .collect();

    WeekStrip {
        week: week_label(start),
        days,
    }
}

pub fn commit_message(completed_days: usize, streak: u32) -> String {
    if completed_days == 1 {
        "Nice work — first day completed!".to_string()
    } else {
        format!("Nice work — {streak}-day streak!")
    }
}

/// Sunday closes the ISO week; committing it shows the weekly summary.
pub fn closes_week(date: NaiveDate) -> bool {
    date.weekday() == Weekday::Sun
}

pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

fn week_dates(start: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    (0..7).map(move |offset| start + Duration::days(offset))
}

fn week_label(date: NaiveDate) -> String {
    let iso = date.iso_week();
    format!("{}-W{:02}", iso.year(), iso.week())
}
