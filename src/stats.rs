//! Derived computations over the document.
//!
//! Everything here is a pure function of the document plus an explicit
//! `today`, so behavior around midnight boundaries is testable without
//! touching the clock.

use crate::models::{Document, Goal, MediaEntry, MoodEntry, SleepEntry};
use chrono::{Days, NaiveDate};
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::HashSet;

/// How many sleep/mood entries the recent views show.
pub const RECENT_WINDOW: usize = 7;

/// Whole days until a recurring item is due again.
///
/// The due date is `last_done` plus the frequency; the result is the signed
/// day count from `today` to that date. Zero or negative means due now.
pub fn days_until_due(last_done: NaiveDate, frequency_days: u32, today: NaiveDate) -> i64 {
    let due = last_done
        .checked_add_days(Days::new(u64::from(frequency_days)))
        .unwrap_or(NaiveDate::MAX);
    due.signed_duration_since(today).num_days()
}

/// Human badge for a days-until-due value.
pub fn due_badge(days_left: i64) -> String {
    match days_left {
        d if d <= 0 => "due now".to_string(),
        1 => "due tomorrow".to_string(),
        d => format!("{} days left", d),
    }
}

/// Length of the completion streak ending today.
///
/// Walks backward from `today` while each day appears in the log and stops
/// at the first gap. A log without today is a streak of zero, even if
/// yesterday is present.
pub fn streak(log: &[NaiveDate], today: NaiveDate) -> u32 {
    let days: HashSet<NaiveDate> = log.iter().copied().collect();
    let mut count = 0;
    let mut cursor = today;
    while days.contains(&cursor) {
        count += 1;
        match cursor.pred_opt() {
            Some(prev) => cursor = prev,
            None => break,
        }
    }
    count
}

/// Round to one decimal for display.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// The last `RECENT_WINDOW` sleep entries, newest first.
pub fn recent_sleep(entries: &[SleepEntry]) -> Vec<SleepEntry> {
    let mut sorted: Vec<SleepEntry> = entries.to_vec();
    sorted.sort_by_key(|e| Reverse(e.date));
    sorted.truncate(RECENT_WINDOW);
    sorted
}

/// The last `RECENT_WINDOW` mood entries, newest first.
pub fn recent_mood(entries: &[MoodEntry]) -> Vec<MoodEntry> {
    let mut sorted: Vec<MoodEntry> = entries.to_vec();
    sorted.sort_by_key(|e| Reverse(e.date));
    sorted.truncate(RECENT_WINDOW);
    sorted
}

/// Goals ordered by deadline, soonest first, no-deadline last.
pub fn sorted_goals(goals: &[Goal]) -> Vec<Goal> {
    let mut sorted: Vec<Goal> = goals.to_vec();
    sorted.sort_by_key(|g| (g.deadline.is_none(), g.deadline));
    sorted
}

/// Media entries ordered by rating, best first, ties newest first.
pub fn sorted_media(entries: &[MediaEntry]) -> Vec<MediaEntry> {
    let mut sorted: Vec<MediaEntry> = entries.to_vec();
    sorted.sort_by_key(|e| (Reverse(e.rating), Reverse(e.created_at)));
    sorted
}

/// Cross-collection analytics snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analytics {
    pub todos_total: usize,
    pub todos_done: usize,
    pub routines_total: usize,
    pub routines_due: usize,
    pub habits_total: usize,
    pub best_streak: u32,
    pub goals_total: usize,
    pub goals_done: usize,
    pub projects_total: usize,
    pub projects_done: usize,
    /// Average hours across every sleep entry, one decimal
    pub sleep_avg_hours: Option<f64>,
    pub media_total: usize,
    pub notes_chars: usize,
}

/// Compute the analytics snapshot for `today`.
pub fn analytics(doc: &Document, today: NaiveDate) -> Analytics {
    let routines_due = doc
        .routines
        .iter()
        .filter(|r| days_until_due(r.last_done, r.frequency_days, today) <= 0)
        .count();

    let best_streak = doc
        .habits
        .iter()
        .map(|h| streak(&h.log, today))
        .max()
        .unwrap_or(0);

    let sleep_avg_hours = if doc.sleep.is_empty() {
        None
    } else {
        let sum: f64 = doc.sleep.iter().map(|e| e.hours).sum();
        Some(round1(sum / doc.sleep.len() as f64))
    };

    Analytics {
        todos_total: doc.todos.len(),
        todos_done: doc.todos.iter().filter(|t| t.done).count(),
        routines_total: doc.routines.len(),
        routines_due,
        habits_total: doc.habits.len(),
        best_streak,
        goals_total: doc.goals.len(),
        goals_done: doc.goals.iter().filter(|g| g.done).count(),
        projects_total: doc.projects.len(),
        projects_done: doc.projects.iter().filter(|p| p.done).count(),
        sleep_avg_hours,
        media_total: doc.media.len(),
        notes_chars: doc.notes.chars().count(),
    }
}
