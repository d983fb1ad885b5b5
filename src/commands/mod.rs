//! Command implementations for the protracker CLI.
//!
//! This module contains the business logic for each CLI command, organized
//! by entity: to-dos, routines, habits, sleep, mood, goals, projects,
//! planner, media, notes, calendar, timer, stats, and the data
//! import/export/reset group.
//!
//! Every mutating command loads the document through the store, applies the
//! change in memory, and saves the whole document back. Each command
//! returns a result struct implementing [`Output`] so `main` can print it
//! as JSON or human text.

use crate::calendar::MonthGrid;
use crate::models::{
    Document, Goal, Habit, MediaEntry, MediaKind, Mood, MoodEntry, PlanItem, PlannerView, Priority,
    Project, Routine, RoutineKind, SleepEntry, Todo,
};
use crate::stats::{self, Analytics};
use crate::store::{self, Store};
use crate::{Error, Result};
use chrono::NaiveDate;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Command results that can be serialized to JSON or formatted for humans.
pub trait Output {
    /// Serialize to JSON string.
    fn to_json(&self) -> String;

    /// Format for human-readable output.
    fn to_human(&self) -> String;
}

fn json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

fn require_text(value: &str, what: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidInput(format!("{} cannot be empty", what)));
    }
    Ok(trimmed.to_string())
}

fn position_of<T>(items: &[T], id: &str, id_of: impl Fn(&T) -> &str) -> Result<usize> {
    items
        .iter()
        .position(|item| id_of(item) == id)
        .ok_or_else(|| Error::NotFound(id.to_string()))
}

// ---------------------------------------------------------------------------
// Shared result shapes

/// A new entry was appended to a collection.
#[derive(Debug, Serialize)]
pub struct EntryAdded {
    pub entity: &'static str,
    pub id: String,
    pub summary: String,
}

impl Output for EntryAdded {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        format!("Added {} {}: {}", self.entity, self.id, self.summary)
    }
}

/// An entry was removed from a collection.
#[derive(Debug, Serialize)]
pub struct EntryDeleted {
    pub entity: &'static str,
    pub id: String,
}

impl Output for EntryDeleted {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        format!("Deleted {} {}", self.entity, self.id)
    }
}

/// An entry's completion flag was flipped.
#[derive(Debug, Serialize)]
pub struct EntryToggled {
    pub entity: &'static str,
    pub id: String,
    pub done: bool,
}

impl Output for EntryToggled {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        if self.done {
            format!("Marked {} {} done", self.entity, self.id)
        } else {
            format!("Reopened {} {}", self.entity, self.id)
        }
    }
}

// ---------------------------------------------------------------------------
// To-dos

/// Which to-dos a list should include.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoFilter {
    All,
    Open,
    Done,
}

#[derive(Debug, Serialize)]
pub struct TodoListResult {
    pub todos: Vec<Todo>,
}

impl Output for TodoListResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        if self.todos.is_empty() {
            return "No to-dos".to_string();
        }
        let mut lines: Vec<String> = self
            .todos
            .iter()
            .map(|t| {
                format!(
                    "[{}] ({}) {}  {}",
                    if t.done { "x" } else { " " },
                    t.priority,
                    t.text,
                    t.id
                )
            })
            .collect();
        let open = self.todos.iter().filter(|t| !t.done).count();
        lines.push(format!("{} to-dos, {} open", self.todos.len(), open));
        lines.join("\n")
    }
}

/// Add a to-do dated `today`. New items go to the front of the list.
pub fn todo_add(
    store: &Store,
    text: &str,
    priority: Priority,
    today: NaiveDate,
) -> Result<EntryAdded> {
    let text = require_text(text, "To-do text")?;
    let mut doc = store.load()?;
    let todo = Todo::new(store::generate_id("todo"), text, priority, today);
    let added = EntryAdded {
        entity: "to-do",
        id: todo.id.clone(),
        summary: todo.text.clone(),
    };
    doc.todos.insert(0, todo);
    store.save(&doc)?;
    info!("Added to-do {}", added.id);
    Ok(added)
}

pub fn todo_list(store: &Store, filter: TodoFilter) -> Result<TodoListResult> {
    let doc = store.load()?;
    let todos = doc
        .todos
        .into_iter()
        .filter(|t| match filter {
            TodoFilter::All => true,
            TodoFilter::Open => !t.done,
            TodoFilter::Done => t.done,
        })
        .collect();
    Ok(TodoListResult { todos })
}

pub fn todo_toggle(store: &Store, id: &str) -> Result<EntryToggled> {
    let mut doc = store.load()?;
    let idx = position_of(&doc.todos, id, |t| &t.id)?;
    doc.todos[idx].done = !doc.todos[idx].done;
    let done = doc.todos[idx].done;
    store.save(&doc)?;
    Ok(EntryToggled {
        entity: "to-do",
        id: id.to_string(),
        done,
    })
}

pub fn todo_delete(store: &Store, id: &str) -> Result<EntryDeleted> {
    let mut doc = store.load()?;
    let idx = position_of(&doc.todos, id, |t| &t.id)?;
    doc.todos.remove(idx);
    store.save(&doc)?;
    Ok(EntryDeleted {
        entity: "to-do",
        id: id.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Routines

#[derive(Debug, Serialize)]
pub struct RoutineRow {
    #[serde(flatten)]
    pub routine: Routine,
    pub days_left: i64,
    pub badge: String,
}

#[derive(Debug, Serialize)]
pub struct RoutineListResult {
    pub routines: Vec<RoutineRow>,
}

impl Output for RoutineListResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        if self.routines.is_empty() {
            return "No routines".to_string();
        }
        self.routines
            .iter()
            .map(|r| {
                format!(
                    "({}) {} - every {}d, {}  {}",
                    r.routine.kind, r.routine.name, r.routine.frequency_days, r.badge, r.routine.id
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Serialize)]
pub struct RoutineCompleted {
    pub id: String,
    pub name: String,
    pub next_due_in_days: i64,
}

impl Output for RoutineCompleted {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        format!(
            "Completed {}, due again in {} day{}",
            self.name,
            self.next_due_in_days,
            if self.next_due_in_days == 1 { "" } else { "s" }
        )
    }
}

/// Add a routine; `frequency_days` is floored to 1 and `last_done` starts
/// at `today` so the first due date is one full interval away.
pub fn routine_add(
    store: &Store,
    name: &str,
    kind: RoutineKind,
    frequency_days: u32,
    today: NaiveDate,
) -> Result<EntryAdded> {
    let name = require_text(name, "Routine name")?;
    let mut doc = store.load()?;
    let routine = Routine::new(
        store::generate_id("routine"),
        kind,
        name,
        frequency_days,
        today,
    );
    let added = EntryAdded {
        entity: "routine",
        id: routine.id.clone(),
        summary: routine.name.clone(),
    };
    doc.routines.push(routine);
    store.save(&doc)?;
    Ok(added)
}

pub fn routine_list(store: &Store, today: NaiveDate) -> Result<RoutineListResult> {
    let doc = store.load()?;
    let routines = doc
        .routines
        .into_iter()
        .map(|routine| {
            let days_left = stats::days_until_due(routine.last_done, routine.frequency_days, today);
            RoutineRow {
                routine,
                days_left,
                badge: stats::due_badge(days_left),
            }
        })
        .collect();
    Ok(RoutineListResult { routines })
}

/// Mark a routine completed today, restarting its interval.
pub fn routine_done(store: &Store, id: &str, today: NaiveDate) -> Result<RoutineCompleted> {
    let mut doc = store.load()?;
    let idx = position_of(&doc.routines, id, |r| &r.id)?;
    doc.routines[idx].last_done = today;
    let result = RoutineCompleted {
        id: id.to_string(),
        name: doc.routines[idx].name.clone(),
        next_due_in_days: i64::from(doc.routines[idx].frequency_days),
    };
    store.save(&doc)?;
    Ok(result)
}

pub fn routine_delete(store: &Store, id: &str) -> Result<EntryDeleted> {
    let mut doc = store.load()?;
    let idx = position_of(&doc.routines, id, |r| &r.id)?;
    doc.routines.remove(idx);
    store.save(&doc)?;
    Ok(EntryDeleted {
        entity: "routine",
        id: id.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Habits

#[derive(Debug, Serialize)]
pub struct HabitRow {
    #[serde(flatten)]
    pub habit: Habit,
    pub streak: u32,
}

#[derive(Debug, Serialize)]
pub struct HabitListResult {
    pub habits: Vec<HabitRow>,
}

impl Output for HabitListResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        if self.habits.is_empty() {
            return "No habits".to_string();
        }
        self.habits
            .iter()
            .map(|h| {
                format!(
                    "{} - streak {}, {} total  {}",
                    h.habit.name,
                    h.streak,
                    h.habit.log.len(),
                    h.habit.id
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Serialize)]
pub struct HabitLogged {
    pub id: String,
    pub name: String,
    pub streak: u32,
    pub already_logged: bool,
}

impl Output for HabitLogged {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        if self.already_logged {
            format!("{} already logged today (streak {})", self.name, self.streak)
        } else {
            format!("Logged {}, streak {}", self.name, self.streak)
        }
    }
}

pub fn habit_add(store: &Store, name: &str) -> Result<EntryAdded> {
    let name = require_text(name, "Habit name")?;
    let mut doc = store.load()?;
    let habit = Habit::new(store::generate_id("habit"), name);
    let added = EntryAdded {
        entity: "habit",
        id: habit.id.clone(),
        summary: habit.name.clone(),
    };
    doc.habits.push(habit);
    store.save(&doc)?;
    Ok(added)
}

pub fn habit_list(store: &Store, today: NaiveDate) -> Result<HabitListResult> {
    let doc = store.load()?;
    let habits = doc
        .habits
        .into_iter()
        .map(|habit| {
            let streak = stats::streak(&habit.log, today);
            HabitRow { habit, streak }
        })
        .collect();
    Ok(HabitListResult { habits })
}

/// Log today's completion. Logging the same day twice leaves the log as-is.
pub fn habit_log(store: &Store, id: &str, today: NaiveDate) -> Result<HabitLogged> {
    let mut doc = store.load()?;
    let idx = position_of(&doc.habits, id, |h| &h.id)?;
    let logged = doc.habits[idx].log_day(today);
    let result = HabitLogged {
        id: id.to_string(),
        name: doc.habits[idx].name.clone(),
        streak: stats::streak(&doc.habits[idx].log, today),
        already_logged: !logged,
    };
    if logged {
        store.save(&doc)?;
    }
    Ok(result)
}

pub fn habit_delete(store: &Store, id: &str) -> Result<EntryDeleted> {
    let mut doc = store.load()?;
    let idx = position_of(&doc.habits, id, |h| &h.id)?;
    doc.habits.remove(idx);
    store.save(&doc)?;
    Ok(EntryDeleted {
        entity: "habit",
        id: id.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Sleep

#[derive(Debug, Serialize)]
pub struct SleepListResult {
    pub entries: Vec<SleepEntry>,
}

impl Output for SleepListResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        if self.entries.is_empty() {
            return "No sleep entries".to_string();
        }
        self.entries
            .iter()
            .map(|e| {
                format!(
                    "{}  {:.1}h  quality {}/10  {}",
                    e.date, e.hours, e.quality, e.id
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub fn sleep_add(store: &Store, hours: f64, quality: u8, today: NaiveDate) -> Result<EntryAdded> {
    if !hours.is_finite() || hours <= 0.0 {
        return Err(Error::InvalidInput(
            "Sleep hours must be greater than zero".to_string(),
        ));
    }
    let mut doc = store.load()?;
    let entry = SleepEntry::new(store::generate_id("sleep"), today, hours, quality);
    let added = EntryAdded {
        entity: "sleep entry",
        id: entry.id.clone(),
        summary: format!("{:.1}h, quality {}/10", entry.hours, entry.quality),
    };
    doc.sleep.push(entry);
    store.save(&doc)?;
    Ok(added)
}

/// The last seven entries by date, newest first.
pub fn sleep_list(store: &Store) -> Result<SleepListResult> {
    let doc = store.load()?;
    Ok(SleepListResult {
        entries: stats::recent_sleep(&doc.sleep),
    })
}

pub fn sleep_delete(store: &Store, id: &str) -> Result<EntryDeleted> {
    let mut doc = store.load()?;
    let idx = position_of(&doc.sleep, id, |e| &e.id)?;
    doc.sleep.remove(idx);
    store.save(&doc)?;
    Ok(EntryDeleted {
        entity: "sleep entry",
        id: id.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Mood

#[derive(Debug, Serialize)]
pub struct MoodListResult {
    pub entries: Vec<MoodEntry>,
}

impl Output for MoodListResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        if self.entries.is_empty() {
            return "No mood entries".to_string();
        }
        self.entries
            .iter()
            .map(|e| {
                format!(
                    "{}  {}  anxiety {}/10  {}",
                    e.date, e.mood, e.anxiety, e.id
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub fn mood_add(store: &Store, mood: Mood, anxiety: u8, today: NaiveDate) -> Result<EntryAdded> {
    let mut doc = store.load()?;
    let entry = MoodEntry::new(store::generate_id("mood"), today, mood, anxiety);
    let added = EntryAdded {
        entity: "mood entry",
        id: entry.id.clone(),
        summary: format!("{}, anxiety {}/10", entry.mood, entry.anxiety),
    };
    doc.mood.push(entry);
    store.save(&doc)?;
    Ok(added)
}

/// The last seven check-ins by date, newest first.
pub fn mood_list(store: &Store) -> Result<MoodListResult> {
    let doc = store.load()?;
    Ok(MoodListResult {
        entries: stats::recent_mood(&doc.mood),
    })
}

pub fn mood_delete(store: &Store, id: &str) -> Result<EntryDeleted> {
    let mut doc = store.load()?;
    let idx = position_of(&doc.mood, id, |e| &e.id)?;
    doc.mood.remove(idx);
    store.save(&doc)?;
    Ok(EntryDeleted {
        entity: "mood entry",
        id: id.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Goals

#[derive(Debug, Serialize)]
pub struct GoalListResult {
    pub goals: Vec<Goal>,
}

impl Output for GoalListResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        if self.goals.is_empty() {
            return "No goals".to_string();
        }
        self.goals
            .iter()
            .map(|g| {
                let deadline = match g.deadline {
                    Some(d) => format!("by {}", d),
                    None => "no deadline".to_string(),
                };
                format!(
                    "[{}] {} ({})  {}",
                    if g.done { "x" } else { " " },
                    g.text,
                    deadline,
                    g.id
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub fn goal_add(store: &Store, text: &str, deadline: Option<NaiveDate>) -> Result<EntryAdded> {
    let text = require_text(text, "Goal text")?;
    let mut doc = store.load()?;
    let goal = Goal::new(store::generate_id("goal"), text, deadline);
    let added = EntryAdded {
        entity: "goal",
        id: goal.id.clone(),
        summary: goal.text.clone(),
    };
    doc.goals.push(goal);
    store.save(&doc)?;
    Ok(added)
}

/// Goals sorted by deadline, soonest first, no-deadline last.
pub fn goal_list(store: &Store) -> Result<GoalListResult> {
    let doc = store.load()?;
    Ok(GoalListResult {
        goals: stats::sorted_goals(&doc.goals),
    })
}

pub fn goal_toggle(store: &Store, id: &str) -> Result<EntryToggled> {
    let mut doc = store.load()?;
    let idx = position_of(&doc.goals, id, |g| &g.id)?;
    doc.goals[idx].done = !doc.goals[idx].done;
    let done = doc.goals[idx].done;
    store.save(&doc)?;
    Ok(EntryToggled {
        entity: "goal",
        id: id.to_string(),
        done,
    })
}

pub fn goal_delete(store: &Store, id: &str) -> Result<EntryDeleted> {
    let mut doc = store.load()?;
    let idx = position_of(&doc.goals, id, |g| &g.id)?;
    doc.goals.remove(idx);
    store.save(&doc)?;
    Ok(EntryDeleted {
        entity: "goal",
        id: id.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Projects

#[derive(Debug, Serialize)]
pub struct ProjectListResult {
    pub projects: Vec<Project>,
}

impl Output for ProjectListResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        if self.projects.is_empty() {
            return "No projects".to_string();
        }
        self.projects
            .iter()
            .map(|p| format!("[{}] {}  {}", if p.done { "x" } else { " " }, p.name, p.id))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub fn project_add(store: &Store, name: &str) -> Result<EntryAdded> {
    let name = require_text(name, "Project name")?;
    let mut doc = store.load()?;
    let project = Project::new(store::generate_id("project"), name);
    let added = EntryAdded {
        entity: "project",
        id: project.id.clone(),
        summary: project.name.clone(),
    };
    doc.projects.push(project);
    store.save(&doc)?;
    Ok(added)
}

pub fn project_list(store: &Store) -> Result<ProjectListResult> {
    let doc = store.load()?;
    Ok(ProjectListResult {
        projects: doc.projects,
    })
}

pub fn project_toggle(store: &Store, id: &str) -> Result<EntryToggled> {
    let mut doc = store.load()?;
    let idx = position_of(&doc.projects, id, |p| &p.id)?;
    doc.projects[idx].done = !doc.projects[idx].done;
    let done = doc.projects[idx].done;
    store.save(&doc)?;
    Ok(EntryToggled {
        entity: "project",
        id: id.to_string(),
        done,
    })
}

pub fn project_delete(store: &Store, id: &str) -> Result<EntryDeleted> {
    let mut doc = store.load()?;
    let idx = position_of(&doc.projects, id, |p| &p.id)?;
    doc.projects.remove(idx);
    store.save(&doc)?;
    Ok(EntryDeleted {
        entity: "project",
        id: id.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Planner

#[derive(Debug, Serialize)]
pub struct PlanListResult {
    pub view: PlannerView,
    pub items: Vec<PlanItem>,
}

impl Output for PlanListResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        if self.items.is_empty() {
            return format!("No {} plan items", self.view);
        }
        let mut lines: Vec<String> = vec![format!("{} plan:", self.view)];
        lines.extend(
            self.items
                .iter()
                .map(|i| format!("[{}] {}  {}", if i.done { "x" } else { " " }, i.text, i.id)),
        );
        lines.join("\n")
    }
}

#[derive(Debug, Serialize)]
pub struct PlanViewChanged {
    pub view: PlannerView,
}

impl Output for PlanViewChanged {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        format!("Planner view set to {}", self.view)
    }
}

fn plan_view_or_active(doc: &Document, view: Option<PlannerView>) -> PlannerView {
    view.unwrap_or(doc.planner_view)
}

pub fn plan_add(store: &Store, text: &str, view: Option<PlannerView>) -> Result<EntryAdded> {
    let text = require_text(text, "Plan item text")?;
    let mut doc = store.load()?;
    let view = plan_view_or_active(&doc, view);
    let item = PlanItem::new(store::generate_id("plan"), text);
    let added = EntryAdded {
        entity: "plan item",
        id: item.id.clone(),
        summary: format!("{} ({})", item.text, view),
    };
    doc.planner.list_mut(view).push(item);
    store.save(&doc)?;
    Ok(added)
}

pub fn plan_list(store: &Store, view: Option<PlannerView>) -> Result<PlanListResult> {
    let doc = store.load()?;
    let view = plan_view_or_active(&doc, view);
    Ok(PlanListResult {
        view,
        items: doc.planner.list(view).clone(),
    })
}

/// Switch the active planner horizon; the choice persists.
pub fn plan_view(store: &Store, view: PlannerView) -> Result<PlanViewChanged> {
    let mut doc = store.load()?;
    doc.planner_view = view;
    store.save(&doc)?;
    Ok(PlanViewChanged { view })
}

pub fn plan_toggle(store: &Store, id: &str, view: Option<PlannerView>) -> Result<EntryToggled> {
    let mut doc = store.load()?;
    let view = plan_view_or_active(&doc, view);
    let items = doc.planner.list_mut(view);
    let idx = position_of(items, id, |i| &i.id)?;
    items[idx].done = !items[idx].done;
    let done = items[idx].done;
    store.save(&doc)?;
    Ok(EntryToggled {
        entity: "plan item",
        id: id.to_string(),
        done,
    })
}

pub fn plan_delete(store: &Store, id: &str, view: Option<PlannerView>) -> Result<EntryDeleted> {
    let mut doc = store.load()?;
    let view = plan_view_or_active(&doc, view);
    let items = doc.planner.list_mut(view);
    let idx = position_of(items, id, |i| &i.id)?;
    items.remove(idx);
    store.save(&doc)?;
    Ok(EntryDeleted {
        entity: "plan item",
        id: id.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Media

#[derive(Debug, Serialize)]
pub struct MediaListResult {
    pub entries: Vec<MediaEntry>,
}

impl Output for MediaListResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        if self.entries.is_empty() {
            return "No media logged".to_string();
        }
        self.entries
            .iter()
            .map(|e| format!("{}/5  ({})  {}  {}", e.rating, e.kind, e.title, e.id))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub fn media_add(store: &Store, title: &str, kind: MediaKind, rating: u8) -> Result<EntryAdded> {
    let title = require_text(title, "Media title")?;
    let mut doc = store.load()?;
    let entry = MediaEntry::new(store::generate_id("media"), kind, title, rating);
    let added = EntryAdded {
        entity: "media entry",
        id: entry.id.clone(),
        summary: format!("{} ({}, {}/5)", entry.title, entry.kind, entry.rating),
    };
    doc.media.push(entry);
    store.save(&doc)?;
    Ok(added)
}

/// Media sorted by rating, best first, ties newest first.
pub fn media_list(store: &Store) -> Result<MediaListResult> {
    let doc = store.load()?;
    Ok(MediaListResult {
        entries: stats::sorted_media(&doc.media),
    })
}

pub fn media_delete(store: &Store, id: &str) -> Result<EntryDeleted> {
    let mut doc = store.load()?;
    let idx = position_of(&doc.media, id, |e| &e.id)?;
    doc.media.remove(idx);
    store.save(&doc)?;
    Ok(EntryDeleted {
        entity: "media entry",
        id: id.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Notes

#[derive(Debug, Serialize)]
pub struct NotesResult {
    pub notes: String,
}

impl Output for NotesResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        if self.notes.is_empty() {
            "(no notes)".to_string()
        } else {
            self.notes.clone()
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NotesSaved {
    pub chars: usize,
}

impl Output for NotesSaved {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        format!("Notes saved ({} characters)", self.chars)
    }
}

pub fn notes_show(store: &Store) -> Result<NotesResult> {
    let doc = store.load()?;
    Ok(NotesResult { notes: doc.notes })
}

/// Replace the notes field and save immediately.
pub fn notes_set(store: &Store, text: &str) -> Result<NotesSaved> {
    let mut doc = store.load()?;
    doc.notes = text.to_string();
    store.save(&doc)?;
    Ok(NotesSaved {
        chars: text.chars().count(),
    })
}

pub fn notes_clear(store: &Store) -> Result<NotesSaved> {
    notes_set(store, "")
}

// ---------------------------------------------------------------------------
// Calendar

impl Output for MonthGrid {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        self.render()
    }
}

/// The month grid at the persisted offset.
pub fn calendar_show(store: &Store, today: NaiveDate) -> Result<MonthGrid> {
    let doc = store.load()?;
    MonthGrid::build(today, doc.month_offset, &doc)
}

/// Shift the viewed month and persist the new offset.
pub fn calendar_shift(store: &Store, delta: i32, today: NaiveDate) -> Result<MonthGrid> {
    let mut doc = store.load()?;
    let offset = doc.month_offset.saturating_add(delta);
    let grid = MonthGrid::build(today, offset, &doc)?;
    doc.month_offset = offset;
    store.save(&doc)?;
    Ok(grid)
}

/// Jump back to the current month (offset zero).
pub fn calendar_home(store: &Store, today: NaiveDate) -> Result<MonthGrid> {
    let mut doc = store.load()?;
    doc.month_offset = 0;
    let grid = MonthGrid::build(today, 0, &doc)?;
    store.save(&doc)?;
    Ok(grid)
}

// ---------------------------------------------------------------------------
// Timer settings

#[derive(Debug, Serialize)]
pub struct TimerSettingsResult {
    pub focus_minutes: u32,
    pub break_minutes: u32,
}

impl Output for TimerSettingsResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        format!(
            "Timer: {} min focus / {} min break",
            self.focus_minutes, self.break_minutes
        )
    }
}

pub fn timer_status(store: &Store) -> Result<TimerSettingsResult> {
    let doc = store.load()?;
    Ok(TimerSettingsResult {
        focus_minutes: doc.settings.focus_minutes,
        break_minutes: doc.settings.break_minutes,
    })
}

/// Update the persisted phase lengths. Zero-minute phases are rejected.
pub fn timer_set(
    store: &Store,
    focus_minutes: Option<u32>,
    break_minutes: Option<u32>,
) -> Result<TimerSettingsResult> {
    let mut doc = store.load()?;
    if let Some(focus) = focus_minutes {
        if focus == 0 {
            return Err(Error::InvalidInput(
                "Focus minutes must be at least 1".to_string(),
            ));
        }
        doc.settings.focus_minutes = focus;
    }
    if let Some(brk) = break_minutes {
        if brk == 0 {
            return Err(Error::InvalidInput(
                "Break minutes must be at least 1".to_string(),
            ));
        }
        doc.settings.break_minutes = brk;
    }
    store.save(&doc)?;
    Ok(TimerSettingsResult {
        focus_minutes: doc.settings.focus_minutes,
        break_minutes: doc.settings.break_minutes,
    })
}

// ---------------------------------------------------------------------------
// Stats

impl Output for Analytics {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        let sleep = match self.sleep_avg_hours {
            Some(avg) => format!("{:.1}h avg", avg),
            None => "no data".to_string(),
        };
        [
            format!("To-dos:    {} done / {}", self.todos_done, self.todos_total),
            format!(
                "Routines:  {} due now / {}",
                self.routines_due, self.routines_total
            ),
            format!(
                "Habits:    {} tracked, best streak {}",
                self.habits_total, self.best_streak
            ),
            format!("Goals:     {} done / {}", self.goals_done, self.goals_total),
            format!(
                "Projects:  {} done / {}",
                self.projects_done, self.projects_total
            ),
            format!("Sleep:     {}", sleep),
            format!("Media:     {} logged", self.media_total),
            format!("Notes:     {} characters", self.notes_chars),
        ]
        .join("\n")
    }
}

pub fn stats_overview(store: &Store, today: NaiveDate) -> Result<Analytics> {
    let doc = store.load()?;
    Ok(stats::analytics(&doc, today))
}

// ---------------------------------------------------------------------------
// Data: export / import / reset

#[derive(Debug, Serialize)]
pub struct ExportResult {
    pub path: PathBuf,
    pub bytes: usize,
}

impl Output for ExportResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        format!("Exported {} bytes to {}", self.bytes, self.path.display())
    }
}

#[derive(Debug, Serialize)]
pub struct ImportResult {
    pub replaced: Vec<&'static str>,
}

impl Output for ImportResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        if self.replaced.is_empty() {
            "Import contained no recognized fields; nothing changed".to_string()
        } else {
            format!("Imported fields: {}", self.replaced.join(", "))
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ResetResult {
    pub path: PathBuf,
}

impl Output for ResetResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        format!("Removed {}", self.path.display())
    }
}

/// Write the exported document to a file.
///
/// With no destination the file lands in the current directory under the
/// dated default name; a destination that is an existing directory gets the
/// default name inside it; anything else is used as the file path.
pub fn data_export(
    store: &Store,
    destination: Option<&Path>,
    today: NaiveDate,
) -> Result<ExportResult> {
    let json = store.export_json()?;
    let path = match destination {
        None => PathBuf::from(store::default_export_filename(today)),
        Some(dest) if dest.is_dir() => dest.join(store::default_export_filename(today)),
        Some(dest) => dest.to_path_buf(),
    };
    std::fs::write(&path, &json)?;
    info!("Exported document to {}", path.display());
    Ok(ExportResult {
        path,
        bytes: json.len(),
    })
}

/// Merge a raw JSON snapshot into the current document.
pub fn data_import(store: &Store, raw: &str) -> Result<ImportResult> {
    let replaced = store.import_json(raw)?;
    info!("Imported fields: {:?}", replaced);
    Ok(ImportResult { replaced })
}

/// Delete the persisted document. Confirmation happens in `main`.
pub fn data_reset(store: &Store) -> Result<ResetResult> {
    let path = store.document_path();
    store.reset()?;
    Ok(ResetResult { path })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestEnv;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        day(2026, 8, 26)
    }

    #[test]
    fn test_todo_add_prepends() {
        let env = TestEnv::new();
        let store = env.open_store();
        todo_add(&store, "First", Priority::Medium, today()).unwrap();
        todo_add(&store, "Second", Priority::High, today()).unwrap();

        let doc = store.load().unwrap();
        assert_eq!(doc.todos.len(), 2);
        assert_eq!(doc.todos[0].text, "Second");
        assert_eq!(doc.todos[1].text, "First");
    }

    #[test]
    fn test_todo_add_rejects_blank() {
        let env = TestEnv::new();
        let store = env.open_store();
        let err = todo_add(&store, "   ", Priority::Low, today()).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(store.load().unwrap().todos.is_empty());
    }

    #[test]
    fn test_todo_toggle_and_filters() {
        let env = TestEnv::new();
        let store = env.open_store();
        let added = todo_add(&store, "Toggle me", Priority::Medium, today()).unwrap();

        let toggled = todo_toggle(&store, &added.id).unwrap();
        assert!(toggled.done);
        assert_eq!(todo_list(&store, TodoFilter::Open).unwrap().todos.len(), 0);
        assert_eq!(todo_list(&store, TodoFilter::Done).unwrap().todos.len(), 1);

        let toggled = todo_toggle(&store, &added.id).unwrap();
        assert!(!toggled.done);
        assert_eq!(todo_list(&store, TodoFilter::Open).unwrap().todos.len(), 1);
    }

    #[test]
    fn test_todo_unknown_id() {
        let env = TestEnv::new();
        let store = env.open_store();
        let err = todo_toggle(&store, "todo-missing").unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        let err = todo_delete(&store, "todo-missing").unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_todo_delete_preserves_order() {
        let env = TestEnv::new();
        let store = env.open_store();
        todo_add(&store, "A", Priority::Medium, today()).unwrap();
        let b = todo_add(&store, "B", Priority::Medium, today()).unwrap();
        todo_add(&store, "C", Priority::Medium, today()).unwrap();

        todo_delete(&store, &b.id).unwrap();
        let texts: Vec<String> = store
            .load()
            .unwrap()
            .todos
            .iter()
            .map(|t| t.text.clone())
            .collect();
        assert_eq!(texts, vec!["C", "A"]);
    }

    #[test]
    fn test_routine_badges() {
        let env = TestEnv::new();
        let store = env.open_store();
        routine_add(&store, "Fresh", RoutineKind::Chore, 3, today()).unwrap();
        let overdue = routine_add(&store, "Overdue", RoutineKind::Health, 1, today()).unwrap();

        // push last_done into the past
        let mut doc = store.load().unwrap();
        let idx = doc.routines.iter().position(|r| r.id == overdue.id).unwrap();
        doc.routines[idx].last_done = day(2026, 8, 20);
        store.save(&doc).unwrap();

        let list = routine_list(&store, today()).unwrap();
        let fresh = list.routines.iter().find(|r| r.routine.name == "Fresh").unwrap();
        assert_eq!(fresh.days_left, 3);
        assert_eq!(fresh.badge, "3 days left");
        let overdue = list
            .routines
            .iter()
            .find(|r| r.routine.name == "Overdue")
            .unwrap();
        assert!(overdue.days_left <= 0);
        assert_eq!(overdue.badge, "due now");
    }

    #[test]
    fn test_routine_done_restarts_interval() {
        let env = TestEnv::new();
        let store = env.open_store();
        let added = routine_add(&store, "Laundry", RoutineKind::Chore, 7, day(2026, 8, 1)).unwrap();

        let completed = routine_done(&store, &added.id, today()).unwrap();
        assert_eq!(completed.next_due_in_days, 7);
        assert_eq!(store.load().unwrap().routines[0].last_done, today());
    }

    #[test]
    fn test_habit_log_once_per_day() {
        let env = TestEnv::new();
        let store = env.open_store();
        let added = habit_add(&store, "Stretch").unwrap();

        let first = habit_log(&store, &added.id, today()).unwrap();
        assert!(!first.already_logged);
        assert_eq!(first.streak, 1);

        let second = habit_log(&store, &added.id, today()).unwrap();
        assert!(second.already_logged);
        assert_eq!(second.streak, 1);
        assert_eq!(store.load().unwrap().habits[0].log.len(), 1);
    }

    #[test]
    fn test_habit_list_reports_streak() {
        let env = TestEnv::new();
        let store = env.open_store();
        let added = habit_add(&store, "Stretch").unwrap();
        habit_log(&store, &added.id, day(2026, 8, 25)).unwrap();
        habit_log(&store, &added.id, today()).unwrap();

        let list = habit_list(&store, today()).unwrap();
        assert_eq!(list.habits[0].streak, 2);
    }

    #[test]
    fn test_sleep_add_validates_hours() {
        let env = TestEnv::new();
        let store = env.open_store();
        assert!(matches!(
            sleep_add(&store, 0.0, 5, today()).unwrap_err(),
            Error::InvalidInput(_)
        ));
        assert!(matches!(
            sleep_add(&store, -2.0, 5, today()).unwrap_err(),
            Error::InvalidInput(_)
        ));
        assert!(matches!(
            sleep_add(&store, f64::NAN, 5, today()).unwrap_err(),
            Error::InvalidInput(_)
        ));
        sleep_add(&store, 7.5, 12, today()).unwrap();
        assert_eq!(store.load().unwrap().sleep[0].quality, 10);
    }

    #[test]
    fn test_sleep_list_recent_window() {
        let env = TestEnv::new();
        let store = env.open_store();
        for i in 1..=9 {
            sleep_add(&store, 7.0, 6, day(2026, 8, i)).unwrap();
        }
        let list = sleep_list(&store).unwrap();
        assert_eq!(list.entries.len(), 7);
        assert_eq!(list.entries[0].date, day(2026, 8, 9));
    }

    #[test]
    fn test_mood_add_clamps_anxiety() {
        let env = TestEnv::new();
        let store = env.open_store();
        mood_add(&store, Mood::Low, 0, today()).unwrap();
        assert_eq!(store.load().unwrap().mood[0].anxiety, 1);
    }

    #[test]
    fn test_goal_list_sorted_by_deadline() {
        let env = TestEnv::new();
        let store = env.open_store();
        goal_add(&store, "No deadline", None).unwrap();
        goal_add(&store, "Later", Some(day(2026, 12, 1))).unwrap();
        goal_add(&store, "Soon", Some(day(2026, 9, 1))).unwrap();

        let list = goal_list(&store).unwrap();
        let texts: Vec<&str> = list.goals.iter().map(|g| g.text.as_str()).collect();
        assert_eq!(texts, vec!["Soon", "Later", "No deadline"]);
    }

    #[test]
    fn test_plan_uses_active_view() {
        let env = TestEnv::new();
        let store = env.open_store();
        plan_add(&store, "Monthly item", None).unwrap();
        plan_view(&store, PlannerView::Weekly).unwrap();
        let weekly = plan_add(&store, "Weekly item", None).unwrap();

        let doc = store.load().unwrap();
        assert_eq!(doc.planner.monthly.len(), 1);
        assert_eq!(doc.planner.weekly.len(), 1);
        assert_eq!(doc.planner_view, PlannerView::Weekly);

        // active view finds the weekly item; the monthly one is invisible
        plan_toggle(&store, &weekly.id, None).unwrap();
        assert!(store.load().unwrap().planner.weekly[0].done);

        let err = plan_delete(&store, "plan-missing", None).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_plan_explicit_view_overrides_active() {
        let env = TestEnv::new();
        let store = env.open_store();
        let item = plan_add(&store, "Yearly item", Some(PlannerView::Yearly)).unwrap();
        assert_eq!(store.load().unwrap().planner.yearly.len(), 1);

        // active view is still monthly, so the item is only reachable by name
        let err = plan_toggle(&store, &item.id, None).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        plan_toggle(&store, &item.id, Some(PlannerView::Yearly)).unwrap();
    }

    #[test]
    fn test_media_add_clamps_and_sorts() {
        let env = TestEnv::new();
        let store = env.open_store();
        media_add(&store, "Weak", MediaKind::Game, 0).unwrap();
        media_add(&store, "Strong", MediaKind::Book, 9).unwrap();

        let list = media_list(&store).unwrap();
        assert_eq!(list.entries[0].title, "Strong");
        assert_eq!(list.entries[0].rating, 5);
        assert_eq!(list.entries[1].rating, 1);
    }

    #[test]
    fn test_media_add_rejects_blank_title() {
        let env = TestEnv::new();
        let store = env.open_store();
        let err = media_add(&store, "", MediaKind::Book, 3).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_notes_set_show_clear() {
        let env = TestEnv::new();
        let store = env.open_store();
        let saved = notes_set(&store, "remember the milk").unwrap();
        assert_eq!(saved.chars, 17);
        assert_eq!(notes_show(&store).unwrap().notes, "remember the milk");

        notes_clear(&store).unwrap();
        assert_eq!(notes_show(&store).unwrap().notes, "");
    }

    #[test]
    fn test_calendar_shift_persists_offset() {
        let env = TestEnv::new();
        let store = env.open_store();
        let grid = calendar_shift(&store, 1, today()).unwrap();
        assert_eq!((grid.year, grid.month), (2026, 9));
        assert_eq!(store.load().unwrap().month_offset, 1);

        let grid = calendar_shift(&store, -3, today()).unwrap();
        assert_eq!((grid.year, grid.month), (2026, 6));
        assert_eq!(store.load().unwrap().month_offset, -2);

        let grid = calendar_home(&store, today()).unwrap();
        assert_eq!((grid.year, grid.month), (2026, 8));
        assert_eq!(store.load().unwrap().month_offset, 0);
    }

    #[test]
    fn test_calendar_show_uses_persisted_offset() {
        let env = TestEnv::new();
        let store = env.open_store();
        calendar_shift(&store, 2, today()).unwrap();
        let grid = calendar_show(&store, today()).unwrap();
        assert_eq!((grid.year, grid.month), (2026, 10));
    }

    #[test]
    fn test_timer_set_and_status() {
        let env = TestEnv::new();
        let store = env.open_store();
        let status = timer_status(&store).unwrap();
        assert_eq!(status.focus_minutes, 25);
        assert_eq!(status.break_minutes, 5);

        timer_set(&store, Some(50), None).unwrap();
        let status = timer_status(&store).unwrap();
        assert_eq!(status.focus_minutes, 50);
        assert_eq!(status.break_minutes, 5);

        assert!(matches!(
            timer_set(&store, Some(0), None).unwrap_err(),
            Error::InvalidInput(_)
        ));
    }

    #[test]
    fn test_stats_overview() {
        let env = TestEnv::new();
        let store = env.open_store();
        todo_add(&store, "Open", Priority::Medium, today()).unwrap();
        let habit = habit_add(&store, "Stretch").unwrap();
        habit_log(&store, &habit.id, today()).unwrap();

        let analytics = stats_overview(&store, today()).unwrap();
        assert_eq!(analytics.todos_total, 1);
        assert_eq!(analytics.best_streak, 1);
    }

    #[test]
    fn test_data_export_import_reset_cycle() {
        let env = TestEnv::new();
        let store = env.open_store();
        todo_add(&store, "Survive the trip", Priority::High, today()).unwrap();

        let dest = env.data_path().join("backup.json");
        let exported = data_export(&store, Some(dest.as_path()), today()).unwrap();
        assert_eq!(exported.path, dest);
        assert!(exported.bytes > 0);

        data_reset(&store).unwrap();
        assert!(store.load().unwrap().todos.is_empty());

        let raw = std::fs::read_to_string(&dest).unwrap();
        let imported = data_import(&store, &raw).unwrap();
        assert!(imported.replaced.contains(&"todos"));
        assert_eq!(store.load().unwrap().todos[0].text, "Survive the trip");
    }

    #[test]
    fn test_data_export_into_directory_uses_default_name() {
        let env = TestEnv::new();
        let store = env.open_store();
        let dir = env.data_path();
        let exported = data_export(&store, Some(dir.as_path()), today()).unwrap();
        assert_eq!(exported.path, dir.join("protracker-2026-08-26.json"));
    }

    #[test]
    fn test_output_human_rendering() {
        let list = TodoListResult {
            todos: vec![Todo::new(
                "todo-1-abc".to_string(),
                "Water the plants".to_string(),
                Priority::High,
                today(),
            )],
        };
        let text = list.to_human();
        assert!(text.contains("[ ] (high) Water the plants"));
        assert!(text.contains("1 to-dos, 1 open"));

        let empty = TodoListResult { todos: vec![] };
        assert_eq!(empty.to_human(), "No to-dos");
    }

    #[test]
    fn test_output_json_is_parseable() {
        let added = EntryAdded {
            entity: "to-do",
            id: "todo-1-abc".to_string(),
            summary: "Water the plants".to_string(),
        };
        let value: serde_json::Value = serde_json::from_str(&added.to_json()).unwrap();
        assert_eq!(value["entity"], "to-do");
        assert_eq!(value["id"], "todo-1-abc");
    }
}
