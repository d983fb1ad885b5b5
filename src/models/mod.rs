//! Data models for protracker.
//!
//! This module defines the document tree persisted by the store:
//! - `Document` - the complete state, one per user
//! - `Todo`, `Routine`, `Habit`, `SleepEntry`, `MoodEntry`, `Goal`,
//!   `Project`, `PlanItem`, `MediaEntry` - dated entry records
//! - `Planner`, `Settings` - nested groupings
//!
//! All entry collections are ordered; entries carry an opaque unique `id`
//! assigned at creation and never reused.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest accepted media rating.
pub const RATING_MIN: u8 = 1;
/// Highest accepted media rating.
pub const RATING_MAX: u8 = 5;
/// Lowest accepted 1-10 scale value (sleep quality, anxiety).
pub const SCALE_MIN: u8 = 1;
/// Highest accepted 1-10 scale value.
pub const SCALE_MAX: u8 = 10;

/// Clamp a media rating into the 1-5 range.
pub fn clamp_rating(value: u8) -> u8 {
    value.clamp(RATING_MIN, RATING_MAX)
}

/// Clamp a quality/anxiety value into the 1-10 range.
pub fn clamp_scale(value: u8) -> u8 {
    value.clamp(SCALE_MIN, SCALE_MAX)
}

/// To-do priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(format!("Unknown priority: {}", s)),
        }
    }
}

/// A to-do item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    /// Unique identifier (e.g., "todo-1756200000000-a1b2c3")
    pub id: String,

    /// What needs doing
    pub text: String,

    /// Priority badge
    #[serde(default)]
    pub priority: Priority,

    /// Completion flag
    #[serde(default)]
    pub done: bool,

    /// Day the item was captured
    pub date: NaiveDate,
}

impl Todo {
    /// Create a new open to-do dated `date`.
    pub fn new(id: String, text: String, priority: Priority, date: NaiveDate) -> Self {
        Self {
            id,
            text,
            priority,
            done: false,
            date,
        }
    }
}

/// Category of a recurring routine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutineKind {
    #[default]
    Chore,
    Exercise,
    Learning,
    Health,
    Other,
}

impl fmt::Display for RoutineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RoutineKind::Chore => "chore",
            RoutineKind::Exercise => "exercise",
            RoutineKind::Learning => "learning",
            RoutineKind::Health => "health",
            RoutineKind::Other => "other",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for RoutineKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "chore" => Ok(RoutineKind::Chore),
            "exercise" => Ok(RoutineKind::Exercise),
            "learning" => Ok(RoutineKind::Learning),
            "health" => Ok(RoutineKind::Health),
            "other" => Ok(RoutineKind::Other),
            _ => Err(format!("Unknown routine kind: {}", s)),
        }
    }
}

/// A recurring chore with a repeat interval in days.
///
/// A routine is "due" once `frequency_days` have elapsed since `last_done`;
/// see `stats::days_until_due` for the exact arithmetic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Routine {
    /// Unique identifier
    pub id: String,

    /// Category badge
    #[serde(default)]
    pub kind: RoutineKind,

    /// Routine name
    pub name: String,

    /// Repeat interval in days (at least 1)
    pub frequency_days: u32,

    /// Day the routine was last completed
    pub last_done: NaiveDate,
}

impl Routine {
    pub fn new(
        id: String,
        kind: RoutineKind,
        name: String,
        frequency_days: u32,
        last_done: NaiveDate,
    ) -> Self {
        Self {
            id,
            kind,
            name,
            // zero would make the routine due the moment it is completed
            frequency_days: frequency_days.max(1),
            last_done,
        }
    }
}

/// A daily habit with a completion log.
///
/// The log holds each calendar day the habit was completed, one entry per
/// day. Streaks are derived from it; see `stats::streak`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    /// Unique identifier
    pub id: String,

    /// Habit name
    pub name: String,

    /// Days the habit was completed
    #[serde(default)]
    pub log: Vec<NaiveDate>,
}

impl Habit {
    pub fn new(id: String, name: String) -> Self {
        Self {
            id,
            name,
            log: Vec::new(),
        }
    }

    /// Record a completion for `day`. Logging the same day twice is a no-op.
    pub fn log_day(&mut self, day: NaiveDate) -> bool {
        if self.log.contains(&day) {
            return false;
        }
        self.log.push(day);
        true
    }
}

/// One night of sleep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepEntry {
    /// Unique identifier
    pub id: String,

    /// Day the entry belongs to
    pub date: NaiveDate,

    /// Hours slept
    pub hours: f64,

    /// Subjective quality, 1-10
    pub quality: u8,
}

impl SleepEntry {
    pub fn new(id: String, date: NaiveDate, hours: f64, quality: u8) -> Self {
        Self {
            id,
            date,
            hours,
            quality: clamp_scale(quality),
        }
    }
}

/// Mood label for a wellbeing check-in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Great,
    #[default]
    Good,
    Okay,
    Low,
    Awful,
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Mood::Great => "great",
            Mood::Good => "good",
            Mood::Okay => "okay",
            Mood::Low => "low",
            Mood::Awful => "awful",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "great" => Ok(Mood::Great),
            "good" => Ok(Mood::Good),
            "okay" | "ok" => Ok(Mood::Okay),
            "low" => Ok(Mood::Low),
            "awful" => Ok(Mood::Awful),
            _ => Err(format!("Unknown mood: {}", s)),
        }
    }
}

/// A daily wellbeing check-in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodEntry {
    /// Unique identifier
    pub id: String,

    /// Day the check-in belongs to
    pub date: NaiveDate,

    /// Mood label
    #[serde(default)]
    pub mood: Mood,

    /// Anxiety level, 1-10
    pub anxiety: u8,
}

impl MoodEntry {
    pub fn new(id: String, date: NaiveDate, mood: Mood, anxiety: u8) -> Self {
        Self {
            id,
            date,
            mood,
            anxiety: clamp_scale(anxiety),
        }
    }
}

/// A longer-term goal with an optional deadline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    /// Unique identifier
    pub id: String,

    /// Goal text
    pub text: String,

    /// Target date, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,

    /// Completion flag
    #[serde(default)]
    pub done: bool,
}

impl Goal {
    pub fn new(id: String, text: String, deadline: Option<NaiveDate>) -> Self {
        Self {
            id,
            text,
            deadline,
            done: false,
        }
    }
}

/// A named project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Unique identifier
    pub id: String,

    /// Project name
    pub name: String,

    /// Completion flag
    #[serde(default)]
    pub done: bool,
}

impl Project {
    pub fn new(id: String, name: String) -> Self {
        Self {
            id,
            name,
            done: false,
        }
    }
}

/// One item on a planner list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanItem {
    /// Unique identifier
    pub id: String,

    /// Item text
    pub text: String,

    /// Completion flag
    #[serde(default)]
    pub done: bool,
}

impl PlanItem {
    pub fn new(id: String, text: String) -> Self {
        Self {
            id,
            text,
            done: false,
        }
    }
}

/// Which planner horizon is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlannerView {
    #[default]
    Monthly,
    Weekly,
    Yearly,
}

impl fmt::Display for PlannerView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PlannerView::Monthly => "monthly",
            PlannerView::Weekly => "weekly",
            PlannerView::Yearly => "yearly",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for PlannerView {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "monthly" => Ok(PlannerView::Monthly),
            "weekly" => Ok(PlannerView::Weekly),
            "yearly" => Ok(PlannerView::Yearly),
            _ => Err(format!("Unknown planner view: {}", s)),
        }
    }
}

/// Planner lists, one per horizon.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Planner {
    #[serde(default)]
    pub monthly: Vec<PlanItem>,
    #[serde(default)]
    pub weekly: Vec<PlanItem>,
    #[serde(default)]
    pub yearly: Vec<PlanItem>,
}

impl Planner {
    /// The list for a given view.
    pub fn list(&self, view: PlannerView) -> &Vec<PlanItem> {
        match view {
            PlannerView::Monthly => &self.monthly,
            PlannerView::Weekly => &self.weekly,
            PlannerView::Yearly => &self.yearly,
        }
    }

    /// Mutable access to the list for a given view.
    pub fn list_mut(&mut self, view: PlannerView) -> &mut Vec<PlanItem> {
        match view {
            PlannerView::Monthly => &mut self.monthly,
            PlannerView::Weekly => &mut self.weekly,
            PlannerView::Yearly => &mut self.yearly,
        }
    }
}

/// Kind of logged media.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    #[default]
    Book,
    Film,
    Series,
    Game,
    Podcast,
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MediaKind::Book => "book",
            MediaKind::Film => "film",
            MediaKind::Series => "series",
            MediaKind::Game => "game",
            MediaKind::Podcast => "podcast",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for MediaKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "book" => Ok(MediaKind::Book),
            "film" | "movie" => Ok(MediaKind::Film),
            "series" | "show" => Ok(MediaKind::Series),
            "game" => Ok(MediaKind::Game),
            "podcast" => Ok(MediaKind::Podcast),
            _ => Err(format!("Unknown media kind: {}", s)),
        }
    }
}

/// One watched/read/played media entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaEntry {
    /// Unique identifier
    pub id: String,

    /// Media category
    #[serde(default)]
    pub kind: MediaKind,

    /// Title
    pub title: String,

    /// Star rating, 1-5
    pub rating: u8,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl MediaEntry {
    pub fn new(id: String, kind: MediaKind, title: String, rating: u8) -> Self {
        Self {
            id,
            kind,
            title,
            rating: clamp_rating(rating),
            created_at: Utc::now(),
        }
    }
}

fn default_focus_minutes() -> u32 {
    25
}

fn default_break_minutes() -> u32 {
    5
}

/// Focus timer settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Focus phase length in minutes
    #[serde(default = "default_focus_minutes")]
    pub focus_minutes: u32,

    /// Break phase length in minutes
    #[serde(default = "default_break_minutes")]
    pub break_minutes: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            focus_minutes: default_focus_minutes(),
            break_minutes: default_break_minutes(),
        }
    }
}

/// The complete tracker state, persisted as one unit.
///
/// Every field defaults so that partially-shaped persisted documents load
/// with the missing fields at their empty/default values (the store's
/// shallow-merge rule depends on this).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub todos: Vec<Todo>,

    #[serde(default)]
    pub routines: Vec<Routine>,

    #[serde(default)]
    pub habits: Vec<Habit>,

    #[serde(default)]
    pub sleep: Vec<SleepEntry>,

    #[serde(default)]
    pub mood: Vec<MoodEntry>,

    #[serde(default)]
    pub goals: Vec<Goal>,

    #[serde(default)]
    pub projects: Vec<Project>,

    #[serde(default)]
    pub planner: Planner,

    /// Active planner horizon
    #[serde(default)]
    pub planner_view: PlannerView,

    #[serde(default)]
    pub media: Vec<MediaEntry>,

    /// Free-text notes, one field for the whole document
    #[serde(default)]
    pub notes: String,

    /// Signed month offset of the calendar view from the current month
    #[serde(default)]
    pub month_offset: i32,

    #[serde(default)]
    pub settings: Settings,
}
