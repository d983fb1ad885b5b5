//! CLI argument definitions for protracker.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Protracker - a personal productivity tracker.
///
/// Run without a subcommand for the stats overview.
#[derive(Parser, Debug)]
#[command(name = "pt")]
#[command(author, version, about = "Track to-dos, routines, habits, goals, and daily wellbeing", long_about = None)]
pub struct Cli {
    /// Output JSON instead of human-readable text
    #[arg(long = "json", global = true)]
    pub json: bool,

    /// Use <path> as the data directory instead of the platform default.
    /// Can also be set via the PT_DATA_DIR environment variable.
    #[arg(short = 'C', long = "data-dir", global = true, env = "PT_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// To-do list commands
    Todo {
        #[command(subcommand)]
        command: TodoCommands,
    },

    /// Recurring routine commands
    Routine {
        #[command(subcommand)]
        command: RoutineCommands,
    },

    /// Daily habit commands
    Habit {
        #[command(subcommand)]
        command: HabitCommands,
    },

    /// Sleep log commands
    Sleep {
        #[command(subcommand)]
        command: SleepCommands,
    },

    /// Mood check-in commands
    Mood {
        #[command(subcommand)]
        command: MoodCommands,
    },

    /// Goal commands
    Goal {
        #[command(subcommand)]
        command: GoalCommands,
    },

    /// Project commands
    Project {
        #[command(subcommand)]
        command: ProjectCommands,
    },

    /// Planner commands (monthly/weekly/yearly lists)
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },

    /// Media log commands (books, films, series, games, podcasts)
    Media {
        #[command(subcommand)]
        command: MediaCommands,
    },

    /// Free-text notes commands
    Notes {
        #[command(subcommand)]
        command: NotesCommands,
    },

    /// Month calendar commands
    Calendar {
        #[command(subcommand)]
        command: CalendarCommands,
    },

    /// Focus/break timer commands
    Timer {
        #[command(subcommand)]
        command: TimerCommands,
    },

    /// Cross-collection stats overview
    Stats,

    /// Export, import, and reset the whole document
    Data {
        #[command(subcommand)]
        command: DataCommands,
    },
}

/// To-do subcommands
#[derive(Subcommand, Debug)]
pub enum TodoCommands {
    /// Add a to-do (newest first)
    Add {
        /// What needs doing
        text: String,

        /// Priority
        #[arg(short, long, default_value = "medium", value_parser = ["low", "medium", "high"])]
        priority: String,
    },

    /// List to-dos
    List {
        /// Only open to-dos
        #[arg(long, conflicts_with = "done")]
        open: bool,

        /// Only completed to-dos
        #[arg(long)]
        done: bool,
    },

    /// Toggle a to-do's completion
    Done {
        /// To-do ID
        id: String,
    },

    /// Delete a to-do
    Delete {
        /// To-do ID
        id: String,
    },
}

/// Routine subcommands
#[derive(Subcommand, Debug)]
pub enum RoutineCommands {
    /// Add a recurring routine
    Add {
        /// Routine name
        name: String,

        /// Category
        #[arg(short, long, default_value = "chore", value_parser = ["chore", "exercise", "learning", "health", "other"])]
        kind: String,

        /// Repeat interval in days (at least 1)
        #[arg(short, long = "every", default_value_t = 1)]
        every: u32,
    },

    /// List routines with due badges
    List,

    /// Mark a routine completed today
    Done {
        /// Routine ID
        id: String,
    },

    /// Delete a routine
    Delete {
        /// Routine ID
        id: String,
    },
}

/// Habit subcommands
#[derive(Subcommand, Debug)]
pub enum HabitCommands {
    /// Add a habit
    Add {
        /// Habit name
        name: String,
    },

    /// List habits with current streaks
    List,

    /// Log today's completion (once per day)
    Log {
        /// Habit ID
        id: String,
    },

    /// Delete a habit
    Delete {
        /// Habit ID
        id: String,
    },
}

/// Sleep subcommands
#[derive(Subcommand, Debug)]
pub enum SleepCommands {
    /// Record last night's sleep
    Add {
        /// Hours slept (must be positive)
        hours: f64,

        /// Quality, 1-10
        quality: u8,
    },

    /// Show the last seven entries
    List,

    /// Delete a sleep entry
    Delete {
        /// Entry ID
        id: String,
    },
}

/// Mood subcommands
#[derive(Subcommand, Debug)]
pub enum MoodCommands {
    /// Record a mood check-in
    Add {
        /// Mood label
        #[arg(value_parser = ["great", "good", "okay", "low", "awful"])]
        mood: String,

        /// Anxiety level, 1-10
        anxiety: u8,
    },

    /// Show the last seven check-ins
    List,

    /// Delete a mood entry
    Delete {
        /// Entry ID
        id: String,
    },
}

/// Goal subcommands
#[derive(Subcommand, Debug)]
pub enum GoalCommands {
    /// Add a goal
    Add {
        /// Goal text
        text: String,

        /// Target date (YYYY-MM-DD)
        #[arg(long)]
        deadline: Option<NaiveDate>,
    },

    /// List goals, soonest deadline first
    List,

    /// Toggle a goal's completion
    Done {
        /// Goal ID
        id: String,
    },

    /// Delete a goal
    Delete {
        /// Goal ID
        id: String,
    },
}

/// Project subcommands
#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    /// Add a project
    Add {
        /// Project name
        name: String,
    },

    /// List projects
    List,

    /// Toggle a project's completion
    Done {
        /// Project ID
        id: String,
    },

    /// Delete a project
    Delete {
        /// Project ID
        id: String,
    },
}

/// Planner subcommands
#[derive(Subcommand, Debug)]
pub enum PlanCommands {
    /// Add an item to a planner list
    Add {
        /// Item text
        text: String,

        /// Planner list (defaults to the active view)
        #[arg(long, value_parser = ["monthly", "weekly", "yearly"])]
        view: Option<String>,
    },

    /// List a planner list
    List {
        /// Planner list (defaults to the active view)
        #[arg(long, value_parser = ["monthly", "weekly", "yearly"])]
        view: Option<String>,
    },

    /// Switch the active planner view (persists)
    View {
        /// Planner list
        #[arg(value_parser = ["monthly", "weekly", "yearly"])]
        view: String,
    },

    /// Toggle a plan item's completion
    Done {
        /// Item ID
        id: String,

        /// Planner list to search (defaults to the active view)
        #[arg(long, value_parser = ["monthly", "weekly", "yearly"])]
        view: Option<String>,
    },

    /// Delete a plan item
    Delete {
        /// Item ID
        id: String,

        /// Planner list to search (defaults to the active view)
        #[arg(long, value_parser = ["monthly", "weekly", "yearly"])]
        view: Option<String>,
    },
}

/// Media subcommands
#[derive(Subcommand, Debug)]
pub enum MediaCommands {
    /// Log a book, film, series, game, or podcast
    Add {
        /// Title
        title: String,

        /// Media kind
        #[arg(short, long, default_value = "book", value_parser = ["book", "film", "series", "game", "podcast"])]
        kind: String,

        /// Star rating, 1-5
        #[arg(short, long, default_value_t = 3)]
        rating: u8,
    },

    /// List media, best rated first
    List,

    /// Delete a media entry
    Delete {
        /// Entry ID
        id: String,
    },
}

/// Notes subcommands
#[derive(Subcommand, Debug)]
pub enum NotesCommands {
    /// Print the notes
    Show,

    /// Replace the notes
    Set {
        /// New notes text
        text: String,
    },

    /// Edit notes interactively; lines from stdin autosave after a quiet
    /// period
    Edit,

    /// Clear the notes
    Clear,
}

/// Calendar subcommands
#[derive(Subcommand, Debug)]
pub enum CalendarCommands {
    /// Show the month at the saved offset
    Show,

    /// Go one month back (persists)
    Prev,

    /// Go one month forward (persists)
    Next,

    /// Jump back to the current month
    Today,
}

/// Timer subcommands
#[derive(Subcommand, Debug)]
pub enum TimerCommands {
    /// Show the configured phase lengths
    Status,

    /// Change the phase lengths
    Set {
        /// Focus phase length in minutes
        #[arg(long = "focus")]
        focus: Option<u32>,

        /// Break phase length in minutes
        #[arg(long = "break")]
        break_minutes: Option<u32>,
    },

    /// Run the countdown in the foreground (Ctrl-C to stop)
    Run,
}

/// Data subcommands
#[derive(Subcommand, Debug)]
pub enum DataCommands {
    /// Export the document as JSON ('-' for stdout)
    Export {
        /// Output file or directory (default: ./protracker-<date>.json)
        output: Option<PathBuf>,
    },

    /// Import a JSON snapshot, replacing the fields it contains ('-' for
    /// stdin)
    Import {
        /// Input file
        input: PathBuf,
    },

    /// Delete all tracked data
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}
