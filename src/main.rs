//! Protracker CLI - a personal productivity tracker for the command line.

use chrono::{Local, NaiveDate};
use clap::Parser;
use protracker::cli::{
    CalendarCommands, Cli, Commands, DataCommands, GoalCommands, HabitCommands, MediaCommands,
    MoodCommands, NotesCommands, PlanCommands, ProjectCommands, RoutineCommands, SleepCommands,
    TimerCommands, TodoCommands,
};
use protracker::commands::{self, Output, TodoFilter};
use protracker::models::{MediaKind, Mood, PlannerView, Priority, RoutineKind};
use protracker::store::{self, Store};
use protracker::timer::{Debouncer, FocusTimer, NOTES_QUIET, TimerState};
use protracker::{Error, Result};
use std::io::{self, BufRead, Read, Write};
use std::path::Path;
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, mpsc};
use std::thread;
use std::time::{Duration, Instant};

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let json = cli.json;

    if let Err(e) = run(cli) {
        if json {
            eprintln!("{}", serde_json::json!({ "error": e.to_string() }));
        } else {
            eprintln!("Error: {}", e);
        }
        process::exit(1);
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    // Data dir: --data-dir flag > PT_DATA_DIR env (via clap) > platform default
    let data_dir = store::resolve_data_dir(cli.data_dir)?;
    let store = Store::open(&data_dir)?;
    let today = Local::now().date_naive();
    run_command(cli.command, &store, today, cli.json)
}

fn run_command(
    command: Option<Commands>,
    store: &Store,
    today: NaiveDate,
    json: bool,
) -> Result<()> {
    match command {
        // bare `pt` opens on the overview, like the tracker's dashboard
        None | Some(Commands::Stats) => {
            let result = commands::stats_overview(store, today)?;
            output(&result, json);
        }

        Some(Commands::Todo { command }) => match command {
            TodoCommands::Add { text, priority } => {
                let priority: Priority = priority.parse().map_err(Error::InvalidInput)?;
                let result = commands::todo_add(store, &text, priority, today)?;
                output(&result, json);
            }
            TodoCommands::List { open, done } => {
                let filter = if open {
                    TodoFilter::Open
                } else if done {
                    TodoFilter::Done
                } else {
                    TodoFilter::All
                };
                let result = commands::todo_list(store, filter)?;
                output(&result, json);
            }
            TodoCommands::Done { id } => {
                let result = commands::todo_toggle(store, &id)?;
                output(&result, json);
            }
            TodoCommands::Delete { id } => {
                let result = commands::todo_delete(store, &id)?;
                output(&result, json);
            }
        },

        Some(Commands::Routine { command }) => match command {
            RoutineCommands::Add { name, kind, every } => {
                let kind: RoutineKind = kind.parse().map_err(Error::InvalidInput)?;
                let result = commands::routine_add(store, &name, kind, every, today)?;
                output(&result, json);
            }
            RoutineCommands::List => {
                let result = commands::routine_list(store, today)?;
                output(&result, json);
            }
            RoutineCommands::Done { id } => {
                let result = commands::routine_done(store, &id, today)?;
                output(&result, json);
            }
            RoutineCommands::Delete { id } => {
                let result = commands::routine_delete(store, &id)?;
                output(&result, json);
            }
        },

        Some(Commands::Habit { command }) => match command {
            HabitCommands::Add { name } => {
                let result = commands::habit_add(store, &name)?;
                output(&result, json);
            }
            HabitCommands::List => {
                let result = commands::habit_list(store, today)?;
                output(&result, json);
            }
            HabitCommands::Log { id } => {
                let result = commands::habit_log(store, &id, today)?;
                output(&result, json);
            }
            HabitCommands::Delete { id } => {
                let result = commands::habit_delete(store, &id)?;
                output(&result, json);
            }
        },

        Some(Commands::Sleep { command }) => match command {
            SleepCommands::Add { hours, quality } => {
                let result = commands::sleep_add(store, hours, quality, today)?;
                output(&result, json);
            }
            SleepCommands::List => {
                let result = commands::sleep_list(store)?;
                output(&result, json);
            }
            SleepCommands::Delete { id } => {
                let result = commands::sleep_delete(store, &id)?;
                output(&result, json);
            }
        },

        Some(Commands::Mood { command }) => match command {
            MoodCommands::Add { mood, anxiety } => {
                let mood: Mood = mood.parse().map_err(Error::InvalidInput)?;
                let result = commands::mood_add(store, mood, anxiety, today)?;
                output(&result, json);
            }
            MoodCommands::List => {
                let result = commands::mood_list(store)?;
                output(&result, json);
            }
            MoodCommands::Delete { id } => {
                let result = commands::mood_delete(store, &id)?;
                output(&result, json);
            }
        },

        Some(Commands::Goal { command }) => match command {
            GoalCommands::Add { text, deadline } => {
                let result = commands::goal_add(store, &text, deadline)?;
                output(&result, json);
            }
            GoalCommands::List => {
                let result = commands::goal_list(store)?;
                output(&result, json);
            }
            GoalCommands::Done { id } => {
                let result = commands::goal_toggle(store, &id)?;
                output(&result, json);
            }
            GoalCommands::Delete { id } => {
                let result = commands::goal_delete(store, &id)?;
                output(&result, json);
            }
        },

        Some(Commands::Project { command }) => match command {
            ProjectCommands::Add { name } => {
                let result = commands::project_add(store, &name)?;
                output(&result, json);
            }
            ProjectCommands::List => {
                let result = commands::project_list(store)?;
                output(&result, json);
            }
            ProjectCommands::Done { id } => {
                let result = commands::project_toggle(store, &id)?;
                output(&result, json);
            }
            ProjectCommands::Delete { id } => {
                let result = commands::project_delete(store, &id)?;
                output(&result, json);
            }
        },

        Some(Commands::Plan { command }) => match command {
            PlanCommands::Add { text, view } => {
                let result = commands::plan_add(store, &text, parse_view(view)?)?;
                output(&result, json);
            }
            PlanCommands::List { view } => {
                let result = commands::plan_list(store, parse_view(view)?)?;
                output(&result, json);
            }
            PlanCommands::View { view } => {
                let view: PlannerView = view.parse().map_err(Error::InvalidInput)?;
                let result = commands::plan_view(store, view)?;
                output(&result, json);
            }
            PlanCommands::Done { id, view } => {
                let result = commands::plan_toggle(store, &id, parse_view(view)?)?;
                output(&result, json);
            }
            PlanCommands::Delete { id, view } => {
                let result = commands::plan_delete(store, &id, parse_view(view)?)?;
                output(&result, json);
            }
        },

        Some(Commands::Media { command }) => match command {
            MediaCommands::Add {
                title,
                kind,
                rating,
            } => {
                let kind: MediaKind = kind.parse().map_err(Error::InvalidInput)?;
                let result = commands::media_add(store, &title, kind, rating)?;
                output(&result, json);
            }
            MediaCommands::List => {
                let result = commands::media_list(store)?;
                output(&result, json);
            }
            MediaCommands::Delete { id } => {
                let result = commands::media_delete(store, &id)?;
                output(&result, json);
            }
        },

        Some(Commands::Notes { command }) => match command {
            NotesCommands::Show => {
                let result = commands::notes_show(store)?;
                output(&result, json);
            }
            NotesCommands::Set { text } => {
                let result = commands::notes_set(store, &text)?;
                output(&result, json);
            }
            NotesCommands::Edit => {
                run_notes_edit(store, json)?;
            }
            NotesCommands::Clear => {
                let result = commands::notes_clear(store)?;
                output(&result, json);
            }
        },

        Some(Commands::Calendar { command }) => match command {
            CalendarCommands::Show => {
                let result = commands::calendar_show(store, today)?;
                output(&result, json);
            }
            CalendarCommands::Prev => {
                let result = commands::calendar_shift(store, -1, today)?;
                output(&result, json);
            }
            CalendarCommands::Next => {
                let result = commands::calendar_shift(store, 1, today)?;
                output(&result, json);
            }
            CalendarCommands::Today => {
                let result = commands::calendar_home(store, today)?;
                output(&result, json);
            }
        },

        Some(Commands::Timer { command }) => match command {
            TimerCommands::Status => {
                let result = commands::timer_status(store)?;
                output(&result, json);
            }
            TimerCommands::Set {
                focus,
                break_minutes,
            } => {
                let result = commands::timer_set(store, focus, break_minutes)?;
                output(&result, json);
            }
            TimerCommands::Run => {
                run_timer(store)?;
            }
        },

        Some(Commands::Data { command }) => match command {
            DataCommands::Export {
                output: destination,
            } => match destination {
                Some(path) if path == Path::new("-") => {
                    println!("{}", store.export_json()?);
                }
                destination => {
                    let result = commands::data_export(store, destination.as_deref(), today)?;
                    output(&result, json);
                }
            },
            DataCommands::Import { input } => {
                let raw = if input == Path::new("-") {
                    let mut buf = String::new();
                    io::stdin().read_to_string(&mut buf)?;
                    buf
                } else {
                    std::fs::read_to_string(&input)?
                };
                let result = commands::data_import(store, &raw)?;
                output(&result, json);
            }
            DataCommands::Reset { yes } => {
                if !yes && !confirm_reset(store)? {
                    println!("Aborted");
                    return Ok(());
                }
                let result = commands::data_reset(store)?;
                output(&result, json);
            }
        },
    }

    Ok(())
}

/// Print output in JSON or human-readable format.
fn output<T: Output>(result: &T, json: bool) {
    if json {
        println!("{}", result.to_json());
    } else {
        println!("{}", result.to_human());
    }
}

fn parse_view(view: Option<String>) -> Result<Option<PlannerView>> {
    match view {
        Some(v) => Ok(Some(v.parse().map_err(Error::InvalidInput)?)),
        None => Ok(None),
    }
}

fn confirm_reset(store: &Store) -> Result<bool> {
    print!(
        "This deletes all tracked data at {}. Type 'yes' to confirm: ",
        store.document_path().display()
    );
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().eq_ignore_ascii_case("yes"))
}

/// Interactive notes editor.
///
/// Stdin lines append to the notes buffer; a debounced autosave commits the
/// buffer after each quiet period and once more at EOF, so rapid typing
/// coalesces into few writes.
fn run_notes_edit(store: &Store, json: bool) -> Result<()> {
    let doc = store.load()?;
    let mut buffer = doc.notes;

    // Reader thread feeds lines through a channel so the edit loop can also
    // wake up for debounce deadlines.
    let (tx, rx) = mpsc::channel::<String>();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
    });

    eprintln!("Editing notes: lines append, autosave after pauses, Ctrl-D to finish.");
    let mut debouncer = Debouncer::new(NOTES_QUIET);
    let mut edited = false;
    loop {
        // Poll for the deadline only while a save is pending; otherwise
        // block until the next line.
        let line = if debouncer.is_armed() {
            match rx.recv_timeout(Duration::from_millis(50)) {
                Ok(line) => line,
                Err(mpsc::RecvTimeoutError::Timeout) => {
                    if debouncer.fire(Instant::now()) {
                        commands::notes_set(store, &buffer)?;
                    }
                    continue;
                }
                Err(mpsc::RecvTimeoutError::Disconnected) => break,
            }
        } else {
            match rx.recv() {
                Ok(line) => line,
                Err(_) => break,
            }
        };

        if !buffer.is_empty() {
            buffer.push('\n');
        }
        buffer.push_str(&line);
        edited = true;
        debouncer.poke(Instant::now());
    }
    if debouncer.flush() {
        commands::notes_set(store, &buffer)?;
    }

    if edited {
        let result = commands::NotesSaved {
            chars: buffer.chars().count(),
        };
        output(&result, json);
    } else {
        eprintln!("No changes");
    }
    Ok(())
}

/// Foreground focus/break countdown.
///
/// Single-letter lines on stdin drive the timer: `p` pauses, resumes, or
/// starts, `r` stops and reloads the current phase, `q` quits. Ctrl-C
/// quits too.
fn run_timer(store: &Store) -> Result<()> {
    let settings = store.load()?.settings;
    println!(
        "Timer started: {} min focus / {} min break. p pauses, r resets, q or Ctrl-C stops.",
        settings.focus_minutes, settings.break_minutes
    );
    let mut timer = FocusTimer::new(settings);
    timer.start();

    let running = Arc::new(AtomicBool::new(true));
    let flag = running.clone();
    ctrlc::set_handler(move || {
        flag.store(false, Ordering::SeqCst);
    })
    .map_err(|e| Error::Other(format!("Failed to install Ctrl-C handler: {}", e)))?;

    let (tx, rx) = mpsc::channel::<String>();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
    });

    let mut last = Instant::now();
    while running.load(Ordering::SeqCst) {
        match rx.recv_timeout(Duration::from_millis(1000)) {
            Ok(line) => match line.trim() {
                "p" => match timer.state() {
                    TimerState::Running => {
                        timer.pause();
                    }
                    TimerState::Paused => {
                        timer.resume();
                    }
                    TimerState::Idle => {
                        timer.start();
                    }
                },
                "r" => timer.reset(),
                "q" => break,
                _ => {}
            },
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            // stdin closed; keep counting down on the clock alone
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                thread::sleep(Duration::from_millis(1000));
            }
        }
        let now = Instant::now();
        if let Some(phase) = timer.tick(now - last) {
            println!();
            println!("Phase complete, starting {} ({})", phase, timer.display());
        }
        last = now;
        let marker = match timer.state() {
            TimerState::Running => "",
            TimerState::Paused => " (paused)",
            TimerState::Idle => " (stopped)",
        };
        let line = format!("{} {}{}", timer.phase(), timer.display(), marker);
        print!("\r{:<24}", line);
        io::stdout().flush()?;
    }
    println!();
    println!("Stopped during {} with {} left", timer.phase(), timer.display());
    Ok(())
}
