//! Focus/break countdown and the notes autosave debouncer.
//!
//! Both types are plain state machines driven by the caller's clock:
//! `FocusTimer::tick` takes the elapsed time and `Debouncer` takes explicit
//! `Instant`s, so tests run without sleeping. The command loop in `main`
//! supplies real time.

use crate::models::Settings;
use serde::Serialize;
use std::fmt;
use std::time::{Duration, Instant};

/// Quiet period after the last edit before notes are committed.
pub const NOTES_QUIET: Duration = Duration::from_millis(300);

/// Which side of the focus/break cycle is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Focus,
    Break,
}

impl Phase {
    fn other(self) -> Self {
        match self {
            Phase::Focus => Phase::Break,
            Phase::Break => Phase::Focus,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Focus => write!(f, "focus"),
            Phase::Break => write!(f, "break"),
        }
    }
}

/// Run state of the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
}

/// Format a remaining duration as `MM:SS`.
pub fn format_remaining(remaining: Duration) -> String {
    let secs = remaining.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// The focus/break countdown.
///
/// One timer per process; it exists only while `pt timer run` is in the
/// foreground, and only the phase lengths are persisted (in `Settings`).
#[derive(Debug, Clone)]
pub struct FocusTimer {
    settings: Settings,
    phase: Phase,
    state: TimerState,
    remaining: Duration,
}

impl FocusTimer {
    /// A fresh idle timer at the start of the focus phase.
    pub fn new(settings: Settings) -> Self {
        let remaining = phase_duration(&settings, Phase::Focus);
        Self {
            settings,
            phase: Phase::Focus,
            state: TimerState::Idle,
            remaining,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    /// Start (or resume) the countdown. Starting a running timer is a
    /// no-op; returns whether the state changed.
    pub fn start(&mut self) -> bool {
        match self.state {
            TimerState::Running => false,
            TimerState::Idle | TimerState::Paused => {
                self.state = TimerState::Running;
                true
            }
        }
    }

    /// Freeze the countdown, keeping the remaining time.
    pub fn pause(&mut self) -> bool {
        if self.state == TimerState::Running {
            self.state = TimerState::Paused;
            true
        } else {
            false
        }
    }

    /// Continue a paused countdown.
    pub fn resume(&mut self) -> bool {
        if self.state == TimerState::Paused {
            self.state = TimerState::Running;
            true
        } else {
            false
        }
    }

    /// Stop and reload the current phase's full duration from settings.
    pub fn reset(&mut self) {
        self.state = TimerState::Idle;
        self.remaining = phase_duration(&self.settings, self.phase);
    }

    /// Advance the countdown by `elapsed`.
    ///
    /// Does nothing unless running. When the countdown reaches zero the
    /// timer switches phase, reloads that phase's duration, keeps running,
    /// and returns the new phase.
    pub fn tick(&mut self, elapsed: Duration) -> Option<Phase> {
        if self.state != TimerState::Running {
            return None;
        }
        self.remaining = self.remaining.saturating_sub(elapsed);
        if !self.remaining.is_zero() {
            return None;
        }
        self.phase = self.phase.other();
        self.remaining = phase_duration(&self.settings, self.phase);
        Some(self.phase)
    }

    /// `MM:SS` readout of the remaining time.
    pub fn display(&self) -> String {
        format_remaining(self.remaining)
    }
}

fn phase_duration(settings: &Settings, phase: Phase) -> Duration {
    let minutes = match phase {
        Phase::Focus => settings.focus_minutes,
        Phase::Break => settings.break_minutes,
    };
    Duration::from_secs(u64::from(minutes) * 60)
}

/// Coalesces rapid edits into one commit after a quiet period.
///
/// Each `poke` replaces the single pending deadline; only a deadline that
/// survives the quiet period un-poked fires. The caller commits (writes the
/// notes field and saves) exactly when `fire` returns true.
#[derive(Debug)]
pub struct Debouncer {
    quiet: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            deadline: None,
        }
    }

    /// Arm or push back the pending deadline to `now + quiet`.
    pub fn poke(&mut self, now: Instant) {
        self.deadline = Some(now + self.quiet);
    }

    /// True while a commit is pending.
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Report whether the deadline has elapsed un-poked; disarms on fire.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Disarm, reporting whether a commit was still pending. Used at EOF
    /// so the final edits are not lost to the quiet period.
    pub fn flush(&mut self) -> bool {
        self.deadline.take().is_some()
    }
}
