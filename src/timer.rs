//! Study timer state machine.
//!
//! The countdown is modeled as explicit states driven by injected ticks
//! rather than a self-rescheduling wall-clock callback: the host schedules
//! real one-second callbacks and forwards each as a [`tick`](StudyTimer::tick).
//! That keeps the machine fully testable with a virtual ticker, and the
//! host stays responsive since nothing here ever blocks.
//!
//! `cancel` exists as the natural extension point even though the shipped
//! UI only lets the countdown run to completion.

/// Timer lifecycle states.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerState {
    /// Not started yet, or reset after a completed run.
    Idle,
    /// Counting down; ticks decrement the remaining time.
    Running,
    /// Stopped before reaching zero.
    Cancelled,
    /// Reached zero.
    Completed,
}

/// A cancellable countdown driven by externally-supplied one-second ticks.
#[derive(Clone, Debug)]
pub struct StudyTimer {
    duration_secs: u32,
    remaining_secs: u32,
    state: TimerState,
}

impl StudyTimer {
    /// Creates an idle timer with the given duration.
    pub fn new(duration_secs: u32) -> Self {
        Self {
            duration_secs,
            remaining_secs: duration_secs,
            state: TimerState::Idle,
        }
    }

    /// Starts (or restarts) the countdown from the full duration.
    pub fn start(&mut self) {
        self.remaining_secs = self.duration_secs;
        self.state = TimerState::Running;
    }

    /// Advances the countdown by one second.
    ///
    /// Only a running timer ticks; calling this in any other state is a
    /// no-op. Reaching zero transitions to [`TimerState::Completed`]
    /// exactly once.
    pub fn tick(&mut self) -> TimerState {
        if self.state == TimerState::Running {
            self.remaining_secs = self.remaining_secs.saturating_sub(1);
            if self.remaining_secs == 0 {
                self.state = TimerState::Completed;
            }
        }
        self.state
    }

    /// Stops a running countdown before it reaches zero.
    pub fn cancel(&mut self) {
        if self.state == TimerState::Running {
            self.state = TimerState::Cancelled;
        }
    }

    /// Returns the current state.
    #[inline]
    pub fn state(&self) -> TimerState {
        self.state
    }

    /// Returns the remaining seconds.
    #[inline]
    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    /// Formats the remaining time as `M:SS` for display.
    pub fn display(&self) -> String {
        format!("{}:{:02}", self.remaining_secs / 60, self.remaining_secs % 60)
    }
}
