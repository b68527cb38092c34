use serde::Serialize;

use super::pattern::{BreathingPattern, PhaseKind};

pub const MIN_SCALE: f32 = 1.0;
pub const MAX_SCALE: f32 = 1.5;
pub const DEFAULT_HOLD_SCALE: f32 = 1.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    Idle,
    Running,
    Paused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BreathingSessionState {
    pub current_phase_index: usize,
    pub elapsed_seconds_in_phase: u32,
    pub is_running: bool,
}

/// Emitted by [`BreathingTimer::tick`] when the active phase advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseChange {
    pub from: usize,
    pub to: usize,
    pub kind: PhaseKind,
    /// True when the timer wrapped back to the first phase.
    pub completed_cycle: bool,
}

/// Cyclic countdown through a [`BreathingPattern`].
///
/// Pure state machine: it never sleeps. Whoever owns it calls [`tick`] once
/// per second while it is running.
///
/// [`tick`]: BreathingTimer::tick
#[derive(Debug, Clone)]
pub struct BreathingTimer {
    pattern: BreathingPattern,
    status: TimerStatus,
    phase_index: usize,
    elapsed: u32,
    hold_scale: f32,
}

impl BreathingTimer {
    pub fn new(pattern: BreathingPattern) -> Self {
        Self {
            pattern,
            status: TimerStatus::Idle,
            phase_index: 0,
            elapsed: 0,
            hold_scale: DEFAULT_HOLD_SCALE,
        }
    }

    /// Non-finite scales are ignored; finite ones are clamped to `1.0..=1.5`.
    pub fn with_hold_scale(mut self, hold_scale: f32) -> Self {
        if hold_scale.is_finite() {
            self.hold_scale = hold_scale.clamp(MIN_SCALE, MAX_SCALE);
        }
        self
    }

    pub fn pattern(&self) -> &BreathingPattern {
        &self.pattern
    }

    pub fn status(&self) -> TimerStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == TimerStatus::Running
    }

    pub fn state(&self) -> BreathingSessionState {
        BreathingSessionState {
            current_phase_index: self.phase_index,
            elapsed_seconds_in_phase: self.elapsed,
            is_running: self.is_running(),
        }
    }

    /// Idle starts from the first phase; paused resumes; running is a no-op.
    pub fn start(&mut self) {
        match self.status {
            TimerStatus::Idle => {
                self.phase_index = 0;
                self.elapsed = 0;
                self.status = TimerStatus::Running;
            }
            TimerStatus::Paused => self.status = TimerStatus::Running,
            TimerStatus::Running => {}
        }
    }

    pub fn pause(&mut self) {
        if self.status == TimerStatus::Running {
            self.status = TimerStatus::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.status == TimerStatus::Paused {
            self.status = TimerStatus::Running;
        }
    }

    pub fn reset(&mut self) {
        self.status = TimerStatus::Idle;
        self.phase_index = 0;
        self.elapsed = 0;
    }

    /// Switching exercises always resets, whatever the current state.
    pub fn select_pattern(&mut self, pattern: BreathingPattern) {
        self.pattern = pattern;
        self.reset();
    }

    /// Advance one second. Ignored unless running.
    pub fn tick(&mut self) -> Option<PhaseChange> {
        if !self.is_running() {
            return None;
        }

        self.elapsed += 1;
        if self.elapsed < self.pattern.phase(self.phase_index).seconds {
            return None;
        }

        let from = self.phase_index;
        self.phase_index = (self.phase_index + 1) % self.pattern.len();
        self.elapsed = 0;

        Some(PhaseChange {
            from,
            to: self.phase_index,
            kind: self.pattern.phase(self.phase_index).kind,
            completed_cycle: self.phase_index == 0,
        })
    }

    /// Seconds left in the active phase.
    pub fn countdown(&self) -> u32 {
        self.pattern.phase(self.phase_index).seconds - self.elapsed
    }

    pub fn label(&self) -> &str {
        &self.pattern.phase(self.phase_index).label
    }

    pub fn phase_kind(&self) -> PhaseKind {
        self.pattern.phase(self.phase_index).kind
    }

    /// Fraction of the active phase already elapsed. `sub_second` adds the
    /// part of the current second a renderer has already shown.
    pub fn progress(&self, sub_second: f32) -> f32 {
        let seconds = self.pattern.phase(self.phase_index).seconds as f32;
        ((self.elapsed as f32 + sub_second.clamp(0.0, 1.0)) / seconds).clamp(0.0, 1.0)
    }

    pub fn visual_scale(&self, sub_second: f32) -> f32 {
        Self::scale(self.phase_kind(), self.progress(sub_second), self.hold_scale)
    }

    /// Render scale for a phase at `progress` in `[0, 1]`.
    pub fn scale(kind: PhaseKind, progress: f32, hold_scale: f32) -> f32 {
        let progress = progress.clamp(0.0, 1.0);
        match kind {
            PhaseKind::Inhale => MIN_SCALE + (MAX_SCALE - MIN_SCALE) * progress,
            PhaseKind::Exhale => MAX_SCALE - (MAX_SCALE - MIN_SCALE) * progress,
            PhaseKind::Hold | PhaseKind::Hold2 => hold_scale,
        }
    }
}
