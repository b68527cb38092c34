//! Guided breathing: looping phase timer and its async driver.

mod pattern;
mod session;
mod timer;

pub use pattern::{preset, presets, BreathingPattern, Phase, PhaseKind};
pub use session::{BreathingSession, BreathingSnapshot};
pub use timer::{BreathingSessionState, BreathingTimer, PhaseChange, TimerStatus};
