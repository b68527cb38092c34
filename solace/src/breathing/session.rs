use std::time::Duration;

use serde::Serialize;
use tokio::sync::{mpsc, watch};
use tokio::time::{Instant, Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use super::pattern::BreathingPattern;
use super::timer::{BreathingSessionState, BreathingTimer, TimerStatus};
use crate::cues::{Cue, CuePlayer};
use crate::error::{Result, SolaceError};
use crate::scheduler::{ScheduledTask, MIN_PERIOD};

/// Cues waiting for a consumer. Later cues are dropped while the queue is full.
pub const CUE_BUFFER: usize = 8;

#[derive(Debug)]
enum Command {
    Start,
    Pause,
    Resume,
    Reset,
    Select(BreathingPattern),
}

/// What a renderer needs to draw the exercise after every change.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreathingSnapshot {
    pub pattern_key: String,
    pub status: TimerStatus,
    #[serde(flatten)]
    pub state: BreathingSessionState,
    pub label: String,
    pub countdown: u32,
    pub scale: f32,
    pub cycles_completed: u64,
}

impl BreathingSnapshot {
    fn of(timer: &BreathingTimer, cycles_completed: u64) -> Self {
        Self {
            pattern_key: timer.pattern().key.clone(),
            status: timer.status(),
            state: timer.state(),
            label: timer.label().to_string(),
            countdown: timer.countdown(),
            scale: timer.visual_scale(0.0),
            cycles_completed,
        }
    }
}

/// Handle to a running breathing exercise.
///
/// The timer itself lives inside one background task; this handle only sends
/// commands and reads snapshots. Dropping the handle cancels the task.
pub struct BreathingSession {
    commands: mpsc::UnboundedSender<Command>,
    snapshots: watch::Receiver<BreathingSnapshot>,
    cues: Option<mpsc::Receiver<Cue>>,
    task: ScheduledTask,
}

impl BreathingSession {
    /// `tick_every` is raised to at least one millisecond.
    pub fn spawn(timer: BreathingTimer, tick_every: Duration) -> Self {
        let tick_every = tick_every.max(MIN_PERIOD);
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(BreathingSnapshot::of(&timer, 0));
        let (cue_tx, cue_rx) = mpsc::channel(CUE_BUFFER);

        let task = ScheduledTask::spawn("breathing", move |token| {
            run_session(
                timer,
                tick_every,
                command_rx,
                snapshot_tx,
                cue_tx,
                CuePlayer::default(),
                token,
            )
        });

        Self {
            commands: command_tx,
            snapshots: snapshot_rx,
            cues: Some(cue_rx),
            task,
        }
    }

    pub fn start(&self) -> Result<()> {
        self.send(Command::Start)
    }

    pub fn pause(&self) -> Result<()> {
        self.send(Command::Pause)
    }

    pub fn resume(&self) -> Result<()> {
        self.send(Command::Resume)
    }

    pub fn reset(&self) -> Result<()> {
        self.send(Command::Reset)
    }

    pub fn select_pattern(&self, pattern: BreathingPattern) -> Result<()> {
        self.send(Command::Select(pattern))
    }

    pub fn snapshot(&self) -> BreathingSnapshot {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<BreathingSnapshot> {
        self.snapshots.clone()
    }

    /// Phase-change cues. Can be taken once; later calls return `None`.
    ///
    /// At most [`CUE_BUFFER`] cues are held for a slow or absent consumer.
    pub fn take_cues(&mut self) -> Option<mpsc::Receiver<Cue>> {
        self.cues.take()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    pub async fn shutdown(self) {
        self.task.shutdown().await;
    }

    fn send(&self, command: Command) -> Result<()> {
        self.commands
            .send(command)
            .map_err(|_| SolaceError::Internal("Breathing session has stopped".to_string()))
    }
}

async fn run_session(
    mut timer: BreathingTimer,
    tick_every: Duration,
    mut commands: mpsc::UnboundedReceiver<Command>,
    snapshots: watch::Sender<BreathingSnapshot>,
    cues: mpsc::Sender<Cue>,
    mut player: CuePlayer,
    token: CancellationToken,
) {
    // Exists only while the timer runs; dropping it is what stops the ticks.
    let mut ticker: Option<Interval> = None;
    let mut cycles_completed = 0u64;

    loop {
        tokio::select! {
            _ = token.cancelled() => break,
            command = commands.recv() => {
                let Some(command) = command else { break };
                tracing::debug!(?command, "Breathing command");

                match command {
                    Command::Start => timer.start(),
                    Command::Pause => timer.pause(),
                    Command::Resume => timer.resume(),
                    Command::Reset => {
                        timer.reset();
                        cycles_completed = 0;
                    }
                    Command::Select(pattern) => {
                        tracing::info!(pattern = %pattern.key, "Breathing pattern selected");
                        timer.select_pattern(pattern);
                        cycles_completed = 0;
                    }
                }

                ticker = if timer.is_running() {
                    ticker.or_else(|| Some(second_ticker(tick_every)))
                } else {
                    None
                };
                snapshots.send_replace(BreathingSnapshot::of(&timer, cycles_completed));
            }
            _ = next_tick(&mut ticker) => {
                if let Some(change) = timer.tick() {
                    if change.completed_cycle {
                        cycles_completed += 1;
                    }
                    tracing::debug!(
                        phase = change.to,
                        label = %timer.label(),
                        cycles = cycles_completed,
                        "Breathing phase changed"
                    );
                    // Nobody listening, or a full queue, drops the cue.
                    let _ = cues.try_send(player.cue_for(change.kind));
                }
                snapshots.send_replace(BreathingSnapshot::of(&timer, cycles_completed));
            }
        }
    }

    player.release();
    tracing::debug!("Breathing session stopped");
}

fn second_ticker(period: Duration) -> Interval {
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending().await,
    }
}
