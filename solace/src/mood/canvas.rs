use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use super::blob::{BlobSimulation, Vec2};
use super::palette::MoodKey;
use super::render::BlobFrame;
use crate::error::{Result, SolaceError};
use crate::scheduler::{ScheduledTask, MIN_PERIOD};

#[derive(Debug, Clone, Copy)]
enum CanvasEvent {
    PointerDown(Vec2),
    PointerMove(Vec2),
    PointerUp,
    Mood(MoodKey),
}

/// Handle to an animated mood blob. The simulation is stepped on its own
/// task at a fixed frame interval and every frame is published to watchers.
pub struct MoodCanvas {
    events: mpsc::UnboundedSender<CanvasEvent>,
    frames: watch::Receiver<BlobFrame>,
    task: ScheduledTask,
}

impl MoodCanvas {
    /// `frame_every` is raised to at least one millisecond.
    pub fn spawn(simulation: BlobSimulation, frame_every: Duration) -> Self {
        let frame_every = frame_every.max(MIN_PERIOD);
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (frame_tx, frame_rx) = watch::channel(simulation.frame());

        let task = ScheduledTask::spawn("mood-canvas", move |token| {
            run_canvas(simulation, frame_every, event_rx, frame_tx, token)
        });

        Self {
            events: event_tx,
            frames: frame_rx,
            task,
        }
    }

    pub fn pointer_down(&self, position: Vec2) -> Result<()> {
        self.send(CanvasEvent::PointerDown(position))
    }

    pub fn pointer_move(&self, position: Vec2) -> Result<()> {
        self.send(CanvasEvent::PointerMove(position))
    }

    /// Also used when the pointer leaves the canvas.
    pub fn pointer_up(&self) -> Result<()> {
        self.send(CanvasEvent::PointerUp)
    }

    pub fn set_mood(&self, mood: MoodKey) -> Result<()> {
        self.send(CanvasEvent::Mood(mood))
    }

    pub fn latest(&self) -> BlobFrame {
        self.frames.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<BlobFrame> {
        self.frames.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    pub async fn shutdown(self) {
        self.task.shutdown().await;
    }

    fn send(&self, event: CanvasEvent) -> Result<()> {
        self.events
            .send(event)
            .map_err(|_| SolaceError::Internal("Mood canvas has stopped".to_string()))
    }
}

async fn run_canvas(
    mut simulation: BlobSimulation,
    frame_every: Duration,
    mut events: mpsc::UnboundedReceiver<CanvasEvent>,
    frames: watch::Sender<BlobFrame>,
    token: CancellationToken,
) {
    let started = Instant::now();
    let mut ticker = tokio::time::interval_at(started + frame_every, frame_every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut frame = 0u64;

    loop {
        tokio::select! {
            _ = token.cancelled() => break,
            event = events.recv() => {
                let Some(event) = event else { break };
                match event {
                    CanvasEvent::PointerDown(at) => simulation.pointer_down(at),
                    CanvasEvent::PointerMove(at) => simulation.pointer_move(at),
                    CanvasEvent::PointerUp => simulation.pointer_up(),
                    CanvasEvent::Mood(mood) => {
                        tracing::debug!(%mood, "Mood changed");
                        simulation.set_mood(mood);
                        // Recolor without waiting for the next frame.
                        frames.send_replace(simulation.frame_numbered(frame));
                    }
                }
            }
            _ = ticker.tick() => {
                let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
                simulation.step(elapsed_ms);
                frame += 1;
                frames.send_replace(simulation.frame_numbered(frame));
            }
        }
    }

    tracing::debug!(frames = frame, "Mood canvas stopped");
}
