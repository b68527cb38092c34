//! Mood blob: a springy ring of points colored by the selected mood.

mod blob;
mod canvas;
mod palette;
mod render;

pub use blob::{BlobParams, BlobPoint, BlobSimulation, Vec2, POINT_COUNT};
pub use canvas::MoodCanvas;
pub use palette::{mood_table, MoodKey, MoodSample, Rgb};
pub use render::{BlobFrame, CubicSegment, GradientStop, RadialGradient, CANVAS_SIZE};
