use std::f64::consts::TAU;
use std::ops::{Add, AddAssign, Mul, MulAssign, Sub};
use std::str::FromStr;

use super::palette::MoodKey;

pub const POINT_COUNT: usize = 16;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn polar(radius: f64, angle: f64) -> Self {
        Self::new(radius * angle.cos(), radius * angle.sin())
    }

    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn distance(&self, other: Vec2) -> f64 {
        (*self - other).length()
    }
}

/// Parses `"x,y"`.
impl FromStr for Vec2 {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .split_once(',')
            .ok_or_else(|| format!("expected 'x,y', got '{s}'"))?;
        let coord = |v: &str| {
            v.trim()
                .parse::<f64>()
                .map_err(|e| format!("invalid coordinate '{v}': {e}"))
        };
        Ok(Vec2::new(coord(x)?, coord(y)?))
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl MulAssign<f64> for Vec2 {
    fn mul_assign(&mut self, rhs: f64) {
        self.x *= rhs;
        self.y *= rhs;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlobPoint {
    /// Resting angle around the center; idle drift is added on top.
    pub angle: f64,
    pub position: Vec2,
    pub velocity: Vec2,
}

/// Tuning for the blob physics. Distances are in logical canvas units and
/// times in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlobParams {
    pub center: Vec2,
    pub radius: f64,
    pub influence_radius: f64,
    pub capture_radius: f64,
    pub repulsion: f64,
    pub attraction: f64,
    pub tension: f64,
    pub damping: f64,
    /// Idle rotation speed, radians per millisecond.
    pub idle_speed: f64,
    /// Amplitude of the idle radial wobble.
    pub wobble: f64,
}

impl Default for BlobParams {
    fn default() -> Self {
        Self {
            center: Vec2::new(200.0, 200.0),
            radius: 100.0,
            influence_radius: 150.0,
            capture_radius: 40.0,
            repulsion: 8.0,
            attraction: 3.0,
            tension: 0.02,
            damping: 0.9,
            idle_speed: 0.0005,
            wobble: 6.0,
        }
    }
}

/// Spring-mass ring of [`POINT_COUNT`] points that drifts, reacts to a
/// pointer, and carries the currently selected mood.
#[derive(Debug, Clone)]
pub struct BlobSimulation {
    params: BlobParams,
    points: [BlobPoint; POINT_COUNT],
    mood: MoodKey,
    pointer: Option<Vec2>,
    interacting: bool,
    last_elapsed_ms: f64,
    frozen_at_ms: Option<f64>,
}

impl BlobSimulation {
    pub fn new(mood: MoodKey) -> Self {
        Self::with_params(mood, BlobParams::default())
    }

    pub fn with_params(mood: MoodKey, params: BlobParams) -> Self {
        let points = std::array::from_fn(|i| {
            let angle = i as f64 * TAU / POINT_COUNT as f64;
            BlobPoint {
                angle,
                position: params.center + Vec2::polar(params.radius, angle),
                velocity: Vec2::ZERO,
            }
        });

        Self {
            params,
            points,
            mood,
            pointer: None,
            interacting: false,
            last_elapsed_ms: 0.0,
            frozen_at_ms: None,
        }
    }

    pub fn params(&self) -> &BlobParams {
        &self.params
    }

    pub fn points(&self) -> &[BlobPoint] {
        &self.points
    }

    pub fn mood(&self) -> MoodKey {
        self.mood
    }

    /// Recolor immediately; the shape is untouched.
    pub fn set_mood(&mut self, mood: MoodKey) {
        self.mood = mood;
    }

    pub fn is_interacting(&self) -> bool {
        self.interacting
    }

    pub fn pointer_down(&mut self, position: Vec2) {
        self.pointer = Some(position);
        self.interacting = true;
    }

    /// Moves only matter while the pointer is down (or a touch is active).
    pub fn pointer_move(&mut self, position: Vec2) {
        if self.interacting {
            self.pointer = Some(position);
        }
    }

    pub fn pointer_up(&mut self) {
        self.interacting = false;
        self.pointer = None;
    }

    /// Pin the idle drift at the current time so targets stop moving.
    pub fn freeze_idle(&mut self, frozen: bool) {
        self.frozen_at_ms = frozen.then_some(self.last_elapsed_ms);
    }

    pub fn target(&self, index: usize, elapsed_ms: f64) -> Vec2 {
        let t = self.frozen_at_ms.unwrap_or(elapsed_ms);
        let point = &self.points[index];
        let angle = point.angle + t * self.params.idle_speed;
        let radius = self.params.radius + self.params.wobble * (t * 0.002 + point.angle * 3.0).sin();
        self.params.center + Vec2::polar(radius, angle)
    }

    /// Advance one animation frame to wall-clock time `elapsed_ms`.
    pub fn step(&mut self, elapsed_ms: f64) {
        self.last_elapsed_ms = elapsed_ms;
        let targets: [Vec2; POINT_COUNT] = std::array::from_fn(|i| self.target(i, elapsed_ms));
        let pointer = self.pointer.filter(|_| self.interacting);
        let p = self.params;

        for (point, target) in self.points.iter_mut().zip(targets) {
            if let Some(pointer) = pointer {
                let away = point.position - pointer;
                let distance = away.length();

                if distance > f64::EPSILON && distance < p.influence_radius {
                    let falloff = (p.influence_radius - distance) / p.influence_radius;
                    point.velocity += away * (falloff * p.repulsion / distance);

                    if distance < p.capture_radius {
                        let grip = (p.capture_radius - distance) / p.capture_radius;
                        point.velocity += away * (-grip * p.attraction / distance);
                    }
                }
            }

            point.velocity += (target - point.position) * p.tension;
            point.velocity *= p.damping;
            point.position += point.velocity;
        }
    }

    pub fn centroid(&self) -> Vec2 {
        let sum = self
            .points
            .iter()
            .fold(Vec2::ZERO, |acc, point| acc + point.position);
        sum * (1.0 / POINT_COUNT as f64)
    }

    pub fn max_speed(&self) -> f64 {
        self.points
            .iter()
            .map(|point| point.velocity.length())
            .fold(0.0, f64::max)
    }
}
