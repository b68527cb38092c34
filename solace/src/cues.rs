//! Short pentatonic tones played on breathing phase changes.
//!
//! [`CuePlayer`] is an explicit, owned resource: it is created by the session
//! that needs it, synthesizes each tone the first time it is requested, and
//! drops its buffers on [`CuePlayer::release`]. Nothing is cached globally.

use std::collections::HashMap;
use std::f32::consts::TAU;
use std::sync::Arc;

use crate::breathing::PhaseKind;

/// C major pentatonic, fourth octave (C4 D4 E4 G4 A4).
const PENTATONIC_HZ: [f32; 5] = [261.63, 293.66, 329.63, 392.00, 440.00];

pub const DEFAULT_SAMPLE_RATE: u32 = 22_050;
const TONE_MILLIS: u32 = 350;
const AMPLITUDE: f32 = 0.25;
const ATTACK_MILLIS: u32 = 10;

#[derive(Debug, Clone, Copy, Default)]
pub struct PentatonicScale;

impl PentatonicScale {
    /// Frequency of a scale degree. Degrees outside `0..5` move by octaves,
    /// so `5` is C5 and `-1` is A3.
    pub fn frequency(&self, degree: i32) -> f32 {
        let octave = degree.div_euclid(5);
        let step = degree.rem_euclid(5) as usize;
        PENTATONIC_HZ[step] * 2f32.powi(octave)
    }

    /// Frequencies of a rising run of `len` notes starting at `start`.
    pub fn melody(&self, start: i32, len: usize) -> Vec<f32> {
        (0..len as i32)
            .map(|offset| self.frequency(start + offset))
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct Cue {
    pub degree: i32,
    pub frequency_hz: f32,
    pub samples: Arc<[f32]>,
}

pub struct CuePlayer {
    sample_rate: u32,
    scale: PentatonicScale,
    tones: HashMap<i32, Arc<[f32]>>,
}

impl CuePlayer {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate: sample_rate.max(1),
            scale: PentatonicScale,
            tones: HashMap::new(),
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn cached_tones(&self) -> usize {
        self.tones.len()
    }

    pub fn degree_for(kind: PhaseKind) -> i32 {
        match kind {
            PhaseKind::Inhale => 4,
            PhaseKind::Hold => 2,
            PhaseKind::Exhale => 0,
            PhaseKind::Hold2 => 1,
        }
    }

    pub fn cue_for(&mut self, kind: PhaseKind) -> Cue {
        self.cue(Self::degree_for(kind))
    }

    pub fn cue(&mut self, degree: i32) -> Cue {
        let frequency_hz = self.scale.frequency(degree);
        let sample_rate = self.sample_rate;
        let samples = self
            .tones
            .entry(degree)
            .or_insert_with(|| synthesize(frequency_hz, sample_rate))
            .clone();

        Cue {
            degree,
            frequency_hz,
            samples,
        }
    }

    pub fn release(&mut self) {
        if !self.tones.is_empty() {
            tracing::debug!(tones = self.tones.len(), "Releasing cue buffers");
        }
        self.tones.clear();
    }
}

impl Default for CuePlayer {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_RATE)
    }
}

fn synthesize(frequency_hz: f32, sample_rate: u32) -> Arc<[f32]> {
    let total = (sample_rate * TONE_MILLIS / 1000) as usize;
    let attack = ((sample_rate * ATTACK_MILLIS / 1000) as usize).max(1);
    let step = TAU * frequency_hz / sample_rate as f32;

    (0..total)
        .map(|i| {
            let envelope = if i < attack {
                i as f32 / attack as f32
            } else {
                1.0 - (i - attack) as f32 / (total - attack) as f32
            };
            (step * i as f32).sin() * AMPLITUDE * envelope
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.01
    }

    #[test]
    fn scale_wraps_octaves() {
        let scale = PentatonicScale;
        assert!(approx(scale.frequency(0), 261.63));
        assert!(approx(scale.frequency(4), 440.0));
        assert!(approx(scale.frequency(5), 523.26));
        assert!(approx(scale.frequency(-1), 220.0));
        assert_eq!(scale.melody(0, 3).len(), 3);
    }

    #[test]
    fn tones_are_synthesized_once() {
        let mut player = CuePlayer::new(8_000);
        let first = player.cue_for(PhaseKind::Inhale);
        let second = player.cue_for(PhaseKind::Inhale);

        assert!(Arc::ptr_eq(&first.samples, &second.samples));
        assert_eq!(player.cached_tones(), 1);
        assert_eq!(first.samples.len(), 8_000 * 350 / 1000);
    }

    #[test]
    fn tone_starts_and_ends_silent() {
        let mut player = CuePlayer::new(8_000);
        let cue = player.cue(0);
        assert_eq!(cue.samples[0], 0.0);
        assert!(cue.samples.last().unwrap().abs() < 0.01);
        assert!(cue.samples.iter().all(|s| s.abs() <= AMPLITUDE));
    }

    #[test]
    fn release_drops_buffers() {
        let mut player = CuePlayer::default();
        player.cue_for(PhaseKind::Exhale);
        player.cue_for(PhaseKind::Hold);
        assert_eq!(player.cached_tones(), 2);

        player.release();
        assert_eq!(player.cached_tones(), 0);
    }
}
