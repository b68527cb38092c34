use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PhaseKind {
    Inhale,
    Hold,
    Exhale,
    /// The hold that follows an exhale, before the next inhale.
    Hold2,
}

impl PhaseKind {
    pub fn is_hold(&self) -> bool {
        matches!(self, PhaseKind::Hold | PhaseKind::Hold2)
    }

    /// Kind named by a display label, matched on whole words.
    ///
    /// "Inhale"/"Breathe In", "Exhale"/"Breathe Out" and "Hold"/"Pause"/"Rest"
    /// are recognised in any case. Holds come back as [`PhaseKind::Hold`];
    /// only the position in a pattern makes one a [`PhaseKind::Hold2`].
    pub fn from_label(label: &str) -> Option<PhaseKind> {
        let words: Vec<String> = label
            .split(|c: char| !c.is_alphanumeric())
            .filter(|word| !word.is_empty())
            .map(str::to_lowercase)
            .collect();
        let has = |word: &str| words.iter().any(|w| w == word);
        let breathe = |direction: &str| {
            words
                .windows(2)
                .any(|pair| pair[0] == "breathe" && pair[1] == direction)
        };

        if has("exhale") || breathe("out") {
            Some(PhaseKind::Exhale)
        } else if has("inhale") || breathe("in") {
            Some(PhaseKind::Inhale)
        } else if has("hold") || has("pause") || has("rest") {
            Some(PhaseKind::Hold)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Phase {
    pub kind: PhaseKind,
    pub label: String,
    pub seconds: u32,
}

impl Phase {
    pub fn new(kind: PhaseKind, seconds: u32) -> Self {
        let label = match kind {
            PhaseKind::Inhale => "Breathe In",
            PhaseKind::Hold | PhaseKind::Hold2 => "Hold",
            PhaseKind::Exhale => "Breathe Out",
        };
        Self {
            kind,
            label: label.to_string(),
            seconds,
        }
    }
}

/// An ordered, looping list of timed phases.
///
/// Patterns are configuration: they are built once and never mutated. A
/// malformed pattern is a programming error and panics at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct BreathingPattern {
    pub key: String,
    pub name: String,
    pub phases: Vec<Phase>,
}

impl BreathingPattern {
    pub fn new(key: impl Into<String>, name: impl Into<String>, phases: Vec<Phase>) -> Self {
        assert!(
            phases.len() >= 2,
            "a breathing pattern needs at least two phases"
        );
        assert!(
            phases.iter().all(|phase| phase.seconds > 0),
            "breathing phase durations must be positive"
        );

        Self {
            key: key.into(),
            name: name.into(),
            phases,
        }
    }

    /// Build from parallel duration and label lists.
    ///
    /// Kinds come from [`PhaseKind::from_label`]; a hold after an exhale
    /// becomes [`PhaseKind::Hold2`]. Panics on a label naming no phase.
    pub fn from_parts(
        key: impl Into<String>,
        name: impl Into<String>,
        durations: &[u32],
        labels: &[&str],
    ) -> Self {
        assert_eq!(
            durations.len(),
            labels.len(),
            "breathing pattern durations and labels must have the same length"
        );

        let mut seen_exhale = false;
        let phases = durations
            .iter()
            .zip(labels)
            .map(|(&seconds, &label)| {
                let kind = match PhaseKind::from_label(label) {
                    Some(PhaseKind::Exhale) => {
                        seen_exhale = true;
                        PhaseKind::Exhale
                    }
                    Some(PhaseKind::Hold) if seen_exhale => PhaseKind::Hold2,
                    Some(kind) => kind,
                    None => panic!("unknown breathing phase label '{label}'"),
                };
                Phase {
                    kind,
                    label: label.to_string(),
                    seconds,
                }
            })
            .collect();

        Self::new(key, name, phases)
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    pub fn phase(&self, index: usize) -> &Phase {
        &self.phases[index]
    }

    pub fn durations(&self) -> Vec<u32> {
        self.phases.iter().map(|phase| phase.seconds).collect()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.phases.iter().map(|phase| phase.label.as_str()).collect()
    }

    pub fn cycle_seconds(&self) -> u32 {
        self.phases.iter().map(|phase| phase.seconds).sum()
    }
}

/// Built-in exercises offered to the user.
pub fn presets() -> Vec<BreathingPattern> {
    use PhaseKind::*;

    vec![
        BreathingPattern::new(
            "box",
            "Box Breathing",
            vec![
                Phase::new(Inhale, 4),
                Phase::new(Hold, 4),
                Phase::new(Exhale, 4),
                Phase::new(Hold2, 4),
            ],
        ),
        BreathingPattern::new(
            "relaxing",
            "4-7-8 Relaxing Breath",
            vec![
                Phase::new(Inhale, 4),
                Phase::new(Hold, 7),
                Phase::new(Exhale, 8),
            ],
        ),
        BreathingPattern::new(
            "calm",
            "Calm Breathing",
            vec![Phase::new(Inhale, 4), Phase::new(Exhale, 6)],
        ),
        BreathingPattern::new(
            "energizing",
            "Energizing Breath",
            vec![
                Phase::new(Inhale, 6),
                Phase::new(Hold, 2),
                Phase::new(Exhale, 6),
                Phase::new(Hold2, 2),
            ],
        ),
    ]
}

pub fn preset(key: &str) -> Option<BreathingPattern> {
    presets().into_iter().find(|pattern| pattern.key == key)
}
