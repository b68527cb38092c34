use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

impl Serialize for Rgb {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.hex())
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum MoodKey {
    Happy,
    Sad,
    #[default]
    Neutral,
    Excited,
    Calm,
}

impl MoodKey {
    pub const ALL: [MoodKey; 5] = [
        MoodKey::Happy,
        MoodKey::Sad,
        MoodKey::Neutral,
        MoodKey::Excited,
        MoodKey::Calm,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MoodKey::Happy => "happy",
            MoodKey::Sad => "sad",
            MoodKey::Neutral => "neutral",
            MoodKey::Excited => "excited",
            MoodKey::Calm => "calm",
        }
    }

    pub fn sample(&self) -> MoodSample {
        let (from, to) = match self {
            MoodKey::Happy => (Rgb(0xff, 0xd9, 0x3d), Rgb(0xff, 0x8c, 0x42)),
            MoodKey::Sad => (Rgb(0x6c, 0x9b, 0xd2), Rgb(0x3a, 0x5b, 0xa0)),
            MoodKey::Neutral => (Rgb(0xc3, 0xca, 0xd5), Rgb(0x8a, 0x94, 0xa6)),
            MoodKey::Excited => (Rgb(0xff, 0x6b, 0x9d), Rgb(0xc4, 0x45, 0x69)),
            MoodKey::Calm => (Rgb(0x7f, 0xd8, 0xbe), Rgb(0x4a, 0x9b, 0x8e)),
        };
        MoodSample {
            key: *self,
            gradient: (from, to),
        }
    }
}

impl fmt::Display for MoodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MoodKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MoodKey::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown mood '{s}'"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoodSample {
    pub key: MoodKey,
    /// `(from, to)`: inner and outer stops of the blob's fill.
    pub gradient: (Rgb, Rgb),
}

pub fn mood_table() -> Vec<MoodSample> {
    MoodKey::ALL.iter().map(MoodKey::sample).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_mood_has_a_distinct_gradient() {
        let table = mood_table();
        assert_eq!(table.len(), 5);
        let gradients: std::collections::HashSet<_> =
            table.iter().map(|sample| sample.gradient).collect();
        assert_eq!(gradients.len(), 5);
    }

    #[test]
    fn mood_keys_parse_case_insensitively() {
        assert_eq!("Happy".parse::<MoodKey>().unwrap(), MoodKey::Happy);
        assert_eq!(" calm ".parse::<MoodKey>().unwrap(), MoodKey::Calm);
        assert!("angry".parse::<MoodKey>().is_err());
    }

    #[test]
    fn sample_serializes_hex_colors() {
        let json = serde_json::to_value(MoodKey::Happy.sample()).expect("serialize");
        assert_eq!(json["key"], "happy");
        assert_eq!(json["gradient"][0], "#ffd93d");
        assert_eq!(json["gradient"][1], "#ff8c42");
    }
}
