use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

/// Widths of 240 or more leave no room to place the window inside the
/// reachable arc (see track::roll_window_start).
pub const MAX_HIT_WINDOW_DEGREES: f64 = 240.0;

/// Named difficulty presets understood on the wire.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DifficultyName {
    Easy,
    Medium,
    Hard,
}

impl DifficultyName {
    pub fn hit_window_degrees(self) -> f64 {
        match self {
            DifficultyName::Easy => 50.0,
            DifficultyName::Medium => 40.0,
            DifficultyName::Hard => 25.0,
        }
    }

    pub fn speed_multiplier(self) -> f64 {
        match self {
            DifficultyName::Easy => 1.0,
            DifficultyName::Medium => 1.5,
            DifficultyName::Hard => 1.75,
        }
    }
}

/// Caller-supplied difficulty with an explicit window size and speed.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomDifficulty {
    pub area_size: f64,
    pub speed_multiplier: f64,
}

/// One difficulty entry on the wire: a preset name or a custom payload.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Difficulty {
    Named(DifficultyName),
    Custom(CustomDifficulty),
}

/// Resolved parameters for one stage attempt.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct StageSpec {
    pub hit_window_degrees: f64,
    pub speed_multiplier: f64,
}

impl StageSpec {
    /// Resolve a wire difficulty into stage parameters, validating custom
    /// payloads. Presets are valid by construction.
    pub fn from_difficulty(difficulty: Difficulty) -> Result<Self, InvalidConfiguration> {
        let spec = match difficulty {
            Difficulty::Named(name) => Self {
                hit_window_degrees: name.hit_window_degrees(),
                speed_multiplier: name.speed_multiplier(),
            },
            Difficulty::Custom(custom) => Self {
                hit_window_degrees: custom.area_size,
                speed_multiplier: custom.speed_multiplier,
            },
        };
        spec.validate()
    }

    fn validate(self) -> Result<Self, InvalidConfiguration> {
        if !self.hit_window_degrees.is_finite()
            || self.hit_window_degrees <= 0.0
            || self.hit_window_degrees >= MAX_HIT_WINDOW_DEGREES
        {
            return Err(InvalidConfiguration::HitWindowOutOfRange(
                self.hit_window_degrees,
            ));
        }
        if !self.speed_multiplier.is_finite() || self.speed_multiplier <= 0.0 {
            return Err(InvalidConfiguration::NonPositiveSpeed(self.speed_multiplier));
        }
        Ok(self)
    }
}

/// Rejection reasons for a start request. Duplicate starts, unknown keys and
/// idle cancels are ignored rather than reported through this type.
#[derive(Debug, Clone, PartialEq)]
pub enum InvalidConfiguration {
    NoStages,
    NoCandidateKeys,
    HitWindowOutOfRange(f64),
    NonPositiveSpeed(f64),
}

impl fmt::Display for InvalidConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidConfiguration::NoStages => write!(f, "start request carries no stages"),
            InvalidConfiguration::NoCandidateKeys => {
                write!(f, "start request carries an empty input key list")
            }
            InvalidConfiguration::HitWindowOutOfRange(width) => write!(
                f,
                "hit window of {width} degrees is outside (0, {MAX_HIT_WINDOW_DEGREES})"
            ),
            InvalidConfiguration::NonPositiveSpeed(mult) => {
                write!(f, "speed multiplier {mult} is not a positive number")
            }
        }
    }
}

impl Error for InvalidConfiguration {}
