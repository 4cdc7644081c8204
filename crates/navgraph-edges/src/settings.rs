use std::f64::consts::FRAC_PI_6;

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Thresholds for edge calculation.
///
/// Every field has a default, so JSON files only need the overrides.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeCalculatorSettings {
    /// Candidates farther than this (meters) are ignored unless they are
    /// fallback candidates; also the distance scale of step scores.
    pub max_distance: f64,
    pub step: StepSettings,
    pub turn: TurnSettings,
    pub panorama: PanoramaSettings,
}

/// Thresholds shared by the four step directions (radians).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepSettings {
    /// Max absolute viewing direction change towards a step target.
    pub max_direction_change: f64,
    /// Max deviation of the observed motion from the step direction.
    pub max_drift: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurnSettings {
    /// Meters.
    pub max_distance: f64,
    /// Max deviation from the ideal ±90° turn (radians).
    pub max_direction_change: f64,
    /// Captures closer than this (meters) may be treated as rig captures.
    pub max_rig_distance: f64,
    /// Minimal rotation (radians) for a close capture to count as a rig capture.
    pub min_rig_direction_change: f64,
}

/// Meters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanoramaSettings {
    pub min_distance: f64,
    pub max_distance: f64,
    pub preferred_distance: f64,
}

impl Default for EdgeCalculatorSettings {
    fn default() -> Self {
        Self {
            max_distance: 20.0,
            step: StepSettings::default(),
            turn: TurnSettings::default(),
            panorama: PanoramaSettings::default(),
        }
    }
}

impl Default for StepSettings {
    fn default() -> Self {
        Self {
            max_direction_change: FRAC_PI_6,
            max_drift: FRAC_PI_6,
        }
    }
}

impl Default for TurnSettings {
    fn default() -> Self {
        Self {
            max_distance: 15.0,
            max_direction_change: FRAC_PI_6,
            max_rig_distance: 0.65,
            min_rig_direction_change: FRAC_PI_6,
        }
    }
}

impl Default for PanoramaSettings {
    fn default() -> Self {
        Self {
            min_distance: 0.1,
            max_distance: 20.0,
            preferred_distance: 5.0,
        }
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), SettingsError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SettingsError::NotPositive { name, value })
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<(), SettingsError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SettingsError::Negative { name, value })
    }
}

impl EdgeCalculatorSettings {
    /// Check that every threshold is usable as a divisor or bound.
    pub fn validate(&self) -> Result<(), SettingsError> {
        positive("max_distance", self.max_distance)?;
        positive("step.max_direction_change", self.step.max_direction_change)?;
        positive("step.max_drift", self.step.max_drift)?;
        positive("turn.max_distance", self.turn.max_distance)?;
        positive("turn.max_direction_change", self.turn.max_direction_change)?;
        non_negative("turn.max_rig_distance", self.turn.max_rig_distance)?;
        non_negative(
            "turn.min_rig_direction_change",
            self.turn.min_rig_direction_change,
        )?;
        non_negative("panorama.min_distance", self.panorama.min_distance)?;
        positive("panorama.max_distance", self.panorama.max_distance)?;
        non_negative(
            "panorama.preferred_distance",
            self.panorama.preferred_distance,
        )?;
        if self.panorama.min_distance > self.panorama.max_distance {
            return Err(SettingsError::PanoramaDistanceRange {
                min: self.panorama.min_distance,
                max: self.panorama.max_distance,
            });
        }
        Ok(())
    }
}
