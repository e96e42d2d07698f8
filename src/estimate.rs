//! Orientation estimates
//!
//! Roll and pitch for one sample, keyed by the sample's timestamp.

use serde::{Deserialize, Serialize};

/// Absolute tolerance applied to angle comparisons [rad]
pub const ANGLE_TOLERANCE_RAD: f64 = 1e-4;

/// Roll/pitch estimate for a single sample.
///
/// Equality is exact on the timestamp and within [`ANGLE_TOLERANCE_RAD`] on
/// both angles, so estimates survive a trip through text.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OrientationEstimate {
    timestamp_ms: i64,
    roll_rad: f64,
    pitch_rad: f64,
}

impl OrientationEstimate {
    /// Create a new estimate
    pub fn new(timestamp_ms: i64, roll_rad: f64, pitch_rad: f64) -> Self {
        Self {
            timestamp_ms,
            roll_rad,
            pitch_rad,
        }
    }

    pub fn timestamp_ms(&self) -> i64 {
        self.timestamp_ms
    }

    /// Roll in (-pi, pi]
    pub fn roll_rad(&self) -> f64 {
        self.roll_rad
    }

    /// Pitch in [-pi/2, pi/2]
    pub fn pitch_rad(&self) -> f64 {
        self.pitch_rad
    }

    pub fn roll_deg(&self) -> f64 {
        self.roll_rad.to_degrees()
    }

    pub fn pitch_deg(&self) -> f64 {
        self.pitch_rad.to_degrees()
    }
}

impl PartialEq for OrientationEstimate {
    fn eq(&self, other: &Self) -> bool {
        self.timestamp_ms == other.timestamp_ms
            && (self.roll_rad - other.roll_rad).abs() <= ANGLE_TOLERANCE_RAD
            && (self.pitch_rad - other.pitch_rad).abs() <= ANGLE_TOLERANCE_RAD
    }
}
