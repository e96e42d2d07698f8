//! Raw accelerometer samples
//!
//! A sample is one timestamped triaxial reading in milli-g.

use serde::{Deserialize, Serialize};

/// One accelerometer reading.
///
/// Axes are in milli-g (1/1000 of standard gravity). Equality is exact
/// field-wise comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SensorSample {
    timestamp_ms: i64,
    accel_x: i32,
    accel_y: i32,
    accel_z: i32,
}

impl SensorSample {
    /// Create a new sample
    pub fn new(timestamp_ms: i64, accel_x: i32, accel_y: i32, accel_z: i32) -> Self {
        Self {
            timestamp_ms,
            accel_x,
            accel_y,
            accel_z,
        }
    }

    pub fn timestamp_ms(&self) -> i64 {
        self.timestamp_ms
    }

    pub fn accel_x(&self) -> i32 {
        self.accel_x
    }

    pub fn accel_y(&self) -> i32 {
        self.accel_y
    }

    pub fn accel_z(&self) -> i32 {
        self.accel_z
    }

    /// Axes as `[x, y, z]` in milli-g
    pub fn axes(&self) -> [f64; 3] {
        [
            f64::from(self.accel_x),
            f64::from(self.accel_y),
            f64::from(self.accel_z),
        ]
    }

    /// Norm of the acceleration vector in milli-g
    pub fn magnitude_mg(&self) -> f64 {
        let [x, y, z] = self.axes();
        (x * x + y * y + z * z).sqrt()
    }

    /// True when all three axes read zero (free fall or a dead sensor).
    pub fn is_zero(&self) -> bool {
        self.accel_x == 0 && self.accel_y == 0 && self.accel_z == 0
    }
}
