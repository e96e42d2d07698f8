//! Synthetic accelerometer logs
//!
//! Generates quasi-static readings for a known roll/pitch so the estimator
//! can be exercised against ground truth.

use std::f64::consts::PI;

use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

use crate::estimate::OrientationEstimate;
use crate::sample::SensorSample;
use crate::{AttitudeError, Result};

/// Standard gravity in milli-g
pub const ONE_G_MG: f64 = 1000.0;

/// Simulation configuration
#[derive(Debug, Clone)]
pub struct SimConfig {
    pub samples: usize,
    pub start_ms: i64,
    pub period_ms: i64,
    pub roll_rad: f64,
    pub pitch_rad: f64,
    /// Per-axis Gaussian noise [mg]
    pub noise_mg: f64,
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            samples: 1000,
            start_ms: 0,
            period_ms: 10,
            roll_rad: 0.0,
            pitch_rad: 0.0,
            noise_mg: 5.0,
            seed: 42,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<()> {
        if self.period_ms <= 0 {
            return Err(AttitudeError::InvalidConfig(
                "period_ms must be > 0".to_string(),
            ));
        }
        if !self.roll_rad.is_finite() || !self.pitch_rad.is_finite() {
            return Err(AttitudeError::InvalidConfig(
                "roll_rad and pitch_rad must be finite".to_string(),
            ));
        }
        if !(self.noise_mg.is_finite() && self.noise_mg >= 0.0) {
            return Err(AttitudeError::InvalidConfig(
                "noise_mg must be finite and >= 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Body-frame gravity for the given attitude [mg], `[x, y, z]`.
pub fn gravity_body_mg(roll_rad: f64, pitch_rad: f64) -> [f64; 3] {
    let (sin_r, cos_r) = roll_rad.sin_cos();
    let (sin_p, cos_p) = pitch_rad.sin_cos();
    [
        -ONE_G_MG * sin_p,
        ONE_G_MG * sin_r * cos_p,
        ONE_G_MG * cos_r * cos_p,
    ]
}

fn to_axis(value: f64) -> i32 {
    value.round().clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
}

/// Generate a seeded, noisy log of a body held at a fixed attitude
pub fn generate_samples(config: &SimConfig) -> Result<Vec<SensorSample>> {
    config.validate()?;

    let mut rng = rand::rngs::StdRng::seed_from_u64(config.seed);
    let noise_dist = Normal::new(0.0, config.noise_mg)
        .map_err(|e| AttitudeError::InvalidConfig(format!("noise_mg: {e}")))?;

    let [gx, gy, gz] = gravity_body_mg(config.roll_rad, config.pitch_rad);

    let mut samples = Vec::with_capacity(config.samples);
    for step in 0..config.samples {
        let t = config.start_ms + step as i64 * config.period_ms;
        samples.push(SensorSample::new(
            t,
            to_axis(gx + noise_dist.sample(&mut rng)),
            to_axis(gy + noise_dist.sample(&mut rng)),
            to_axis(gz + noise_dist.sample(&mut rng)),
        ));
    }

    Ok(samples)
}

/// Wrap an angle into (-pi, pi]
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = (angle + PI).rem_euclid(2.0 * PI) - PI;
    if wrapped <= -PI {
        wrapped + 2.0 * PI
    } else {
        wrapped
    }
}

/// Absolute roll and pitch errors against a fixed true attitude
pub fn angle_errors(
    estimates: &[OrientationEstimate],
    roll_rad: f64,
    pitch_rad: f64,
) -> (Vec<f64>, Vec<f64>) {
    estimates
        .iter()
        .map(|e| {
            (
                wrap_angle(e.roll_rad() - roll_rad).abs(),
                (e.pitch_rad() - pitch_rad).abs(),
            )
        })
        .unzip()
}

/// Calculate RMS error
pub fn rms_error(errors: &[f64]) -> f64 {
    if errors.is_empty() {
        return 0.0;
    }
    let sum_sq: f64 = errors.iter().map(|&e| e * e).sum();
    (sum_sq / errors.len() as f64).sqrt()
}
