//! Attitude estimator
//!
//! Maps each accelerometer sample to roll and pitch following the aerospace
//! rotation sequence (yaw -> pitch -> roll, yaw unobservable). Samples are
//! processed independently: no state, no smoothing across samples.

use log::debug;
use rayon::prelude::*;

use crate::estimate::OrientationEstimate;
use crate::sample::SensorSample;

/// Fraction of `accel_x^2` added under the roll denominator so it stays
/// non-zero when `accel_z == 0`.
pub const ROLL_DAMPING_MU: f64 = 0.01;

/// Smallest slice handed to a single rayon task.
const PARALLEL_MIN_CHUNK: usize = 1024;

/// +1 for non-negative values, -1 otherwise.
pub fn sign(value: f64) -> f64 {
    if value >= 0.0 {
        1.0
    } else {
        -1.0
    }
}

/// Roll angle in (-pi, pi].
///
/// `sign(accel_z)` keeps `atan2` in the right quadrant when the body is
/// inverted; the `mu * accel_x^2` term guards the denominator.
pub fn roll(sample: &SensorSample) -> f64 {
    let [x, y, z] = sample.axes();
    let denom = sign(z) * (z * z + ROLL_DAMPING_MU * x * x).sqrt();
    y.atan2(denom)
}

/// Pitch angle in [-pi/2, pi/2].
///
/// With `accel_y == accel_z == 0` the quotient is a signed infinity and
/// `atan` saturates at +-pi/2. The all-zero reading has no direction at all
/// and is reported level.
pub fn pitch(sample: &SensorSample) -> f64 {
    if sample.is_zero() {
        return 0.0;
    }
    let [x, y, z] = sample.axes();
    (-x / (y * y + z * z).sqrt()).atan()
}

/// Estimate the attitude of a single sample
pub fn estimate_one(sample: &SensorSample) -> OrientationEstimate {
    if sample.is_zero() {
        debug!(
            "zero reading at t={} ms, reporting level attitude",
            sample.timestamp_ms()
        );
    }
    OrientationEstimate::new(sample.timestamp_ms(), roll(sample), pitch(sample))
}

/// Estimate the attitude of every sample, in input order.
pub fn estimate(samples: &[SensorSample]) -> Vec<OrientationEstimate> {
    samples.iter().map(estimate_one).collect()
}

/// Same result as [`estimate`], computed on a pool of `workers` threads.
///
/// Falls back to the sequential path for a single worker, for inputs too
/// short to split, or when the pool cannot be built.
pub fn estimate_parallel(samples: &[SensorSample], workers: usize) -> Vec<OrientationEstimate> {
    if workers <= 1 || samples.len() < 2 * PARALLEL_MIN_CHUNK {
        return estimate(samples);
    }

    let pool = match rayon::ThreadPoolBuilder::new().num_threads(workers).build() {
        Ok(pool) => pool,
        Err(err) => {
            debug!("thread pool unavailable ({err}), estimating sequentially");
            return estimate(samples);
        }
    };

    pool.install(|| {
        samples
            .par_iter()
            .with_min_len(PARALLEL_MIN_CHUNK)
            .map(estimate_one)
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn fixture_samples() -> Vec<SensorSample> {
        vec![
            SensorSample::new(54741, 461, 82, -887),
            SensorSample::new(54751, 23, -22, -993),
            SensorSample::new(54761, 25, -20, -996),
        ]
    }

    #[test]
    fn test_reference_fixtures() {
        let expected = vec![
            OrientationEstimate::new(54741, 3.0495318, -0.4775673),
            OrientationEstimate::new(54751, -3.1194413, -0.0231523),
            OrientationEstimate::new(54761, -3.1215151, -0.0251658),
        ];
        assert_eq!(estimate(&fixture_samples()), expected);
    }

    #[test]
    fn test_empty_input() {
        assert!(estimate(&[]).is_empty());
        assert!(estimate_parallel(&[], 4).is_empty());
    }

    #[test]
    fn test_sign() {
        assert_eq!(sign(0.0), 1.0);
        assert_eq!(sign(3.5), 1.0);
        assert_eq!(sign(-0.1), -1.0);
    }

    #[test]
    fn test_level_and_inverted() {
        let level = estimate_one(&SensorSample::new(0, 0, 0, 1000));
        assert_abs_diff_eq!(level.roll_rad(), 0.0);
        assert_abs_diff_eq!(level.pitch_rad(), 0.0);

        // Upside down: roll is +pi, never -pi.
        let inverted = estimate_one(&SensorSample::new(0, 0, 0, -1000));
        assert_abs_diff_eq!(inverted.roll_rad(), PI, epsilon = 1e-15);
        assert_abs_diff_eq!(inverted.pitch_rad(), 0.0);
    }

    #[test]
    fn test_roll_on_side() {
        // z == 0 and x == 0: atan2(y, +0)
        let right = estimate_one(&SensorSample::new(0, 0, 1000, 0));
        assert_abs_diff_eq!(right.roll_rad(), FRAC_PI_2);
        let left = estimate_one(&SensorSample::new(0, 0, -1000, 0));
        assert_abs_diff_eq!(left.roll_rad(), -FRAC_PI_2);
    }

    #[test]
    fn test_roll_damping_with_zero_z() {
        // z == 0, x != 0: denominator is sqrt(mu) * |x|, not zero.
        let s = SensorSample::new(0, 500, 10, 0);
        let expected = 10.0_f64.atan2((ROLL_DAMPING_MU * 500.0 * 500.0).sqrt());
        assert_abs_diff_eq!(roll(&s), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_pitch_saturates_on_nose_axis() {
        let nose_down = estimate_one(&SensorSample::new(1, 1000, 0, 0));
        assert_abs_diff_eq!(nose_down.pitch_rad(), -FRAC_PI_2, epsilon = 1e-15);
        let nose_up = estimate_one(&SensorSample::new(2, -1000, 0, 0));
        assert_abs_diff_eq!(nose_up.pitch_rad(), FRAC_PI_2, epsilon = 1e-15);
    }

    #[test]
    fn test_zero_reading_is_level() {
        let e = estimate_one(&SensorSample::new(7, 0, 0, 0));
        assert_eq!(e.timestamp_ms(), 7);
        assert_eq!(e.roll_rad(), 0.0);
        assert_eq!(e.pitch_rad(), 0.0);
    }

    #[test]
    fn test_extreme_axes_do_not_overflow() {
        let e = estimate_one(&SensorSample::new(0, i32::MIN, i32::MAX, i32::MIN));
        assert!(e.roll_rad().is_finite());
        assert!(e.pitch_rad().is_finite());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let samples: Vec<SensorSample> = (0..5000)
            .map(|i| {
                SensorSample::new(
                    i,
                    (i % 97) as i32 - 48,
                    (i % 31) as i32 - 15,
                    1000 - (i % 2000) as i32,
                )
            })
            .collect();
        let seq = estimate(&samples);
        let par = estimate_parallel(&samples, 4);
        assert_eq!(seq.len(), par.len());
        for (a, b) in seq.iter().zip(par.iter()) {
            assert_eq!(a.timestamp_ms(), b.timestamp_ms());
            assert_eq!(a.roll_rad().to_bits(), b.roll_rad().to_bits());
            assert_eq!(a.pitch_rad().to_bits(), b.pitch_rad().to_bits());
        }
    }

    proptest! {
        #[test]
        fn prop_angles_in_range(
            x in -16_000i32..=16_000,
            y in -16_000i32..=16_000,
            z in -16_000i32..=16_000,
        ) {
            let e = estimate_one(&SensorSample::new(0, x, y, z));
            prop_assert!(e.roll_rad() > -PI && e.roll_rad() <= PI);
            prop_assert!(e.pitch_rad() >= -FRAC_PI_2 && e.pitch_rad() <= FRAC_PI_2);
        }

        #[test]
        fn prop_length_order_and_determinism(
            axes in proptest::collection::vec((any::<i16>(), any::<i16>(), any::<i16>()), 0..64),
        ) {
            let samples: Vec<SensorSample> = axes
                .iter()
                .enumerate()
                .map(|(i, &(x, y, z))| SensorSample::new(i as i64 * 10, x.into(), y.into(), z.into()))
                .collect();
            let first = estimate(&samples);
            let second = estimate(&samples);
            prop_assert_eq!(first.len(), samples.len());
            for (i, (a, b)) in first.iter().zip(second.iter()).enumerate() {
                prop_assert_eq!(a.timestamp_ms(), samples[i].timestamp_ms());
                prop_assert_eq!(a.roll_rad().to_bits(), b.roll_rad().to_bits());
                prop_assert_eq!(a.pitch_rad().to_bits(), b.pitch_rad().to_bits());
            }
        }
    }
}
