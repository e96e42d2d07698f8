//! Ingest -> estimate -> emit
//!
//! Read errors propagate to the caller. A failed write is logged and
//! recorded in the summary so the estimates already computed are not lost.

use std::path::PathBuf;

use log::{error, info};
use serde::Serialize;

use crate::config::RunConfig;
use crate::emit::write_estimates;
use crate::estimate::OrientationEstimate;
use crate::estimator::estimate_parallel;
use crate::ingest::read_samples;
use crate::Result;

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub input: PathBuf,
    pub samples: usize,
    pub first_timestamp_ms: Option<i64>,
    pub last_timestamp_ms: Option<i64>,
    pub mean_abs_roll_deg: f64,
    pub mean_abs_pitch_deg: f64,
    /// Set when the estimates were written
    pub output: Option<PathBuf>,
    pub output_error: Option<String>,
}

impl RunSummary {
    fn from_estimates(input: PathBuf, estimates: &[OrientationEstimate]) -> Self {
        let n = estimates.len();
        let mean_abs = |f: fn(&OrientationEstimate) -> f64| {
            if n == 0 {
                0.0
            } else {
                estimates.iter().map(|e| f(e).abs()).sum::<f64>() / n as f64
            }
        };

        Self {
            input,
            samples: n,
            first_timestamp_ms: estimates.first().map(OrientationEstimate::timestamp_ms),
            last_timestamp_ms: estimates.last().map(OrientationEstimate::timestamp_ms),
            mean_abs_roll_deg: mean_abs(OrientationEstimate::roll_deg),
            mean_abs_pitch_deg: mean_abs(OrientationEstimate::pitch_deg),
            output: None,
            output_error: None,
        }
    }

    pub fn written(&self) -> bool {
        self.output.is_some()
    }
}

/// Run one estimation pass described by `config`.
pub fn run(config: &RunConfig) -> Result<RunSummary> {
    config.validate()?;

    let samples = read_samples(&config.input)?;
    let estimates = estimate_parallel(&samples, config.workers);
    info!(
        "estimated attitude for {} samples from {}",
        estimates.len(),
        config.input.display()
    );

    let mut summary = RunSummary::from_estimates(config.input.clone(), &estimates);
    match write_estimates(&config.output, &estimates) {
        Ok(()) => summary.output = Some(config.output.clone()),
        Err(err) => {
            error!("could not write estimates: {err}");
            summary.output_error = Some(err.to_string());
        }
    }

    Ok(summary)
}
