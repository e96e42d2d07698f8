//! tilt-attitude - quasi-static attitude from accelerometer logs
//!
//! Estimates roll and pitch of a rigid body from single triaxial
//! accelerometer readings, assuming gravity is the only sustained
//! acceleration. Each reading is mapped independently; yaw is not
//! observable and is not estimated.

pub mod config;
pub mod emit;
pub mod estimate;
pub mod estimator;
pub mod ingest;
pub mod pipeline;
pub mod sample;
pub mod sim;

use std::path::PathBuf;

use thiserror::Error;

// Re-export main types
pub use config::RunConfig;
pub use emit::{parse_estimates, read_estimates, write_estimates, write_estimates_to};
pub use estimate::{OrientationEstimate, ANGLE_TOLERANCE_RAD};
pub use estimator::{estimate, estimate_one, estimate_parallel, ROLL_DAMPING_MU};
pub use ingest::{parse_samples, read_samples, write_samples};
pub use pipeline::{run, RunSummary};
pub use sample::SensorSample;

#[derive(Debug, Error)]
pub enum AttitudeError {
    #[error("io error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("line {line}: field `{field}` is not a valid number: {value:?}")]
    Parse {
        line: u64,
        field: &'static str,
        value: String,
    },
    #[error("line {line}: expected {expected} fields, got {got}")]
    FieldCount {
        line: u64,
        expected: usize,
        got: usize,
    },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl AttitudeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = AttitudeError> = std::result::Result<T, E>;
