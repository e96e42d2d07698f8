use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{AttitudeError, Result};

/// Runtime configuration for one estimation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Accelerometer log to read
    pub input: PathBuf,
    /// Destination for the estimates
    pub output: PathBuf,
    /// Estimation threads; 1 keeps the sequential path
    pub workers: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("accelerometer_data.log"),
            output: PathBuf::from("attitude_estimation_data.log"),
            workers: 1,
        }
    }
}

impl RunConfig {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| AttitudeError::io(path, e))?;
        let config: RunConfig = serde_json::from_str(&raw)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.input.as_os_str().is_empty() {
            return Err(AttitudeError::InvalidConfig(
                "input path must not be empty".to_string(),
            ));
        }

        if self.output.as_os_str().is_empty() {
            return Err(AttitudeError::InvalidConfig(
                "output path must not be empty".to_string(),
            ));
        }

        if self.input == self.output {
            return Err(AttitudeError::InvalidConfig(
                "output path must differ from input path".to_string(),
            ));
        }

        if self.workers == 0 {
            return Err(AttitudeError::InvalidConfig(
                "workers must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        RunConfig::default().validate().unwrap();
    }

    #[test]
    fn test_rejects_zero_workers() {
        let cfg = RunConfig {
            workers: 0,
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(AttitudeError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_same_input_and_output() {
        let cfg = RunConfig {
            input: PathBuf::from("data.log"),
            output: PathBuf::from("data.log"),
            workers: 1,
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let cfg: RunConfig = serde_json::from_str(r#"{ "input": "run1.log" }"#).unwrap();
        assert_eq!(cfg.input, PathBuf::from("run1.log"));
        assert_eq!(cfg.output, RunConfig::default().output);
        assert_eq!(cfg.workers, 1);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        fs::write(&path, r#"{ "input": "a.log", "output": "b.log", "workers": 3 }"#).unwrap();
        let cfg = RunConfig::from_json_file(&path).unwrap();
        assert_eq!(cfg.workers, 3);
        assert_eq!(cfg.output, PathBuf::from("b.log"));
    }
}
