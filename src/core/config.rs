//! Pipeline configuration
//!
//! Every tunable the original scripts kept as module-level constants lives
//! here as an explicit value, constructed once and passed into each
//! component. Nothing reads configuration ambiently.

use crate::core::error::{ArmError, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Default speed and acceleration applied to every motion command unless a
/// caller overrides them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionDefaults {
    /// Tool speed in m/s (Cartesian) or rad/s (joint space).
    pub speed: f64,
    /// Acceleration in m/s^2 or rad/s^2.
    pub acc: f64,
}

impl Default for MotionDefaults {
    fn default() -> Self {
        Self {
            speed: 0.2,
            acc: 0.5,
        }
    }
}

/// Configuration for one pipeline instance.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Address the actuator session connects to.
    pub robot_address: String,
    /// Pose store location, a flat JSON object keyed by pose name.
    pub pose_file: PathBuf,
    /// Speed/acc applied when an action does not carry its own.
    pub defaults: MotionDefaults,
    /// Dwell after the last motion command before stop is issued, so the
    /// controller finishes the blend before deceleration.
    pub settle: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            robot_address: "192.168.1.226".into(),
            pose_file: PathBuf::from("data/poses.json"),
            defaults: MotionDefaults::default(),
            settle: Duration::from_millis(500),
        }
    }
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency.
    pub fn validate(&self) -> Result<()> {
        if self.robot_address.is_empty() {
            return Err(ArmError::Config("robot_address must not be empty".into()));
        }
        if self.defaults.speed <= 0.0 || self.defaults.acc <= 0.0 {
            return Err(ArmError::Config(format!(
                "motion defaults must be positive (speed {}, acc {})",
                self.defaults.speed, self.defaults.acc
            )));
        }
        Ok(())
    }
}
