//! Shared motion types for the pipeline
//!
//! The arm has six joints; both joint-space targets (radians per joint) and
//! Cartesian targets (position + axis-angle orientation) are 6-vectors.

use crate::core::error::{ArmError, Result};
use serde::{Deserialize, Serialize};

/// Target angles for each of the six joints, in radians.
pub type JointVector = [f64; 6];

/// End-effector target: x, y, z position plus axis-angle orientation.
pub type CartesianPose = [f64; 6];

/// Which space a motion target lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionSpace {
    Joint,
    Cartesian,
}

/// Low-level action descriptor consumed by the executor.
///
/// Pose references are by name and resolved against the pose library at
/// execution time; the translator never emits coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    GoHome {
        target: String,
        space: MotionSpace,
        speed: f64,
        acc: f64,
    },
    GoPose {
        target: String,
        speed: f64,
        acc: f64,
    },
    JointMove {
        joint: usize,
        delta: f64,
        speed: f64,
        acc: f64,
    },
    Pick {
        approach: String,
        pick: String,
        retreat: String,
        speed: f64,
        acc: f64,
    },
    Place {
        approach: String,
        drop: String,
        retreat: String,
        speed: f64,
        acc: f64,
    },
}

impl Action {
    pub fn speed(&self) -> f64 {
        match self {
            Action::GoHome { speed, .. }
            | Action::GoPose { speed, .. }
            | Action::JointMove { speed, .. }
            | Action::Pick { speed, .. }
            | Action::Place { speed, .. } => *speed,
        }
    }

    pub fn acc(&self) -> f64 {
        match self {
            Action::GoHome { acc, .. }
            | Action::GoPose { acc, .. }
            | Action::JointMove { acc, .. }
            | Action::Pick { acc, .. }
            | Action::Place { acc, .. } => *acc,
        }
    }

    /// Check the descriptor invariants: speed and acc must be positive.
    /// Written so NaN also fails the check.
    pub fn ensure_valid(&self) -> Result<()> {
        if !(self.speed() > 0.0) {
            return Err(ArmError::Translation(format!(
                "action speed must be positive, got {}",
                self.speed()
            )));
        }
        if !(self.acc() > 0.0) {
            return Err(ArmError::Translation(format!(
                "action acc must be positive, got {}",
                self.acc()
            )));
        }
        Ok(())
    }

    /// Every pose name the action references, in issue order.
    pub fn pose_references(&self) -> Vec<&str> {
        match self {
            Action::GoHome { target, .. } | Action::GoPose { target, .. } => vec![target],
            Action::JointMove { .. } => Vec::new(),
            Action::Pick {
                approach,
                pick,
                retreat,
                ..
            } => vec![approach, pick, retreat],
            Action::Place {
                approach,
                drop,
                retreat,
                ..
            } => vec![approach, drop, retreat],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_serialization_tag() {
        let action = Action::GoHome {
            target: "home_j".into(),
            space: MotionSpace::Joint,
            speed: 0.2,
            acc: 0.5,
        };
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["action"], "go_home");
        assert_eq!(json["space"], "joint");
    }

    #[test]
    fn test_action_deserialization() {
        let json = r#"{"action":"pick","approach":"box_approach_l","pick":"box_pick_l","retreat":"box_approach_l","speed":0.2,"acc":0.5}"#;
        let action: Action = serde_json::from_str(json).unwrap();
        assert_eq!(
            action.pose_references(),
            vec!["box_approach_l", "box_pick_l", "box_approach_l"]
        );
    }

    #[test]
    fn test_ensure_valid_rejects_zero_speed() {
        let action = Action::GoPose {
            target: "box_approach_l".into(),
            speed: 0.0,
            acc: 0.5,
        };
        assert!(action.ensure_valid().is_err());
    }

    #[test]
    fn test_ensure_valid_rejects_nan() {
        let action = Action::GoPose {
            target: "box_approach_l".into(),
            speed: f64::NAN,
            acc: 0.5,
        };
        assert!(action.ensure_valid().is_err());

        let action = Action::GoPose {
            target: "box_approach_l".into(),
            speed: 0.2,
            acc: f64::NAN,
        };
        assert!(action.ensure_valid().is_err());
    }

    #[test]
    fn test_joint_move_has_no_pose_references() {
        let action = Action::JointMove {
            joint: 1,
            delta: -0.1,
            speed: 0.2,
            acc: 0.5,
        };
        assert!(action.pose_references().is_empty());
    }
}
