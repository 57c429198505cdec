//! Low-level action execution
//!
//! Runs one action descriptor against an actuator session. Per invocation
//! the state machine is: connect, motion phase, settle, stop, disconnect.
//! All pose references and the joint index are checked before the session
//! opens, so a bad descriptor never issues a motion call. A fault inside
//! the motion phase aborts the remaining moves but stop and disconnect are
//! still attempted before the original error is surfaced.

use crate::actuator::Actuator;
use crate::core::config::PipelineConfig;
use crate::core::error::{ArmError, Result};
use crate::core::types::{Action, MotionSpace};
use crate::poses::PoseLibrary;

/// Number of joints on the arm; valid joint indices are `0..JOINT_COUNT`.
pub const JOINT_COUNT: usize = 6;

/// Executes one action at a time against a connected actuator session.
pub struct ActionExecutor<'a> {
    library: &'a PoseLibrary,
    config: &'a PipelineConfig,
}

impl<'a> ActionExecutor<'a> {
    pub fn new(library: &'a PoseLibrary, config: &'a PipelineConfig) -> Self {
        Self { library, config }
    }

    /// Execute one action. The session is opened and closed inside this call.
    pub fn execute<A: Actuator>(&self, arm: &mut A, action: &Action) -> Result<()> {
        self.preflight(action)?;

        arm.connect(&self.config.robot_address)?;
        let outcome = self.run_motion(arm, action);

        if outcome.is_ok() {
            // Let the controller finish the final blend before decelerating.
            std::thread::sleep(self.config.settle);
        }

        let stop_outcome = arm.stop(action.acc());
        let disconnect_outcome = arm.disconnect();

        if let Err(e) = &outcome {
            tracing::warn!(error = %e, "motion aborted, session cleaned up");
        }
        outcome?;
        stop_outcome?;
        disconnect_outcome
    }

    /// Validate the descriptor before any session or motion call.
    fn preflight(&self, action: &Action) -> Result<()> {
        action.ensure_valid()?;

        if let Action::JointMove { joint, .. } = action {
            if *joint >= JOINT_COUNT {
                return Err(ArmError::Range(*joint));
            }
        }

        for name in action.pose_references() {
            self.library.resolve(name)?;
        }
        Ok(())
    }

    fn run_motion<A: Actuator>(&self, arm: &mut A, action: &Action) -> Result<()> {
        match action {
            Action::GoHome {
                target,
                space,
                speed,
                acc,
            } => {
                let pose = self.library.resolve(target)?;
                match space {
                    MotionSpace::Joint => arm.move_joint_space(pose.values, *speed, *acc),
                    MotionSpace::Cartesian => arm.move_cartesian(pose.values, *speed, *acc),
                }
            }
            Action::GoPose { target, speed, acc } => {
                // The pose's own kind decides the space.
                let pose = self.library.resolve(target)?;
                match pose.kind {
                    MotionSpace::Joint => arm.move_joint_space(pose.values, *speed, *acc),
                    MotionSpace::Cartesian => arm.move_cartesian(pose.values, *speed, *acc),
                }
            }
            Action::JointMove {
                joint,
                delta,
                speed,
                acc,
            } => {
                let mut q = arm.read_joint_vector()?;
                q[*joint] += delta;
                arm.move_joint_space(q, *speed, *acc)
            }
            Action::Pick {
                approach,
                pick,
                retreat,
                speed,
                acc,
            } => {
                self.cartesian_move(arm, approach, *speed, *acc)?;
                self.cartesian_move(arm, pick, *speed, *acc)?;
                self.grasp(arm)?;
                self.cartesian_move(arm, retreat, *speed, *acc)
            }
            Action::Place {
                approach,
                drop,
                retreat,
                speed,
                acc,
            } => {
                self.cartesian_move(arm, approach, *speed, *acc)?;
                self.cartesian_move(arm, drop, *speed, *acc)?;
                self.release(arm)?;
                self.cartesian_move(arm, retreat, *speed, *acc)
            }
        }
    }

    fn cartesian_move<A: Actuator>(
        &self,
        arm: &mut A,
        pose_name: &str,
        speed: f64,
        acc: f64,
    ) -> Result<()> {
        let pose = self.library.resolve(pose_name)?;
        tracing::debug!(pose = pose_name, speed, acc, "cartesian move");
        arm.move_cartesian(pose.values, speed, acc)
    }

    // Gripper extension points. The cell has no gripper wired in yet, so
    // these are no-ops at the pick/drop contact points.
    fn grasp<A: Actuator>(&self, _arm: &mut A) -> Result<()> {
        tracing::debug!("gripper grasp (not installed)");
        Ok(())
    }

    fn release<A: Actuator>(&self, _arm: &mut A) -> Result<()> {
        tracing::debug!("gripper release (not installed)");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actuator::sim::{ArmEvent, SimulatedArm, SIM_HOME};

    const STORE: &str = r#"{
        "home_j": {"kind": "joint", "values": [0.0, -1.57, 1.57, 0.0, 1.57, 0.0]},
        "box_approach_l": {"kind": "cartesian", "values": [0.35, -0.2, 0.25, 2.22, -2.22, 0.0]},
        "box_pick_l": {"kind": "cartesian", "values": [0.35, -0.2, 0.12, 2.22, -2.22, 0.0]}
    }"#;

    fn fixtures() -> (PoseLibrary, PipelineConfig) {
        let library = PoseLibrary::from_json(STORE).unwrap();
        let mut config = PipelineConfig::default();
        config.settle = std::time::Duration::from_millis(0);
        (library, config)
    }

    fn go_home() -> Action {
        Action::GoHome {
            target: "home_j".into(),
            space: MotionSpace::Joint,
            speed: 0.2,
            acc: 0.5,
        }
    }

    #[test]
    fn test_go_home_issues_joint_move() {
        let (library, config) = fixtures();
        let executor = ActionExecutor::new(&library, &config);
        let mut arm = SimulatedArm::new();

        executor.execute(&mut arm, &go_home()).unwrap();

        let motions = arm.motion_calls();
        assert_eq!(motions.len(), 1);
        assert!(matches!(
            motions[0],
            ArmEvent::MoveJointSpace { target, .. } if *target == SIM_HOME
        ));
        assert!(!arm.is_connected());
    }

    #[test]
    fn test_go_pose_follows_pose_kind() {
        let (library, config) = fixtures();
        let executor = ActionExecutor::new(&library, &config);

        let mut arm = SimulatedArm::new();
        let action = Action::GoPose {
            target: "box_approach_l".into(),
            speed: 0.2,
            acc: 0.5,
        };
        executor.execute(&mut arm, &action).unwrap();
        assert!(matches!(
            arm.motion_calls()[0],
            ArmEvent::MoveCartesian { .. }
        ));

        let mut arm = SimulatedArm::new();
        let action = Action::GoPose {
            target: "home_j".into(),
            speed: 0.2,
            acc: 0.5,
        };
        executor.execute(&mut arm, &action).unwrap();
        assert!(matches!(
            arm.motion_calls()[0],
            ArmEvent::MoveJointSpace { .. }
        ));
    }

    #[test]
    fn test_joint_move_mutates_one_component() {
        let (library, config) = fixtures();
        let executor = ActionExecutor::new(&library, &config);
        let mut arm = SimulatedArm::new();

        let action = Action::JointMove {
            joint: 1,
            delta: -0.1,
            speed: 0.2,
            acc: 0.5,
        };
        executor.execute(&mut arm, &action).unwrap();

        let motions = arm.motion_calls();
        assert_eq!(motions.len(), 1);
        let ArmEvent::MoveJointSpace { target, .. } = motions[0] else {
            panic!("expected joint-space move");
        };
        assert!((target[1] - (SIM_HOME[1] - 0.1)).abs() < 1e-9);
        for i in [0, 2, 3, 4, 5] {
            assert_eq!(target[i], SIM_HOME[i]);
        }
    }

    #[test]
    fn test_joint_index_out_of_range() {
        let (library, config) = fixtures();
        let executor = ActionExecutor::new(&library, &config);
        let mut arm = SimulatedArm::new();

        let action = Action::JointMove {
            joint: 6,
            delta: 0.1,
            speed: 0.2,
            acc: 0.5,
        };
        let err = executor.execute(&mut arm, &action).unwrap_err();
        assert!(matches!(err, ArmError::Range(6)));
        assert!(arm.events().is_empty());
    }

    #[test]
    fn test_unknown_pose_issues_no_motion() {
        let (library, config) = fixtures();
        let executor = ActionExecutor::new(&library, &config);
        let mut arm = SimulatedArm::new();

        let action = Action::Pick {
            approach: "box_approach_l".into(),
            pick: "missing_pose_l".into(),
            retreat: "box_approach_l".into(),
            speed: 0.2,
            acc: 0.5,
        };
        let err = executor.execute(&mut arm, &action).unwrap_err();
        assert!(matches!(err, ArmError::UnknownPose(name) if name == "missing_pose_l"));
        // Rejected in preflight: no session, no motion calls.
        assert!(arm.events().is_empty());
    }

    #[test]
    fn test_pick_issues_three_cartesian_moves() {
        let (library, config) = fixtures();
        let executor = ActionExecutor::new(&library, &config);
        let mut arm = SimulatedArm::new();

        let action = Action::Pick {
            approach: "box_approach_l".into(),
            pick: "box_pick_l".into(),
            retreat: "box_approach_l".into(),
            speed: 0.2,
            acc: 0.5,
        };
        executor.execute(&mut arm, &action).unwrap();

        let motions = arm.motion_calls();
        assert_eq!(motions.len(), 3);
        assert!(motions.iter().all(|m| matches!(m, ArmEvent::MoveCartesian { .. })));
    }

    #[test]
    fn test_fault_still_cleans_up_session() {
        let (library, config) = fixtures();
        let executor = ActionExecutor::new(&library, &config);
        let mut arm = SimulatedArm::new().fail_on_motion_call(2);

        let action = Action::Pick {
            approach: "box_approach_l".into(),
            pick: "box_pick_l".into(),
            retreat: "box_approach_l".into(),
            speed: 0.2,
            acc: 0.5,
        };
        let err = executor.execute(&mut arm, &action).unwrap_err();
        assert!(matches!(err, ArmError::Actuator(_)));

        // Remaining moves aborted, stop + disconnect still attempted.
        assert_eq!(arm.motion_calls().len(), 1);
        let events = arm.events();
        assert!(matches!(events[events.len() - 2], ArmEvent::Stop { .. }));
        assert!(matches!(events[events.len() - 1], ArmEvent::Disconnect));
        assert!(!arm.is_connected());
    }

    #[test]
    fn test_stop_and_disconnect_follow_motion() {
        let (library, config) = fixtures();
        let executor = ActionExecutor::new(&library, &config);
        let mut arm = SimulatedArm::new();

        executor.execute(&mut arm, &go_home()).unwrap();

        let events = arm.events();
        assert!(matches!(events[0], ArmEvent::Connect { .. }));
        assert!(matches!(events[1], ArmEvent::MoveJointSpace { .. }));
        assert!(matches!(events[2], ArmEvent::Stop { .. }));
        assert!(matches!(events[3], ArmEvent::Disconnect));
    }
}
