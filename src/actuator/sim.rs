//! In-process simulated arm
//!
//! Records every call it receives and tracks a joint vector, so dry runs
//! print what the robot would have done and tests can assert on the exact
//! motion sequence. Supports injecting a fault at the nth motion call to
//! exercise the executor's cleanup path.

use crate::core::error::{ArmError, Result};
use crate::core::types::{CartesianPose, JointVector};

use super::Actuator;

/// Joint vector the simulated arm starts from (the taught home position).
pub const SIM_HOME: JointVector = [0.0, -1.57, 1.57, 0.0, 1.57, 0.0];

/// Everything the simulated arm was asked to do, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum ArmEvent {
    Connect { address: String },
    MoveJointSpace { target: JointVector, speed: f64, acc: f64 },
    MoveCartesian { target: CartesianPose, speed: f64, acc: f64 },
    Stop { acc: f64 },
    Disconnect,
}

impl ArmEvent {
    pub fn is_motion(&self) -> bool {
        matches!(
            self,
            ArmEvent::MoveJointSpace { .. } | ArmEvent::MoveCartesian { .. }
        )
    }
}

/// Recording actuator used for simulation mode and tests.
#[derive(Debug, Default)]
pub struct SimulatedArm {
    joints: Option<JointVector>,
    connected: bool,
    events: Vec<ArmEvent>,
    fail_on_motion_call: Option<usize>,
    motion_calls_seen: usize,
}

impl SimulatedArm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the nth motion call (1-based) with an actuator error.
    pub fn fail_on_motion_call(mut self, n: usize) -> Self {
        self.fail_on_motion_call = Some(n);
        self
    }

    /// Full event log, including lifecycle calls.
    pub fn events(&self) -> &[ArmEvent] {
        &self.events
    }

    /// Only the motion commands, in issue order.
    pub fn motion_calls(&self) -> Vec<&ArmEvent> {
        self.events.iter().filter(|e| e.is_motion()).collect()
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    fn ensure_connected(&self) -> Result<()> {
        if self.connected {
            Ok(())
        } else {
            Err(ArmError::Actuator("no active session".into()))
        }
    }

    fn check_motion_fault(&mut self) -> Result<()> {
        self.motion_calls_seen += 1;
        if self.fail_on_motion_call == Some(self.motion_calls_seen) {
            return Err(ArmError::Actuator(format!(
                "injected fault on motion call {}",
                self.motion_calls_seen
            )));
        }
        Ok(())
    }
}

impl Actuator for SimulatedArm {
    fn connect(&mut self, address: &str) -> Result<()> {
        if self.connected {
            return Err(ArmError::Actuator("session already open".into()));
        }
        tracing::debug!(address, "sim: connect");
        self.connected = true;
        self.joints.get_or_insert(SIM_HOME);
        self.events.push(ArmEvent::Connect {
            address: address.to_string(),
        });
        Ok(())
    }

    fn move_joint_space(&mut self, target: JointVector, speed: f64, acc: f64) -> Result<()> {
        self.ensure_connected()?;
        self.check_motion_fault()?;
        tracing::debug!(?target, speed, acc, "sim: moveJ");
        self.joints = Some(target);
        self.events.push(ArmEvent::MoveJointSpace { target, speed, acc });
        Ok(())
    }

    fn move_cartesian(&mut self, target: CartesianPose, speed: f64, acc: f64) -> Result<()> {
        self.ensure_connected()?;
        self.check_motion_fault()?;
        tracing::debug!(?target, speed, acc, "sim: moveL");
        self.events.push(ArmEvent::MoveCartesian { target, speed, acc });
        Ok(())
    }

    fn read_joint_vector(&mut self) -> Result<JointVector> {
        self.ensure_connected()?;
        self.joints
            .ok_or_else(|| ArmError::Actuator("joint state unavailable".into()))
    }

    fn stop(&mut self, acc: f64) -> Result<()> {
        self.ensure_connected()?;
        tracing::debug!(acc, "sim: stop");
        self.events.push(ArmEvent::Stop { acc });
        Ok(())
    }

    fn disconnect(&mut self) -> Result<()> {
        self.ensure_connected()?;
        tracing::debug!("sim: disconnect");
        self.connected = false;
        self.events.push(ArmEvent::Disconnect);
        Ok(())
    }
}
