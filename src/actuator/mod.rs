//! Actuator capability boundary
//!
//! The trait mirrors the vendor motion-control surface the executor needs:
//! session lifecycle, joint/Cartesian moves, joint readback, stop. A real
//! vendor SDK binding implements this against the controller; the crate
//! ships [`sim::SimulatedArm`] for dry runs and tests.

pub mod sim;

pub use sim::SimulatedArm;

use crate::core::error::Result;
use crate::core::types::{CartesianPose, JointVector};

/// One connected actuator session.
///
/// The session is exclusively owned for the duration of one action: opened,
/// driven, stopped, and closed by a single caller. Implementations do not
/// need to be thread-safe.
pub trait Actuator {
    /// Open the session against the controller at `address`.
    fn connect(&mut self, address: &str) -> Result<()>;

    /// Joint-space move to the given target angles.
    fn move_joint_space(&mut self, target: JointVector, speed: f64, acc: f64) -> Result<()>;

    /// Cartesian move to the given end-effector pose.
    fn move_cartesian(&mut self, target: CartesianPose, speed: f64, acc: f64) -> Result<()>;

    /// Read the current joint angles.
    fn read_joint_vector(&mut self) -> Result<JointVector>;

    /// Decelerate to a standstill.
    fn stop(&mut self, acc: f64) -> Result<()>;

    /// Close the session.
    fn disconnect(&mut self) -> Result<()>;
}
