//! Pose storage and lookup

pub mod library;

pub use library::{Pose, PoseLibrary};
