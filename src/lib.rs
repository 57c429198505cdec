//! Arm Pilot - natural-language to robot-arm motion pipeline

pub mod actuator;
pub mod core;
pub mod exec;
pub mod llm;
pub mod pipeline;
pub mod poses;
pub mod translate;
