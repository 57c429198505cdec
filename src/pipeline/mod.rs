//! Instruction pipeline
//!
//! Planner -> Translator -> Executor, one instruction at a time:
//! free text -> Plan -> Vec<Action> -> motion calls.

pub mod orchestrator;

pub use orchestrator::{ExecutionReport, Pipeline, StepReport, StepStatus};
