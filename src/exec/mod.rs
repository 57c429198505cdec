//! Action execution against the actuator capability

pub mod executor;

pub use executor::ActionExecutor;
