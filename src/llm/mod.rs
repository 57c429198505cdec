//! Language-model boundary of the pipeline
//!
//! Only the open-ended natural-language stages live here: the task planner
//! and the direct commander. Everything downstream of them is deterministic.

pub mod client;
pub mod commander;
pub mod planner;

pub use client::LlmClient;
pub use planner::{Plan, TaskStep, WorkspaceInventory};

use crate::core::error::{ArmError, Result};

/// Extract the JSON object from an LLM response (handles surrounding text).
pub(crate) fn extract_json(response: &str) -> Result<&str> {
    let start = response
        .find('{')
        .ok_or_else(|| ArmError::Translation("no JSON found in response".into()))?;
    // Only braces after the opening one count; a stray '}' earlier in the
    // response must not produce an inverted slice.
    let end = response[start..]
        .rfind('}')
        .map(|i| start + i)
        .ok_or_else(|| ArmError::Translation("no closing brace found in response".into()))?;
    Ok(&response[start..=end])
}
