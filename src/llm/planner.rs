//! High-level task planner
//!
//! Turns a free-text instruction into a symbolic task plan over a closed
//! vocabulary of step kinds. This is the only genuinely open-ended parsing
//! in the pipeline, so it is the one place an LLM call is warranted; the
//! output is still validated against the fixed workspace inventory before
//! anything downstream sees it.

use crate::core::error::{ArmError, Result};
use crate::llm::client::LlmClient;
use crate::llm::extract_json;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One symbolic task step. Object/verb level only; no robot geometry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum TaskStep {
    Pick { object: String, from: String },
    Place { object: String, to: String },
    GoHome,
}

impl TaskStep {
    /// Short human-readable description for reports and logs.
    pub fn describe(&self) -> String {
        match self {
            TaskStep::Pick { object, from } => format!("pick '{}' from '{}'", object, from),
            TaskStep::Place { object, to } => format!("place '{}' into '{}'", object, to),
            TaskStep::GoHome => "move to home position".to_string(),
        }
    }
}

/// Ordered sequence of task steps; insertion order is execution order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    #[serde(rename = "task_plan")]
    pub steps: Vec<TaskStep>,
}

/// The fixed, enumerable set of things the planner may reference.
///
/// Closed-world assumption: a plan step naming anything outside these sets
/// is rejected rather than fabricated into a motion.
#[derive(Debug, Clone)]
pub struct WorkspaceInventory {
    pub objects: BTreeSet<String>,
    pub sources: BTreeSet<String>,
    pub destinations: BTreeSet<String>,
}

impl Default for WorkspaceInventory {
    fn default() -> Self {
        Self {
            objects: BTreeSet::from(["box".to_string()]),
            sources: BTreeSet::from(["table".to_string()]),
            destinations: BTreeSet::from(["bin_a".to_string()]),
        }
    }
}

impl WorkspaceInventory {
    /// Check one step against the inventory.
    pub fn validate_step(&self, step: &TaskStep) -> Result<()> {
        match step {
            TaskStep::Pick { object, from } => {
                if !self.objects.contains(object) {
                    return Err(ArmError::UnknownEntity(format!("object '{}'", object)));
                }
                if !self.sources.contains(from) {
                    return Err(ArmError::UnknownEntity(format!("location '{}'", from)));
                }
            }
            TaskStep::Place { object, to } => {
                if !self.objects.contains(object) {
                    return Err(ArmError::UnknownEntity(format!("object '{}'", object)));
                }
                if !self.destinations.contains(to) {
                    return Err(ArmError::UnknownEntity(format!("destination '{}'", to)));
                }
            }
            TaskStep::GoHome => {}
        }
        Ok(())
    }

    pub fn validate_plan(&self, plan: &Plan) -> Result<()> {
        for step in &plan.steps {
            self.validate_step(step)?;
        }
        Ok(())
    }
}

/// Plan an instruction by one inference call plus closed-world validation.
pub async fn plan_instruction(
    client: &LlmClient,
    instruction: &str,
    inventory: &WorkspaceInventory,
) -> Result<Plan> {
    tracing::info!(instruction, "calling planner");
    let response = client.complete(PLANNER_SYSTEM_PROMPT, instruction).await?;
    parse_plan_response(&response, inventory)
}

/// Parse and validate a planner response. Pure; exercised directly in tests.
pub fn parse_plan_response(response: &str, inventory: &WorkspaceInventory) -> Result<Plan> {
    let json_str = extract_json(response)?;

    let plan: Plan = serde_json::from_str(json_str).map_err(|e| {
        ArmError::Translation(format!(
            "planner output is not a valid task plan: {} - response: {}",
            e, response
        ))
    })?;

    inventory.validate_plan(&plan)?;
    tracing::debug!(steps = plan.steps.len(), "plan accepted");
    Ok(plan)
}

/// System prompt for the planner stage
const PLANNER_SYSTEM_PROMPT: &str = r#"You are a high-level task planner for a robot arm.
You DO NOT output robot coordinates or joint angles.
You ONLY output a symbolic task plan in JSON.

The workspace:
- One box on a table: object "box", location "table"
- One bin: "bin_a"
- The robot has a "home" position.

Valid steps in the plan:
- {"step":"pick","object":"box","from":"table"}
- {"step":"place","object":"box","to":"bin_a"}
- {"step":"go_home"}

Output format (always):
{
  "task_plan": [
    { ...step 1... },
    { ...step 2... }
  ]
}

Examples:
User: "Pick the box and put it in bin A, then go home"
Plan:
{"task_plan":[{"step":"pick","object":"box","from":"table"},{"step":"place","object":"box","to":"bin_a"},{"step":"go_home"}]}

User: "Just go home"
Plan:
{"task_plan":[{"step":"go_home"}]}

User: "Move the box to the bin"
Plan:
{"task_plan":[{"step":"pick","object":"box","from":"table"},{"step":"place","object":"box","to":"bin_a"}]}

Rules:
- Always respond with a SINGLE JSON object.
- The top-level key MUST be "task_plan".
- Use only the allowed fields: step, object, from, to.
- Do NOT include any explanation, comments, or markdown. JSON only.
"#;
