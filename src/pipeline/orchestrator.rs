//! Pipeline orchestration
//!
//! Sequences planner, translator, and executor for one instruction at a
//! time: Planner -> (Translator per step) -> (Executor per action). The
//! first stage failure halts the remaining pipeline; the report records
//! every step's outcome and which one failed. Simulation mode stops after
//! translation and only renders the action sequence.

use crate::actuator::Actuator;
use crate::core::config::PipelineConfig;
use crate::core::error::Result;
use crate::core::types::Action;
use crate::exec::ActionExecutor;
use crate::llm::commander::direct_command;
use crate::llm::planner::plan_instruction;
use crate::llm::{LlmClient, Plan, TaskStep, WorkspaceInventory};
use crate::poses::PoseLibrary;
use crate::translate::TranslationTable;
use serde::Serialize;

/// Outcome of one step of a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Executed,
    Simulated,
    Failed(String),
}

/// One step of the plan with its translation and outcome.
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub index: usize,
    pub step: TaskStep,
    pub action: Option<Action>,
    pub status: StepStatus,
}

/// Per-instruction execution report.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionReport {
    pub instruction: String,
    pub steps: Vec<StepReport>,
}

impl ExecutionReport {
    /// The first failed step, if any: (index, reason).
    pub fn failure(&self) -> Option<(usize, &str)> {
        self.steps.iter().find_map(|s| match &s.status {
            StepStatus::Failed(why) => Some((s.index, why.as_str())),
            _ => None,
        })
    }

    pub fn succeeded(&self) -> bool {
        self.failure().is_none()
    }

    /// Human-readable rendering of the report.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Instruction: {}\n", self.instruction));
        for s in &self.steps {
            out.push_str(&format!("  Step {}: {}\n", s.index + 1, s.step.describe()));
            if let Some(action) = &s.action {
                out.push_str(&format!("    -> {}\n", describe_action(action)));
            }
            match &s.status {
                StepStatus::Executed => out.push_str("    status: executed\n"),
                StepStatus::Simulated => out.push_str("    status: simulated (no robot moved)\n"),
                StepStatus::Failed(why) => out.push_str(&format!("    status: FAILED: {}\n", why)),
            }
        }
        out
    }
}

fn describe_action(action: &Action) -> String {
    match action {
        Action::GoHome { target, speed, acc, .. } => {
            format!("GO HOME via '{}' (speed {}, acc {})", target, speed, acc)
        }
        Action::GoPose { target, speed, acc } => {
            format!("GO POSE '{}' (speed {}, acc {})", target, speed, acc)
        }
        Action::JointMove {
            joint,
            delta,
            speed,
            acc,
        } => format!(
            "JOINT MOVE joint {} by {} (speed {}, acc {})",
            joint, delta, speed, acc
        ),
        Action::Pick {
            approach,
            pick,
            retreat,
            speed,
            acc,
        } => format!(
            "PICK approach '{}' pick '{}' retreat '{}' (speed {}, acc {})",
            approach, pick, retreat, speed, acc
        ),
        Action::Place {
            approach,
            drop,
            retreat,
            speed,
            acc,
        } => format!(
            "PLACE approach '{}' drop '{}' retreat '{}' (speed {}, acc {})",
            approach, drop, retreat, speed, acc
        ),
    }
}

/// The assembled pipeline. Processes exactly one instruction at a time.
pub struct Pipeline {
    client: LlmClient,
    config: PipelineConfig,
    library: PoseLibrary,
    table: TranslationTable,
    inventory: WorkspaceInventory,
}

impl Pipeline {
    /// Assemble the pipeline: validate the config and load the pose store.
    pub fn new(client: LlmClient, config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        let library = PoseLibrary::load(&config.pose_file)?;
        tracing::info!(poses = library.len(), "pose library loaded");
        let table = TranslationTable::default_workspace(config.defaults);
        Ok(Self {
            client,
            config,
            library,
            table,
            inventory: WorkspaceInventory::default(),
        })
    }

    /// Build a pipeline from already-loaded components. Used by tests and
    /// callers with non-default workspaces.
    pub fn with_components(
        client: LlmClient,
        config: PipelineConfig,
        library: PoseLibrary,
        table: TranslationTable,
        inventory: WorkspaceInventory,
    ) -> Self {
        Self {
            client,
            config,
            library,
            table,
            inventory,
        }
    }

    /// Planner stage only.
    pub async fn plan(&self, instruction: &str) -> Result<Plan> {
        plan_instruction(&self.client, instruction, &self.inventory).await
    }

    /// Direct commander stage only.
    pub async fn direct(&self, command: &str) -> Result<Action> {
        direct_command(&self.client, command).await
    }

    /// Full pipeline: plan, translate, execute.
    pub async fn run<A: Actuator>(
        &self,
        arm: &mut A,
        instruction: &str,
    ) -> Result<ExecutionReport> {
        let plan = self.plan(instruction).await?;
        Ok(self.execute_plan(arm, instruction, &plan))
    }

    /// Dry run: plan and translate, render without touching the executor.
    pub async fn simulate(&self, instruction: &str) -> Result<ExecutionReport> {
        let plan = self.plan(instruction).await?;
        Ok(self.translate_plan(instruction, &plan))
    }

    /// Translate and execute an already-validated plan, halting on the
    /// first failure.
    pub fn execute_plan<A: Actuator>(
        &self,
        arm: &mut A,
        instruction: &str,
        plan: &Plan,
    ) -> ExecutionReport {
        let executor = ActionExecutor::new(&self.library, &self.config);
        let mut steps = Vec::with_capacity(plan.steps.len());

        for (index, step) in plan.steps.iter().enumerate() {
            let action = match self.table.translate(step) {
                Ok(action) => action,
                Err(e) => {
                    tracing::warn!(index, error = %e, "translation failed, halting");
                    steps.push(StepReport {
                        index,
                        step: step.clone(),
                        action: None,
                        status: StepStatus::Failed(e.to_string()),
                    });
                    break;
                }
            };

            match executor.execute(arm, &action) {
                Ok(()) => {
                    tracing::info!(index, "step executed");
                    steps.push(StepReport {
                        index,
                        step: step.clone(),
                        action: Some(action),
                        status: StepStatus::Executed,
                    });
                }
                Err(e) => {
                    tracing::warn!(index, error = %e, "execution failed, halting");
                    steps.push(StepReport {
                        index,
                        step: step.clone(),
                        action: Some(action),
                        status: StepStatus::Failed(e.to_string()),
                    });
                    break;
                }
            }
        }

        ExecutionReport {
            instruction: instruction.to_string(),
            steps,
        }
    }

    /// Translate a plan without executing anything.
    pub fn translate_plan(&self, instruction: &str, plan: &Plan) -> ExecutionReport {
        let mut steps = Vec::with_capacity(plan.steps.len());

        for (index, step) in plan.steps.iter().enumerate() {
            match self.table.translate(step) {
                Ok(action) => steps.push(StepReport {
                    index,
                    step: step.clone(),
                    action: Some(action),
                    status: StepStatus::Simulated,
                }),
                Err(e) => {
                    steps.push(StepReport {
                        index,
                        step: step.clone(),
                        action: None,
                        status: StepStatus::Failed(e.to_string()),
                    });
                    break;
                }
            }
        }

        ExecutionReport {
            instruction: instruction.to_string(),
            steps,
        }
    }

    /// Execute one already-translated action.
    pub fn execute_action<A: Actuator>(&self, arm: &mut A, action: &Action) -> Result<()> {
        ActionExecutor::new(&self.library, &self.config).execute(arm, action)
    }

    pub fn library(&self) -> &PoseLibrary {
        &self.library
    }
}
