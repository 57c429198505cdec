//! Arm Pilot - Entry Point
//!
//! Each pipeline stage is independently invocable: `plan` runs the planner
//! only, `translate` the deterministic table only, `simulate` stops after
//! translation, `run` drives the full pipeline, and `do` takes the direct
//! single-action path. With no vendor SDK linked in, `run` and `do` drive
//! the in-process simulated arm.

use arm_pilot::actuator::SimulatedArm;
use arm_pilot::core::config::PipelineConfig;
use arm_pilot::core::error::{ArmError, Result};
use arm_pilot::llm::planner::TaskStep;
use arm_pilot::llm::LlmClient;
use arm_pilot::pipeline::Pipeline;
use arm_pilot::translate::TranslationTable;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "arm-pilot", about = "Natural-language to robot-arm motion pipeline")]
struct Cli {
    /// Pose store location
    #[arg(long, default_value = "data/poses.json")]
    pose_file: PathBuf,

    /// Robot controller address
    #[arg(long)]
    robot: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the full pipeline against the simulated arm
    Run {
        #[arg(required = true)]
        instruction: Vec<String>,
    },
    /// Plan and translate, then print the action sequence (no motion)
    Simulate {
        #[arg(required = true)]
        instruction: Vec<String>,
    },
    /// Run the planner stage only and print the symbolic plan
    Plan {
        #[arg(required = true)]
        instruction: Vec<String>,
    },
    /// Run the translator stage only on one JSON task step
    Translate {
        /// Task step as JSON, e.g. '{"step":"pick","object":"box","from":"table"}'
        step: String,
    },
    /// Map a short command to a single action and execute it
    Do {
        #[arg(required = true)]
        instruction: Vec<String>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("arm_pilot=info")),
        )
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = PipelineConfig::default();
    config.pose_file = cli.pose_file;
    if let Some(robot) = cli.robot {
        config.robot_address = robot;
    }

    // The translator stage is a pure table lookup; no LLM client needed.
    if let Command::Translate { step } = &cli.command {
        let step: TaskStep = serde_json::from_str(step)
            .map_err(|e| ArmError::Translation(format!("invalid task step: {}", e)))?;
        let table = TranslationTable::default_workspace(config.defaults);
        let action = table.translate(&step)?;
        println!("{}", serde_json::to_string_pretty(&action)?);
        return Ok(());
    }

    let rt = Runtime::new()?;
    let client = LlmClient::from_env()?;
    tracing::info!(model = client.model(), "LLM client ready");
    let pipeline = Pipeline::new(client, config)?;

    match cli.command {
        Command::Run { instruction } => {
            let text = instruction.join(" ");
            let mut arm = SimulatedArm::new();
            let report = rt.block_on(pipeline.run(&mut arm, &text))?;
            print!("{}", report.render());
            if let Some((index, why)) = report.failure() {
                eprintln!("pipeline halted at step {}: {}", index + 1, why);
                std::process::exit(1);
            }
        }
        Command::Simulate { instruction } => {
            let text = instruction.join(" ");
            let report = rt.block_on(pipeline.simulate(&text))?;
            print!("{}", report.render());
            if report.failure().is_some() {
                std::process::exit(1);
            }
        }
        Command::Plan { instruction } => {
            let text = instruction.join(" ");
            let plan = rt.block_on(pipeline.plan(&text))?;
            println!("{}", serde_json::to_string_pretty(&plan)?);
            for (i, step) in plan.steps.iter().enumerate() {
                println!("Step {}: {}", i + 1, step.describe());
            }
        }
        Command::Do { instruction } => {
            let text = instruction.join(" ");
            let action = rt.block_on(pipeline.direct(&text))?;
            println!("{}", serde_json::to_string_pretty(&action)?);
            let mut arm = SimulatedArm::new();
            pipeline.execute_action(&mut arm, &action)?;
            tracing::info!(calls = arm.motion_calls().len(), "action executed");
        }
        Command::Translate { .. } => unreachable!("handled above"),
    }

    Ok(())
}
