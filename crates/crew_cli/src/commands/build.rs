//! Build command - Run the staged build pipeline.

use anyhow::Result;
use clap::Args;
use tracing::info;

use crew_builder::{BuildMachine, Clock, ManualClock, ScaffoldSource, SystemClock};
use crew_chat::{CodeGenerator, LlmAdapter};
use crew_core::{export_all, LogLevel};

#[derive(Args)]
pub struct BuildArgs {
    /// Description of the application to build
    description: String,

    /// Skip the pacing delays between stages
    #[arg(long)]
    fast: bool,

    /// Replay the failure-and-recovery script after the build
    #[arg(long)]
    with_failure: bool,

    /// Use the canned scaffold even when an LLM is configured
    #[arg(long)]
    scaffold: bool,

    /// Print the full content of every generated file
    #[arg(long)]
    show_files: bool,
}

pub async fn execute(args: BuildArgs) -> Result<()> {
    if args.fast {
        drive(BuildMachine::new(ManualClock::new()), &args).await
    } else {
        drive(BuildMachine::new(SystemClock), &args).await
    }
}

async fn drive<C: Clock>(mut machine: BuildMachine<C>, args: &BuildArgs) -> Result<()> {
    // Prefer real generation; the scaffold covers the unconfigured case.
    let llm = if args.scaffold {
        None
    } else {
        LlmAdapter::from_env().ok()
    };

    println!("🏗️  Building: \"{}\"", args.description);
    match &llm {
        Some(adapter) => {
            info!(model = adapter.model(), "building with generated files");
            let source = CodeGenerator::new(adapter);
            machine.run(&args.description, &source).await?;
        }
        None => {
            info!("building with the canned scaffold");
            machine.run(&args.description, &ScaffoldSource).await?;
        }
    }

    if args.with_failure {
        machine.simulate_failure().await;
    }

    for entry in machine.logs() {
        let icon = match entry.level {
            LogLevel::Info => "ℹ️ ",
            LogLevel::Error => "❌",
            LogLevel::Warning => "⚠️ ",
            LogLevel::Success => "✅",
        };
        println!("{} [{}] {}", icon, entry.stage.label(), entry.message);
    }

    println!();
    println!(
        "Stage: {} ({}%), {} file(s)",
        machine.stage().label(),
        machine.progress_percent(),
        machine.files().len()
    );

    if args.show_files {
        println!();
        println!("{}", export_all(machine.files()));
    } else {
        for file in machine.files() {
            println!("   {} ({})", file.path, file.language);
        }
    }

    Ok(())
}
