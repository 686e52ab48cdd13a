//! CLI command definitions.
//!
//! Each subcommand maps to one endpoint of the simulated development
//! crew: chatting with the assistant, a team discussion round, direct
//! code generation, the build pipeline, and saved-session management.

use clap::{Parser, Subcommand};
use crew_core::Message;

pub mod build;
pub mod chat;
pub mod generate;
pub mod sessions;
pub mod team;

/// CrewForge - your AI development crew in a terminal
#[derive(Parser)]
#[command(name = "crewforge")]
#[command(version, about = "CrewForge - your AI development crew in a terminal")]
#[command(long_about = r#"
CrewForge simulates a small AI development team: chat with an assistant
about your app idea, hear every team role weigh in, generate project
files through an LLM, and watch a scripted build pipeline run.

WORKFLOWS:
  chat       → Ask the assistant; replies hint when code generation applies
  team       → One discussion round, every role answers
  generate   → Turn a description into project files
  build      → Run the staged build pipeline for a description
  sessions   → List, show, or delete saved chat sessions

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments
  3 - LLM not configured
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Seed message every stored session starts from and resets to
pub(crate) fn welcome_message() -> Message {
    Message::ai("Welcome! Describe the app you want to build.")
}

#[derive(Subcommand)]
pub enum Commands {
    /// Chat with the assistant
    Chat(chat::ChatArgs),

    /// Run a team discussion round on a request
    Team(team::TeamArgs),

    /// Generate project files from a description
    Generate(generate::GenerateArgs),

    /// Run the build pipeline for a description
    Build(build::BuildArgs),

    /// Manage saved chat sessions
    Sessions(sessions::SessionsArgs),
}
