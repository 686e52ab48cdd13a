//! The simulated build pipeline.
//!
//! A tagged state machine driving `Idle → Analyzing → Planning →
//! Coding → Ready`, emitting ordered, timestamped log entries per
//! stage, separated by fixed pacing delays taken from the injected
//! [`Clock`]. A parallel `Debugging` path can be entered from any
//! stage and is scripted to always resolve to `Ready`; there is no
//! failed-terminal state. `reset` is the only way back to `Idle` and
//! clears both the log and the file list.

use std::time::Duration;

use crew_core::{dedup_paths, BuildLogEntry, BuildStage, FileArtifact, LogLevel};
use tracing::debug;

use crate::clock::Clock;
use crate::error::{BuildError, BuildResult};
use crate::source::ArtifactSource;

/// One scripted log line: pacing delay, severity, message
struct Step {
    delay_ms: u64,
    level: LogLevel,
    message: &'static str,
}

const fn step(delay_ms: u64, level: LogLevel, message: &'static str) -> Step {
    Step {
        delay_ms,
        level,
        message,
    }
}

const ANALYZING_SCRIPT: &[Step] = &[
    step(0, LogLevel::Info, "AI team assembling..."),
    step(1000, LogLevel::Info, "Reading project brief..."),
    step(1500, LogLevel::Success, "Requirements understood by the team"),
];

const PLANNING_SCRIPT: &[Step] = &[
    step(0, LogLevel::Info, "Technical Lead: drafting architecture..."),
    step(1200, LogLevel::Info, "Product Designer: wireframing screens..."),
    step(1000, LogLevel::Info, "Frontend: component structure..."),
    step(800, LogLevel::Info, "Backend: API design and data model..."),
    step(1000, LogLevel::Success, "Complete technical plan ready"),
];

const CODING_SCRIPT: &[Step] = &[step(0, LogLevel::Info, "Generating application scaffold...")];

const DEBUGGING_SCRIPT: &[Step] = &[
    step(0, LogLevel::Error, "Build failed: module parse error"),
    step(0, LogLevel::Warning, "Type errors reported in app/page.tsx"),
    step(0, LogLevel::Info, "Debugging: checking imports..."),
    step(1000, LogLevel::Info, "Debugging: fixing compiler configuration..."),
    step(800, LogLevel::Success, "Fixed: added missing type definitions"),
    step(0, LogLevel::Info, "Retrying build..."),
];

/// State machine for the simulated multi-phase build
pub struct BuildMachine<C: Clock> {
    clock: C,
    stage: BuildStage,
    logs: Vec<BuildLogEntry>,
    files: Vec<FileArtifact>,
}

impl<C: Clock> BuildMachine<C> {
    /// Create an idle machine with the given time source
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            stage: BuildStage::Idle,
            logs: Vec::new(),
            files: Vec::new(),
        }
    }

    /// Current pipeline stage
    pub fn stage(&self) -> BuildStage {
        self.stage
    }

    /// Build log for the current run, in emission order
    pub fn logs(&self) -> &[BuildLogEntry] {
        &self.logs
    }

    /// Generated artifacts; complete once the stage is `Ready`
    pub fn files(&self) -> &[FileArtifact] {
        &self.files
    }

    /// Coarse progress indicator for the current stage (0-100)
    pub fn progress_percent(&self) -> u8 {
        match self.stage {
            BuildStage::Idle => 0,
            BuildStage::Analyzing => 25,
            BuildStage::Planning => 50,
            BuildStage::Coding => 75,
            BuildStage::Debugging | BuildStage::Ready => 100,
        }
    }

    fn enter(&mut self, stage: BuildStage) {
        debug!(from = ?self.stage, to = ?stage, "build stage transition");
        self.stage = stage;
    }

    fn push(&mut self, level: LogLevel, message: impl Into<String>, stage: BuildStage) {
        self.logs
            .push(BuildLogEntry::new(level, message, stage).at(self.clock.now()));
    }

    async fn play(&mut self, stage: BuildStage, script: &[Step]) {
        for step in script {
            if step.delay_ms > 0 {
                self.clock.pause(Duration::from_millis(step.delay_ms)).await;
            }
            self.push(step.level, step.message, stage);
        }
    }

    /// Drive a full build: `Analyzing → Planning → Coding → Ready`.
    ///
    /// Only an idle machine can start. The artifact set comes from the
    /// given source once the `Coding` stage is reached; duplicate paths
    /// within the batch are dropped, first occurrence winning.
    pub async fn run(
        &mut self,
        description: &str,
        source: &dyn ArtifactSource,
    ) -> BuildResult<()> {
        if self.stage != BuildStage::Idle {
            return Err(BuildError::AlreadyRunning(self.stage));
        }

        self.logs.clear();
        self.files.clear();

        self.enter(BuildStage::Analyzing);
        self.play(BuildStage::Analyzing, ANALYZING_SCRIPT).await;

        self.enter(BuildStage::Planning);
        self.play(BuildStage::Planning, PLANNING_SCRIPT).await;

        self.enter(BuildStage::Coding);
        self.play(BuildStage::Coding, CODING_SCRIPT).await;
        self.files = dedup_paths(source.produce(description).await);
        self.clock.pause(Duration::from_millis(2000)).await;
        self.push(
            LogLevel::Success,
            format!("Generated {} file(s)", self.files.len()),
            BuildStage::Coding,
        );

        self.enter(BuildStage::Ready);
        self.push(
            LogLevel::Success,
            "Project ready. Copy the files into your repository.",
            BuildStage::Ready,
        );

        Ok(())
    }

    /// Enter the scripted debugging path, valid from any stage.
    ///
    /// The path always resolves: after the fix sequence the machine is
    /// `Ready`, keeping whatever artifacts the run had produced.
    pub async fn simulate_failure(&mut self) {
        self.enter(BuildStage::Debugging);
        self.play(BuildStage::Debugging, DEBUGGING_SCRIPT).await;

        self.clock.pause(Duration::from_millis(1200)).await;
        self.enter(BuildStage::Ready);
        self.push(LogLevel::Success, "Build successful", BuildStage::Ready);
    }

    /// Return to `Idle`, clearing the log and the file list
    pub fn reset(&mut self) {
        self.enter(BuildStage::Idle);
        self.logs.clear();
        self.files.clear();
    }
}
