//! Error types for the build pipeline.

use crew_core::BuildStage;
use thiserror::Error;

/// Result type alias for build operations.
pub type BuildResult<T> = Result<T, BuildError>;

/// Errors that can occur driving the build pipeline.
///
/// The pipeline itself is non-failing by construction; the only error
/// is asking it to start while a run is already in progress.
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Build already in progress (stage: {0:?}); reset first")]
    AlreadyRunning(BuildStage),
}
