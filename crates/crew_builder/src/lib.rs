//! # crew_builder - Simulated build pipeline for CrewForge
//!
//! Drives the "AI builds your app" progression as an explicit state
//! machine instead of scattered timers:
//!
//! - [`BuildMachine`]: `Idle → Analyzing → Planning → Coding → Ready`,
//!   plus a `Debugging` path that always resolves
//! - [`Clock`]: injectable time source; [`ManualClock`] fast-forwards
//!   the pacing delays for tests
//! - [`ArtifactSource`]: the seam that produces the output file set
//!   ([`ScaffoldSource`] fabricates a fixed starter scaffold; the chat
//!   crate plugs real code generation into the same seam)

pub mod clock;
pub mod error;
pub mod machine;
pub mod source;

pub use clock::*;
pub use error::*;
pub use machine::*;
pub use source::*;
