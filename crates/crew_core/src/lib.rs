//! # crew_core - Core data model for CrewForge
//!
//! Shared building blocks for the simulated AI development crew:
//!
//! - **Types**: messages, file artifacts, build stages and log entries
//! - **Transcript**: the append-only conversation log with seeded reset
//! - **Store**: string-keyed JSON persistence with tolerant loading
//! - **Export**: copy-to-clipboard formatting for generated files

pub mod error;
pub mod export;
pub mod store;
pub mod transcript;
pub mod types;

pub use error::*;
pub use export::*;
pub use store::*;
pub use transcript::*;
pub use types::*;
