//! Export formatting for generated files.
//!
//! Produces the copy-to-clipboard payload: each file prefixed with a
//! `// <path>` header comment so the user can paste the whole batch
//! into a repository and split it back up.

use crate::types::FileArtifact;

/// Render a single artifact with its path header
pub fn export_file(file: &FileArtifact) -> String {
    format!("// {}\n{}\n", file.path, file.content)
}

/// Render all artifacts as one concatenated, blank-line separated blob
pub fn export_all(files: &[FileArtifact]) -> String {
    files
        .iter()
        .map(export_file)
        .collect::<Vec<_>>()
        .join("\n")
}
