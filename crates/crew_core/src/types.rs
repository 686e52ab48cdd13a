//! Core types shared across the CrewForge workspace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who authored a message: the user, the assembled AI crew, or a
/// named team member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Sender {
    User,
    Ai,
    /// A named team-member persona, e.g. "Technical Lead".
    Member(String),
}

impl From<String> for Sender {
    fn from(s: String) -> Self {
        match s.as_str() {
            "user" => Self::User,
            "ai" => Self::Ai,
            _ => Self::Member(s),
        }
    }
}

impl From<Sender> for String {
    fn from(sender: Sender) -> Self {
        match sender {
            Sender::User => "user".to_string(),
            Sender::Ai => "ai".to_string(),
            Sender::Member(name) => name,
        }
    }
}

/// A single conversation message
///
/// Messages are immutable once appended to a transcript; a correction
/// is a new message, never an edit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Unique message ID (UUID)
    pub id: String,
    /// Who sent the message
    pub sender: Sender,
    /// Message text
    pub text: String,
    /// When the message was created
    pub timestamp: DateTime<Utc>,
    /// File artifacts attached to this message (generated code)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<FileArtifact>,
}

impl Message {
    fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            sender,
            text: text.into(),
            timestamp: Utc::now(),
            files: Vec::new(),
        }
    }

    /// Create a new user message
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text)
    }

    /// Create a new AI message
    pub fn ai(text: impl Into<String>) -> Self {
        Self::new(Sender::Ai, text)
    }

    /// Create a message from a named team member
    pub fn member(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(Sender::Member(name.into()), text)
    }

    /// Attach file artifacts to this message
    pub fn with_files(mut self, files: Vec<FileArtifact>) -> Self {
        self.files = files;
        self
    }
}

/// Lifecycle status of a file artifact
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactStatus {
    Generated,
    Modified,
    Failed,
}

/// One generated source file: a relative forward-slash path plus raw
/// text content. Artifacts are never partially mutated; a fix produces
/// a new artifact with the same path and status `Modified`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileArtifact {
    /// Path relative to the generated project root
    pub path: String,
    /// Raw file content
    pub content: String,
    /// Language tag inferred from the path extension
    pub language: String,
    /// Artifact status
    pub status: ArtifactStatus,
}

impl FileArtifact {
    /// Create a freshly generated artifact, inferring the language tag
    pub fn generated(path: impl Into<String>, content: impl Into<String>) -> Self {
        let path = path.into();
        let language = language_for(&path).to_string();
        Self {
            path,
            content: content.into(),
            language,
            status: ArtifactStatus::Generated,
        }
    }

    /// Create a fixed-up replacement for an existing artifact
    pub fn modified(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            status: ArtifactStatus::Modified,
            ..Self::generated(path, content)
        }
    }
}

/// Infer a language tag from a file path extension
pub fn language_for(path: &str) -> &'static str {
    match path.rsplit('.').next() {
        Some("ts" | "tsx") => "typescript",
        Some("js" | "jsx") => "javascript",
        Some("css") => "css",
        Some("html") => "html",
        Some("json") => "json",
        Some("md") => "markdown",
        Some("rs") => "rust",
        _ => "other",
    }
}

/// Drop artifacts whose path already appeared earlier in the batch.
/// Paths are unique within one generation batch; the first wins.
pub fn dedup_paths(files: Vec<FileArtifact>) -> Vec<FileArtifact> {
    let mut seen = std::collections::HashSet::new();
    files
        .into_iter()
        .filter(|f| seen.insert(f.path.clone()))
        .collect()
}

/// Severity of a build log entry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Error,
    Warning,
    Success,
}

/// Stage of the simulated build pipeline
///
/// A single process-wide value per machine. `Idle` is the only
/// re-entrant initial state; `Debugging` can be entered from any stage
/// and always resolves to `Ready`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BuildStage {
    Idle,
    Analyzing,
    Planning,
    Coding,
    Debugging,
    Ready,
}

impl Default for BuildStage {
    fn default() -> Self {
        Self::Idle
    }
}

impl BuildStage {
    /// Human-readable label for the stage
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "Ready to Build",
            Self::Analyzing => "Reading Requirements",
            Self::Planning => "Team Planning",
            Self::Coding => "Generating Code",
            Self::Debugging => "Debugging Build",
            Self::Ready => "Build Complete",
        }
    }
}

/// A timestamped entry in the build log, tagged with the stage that
/// emitted it. Append-only per run; cleared only by explicit reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildLogEntry {
    /// Unique entry ID (UUID)
    pub id: String,
    /// Entry severity
    pub level: LogLevel,
    /// Human-readable message
    pub message: String,
    /// When the entry was emitted
    pub timestamp: DateTime<Utc>,
    /// Stage the entry belongs to
    pub stage: BuildStage,
}

impl BuildLogEntry {
    /// Create a new log entry stamped with the current wall clock
    pub fn new(level: LogLevel, message: impl Into<String>, stage: BuildStage) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            level,
            message: message.into(),
            timestamp: Utc::now(),
            stage,
        }
    }

    /// Override the timestamp (used with an injected clock)
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Create an info entry
    pub fn info(message: impl Into<String>, stage: BuildStage) -> Self {
        Self::new(LogLevel::Info, message, stage)
    }

    /// Create an error entry
    pub fn error(message: impl Into<String>, stage: BuildStage) -> Self {
        Self::new(LogLevel::Error, message, stage)
    }

    /// Create a warning entry
    pub fn warning(message: impl Into<String>, stage: BuildStage) -> Self {
        Self::new(LogLevel::Warning, message, stage)
    }

    /// Create a success entry
    pub fn success(message: impl Into<String>, stage: BuildStage) -> Self {
        Self::new(LogLevel::Success, message, stage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_creation() {
        let msg = Message::user("Hello");
        assert_eq!(msg.sender, Sender::User);
        assert_eq!(msg.text, "Hello");
        assert!(msg.files.is_empty());

        let msg = Message::member("Technical Lead", "On it.");
        assert_eq!(msg.sender, Sender::Member("Technical Lead".to_string()));
    }

    #[test]
    fn test_sender_roundtrip() {
        let json = serde_json::to_string(&Sender::User).unwrap();
        assert_eq!(json, "\"user\"");

        let sender: Sender = serde_json::from_str("\"Backend Dev\"").unwrap();
        assert_eq!(sender, Sender::Member("Backend Dev".to_string()));
    }

    #[test]
    fn test_language_inference() {
        assert_eq!(language_for("app/page.tsx"), "typescript");
        assert_eq!(language_for("lib/util.js"), "javascript");
        assert_eq!(language_for("styles/globals.css"), "css");
        assert_eq!(language_for("README"), "other");
    }

    #[test]
    fn test_dedup_keeps_first() {
        let files = vec![
            FileArtifact::generated("app/page.tsx", "first"),
            FileArtifact::generated("app/layout.tsx", "layout"),
            FileArtifact::generated("app/page.tsx", "second"),
        ];
        let deduped = dedup_paths(files);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].content, "first");
    }

    #[test]
    fn test_modified_artifact() {
        let fix = FileArtifact::modified("app/page.tsx", "fixed");
        assert_eq!(fix.status, ArtifactStatus::Modified);
        assert_eq!(fix.language, "typescript");
    }

    #[test]
    fn test_log_entry_levels() {
        let entry = BuildLogEntry::error("boom", BuildStage::Debugging);
        assert_eq!(entry.level, LogLevel::Error);
        assert_eq!(entry.stage, BuildStage::Debugging);
    }
}
