//! Chat and code-generation transports.
//!
//! Talks to the upstream model (OpenAI or Anthropic) and turns its
//! output into typed replies: chat responses with a code-generation
//! hint, file artifacts extracted from prose, canned team discussions,
//! and document analysis. Model failures never escape the endpoint
//! handlers; callers always get a usable reply.

pub mod api;
pub mod codegen;
pub mod error;
pub mod extract;
pub mod history;
pub mod llm;
pub mod team;

pub use api::{
    analyze_docs, chat, generate, ChatReply, ChatRequest, DocAnalysis, GenerateReply,
    GenerateRequest, FALLBACK_REPLY,
};
pub use codegen::CodeGenerator;
pub use error::{ChatError, ChatResult};
pub use extract::{Extraction, FileSpec};
pub use history::{HistoryStore, Turn, TurnRole};
pub use llm::{LlmAdapter, LlmProvider, TextCompletion};
pub use team::{discussion_reply, follow_up, team_discussion, TeamRole};
