//! Endpoint handlers.
//!
//! These are transport-agnostic request/reply functions: a CLI or an
//! HTTP surface calls them with decoded payloads. Model failures stay
//! inside this layer; every handler answers with a usable reply.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crew_core::FileArtifact;

use crate::codegen::CodeGenerator;
use crate::history::{HistoryStore, Turn, TurnRole};
use crate::llm::TextCompletion;

/// Reply used whenever the model cannot be reached
pub const FALLBACK_REPLY: &str = "I'm ready to help you build. Describe your app idea.";

/// Incoming chat request
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub history: Vec<Turn>,
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

/// Chat reply with the code-generation hint for the caller's UI
#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub response: String,
    #[serde(rename = "canGenerateCode")]
    pub can_generate_code: bool,
}

/// True when the message reads like a request to build something
pub fn wants_code_generation(input: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"(?i)(build|create|make|generate|app|website|code)").expect("valid pattern")
    });
    re.is_match(input)
}

fn chat_prompt(message: &str, history: &[Turn]) -> String {
    let mut rendered = String::new();
    for turn in history {
        let role = match turn.role {
            TurnRole::User => "user",
            TurnRole::Assistant => "assistant",
        };
        rendered.push_str(role);
        rendered.push_str(": ");
        rendered.push_str(&turn.content);
        rendered.push('\n');
    }

    format!(
        "You are an expert full-stack developer AI assistant.\n\n\
         Conversation history:\n{rendered}\n\
         User: {message}\n\n\
         Respond as a senior developer. Be specific about:\n\
         1. Technical approach\n\
         2. Recommended stack (Next.js 14, TypeScript, Tailwind)\n\
         3. Architecture considerations\n\
         4. Next steps\n\n\
         Keep response concise but helpful. If user wants to build something, \
         offer to generate code."
    )
}

/// Answer a chat message.
///
/// Stored history for the user (when a user id is present) is merged
/// ahead of any turns carried on the request, trimmed to the trailing
/// window. On success both sides of the exchange are recorded; on
/// failure nothing is recorded and the fallback reply goes out.
pub async fn chat(
    llm: &dyn TextCompletion,
    history: &mut HistoryStore,
    req: &ChatRequest,
) -> ChatReply {
    let mut turns: Vec<Turn> = match &req.user_id {
        Some(user) => history.recent(user),
        None => Vec::new(),
    };
    turns.extend(req.history.iter().cloned());
    let window = turns.len().saturating_sub(20);
    let turns = &turns[window..];

    match llm.complete(&chat_prompt(&req.message, turns)).await {
        Ok(response) => {
            if let Some(user) = &req.user_id {
                history.record(user, Turn::user(&req.message));
                history.record(user, Turn::assistant(&response));
            }
            ChatReply {
                can_generate_code: wants_code_generation(&req.message),
                response,
            }
        }
        Err(e) => {
            warn!(error = %e, "chat completion failed, sending fallback reply");
            ChatReply {
                response: FALLBACK_REPLY.to_string(),
                can_generate_code: false,
            }
        }
    }
}

/// Incoming code-generation request
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    pub description: String,
    #[serde(rename = "uploadedDocs", default)]
    pub uploaded_docs: Vec<String>,
}

/// Generated file set plus a short analysis line
#[derive(Debug, Clone, Serialize)]
pub struct GenerateReply {
    pub files: Vec<FileArtifact>,
    pub analysis: String,
}

/// Generate project files for a description
pub async fn generate(llm: &dyn TextCompletion, req: &GenerateRequest) -> GenerateReply {
    let files = CodeGenerator::new(llm)
        .generate(&req.description, &req.uploaded_docs)
        .await;
    let analysis = format!("Generated {} file(s) for your application.", files.len());
    GenerateReply { files, analysis }
}

/// Canned documentation analysis
#[derive(Debug, Clone, Serialize)]
pub struct DocAnalysis {
    pub analysis: String,
    pub questions: Vec<String>,
}

/// Analyze uploaded project documents.
///
/// The analysis itself is canned; only the document names feed into
/// the reply.
pub fn analyze_docs(names: &[String]) -> DocAnalysis {
    let listed = if names.is_empty() {
        "your project documentation".to_string()
    } else {
        names.join(", ")
    };

    DocAnalysis {
        analysis: format!(
            "AI has analyzed {listed}.\n\n\
             Recommended Tech Stack:\n\
             \u{2022} Next.js 14 (App Router)\n\
             \u{2022} TypeScript\n\
             \u{2022} Tailwind CSS\n\
             \u{2022} PostgreSQL/Supabase\n\
             \u{2022} Vercel for deployment\n\n\
             Key Components Needed:\n\
             1. Authentication system\n\
             2. Main dashboard\n\
             3. API routes for data\n\
             4. Database schema\n\n\
             Estimated Development Time: 2-3 days (AI-assisted)"
        ),
        questions: vec![
            "Do you need user authentication?".to_string(),
            "What is your preferred database?".to_string(),
            "Any specific design system?".to_string(),
        ],
    }
}
