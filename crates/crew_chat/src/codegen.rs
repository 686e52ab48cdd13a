//! Code generation through the model.
//!
//! Asks the upstream model for a JSON array of file descriptors and
//! turns it into artifacts. Generation never fails: when the model is
//! unreachable or its output cannot be read as files, a single
//! placeholder artifact stands in so the rest of the pipeline keeps
//! moving.

use async_trait::async_trait;
use tracing::warn;

use crew_builder::ArtifactSource;
use crew_core::{dedup_paths, FileArtifact};

use crate::extract::{self, Extraction};
use crate::llm::TextCompletion;

/// Generates project files from a natural-language description
pub struct CodeGenerator<'a> {
    llm: &'a dyn TextCompletion,
}

impl<'a> CodeGenerator<'a> {
    pub fn new(llm: &'a dyn TextCompletion) -> Self {
        Self { llm }
    }

    /// Build the generation prompt, folding in any uploaded docs
    fn prompt(description: &str, docs: &[String]) -> String {
        let mut prompt = format!(
            "You are an expert full-stack developer. Generate the source files \
             for the following application:\n\n{description}\n\n"
        );

        if !docs.is_empty() {
            prompt.push_str("Reference documents provided by the user:\n");
            for doc in docs {
                prompt.push_str("- ");
                prompt.push_str(doc);
                prompt.push('\n');
            }
            prompt.push('\n');
        }

        prompt.push_str(
            "Respond with ONLY a JSON array of objects, each with a \"path\" and \
             a \"content\" field. No commentary outside the array.",
        );
        prompt
    }

    /// Generate the file set for a description.
    ///
    /// Duplicate paths in the model output are collapsed, first
    /// occurrence winning. Empty-but-valid output stays empty; only a
    /// failure or unreadable output yields the placeholder.
    pub async fn generate(&self, description: &str, docs: &[String]) -> Vec<FileArtifact> {
        let text = match self.llm.complete(&Self::prompt(description, docs)).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "code generation call failed, using placeholder");
                return placeholder(description);
            }
        };

        match extract::json_array(&text) {
            Extraction::Files(specs) => dedup_paths(
                specs
                    .into_iter()
                    .map(|s| FileArtifact::generated(s.path, s.content))
                    .collect(),
            ),
            Extraction::Empty | Extraction::Malformed => {
                warn!("model output contained no usable file array, using placeholder");
                placeholder(description)
            }
        }
    }
}

fn placeholder(description: &str) -> Vec<FileArtifact> {
    let excerpt: String = description.chars().take(100).collect();
    vec![FileArtifact::generated(
        "app/page.tsx",
        format!("// AI-generated from: {excerpt}"),
    )]
}

#[async_trait]
impl ArtifactSource for CodeGenerator<'_> {
    async fn produce(&self, description: &str) -> Vec<FileArtifact> {
        self.generate(description, &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ChatError, ChatResult};
    use crew_core::ArtifactStatus;

    struct Canned(&'static str);

    #[async_trait]
    impl TextCompletion for Canned {
        async fn complete(&self, _prompt: &str) -> ChatResult<String> {
            Ok(self.0.to_string())
        }
    }

    struct Down;

    #[async_trait]
    impl TextCompletion for Down {
        async fn complete(&self, _prompt: &str) -> ChatResult<String> {
            Err(ChatError::Llm("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn test_files_from_model_output() {
        let llm = Canned(
            "```json\n[{\"path\": \"app/page.tsx\", \"content\": \"x\"}, \
             {\"path\": \"lib/db.ts\", \"content\": \"y\"}]\n```",
        );
        let files = CodeGenerator::new(&llm).generate("a shop", &[]).await;
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].language, "typescript");
        assert!(files.iter().all(|f| f.status == ArtifactStatus::Generated));
    }

    #[tokio::test]
    async fn test_duplicate_paths_collapse_first_wins() {
        let llm = Canned(
            "[{\"path\": \"a.ts\", \"content\": \"first\"}, \
             {\"path\": \"a.ts\", \"content\": \"second\"}]",
        );
        let files = CodeGenerator::new(&llm).generate("anything", &[]).await;
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].content, "first");
    }

    #[tokio::test]
    async fn test_prose_output_falls_back_to_placeholder() {
        let llm = Canned("I cannot generate files for that request.");
        let description = "x".repeat(150);
        let files = CodeGenerator::new(&llm).generate(&description, &[]).await;
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, "app/page.tsx");
        // Placeholder embeds at most the first 100 chars of the description.
        assert!(files[0].content.contains(&"x".repeat(100)));
        assert!(!files[0].content.contains(&"x".repeat(101)));
    }

    #[tokio::test]
    async fn test_transport_failure_falls_back_to_placeholder() {
        let files = CodeGenerator::new(&Down).generate("a blog", &[]).await;
        assert_eq!(files.len(), 1);
        assert!(files[0].content.contains("a blog"));
    }

    #[tokio::test]
    async fn test_valid_empty_array_stays_empty() {
        let files = CodeGenerator::new(&Canned("[]")).generate("a blog", &[]).await;
        assert!(files.is_empty());
    }

    #[test]
    fn test_prompt_mentions_docs() {
        let p = CodeGenerator::prompt("a shop", &["requirements.pdf".to_string()]);
        assert!(p.contains("a shop"));
        assert!(p.contains("requirements.pdf"));
    }
}
