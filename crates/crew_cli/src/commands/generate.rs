//! Generate command - Turn a description into project files.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use crew_chat::{analyze_docs, generate, GenerateRequest, LlmAdapter};
use crew_core::export_all;

#[derive(Args)]
pub struct GenerateArgs {
    /// Description of the application to generate
    description: String,

    /// Names of reference documents to fold into the prompt
    #[arg(short, long = "doc")]
    docs: Vec<String>,

    /// Write the generated files into this directory
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Print the canned documentation analysis first
    #[arg(long)]
    analyze: bool,
}

pub async fn execute(args: GenerateArgs) -> Result<()> {
    if args.analyze {
        let analysis = analyze_docs(&args.docs);
        println!("{}", analysis.analysis);
        println!();
        for question in &analysis.questions {
            println!("   ❓ {question}");
        }
        println!();
    }

    let llm = LlmAdapter::from_env()?;
    info!(model = llm.model(), "generating files");

    let request = GenerateRequest {
        description: args.description,
        uploaded_docs: args.docs,
    };
    let reply = generate(&llm, &request).await;

    println!("📦 {}", reply.analysis);
    for file in &reply.files {
        println!("   {} ({})", file.path, file.language);
    }

    match args.out {
        Some(out) => {
            for file in &reply.files {
                let target = out.join(&file.path);
                if let Some(parent) = target.parent() {
                    fs::create_dir_all(parent)
                        .with_context(|| format!("creating {}", parent.display()))?;
                }
                fs::write(&target, &file.content)
                    .with_context(|| format!("writing {}", target.display()))?;
            }
            println!("✅ Wrote {} file(s) to {}", reply.files.len(), out.display());
        }
        None => {
            println!();
            println!("{}", export_all(&reply.files));
        }
    }

    Ok(())
}
