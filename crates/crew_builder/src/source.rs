//! Artifact sources for the coding stage.
//!
//! When the pipeline reaches `Coding` it asks a source for the output
//! file set. Sources never fail: a degraded source substitutes
//! placeholder content rather than erroring the pipeline.

use async_trait::async_trait;
use crew_core::FileArtifact;

/// Producer of the generated file set
#[async_trait]
pub trait ArtifactSource: Send + Sync {
    /// Produce the file artifacts for a project description
    async fn produce(&self, description: &str) -> Vec<FileArtifact>;
}

/// Fabricates the fixed starter scaffold: root layout, landing page,
/// and styling config for a fresh web application.
#[derive(Debug, Default)]
pub struct ScaffoldSource;

#[async_trait]
impl ArtifactSource for ScaffoldSource {
    async fn produce(&self, description: &str) -> Vec<FileArtifact> {
        let brief: String = description.chars().take(100).collect();
        vec![
            FileArtifact::generated(
                "app/layout.tsx",
                "import './globals.css'\n\nexport default function RootLayout({\n  children,\n}: {\n  children: React.ReactNode\n}) {\n  return (\n    <html lang=\"en\">\n      <body>{children}</body>\n    </html>\n  )\n}",
            ),
            FileArtifact::generated(
                "app/page.tsx",
                format!(
                    "// Generated from: {brief}\n'use client'\n\nexport default function Home() {{\n  return (\n    <main>\n      <h1>Your AI-Built Application</h1>\n    </main>\n  )\n}}"
                ),
            ),
            FileArtifact::generated(
                "tailwind.config.ts",
                "import type { Config } from 'tailwindcss'\n\nconst config: Config = {\n  content: [\n    './app/**/*.{js,ts,jsx,tsx,mdx}',\n  ],\n  theme: {\n    extend: {},\n  },\n  plugins: [],\n}\n\nexport default config",
            ),
        ]
    }
}
