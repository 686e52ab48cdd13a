//! JSON-array extraction from model prose.
//!
//! Upstream models are asked for a bare JSON array but routinely wrap
//! it in Markdown fences and surrounding commentary. The grammar here
//! is explicit: after stripping fence lines, the candidate is the
//! first balanced `[...]` span (bracket depth tracked outside string
//! literals), which must parse as an array of file descriptors. The
//! outcome is typed rather than a swallowed exception.

use serde::Deserialize;

/// A file descriptor as emitted by the model.
///
/// A missing `content` field defaults to the empty string and flows
/// through; only a missing `path` makes the descriptor unusable.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileSpec {
    pub path: String,
    #[serde(default)]
    pub content: String,
}

/// Outcome of scanning a text blob for a file-descriptor array
#[derive(Debug, PartialEq, Eq)]
pub enum Extraction {
    /// A balanced array span was found and parsed
    Files(Vec<FileSpec>),
    /// No balanced array span exists in the text
    Empty,
    /// A span was found but is not a valid descriptor array
    Malformed,
}

/// Extract the first file-descriptor array embedded in arbitrary prose
pub fn json_array(text: &str) -> Extraction {
    let stripped = strip_fences(text);
    let Some(span) = first_array_span(&stripped) else {
        return Extraction::Empty;
    };

    match serde_json::from_str::<Vec<FileSpec>>(span) {
        Ok(files) => Extraction::Files(files),
        Err(_) => Extraction::Malformed,
    }
}

/// Drop Markdown code-fence marker lines (``` with optional language tag)
fn strip_fences(text: &str) -> String {
    text.lines()
        .filter(|line| !line.trim_start().starts_with("```"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Locate the first balanced bracket span.
///
/// Depth counting starts at the first `[` and ignores brackets inside
/// string literals (escape-aware). An unclosed span is no span.
fn first_array_span(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    let start = text.find('[')?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate().skip(start) {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }

        match b {
            b'"' => in_string = true,
            b'[' => depth += 1,
            b']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=i]);
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_array() {
        let text = r#"[{"path": "app/page.tsx", "content": "hello"}]"#;
        let Extraction::Files(files) = json_array(text) else {
            panic!("expected files");
        };
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, "app/page.tsx");
        assert_eq!(files[0].content, "hello");
    }

    #[test]
    fn test_array_in_prose_and_fences() {
        let text = "Here are your files:\n```json\n[{\"path\": \"a.ts\", \"content\": \"x\"}, {\"path\": \"b.ts\", \"content\": \"y\"}]\n```\nLet me know if you need changes.";
        let Extraction::Files(files) = json_array(text) else {
            panic!("expected files");
        };
        assert_eq!(files.len(), 2);
        assert_eq!(files[1].path, "b.ts");
    }

    #[test]
    fn test_brackets_inside_strings() {
        let text = r#"[{"path": "a.ts", "content": "const xs = [1, 2, \"]\"];"}]"#;
        let Extraction::Files(files) = json_array(text) else {
            panic!("expected files");
        };
        assert_eq!(files[0].content, "const xs = [1, 2, \"]\"];");
    }

    #[test]
    fn test_missing_content_defaults_empty() {
        let text = r#"[{"path": "a.ts"}]"#;
        let Extraction::Files(files) = json_array(text) else {
            panic!("expected files");
        };
        assert_eq!(files[0].content, "");
    }

    #[test]
    fn test_plain_prose_is_empty() {
        assert_eq!(json_array("Sorry, I can't help"), Extraction::Empty);
    }

    #[test]
    fn test_unclosed_span_is_empty() {
        assert_eq!(json_array("some [unclosed text"), Extraction::Empty);
    }

    #[test]
    fn test_non_descriptor_array_is_malformed() {
        assert_eq!(json_array("pick [1, 2, 3] of these"), Extraction::Malformed);
        assert_eq!(json_array("[{\"path\": 42}]"), Extraction::Malformed);
    }

    #[test]
    fn test_nested_arrays_balance() {
        let text = r#"meta: [{"path": "a.ts", "content": "[[nested]]"}] trailing"#;
        assert!(matches!(json_array(text), Extraction::Files(_)));
    }
}
