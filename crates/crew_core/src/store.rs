//! Session blob store.
//!
//! Conversations are persisted as one JSON file per session key under
//! `<root>/.crewforge/sessions/<key>.json`, holding the full message
//! array. The file is rewritten on every save (last-write-wins).
//! Malformed stored content is discarded on load rather than surfaced:
//! a corrupt blob must never take the interface down.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{CoreError, CoreResult};
use crate::types::Message;

/// Convert a session key to a filesystem-safe slug
fn slugify(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// String-keyed store for serialized conversation transcripts
#[derive(Debug, Clone)]
pub struct SessionStore {
    root: PathBuf,
}

impl SessionStore {
    /// Create a store rooted at the given workspace directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn sessions_dir(&self) -> PathBuf {
        self.root.join(".crewforge").join("sessions")
    }

    fn session_path(&self, key: &str) -> PathBuf {
        self.sessions_dir().join(format!("{}.json", slugify(key)))
    }

    /// Persist the full message log for a session key
    pub fn save(&self, key: &str, messages: &[Message]) -> CoreResult<()> {
        let dir = self.sessions_dir();
        fs::create_dir_all(&dir)?;

        let content = serde_json::to_string_pretty(messages)?;
        fs::write(self.session_path(key), content)?;
        Ok(())
    }

    /// Load the message log for a session key.
    ///
    /// A missing, unreadable, or malformed blob yields an empty log so
    /// the caller can start fresh from its seed message.
    pub fn load(&self, key: &str) -> Vec<Message> {
        let path = self.session_path(key);
        if !path.exists() {
            return Vec::new();
        }

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                warn!(key, error = %e, "failed to read stored session, starting fresh");
                return Vec::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(messages) => messages,
            Err(e) => {
                warn!(key, error = %e, "stored session is malformed, discarding");
                Vec::new()
            }
        }
    }

    /// List all stored session keys, sorted
    pub fn list(&self) -> CoreResult<Vec<String>> {
        let dir = self.sessions_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut keys = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().map_or(false, |e| e == "json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    keys.push(stem.to_string());
                }
            }
        }

        keys.sort();
        Ok(keys)
    }

    /// Delete a stored session
    pub fn delete(&self, key: &str) -> CoreResult<()> {
        let path = self.session_path(key);
        if !path.exists() {
            return Err(CoreError::SessionNotFound(key.to_string()));
        }
        fs::remove_file(path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_and_load_preserves_order() {
        let temp = tempdir().unwrap();
        let store = SessionStore::new(temp.path());

        let messages = vec![
            Message::ai("welcome"),
            Message::user("build me a todo app"),
            Message::ai("sure, here is a plan"),
        ];

        store.save("session-1", &messages).unwrap();
        let loaded = store.load("session-1");

        assert_eq!(loaded.len(), 3);
        for (saved, loaded) in messages.iter().zip(&loaded) {
            assert_eq!(saved.id, loaded.id);
            assert_eq!(saved.text, loaded.text);
            assert_eq!(saved.timestamp, loaded.timestamp);
        }
    }

    #[test]
    fn test_load_missing_is_empty() {
        let temp = tempdir().unwrap();
        let store = SessionStore::new(temp.path());
        assert!(store.load("nope").is_empty());
    }

    #[test]
    fn test_load_malformed_is_empty() {
        let temp = tempdir().unwrap();
        let store = SessionStore::new(temp.path());

        store.save("broken", &[Message::user("hi")]).unwrap();
        let path = temp
            .path()
            .join(".crewforge")
            .join("sessions")
            .join("broken.json");
        fs::write(path, "{not json at all").unwrap();

        assert!(store.load("broken").is_empty());
    }

    #[test]
    fn test_list_and_delete() {
        let temp = tempdir().unwrap();
        let store = SessionStore::new(temp.path());

        store.save("beta", &[Message::user("b")]).unwrap();
        store.save("alpha", &[Message::user("a")]).unwrap();

        assert_eq!(store.list().unwrap(), vec!["alpha", "beta"]);

        store.delete("alpha").unwrap();
        assert_eq!(store.list().unwrap(), vec!["beta"]);

        assert!(matches!(
            store.delete("alpha"),
            Err(CoreError::SessionNotFound(_))
        ));
    }

    #[test]
    fn test_keys_are_slugified() {
        let temp = tempdir().unwrap();
        let store = SessionStore::new(temp.path());

        store.save("My Session / #1", &[Message::user("hi")]).unwrap();
        assert_eq!(store.list().unwrap(), vec!["my-session-1"]);
        assert_eq!(store.load("My Session / #1").len(), 1);
    }
}
