//! Sessions command - Manage saved chat sessions.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crew_core::{Sender, SessionStore, Transcript};

use super::welcome_message;

#[derive(Args)]
pub struct SessionsArgs {
    /// Print the transcript of this session
    #[arg(long)]
    show: Option<String>,

    /// Truncate this session back to the welcome message
    #[arg(long)]
    reset: Option<String>,

    /// Delete this session
    #[arg(long)]
    delete: Option<String>,

    /// Directory holding the session store (defaults to the current directory)
    #[arg(long)]
    root: Option<PathBuf>,
}

pub async fn execute(args: SessionsArgs) -> Result<()> {
    let root = match &args.root {
        Some(root) => root.clone(),
        None => std::env::current_dir()?,
    };
    let store = SessionStore::new(root);

    if let Some(session) = &args.delete {
        store.delete(session)?;
        println!("🗑️  Deleted session '{session}'");
        return Ok(());
    }

    if let Some(session) = &args.reset {
        let mut transcript = Transcript::restore(welcome_message(), store.load(session));
        transcript.reset();
        store.save(session, transcript.messages())?;
        println!("↩️  Reset session '{session}' to the welcome message");
        return Ok(());
    }

    if let Some(session) = &args.show {
        let messages = store.load(session);
        if messages.is_empty() {
            println!("Session '{session}' is empty or does not exist.");
            return Ok(());
        }
        for message in &messages {
            let who = match &message.sender {
                Sender::User => "you".to_string(),
                Sender::Ai => "assistant".to_string(),
                Sender::Member(name) => name.clone(),
            };
            println!(
                "[{}] {}: {}",
                message.timestamp.format("%H:%M:%S"),
                who,
                message.text
            );
        }
        return Ok(());
    }

    let sessions = store.list()?;
    if sessions.is_empty() {
        println!("No saved sessions.");
    } else {
        println!("📂 Saved sessions:");
        for session in sessions {
            println!("   {session}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crew_core::Message;
    use tempfile::tempdir;

    fn args(root: &std::path::Path) -> SessionsArgs {
        SessionsArgs {
            show: None,
            reset: None,
            delete: None,
            root: Some(root.to_path_buf()),
        }
    }

    #[tokio::test]
    async fn test_reset_truncates_to_welcome() {
        let temp = tempdir().unwrap();
        let store = SessionStore::new(temp.path());
        store
            .save(
                "demo",
                &[
                    Message::ai("welcome"),
                    Message::user("build me a shop"),
                    Message::ai("sure"),
                ],
            )
            .unwrap();

        let mut reset = args(temp.path());
        reset.reset = Some("demo".to_string());
        execute(reset).await.unwrap();

        let messages = store.load("demo");
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].text, welcome_message().text);
    }

    #[tokio::test]
    async fn test_delete_removes_session() {
        let temp = tempdir().unwrap();
        let store = SessionStore::new(temp.path());
        store.save("gone", &[Message::user("hi")]).unwrap();

        let mut delete = args(temp.path());
        delete.delete = Some("gone".to_string());
        execute(delete).await.unwrap();

        assert!(store.list().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_session_errors() {
        let temp = tempdir().unwrap();

        let mut delete = args(temp.path());
        delete.delete = Some("never-saved".to_string());
        assert!(execute(delete).await.is_err());
    }

    #[tokio::test]
    async fn test_list_and_show_tolerate_empty_store() {
        let temp = tempdir().unwrap();

        execute(args(temp.path())).await.unwrap();

        let mut show = args(temp.path());
        show.show = Some("nope".to_string());
        execute(show).await.unwrap();
    }
}
