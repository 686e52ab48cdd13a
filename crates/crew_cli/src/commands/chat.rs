//! Chat command - One exchange with the assistant.
//!
//! The CLI process is one-shot, so conversation state lives in the
//! stored transcript; the exchange history rides on the request and
//! the endpoint's per-user store is not used here.

use anyhow::Result;
use clap::Args;
use tracing::info;

use crew_chat::{chat, ChatRequest, HistoryStore, LlmAdapter, Turn};
use crew_core::{Message, Sender, SessionStore, Transcript};

use super::welcome_message;

#[derive(Args)]
pub struct ChatArgs {
    /// The message to send
    message: String,

    /// Session to load history from and append this exchange to
    #[arg(short, long)]
    session: Option<String>,
}

pub async fn execute(args: ChatArgs) -> Result<()> {
    let llm = LlmAdapter::from_env()?;
    info!(provider = ?llm.provider(), model = llm.model(), "chatting");

    let store = SessionStore::new(std::env::current_dir()?);
    let mut transcript = match &args.session {
        Some(session) => Transcript::restore(welcome_message(), store.load(session)),
        None => Transcript::new(welcome_message()),
    };

    let request = ChatRequest {
        message: args.message.clone(),
        history: transcript.trailing(20).iter().map(to_turn).collect(),
        user_id: None,
    };

    let mut history = HistoryStore::default();
    let reply = chat(&llm, &mut history, &request).await;

    println!("{}", reply.response);
    if reply.can_generate_code {
        println!();
        println!(
            "💡 This sounds buildable. Try: crewforge generate \"{}\"",
            args.message
        );
    }

    if let Some(session) = &args.session {
        transcript.append(Message::user(&args.message));
        transcript.append(Message::ai(&reply.response));
        store.save(session, transcript.messages())?;
        println!("💾 Saved to session '{session}'");
    }

    Ok(())
}

fn to_turn(message: &Message) -> Turn {
    match message.sender {
        Sender::User => Turn::user(&message.text),
        _ => Turn::assistant(&message.text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crew_chat::TurnRole;

    #[test]
    fn test_transcript_maps_to_request_turns() {
        assert_eq!(to_turn(&Message::user("hi")).role, TurnRole::User);
        assert_eq!(to_turn(&Message::ai("hello")).role, TurnRole::Assistant);
        // Member replies read as assistant context in the prompt.
        assert_eq!(
            to_turn(&Message::member("Technical Lead", "on it")).role,
            TurnRole::Assistant
        );
    }
}
