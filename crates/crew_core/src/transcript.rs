//! Append-only conversation transcript.
//!
//! A transcript starts from a seed welcome message and supports exactly
//! two mutations: `append` and `reset`. Resets truncate the whole log
//! back to the seed; individual messages are never edited or removed.

use crate::types::Message;

/// Ordered, append-only log of conversation messages
#[derive(Debug, Clone)]
pub struct Transcript {
    seed: Message,
    messages: Vec<Message>,
}

impl Transcript {
    /// Create a transcript containing only the seed welcome message
    pub fn new(seed: Message) -> Self {
        Self {
            messages: vec![seed.clone()],
            seed,
        }
    }

    /// Restore a transcript from previously stored messages.
    ///
    /// An empty store yields a fresh transcript with just the seed.
    pub fn restore(seed: Message, stored: Vec<Message>) -> Self {
        if stored.is_empty() {
            Self::new(seed)
        } else {
            Self {
                seed,
                messages: stored,
            }
        }
    }

    /// Append a message to the end of the log
    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Truncate the log back to the single seed message
    pub fn reset(&mut self) {
        self.messages.clear();
        self.messages.push(self.seed.clone());
    }

    /// All messages, in append order
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of messages in the log
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the log is empty (never true after construction)
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The most recent message
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// The trailing `n` messages, used as the prompt context window
    pub fn trailing(&self, n: usize) -> &[Message] {
        let start = self.messages.len().saturating_sub(n);
        &self.messages[start..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed() -> Message {
        Message::ai("Welcome! Describe the app you want to build.")
    }

    #[test]
    fn test_append_preserves_order() {
        let mut transcript = Transcript::new(seed());
        transcript.append(Message::user("first"));
        transcript.append(Message::ai("second"));
        transcript.append(Message::user("third"));

        let texts: Vec<_> = transcript.messages().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "Welcome! Describe the app you want to build.",
                "first",
                "second",
                "third"
            ]
        );
    }

    #[test]
    fn test_ids_unique() {
        let mut transcript = Transcript::new(seed());
        for i in 0..50 {
            transcript.append(Message::user(format!("msg {i}")));
        }

        let mut ids: Vec<_> = transcript.messages().iter().map(|m| m.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), transcript.len());
    }

    #[test]
    fn test_reset_yields_seed() {
        let welcome = seed();
        let mut transcript = Transcript::new(welcome.clone());
        for i in 0..10 {
            transcript.append(Message::user(format!("msg {i}")));
        }

        transcript.reset();
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.messages()[0].id, welcome.id);
        assert_eq!(transcript.messages()[0].text, welcome.text);
    }

    #[test]
    fn test_trailing_window() {
        let mut transcript = Transcript::new(seed());
        for i in 0..30 {
            transcript.append(Message::user(format!("msg {i}")));
        }

        let window = transcript.trailing(20);
        assert_eq!(window.len(), 20);
        assert_eq!(window.last().unwrap().text, "msg 29");

        // Window larger than the log returns everything
        assert_eq!(transcript.trailing(1000).len(), 31);
    }

    #[test]
    fn test_restore_empty_uses_seed() {
        let transcript = Transcript::restore(seed(), Vec::new());
        assert_eq!(transcript.len(), 1);
    }
}
