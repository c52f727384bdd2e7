use super::message::Message;

/// Ordered, append-only conversation history.
///
/// The revision counter increases on every append; views compare it to the
/// last value they drew to decide whether to follow the newest entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    messages: Vec<Message>,
    revision: u64,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transcript seeded with a synthetic assistant greeting
    pub fn with_greeting(greeting: impl Into<String>) -> Self {
        let mut transcript = Self::new();
        transcript.append(Message::assistant(greeting));
        transcript
    }

    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
        self.revision += 1;
    }

    pub fn snapshot(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::Role;

    #[test]
    fn test_append_preserves_order() {
        let mut transcript = Transcript::new();
        assert!(transcript.is_empty());

        transcript.append(Message::user("one"));
        transcript.append(Message::assistant("two"));
        transcript.append(Message::user("three"));

        let texts: Vec<&str> = transcript.snapshot().iter().map(Message::text).collect();
        assert_eq!(texts, vec!["one", "two", "three"]);
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript.last().map(Message::text), Some("three"));
    }

    #[test]
    fn test_revision_bumps_on_append() {
        let mut transcript = Transcript::with_greeting("Hello");
        assert_eq!(transcript.revision(), 1);
        assert_eq!(transcript.snapshot()[0].role(), Role::Assistant);

        transcript.append(Message::user("hi"));
        assert_eq!(transcript.revision(), 2);
    }
}
