// XO AI Engine — Conversation log
//
// One chat session's state, owned by whoever drives the session and passed
// by reference into the prompt builder and the renderer. The log is
// append-only between resets; the system prompt is never stored in it.

use crate::engine::models::DEFAULT_MODEL_LABEL;
use crate::engine::modes::Mode;
use crate::engine::types::*;

#[derive(Debug, Clone, PartialEq)]
pub struct Conversation {
    id: String,
    mode: Mode,
    model: String,
    messages: Vec<Message>,
    greeting: Option<String>,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new(Mode::default(), DEFAULT_MODEL_LABEL)
    }
}

impl Conversation {
    /// Empty log with the given selections.
    pub fn new(mode: Mode, model: impl Into<String>) -> Self {
        Conversation {
            id: format!("xo-{}", uuid::Uuid::new_v4()),
            mode,
            model: model.into(),
            messages: Vec::new(),
            greeting: None,
        }
    }

    /// Seed the log with a canned assistant greeting. The greeting is
    /// re-seeded after every reset.
    pub fn with_greeting(mut self, greeting: impl Into<String>) -> Self {
        let greeting = greeting.into();
        if !greeting.trim().is_empty() {
            self.greeting = Some(greeting);
            self.seed();
        }
        self
    }

    fn seed(&mut self) {
        if let Some(g) = &self.greeting {
            self.messages.push(Message::assistant(g.clone()).stamped());
        }
    }

    // ── Accessors ──────────────────────────────────────────────────────

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Selected model label (not the upstream identifier).
    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn messages(&self) -> &[Message] {
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

    /// The last `n` entries, or everything when the log is shorter.
    pub fn window(&self, n: usize) -> &[Message] {
        let start = self.messages.len().saturating_sub(n);
        &self.messages[start..]
    }

    // ── Mutation ───────────────────────────────────────────────────────

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub fn set_model(&mut self, model: impl Into<String>) {
        self.model = model.into();
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(Message::user(content).stamped());
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(Message::assistant(content).stamped());
    }

    /// Drop every message; keep the mode and model selection.
    pub fn reset(&mut self) {
        self.messages.clear();
        self.seed();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty_with_defaults() {
        let conv = Conversation::default();
        assert!(conv.is_empty());
        assert_eq!(conv.mode(), Mode::FriendlyChat);
        assert_eq!(conv.model(), "llama3-70b-8192");
        assert!(conv.id().starts_with("xo-"));
    }

    #[test]
    fn greeting_seeds_one_assistant_message() {
        let conv = Conversation::default().with_greeting("Hi! I'm XO AI.");
        assert_eq!(conv.len(), 1);
        assert_eq!(conv.messages()[0].role, Role::Assistant);
        assert_eq!(conv.messages()[0].content, "Hi! I'm XO AI.");
    }

    #[test]
    fn blank_greeting_is_ignored() {
        let conv = Conversation::default().with_greeting("   ");
        assert!(conv.is_empty());
    }

    #[test]
    fn pushes_keep_insertion_order_and_stamp() {
        let mut conv = Conversation::default();
        conv.push_user("one");
        conv.push_assistant("two");
        conv.push_user("three");
        let contents: Vec<&str> = conv.messages().iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["one", "two", "three"]);
        assert!(conv.messages().iter().all(|m| m.timestamp.is_some()));
    }

    #[test]
    fn window_returns_trailing_entries() {
        let mut conv = Conversation::default();
        for i in 0..10 {
            conv.push_user(format!("m{i}"));
        }
        let w = conv.window(6);
        assert_eq!(w.len(), 6);
        assert_eq!(w[0].content, "m4");
        assert_eq!(w[5].content, "m9");
        assert_eq!(conv.window(50).len(), 10);
        assert!(conv.window(0).is_empty());
    }

    #[test]
    fn reset_clears_messages_but_keeps_selection() {
        let mut conv = Conversation::new(Mode::Planner, "mixtral-8x7b-32768").with_greeting("Hello");
        conv.push_user("plan my week");
        conv.push_assistant("Sure");
        conv.reset();
        assert_eq!(conv.len(), 1);
        assert_eq!(conv.messages()[0].content, "Hello");
        assert_eq!(conv.mode(), Mode::Planner);
        assert_eq!(conv.model(), "mixtral-8x7b-32768");
    }
}
