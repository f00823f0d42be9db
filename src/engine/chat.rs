// XO AI Engine — Prompt assembly
//
// Pure functions: conversation log in, outbound payload out.
// Called by commands/chat.rs with the log as it was *before* the new user
// turn, so the new turn appears in the payload exactly once.

use log::debug;

use crate::engine::config::EngineConfig;
use crate::engine::conversation::Conversation;
use crate::engine::models::resolve_model;
use crate::engine::types::*;

/// Apply the fixed-window policy: `None` keeps everything, `Some(n)` keeps
/// exactly the last `n` entries.
pub fn history_window(history: &[Message], window: Option<usize>) -> &[Message] {
    match window {
        Some(n) => &history[history.len().saturating_sub(n)..],
        None => history,
    }
}

/// `[system] + windowed history + [user]`, timestamps stripped.
pub fn build_messages(
    system_prompt: &str,
    history: &[Message],
    user_input: &str,
    window: Option<usize>,
) -> Vec<Message> {
    let kept = history_window(history, window);
    let mut messages = Vec::with_capacity(kept.len() + 2);
    messages.push(Message::system(system_prompt));
    messages.extend(
        kept.iter()
            .filter(|m| m.role != Role::System)
            .map(Message::to_wire),
    );
    messages.push(Message::user(user_input));
    messages
}

/// Full request body for the conversation's current mode and model.
pub fn build_payload(
    conversation: &Conversation,
    user_input: &str,
    config: &EngineConfig,
) -> ChatPayload {
    let system_prompt = conversation.mode().instructions();
    let messages = build_messages(
        &system_prompt,
        conversation.messages(),
        user_input,
        config.history_window,
    );
    let model = resolve_model(conversation.model()).to_string();
    debug!(
        "[chat] Payload for {}: mode={} model={} messages={} window={:?}",
        conversation.id(),
        conversation.mode().key(),
        model,
        messages.len(),
        config.history_window
    );
    ChatPayload {
        model,
        messages,
        temperature: config.temperature,
        max_tokens: config.max_tokens,
        stream: config.stream,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::modes::Mode;

    fn history(n: usize) -> Vec<Message> {
        (0..n)
            .map(|i| {
                if i % 2 == 0 {
                    Message::user(format!("q{i}")).stamped()
                } else {
                    Message::assistant(format!("a{i}")).stamped()
                }
            })
            .collect()
    }

    #[test]
    fn system_first_then_history_then_user() {
        let h = history(4);
        let msgs = build_messages("SYS", &h, "new question", None);
        assert_eq!(msgs.len(), 6);
        assert_eq!(msgs[0], Message::system("SYS"));
        for (i, m) in msgs[1..5].iter().enumerate() {
            assert_eq!(m.role, h[i].role);
            assert_eq!(m.content, h[i].content);
        }
        assert_eq!(msgs[5], Message::user("new question"));
    }

    #[test]
    fn empty_history_yields_system_and_user() {
        let msgs = build_messages("SYS", &[], "hello", None);
        assert_eq!(msgs, vec![Message::system("SYS"), Message::user("hello")]);
    }

    #[test]
    fn new_turn_is_not_duplicated() {
        let h = history(3);
        let msgs = build_messages("SYS", &h, "fresh", None);
        assert_eq!(msgs.iter().filter(|m| m.content == "fresh").count(), 1);
    }

    #[test]
    fn window_keeps_exactly_the_last_n() {
        let h = history(11);
        let kept = history_window(&h, Some(6));
        assert_eq!(kept.len(), 6);
        assert_eq!(kept, &h[5..]);
    }

    #[test]
    fn windowed_payload_never_exceeds_n_plus_two() {
        for len in 0..15 {
            let h = history(len);
            let msgs = build_messages("SYS", &h, "q", Some(6));
            assert!(msgs.len() <= 8, "len {len} produced {}", msgs.len());
            assert_eq!(msgs.len(), len.min(6) + 2);
        }
    }

    #[test]
    fn payload_strips_timestamps() {
        let msgs = build_messages("SYS", &history(2), "q", None);
        assert!(msgs.iter().all(|m| m.timestamp.is_none()));
    }

    #[test]
    fn payload_uses_mode_and_resolved_model() {
        let mut conv = Conversation::new(Mode::StudyHelper, "llama3-70b-8192");
        conv.push_user("what is 2+2?");
        conv.push_assistant("4");
        let cfg = EngineConfig::default();
        let payload = build_payload(&conv, "and 3+3?", &cfg);
        assert_eq!(payload.model, "llama-3.3-70b-versatile");
        assert_eq!(payload.messages[0].content, Mode::StudyHelper.instructions());
        assert_eq!(payload.messages.len(), 4);
        assert_eq!(payload.temperature, 0.4);
        assert_eq!(payload.max_tokens, 1024);
        assert!(!payload.stream);
    }

    #[test]
    fn payload_honours_configured_window_and_stream() {
        let mut conv = Conversation::default();
        for i in 0..10 {
            conv.push_user(format!("u{i}"));
            conv.push_assistant(format!("a{i}"));
        }
        let cfg = EngineConfig { history_window: Some(6), stream: true, ..Default::default() };
        let payload = build_payload(&conv, "next", &cfg);
        assert_eq!(payload.messages.len(), 8);
        assert_eq!(payload.messages[1].content, "u7");
        assert!(payload.stream);
    }

    #[test]
    fn payload_serializes_to_wire_shape() {
        let conv = Conversation::default();
        let payload = build_payload(&conv, "hi", &EngineConfig::default());
        let v = serde_json::to_value(&payload).unwrap();
        assert_eq!(v["model"], "llama-3.3-70b-versatile");
        assert_eq!(v["messages"][0]["role"], "system");
        assert_eq!(v["messages"][1], serde_json::json!({"role": "user", "content": "hi"}));
        assert_eq!(v["max_tokens"], 1024);
        assert_eq!(v["stream"], false);
    }
}
