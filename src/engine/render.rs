// XO AI Engine — Rendering
// Plain-text views of the conversation and the selection menus.
// Pure: no I/O, the caller decides where the text goes.

use chrono::Local;

use crate::atoms::constants::ASSISTANT_NAME;
use crate::engine::conversation::Conversation;
use crate::engine::models::{is_known_label, resolve_model, MODEL_LABELS};
use crate::engine::modes::{Mode, IDENTITY_POINTS};
use crate::engine::types::*;

pub fn speaker(role: Role) -> &'static str {
    match role {
        Role::User => "You",
        Role::Assistant => ASSISTANT_NAME,
        Role::System => "System",
    }
}

/// `[HH:MM] Speaker: content`, timestamp only when asked for and present.
pub fn render_message(msg: &Message, show_timestamps: bool) -> String {
    let stamp = match (show_timestamps, msg.timestamp) {
        (true, Some(ts)) => format!("[{}] ", ts.with_timezone(&Local).format("%H:%M")),
        _ => String::new(),
    };
    format!("{}{}: {}", stamp, speaker(msg.role), msg.content)
}

pub fn render_transcript(conversation: &Conversation, show_timestamps: bool) -> String {
    let mut out = format!("Mode: {}\n", conversation.mode().label());
    if conversation.is_empty() {
        out.push_str("(no messages yet)\n");
        return out;
    }
    for msg in conversation.messages() {
        out.push_str(&render_message(msg, show_timestamps));
        out.push('\n');
    }
    out
}

pub fn render_modes(selected: Mode) -> String {
    let mut out = String::from("Quick modes\n");
    for mode in Mode::ALL {
        let marker = if mode == selected { '*' } else { ' ' };
        out.push_str(&format!(
            " {} {:<15} {}\n",
            marker,
            mode.label(),
            mode.caption()
        ));
    }
    out
}

pub fn render_models(selected: &str) -> String {
    let mut out = String::from("Models\n");
    for label in MODEL_LABELS {
        let marker = if label == selected.trim() { '*' } else { ' ' };
        out.push_str(&format!(" {} {:<20} -> {}\n", marker, label, resolve_model(label)));
    }
    out
}

/// Confirmation after a model switch. Unlisted labels go out unchanged.
pub fn render_model_choice(label: &str) -> String {
    let label = label.trim();
    if is_known_label(label) {
        format!("Model: {} ({})", label, resolve_model(label))
    } else {
        format!("Model: {} (not a listed label, sent as-is)", label)
    }
}

pub fn render_identity() -> String {
    let mut out = format!("{} identity\n", ASSISTANT_NAME);
    for point in IDENTITY_POINTS {
        out.push_str(&format!(" - {}\n", point));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_without_timestamp() {
        let msg = Message::user("hello").stamped();
        assert_eq!(render_message(&msg, false), "You: hello");
        assert_eq!(render_message(&Message::assistant("hi"), true), "XO AI: hi");
    }

    #[test]
    fn message_with_timestamp_has_clock_prefix() {
        let msg = Message::assistant("hi").stamped();
        let line = render_message(&msg, true);
        assert!(line.starts_with('['));
        assert_eq!(&line[3..4], ":");
        assert!(line.ends_with("] XO AI: hi"));
    }

    #[test]
    fn transcript_lists_messages_under_mode_header() {
        let mut conv = Conversation::new(Mode::Planner, "llama3-70b-8192");
        conv.push_user("plan my day");
        conv.push_assistant("Wake up at 7.");
        let text = render_transcript(&conv, false);
        assert_eq!(text, "Mode: Planner\nYou: plan my day\nXO AI: Wake up at 7.\n");
    }

    #[test]
    fn empty_transcript_says_so() {
        let text = render_transcript(&Conversation::default(), false);
        assert!(text.contains("(no messages yet)"));
    }

    #[test]
    fn modes_menu_marks_selection() {
        let text = render_modes(Mode::IdeaGenerator);
        assert!(text.contains("* Idea Generator"));
        assert!(text.contains("  Planner"));
        assert!(text.contains("Brainstorm content, project, and business ideas."));
    }

    #[test]
    fn models_menu_shows_upstream_ids() {
        let text = render_models("mixtral-8x7b-32768");
        assert!(text.contains("* mixtral-8x7b-32768"));
        assert!(text.contains("-> llama-3.3-70b-versatile"));
    }

    #[test]
    fn identity_lists_every_point() {
        let text = render_identity();
        assert_eq!(text.lines().count(), 1 + IDENTITY_POINTS.len());
        assert!(text.contains("No trading or financial advice, ever."));
    }

    #[test]
    fn model_choice_names_the_upstream_id() {
        assert_eq!(
            render_model_choice("mixtral-8x7b-32768"),
            "Model: mixtral-8x7b-32768 (mistral-saba-24b)"
        );
        assert_eq!(
            render_model_choice(" gemma2-9b-it "),
            "Model: gemma2-9b-it (not a listed label, sent as-is)"
        );
    }
}
