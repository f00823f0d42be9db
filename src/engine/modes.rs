// XO AI Engine — Modes
//
// A mode is a named persona preset. Each one maps to exactly one system
// prompt: the shared XO AI rules followed by the mode's own guidance.
// The text here is the product's voice; edit with care, every byte is sent.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::atoms::error::EngineError;

/// Rules shared by every mode. Ends with a space; the mode text is joined
/// with one more, so the two sections are separated by a double space.
const BASE_RULES: &str = "You are XO AI, the official assistant of Nexo.corp. \
Your tone is calm, clear, and respectful. \
You simplify explanations without losing accuracy. \
For study questions, you explain step-by-step. \
You must not give trading, stock market, crypto, or other financial advice. \
You must refuse harmful, unsafe, or adult content. \
Keep answers concise and focused unless the user explicitly asks for a longer or very detailed answer. ";

const STUDY_HELPER_TEXT: &str = "Act as a friendly Study Helper for school and college-style topics. \
Break problems into steps and show reasoning in a simple way. \
Encourage the student, but do not do full homework or full exam papers for them.";

const IDEA_GENERATOR_TEXT: &str = "Act as a creative Idea Generator. \
Brainstorm lists of ideas for content, projects, startups, goals, or improvements. \
Be practical and realistic, and give examples.";

const PLANNER_TEXT: &str = "Act as a planning assistant. \
Help the user design timetables, study plans, routines, and simple roadmaps. \
Keep plans realistic for a busy student or young professional.";

const FRIENDLY_CHAT_TEXT: &str = "Act as a calm and positive friend for normal chat. \
You can talk about life, school, mindset, and self-improvement without being dramatic.";

/// The "XO AI identity" statements shown on the about screen.
pub const IDENTITY_POINTS: [&str; 6] = [
    "Calm, clear, and respectful tone.",
    "Simplifies explanations without losing accuracy.",
    "Step-by-step support for study questions.",
    "No trading or financial advice, ever.",
    "Refuses harmful or unsafe requests.",
    "Keeps answers short unless you ask for long.",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Mode {
    StudyHelper,
    IdeaGenerator,
    Planner,
    #[default]
    FriendlyChat,
}

impl Mode {
    /// Display order.
    pub const ALL: [Mode; 4] = [
        Mode::StudyHelper,
        Mode::IdeaGenerator,
        Mode::Planner,
        Mode::FriendlyChat,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Mode::StudyHelper => "Study Helper",
            Mode::IdeaGenerator => "Idea Generator",
            Mode::Planner => "Planner",
            Mode::FriendlyChat => "Friendly Chat",
        }
    }

    /// Stable snake_case key, used in the config file.
    pub fn key(&self) -> &'static str {
        match self {
            Mode::StudyHelper => "study_helper",
            Mode::IdeaGenerator => "idea_generator",
            Mode::Planner => "planner",
            Mode::FriendlyChat => "friendly_chat",
        }
    }

    pub fn caption(&self) -> &'static str {
        match self {
            Mode::StudyHelper => "Break down concepts and questions step-by-step.",
            Mode::IdeaGenerator => "Brainstorm content, project, and business ideas.",
            Mode::Planner => "Design routines, timetables, and simple roadmaps.",
            Mode::FriendlyChat => "Normal conversation, mindset, and life chat.",
        }
    }

    fn guidance(&self) -> &'static str {
        match self {
            Mode::StudyHelper => STUDY_HELPER_TEXT,
            Mode::IdeaGenerator => IDEA_GENERATOR_TEXT,
            Mode::Planner => PLANNER_TEXT,
            Mode::FriendlyChat => FRIENDLY_CHAT_TEXT,
        }
    }

    /// Full system prompt for this mode.
    pub fn instructions(&self) -> String {
        format!("{} {}", BASE_RULES, self.guidance())
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Mode {
    type Err = EngineError;

    /// Accepts the label ("Study Helper"), the key ("study_helper") or a
    /// short alias ("study"), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_lowercase().replace(|c: char| c == '-' || c == ' ', "_");
        match norm.as_str() {
            "study_helper" | "study" => Ok(Mode::StudyHelper),
            "idea_generator" | "ideas" | "idea" => Ok(Mode::IdeaGenerator),
            "planner" | "plan" => Ok(Mode::Planner),
            "friendly_chat" | "friendly" | "chat" => Ok(Mode::FriendlyChat),
            _ => Err(EngineError::config(format!(
                "Unknown mode '{}'. Choose one of: {}",
                s.trim(),
                Mode::ALL.iter().map(|m| m.label()).collect::<Vec<_>>().join(", ")
            ))),
        }
    }
}

impl TryFrom<String> for Mode {
    type Error = EngineError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Mode> for String {
    fn from(m: Mode) -> Self {
        m.key().to_string()
    }
}
