// XO AI Engine — Model labels
//
// The user picks a model by label; the provider receives the upstream
// identifier. Keeping the labels stable hides upstream renames and
// retirements from the front-end and from saved config files.

/// Label selected when neither config nor flags name one.
pub const DEFAULT_MODEL_LABEL: &str = "llama3-70b-8192";

/// Selectable labels, in display order.
pub const MODEL_LABELS: [&str; 2] = ["mixtral-8x7b-32768", "llama3-70b-8192"];

/// Map a label to the identifier the provider currently serves it under.
/// Unknown labels are sent as-is, so any upstream id can be used directly.
pub fn resolve_model(label: &str) -> &str {
    match label.trim() {
        // ── Groq retirements ────────────────────────────────────────────
        // Mixtral 8x7B was withdrawn; Saba 24B is the suggested replacement.
        "mixtral-8x7b-32768" => "mistral-saba-24b",
        // Llama 3 70B moved to the 3.3 versatile build.
        "llama3-70b-8192" => "llama-3.3-70b-versatile",
        _ => label.trim(),
    }
}

pub fn is_known_label(label: &str) -> bool {
    MODEL_LABELS.contains(&label.trim())
}
