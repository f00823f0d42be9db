// ── XO Atoms: Constants ────────────────────────────────────────────────────
// All named constants for the crate live here.

// ── Identity ──────────────────────────────────────────────────────────────
pub const ASSISTANT_NAME: &str = "XO AI";

// ── Credentials ───────────────────────────────────────────────────────────
// The API key is only ever read from the environment, never from the
// config file. The variable name itself is configurable (`api_key_env`).
pub const DEFAULT_API_KEY_ENV: &str = "GROQ_API_KEY";

// ── Sampling defaults ─────────────────────────────────────────────────────
pub const DEFAULT_TEMPERATURE: f64 = 0.4;
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

// ── History window ────────────────────────────────────────────────────────
// Fixed-window truncation: the last N log entries are sent, nothing older.
// Enabled with `--truncate` or `history_window = 6` in the config file.
pub const DEFAULT_HISTORY_WINDOW: usize = 6;

// ── User-facing failure text ──────────────────────────────────────────────
pub const BUSY_NOTICE: &str = "XO AI hit a limit. Please try again in a moment.";

/// Longest diagnostic string carried back to the caller after a failed call.
pub const DIAGNOSTIC_MAX_BYTES: usize = 200;

// ── Config file location ──────────────────────────────────────────────────
pub(crate) const CONFIG_DIR_NAME: &str = ".xo";
pub(crate) const CONFIG_FILE_NAME: &str = "config.toml";
