// XO AI — Library root
//
// Layering (one-way):
//   atoms     → pure constants, errors, data types, provider trait
//   engine    → modes, models, conversation log, prompt assembly, config,
//               rendering, providers
//   commands  → the per-turn request handler
//
// The `xo` binary (crates/xo-cli) only talks to `commands` and `engine`.

pub mod atoms;
pub mod commands;
pub mod engine;

pub use atoms::error::{EngineError, EngineResult};
pub use commands::chat::{chat_send, TurnOutcome, TurnReply};
pub use engine::config::EngineConfig;
pub use engine::conversation::Conversation;
pub use engine::modes::Mode;
pub use engine::state::EngineState;
