// XO Commands — Chat turn handler
//
// One call per user action:
//   build payload from the log as it stands → append the user turn →
//   connect (credential check) → call the provider → append the reply.
//
// The log comes in by reference and goes out by value; the caller replaces
// its copy with the returned one. Provider failures never propagate as
// errors: they become a TurnReply the front-end can show.

use log::{error, info, warn};

use crate::atoms::constants::{BUSY_NOTICE, DIAGNOSTIC_MAX_BYTES};
use crate::atoms::error::EngineError;
use crate::engine::chat as chat_org;
use crate::engine::conversation::Conversation;
use crate::engine::state::EngineState;
use crate::engine::types::*;

#[derive(Debug, Clone, PartialEq)]
pub enum TurnReply {
    /// Blank input; nothing happened.
    Skipped,
    /// The assistant answered and the reply was appended to the log.
    Answer {
        text: String,
        /// True when the text was already delivered through `on_delta`.
        streamed: bool,
        usage: Option<TokenUsage>,
        model: Option<String>,
    },
    /// Missing credential, rejected key or unknown model. Shown verbatim.
    ConfigError(String),
    /// Any other provider or network failure.
    Busy { notice: String, diagnostic: String },
}

#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub conversation: Conversation,
    pub reply: TurnReply,
}

/// Run one chat turn.
///
/// `on_delta` receives text fragments as they arrive when streaming is
/// enabled; it is never called for a blocking call.
pub async fn chat_send(
    state: &EngineState,
    conversation: &Conversation,
    input: &str,
    on_delta: &mut (dyn FnMut(&str) + Send),
) -> TurnOutcome {
    let input = input.trim();
    if input.is_empty() {
        return TurnOutcome { conversation: conversation.clone(), reply: TurnReply::Skipped };
    }

    let payload = chat_org::build_payload(conversation, input, &state.config);

    let mut next = conversation.clone();
    next.push_user(input);

    let provider = match state.connect() {
        Ok(p) => p,
        Err(e) => {
            warn!("[chat] {} not sent: {}", next.id(), e);
            let message = match e {
                EngineError::Config(msg) => msg,
                other => other.to_string(),
            };
            return TurnOutcome { conversation: next, reply: TurnReply::ConfigError(message) };
        }
    };

    let result = if payload.stream {
        provider.chat_stream(&payload, on_delta).await
    } else {
        provider.chat(&payload).await
    };

    let reply = match result {
        Ok(completion) => {
            info!(
                "[chat] {} answered by {} ({} chars)",
                next.id(),
                completion.model.as_deref().unwrap_or(&payload.model),
                completion.text.len()
            );
            next.push_assistant(completion.text.clone());
            TurnReply::Answer {
                text: completion.text,
                streamed: payload.stream,
                usage: completion.usage,
                model: completion.model,
            }
        }
        Err(e) if e.is_configuration() => {
            error!("[chat] {} provider rejected configuration: {}", next.id(), e);
            TurnReply::ConfigError(format!(
                "{} rejected the request: {}",
                provider.name(),
                truncate_utf8(&e.to_string(), DIAGNOSTIC_MAX_BYTES)
            ))
        }
        Err(e) => {
            warn!("[chat] {} provider call failed: {}", next.id(), e);
            TurnReply::Busy {
                notice: BUSY_NOTICE.to_string(),
                diagnostic: truncate_utf8(&e.to_string(), DIAGNOSTIC_MAX_BYTES).to_string(),
            }
        }
    };

    TurnOutcome { conversation: next, reply }
}
