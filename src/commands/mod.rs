// XO Commands — thin orchestration layer over the engine.
// These functions: take state + input → call engine functions → return.

pub mod chat;
