// ── XO Atoms Layer ─────────────────────────────────────────────────────────
// Pure constants, error types, data types and the provider trait.
// Dependency rule: atoms may only depend on std and external pure crates.
// Nothing here may import from engine/ or commands/.

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;
