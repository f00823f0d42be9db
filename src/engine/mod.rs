// XO AI Engine
// Everything between the atoms layer and the per-turn command handler.

pub mod chat;
pub mod config;
pub mod conversation;
pub mod models;
pub mod modes;
pub mod providers;
pub mod render;
pub mod state;
pub mod types;
