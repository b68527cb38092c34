//! Solace: the companion support gateway plus the breathing timer and mood
//! blob engines that drive the wellness client.

pub mod api;
pub mod breathing;
pub mod config;
pub mod cues;
pub mod error;
pub mod llm;
pub mod models;
pub mod mood;
pub mod scheduler;
