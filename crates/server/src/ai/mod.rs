//! AI features powered by Claude API

pub mod client;
pub mod summarizer;

pub use client::ClaudeClient;
