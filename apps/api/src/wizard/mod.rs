//! Comment wizard: profile → post → three reflection rounds → tone and final comment.
//! All generation goes through `llm_client::TextGenerator`, called only from `engine`.

pub mod engine;
pub mod handlers;
pub mod models;
pub mod parser;
pub mod prompts;
pub mod session;
pub mod store;
pub mod tone;
pub mod view;
