//! Shared types for chat provider requests

mod message;

pub use message::{ChatMessage, MessageRole};
