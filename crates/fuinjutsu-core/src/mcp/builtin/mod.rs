//! MCP modules bundled with the application

mod sentiment_analyzer;
mod text_summarizer;
mod text_translator;

pub use sentiment_analyzer::SentimentAnalyzer;
pub use text_summarizer::TextSummarizer;
pub use text_translator::TextTranslator;

use serde_json::Value;

use super::plugin::{JsonMap, PluginError, PluginResult};

/// Non-empty `text` field, or `InvalidInput` with the given message
fn required_text<'a>(input: &'a JsonMap, empty_message: &str) -> PluginResult<&'a str> {
    match input.get("text") {
        None | Some(Value::Null) => Err(PluginError::invalid_input(empty_message)),
        Some(Value::String(text)) if text.is_empty() => Err(PluginError::invalid_input(empty_message)),
        Some(Value::String(text)) => Ok(text),
        Some(_) => Err(PluginError::invalid_input(
            "Le champ 'text' doit être une chaîne de caractères",
        )),
    }
}
