//! Extractive summarizer keeping leading sentences

use async_trait::async_trait;
use serde_json::{json, Value};

use super::required_text;
use crate::mcp::plugin::{JsonMap, Plugin, PluginError, PluginMetadata, PluginResult};

const DEFAULT_MAX_LENGTH: usize = 200;
const INVALID_MAX_LENGTH: &str = "La longueur maximale doit être un entier positif";

/// Accepts integers, floats (truncated) and numeric strings
fn parse_max_length(value: Option<&Value>) -> PluginResult<usize> {
    let invalid = || PluginError::invalid_input(INVALID_MAX_LENGTH);

    let parsed = match value {
        None | Some(Value::Null) => return Ok(DEFAULT_MAX_LENGTH),
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .ok_or_else(invalid)?,
        Some(Value::String(s)) => s.trim().parse::<i64>().map_err(|_| invalid())?,
        Some(_) => return Err(invalid()),
    };

    if parsed <= 0 {
        return Err(invalid());
    }
    Ok(parsed as usize)
}

/// Leading `.`-terminated sentences that fit in `max_length` characters
fn summarize(text: &str, max_length: usize) -> (String, usize) {
    let mut summary = String::new();
    let mut length = 0;

    for sentence in text.split('.') {
        let sentence_length = sentence.chars().count();
        if length + sentence_length + 1 > max_length {
            break;
        }
        summary.push_str(sentence);
        summary.push('.');
        length += sentence_length + 1;
    }

    (summary, length)
}

pub struct TextSummarizer {
    metadata: PluginMetadata,
}

impl TextSummarizer {
    pub fn new() -> Self {
        Self {
            metadata: PluginMetadata::new(
                "Résumeur de texte",
                "Génère un résumé court d'un texte plus long",
            )
            .input("text", "str - Le texte à résumer")
            .input(
                "max_length",
                "int - Longueur maximale du résumé en caractères (par défaut: 200)",
            )
            .output("summary", "str - Le résumé généré")
            .output("original_length", "int - Longueur du texte original")
            .output("summary_length", "int - Longueur du résumé")
            .output("reduction_percent", "float - Pourcentage de réduction"),
        }
    }
}

impl Default for TextSummarizer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Plugin for TextSummarizer {
    fn metadata(&self) -> &PluginMetadata {
        &self.metadata
    }

    async fn invoke(&self, input: &JsonMap) -> PluginResult<JsonMap> {
        let text = required_text(input, "Le texte à résumer ne peut pas être vide")?;
        let max_length = parse_max_length(input.get("max_length"))?;
        let original_length = text.chars().count();

        let (summary, summary_length) = if original_length <= max_length {
            (text.to_string(), original_length)
        } else {
            summarize(text, max_length)
        };

        let reduction_percent =
            (original_length - summary_length) as f64 / original_length as f64 * 100.0;

        let mut output = JsonMap::new();
        output.insert("summary".into(), json!(summary));
        output.insert("original_length".into(), json!(original_length));
        output.insert("summary_length".into(), json!(summary_length));
        output.insert("reduction_percent".into(), json!(reduction_percent));
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn run(input: Value) -> PluginResult<JsonMap> {
        let input = input.as_object().cloned().unwrap();
        TextSummarizer::new().invoke(&input).await
    }

    #[tokio::test]
    async fn test_short_text_unchanged() {
        let out = run(json!({"text": "Short text."})).await.unwrap();
        assert_eq!(out["summary"], "Short text.");
        assert_eq!(out["original_length"], 11);
        assert_eq!(out["summary_length"], 11);
        assert_eq!(out["reduction_percent"].as_f64().unwrap(), 0.0);
    }

    #[tokio::test]
    async fn test_keeps_leading_sentences() {
        let text = "First one. Second one. Third sentence is long.";
        let out = run(json!({"text": text, "max_length": 25})).await.unwrap();

        assert_eq!(out["summary"], "First one. Second one.");
        assert_eq!(out["summary_length"], 22);
        assert_eq!(out["original_length"], 46);
        let reduction = out["reduction_percent"].as_f64().unwrap();
        assert!((reduction - 24.0 / 46.0 * 100.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_first_sentence_too_long_gives_empty_summary() {
        let out = run(json!({"text": "An overly long first sentence. Tail.", "max_length": 5}))
            .await
            .unwrap();
        assert_eq!(out["summary"], "");
        assert_eq!(out["summary_length"], 0);
        assert_eq!(out["reduction_percent"].as_f64().unwrap(), 100.0);
    }

    #[tokio::test]
    async fn test_lengths_count_characters() {
        let out = run(json!({"text": "Éèà.Üöä.", "max_length": 4})).await.unwrap();
        assert_eq!(out["original_length"], 8);
        assert_eq!(out["summary"], "Éèà.");
        assert_eq!(out["summary_length"], 4);
    }

    #[tokio::test]
    async fn test_max_length_forms() {
        let text = "One. Two. Three.";
        let from_string = run(json!({"text": text, "max_length": "5"})).await.unwrap();
        assert_eq!(from_string["summary"], "One.");

        let from_float = run(json!({"text": text, "max_length": 5.9})).await.unwrap();
        assert_eq!(from_float["summary"], "One.");
    }

    #[tokio::test]
    async fn test_invalid_max_length() {
        for bad in [json!(0), json!(-3), json!("abc"), json!("12.5"), json!(true), json!([1])] {
            let err = run(json!({"text": "Some. Text.", "max_length": bad}))
                .await
                .unwrap_err();
            assert!(err.is_invalid_input());
            assert_eq!(err.to_string(), INVALID_MAX_LENGTH);
        }
    }

    #[tokio::test]
    async fn test_empty_text_rejected() {
        let err = run(json!({"text": ""})).await.unwrap_err();
        assert_eq!(err.to_string(), "Le texte à résumer ne peut pas être vide");
    }
}
