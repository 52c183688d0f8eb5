//! Keyword-based sentiment analysis

use async_trait::async_trait;
use serde_json::json;

use super::required_text;
use crate::mcp::plugin::{JsonMap, Plugin, PluginMetadata, PluginResult};

const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "excellent", "wonderful", "happy", "love", "best", "bien", "bon",
    "merveilleux", "heureux", "aime", "meilleur",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad", "terrible", "awful", "horrible", "sad", "hate", "worst", "mauvais", "affreux",
    "triste", "déteste", "pire",
];

/// Number of keywords that appear anywhere in `text`
///
/// Matching is by substring, so "bon" also matches inside "bonjour".
fn count_keywords(text: &str, keywords: &[&str]) -> usize {
    keywords.iter().filter(|word| text.contains(*word)).count()
}

pub struct SentimentAnalyzer {
    metadata: PluginMetadata,
}

impl SentimentAnalyzer {
    pub fn new() -> Self {
        Self {
            metadata: PluginMetadata::new(
                "Analyseur de sentiment",
                "Analyse le sentiment d'un texte et retourne sa polarité",
            )
            .input("text", "str - Le texte à analyser")
            .output("sentiment", "str - Le sentiment détecté (positif, négatif, neutre)")
            .output("score", "float - Le score de confiance (entre -1 et 1)")
            .output("explanation", "str - Une explication du résultat"),
        }
    }
}

impl Default for SentimentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Plugin for SentimentAnalyzer {
    fn metadata(&self) -> &PluginMetadata {
        &self.metadata
    }

    async fn invoke(&self, input: &JsonMap) -> PluginResult<JsonMap> {
        let text = required_text(input, "Le texte à analyser ne peut pas être vide")?;
        let lowered = text.to_lowercase();

        let positive = count_keywords(&lowered, POSITIVE_WORDS);
        let negative = count_keywords(&lowered, NEGATIVE_WORDS);
        let balance = (positive as f64 - negative as f64) / 5.0;

        let (sentiment, score, explanation) = if positive > negative {
            (
                "positif",
                balance.min(1.0),
                format!(
                    "Le texte contient {} mot(s) positif(s) et {} mot(s) négatif(s).",
                    positive, negative
                ),
            )
        } else if negative > positive {
            (
                "négatif",
                balance.max(-1.0),
                format!(
                    "Le texte contient {} mot(s) négatif(s) et {} mot(s) positif(s).",
                    negative, positive
                ),
            )
        } else {
            (
                "neutre",
                0.0,
                "Le texte ne contient pas de tendance claire vers un sentiment positif ou négatif."
                    .to_string(),
            )
        };

        let mut output = JsonMap::new();
        output.insert("sentiment".into(), json!(sentiment));
        output.insert("score".into(), json!(score));
        output.insert("explanation".into(), json!(explanation));
        Ok(output)
    }
}
