//! Translation through HuggingFace with an offline simulation fallback

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::required_text;
use crate::logging::Logger;
use crate::mcp::catalog::PluginContext;
use crate::mcp::plugin::{InputExt, JsonMap, Plugin, PluginMetadata, PluginResult};
use crate::secrets::SecretStore;

const EN_TO_FR: &[(&str, &str)] = &[
    ("Hello", "Bonjour"),
    ("Good morning", "Bonjour"),
    ("How are you?", "Comment allez-vous ?"),
    ("Thank you", "Merci"),
    ("The weather is nice today", "Le temps est beau aujourd'hui"),
];

const FR_TO_EN: &[(&str, &str)] = &[
    ("Bonjour", "Hello"),
    ("Comment allez-vous ?", "How are you?"),
    ("Merci", "Thank you"),
    ("Le temps est beau aujourd'hui", "The weather is nice today"),
];

fn lookup(table: &[(&str, &str)], text: &str) -> Option<String> {
    table
        .iter()
        .find(|(from, _)| *from == text)
        .map(|(_, to)| (*to).to_string())
}

/// Guess the language of `text` from how it starts
fn detect_language(text: &str) -> &'static str {
    if text.starts_with("Hello") || text.starts_with("The") {
        "en"
    } else if text.starts_with("Bonjour") || text.starts_with("Le") {
        "fr"
    } else {
        "en"
    }
}

/// Offline translation used when no hosted service answered
fn simulate(text: &str, source_lang: &str, target_lang: &str, service: &str) -> JsonMap {
    let source_lang = if source_lang == "auto" {
        detect_language(text)
    } else {
        source_lang
    };

    let translated = match (source_lang, target_lang) {
        ("en", "fr") => lookup(EN_TO_FR, text)
            .unwrap_or_else(|| format!("[Traduction de '{}' en français]", text)),
        ("fr", "en") => lookup(FR_TO_EN, text)
            .unwrap_or_else(|| format!("[Translation of '{}' to English]", text)),
        _ => format!("[{} -> {}] {}", source_lang, target_lang, text),
    };

    let service = if service == "simulation" {
        "simulation".to_string()
    } else {
        format!("{} (simulation)", service)
    };

    let mut output = JsonMap::new();
    output.insert("translated_text".into(), json!(translated));
    output.insert("source_lang".into(), json!(source_lang));
    output.insert("target_lang".into(), json!(target_lang));
    output.insert("service".into(), json!(service));
    output
}

fn remote_error(message: String, source_lang: &str, target_lang: &str) -> JsonMap {
    let mut output = JsonMap::new();
    output.insert("error".into(), json!(message));
    output.insert("service".into(), json!("huggingface"));
    output.insert("source_lang".into(), json!(source_lang));
    output.insert("target_lang".into(), json!(target_lang));
    output
}

pub struct TextTranslator {
    metadata: PluginMetadata,
    secrets: Arc<dyn SecretStore>,
    http: reqwest::Client,
    api_base: String,
    logger: Arc<dyn Logger>,
}

impl TextTranslator {
    pub fn new(ctx: &PluginContext) -> Self {
        Self {
            metadata: PluginMetadata::new(
                "Traducteur de texte",
                "Traduit un texte d'une langue à une autre en utilisant un modèle",
            )
            .input("text", "str - Le texte à traduire")
            .input("source_lang", "str - La langue source (par défaut: auto)")
            .input("target_lang", "str - La langue cible (par défaut: fr)")
            .input(
                "service",
                "str - Service à utiliser: huggingface, google, simulation (par défaut: huggingface)",
            )
            .output("translated_text", "str - Le texte traduit")
            .output("source_lang", "str - La langue source détectée")
            .output("target_lang", "str - La langue cible utilisée")
            .output("service", "str - Service utilisé pour la traduction"),
            secrets: ctx.secrets.clone(),
            http: ctx.http.clone(),
            api_base: ctx.huggingface_api_base.trim_end_matches('/').to_string(),
            logger: ctx.logger.clone(),
        }
    }

    fn api_key(&self, service: &str) -> Option<String> {
        self.secrets.get(service).filter(|key| !key.is_empty())
    }

    /// Call the opus-mt model for the language pair
    ///
    /// Transport errors are returned so the caller can fall back; an HTTP
    /// error status or an unreadable body yields an error mapping instead.
    async fn translate_remote(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
        api_key: &str,
    ) -> Result<JsonMap, reqwest::Error> {
        let model_source = if source_lang == "auto" { "en" } else { source_lang };
        let url = format!(
            "{}/Helsinki-NLP/opus-mt-{}-{}",
            self.api_base, model_source, target_lang
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(api_key)
            .json(&json!({ "inputs": text }))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status != reqwest::StatusCode::OK {
            return Ok(remote_error(
                format!("Erreur API ({}): {}", status.as_u16(), body),
                source_lang,
                target_lang,
            ));
        }

        let parsed: Value = match serde_json::from_str(&body) {
            Ok(value) => value,
            Err(e) => {
                return Ok(remote_error(
                    format!("Erreur lors du traitement de la réponse: {}", e),
                    source_lang,
                    target_lang,
                ))
            }
        };

        let translated = match parsed.as_array().and_then(|items| items.first()) {
            Some(first) => first
                .get("translation_text")
                .and_then(Value::as_str)
                .unwrap_or(text)
                .to_string(),
            None => parsed.to_string(),
        };

        let mut output = JsonMap::new();
        output.insert("translated_text".into(), json!(translated));
        output.insert("source_lang".into(), json!(source_lang));
        output.insert("target_lang".into(), json!(target_lang));
        output.insert("service".into(), json!("huggingface"));
        Ok(output)
    }
}

#[async_trait]
impl Plugin for TextTranslator {
    fn metadata(&self) -> &PluginMetadata {
        &self.metadata
    }

    async fn invoke(&self, input: &JsonMap) -> PluginResult<JsonMap> {
        let text = required_text(input, "Le texte à traduire ne peut pas être vide")?;
        let source_lang = input.str_or("source_lang", "auto")?;
        let target_lang = input.str_or("target_lang", "fr")?;
        let service = input.str_or("service", "huggingface")?;

        match service {
            "huggingface" => {
                if let Some(key) = self.api_key("huggingface") {
                    match self.translate_remote(text, source_lang, target_lang, &key).await {
                        Ok(output) => return Ok(output),
                        Err(e) => self.logger.warn(&format!(
                            "[TextTranslator] HuggingFace request failed, using simulation: {}",
                            e
                        )),
                    }
                }
            }
            "google" => {
                if self.api_key("google").is_some() {
                    self.logger.info(
                        "[TextTranslator] Google translation is not available, using simulation",
                    );
                }
            }
            _ => {}
        }

        Ok(simulate(text, source_lang, target_lang, service))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::NoOpLogger;
    use crate::secrets::MemorySecretStore;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    // Nothing listens on the discard port
    const UNREACHABLE_BASE: &str = "http://127.0.0.1:9";

    fn translator(secrets: MemorySecretStore, api_base: &str) -> TextTranslator {
        let ctx = PluginContext::new(Arc::new(secrets), Arc::new(NoOpLogger))
            .with_huggingface_api_base(api_base);
        TextTranslator::new(&ctx)
    }

    fn offline() -> TextTranslator {
        translator(MemorySecretStore::new(), UNREACHABLE_BASE)
    }

    fn with_key(api_base: &str) -> TextTranslator {
        translator(
            MemorySecretStore::with_secrets([("huggingface", "hf_test")]),
            api_base,
        )
    }

    fn input(value: Value) -> JsonMap {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_simulation_known_phrase() {
        let out = offline()
            .invoke(&input(json!({"text": "Hello", "service": "simulation"})))
            .await
            .unwrap();
        assert_eq!(out["translated_text"], "Bonjour");
        assert_eq!(out["source_lang"], "en");
        assert_eq!(out["target_lang"], "fr");
        assert_eq!(out["service"], "simulation");
    }

    #[tokio::test]
    async fn test_simulation_fr_to_en() {
        let out = offline()
            .invoke(&input(json!({"text": "Merci", "source_lang": "fr", "target_lang": "en"})))
            .await
            .unwrap();
        assert_eq!(out["translated_text"], "Thank you");
        assert_eq!(out["service"], "huggingface (simulation)");
    }

    #[tokio::test]
    async fn test_simulation_placeholders() {
        let t = offline();

        let out = t.invoke(&input(json!({"text": "Unknown words"}))).await.unwrap();
        assert_eq!(out["translated_text"], "[Traduction de 'Unknown words' en français]");

        let out = t
            .invoke(&input(json!({"text": "Le chat", "target_lang": "en"})))
            .await
            .unwrap();
        assert_eq!(out["source_lang"], "fr");
        assert_eq!(out["translated_text"], "[Translation of 'Le chat' to English]");

        let out = t
            .invoke(&input(json!({"text": "Hola", "source_lang": "es", "target_lang": "de", "service": "google"})))
            .await
            .unwrap();
        assert_eq!(out["translated_text"], "[es -> de] Hola");
        assert_eq!(out["service"], "google (simulation)");
    }

    #[tokio::test]
    async fn test_transport_failure_falls_back() {
        let out = with_key(UNREACHABLE_BASE)
            .invoke(&input(json!({"text": "Thank you"})))
            .await
            .unwrap();
        assert_eq!(out["translated_text"], "Merci");
        assert_eq!(out["service"], "huggingface (simulation)");
    }

    #[tokio::test]
    async fn test_remote_translation() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/Helsinki-NLP/opus-mt-en-fr"))
            .and(header("authorization", "Bearer hf_test"))
            .and(body_json(json!({"inputs": "Hello world"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([{"translation_text": "Bonjour le monde"}])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let out = with_key(&format!("{}/models", server.uri()))
            .invoke(&input(json!({"text": "Hello world"})))
            .await
            .unwrap();

        assert_eq!(out["translated_text"], "Bonjour le monde");
        assert_eq!(out["service"], "huggingface");
        assert_eq!(out["source_lang"], "auto");
    }

    #[tokio::test]
    async fn test_remote_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/Helsinki-NLP/opus-mt-de-en"))
            .respond_with(ResponseTemplate::new(503).set_body_string(r#"{"error":"loading"}"#))
            .expect(1)
            .mount(&server)
            .await;

        let out = with_key(&format!("{}/models", server.uri()))
            .invoke(&input(json!({"text": "Hallo", "source_lang": "de", "target_lang": "en"})))
            .await
            .unwrap();

        assert_eq!(out["error"], r#"Erreur API (503): {"error":"loading"}"#);
        assert_eq!(out["service"], "huggingface");
        assert_eq!(out["source_lang"], "de");
    }

    #[tokio::test]
    async fn test_unparseable_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/Helsinki-NLP/opus-mt-en-fr"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>busy</html>"))
            .mount(&server)
            .await;

        let out = with_key(&format!("{}/models", server.uri()))
            .invoke(&input(json!({"text": "Hello"})))
            .await
            .unwrap();

        let error = out["error"].as_str().unwrap();
        assert!(error.starts_with("Erreur lors du traitement de la réponse"));
    }

    #[tokio::test]
    async fn test_empty_text_rejected() {
        let err = offline().invoke(&JsonMap::new()).await.unwrap_err();
        assert!(err.is_invalid_input());
        assert_eq!(err.to_string(), "Le texte à traduire ne peut pas être vide");
    }
}
