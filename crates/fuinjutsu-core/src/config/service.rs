//! Service id canonicalisation and secret masking

const MASK_CHAR: char = '•';

/// Services a key is commonly stored for: (canonical id, display name)
pub const KNOWN_SERVICES: &[(&str, &str)] = &[
    ("huggingface", "HuggingFace"),
    ("openai", "OpenAI"),
    ("anthropic", "Anthropic"),
    ("google", "Google AI"),
    ("mistral", "Mistral AI"),
    ("cohere", "Cohere"),
];

/// Display name for a service id, falling back to the id itself
pub fn display_name(service_id: &str) -> &str {
    KNOWN_SERVICES
        .iter()
        .find(|(id, _)| *id == service_id)
        .map(|(_, name)| *name)
        .unwrap_or(service_id)
}

/// Normalise a service name to its canonical id
///
/// Trims, lowercases and joins whitespace-separated words with `_`:
/// `"Hugging Face"` becomes `"hugging_face"`.
pub fn canonical_service_id(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

/// Mask a secret for display, keeping only the last four characters
///
/// Secrets of four characters or fewer are fully hidden.
pub fn mask_secret(secret: &str) -> String {
    let len = secret.chars().count();
    if len > 4 {
        let tail: String = secret.chars().skip(len - 4).collect();
        format!("{}{}", MASK_CHAR.to_string().repeat(8), tail)
    } else {
        MASK_CHAR.to_string().repeat(12)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_service_id() {
        assert_eq!(canonical_service_id("OpenAI"), "openai");
        assert_eq!(canonical_service_id("  Hugging Face "), "hugging_face");
        assert_eq!(canonical_service_id("Mistral\tAI"), "mistral_ai");
        assert_eq!(canonical_service_id("   "), "");
        // Idempotent
        assert_eq!(canonical_service_id("hugging_face"), "hugging_face");
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("google"), "Google AI");
        assert_eq!(display_name("custom_llm"), "custom_llm");
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("sk-abcdef1234"), "••••••••1234");
        assert_eq!(mask_secret("abcd"), "••••••••••••");
        assert_eq!(mask_secret(""), "••••••••••••");
    }
}
