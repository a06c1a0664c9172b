//! Provider factory — build the configured model backend from `AppConfig`.

use crate::openai_compat::OpenAiCompatProvider;
use deskhand_config::AppConfig;
use deskhand_core::error::ProviderError;
use deskhand_core::provider::Provider;
use std::sync::Arc;

/// Build the default provider named in the configuration.
///
/// Per-provider config entries override the base URL and API key; otherwise
/// the provider name selects a well-known endpoint.
pub fn build_provider(config: &AppConfig) -> Result<Arc<dyn Provider>, ProviderError> {
    let name = config.default_provider.as_str();

    let provider_config = config.providers.get(name);

    let api_key = provider_config
        .and_then(|p| p.api_key.clone())
        .or_else(|| config.api_key.clone())
        .unwrap_or_default();

    let base_url = provider_config
        .and_then(|p| p.api_url.clone())
        .unwrap_or_else(|| default_base_url(name));

    if api_key.is_empty() && name != "ollama" {
        return Err(ProviderError::NotConfigured(format!(
            "No API key configured for provider '{name}'"
        )));
    }

    let provider = OpenAiCompatProvider::new(name, base_url, api_key)?;
    Ok(Arc::new(provider))
}

fn default_base_url(provider: &str) -> String {
    match provider {
        "openai" => "https://api.openai.com/v1".into(),
        "ollama" => "http://localhost:11434/v1".into(),
        "together" => "https://api.together.xyz/v1".into(),
        // OpenRouter is the catch-all default
        _ => "https://openrouter.ai/api/v1".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deskhand_config::ProviderConfig;

    #[test]
    fn builds_default_provider_with_key() {
        let config = AppConfig {
            api_key: Some("sk-test".into()),
            ..Default::default()
        };
        let provider = build_provider(&config).unwrap();
        assert_eq!(provider.name(), "openrouter");
    }

    #[test]
    fn missing_key_is_rejected() {
        let config = AppConfig::default();
        let err = build_provider(&config).err().unwrap();
        assert!(matches!(err, ProviderError::NotConfigured(_)));
    }

    #[test]
    fn ollama_needs_no_key() {
        let config = AppConfig {
            default_provider: "ollama".into(),
            ..Default::default()
        };
        assert!(build_provider(&config).is_ok());
    }

    #[test]
    fn provider_entry_overrides_url_and_key() {
        let mut config = AppConfig::default();
        config.default_provider = "custom".into();
        config.providers.insert(
            "custom".into(),
            ProviderConfig {
                api_key: Some("sk-custom".into()),
                api_url: Some("https://llm.internal/v1".into()),
                default_model: None,
            },
        );
        let provider = build_provider(&config).unwrap();
        assert_eq!(provider.name(), "custom");
    }
}
