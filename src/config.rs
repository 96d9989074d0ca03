use crate::error::{AccountingError, Result};

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const MODEL_VAR: &str = "OPENAI_MODEL";
pub const BASE_URL_VAR: &str = "OPENAI_BASE_URL";

pub const DEFAULT_MODEL: &str = "gpt-4";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Settings for the chat-completion collaborator.
///
/// Built once at startup; a missing key is reported before any request is attempted.
#[derive(Clone, PartialEq, Eq)]
pub struct AssistantConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl std::fmt::Debug for AssistantConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssistantConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl AssistantConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source. Blank values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = non_blank(API_KEY_VAR)
            .ok_or_else(|| AccountingError::MissingCredential(API_KEY_VAR.to_string()))?;

        let mut config = Self::new(api_key.trim());
        if let Some(model) = non_blank(MODEL_VAR) {
            config = config.with_model(model.trim());
        }
        if let Some(base_url) = non_blank(BASE_URL_VAR) {
            config = config.with_base_url(base_url.trim());
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_key_is_a_credential_error() {
        let result = AssistantConfig::from_lookup(lookup_from(&[]));
        assert!(matches!(
            result,
            Err(AccountingError::MissingCredential(ref var)) if var == API_KEY_VAR
        ));

        let result = AssistantConfig::from_lookup(lookup_from(&[(API_KEY_VAR, "   ")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_defaults_and_overrides() {
        let config = AssistantConfig::from_lookup(lookup_from(&[(API_KEY_VAR, "sk-test")])).unwrap();
        assert_eq!(config.api_key, "sk-test");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);

        let config = AssistantConfig::from_lookup(lookup_from(&[
            (API_KEY_VAR, "sk-test"),
            (MODEL_VAR, "gpt-4o-mini"),
            (BASE_URL_VAR, "http://localhost:8080/v1/"),
        ]))
        .unwrap();
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.base_url, "http://localhost:8080/v1");
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = AssistantConfig::new("sk-secret");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("sk-secret"));
    }
}
