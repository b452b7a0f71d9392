use std::env;

/// Which completion wire format to speak.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Provider {
    #[default]
    Gemini,
    OpenAi,
}

impl Provider {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "gemini" | "google" => Some(Self::Gemini),
            "openai" | "openai-compatible" => Some(Self::OpenAi),
            _ => None,
        }
    }

    #[must_use]
    pub fn default_base_url(self) -> &'static str {
        match self {
            Provider::Gemini => "https://generativelanguage.googleapis.com/v1beta/models",
            Provider::OpenAi => "https://api.openai.com/v1",
        }
    }

    #[must_use]
    pub fn default_model(self) -> &'static str {
        match self {
            Provider::Gemini => "gemini-2.0-flash",
            Provider::OpenAi => "gpt-4o-mini",
        }
    }
}

#[derive(Clone, Debug)]
pub struct CompletionConfig {
    pub provider: Provider,
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

impl CompletionConfig {
    /// Reads `LEARN_AI_*` variables, falling back to `GEMINI_API_KEY`.
    ///
    /// Returns `None` when no API key is set.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`CompletionConfig::from_env`] with an injectable lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let api_key = lookup("LEARN_AI_API_KEY")
            .or_else(|| lookup("GEMINI_API_KEY"))
            .filter(|key| !key.trim().is_empty())?;
        let provider = lookup("LEARN_AI_PROVIDER")
            .and_then(|raw| Provider::parse(&raw))
            .unwrap_or_default();
        let base_url = lookup("LEARN_AI_BASE_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| provider.default_base_url().into());
        let model = lookup("LEARN_AI_MODEL")
            .filter(|model| !model.trim().is_empty())
            .unwrap_or_else(|| provider.default_model().into());
        Some(Self {
            provider,
            base_url,
            api_key,
            model,
        })
    }
}
