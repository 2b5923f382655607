//! Runtime configuration read once at startup.
//!
//! Values come from the process environment (after an optional `.env` file)
//! and may be overridden by command-line flags in the binary.

use crate::error::{BookError, BookResult};
use crate::models::OutputFormat;
use crate::services::chunker::DEFAULT_CHUNK_SIZE;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_OUTPUT_FILE: &str = "AI_Generated_Book.txt";
pub const TEMPERATURE: f32 = 0.7;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProviderKind {
    #[default]
    Gemini,
    OpenAi,
    Ollama,
}

impl ProviderKind {
    pub fn default_model(self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini-1.5-flash",
            ProviderKind::OpenAi => "gpt-4o-mini",
            ProviderKind::Ollama => "llama2",
        }
    }

    pub fn default_base_url(self) -> &'static str {
        match self {
            ProviderKind::Gemini => "https://generativelanguage.googleapis.com/v1beta",
            ProviderKind::OpenAi => "https://api.openai.com/v1",
            ProviderKind::Ollama => "http://localhost:11434",
        }
    }

    /// Environment key holding this provider's credential.
    pub fn credential_key(self) -> &'static str {
        match self {
            ProviderKind::Gemini => "GEMINI_API",
            ProviderKind::OpenAi => "OPENAI_API_KEY",
            ProviderKind::Ollama => "LLM_API_KEY",
        }
    }

    pub fn requires_credential(self) -> bool {
        !matches!(self, ProviderKind::Ollama)
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ProviderKind::Gemini => "gemini",
            ProviderKind::OpenAi => "openai",
            ProviderKind::Ollama => "ollama",
        })
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" | "google" => Ok(ProviderKind::Gemini),
            "openai" => Ok(ProviderKind::OpenAi),
            "ollama" => Ok(ProviderKind::Ollama),
            other => Err(format!("unknown provider `{}`", other)),
        }
    }
}

/// Values set on the command line. Each one replaces its environment key
/// before that key is parsed or validated.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub provider: Option<ProviderKind>,
    pub chunk_size: Option<usize>,
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub provider: ProviderKind,
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
    pub chunk_size: usize,
    pub output: PathBuf,
    pub format: OutputFormat,
}

impl Config {
    pub fn from_env(overrides: &Overrides) -> BookResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok(), overrides)
    }

    /// Builds a config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F, overrides: &Overrides) -> BookResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let provider = match (overrides.provider, get("BOOK_PROVIDER")) {
            (Some(provider), _) => provider,
            (None, Some(raw)) => raw.parse().map_err(BookError::Config)?,
            (None, None) => ProviderKind::default(),
        };

        let chunk_size = match (overrides.chunk_size, get("BOOK_CHUNK_SIZE")) {
            (Some(size), _) => size,
            (None, Some(raw)) => raw
                .trim()
                .parse::<usize>()
                .map_err(|e| BookError::Config(format!("BOOK_CHUNK_SIZE `{}`: {}", raw, e)))?,
            (None, None) => DEFAULT_CHUNK_SIZE,
        };
        if chunk_size == 0 {
            return Err(BookError::InvalidArgument(
                "chunk size must be a positive integer".to_string(),
            ));
        }

        let format = match (overrides.format, get("BOOK_FORMAT")) {
            (Some(format), _) => format,
            (None, Some(raw)) => raw.parse().map_err(BookError::Config)?,
            (None, None) => OutputFormat::default(),
        };

        Ok(Config {
            provider,
            api_key: get(provider.credential_key()),
            model: get("LLM_MODEL")
                .unwrap_or_else(|| provider.default_model().to_string()),
            base_url: get("LLM_API_URL")
                .unwrap_or_else(|| provider.default_base_url().to_string()),
            temperature: TEMPERATURE,
            chunk_size,
            output: get("BOOK_OUTPUT")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILE)),
            format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn load(pairs: &[(&str, &str)]) -> BookResult<Config> {
        Config::from_lookup(lookup(pairs), &Overrides::default())
    }

    #[test]
    fn defaults_follow_gemini() {
        let config = load(&[("GEMINI_API", "secret")]).unwrap();
        assert_eq!(config.provider, ProviderKind::Gemini);
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.model, "gemini-1.5-flash");
        assert_eq!(config.chunk_size, 2000);
        assert_eq!(config.output, PathBuf::from("AI_Generated_Book.txt"));
        assert_eq!(config.format, OutputFormat::Text);
        assert!((config.temperature - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn missing_credential_is_not_a_config_error() {
        let config = load(&[]).unwrap();
        assert!(config.api_key.is_none());
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = load(&[("GEMINI_API", "  "), ("LLM_MODEL", "")]).unwrap();
        assert!(config.api_key.is_none());
        assert_eq!(config.model, "gemini-1.5-flash");
    }

    #[test]
    fn openai_reads_its_own_key() {
        let config = load(&[
            ("BOOK_PROVIDER", "OpenAI"),
            ("GEMINI_API", "wrong"),
            ("OPENAI_API_KEY", "sk-test"),
        ])
        .unwrap();
        assert_eq!(config.provider, ProviderKind::OpenAi);
        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.base_url, "https://api.openai.com/v1");
    }

    #[test]
    fn zero_chunk_size_is_invalid_argument() {
        let err = load(&[("BOOK_CHUNK_SIZE", "0")]).unwrap_err();
        assert!(matches!(err, BookError::InvalidArgument(_)));

        let err = load(&[("BOOK_CHUNK_SIZE", "-5")]).unwrap_err();
        assert!(matches!(err, BookError::Config(_)));
    }

    #[test]
    fn unknown_provider_is_rejected() {
        let err = load(&[("BOOK_PROVIDER", "claude")]).unwrap_err();
        assert!(matches!(err, BookError::Config(_)));
    }

    #[test]
    fn overrides_replace_invalid_environment_values() {
        let overrides = Overrides {
            provider: Some(ProviderKind::Ollama),
            chunk_size: Some(500),
            format: Some(OutputFormat::Epub),
        };
        let env = lookup(&[
            ("BOOK_PROVIDER", "claude"),
            ("BOOK_CHUNK_SIZE", "0"),
            ("BOOK_FORMAT", "pdf"),
        ]);
        let config = Config::from_lookup(env, &overrides).unwrap();
        assert_eq!(config.provider, ProviderKind::Ollama);
        assert_eq!(config.model, "llama2");
        assert_eq!(config.base_url, "http://localhost:11434");
        assert_eq!(config.chunk_size, 500);
        assert_eq!(config.format, OutputFormat::Epub);
    }

    #[test]
    fn zero_chunk_size_override_is_invalid_argument() {
        let overrides = Overrides {
            chunk_size: Some(0),
            ..Overrides::default()
        };
        let err =
            Config::from_lookup(lookup(&[("BOOK_CHUNK_SIZE", "100")]), &overrides).unwrap_err();
        assert!(matches!(err, BookError::InvalidArgument(_)));
    }

    #[test]
    fn provider_override_reads_that_providers_key() {
        let overrides = Overrides {
            provider: Some(ProviderKind::OpenAi),
            ..Overrides::default()
        };
        let env = lookup(&[("BOOK_PROVIDER", "gemini"), ("OPENAI_API_KEY", "sk")]);
        let config = Config::from_lookup(env, &overrides).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("sk"));
        assert_eq!(config.model, "gpt-4o-mini");
    }

    #[test]
    fn only_ollama_runs_without_credential() {
        assert!(ProviderKind::Gemini.requires_credential());
        assert!(ProviderKind::OpenAi.requires_credential());
        assert!(!ProviderKind::Ollama.requires_credential());
    }
}
