//! Application settings and configuration types.
//!
//! Settings are persisted to `~/.config/condense/settings.json` (or XDG
//! equivalent) and loaded at startup. Environment variables override the
//! stored values: `CONDENSE_API_URL` for the extraction service,
//! `GEMINI_API_KEY` for the AI provider, `CONDENSE_MAIL_RELAY` for the
//! relay endpoint.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable naming the extraction service base URL.
pub const ENV_API_URL: &str = "CONDENSE_API_URL";
/// Environment variable carrying the Gemini API key.
pub const ENV_API_KEY: &str = "GEMINI_API_KEY";
/// Environment variable naming the mail relay endpoint.
pub const ENV_MAIL_RELAY: &str = "CONDENSE_MAIL_RELAY";

/// Top-level application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Text extraction configuration.
    pub extraction: ExtractionSettings,
    /// AI provider configuration.
    pub ai: AiSettings,
    /// Mail relay configuration.
    pub mail: MailSettings,
}

/// Configuration for the text extraction routes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionSettings {
    /// Base URL of the remote PDF extraction service.
    pub api_base_url: String,
    /// Request timeout in seconds for the remote service.
    pub timeout_secs: u64,
    /// Tesseract language code for image OCR.
    pub ocr_language: String,
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000".to_string(),
            timeout_secs: 60,
            ocr_language: "eng".to_string(),
        }
    }
}

/// Configuration for the generative-AI provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiSettings {
    /// API key; absence is a hard failure at summarization time, not startup.
    pub api_key: Option<String>,
    /// Model identifier.
    pub model: String,
    /// Sampling temperature for summaries.
    pub temperature: f32,
    /// Custom API endpoint override.
    pub base_url: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-2.5-pro".to_string(),
            temperature: 0.4,
            base_url: None,
            timeout_secs: 120,
        }
    }
}

/// Configuration for the mail relay.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MailSettings {
    /// Relay endpoint receiving the send-mail POST.
    pub relay_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Default email subject.
    pub default_subject: String,
    /// Default plain-text message preceding the summary.
    pub default_message: String,
}

impl Default for MailSettings {
    fn default() -> Self {
        Self {
            relay_url: "http://localhost:5000/send-mail".to_string(),
            timeout_secs: 30,
            default_subject: "AI Generated Summary".to_string(),
            default_message: "Please find the AI-generated summary attached below:\n\n".to_string(),
        }
    }
}

impl Settings {
    /// Loads settings from disk, falling back to defaults, then applies
    /// environment overrides.
    pub fn load() -> Self {
        let mut settings = Self::load_from_disk().unwrap_or_else(|e| {
            tracing::warn!("Could not load settings, using defaults: {}", e);
            Self::default()
        });
        settings.apply_env_overrides();
        settings
    }

    fn load_from_disk() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("cannot parse {}", path.display()))
    }

    /// Persists the settings as JSON in the user config directory.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, contents)
            .with_context(|| format!("cannot write {}", path.display()))
    }

    fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("com", "panbanda", "condense")
            .context("cannot determine config directory")?;
        Ok(dirs.config_dir().join("settings.json"))
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(ENV_API_URL) {
            if !url.is_empty() {
                self.extraction.api_base_url = url;
            }
        }
        if let Ok(key) = std::env::var(ENV_API_KEY) {
            if !key.is_empty() {
                self.ai.api_key = Some(key);
            }
        }
        if let Ok(url) = std::env::var(ENV_MAIL_RELAY) {
            if !url.is_empty() {
                self.mail.relay_url = url;
            }
        }
    }

    /// Validates that the configured endpoints are well-formed URLs.
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.extraction.api_base_url)
            .with_context(|| format!("invalid extraction URL: {}", self.extraction.api_base_url))?;
        url::Url::parse(&self.mail.relay_url)
            .with_context(|| format!("invalid mail relay URL: {}", self.mail.relay_url))?;
        if let Some(base) = &self.ai.base_url {
            url::Url::parse(base).with_context(|| format!("invalid AI base URL: {}", base))?;
        }
        Ok(())
    }
}
