use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_speech_model")]
    pub speech_model: String,
    #[serde(default = "default_voice")]
    pub voice: String,
    #[serde(default = "default_native_language")]
    pub native_language: String,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_preset_bands")]
    pub preset_bands: Vec<String>,
    #[serde(default = "default_topic_count")]
    pub topic_count: usize,
    #[serde(default = "default_vocab_count")]
    pub vocab_count: usize,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_audio_player")]
    pub audio_player: Vec<String>,
    #[serde(default = "default_speech_command")]
    pub speech_command: Vec<String>,
}

fn default_api_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}
fn default_model() -> String {
    "gemini-3-flash-preview".to_string()
}
fn default_speech_model() -> String {
    "gemini-2.5-flash-preview-tts".to_string()
}
fn default_voice() -> String {
    "Kore".to_string()
}
fn default_native_language() -> String {
    "Vietnamese".to_string()
}
fn default_theme() -> String {
    "emerald".to_string()
}
fn default_preset_bands() -> Vec<String> {
    ["4.0", "5.5", "6.5", "7.5", "8.5"]
        .iter()
        .map(|b| b.to_string())
        .collect()
}
fn default_topic_count() -> usize {
    12
}
fn default_vocab_count() -> usize {
    20
}
fn default_request_timeout_secs() -> u64 {
    60
}
fn default_audio_player() -> Vec<String> {
    if cfg!(target_os = "macos") {
        vec!["afplay".to_string()]
    } else {
        vec!["aplay".to_string(), "-q".to_string()]
    }
}
fn default_speech_command() -> Vec<String> {
    if cfg!(target_os = "macos") {
        vec!["say".to_string()]
    } else {
        vec!["espeak-ng".to_string(), "-v".to_string(), "en-us".to_string()]
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: default_api_base_url(),
            model: default_model(),
            speech_model: default_speech_model(),
            voice: default_voice(),
            native_language: default_native_language(),
            theme: default_theme(),
            preset_bands: default_preset_bands(),
            topic_count: default_topic_count(),
            vocab_count: default_vocab_count(),
            request_timeout_secs: default_request_timeout_secs(),
            audio_player: default_audio_player(),
            speech_command: default_speech_command(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = fs::read_to_string(path)?;
            toml::from_str::<Config>(&content)?
        } else {
            Config::default()
        };
        config.normalize();
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vocabcard")
            .join("config.toml")
    }

    /// Environment wins over the file so keys need not be written to disk.
    pub fn resolved_api_key(&self) -> Option<String> {
        ["GEMINI_API_KEY", "API_KEY"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .chain(self.api_key.clone())
            .map(|key| key.trim().to_string())
            .find(|key| !key.is_empty())
    }

    /// Repair values a hand-edited file may have broken.
    pub fn normalize(&mut self) {
        self.topic_count = self.topic_count.max(1);
        self.vocab_count = self.vocab_count.max(1);
        self.request_timeout_secs = self.request_timeout_secs.max(1);
        self.preset_bands.retain(|b| !b.trim().is_empty());
        if self.preset_bands.is_empty() {
            self.preset_bands = default_preset_bands();
        }
        self.api_base_url = self.api_base_url.trim_end_matches('/').to_string();
    }
}
