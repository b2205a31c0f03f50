pub mod decode;
pub mod demo;
#[cfg(feature = "network")]
pub mod gemini;

use thiserror::Error;

use crate::state::model::{Topic, VocabEntry};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("no API key configured (set GEMINI_API_KEY or api_key in config.toml)")]
    MissingApiKey,
    #[cfg(feature = "network")]
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("provider returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("provider returned no content")]
    EmptyResponse,
    #[error("invalid audio payload: {0}")]
    InvalidAudio(String),
    #[error("{0} is not supported by this provider")]
    Unsupported(&'static str),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ProviderError {
    /// Short label used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::MissingApiKey => "config",
            #[cfg(feature = "network")]
            ProviderError::Http(_) => "network",
            ProviderError::Status { .. } => "status",
            ProviderError::EmptyResponse => "empty",
            ProviderError::InvalidAudio(_) => "audio",
            ProviderError::Unsupported(_) => "unsupported",
            ProviderError::Io(_) => "io",
        }
    }
}

/// Mono 16-bit PCM returned by a speech model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpeechClip {
    pub sample_rate: u32,
    pub samples: Vec<i16>,
}

/// Remote source of generated study content.
///
/// Malformed content is not an error: implementations return an empty list
/// and log it. `Err` is reserved for failures to reach or use the service.
pub trait ContentProvider: Send + Sync {
    fn fetch_topics(&self, band: &str) -> Result<Vec<Topic>, ProviderError>;

    fn fetch_vocab(&self, band: &str, topic_title: &str) -> Result<Vec<VocabEntry>, ProviderError>;

    fn synthesize_speech(&self, phrase: &str) -> Result<SpeechClip, ProviderError>;
}
