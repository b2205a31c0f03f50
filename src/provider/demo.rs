use rust_embed::Embed;

use crate::provider::decode::decode_list;
use crate::provider::{ContentProvider, ProviderError, SpeechClip};
use crate::state::model::{Topic, VocabEntry};

#[derive(Embed)]
#[folder = "assets/demo/"]
struct DemoAssets;

/// Offline provider serving bundled sample content. The same vocabulary list
/// is returned for every topic; speech always goes to the fallback synthesizer.
#[derive(Default)]
pub struct DemoProvider;

impl DemoProvider {
    pub fn new() -> Self {
        Self
    }

    fn asset(name: &str) -> String {
        DemoAssets::get(name)
            .and_then(|file| String::from_utf8(file.data.into_owned()).ok())
            .unwrap_or_default()
    }
}

impl ContentProvider for DemoProvider {
    fn fetch_topics(&self, band: &str) -> Result<Vec<Topic>, ProviderError> {
        tracing::debug!(band, "serving demo topics");
        Ok(decode_list(&Self::asset("topics.json"), "topics"))
    }

    fn fetch_vocab(&self, band: &str, topic_title: &str) -> Result<Vec<VocabEntry>, ProviderError> {
        tracing::debug!(band, topic_title, "serving demo vocabulary");
        Ok(decode_list(&Self::asset("vocab.json"), "vocab"))
    }

    fn synthesize_speech(&self, _phrase: &str) -> Result<SpeechClip, ProviderError> {
        Err(ProviderError::Unsupported("speech synthesis"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_topics_decode_fully() {
        let topics = DemoProvider::new().fetch_topics("6.5").unwrap();
        assert_eq!(topics.len(), 12);
        assert!(topics.iter().any(|t| t.title == "Environment"));
    }

    #[test]
    fn bundled_vocab_decodes_fully() {
        let vocab = DemoProvider::new().fetch_vocab("6.5", "Environment").unwrap();
        assert_eq!(vocab.len(), 20);
        assert!(vocab.iter().all(|v| !v.phrase.is_empty()));
    }

    #[test]
    fn speech_is_unsupported() {
        let err = DemoProvider::new().synthesize_speech("hello").unwrap_err();
        assert_eq!(err.kind(), "unsupported");
    }
}
