use std::time::Duration;

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::config::Config;
use crate::provider::decode::decode_list;
use crate::provider::{ContentProvider, ProviderError, SpeechClip};
use crate::state::model::{Topic, VocabEntry};

/// Sample rate the TTS models emit when the MIME type does not say otherwise.
const DEFAULT_SPEECH_RATE: u32 = 24_000;

/// Content provider backed by the Gemini `generateContent` REST endpoint.
pub struct GeminiProvider {
    client: reqwest::blocking::Client,
    api_key: String,
    base_url: String,
    model: String,
    speech_model: String,
    voice: String,
    native_language: String,
    topic_count: usize,
    vocab_count: usize,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    text: Option<String>,
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    #[serde(default)]
    mime_type: String,
    data: String,
}

impl GenerateResponse {
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }

    fn inline_data(&self) -> Option<&InlineData> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|content| content.parts.iter().find_map(|p| p.inline_data.as_ref()))
    }
}

impl GeminiProvider {
    pub fn from_config(config: &Config) -> Result<Self, ProviderError> {
        let api_key = config
            .resolved_api_key()
            .ok_or(ProviderError::MissingApiKey)?;
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            client,
            api_key,
            base_url: config.api_base_url.clone(),
            model: config.model.clone(),
            speech_model: config.speech_model.clone(),
            voice: config.voice.clone(),
            native_language: config.native_language.clone(),
            topic_count: config.topic_count,
            vocab_count: config.vocab_count,
        })
    }

    fn generate(&self, model: &str, body: &Value) -> Result<String, ProviderError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, model);
        tracing::debug!(model, "generateContent request");
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()?;
        let status = response.status();
        let text = response.text()?;
        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body: truncate(&text, 300),
            });
        }
        Ok(text)
    }

    /// Runs a JSON-mode request and decodes the model's array tolerantly.
    fn generate_list<T: serde::de::DeserializeOwned>(
        &self,
        prompt: String,
        item_schema: Value,
        what: &str,
    ) -> Result<Vec<T>, ProviderError> {
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": { "type": "ARRAY", "items": item_schema }
            }
        });
        let raw = self.generate(&self.model, &body)?;
        let envelope = match serde_json::from_str::<GenerateResponse>(&raw) {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::warn!(kind = "malformed", what, error = %e, "unreadable response envelope");
                return Ok(Vec::new());
            }
        };
        Ok(decode_list(&envelope.text(), what))
    }

    fn topics_prompt(&self, band: &str) -> String {
        format!(
            "You are an IELTS expert. Suggest the {count} most important vocabulary topics \
             for a learner currently at band {band}. For each topic give an English title, \
             the title in {lang}, and a short description (in {lang}) of why it matters at \
             this band, plus the exam section where it appears most often \
             (one of \"Part 1\", \"Part 2\", \"Part 3\", \"Writing\"). \
             Return a JSON array of objects: \
             {{id, title, vietnameseTitle, description, commonInPart}}. \
             The vietnameseTitle field holds the {lang} title.",
            count = self.topic_count,
            lang = self.native_language,
        )
    }

    fn vocab_prompt(&self, band: &str, topic_title: &str) -> String {
        format!(
            "You are an IELTS examiner. Provide {count} words or phrases (collocations and \
             idioms) for the topic \"{topic_title}\" suitable for band {band}. Each entry must \
             include: the phrase, its main keyword, pronunciation (IPA), the English meaning, \
             the meaning in {lang} (vietnameseMeaning field), a realistic IELTS example \
             sentence, and 2-3 synonyms. Return a JSON array.",
            count = self.vocab_count,
            lang = self.native_language,
        )
    }
}

impl ContentProvider for GeminiProvider {
    fn fetch_topics(&self, band: &str) -> Result<Vec<Topic>, ProviderError> {
        self.generate_list(self.topics_prompt(band), topic_schema(), "topics")
    }

    fn fetch_vocab(&self, band: &str, topic_title: &str) -> Result<Vec<VocabEntry>, ProviderError> {
        self.generate_list(self.vocab_prompt(band, topic_title), vocab_schema(), "vocab")
    }

    fn synthesize_speech(&self, phrase: &str) -> Result<SpeechClip, ProviderError> {
        let body = json!({
            "contents": [{ "parts": [{ "text": format!("Pronounce: {phrase}") }] }],
            "generationConfig": {
                "responseModalities": ["AUDIO"],
                "speechConfig": {
                    "voiceConfig": { "prebuiltVoiceConfig": { "voiceName": self.voice } }
                }
            }
        });
        let raw = self.generate(&self.speech_model, &body)?;
        let envelope: GenerateResponse = serde_json::from_str(&raw)
            .map_err(|e| ProviderError::InvalidAudio(e.to_string()))?;
        let inline = envelope.inline_data().ok_or(ProviderError::EmptyResponse)?;
        decode_pcm(&inline.data, &inline.mime_type)
    }
}

fn topic_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "id": { "type": "STRING" },
            "title": { "type": "STRING" },
            "vietnameseTitle": { "type": "STRING" },
            "description": { "type": "STRING" },
            "commonInPart": {
                "type": "STRING",
                "enum": ["Part 1", "Part 2", "Part 3", "Writing"]
            }
        },
        "required": ["id", "title", "vietnameseTitle", "description", "commonInPart"]
    })
}

fn vocab_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "phrase": { "type": "STRING" },
            "mainKeyword": { "type": "STRING" },
            "pronunciation": { "type": "STRING" },
            "meaning": { "type": "STRING" },
            "vietnameseMeaning": { "type": "STRING" },
            "exampleSentence": { "type": "STRING" },
            "synonyms": { "type": "ARRAY", "items": { "type": "STRING" } }
        },
        "required": [
            "phrase", "mainKeyword", "pronunciation", "meaning",
            "vietnameseMeaning", "exampleSentence", "synonyms"
        ]
    })
}

/// Decode base64 16-bit little-endian PCM, e.g. `audio/L16;codec=pcm;rate=24000`.
pub fn decode_pcm(data: &str, mime_type: &str) -> Result<SpeechClip, ProviderError> {
    let bytes = BASE64
        .decode(data.trim())
        .map_err(|e| ProviderError::InvalidAudio(e.to_string()))?;
    if bytes.is_empty() {
        return Err(ProviderError::EmptyResponse);
    }
    if bytes.len() % 2 != 0 {
        return Err(ProviderError::InvalidAudio(format!(
            "odd byte count {} for 16-bit samples",
            bytes.len()
        )));
    }
    let samples = bytes
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    Ok(SpeechClip {
        sample_rate: sample_rate_from_mime(mime_type).unwrap_or(DEFAULT_SPEECH_RATE),
        samples,
    })
}

fn sample_rate_from_mime(mime_type: &str) -> Option<u32> {
    mime_type
        .split(';')
        .filter_map(|param| param.trim().strip_prefix("rate="))
        .find_map(|rate| rate.parse().ok())
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{cut}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_text_joins_parts() {
        let raw = r#"{"candidates":[{"content":{"parts":[{"text":"[{\"a\":"},{"text":"1}]"}]}}]}"#;
        let envelope: GenerateResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(envelope.text(), r#"[{"a":1}]"#);
    }

    #[test]
    fn response_without_candidates_has_empty_text() {
        let envelope: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(envelope.text(), "");
        assert!(envelope.inline_data().is_none());
    }

    #[test]
    fn inline_audio_is_found() {
        let raw = r#"{"candidates":[{"content":{"parts":[{"inlineData":{"mimeType":"audio/L16;codec=pcm;rate=24000","data":"AAA="}}]}}]}"#;
        let envelope: GenerateResponse = serde_json::from_str(raw).unwrap();
        let inline = envelope.inline_data().unwrap();
        assert_eq!(inline.mime_type, "audio/L16;codec=pcm;rate=24000");
    }

    #[test]
    fn decode_pcm_little_endian() {
        let data = BASE64.encode([0x01u8, 0x00, 0xff, 0x7f, 0x00, 0x80]);
        let clip = decode_pcm(&data, "audio/L16;codec=pcm;rate=16000").unwrap();
        assert_eq!(clip.sample_rate, 16_000);
        assert_eq!(clip.samples, vec![1, i16::MAX, i16::MIN]);
    }

    #[test]
    fn decode_pcm_defaults_rate() {
        let data = BASE64.encode([0u8, 0u8]);
        let clip = decode_pcm(&data, "").unwrap();
        assert_eq!(clip.sample_rate, DEFAULT_SPEECH_RATE);
    }

    #[test]
    fn decode_pcm_rejects_bad_payloads() {
        assert!(matches!(
            decode_pcm("not base64!", ""),
            Err(ProviderError::InvalidAudio(_))
        ));
        assert!(matches!(decode_pcm("", ""), Err(ProviderError::EmptyResponse)));
        let odd = BASE64.encode([1u8, 2, 3]);
        assert!(matches!(
            decode_pcm(&odd, ""),
            Err(ProviderError::InvalidAudio(_))
        ));
    }

    #[test]
    fn truncate_long_bodies() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdef", 3), "abc…");
    }
}
