use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use vocabcard::config::Config;
use vocabcard::dispatch::Dispatcher;
use vocabcard::event::AppEvent;
use vocabcard::provider::decode::decode_list;
use vocabcard::provider::{ContentProvider, ProviderError, SpeechClip};
use vocabcard::state::model::{ExamSection, Topic, VocabEntry};
use vocabcard::state::view::{Msg, Screen, ViewState};

/// In-memory provider that replays canned payloads and records every call.
#[derive(Default)]
struct ScriptedProvider {
    topics_payload: String,
    vocab_payload: Option<String>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, call: String) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

impl ContentProvider for ScriptedProvider {
    fn fetch_topics(&self, band: &str) -> Result<Vec<Topic>, ProviderError> {
        self.record(format!("topics:{band}"));
        Ok(decode_list(&self.topics_payload, "topics"))
    }

    fn fetch_vocab(&self, band: &str, topic_title: &str) -> Result<Vec<VocabEntry>, ProviderError> {
        self.record(format!("vocab:{band}:{topic_title}"));
        match &self.vocab_payload {
            Some(text) => Ok(decode_list(text, "vocab")),
            None => Err(ProviderError::Status {
                status: 500,
                body: "internal".into(),
            }),
        }
    }

    fn synthesize_speech(&self, phrase: &str) -> Result<SpeechClip, ProviderError> {
        self.record(format!("speech:{phrase}"));
        Err(ProviderError::Unsupported("speech synthesis"))
    }
}

const TOPICS: &str = r#"```json
[
  {"id": "t1", "title": "Environment", "vietnameseTitle": "Môi trường",
   "description": "Climate and pollution", "commonInPart": "Part 3"},
  {"id": "t2", "title": "Work", "vietnameseTitle": "Công việc",
   "description": "Jobs and careers", "commonInPart": "Part 1"}
]
```"#;

const VOCAB: &str = r#"[
  {"phrase": "carbon footprint", "mainKeyword": "footprint", "pronunciation": "/ˈkɑːbən/",
   "meaning": "emissions caused by a person", "vietnameseMeaning": "lượng khí thải",
   "exampleSentence": "Cut your carbon footprint.", "synonyms": ["emissions"]}
]"#;

fn harness(provider: ScriptedProvider) -> (Arc<ScriptedProvider>, Dispatcher, Receiver<AppEvent>) {
    let provider = Arc::new(provider);
    let (tx, rx) = mpsc::channel();
    let mut config = Config::default();
    config.audio_player = Vec::new();
    config.speech_command = Vec::new();
    let dispatcher = Dispatcher::new(provider.clone(), &config, tx);
    (provider, dispatcher, rx)
}

/// Runs every effect to completion and feeds the results back into the state.
fn drive(state: &mut ViewState, dispatcher: &Dispatcher, rx: &Receiver<AppEvent>, msg: Msg) {
    for effect in state.update(msg) {
        dispatcher.run(effect).join().expect("worker panicked");
    }
    while let Ok(event) = rx.recv_timeout(Duration::from_millis(50)) {
        if let AppEvent::Provider(msg) = event {
            drive(state, dispatcher, rx, msg);
        }
    }
}

#[test]
fn topics_and_vocab_flow_through_the_channel() {
    let (provider, dispatcher, rx) = harness(ScriptedProvider {
        topics_payload: TOPICS.into(),
        vocab_payload: Some(VOCAB.into()),
        ..Default::default()
    });
    let mut state = ViewState::new();

    drive(&mut state, &dispatcher, &rx, Msg::SubmitBand("6.5".into()));
    assert!(!state.loading_topics());
    assert_eq!(state.topics.len(), 2);
    assert_eq!(state.topics[0].localized_title, "Môi trường");
    assert_eq!(state.topics[0].exam_section, ExamSection::Part3);

    drive(&mut state, &dispatcher, &rx, Msg::SelectTopic(0));
    assert_eq!(state.screen(), Screen::VocabList);
    assert!(!state.loading_vocab());
    assert_eq!(state.vocab_list.len(), 1);
    assert_eq!(state.vocab_list[0].keyword, "footprint");

    assert_eq!(
        provider.calls(),
        vec!["topics:6.5".to_string(), "vocab:6.5:Environment".to_string()]
    );
}

#[test]
fn malformed_topics_become_an_empty_list() {
    let (_provider, dispatcher, rx) = harness(ScriptedProvider {
        topics_payload: "Sorry, I cannot help with that.".into(),
        ..Default::default()
    });
    let mut state = ViewState::new();

    drive(&mut state, &dispatcher, &rx, Msg::SubmitBand("5.0".into()));
    assert_eq!(state.screen(), Screen::TopicList);
    assert!(!state.loading_topics());
    assert!(state.topics.is_empty());
}

#[test]
fn provider_error_clears_loading_and_keeps_screen() {
    let (_provider, dispatcher, rx) = harness(ScriptedProvider {
        topics_payload: TOPICS.into(),
        vocab_payload: None,
        ..Default::default()
    });
    let mut state = ViewState::new();

    drive(&mut state, &dispatcher, &rx, Msg::SubmitBand("6.5".into()));
    drive(&mut state, &dispatcher, &rx, Msg::SelectTopic(1));
    assert_eq!(state.screen(), Screen::VocabList);
    assert!(!state.loading_vocab());
    assert!(state.vocab_list.is_empty());
}

#[test]
fn late_result_for_abandoned_topic_is_dropped() {
    let (_provider, dispatcher, rx) = harness(ScriptedProvider {
        topics_payload: TOPICS.into(),
        vocab_payload: Some(VOCAB.into()),
        ..Default::default()
    });
    let mut state = ViewState::new();
    drive(&mut state, &dispatcher, &rx, Msg::SubmitBand("6.5".into()));

    // Start a vocab fetch, but leave the screen before its result is delivered.
    let effects = state.update(Msg::SelectTopic(0));
    for effect in effects {
        dispatcher.run(effect).join().expect("worker panicked");
    }
    state.update(Msg::Back);

    let Ok(AppEvent::Provider(late)) = rx.recv_timeout(Duration::from_secs(1)) else {
        panic!("expected the vocab completion");
    };
    state.update(late);
    assert_eq!(state.screen(), Screen::TopicList);
    assert!(state.vocab_list.is_empty());
}

#[test]
fn speech_failure_is_silent() {
    let (provider, dispatcher, rx) = harness(ScriptedProvider {
        topics_payload: TOPICS.into(),
        vocab_payload: Some(VOCAB.into()),
        ..Default::default()
    });
    let mut state = ViewState::new();
    drive(&mut state, &dispatcher, &rx, Msg::SubmitBand("6.5".into()));
    drive(&mut state, &dispatcher, &rx, Msg::SelectTopic(0));

    drive(
        &mut state,
        &dispatcher,
        &rx,
        Msg::Speak(vocabcard::state::view::SpeakTarget::Entry(0)),
    );
    assert!(provider.calls().contains(&"speech:carbon footprint".to_string()));
    assert_eq!(state.vocab_list.len(), 1);
}

#[test]
fn malformed_vocab_becomes_an_empty_list() {
    let (_provider, dispatcher, rx) = harness(ScriptedProvider {
        topics_payload: TOPICS.into(),
        vocab_payload: Some("not json".into()),
        ..Default::default()
    });
    let mut state = ViewState::new();
    drive(&mut state, &dispatcher, &rx, Msg::SubmitBand("6.5".into()));

    let effects = state.update(Msg::SelectTopic(0));
    assert!(state.loading_vocab());
    for effect in effects {
        dispatcher.run(effect).join().expect("worker panicked");
    }
    let Ok(AppEvent::Provider(loaded)) = rx.recv_timeout(Duration::from_secs(1)) else {
        panic!("expected the vocab completion");
    };
    state.update(loaded);

    assert!(!state.loading_vocab());
    assert!(state.vocab_list.is_empty());
    assert!(state.overlays.is_empty());
    assert_eq!(state.screen(), Screen::VocabList);
}
