use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};

use crate::config::Config;
use crate::event::AppEvent;
use crate::provider::{ContentProvider, ProviderError};
use crate::speech::SpeechPlayer;
use crate::state::view::{Effect, FetchFailure, FetchOutcome, Msg};

/// Runs effects off the UI thread. Fetch results come back as
/// `AppEvent::Provider` carrying the generation they were issued with.
pub struct Dispatcher {
    provider: Arc<dyn ContentProvider>,
    speech: Arc<SpeechPlayer>,
    events: Sender<AppEvent>,
}

impl Dispatcher {
    pub fn new(provider: Arc<dyn ContentProvider>, config: &Config, events: Sender<AppEvent>) -> Self {
        let speech = Arc::new(SpeechPlayer::new(Arc::clone(&provider), config));
        Self {
            provider,
            speech,
            events,
        }
    }

    pub fn run(&self, effect: Effect) -> JoinHandle<()> {
        let provider = Arc::clone(&self.provider);
        let events = self.events.clone();

        match effect {
            Effect::FetchTopics { generation, band } => {
                tracing::info!(generation, band = %band, "fetching topics");
                thread::spawn(move || {
                    let outcome = settle(provider.fetch_topics(&band), "topics");
                    // The loop is gone if the receiver dropped; nothing to do.
                    let _ = events.send(AppEvent::Provider(Msg::TopicsLoaded { generation, outcome }));
                })
            }
            Effect::FetchVocab {
                generation,
                band,
                topic_title,
            } => {
                tracing::info!(generation, band = %band, topic = %topic_title, "fetching vocabulary");
                thread::spawn(move || {
                    let outcome = settle(provider.fetch_vocab(&band, &topic_title), "vocab");
                    let _ = events.send(AppEvent::Provider(Msg::VocabLoaded { generation, outcome }));
                })
            }
            Effect::Speak { phrase } => {
                let speech = Arc::clone(&self.speech);
                thread::spawn(move || speech.speak(&phrase))
            }
        }
    }
}

fn settle<T>(result: Result<Vec<T>, ProviderError>, what: &str) -> FetchOutcome<T> {
    result.map_err(|e| {
        tracing::warn!(kind = e.kind(), what, error = %e, "provider call failed");
        FetchFailure::new(e.to_string())
    })
}
