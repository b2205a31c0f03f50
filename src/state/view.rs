use std::fmt;

use crate::state::model::{BandScore, Topic, VocabEntry};
use crate::state::overlay::{CardStep, Overlays, PracticeSession};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Home,
    TopicList,
    VocabList,
}

/// Failed fetch. Carries nothing beyond a message for the log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchFailure {
    pub message: String,
}

impl FetchFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

pub type FetchOutcome<T> = Result<Vec<T>, FetchFailure>;

/// Generation bookkeeping for one kind of fetch. Only the most recently
/// issued generation may settle; anything else is stale.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FetchSlot {
    issued: u64,
    in_flight: Option<u64>,
}

impl FetchSlot {
    pub fn begin(&mut self) -> u64 {
        self.issued += 1;
        self.in_flight = Some(self.issued);
        self.issued
    }

    /// Clears the in-flight marker if `generation` is current.
    pub fn settle(&mut self, generation: u64) -> bool {
        if self.in_flight == Some(generation) {
            self.in_flight = None;
            true
        } else {
            false
        }
    }

    pub fn abandon(&mut self) {
        self.in_flight = None;
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpeakTarget {
    Entry(usize),
    CurrentCard,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Msg {
    SubmitBand(String),
    RefreshTopics,
    SelectTopic(usize),
    Back,
    ChangeBand,
    OpenWordDetail(usize),
    CloseWordDetail,
    StartPractice,
    FlipCard,
    PrevCard,
    NextCard,
    ExitPractice,
    Speak(SpeakTarget),
    TopicsLoaded {
        generation: u64,
        outcome: FetchOutcome<Topic>,
    },
    VocabLoaded {
        generation: u64,
        outcome: FetchOutcome<VocabEntry>,
    },
}

/// Side effects requested by a transition, run outside the state machine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    FetchTopics {
        generation: u64,
        band: BandScore,
    },
    FetchVocab {
        generation: u64,
        band: BandScore,
        topic_title: String,
    },
    Speak {
        phrase: String,
    },
}

/// Single source of truth for what is on screen.
#[derive(Clone, Debug, Default)]
pub struct ViewState {
    pub band: BandScore,
    pub topics: Vec<Topic>,
    pub selected_topic: Option<Topic>,
    pub vocab_list: Vec<VocabEntry>,
    pub overlays: Overlays,
    topic_fetch: FetchSlot,
    vocab_fetch: FetchSlot,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn screen(&self) -> Screen {
        match (self.band.is_empty(), &self.selected_topic) {
            (true, _) => Screen::Home,
            (false, None) => Screen::TopicList,
            (false, Some(_)) => Screen::VocabList,
        }
    }

    pub fn loading_topics(&self) -> bool {
        self.topic_fetch.is_loading()
    }

    pub fn loading_vocab(&self) -> bool {
        self.vocab_fetch.is_loading()
    }

    pub fn word_detail(&self) -> Option<&VocabEntry> {
        self.overlays
            .word_detail
            .and_then(|idx| self.vocab_list.get(idx))
    }

    pub fn practice(&self) -> Option<&PracticeSession> {
        self.overlays.practice.as_ref()
    }

    pub fn current_card(&self) -> Option<&VocabEntry> {
        self.practice()
            .and_then(|session| self.vocab_list.get(session.card_index))
    }

    pub fn update(&mut self, msg: Msg) -> Vec<Effect> {
        match msg {
            Msg::SubmitBand(value) => self.submit_band(value),
            Msg::RefreshTopics => {
                if self.band.is_empty() {
                    return Vec::new();
                }
                let band = self.band.clone();
                self.submit_band(band)
            }
            Msg::SelectTopic(idx) => self.select_topic(idx),
            Msg::Back => {
                if self.selected_topic.is_some() {
                    tracing::debug!("back to topic list");
                }
                self.selected_topic = None;
                self.vocab_list.clear();
                self.vocab_fetch.abandon();
                self.overlays.clear();
                Vec::new()
            }
            Msg::ChangeBand => {
                tracing::debug!(band = %self.band, "band cleared");
                self.band.clear();
                self.topics.clear();
                self.selected_topic = None;
                self.vocab_list.clear();
                self.topic_fetch.abandon();
                self.vocab_fetch.abandon();
                self.overlays.clear();
                Vec::new()
            }
            Msg::OpenWordDetail(idx) => {
                if idx < self.vocab_list.len() {
                    self.overlays.word_detail = Some(idx);
                }
                Vec::new()
            }
            Msg::CloseWordDetail => {
                self.overlays.word_detail = None;
                Vec::new()
            }
            Msg::StartPractice => {
                if !self.loading_vocab() {
                    self.overlays.practice = PracticeSession::start(self.vocab_list.len());
                }
                Vec::new()
            }
            Msg::FlipCard => {
                if let Some(session) = self.overlays.practice.as_mut() {
                    session.flip();
                }
                Vec::new()
            }
            Msg::PrevCard => {
                if let Some(session) = self.overlays.practice.as_mut() {
                    session.prev();
                }
                Vec::new()
            }
            Msg::NextCard => {
                if let Some(session) = self.overlays.practice.as_mut() {
                    if session.next() == CardStep::Finished {
                        tracing::debug!(cards = session.len(), "practice session finished");
                        self.overlays.practice = None;
                    }
                }
                Vec::new()
            }
            Msg::ExitPractice => {
                self.overlays.practice = None;
                Vec::new()
            }
            Msg::Speak(target) => {
                let entry = match target {
                    SpeakTarget::Entry(idx) => self.vocab_list.get(idx),
                    SpeakTarget::CurrentCard => self.current_card(),
                };
                entry
                    .map(|e| Effect::Speak {
                        phrase: e.phrase.clone(),
                    })
                    .into_iter()
                    .collect()
            }
            Msg::TopicsLoaded {
                generation,
                outcome,
            } => {
                if !self.topic_fetch.settle(generation) {
                    tracing::debug!(generation, "discarding stale topic response");
                    return Vec::new();
                }
                match outcome {
                    Ok(topics) => {
                        tracing::info!(generation, count = topics.len(), "topics applied");
                        self.topics = topics;
                    }
                    Err(failure) => {
                        tracing::warn!(generation, error = %failure, "topic fetch failed");
                    }
                }
                Vec::new()
            }
            Msg::VocabLoaded {
                generation,
                outcome,
            } => {
                if !self.vocab_fetch.settle(generation) {
                    tracing::debug!(generation, "discarding stale vocabulary response");
                    return Vec::new();
                }
                match outcome {
                    Ok(entries) => {
                        tracing::info!(generation, count = entries.len(), "vocabulary applied");
                        self.vocab_list = entries;
                    }
                    Err(failure) => {
                        tracing::warn!(generation, error = %failure, "vocabulary fetch failed");
                    }
                }
                Vec::new()
            }
        }
    }

    fn submit_band(&mut self, value: String) -> Vec<Effect> {
        if value.trim().is_empty() {
            return Vec::new();
        }
        tracing::debug!(band = %value, "band submitted");
        self.band = value;
        self.selected_topic = None;
        self.vocab_list.clear();
        self.vocab_fetch.abandon();
        self.overlays.clear();
        let generation = self.topic_fetch.begin();
        vec![Effect::FetchTopics {
            generation,
            band: self.band.clone(),
        }]
    }

    fn select_topic(&mut self, idx: usize) -> Vec<Effect> {
        if self.band.is_empty() || self.loading_topics() {
            return Vec::new();
        }
        let Some(topic) = self.topics.get(idx).cloned() else {
            return Vec::new();
        };
        tracing::debug!(topic = %topic.title, "topic selected");
        let topic_title = topic.title.clone();
        self.selected_topic = Some(topic);
        self.vocab_list.clear();
        self.overlays.clear();
        let generation = self.vocab_fetch.begin();
        vec![Effect::FetchVocab {
            generation,
            band: self.band.clone(),
            topic_title,
        }]
    }
}
