/// Sequential single-card review over the current vocabulary list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PracticeSession {
    pub card_index: usize,
    pub is_flipped: bool,
    len: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardStep {
    Moved,
    Stayed,
    Finished,
}

impl PracticeSession {
    /// Returns `None` for an empty deck.
    pub fn start(len: usize) -> Option<Self> {
        if len == 0 {
            return None;
        }
        Some(Self {
            card_index: 0,
            is_flipped: false,
            len,
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_last(&self) -> bool {
        self.card_index + 1 >= self.len
    }

    pub fn flip(&mut self) {
        self.is_flipped = !self.is_flipped;
    }

    pub fn prev(&mut self) -> CardStep {
        self.is_flipped = false;
        if self.card_index > 0 {
            self.card_index -= 1;
            CardStep::Moved
        } else {
            CardStep::Stayed
        }
    }

    pub fn next(&mut self) -> CardStep {
        if self.is_last() {
            return CardStep::Finished;
        }
        self.card_index += 1;
        self.is_flipped = false;
        CardStep::Moved
    }
}

/// Modal layers drawn over the main screen. Both are independent of the
/// screen derivation and of each other.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Overlays {
    /// Position in the vocabulary list of the entry being inspected.
    pub word_detail: Option<usize>,
    pub practice: Option<PracticeSession>,
}

impl Overlays {
    pub fn clear(&mut self) {
        self.word_detail = None;
        self.practice = None;
    }

    pub fn is_empty(&self) -> bool {
        self.word_detail.is_none() && self.practice.is_none()
    }
}
