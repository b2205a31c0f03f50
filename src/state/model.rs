use std::fmt;

use serde::{Deserialize, Serialize};

/// Free-form proficiency token such as "6.5". Empty means unset.
pub type BandScore = String;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExamSection {
    #[serde(rename = "Part 1")]
    Part1,
    #[serde(rename = "Part 2")]
    Part2,
    #[serde(rename = "Part 3")]
    Part3,
    #[serde(rename = "Writing")]
    Writing,
}

impl ExamSection {
    pub fn as_str(self) -> &'static str {
        match self {
            ExamSection::Part1 => "Part 1",
            ExamSection::Part2 => "Part 2",
            ExamSection::Part3 => "Part 3",
            ExamSection::Writing => "Writing",
        }
    }
}

impl fmt::Display for ExamSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A generated subject area. Field names on the wire follow the provider schema.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: String,
    pub title: String,
    #[serde(rename = "vietnameseTitle", alias = "localizedTitle")]
    pub localized_title: String,
    pub description: String,
    #[serde(rename = "commonInPart", alias = "examSection")]
    pub exam_section: ExamSection,
}

/// One vocabulary record. List position is its only identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabEntry {
    pub phrase: String,
    #[serde(rename = "mainKeyword", alias = "keyword")]
    pub keyword: String,
    pub pronunciation: String,
    pub meaning: String,
    #[serde(rename = "vietnameseMeaning", alias = "localizedMeaning")]
    pub localized_meaning: String,
    #[serde(rename = "exampleSentence")]
    pub example_sentence: String,
    #[serde(default)]
    pub synonyms: Vec<String>,
}
