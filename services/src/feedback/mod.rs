//! Per-category speaking feedback.
//!
//! The analysis service reports on three categories. Each is persisted as a
//! JSON-encoded object in its own submission column; [`CategoryFeedback`] is
//! the typed view of those three columns.

pub mod callback;
pub mod fields;
pub mod normalizer;
pub mod shape;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use db::models::submission;

pub use callback::FeedbackCallback;
pub use normalizer::{FeedbackNormalizer, normalize};

/// The feedback categories reported by the analysis service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedbackCategory {
    WordChoice,
    BodyLanguage,
    FillerWords,
}

impl FeedbackCategory {
    pub const ALL: [FeedbackCategory; 3] = [
        FeedbackCategory::WordChoice,
        FeedbackCategory::BodyLanguage,
        FeedbackCategory::FillerWords,
    ];

    /// Key of the nested-object form, e.g. `{"wordChoice": {...}}`.
    pub fn nested_key(self) -> &'static str {
        match self {
            FeedbackCategory::WordChoice => "wordChoice",
            FeedbackCategory::BodyLanguage => "bodyLanguage",
            FeedbackCategory::FillerWords => "fillerWords",
        }
    }

    /// Key of the plain-text form, e.g. `{"wordChoiceFeedback": "..."}`.
    pub fn plain_key(self) -> &'static str {
        match self {
            FeedbackCategory::WordChoice => "wordChoiceFeedback",
            FeedbackCategory::BodyLanguage => "bodyLanguageFeedback",
            FeedbackCategory::FillerWords => "fillerWordFeedback",
        }
    }

    pub fn flat_score_key(self) -> &'static str {
        match self {
            FeedbackCategory::WordChoice => "wordChoiceScore",
            FeedbackCategory::BodyLanguage => "bodyLanguageScore",
            FeedbackCategory::FillerWords => "fillerWordScore",
        }
    }

    pub fn flat_description_key(self) -> &'static str {
        match self {
            FeedbackCategory::WordChoice => "wordChoiceDescription",
            FeedbackCategory::BodyLanguage => "bodyLanguageDescription",
            FeedbackCategory::FillerWords => "fillerWordDescription",
        }
    }
}

/// Score plus free-text commentary for one category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoredFeedback {
    pub score: Option<f64>,
    pub description: Option<String>,
}

pub type WordChoiceFeedback = ScoredFeedback;
pub type BodyLanguageFeedback = ScoredFeedback;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FillerWordFeedback {
    pub count: u64,
    pub score: Option<f64>,
    pub list: Vec<String>,
    pub description: Option<String>,
}

impl ScoredFeedback {
    pub fn from_object(map: &Map<String, Value>) -> Self {
        Self {
            score: map.get("score").and_then(fields::score),
            description: map.get("description").and_then(fields::text),
        }
    }

    /// Decodes a textual sub-payload. Well-formed JSON objects are read field
    /// by field; any other text becomes the description.
    pub fn from_text(text: &str) -> Self {
        match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(map)) => Self::from_object(&map),
            _ => Self {
                score: None,
                description: fields::text(&Value::String(text.to_owned())),
            },
        }
    }
}

impl FillerWordFeedback {
    pub fn from_object(map: &Map<String, Value>) -> Self {
        Self {
            count: map.get("count").map(fields::count).unwrap_or(0),
            score: map.get("score").and_then(fields::score),
            list: map.get("list").map(fields::word_list).unwrap_or_default(),
            description: map.get("description").and_then(fields::text),
        }
    }

    pub fn from_text(text: &str) -> Self {
        match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(map)) => Self::from_object(&map),
            _ => Self {
                description: fields::text(&Value::String(text.to_owned())),
                ..Self::default()
            },
        }
    }
}

/// The normalized feedback for all three categories. `None` means the
/// category was not reported.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryFeedback {
    pub word_choice: Option<WordChoiceFeedback>,
    pub body_language: Option<BodyLanguageFeedback>,
    pub filler_words: Option<FillerWordFeedback>,
}

impl CategoryFeedback {
    pub fn is_empty(&self) -> bool {
        self.word_choice.is_none() && self.body_language.is_none() && self.filler_words.is_none()
    }

    /// Reads the stored feedback columns of a submission.
    pub fn from_submission(row: &submission::Model) -> Self {
        Self {
            word_choice: decode_column(row.word_choice_feedback.as_deref(), ScoredFeedback::from_text),
            body_language: decode_column(
                row.body_language_feedback.as_deref(),
                ScoredFeedback::from_text,
            ),
            filler_words: decode_column(
                row.filler_word_feedback.as_deref(),
                FillerWordFeedback::from_text,
            ),
        }
    }
}

fn decode_column<T>(stored: Option<&str>, decode: fn(&str) -> T) -> Option<T> {
    stored.filter(|text| !text.trim().is_empty()).map(decode)
}
