use serde_json::Value;

use super::shape::{FillerShape, ScoredShape, detect_filler, detect_scored};
use super::{CategoryFeedback, FeedbackCategory, FillerWordFeedback, ScoredFeedback, fields};

/// Turns an analysis callback payload into typed per-category feedback.
///
/// Never fails: unknown keys are ignored, unusable values become absent and
/// undecodable text is kept as the description.
pub struct FeedbackNormalizer;

impl FeedbackNormalizer {
    pub fn normalize(payload: &Value) -> CategoryFeedback {
        let Some(map) = payload.as_object() else {
            return CategoryFeedback::default();
        };

        CategoryFeedback {
            word_choice: detect_scored(map, FeedbackCategory::WordChoice).map(Self::resolve_scored),
            body_language: detect_scored(map, FeedbackCategory::BodyLanguage)
                .map(Self::resolve_scored),
            filler_words: detect_filler(map).map(Self::resolve_filler),
        }
    }

    fn resolve_scored(shape: ScoredShape<'_>) -> ScoredFeedback {
        match shape {
            ScoredShape::Flat { score, description } => ScoredFeedback {
                score: score.and_then(fields::score),
                description: description.and_then(fields::text),
            },
            ScoredShape::Nested(map) => ScoredFeedback::from_object(map),
            ScoredShape::Text(value) => fields::text(value)
                .map(|text| ScoredFeedback::from_text(&text))
                .unwrap_or_default(),
        }
    }

    fn resolve_filler(shape: FillerShape<'_>) -> FillerWordFeedback {
        match shape {
            FillerShape::Flat {
                count,
                score,
                list,
                description,
            } => FillerWordFeedback {
                count: count.map(fields::count).unwrap_or(0),
                score: score.and_then(fields::score),
                list: list.map(fields::word_list).unwrap_or_default(),
                description: description.and_then(fields::text),
            },
            FillerShape::Nested(map) => FillerWordFeedback::from_object(map),
            FillerShape::Text(value) => fields::text(value)
                .map(|text| FillerWordFeedback::from_text(&text))
                .unwrap_or_default(),
        }
    }
}

/// Shorthand for [`FeedbackNormalizer::normalize`].
pub fn normalize(payload: &Value) -> CategoryFeedback {
    FeedbackNormalizer::normalize(payload)
}
