//! Detection of the payload shape used for each feedback category.
//!
//! Analysis callbacks have shipped three encodings over time. For a given
//! category exactly one is chosen, in this order:
//!
//! 1. **Flat** keys such as `wordChoiceScore` / `wordChoiceDescription`. Any
//!    one of them being present (even as `null`) selects this shape.
//! 2. **Nested** object under `wordChoice`. A non-empty string in that slot is
//!    read as serialized JSON.
//! 3. **Plain** value under `wordChoiceFeedback`, usually JSON text.

use serde_json::{Map, Value};

use super::FeedbackCategory;

/// Where the score and description for a scored category were found.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoredShape<'a> {
    Flat {
        score: Option<&'a Value>,
        description: Option<&'a Value>,
    },
    Nested(&'a Map<String, Value>),
    Text(&'a Value),
}

#[derive(Debug, Clone, PartialEq)]
pub enum FillerShape<'a> {
    Flat {
        count: Option<&'a Value>,
        score: Option<&'a Value>,
        list: Option<&'a Value>,
        description: Option<&'a Value>,
    },
    Nested(&'a Map<String, Value>),
    Text(&'a Value),
}

pub fn detect_scored(payload: &Map<String, Value>, category: FeedbackCategory) -> Option<ScoredShape<'_>> {
    let score = payload.get(category.flat_score_key());
    let description = payload.get(category.flat_description_key());
    if score.is_some() || description.is_some() {
        return Some(ScoredShape::Flat { score, description });
    }

    match sub_payload(payload, category)? {
        SubPayload::Object(map) => Some(ScoredShape::Nested(map)),
        SubPayload::Text(value) => Some(ScoredShape::Text(value)),
    }
}

pub fn detect_filler(payload: &Map<String, Value>) -> Option<FillerShape<'_>> {
    let count = payload.get("fillerWordCount");
    let score = payload.get(FeedbackCategory::FillerWords.flat_score_key());
    let list = payload.get("fillerWordList");
    let description = payload.get(FeedbackCategory::FillerWords.flat_description_key());
    if count.is_some() || score.is_some() || list.is_some() || description.is_some() {
        return Some(FillerShape::Flat {
            count,
            score,
            list,
            description,
        });
    }

    match sub_payload(payload, FeedbackCategory::FillerWords)? {
        SubPayload::Object(map) => Some(FillerShape::Nested(map)),
        SubPayload::Text(value) => Some(FillerShape::Text(value)),
    }
}

enum SubPayload<'a> {
    Object(&'a Map<String, Value>),
    Text(&'a Value),
}

/// Nested slot first, then the plain slot. Nulls, empty strings and arrays
/// count as absent.
fn sub_payload(payload: &Map<String, Value>, category: FeedbackCategory) -> Option<SubPayload<'_>> {
    [category.nested_key(), category.plain_key()]
        .into_iter()
        .filter_map(|key| payload.get(key))
        .find_map(|value| match value {
            Value::Object(map) => Some(SubPayload::Object(map)),
            Value::String(s) if s.is_empty() => None,
            Value::String(_) | Value::Number(_) | Value::Bool(_) => Some(SubPayload::Text(value)),
            Value::Null | Value::Array(_) => None,
        })
}
